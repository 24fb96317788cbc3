//! Time-of-day handling for timetables.
//!
//! The catalog publishes departures as 12-hour strings such as "8:00 AM".
//! Itineraries only ever need a time of day, so arithmetic wraps at
//! midnight instead of tracking dates.

use chrono::{Duration, NaiveTime, Timelike};
use std::fmt;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day with minute precision.
///
/// Adding minutes past midnight wraps to the next day's time of day.
/// The default is midnight.
///
/// # Examples
///
/// ```
/// use transit_server::domain::ClockTime;
///
/// let t = ClockTime::parse("11:55 PM").unwrap();
/// assert_eq!(t.add_minutes(10).to_string(), "12:05 AM");
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Create a time from 24-hour components.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Parse a time of day.
    ///
    /// Accepts the 12-hour catalog format "H:MM AM" / "HH:MM PM" (the
    /// period is case-insensitive and the space before it optional) and
    /// the 24-hour format "HH:MM".
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_server::domain::ClockTime;
    ///
    /// assert_eq!(ClockTime::parse("12:00 PM").unwrap().hour(), 12);
    /// assert_eq!(ClockTime::parse("12:00 AM").unwrap().hour(), 0);
    /// assert_eq!(ClockTime::parse("17:45").unwrap().to_string(), "5:45 PM");
    ///
    /// assert!(ClockTime::parse("13:00 PM").is_err());
    /// assert!(ClockTime::parse("8 AM").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let s = s.trim();
        let upper = s.to_ascii_uppercase();

        let (clock, period) = if let Some(rest) = upper.strip_suffix("AM") {
            (rest.trim_end(), Some(false))
        } else if let Some(rest) = upper.strip_suffix("PM") {
            (rest.trim_end(), Some(true))
        } else {
            (upper.as_str(), None)
        };

        let (hour_str, minute_str) = clock
            .split_once(':')
            .ok_or_else(|| TimeError::new("expected H:MM"))?;

        if hour_str.is_empty() || hour_str.len() > 2 {
            return Err(TimeError::new("hour must be one or two digits"));
        }
        if minute_str.len() != 2 {
            return Err(TimeError::new("minute must be two digits"));
        }

        let hour = parse_digits(hour_str).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        let minute =
            parse_digits(minute_str).ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let hour = match period {
            Some(is_pm) => {
                if !(1..=12).contains(&hour) {
                    return Err(TimeError::new("12-hour clock hour must be 1-12"));
                }
                // 12 AM is midnight, 12 PM is noon
                match (hour, is_pm) {
                    (12, false) => 0,
                    (12, true) => 12,
                    (h, false) => h,
                    (h, true) => h + 12,
                }
            }
            None => {
                if hour > 23 {
                    return Err(TimeError::new("hour must be 0-23"));
                }
                hour
            }
        };

        Self::from_hm(hour, minute).ok_or_else(|| TimeError::new("invalid time"))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Minutes elapsed since midnight (0-1439).
    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// Add minutes, wrapping past midnight.
    pub fn add_minutes(&self, minutes: u32) -> Self {
        let (time, _) = self
            .0
            .overflowing_add_signed(Duration::minutes(i64::from(minutes % MINUTES_PER_DAY)));
        Self(time)
    }

    /// Minutes from `self` forward to `later`, wrapping past midnight.
    ///
    /// `later` equal to `self` is zero minutes, never a full day.
    pub fn minutes_until(&self, later: Self) -> u32 {
        (later.minutes_since_midnight() + MINUTES_PER_DAY - self.minutes_since_midnight())
            % MINUTES_PER_DAY
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let period = if self.hour() >= 12 { "PM" } else { "AM" };
        let hour = match self.hour() % 12 {
            0 => 12,
            h => h,
        };
        write!(f, "{}:{:02} {}", hour, self.minute(), period)
    }
}

/// Parse one or two ASCII digits into a u32.
fn parse_digits(s: &str) -> Option<u32> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
