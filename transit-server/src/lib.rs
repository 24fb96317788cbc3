//! Bus route planner server.
//!
//! A web application that answers: "which buses do I take to get from
//! this stop to that one, and how long will it take?"

pub mod catalog;
pub mod config;
pub mod domain;
pub mod graph;
pub mod planner;
pub mod web;
