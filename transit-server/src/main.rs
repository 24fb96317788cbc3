use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transit_server::catalog::Catalog;
use transit_server::config::ServerConfig;
use transit_server::graph::{ConstantHopWeights, TransitGraph};
use transit_server::planner::{FlatFare, RoutePlanner};
use transit_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("transit_server=info")),
        )
        .init();

    if let Err(e) = run().await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    // A malformed catalog is fatal; there is nothing to plan over
    let catalog = Catalog::from_path(&config.catalog_path)?;
    let graph = TransitGraph::build(
        catalog.into_lines(),
        &ConstantHopWeights::default(),
        config.graph,
    )?;
    info!(
        stops = graph.stop_count(),
        edges = graph.edge_count(),
        "transit graph ready"
    );

    let planner = RoutePlanner::new(
        Arc::new(graph),
        Arc::new(FlatFare::default()),
        config.planner.clone(),
    );
    let app = create_router(AppState::new(planner));

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("Bus route planner listening on http://{}", config.bind);
    info!("  GET /health  - Health check");
    info!("  GET /stops   - List or search stops (?q=&limit=)");
    info!("  GET /lines   - List lines");
    info!("  GET /plan    - Plan a route (?from=&to=&preference=&time=)");

    axum::serve(listener, app).await?;
    Ok(())
}
