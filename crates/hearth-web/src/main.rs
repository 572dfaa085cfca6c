use std::sync::Arc;

use hearth_warehouse::{Warehouse, WarehouseConfig};
use hearth_web::{app, config::Config, init_tracing, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    init_tracing();

    let warehouse_config = match &config.db_path {
        Some(path) => WarehouseConfig::at(path),
        None => WarehouseConfig::default(),
    };
    let warehouse = Warehouse::open(warehouse_config)?;
    tracing::info!(db_path = %warehouse.db_path().display(), "warehouse opened");

    let state = Arc::new(AppState { warehouse });
    let router = app(state);

    tracing::info!("listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
