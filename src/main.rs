use std::error::Error;

use trip_settlement::api::{AppState, create_router};
use trip_settlement::config::ConfigLoader;
use trip_settlement::telemetry;

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    telemetry::init();

    let config_dir =
        std::env::var("SETTLEMENT_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind_addr =
        std::env::var("SETTLEMENT_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir)?;
    tracing::info!(
        config_dir = %config_dir,
        tolerance = %config.settings().tolerance,
        policy = config.settings().negative_balance_policy.as_str(),
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
