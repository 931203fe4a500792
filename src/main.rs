use std::sync::Arc;

use taxi_fleet::{
    errors::FleetError,
    routes::build_router,
    state::{AppConfig, AppState},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), FleetError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("taxi_fleet=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let bind_addr = config.bind_addr.clone();
    let app_state = AppState::new(config).await?;

    let app = build_router(Arc::new(app_state));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| FleetError::Configuration(format!("cannot bind {}: {}", bind_addr, e)))?;
    tracing::info!("Listening on {}", bind_addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| FleetError::internal_error(e.to_string()))
}
