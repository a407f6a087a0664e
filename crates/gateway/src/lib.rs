//! API Gateway Library
//!
//! The HTTP REST surface over the user and license services.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use tracing::info;

use persistence::Database;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Connect to the database, apply pending migrations and serve HTTP.
pub async fn run(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let database = Database::connect(&config.database).await?;

    let state = AppState::from_database(database);
    let app = create_router(state);

    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
