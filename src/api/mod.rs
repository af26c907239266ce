mod error;
mod routes;

pub use routes::router;

use crate::error::Result;
use crate::services::Aggregator;
use tracing::info;

pub async fn serve(port: u16, aggregator: Aggregator) -> Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Server running on port {port}");
    info!("API endpoint: http://localhost:{port}/api/search");

    axum::serve(listener, router(aggregator)).await?;
    Ok(())
}
