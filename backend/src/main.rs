//! Backend entry-point: loads configuration and serves the REST API.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::server::{AppConfig, ServerError, run};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<(), ServerError> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env()?;
    run(config).await
}
