//! Backend entry-point: tracing, configuration, and the HTTP server.

use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use ucms_backend::server::{self, ServerConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %error, "tracing init failed");
    }

    server::run(ServerConfig::parse()).await
}
