//! Process configuration.

use clap::Parser;

/// Command-line and environment configuration for the backend process.
#[derive(Debug, Clone, Parser)]
#[command(name = "ucms-backend", about = "University course-management backend")]
pub struct ServerConfig {
    /// Interface to bind the HTTP listener to.
    #[arg(long, env = "UCMS_HTTP_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind the HTTP listener to.
    #[arg(long, env = "UCMS_HTTP_PORT", default_value_t = 8080)]
    pub port: u16,

    /// PostgreSQL connection URL. When absent the process serves the seeded
    /// in-memory registry instead, for local runs and demos.
    #[arg(long, env = "UCMS_DATABASE_URL")]
    pub database_url: Option<String>,
}
