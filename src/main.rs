//! Service entry point.
//!
//! Startup order matters: configuration first, then the logger (so the
//! formatter matches the environment from the very first line), then the
//! server.

use traceline::config::AppConfig;
use traceline::http::{handlers, HttpServer};
use traceline::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env();
    logging::init(&config);

    tracing::info!(
        environment = config.environment.as_str(),
        log_level = config.log_level.as_str(),
        bind_address = config.bind_address.as_str(),
        "traceline starting"
    );

    let server = HttpServer::new(config, handlers::routes());
    server.run().await?;
    Ok(())
}
