//! Server command implementation

use anyhow::Result;
use spendwise_core::Config;
use spendwise_server::{parse_allowed_origins, ServerConfig};

/// Env var overriding the configured CORS origins (comma-separated)
pub const ALLOWED_ORIGINS_ENV: &str = "SPENDWISE_ALLOWED_ORIGINS";

/// Build the server config from the config file plus environment overrides
pub fn server_config(config: &Config, origins_override: Option<&str>) -> ServerConfig {
    let mut server = ServerConfig::from_config(config);
    if let Some(origins) = origins_override {
        let origins = parse_allowed_origins(origins);
        if !origins.is_empty() {
            server.allowed_origins = origins;
        }
    }
    server
}

pub async fn cmd_serve(config: &Config, host: Option<&str>, port: Option<u16>) -> Result<()> {
    let host = host.unwrap_or(&config.server.host);
    let port = port.unwrap_or(config.server.port);

    let origins_override = std::env::var(ALLOWED_ORIGINS_ENV).ok();
    let server = server_config(config, origins_override.as_deref());

    println!("🚀 Starting Spendwise web server...");
    println!("   Listening: http://{}:{}", host, port);
    println!("   Allowed origins: {}", server.allowed_origins.join(", "));
    println!(
        "   Window: {} days, projection: {} days, threshold: {}x",
        server.analysis.window_days,
        server.analysis.projection_days,
        server.analysis.higher_than_usual_ratio
    );
    println!();
    println!("   Press Ctrl+C to stop");

    spendwise_server::serve(host, port, server).await?;

    Ok(())
}
