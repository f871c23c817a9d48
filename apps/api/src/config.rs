use anyhow::{Context, Result};

use crate::layout::GeometryPreset;

/// Application configuration loaded from environment variables.
/// Everything has a default — the service runs with no env at all.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Geometry preset applied when a paginate request names none.
    pub default_preset: GeometryPreset,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let default_preset = match std::env::var("DEFAULT_GEOMETRY") {
            Ok(name) => GeometryPreset::parse(&name)
                .map_err(|e| anyhow::anyhow!("DEFAULT_GEOMETRY: {e}"))?,
            Err(_) => GeometryPreset::Screen,
        };

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            default_preset,
        })
    }
}
