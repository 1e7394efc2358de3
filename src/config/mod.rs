pub mod cli;
pub mod toml_config;

pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::utils::error::Result;
use crate::utils::validation::{validate_bind_address, validate_tolerance};
use std::net::SocketAddr;

/// Resolved runtime settings: CLI flags, overridden by the TOML file when
/// one is supplied.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub bind: SocketAddr,
    pub tolerance: f64,
}

impl Settings {
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let mut bind = cli.bind.clone();
        let mut tolerance = cli.tolerance;

        if let Some(path) = &cli.config {
            let file = TomlConfig::load(path)?;
            if let Some(value) = file.server.and_then(|s| s.bind) {
                bind = value;
            }
            if let Some(value) = file.engine.and_then(|e| e.tolerance) {
                tolerance = value;
            }
        }

        validate_tolerance(tolerance)?;
        let bind = validate_bind_address(&bind)?;
        Ok(Self { bind, tolerance })
    }
}
