use crate::utils::error::{BlendError, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerSection>,
    pub engine: Option<EngineSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineSection {
    pub tolerance: Option<f64>,
}

impl TomlConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| BlendError::Config {
            message: format!("cannot parse {}: {}", path.display(), e),
        })
    }
}
