// Sizing of the airline network structures

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::GraphKind;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{0} must be greater than zero")]
    ZeroCapacity(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub max_airports: usize,
    pub directory_capacity: usize,
    pub wallet_capacity: usize,
    pub graph_kind: GraphKind,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            max_airports: 10,
            directory_capacity: 10,
            wallet_capacity: 16,
            graph_kind: GraphKind::Undirected,
        }
    }
}

impl NetworkConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_airports == 0 {
            return Err(ConfigError::ZeroCapacity("max_airports"));
        }
        if self.directory_capacity == 0 {
            return Err(ConfigError::ZeroCapacity("directory_capacity"));
        }
        if self.wallet_capacity == 0 {
            return Err(ConfigError::ZeroCapacity("wallet_capacity"));
        }
        Ok(())
    }
}
