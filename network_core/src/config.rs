//! Configuration for a full network run.
//!
//! Every field has a default, so a TOML document only needs the values it changes:
//!
//! ```toml
//! [scan]
//! radius = 15
//!
//! [cleaning]
//! noise_threshold = 3
//! clean_singletons = true
//! ```

use serde::{Deserialize, Serialize};

use crate::construction::ScanConfig;
use crate::error::NetworkResult;
use crate::matrix::CleaningConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub scan: ScanConfig,
    pub cleaning: CleaningConfig,
}

impl NetworkConfig {
    /// Parse and validate a config from TOML.
    pub fn from_toml_str(source: &str) -> NetworkResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> NetworkResult<()> {
        self.scan.validate()
    }
}
