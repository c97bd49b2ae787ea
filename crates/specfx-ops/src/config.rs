//! Pipeline configuration files.
//!
//! A pipeline is described by a filter and, optionally, engine settings:
//!
//! ```yaml
//! filter:
//!   type: butterworth_notch_reject   # or ideal_low_pass
//!   cutoff: 2.0
//!   order: 2
//!   notches:
//!     - [0.0, 10.0]
//! engine:
//!   length_policy: any               # or power_of_two
//!   parallel: true
//! ```
//!
//! Documents are validated on load; out-of-range parameters are reported as
//! [`OpsError::InvalidConfig`].

use crate::fft::EngineOptions;
use crate::filter::FilterConfig;
use crate::{OpsError, OpsResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Filter plus engine settings for one pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Frequency-domain filter.
    pub filter: FilterConfig,
    /// Transform engine settings.
    #[serde(default)]
    pub engine: EngineOptions,
}

impl PipelineConfig {
    /// Configuration with default engine settings.
    pub fn new(filter: FilterConfig) -> Self {
        Self {
            filter,
            engine: EngineOptions::default(),
        }
    }

    /// Replaces the engine settings.
    pub fn with_engine(mut self, engine: EngineOptions) -> Self {
        self.engine = engine;
        self
    }

    /// Checks every parameter.
    pub fn validate(&self) -> OpsResult<()> {
        self.filter.validate()
    }

    /// Parses and validates a YAML document.
    pub fn from_yaml_str(text: &str) -> OpsResult<Self> {
        let config: Self = serde_yaml::from_str(text).map_err(|e| OpsError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> OpsResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text)
            .map_err(|e| match e {
                OpsError::Config(msg) => OpsError::Config(format!("{}: {msg}", path.display())),
                other => other,
            })?;
        debug!(path = %path.display(), filter = config.filter.name(), "Loaded pipeline config");
        Ok(config)
    }

    /// Serializes to YAML.
    pub fn to_yaml_string(&self) -> OpsResult<String> {
        serde_yaml::to_string(self).map_err(|e| OpsError::Config(e.to_string()))
    }
}
