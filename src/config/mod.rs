//! Runtime configuration
//!
//! Configuration is plain JSON. Every field has a default, so `{}` is a valid
//! configuration.

pub mod builder;

pub use builder::NexusConfigBuilder;

use crate::error::{NexusError, NexusResult};
use crate::logger::{LogLevel, Logger};
use crate::stream::{MalformedItemPolicy, PriorityRules, StreamKind, StreamSettings};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Nexus configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NexusConfig {
    /// Suppress progress notices from streams created by the registry and
    /// from processors created through [`ProcessorFactory::create_from_config`]
    ///
    /// [`ProcessorFactory::create_from_config`]: crate::processor::ProcessorFactory::create_from_config
    pub silent: bool,

    /// Handling of unparseable batch items
    pub malformed_items: MalformedItemPolicy,

    /// Minimum level kept in the in-memory log
    pub log_level: LogLevel,

    /// Streams to register, in dispatch order
    pub streams: Vec<StreamSpec>,

    /// Thresholds for high-priority filtering
    pub priority: PriorityRules,
}

/// A stream to create at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSpec {
    pub kind: StreamKind,
    pub stream_id: String,
}

impl StreamSpec {
    pub fn new(kind: StreamKind, stream_id: impl Into<String>) -> Self {
        Self {
            kind,
            stream_id: stream_id.into(),
        }
    }
}

impl NexusConfig {
    pub fn builder() -> NexusConfigBuilder {
        NexusConfigBuilder::new()
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> NexusResult<Self> {
        let config: NexusConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> NexusResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> NexusResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that stream ids are non-empty and unique, and that the normal
    /// temperature band is not inverted
    pub fn validate(&self) -> NexusResult<()> {
        let (low, high) = self.priority.normal_temp_range;
        if low.is_nan() || high.is_nan() || low > high {
            return Err(NexusError::ConfigError(format!(
                "normal_temp_range is inverted: ({}, {})",
                low, high
            )));
        }

        let mut seen = std::collections::HashSet::new();
        for spec in &self.streams {
            if spec.stream_id.trim().is_empty() {
                return Err(NexusError::ConfigError(format!(
                    "{:?} stream has an empty stream_id",
                    spec.kind
                )));
            }
            if !seen.insert(spec.stream_id.as_str()) {
                return Err(NexusError::ConfigError(format!(
                    "duplicate stream_id: {}",
                    spec.stream_id
                )));
            }
        }
        Ok(())
    }

    /// Settings handed to every stream created from this configuration
    pub fn stream_settings(&self) -> StreamSettings {
        StreamSettings {
            silent: self.silent,
            malformed_items: self.malformed_items,
        }
    }

    /// Apply the configured log level to a logger
    pub fn apply_logging(&self, logger: &Logger) {
        logger.set_min_level(self.log_level);
    }
}
