use super::{NexusConfig, StreamSpec};
use crate::error::{NexusError, NexusResult};
use crate::logger::LogLevel;
use crate::stream::{MalformedItemPolicy, PriorityRules, StreamKind};

/// Builder for constructing NexusConfig instances with a fluent API
///
/// # Example
/// ```
/// use nexus::config::NexusConfigBuilder;
/// use nexus::stream::{MalformedItemPolicy, StreamKind};
///
/// let config = NexusConfigBuilder::new()
///     .silent(true)
///     .malformed_items(MalformedItemPolicy::FailFast)
///     .stream(StreamKind::Sensor, "SENSOR_001")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct NexusConfigBuilder {
    silent: bool,
    malformed_items: Option<MalformedItemPolicy>,
    log_level: Option<LogLevel>,
    streams: Vec<StreamSpec>,
    priority: Option<PriorityRules>,
}

impl NexusConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether progress notices are suppressed
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Set the malformed batch item policy
    pub fn malformed_items(mut self, policy: MalformedItemPolicy) -> Self {
        self.malformed_items = Some(policy);
        self
    }

    /// Set the minimum in-memory log level
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Set the log level by name
    pub fn log_level_name(mut self, name: &str) -> NexusResult<Self> {
        let level = LogLevel::parse(name)
            .ok_or_else(|| NexusError::BuilderError(format!("Unknown log level: {}", name)))?;
        self.log_level = Some(level);
        Ok(self)
    }

    /// Append a stream to register
    pub fn stream(mut self, kind: StreamKind, stream_id: impl Into<String>) -> Self {
        self.streams.push(StreamSpec::new(kind, stream_id));
        self
    }

    /// Set the high-priority filter thresholds
    pub fn priority(mut self, rules: PriorityRules) -> Self {
        self.priority = Some(rules);
        self
    }

    /// Build the NexusConfig instance
    ///
    /// # Errors
    /// Returns `NexusError::BuilderError` if a stream id is empty or repeated,
    /// or if the normal temperature band is inverted
    pub fn build(self) -> NexusResult<NexusConfig> {
        let config = NexusConfig {
            silent: self.silent,
            malformed_items: self.malformed_items.unwrap_or_default(),
            log_level: self.log_level.unwrap_or_default(),
            streams: self.streams,
            priority: self.priority.unwrap_or_default(),
        };

        config.validate().map_err(|e| match e {
            NexusError::ConfigError(msg) => NexusError::BuilderError(msg),
            other => other,
        })?;

        Ok(config)
    }
}
