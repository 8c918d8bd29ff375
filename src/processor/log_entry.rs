use super::{Analysis, DataProcessor, ProcessorConfig};
use crate::error::{NexusError, NexusResult};
use serde_json::{json, Value};

/// Processor for `LEVEL: message` log lines
///
/// The line is split on its first colon. `ERROR` entries are tagged `ALERT`,
/// everything else `INFO`.
pub struct LogProcessor {
    config: ProcessorConfig,
}

impl LogProcessor {
    pub fn new() -> Self {
        Self::with_config(ProcessorConfig::new("Log Processor"))
    }

    /// Create a processor that emits no progress notices
    pub fn silent() -> Self {
        Self::with_config(ProcessorConfig::new("Log Processor").silent(true))
    }

    pub fn with_config(config: ProcessorConfig) -> Self {
        Self {
            config: config.announce(),
        }
    }
}

impl Default for LogProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl DataProcessor for LogProcessor {
    fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    fn validate(&self, data: &Value) -> bool {
        data.as_str().is_some_and(|line| line.contains(':'))
    }

    fn verified_label(&self) -> Option<&str> {
        Some("Log entry")
    }

    fn analyze(&self, data: &Value) -> NexusResult<Analysis> {
        let (level, message) = data
            .as_str()
            .and_then(|line| line.split_once(':'))
            .ok_or_else(|| NexusError::AnalysisFailed {
                processor: self.name().to_string(),
                reason: "log line has no level separator".to_string(),
            })?;

        Ok(Analysis::new()
            .with("level", json!(level.trim().to_uppercase()))
            .with("message", json!(message.trim())))
    }

    fn format(&self, result: &Analysis) -> String {
        let level = result.display("level");
        let tag = if level == "ERROR" { "ALERT" } else { "INFO" };
        format!(
            "Output: [{}] {} level detected: {}",
            tag,
            level,
            result.display("message")
        )
    }
}
