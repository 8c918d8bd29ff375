use super::{DataProcessor, ProcessorConfig};

/// Base processor: accepts any input and echoes it back
pub struct PassthroughProcessor {
    config: ProcessorConfig,
}

impl PassthroughProcessor {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(ProcessorConfig::new(name))
    }

    pub fn with_config(config: ProcessorConfig) -> Self {
        Self {
            config: config.announce(),
        }
    }
}

impl Default for PassthroughProcessor {
    fn default() -> Self {
        Self::new("Data Processor")
    }
}

impl DataProcessor for PassthroughProcessor {
    fn config(&self) -> &ProcessorConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::ProcessorExt;
    use serde_json::json;

    fn quiet() -> PassthroughProcessor {
        PassthroughProcessor::with_config(ProcessorConfig::new("Base").silent(true))
    }

    #[test]
    fn test_accepts_everything() {
        let processor = quiet();
        assert!(processor.validate(&json!(null)));
        assert!(processor.validate(&json!({"nested": [1, 2]})));
    }

    #[test]
    fn test_identity_output() {
        let processor = quiet();
        assert_eq!(processor.process(&json!("raw")), "Output: raw");
        assert_eq!(processor.process(&json!([1, 2])), "Output: [1,2]");
    }

    #[test]
    fn test_default_name() {
        assert_eq!(PassthroughProcessor::default().name(), "Data Processor");
    }
}
