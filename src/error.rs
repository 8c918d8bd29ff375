use thiserror::Error;

/// Central error type for the Nexus processing framework
#[derive(Error, Debug)]
pub enum NexusError {
    // ============================================================================
    // Processor Errors
    // ============================================================================
    #[error("Validation failed for {processor}: {reason}")]
    ValidationFailed { processor: String, reason: String },

    #[error("Analysis failed for {processor}: {reason}")]
    AnalysisFailed { processor: String, reason: String },

    #[error("Unknown processor kind: {0}")]
    UnknownProcessor(String),

    // ============================================================================
    // Stream Errors
    // ============================================================================
    #[error("Malformed item #{index} in batch for stream {stream_id}: {item:?}")]
    MalformedBatchItem {
        stream_id: String,
        index: usize,
        item: String,
    },

    #[error("Unknown stream kind: {0}")]
    UnknownStream(String),

    #[error("Stream not registered: {0}")]
    StreamNotFound(String),

    #[error("Net flow for stream {stream_id} exceeds the 64-bit range")]
    NetFlowOverflow { stream_id: String },

    // ============================================================================
    // Pipeline / Adapter Errors
    // ============================================================================
    #[error("Stage '{stage}' failed: {reason}")]
    StageFailed { stage: String, reason: String },

    #[error("Pipeline '{pipeline}' failed at stage '{stage}': {reason}")]
    PipelineFailed {
        pipeline: String,
        stage: String,
        reason: String,
    },

    #[error("{adapter} adapter expects {expected} input, got {found}")]
    ShapeMismatch {
        adapter: String,
        expected: String,
        found: String,
    },

    // ============================================================================
    // Generic/System Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Builder pattern validation error
    #[error("Builder error: {0}")]
    BuilderError(String),
}

// Implement conversion to String for callers that only report failures
impl From<NexusError> for String {
    fn from(error: NexusError) -> Self {
        error.to_string()
    }
}

// Helper type alias for Results
pub type NexusResult<T> = Result<T, NexusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NexusError::StageFailed {
            stage: "Transform".to_string(),
            reason: "bad input".to_string(),
        };
        assert_eq!(err.to_string(), "Stage 'Transform' failed: bad input");
    }

    #[test]
    fn test_error_conversion_to_string() {
        let err = NexusError::UnknownStream("radar".to_string());
        let s: String = err.into();
        assert_eq!(s, "Unknown stream kind: radar");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let nexus_err: NexusError = json_err.into();
        assert!(matches!(nexus_err, NexusError::Json(_)));
    }

    #[test]
    fn test_malformed_item_display() {
        let err = NexusError::MalformedBatchItem {
            stream_id: "SENSOR_001".to_string(),
            index: 2,
            item: "temp".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("SENSOR_001"));
        assert!(message.contains("#2"));
        assert!(message.contains("\"temp\""));
    }
}
