use crate::error::{NexusError, NexusResult};
use serde::Serialize;
use serde_json::{Map, Value};

/// Metrics produced by a single `analyze` call
///
/// An analysis maps metric names (`count`, `avg`, `level`, ...) to JSON values.
/// It is assembled once with [`Analysis::with`] and read-only afterwards.
///
/// # Example
/// ```
/// use nexus::processor::Analysis;
/// use serde_json::json;
///
/// let analysis = Analysis::new()
///     .with("count", json!(3))
///     .with("level", json!("ERROR"));
///
/// assert_eq!(analysis.get_u64("count").unwrap(), 3);
/// assert_eq!(analysis.get_str("level").unwrap(), "ERROR");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Analysis {
    metrics: Map<String, Value>,
}

impl Analysis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a metric while the analysis is being assembled
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metrics.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.metrics.get(key)
    }

    /// Get a metric or return an error if not found
    pub fn get_required(&self, key: &str) -> NexusResult<&Value> {
        self.metrics.get(key).ok_or_else(|| NexusError::AnalysisFailed {
            processor: "analysis".to_string(),
            reason: format!("metric not found: {}", key),
        })
    }

    pub fn get_str(&self, key: &str) -> NexusResult<&str> {
        match self.get_required(key)? {
            Value::String(s) => Ok(s),
            _ => Err(Self::wrong_type(key, "a string")),
        }
    }

    pub fn get_f64(&self, key: &str) -> NexusResult<f64> {
        self.get_required(key)?
            .as_f64()
            .ok_or_else(|| Self::wrong_type(key, "a number"))
    }

    pub fn get_u64(&self, key: &str) -> NexusResult<u64> {
        self.get_required(key)?
            .as_u64()
            .ok_or_else(|| Self::wrong_type(key, "an unsigned integer"))
    }

    /// Render a metric for human-readable output
    ///
    /// Strings are rendered without quotes, missing metrics as `null`.
    pub fn display(&self, key: &str) -> String {
        match self.metrics.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => Value::Null.to_string(),
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.metrics.contains_key(key)
    }

    pub fn keys(&self) -> Vec<&String> {
        self.metrics.keys().collect()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.metrics.clone())
    }

    fn wrong_type(key: &str, expected: &str) -> NexusError {
        NexusError::AnalysisFailed {
            processor: "analysis".to_string(),
            reason: format!("metric '{}' is not {}", key, expected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_analysis_creation() {
        let analysis = Analysis::new();
        assert!(analysis.is_empty());
        assert!(analysis.keys().is_empty());
    }

    #[test]
    fn test_typed_getters() {
        let analysis = Analysis::new()
            .with("count", json!(5))
            .with("avg", json!(3.0))
            .with("level", json!("INFO"));

        assert_eq!(analysis.get_u64("count").unwrap(), 5);
        assert_eq!(analysis.get_f64("avg").unwrap(), 3.0);
        assert_eq!(analysis.get_str("level").unwrap(), "INFO");
        assert_eq!(analysis.len(), 3);
    }

    #[test]
    fn test_missing_key() {
        let analysis = Analysis::new();
        assert!(analysis.get_required("missing").is_err());
        assert!(!analysis.has("missing"));
    }

    #[test]
    fn test_wrong_type() {
        let analysis = Analysis::new().with("level", json!("ERROR"));
        assert!(analysis.get_f64("level").is_err());
    }

    #[test]
    fn test_display_unquotes_strings() {
        let analysis = Analysis::new()
            .with("message", json!("Connection timeout"))
            .with("avg", json!(3.0));

        assert_eq!(analysis.display("message"), "Connection timeout");
        assert_eq!(analysis.display("avg"), "3.0");
        assert_eq!(analysis.display("absent"), "null");
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let analysis = Analysis::new().with("words", json!(3));
        assert_eq!(serde_json::to_value(&analysis).unwrap(), json!({"words": 3}));
        assert_eq!(analysis.to_value(), json!({"words": 3}));
    }
}
