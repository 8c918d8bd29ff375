use super::{Analysis, DataProcessor, ProcessorConfig};
use crate::error::{NexusError, NexusResult};
use serde_json::{json, Value};

/// Processor for sequences of numbers
///
/// Reports `count`, `sum` and `avg`. The sum stays an integer while every input
/// is an integer; the average is always a float. An empty sequence is valid and
/// yields `count = 0`, `sum = 0`, `avg = 0.0`. A sum beyond the `f64` range
/// is an analysis failure.
pub struct NumericProcessor {
    config: ProcessorConfig,
}

impl NumericProcessor {
    pub fn new() -> Self {
        Self::with_config(ProcessorConfig::new("Numeric Processor"))
    }

    /// Create a processor that emits no progress notices
    pub fn silent() -> Self {
        Self::with_config(ProcessorConfig::new("Numeric Processor").silent(true))
    }

    pub fn with_config(config: ProcessorConfig) -> Self {
        Self {
            config: config.announce(),
        }
    }
}

impl Default for NumericProcessor {
    fn default() -> Self {
        Self::new()
    }
}

enum Sum {
    Exact(i64),
    Float(f64),
}

/// Sum integers exactly, falling back to floats for fractions or overflow
fn sum(values: &[Value]) -> Sum {
    let exact = values
        .iter()
        .try_fold(0i64, |acc, v| v.as_i64().and_then(|n| acc.checked_add(n)));
    match exact {
        Some(total) => Sum::Exact(total),
        None => Sum::Float(values.iter().filter_map(Value::as_f64).sum()),
    }
}

impl DataProcessor for NumericProcessor {
    fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    fn validate(&self, data: &Value) -> bool {
        matches!(data, Value::Array(items) if items.iter().all(Value::is_number))
    }

    fn verified_label(&self) -> Option<&str> {
        Some("Numeric data")
    }

    fn analyze(&self, data: &Value) -> NexusResult<Analysis> {
        let values = data.as_array().map(Vec::as_slice).unwrap_or(&[]);
        let count = values.len();
        let (total, raw) = match sum(values) {
            Sum::Exact(n) => (json!(n), n as f64),
            Sum::Float(f) if f.is_finite() => (json!(f), f),
            Sum::Float(f) => {
                return Err(NexusError::AnalysisFailed {
                    processor: self.name().to_string(),
                    reason: format!("sum of {} values is not finite ({})", count, f),
                })
            }
        };
        let avg = if count == 0 { 0.0 } else { raw / count as f64 };

        Ok(Analysis::new()
            .with("count", json!(count))
            .with("sum", total)
            .with("avg", json!(avg)))
    }

    fn format(&self, result: &Analysis) -> String {
        format!(
            "Output: Processed {} numeric values, sum={}, avg={}",
            result.display("count"),
            result.display("sum"),
            result.display("avg")
        )
    }
}
