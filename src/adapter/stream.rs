use super::{mismatch, DataShape, ShapeHooks};
use crate::error::NexusResult;
use serde_json::Value;

/// Real-time numeric readings
///
/// An array must hold only numbers. Text is scanned for numeric tokens
/// separated by whitespace or commas; anything else in it is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamShape;

fn readings(data: &Value) -> Option<Vec<f64>> {
    data.as_array()?.iter().map(Value::as_f64).collect()
}

impl ShapeHooks for StreamShape {
    fn shape(&self) -> DataShape {
        DataShape::Stream
    }

    fn parse(&self, data: Value) -> NexusResult<Value> {
        let values: Vec<f64> = match &data {
            Value::String(text) => text
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter_map(|token| token.parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .collect(),
            Value::Array(_) => {
                readings(&data).ok_or_else(|| mismatch(DataShape::Stream, "numbers", &data))?
            }
            other => return Err(mismatch(DataShape::Stream, "text or array", other)),
        };
        Ok(values.into_iter().map(Value::from).collect())
    }

    fn transform_notice(&self) -> &'static str {
        "Transform: Aggregated and filtered"
    }

    fn summarize(&self, data: &Value) -> NexusResult<String> {
        let values =
            readings(data).ok_or_else(|| mismatch(DataShape::Stream, "numeric readings", data))?;
        let avg = if values.is_empty() {
            0.0
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        };
        Ok(format!(
            "Stream summary: {} readings, avg: {:.1}°C",
            values.len(),
            avg
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::Adapter;
    use crate::pipeline::stages::standard_stages;
    use serde_json::json;

    #[test]
    fn test_text_readings() {
        let adapter = Adapter::stream("PIPE_001", standard_stages()).silent(true);
        let report = adapter
            .process(json!("21.5, 22.0 22.3 21.9 22.8"))
            .unwrap();
        assert_eq!(report.summary, "Stream summary: 5 readings, avg: 22.1°C");
    }

    #[test]
    fn test_descriptive_text_has_no_readings() {
        let parsed = StreamShape.parse(json!("Real-time sensor stream")).unwrap();
        assert_eq!(parsed, json!([]));
        assert_eq!(
            StreamShape.summarize(&parsed).unwrap(),
            "Stream summary: 0 readings, avg: 0.0°C"
        );
    }

    #[test]
    fn test_array_must_be_numeric() {
        assert!(StreamShape.parse(json!([1, "two", 3])).is_err());
        assert_eq!(StreamShape.parse(json!([1, 2])).unwrap(), json!([1.0, 2.0]));
    }

    #[test]
    fn test_object_is_rejected() {
        assert!(StreamShape.parse(json!({"value": 1})).is_err());
    }
}
