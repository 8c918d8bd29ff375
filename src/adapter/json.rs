use super::{mismatch, DataShape, ShapeHooks};
use crate::error::NexusResult;
use crate::stream::filter::NORMAL_TEMP_RANGE;
use serde_json::Value;

/// Structured sensor records
///
/// Accepts an object, or a string holding one. The folded object must carry
/// a numeric `value`; `sensor` and `unit` are optional.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonShape;

impl ShapeHooks for JsonShape {
    fn shape(&self) -> DataShape {
        DataShape::Json
    }

    fn parse(&self, data: Value) -> NexusResult<Value> {
        let parsed = match data {
            Value::String(text) => serde_json::from_str(&text)?,
            other => other,
        };
        match parsed {
            Value::Object(_) => Ok(parsed),
            other => Err(mismatch(DataShape::Json, "object", &other)),
        }
    }

    fn transform_notice(&self) -> &'static str {
        "Transform: Enriched with metadata and validation"
    }

    fn summarize(&self, data: &Value) -> NexusResult<String> {
        let value = data
            .get("value")
            .and_then(Value::as_f64)
            .ok_or_else(|| mismatch(DataShape::Json, "object with numeric value", data))?;
        let sensor = data.get("sensor").and_then(Value::as_str).unwrap_or("unknown");

        if sensor == "temp" {
            let (low, high) = NORMAL_TEMP_RANGE;
            let band = if (low..=high).contains(&value) {
                "Normal range"
            } else {
                "Out of range"
            };
            return Ok(format!(
                "Processed temperature reading: {}°C ({})",
                value, band
            ));
        }

        let unit = data.get("unit").and_then(Value::as_str).unwrap_or("");
        Ok(format!("Processed {} reading: {}{}", sensor, value, unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::Adapter;
    use crate::error::NexusError;
    use crate::pipeline::stages::standard_stages;
    use serde_json::json;

    fn adapter() -> Adapter {
        Adapter::json("PIPE_001", standard_stages()).silent(true)
    }

    #[test]
    fn test_temperature_in_range() {
        let report = adapter()
            .process(json!({"sensor": "temp", "value": 23.5, "unit": "C"}))
            .unwrap();
        assert_eq!(
            report.summary,
            "Processed temperature reading: 23.5°C (Normal range)"
        );
    }

    #[test]
    fn test_temperature_bounds_are_inclusive() {
        let at_low = JsonShape
            .summarize(&json!({"sensor": "temp", "value": 10.0}))
            .unwrap();
        let above = JsonShape
            .summarize(&json!({"sensor": "temp", "value": 30.5}))
            .unwrap();

        assert!(at_low.ends_with("(Normal range)"));
        assert_eq!(above, "Processed temperature reading: 30.5°C (Out of range)");
    }

    #[test]
    fn test_other_sensor_uses_unit() {
        let summary = JsonShape
            .summarize(&json!({"sensor": "humidity", "value": 65, "unit": "%"}))
            .unwrap();
        assert_eq!(summary, "Processed humidity reading: 65%");
    }

    #[test]
    fn test_string_input_is_parsed() {
        let report = adapter()
            .process(json!(r#"{"sensor": "temp", "value": 5}"#))
            .unwrap();
        assert_eq!(report.output["sensor"], "temp");
        assert_eq!(report.summary, "Processed temperature reading: 5°C (Out of range)");
    }

    #[test]
    fn test_invalid_json_text_fails() {
        let err = adapter().process(json!("{not json")).unwrap_err();
        assert!(matches!(err, NexusError::Json(_)));
    }

    #[test]
    fn test_missing_value_is_mismatch() {
        let err = adapter().process(json!({"sensor": "temp"})).unwrap_err();
        assert!(matches!(err, NexusError::ShapeMismatch { .. }));
    }
}
