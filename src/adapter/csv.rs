use super::{mismatch, DataShape, ShapeHooks};
use crate::error::NexusResult;
use serde_json::Value;

/// Comma-separated activity records
///
/// Text is split into rows of trimmed fields; blank lines are dropped. Input
/// that is already a list of rows passes through.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvShape;

fn parse_rows(text: &str) -> Value {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.split(',')
                .map(|field| Value::String(field.trim().to_string()))
                .collect::<Vec<_>>()
        })
        .map(Value::Array)
        .collect()
}

fn is_row(row: &Value) -> bool {
    row.as_array()
        .map(|fields| fields.iter().all(Value::is_string))
        .unwrap_or(false)
}

impl ShapeHooks for CsvShape {
    fn shape(&self) -> DataShape {
        DataShape::Csv
    }

    fn parse(&self, data: Value) -> NexusResult<Value> {
        match data {
            Value::String(text) => Ok(parse_rows(&text)),
            Value::Array(rows) if rows.iter().all(is_row) => Ok(Value::Array(rows)),
            other => Err(mismatch(DataShape::Csv, "text", &other)),
        }
    }

    fn transform_notice(&self) -> &'static str {
        "Transform: Parsed and structured data"
    }

    fn summarize(&self, data: &Value) -> NexusResult<String> {
        let rows = data
            .as_array()
            .ok_or_else(|| mismatch(DataShape::Csv, "rows", data))?;
        Ok(format!("User activity logged: {} actions processed", rows.len()))
    }
}
