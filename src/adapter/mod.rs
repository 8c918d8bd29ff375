//! Shape-specific pipelines
//!
//! An [`Adapter`] is a [`Pipeline`] bound to one data shape. It parses the
//! input on entry, always runs the generic stage fold, then summarizes the
//! folded value the way its shape dictates. The shape-specific parts sit
//! behind [`ShapeHooks`].
//!
//! # Example
//! ```
//! use nexus::adapter::Adapter;
//! use nexus::pipeline::stages::standard_stages;
//! use serde_json::json;
//!
//! let template = standard_stages();
//! let adapter = Adapter::json("PIPE_001", template.share()).silent(true);
//!
//! let report = adapter
//!     .process(json!({"sensor": "temp", "value": 23.5, "unit": "C"}))
//!     .unwrap();
//! assert_eq!(report.summary, "Processed temperature reading: 23.5°C (Normal range)");
//! ```

pub mod csv;
pub mod json;
pub mod stream;

pub use csv::CsvShape;
pub use json::JsonShape;
pub use stream::StreamShape;

use crate::error::{NexusError, NexusResult};
use crate::logger::{LogLevel, Notifier};
use crate::nexus_log;
use crate::pipeline::{Pipeline, StageList};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Data shapes an adapter can accept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataShape {
    Json,
    Csv,
    Stream,
}

impl DataShape {
    pub fn label(&self) -> &'static str {
        match self {
            DataShape::Json => "JSON",
            DataShape::Csv => "CSV",
            DataShape::Stream => "Stream",
        }
    }
}

impl fmt::Display for DataShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Entry and exit behaviour for one data shape
pub trait ShapeHooks: Send + Sync {
    fn shape(&self) -> DataShape;

    /// Turn raw input into the value handed to the first stage
    fn parse(&self, data: Value) -> NexusResult<Value>;

    /// Notice describing what the shape did to the data
    fn transform_notice(&self) -> &'static str;

    /// Describe the value produced by the last stage
    fn summarize(&self, data: &Value) -> NexusResult<String>;
}

/// Outcome of one adapter run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterReport {
    pub pipeline_id: String,
    pub shape: DataShape,
    pub output: Value,
    pub summary: String,
}

/// A pipeline bound to one data shape
pub struct Adapter {
    pipeline_id: String,
    pipeline: Pipeline,
    hooks: Box<dyn ShapeHooks>,
    notifier: Notifier,
}

impl Adapter {
    /// Create an adapter running `stages`
    ///
    /// Pass `template.share()` to follow a template's stages, or
    /// `template.detach()` to take a private copy.
    pub fn new<H: ShapeHooks + 'static>(
        pipeline_id: impl Into<String>,
        hooks: H,
        stages: StageList,
    ) -> Self {
        let pipeline_id = pipeline_id.into();
        Self {
            pipeline: Pipeline::with_stages(pipeline_id.clone(), stages),
            pipeline_id,
            hooks: Box::new(hooks),
            notifier: Notifier::new(false),
        }
    }

    pub fn json(pipeline_id: impl Into<String>, stages: StageList) -> Self {
        Self::new(pipeline_id, JsonShape, stages)
    }

    pub fn csv(pipeline_id: impl Into<String>, stages: StageList) -> Self {
        Self::new(pipeline_id, CsvShape, stages)
    }

    pub fn stream(pipeline_id: impl Into<String>, stages: StageList) -> Self {
        Self::new(pipeline_id, StreamShape, stages)
    }

    /// Suppress progress notices
    pub fn silent(mut self, silent: bool) -> Self {
        self.notifier = Notifier::new(silent);
        self
    }

    pub fn pipeline_id(&self) -> &str {
        &self.pipeline_id
    }

    pub fn shape(&self) -> DataShape {
        self.hooks.shape()
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn stages(&self) -> &StageList {
        self.pipeline.stages()
    }

    /// Parse, fold through every stage, then summarize
    pub fn process(&self, data: Value) -> NexusResult<AdapterReport> {
        let shape = self.hooks.shape();
        self.notifier
            .notice(&format!("Processing {} data through pipeline...", shape));
        self.notifier.notice(&match &data {
            Value::String(s) => format!("Input: \"{}\"", s),
            other => format!("Input: {}", other),
        });

        let parsed = self.hooks.parse(data).map_err(|e| {
            nexus_log!(LogLevel::Warn, "adapter", "[{}] {}", self.pipeline_id, e);
            e
        })?;
        let output = self.pipeline.process(parsed)?;

        self.notifier.notice(self.hooks.transform_notice());
        let summary = self.hooks.summarize(&output)?;
        self.notifier.notice(&format!("Output: {}", summary));

        Ok(AdapterReport {
            pipeline_id: self.pipeline_id.clone(),
            shape,
            output,
            summary,
        })
    }
}

impl fmt::Debug for Adapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter")
            .field("pipeline_id", &self.pipeline_id)
            .field("shape", &self.hooks.shape())
            .field("pipeline", &self.pipeline)
            .finish()
    }
}

/// JSON type name used in shape mismatch reports
pub(crate) fn kind_of(data: &Value) -> &'static str {
    match data {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn mismatch(shape: DataShape, expected: &str, found: &Value) -> NexusError {
    NexusError::ShapeMismatch {
        adapter: shape.label().to_string(),
        expected: expected.to_string(),
        found: kind_of(found).to_string(),
    }
}
