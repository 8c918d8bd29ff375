//! Pipeline pattern implementation for sequential data transformations
//!
//! A pipeline is an ordered list of stages folded left to right: each stage's
//! output is the next stage's input, and an empty pipeline returns its input
//! unchanged. The executor handles error propagation, timing and logging.
//!
//! # Example
//! ```
//! use nexus::error::NexusResult;
//! use nexus::pipeline::{Pipeline, PipelineStage};
//! use serde_json::{json, Value};
//!
//! // Define a custom stage
//! struct Uppercase;
//!
//! impl PipelineStage for Uppercase {
//!     fn execute(&self, data: Value) -> NexusResult<Value> {
//!         Ok(match data {
//!             Value::String(s) => Value::String(s.to_uppercase()),
//!             other => other,
//!         })
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Uppercase"
//!     }
//! }
//!
//! // Build and execute pipeline
//! let pipeline = Pipeline::builder("my-pipeline")
//!     .add_stage(Uppercase)
//!     .build();
//!
//! assert_eq!(pipeline.process(json!("hello")).unwrap(), json!("HELLO"));
//! ```

pub mod core;
pub mod executor;
pub mod stage_list;
pub mod stages;

// Re-export main types
pub use self::core::{PipelineResult, PipelineStage, StageResult};
pub use executor::{Pipeline, PipelineBuilder};
pub use stage_list::StageList;
