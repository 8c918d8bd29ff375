use crate::error::NexusResult;
use crate::logger::LogLevel;
use crate::nexus_log;
use crate::pipeline::PipelineStage;
use serde_json::Value;

/// Stage marking input validation and parsing
///
/// Passes data through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputStage;

/// Stage marking transformation and enrichment
///
/// Passes data through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformStage;

/// Stage marking output formatting and delivery
///
/// Passes data through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputStage;

fn pass(stage: &str, data: Value) -> NexusResult<Value> {
    nexus_log!(LogLevel::Debug, "pipeline::stage", "{} stage passing through {}", stage, data);
    Ok(data)
}

impl PipelineStage for InputStage {
    fn execute(&self, data: Value) -> NexusResult<Value> {
        pass(self.name(), data)
    }

    fn name(&self) -> &str {
        "Input"
    }
}

impl PipelineStage for TransformStage {
    fn execute(&self, data: Value) -> NexusResult<Value> {
        pass(self.name(), data)
    }

    fn name(&self) -> &str {
        "Transform"
    }
}

impl PipelineStage for OutputStage {
    fn execute(&self, data: Value) -> NexusResult<Value> {
        pass(self.name(), data)
    }

    fn name(&self) -> &str {
        "Output"
    }
}
