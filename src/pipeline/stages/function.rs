use crate::error::NexusResult;
use crate::pipeline::PipelineStage;
use serde_json::Value;

type StageFn = dyn Fn(Value) -> NexusResult<Value> + Send + Sync;

/// Stage backed by a closure
///
/// # Example
/// ```
/// use nexus::pipeline::{stages::FnStage, Pipeline};
/// use serde_json::{json, Value};
///
/// let pipeline = Pipeline::builder("double")
///     .add_stage(FnStage::new("Double", |data: Value| {
///         Ok(json!(data.as_i64().unwrap_or(0) * 2))
///     }))
///     .build();
///
/// assert_eq!(pipeline.process(json!(21)).unwrap(), json!(42));
/// ```
pub struct FnStage {
    name: String,
    func: Box<StageFn>,
}

impl FnStage {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(Value) -> NexusResult<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Box::new(func),
        }
    }
}

impl PipelineStage for FnStage {
    fn execute(&self, data: Value) -> NexusResult<Value> {
        (self.func)(data)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NexusError;
    use serde_json::json;

    #[test]
    fn test_fn_stage_applies_closure() {
        let stage = FnStage::new("Wrap", |data| Ok(json!({ "wrapped": data })));
        assert_eq!(stage.name(), "Wrap");
        assert_eq!(stage.execute(json!(1)).unwrap(), json!({"wrapped": 1}));
    }

    #[test]
    fn test_fn_stage_propagates_error() {
        let stage = FnStage::new("Reject", |_| {
            Err(NexusError::StageFailed {
                stage: "Reject".to_string(),
                reason: "always".to_string(),
            })
        });
        assert!(stage.execute(json!(null)).is_err());
    }
}
