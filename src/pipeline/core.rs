use crate::error::{NexusError, NexusResult};
use serde_json::Value;
use std::time::Duration;
use uuid::Uuid;

/// A single stage in a pipeline
///
/// Each stage receives the previous stage's output and returns the input for the
/// next one. Stages hold no per-run state; one stage value may be referenced by
/// several pipelines.
///
/// # Example
/// ```
/// use nexus::error::NexusResult;
/// use nexus::pipeline::PipelineStage;
/// use serde_json::Value;
///
/// struct Uppercase;
///
/// impl PipelineStage for Uppercase {
///     fn execute(&self, data: Value) -> NexusResult<Value> {
///         Ok(match data {
///             Value::String(s) => Value::String(s.to_uppercase()),
///             other => other,
///         })
///     }
///
///     fn name(&self) -> &str {
///         "Uppercase"
///     }
/// }
/// ```
pub trait PipelineStage: Send + Sync {
    /// Execute this stage
    ///
    /// An error stops the pipeline; later stages do not run.
    fn execute(&self, data: Value) -> NexusResult<Value>;

    /// Get stage name for logging and reports
    fn name(&self) -> &str;
}

/// Result of a pipeline stage execution
#[derive(Debug, Clone)]
pub struct StageResult {
    /// Stage name
    pub stage_name: String,

    /// Whether the stage succeeded
    pub success: bool,

    /// Error message if failed
    pub error: Option<String>,

    /// Duration of execution
    pub duration: Duration,
}

impl StageResult {
    /// Create a successful stage result
    pub fn success(stage_name: impl Into<String>, duration: Duration) -> Self {
        Self {
            stage_name: stage_name.into(),
            success: true,
            error: None,
            duration,
        }
    }

    /// Create a failed stage result
    pub fn failure(
        stage_name: impl Into<String>,
        error: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            stage_name: stage_name.into(),
            success: false,
            error: Some(error.into()),
            duration,
        }
    }
}

/// Result of a complete pipeline execution
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Pipeline name
    pub pipeline_name: String,

    /// Identifier of this run, used to correlate log lines and events
    pub run_id: Uuid,

    /// Whether the pipeline succeeded
    pub success: bool,

    /// Results from each stage that ran, in execution order
    pub stage_results: Vec<StageResult>,

    /// Total duration
    pub total_duration: Duration,

    /// Error message if failed
    pub error: Option<String>,

    /// Output of the last stage (the input itself for an empty pipeline)
    pub output: Option<Value>,
}

impl PipelineResult {
    /// Create a successful pipeline result
    pub fn success(
        pipeline_name: impl Into<String>,
        run_id: Uuid,
        stage_results: Vec<StageResult>,
        total_duration: Duration,
        output: Value,
    ) -> Self {
        Self {
            pipeline_name: pipeline_name.into(),
            run_id,
            success: true,
            stage_results,
            total_duration,
            error: None,
            output: Some(output),
        }
    }

    /// Create a failed pipeline result
    pub fn failure(
        pipeline_name: impl Into<String>,
        run_id: Uuid,
        stage_results: Vec<StageResult>,
        error: impl Into<String>,
        total_duration: Duration,
    ) -> Self {
        Self {
            pipeline_name: pipeline_name.into(),
            run_id,
            success: false,
            stage_results,
            total_duration,
            error: Some(error.into()),
            output: None,
        }
    }

    /// Get the number of stages that ran
    pub fn executed_stages(&self) -> usize {
        self.stage_results.len()
    }

    /// Get the stage that failed (if any)
    pub fn failed_stage(&self) -> Option<&StageResult> {
        self.stage_results.iter().find(|r| !r.success)
    }

    /// Turn the report into the final value, or the error that stopped the run
    pub fn into_output(self) -> NexusResult<Value> {
        let PipelineResult {
            pipeline_name,
            success,
            stage_results,
            error,
            output,
            ..
        } = self;

        match (success, output) {
            (true, Some(output)) => Ok(output),
            _ => Err(NexusError::PipelineFailed {
                pipeline: pipeline_name,
                stage: stage_results
                    .into_iter()
                    .find(|r| !r.success)
                    .map(|r| r.stage_name)
                    .unwrap_or_default(),
                reason: error.unwrap_or_else(|| "no output".to_string()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stage_result_success() {
        let result = StageResult::success("Test Stage", Duration::from_secs(1));
        assert!(result.success);
        assert!(result.error.is_none());
        assert_eq!(result.stage_name, "Test Stage");
    }

    #[test]
    fn test_stage_result_failure() {
        let result =
            StageResult::failure("Test Stage", "Something went wrong", Duration::from_secs(1));
        assert!(!result.success);
        assert_eq!(result.error, Some("Something went wrong".to_string()));
    }

    #[test]
    fn test_pipeline_result_success() {
        let stage_results = vec![
            StageResult::success("Stage 1", Duration::from_secs(1)),
            StageResult::success("Stage 2", Duration::from_secs(2)),
        ];
        let result = PipelineResult::success(
            "Test Pipeline",
            Uuid::new_v4(),
            stage_results,
            Duration::from_secs(3),
            json!("done"),
        );

        assert!(result.success);
        assert!(result.error.is_none());
        assert_eq!(result.executed_stages(), 2);
        assert!(result.failed_stage().is_none());
        assert_eq!(result.into_output().unwrap(), json!("done"));
    }

    #[test]
    fn test_pipeline_result_failure() {
        let stage_results = vec![
            StageResult::success("Stage 1", Duration::from_secs(1)),
            StageResult::failure("Stage 2", "Failed", Duration::from_secs(1)),
        ];
        let result = PipelineResult::failure(
            "Test Pipeline",
            Uuid::new_v4(),
            stage_results,
            "Pipeline failed at Stage 2",
            Duration::from_secs(2),
        );

        assert!(!result.success);
        assert!(result.output.is_none());
        assert_eq!(result.failed_stage().unwrap().stage_name, "Stage 2");

        match result.into_output() {
            Err(NexusError::PipelineFailed { pipeline, stage, .. }) => {
                assert_eq!(pipeline, "Test Pipeline");
                assert_eq!(stage, "Stage 2");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
