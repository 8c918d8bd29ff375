use super::core::{PipelineResult, PipelineStage, StageResult};
use super::stage_list::StageList;
use crate::error::NexusResult;
use crate::events::{event_names, EventEmitter, EventSink};
use crate::logger::LogLevel;
use crate::nexus_log;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Pipeline executor that runs stages sequentially
///
/// # Example
/// ```
/// use nexus::pipeline::{stages::{InputStage, OutputStage}, Pipeline};
/// use serde_json::json;
///
/// let pipeline = Pipeline::builder("my-pipeline")
///     .add_stage(InputStage)
///     .add_stage(OutputStage)
///     .build();
///
/// let result = pipeline.execute(json!({"id": 7}));
/// assert!(result.success);
/// assert_eq!(result.output, Some(json!({"id": 7})));
/// ```
#[derive(Debug)]
pub struct Pipeline {
    name: String,
    stages: StageList,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder(name: impl Into<String>) -> PipelineBuilder {
        PipelineBuilder::new(name)
    }

    /// Create an empty pipeline
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_stages(name, StageList::new())
    }

    /// Create a pipeline over an existing stage list handle
    ///
    /// Pass `list.share()` to alias a template, `list.detach()` to copy it.
    pub fn with_stages(name: impl Into<String>, stages: StageList) -> Self {
        Self {
            name: name.into(),
            stages,
        }
    }

    /// Get the pipeline name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of stages
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// The stage list handle this pipeline runs
    pub fn stages(&self) -> &StageList {
        &self.stages
    }

    /// Append a stage
    ///
    /// No compatibility check is made against the previous stage. Every
    /// pipeline sharing this stage list sees the new stage.
    pub fn add_stage<S: PipelineStage + 'static>(&self, stage: S) {
        self.stages.push(Arc::new(stage));
    }

    /// Append a stage that may also be held elsewhere
    pub fn add_shared_stage(&self, stage: Arc<dyn PipelineStage>) {
        self.stages.push(stage);
    }

    /// Execute the pipeline without emitting events
    ///
    /// Stages run in registration order, each receiving the previous output.
    /// The first failing stage stops the run.
    pub fn execute(&self, data: Value) -> PipelineResult {
        self.execute_internal(data, None)
    }

    /// Execute the pipeline with event emission
    ///
    /// Same as `execute()` but reports progress to `sink`.
    pub fn execute_with_events(&self, data: Value, sink: &dyn EventSink) -> PipelineResult {
        self.execute_internal(data, Some(sink))
    }

    /// Fold the data through every stage and return the final value
    pub fn process(&self, data: Value) -> NexusResult<Value> {
        self.execute(data).into_output()
    }

    fn execute_internal(&self, data: Value, sink: Option<&dyn EventSink>) -> PipelineResult {
        let run_id = Uuid::new_v4();
        let stages = self.stages.snapshot();
        let total = stages.len();

        nexus_log!(
            LogLevel::Info,
            "pipeline",
            "Starting pipeline '{}' with {} stages (run: {})",
            self.name,
            total,
            run_id
        );
        if let Some(sink) = sink {
            sink_result(
                event_names::PIPELINE_STARTED,
                EventEmitter::pipeline_started(sink, run_id, &self.name, total),
            );
        }

        let pipeline_start = Instant::now();
        let mut stage_results = Vec::with_capacity(total);
        let mut current = data;

        for (index, stage) in stages.iter().enumerate() {
            let stage_name = stage.name();
            nexus_log!(
                LogLevel::Debug,
                "pipeline",
                "Executing stage {}/{}: {} (run: {})",
                index + 1,
                total,
                stage_name,
                run_id
            );

            let stage_start = Instant::now();
            let outcome = stage.execute(current);
            let duration = stage_start.elapsed();

            match outcome {
                Ok(next) => {
                    nexus_log!(
                        LogLevel::Debug,
                        "pipeline",
                        "Stage '{}' completed in {:.3}ms (run: {})",
                        stage_name,
                        duration.as_secs_f64() * 1000.0,
                        run_id
                    );
                    if let Some(sink) = sink {
                        sink_result(
                            event_names::PIPELINE_STAGE_COMPLETED,
                            EventEmitter::pipeline_stage_completed(
                                sink,
                                run_id,
                                &self.name,
                                stage_name,
                                index,
                                total,
                                duration.as_millis() as u64,
                            ),
                        );
                    }
                    stage_results.push(StageResult::success(stage_name, duration));
                    current = next;
                }
                Err(e) => {
                    let error_msg = e.to_string();
                    nexus_log!(
                        LogLevel::Error,
                        "pipeline",
                        "Stage '{}' failed: {} (run: {})",
                        stage_name,
                        error_msg,
                        run_id
                    );
                    if let Some(sink) = sink {
                        sink_result(
                            event_names::PIPELINE_FAILED,
                            EventEmitter::pipeline_failed(
                                sink, run_id, &self.name, stage_name, &error_msg,
                            ),
                        );
                    }
                    stage_results.push(StageResult::failure(
                        stage_name,
                        error_msg.clone(),
                        duration,
                    ));
                    return PipelineResult::failure(
                        &self.name,
                        run_id,
                        stage_results,
                        error_msg,
                        pipeline_start.elapsed(),
                    );
                }
            }
        }

        let total_duration = pipeline_start.elapsed();
        nexus_log!(
            LogLevel::Info,
            "pipeline",
            "Pipeline '{}' completed successfully in {:.3}ms (run: {})",
            self.name,
            total_duration.as_secs_f64() * 1000.0,
            run_id
        );
        if let Some(sink) = sink {
            sink_result(
                event_names::PIPELINE_COMPLETED,
                EventEmitter::pipeline_completed(
                    sink,
                    run_id,
                    &self.name,
                    total_duration.as_millis() as u64,
                    stage_results.len(),
                ),
            );
        }

        PipelineResult::success(&self.name, run_id, stage_results, total_duration, current)
    }
}

/// A rejected event is logged; the run itself is unaffected
fn sink_result(event: &str, result: Result<(), String>) {
    if let Err(e) = result {
        nexus_log!(
            LogLevel::Warn,
            "pipeline",
            "Event sink rejected {}: {}",
            event,
            e
        );
    }
}

/// Builder for constructing pipelines
pub struct PipelineBuilder {
    name: String,
    stages: StageList,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stages: StageList::new(),
        }
    }

    /// Start from an existing stage list handle instead of an empty one
    pub fn stages(mut self, stages: StageList) -> Self {
        self.stages = stages;
        self
    }

    /// Add a stage to the pipeline
    pub fn add_stage<S: PipelineStage + 'static>(self, stage: S) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Add a stage that may also be held elsewhere
    pub fn add_shared_stage(self, stage: Arc<dyn PipelineStage>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Pipeline {
        Pipeline {
            name: self.name,
            stages: self.stages,
        }
    }
}
