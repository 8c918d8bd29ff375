use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Mutex;
use uuid::Uuid;

/// Event names - centralized for consistency
pub mod event_names {
    pub const PIPELINE_STARTED: &str = "pipeline:started";
    pub const PIPELINE_STAGE_COMPLETED: &str = "pipeline:stage-completed";
    pub const PIPELINE_COMPLETED: &str = "pipeline:completed";
    pub const PIPELINE_FAILED: &str = "pipeline:failed";
}

/// Destination for pipeline lifecycle events
pub trait EventSink: Send + Sync {
    fn emit(&self, name: &str, payload: Value) -> Result<(), String>;
}

/// Pipeline started event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStartedEvent {
    pub run_id: Uuid,
    pub pipeline_name: String,
    pub total_stages: usize,
    pub timestamp: String,
}

/// Pipeline stage completed event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStageCompletedEvent {
    pub run_id: Uuid,
    pub pipeline_name: String,
    pub stage_name: String,
    pub stage_index: usize,
    pub total_stages: usize,
    pub duration_ms: u64,
    pub timestamp: String,
}

/// Pipeline completed event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineCompletedEvent {
    pub run_id: Uuid,
    pub pipeline_name: String,
    pub total_duration_ms: u64,
    pub stages_completed: usize,
    pub timestamp: String,
}

/// Pipeline failed event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineFailedEvent {
    pub run_id: Uuid,
    pub pipeline_name: String,
    pub failed_stage: String,
    pub error: String,
    pub timestamp: String,
}

/// Event emitter helper functions
pub struct EventEmitter;

impl EventEmitter {
    fn send<T: Serialize>(sink: &dyn EventSink, name: &str, event: &T) -> Result<(), String> {
        let payload = serde_json::to_value(event)
            .map_err(|e| format!("Failed to serialize {} event: {}", name, e))?;
        sink.emit(name, payload)
            .map_err(|e| format!("Failed to emit {} event: {}", name, e))
    }

    /// Emit pipeline started event
    pub fn pipeline_started(
        sink: &dyn EventSink,
        run_id: Uuid,
        pipeline_name: &str,
        total_stages: usize,
    ) -> Result<(), String> {
        let event = PipelineStartedEvent {
            run_id,
            pipeline_name: pipeline_name.to_string(),
            total_stages,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        Self::send(sink, event_names::PIPELINE_STARTED, &event)
    }

    /// Emit pipeline stage completed event
    pub fn pipeline_stage_completed(
        sink: &dyn EventSink,
        run_id: Uuid,
        pipeline_name: &str,
        stage_name: &str,
        stage_index: usize,
        total_stages: usize,
        duration_ms: u64,
    ) -> Result<(), String> {
        let event = PipelineStageCompletedEvent {
            run_id,
            pipeline_name: pipeline_name.to_string(),
            stage_name: stage_name.to_string(),
            stage_index,
            total_stages,
            duration_ms,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        Self::send(sink, event_names::PIPELINE_STAGE_COMPLETED, &event)
    }

    /// Emit pipeline completed event
    pub fn pipeline_completed(
        sink: &dyn EventSink,
        run_id: Uuid,
        pipeline_name: &str,
        total_duration_ms: u64,
        stages_completed: usize,
    ) -> Result<(), String> {
        let event = PipelineCompletedEvent {
            run_id,
            pipeline_name: pipeline_name.to_string(),
            total_duration_ms,
            stages_completed,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        Self::send(sink, event_names::PIPELINE_COMPLETED, &event)
    }

    /// Emit pipeline failed event
    pub fn pipeline_failed(
        sink: &dyn EventSink,
        run_id: Uuid,
        pipeline_name: &str,
        failed_stage: &str,
        error: &str,
    ) -> Result<(), String> {
        let event = PipelineFailedEvent {
            run_id,
            pipeline_name: pipeline_name.to_string(),
            failed_stage: failed_stage.to_string(),
            error: error.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        Self::send(sink, event_names::PIPELINE_FAILED, &event)
    }
}

/// Sink that keeps every event in memory, in emission order
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<(String, Value)>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(String, Value)> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn names(&self) -> Vec<String> {
        self.events().into_iter().map(|(name, _)| name).collect()
    }
}

impl EventSink for CollectingSink {
    fn emit(&self, name: &str, payload: Value) -> Result<(), String> {
        self.events
            .lock()
            .map_err(|_| "event log lock poisoned".to_string())?
            .push((name.to_string(), payload));
        Ok(())
    }
}
