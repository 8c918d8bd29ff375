use super::{
    announce, BatchReport, BatchSummary, DataStream, PriorityKind, PriorityRules, StreamIdentity,
    StreamSettings,
};
use crate::error::NexusResult;

/// Discrete system events; counts the ones named `error`
///
/// Any item is a valid event, so nothing is ever skipped.
pub struct EventStream {
    identity: StreamIdentity,
    settings: StreamSettings,
}

impl EventStream {
    pub const STREAM_TYPE: &'static str = "System Events";

    pub fn new(stream_id: impl Into<String>) -> Self {
        Self::with_settings(stream_id, StreamSettings::default())
    }

    pub fn with_settings(stream_id: impl Into<String>, settings: StreamSettings) -> Self {
        let identity = StreamIdentity::new(stream_id, Self::STREAM_TYPE);
        announce("Event", &identity, &settings);
        Self { identity, settings }
    }
}

impl DataStream for EventStream {
    fn identity(&self) -> &StreamIdentity {
        &self.identity
    }

    fn process_batch(&self, items: &[String]) -> NexusResult<BatchSummary> {
        let notifier = self.settings.notifier();
        notifier.notice(&format!("Processing event batch: [{}]", items.join(", ")));

        let errors = items.iter().filter(|item| item.as_str() == "error").count();

        let summary = BatchSummary::new(
            &self.identity,
            items.len(),
            0,
            BatchReport::Event { errors },
        );
        notifier.notice(&summary.to_string());
        Ok(summary)
    }

    fn priority_kind(&self) -> PriorityKind {
        PriorityKind::CriticalEvent
    }

    fn is_priority(&self, item: &str, rules: &PriorityRules) -> bool {
        rules.critical_events.iter().any(|critical| critical == item)
    }
}
