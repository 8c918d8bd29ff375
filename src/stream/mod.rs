//! Batch streams
//!
//! A stream owns its identity (`stream_id`, `stream_type`) and applies its own
//! analysis policy to each batch of `key:value` items. Streams keep no state
//! between batches.
//!
//! Items that do not parse are handled according to [`MalformedItemPolicy`]:
//! skipped and counted by default, or failing the whole batch.

pub mod event;
pub mod factory;
pub mod filter;
pub mod registry;
pub mod sensor;
pub mod transaction;

pub use event::EventStream;
pub use factory::{StreamFactory, StreamKind};
pub use filter::{FilteredBatch, PriorityKind, PriorityReport, PriorityRules};
pub use registry::{BatchRun, StreamOutcome, StreamRegistry};
pub use sensor::SensorStream;
pub use transaction::TransactionStream;

use crate::error::{NexusError, NexusResult};
use crate::logger::{LogLevel, Notifier};
use crate::nexus_log;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What to do with a batch item that does not parse
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MalformedItemPolicy {
    /// Drop the item, count it in [`BatchSummary::skipped`], keep going
    #[default]
    Skip,
    /// Reject the whole batch with [`NexusError::MalformedBatchItem`]
    FailFast,
}

/// Identity of a stream, fixed for its lifetime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamIdentity {
    pub stream_id: String,
    pub stream_type: String,
}

impl StreamIdentity {
    pub fn new(stream_id: impl Into<String>, stream_type: impl Into<String>) -> Self {
        Self {
            stream_id: stream_id.into(),
            stream_type: stream_type.into(),
        }
    }
}

/// Per-stream behaviour settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSettings {
    pub silent: bool,
    pub malformed_items: MalformedItemPolicy,
}

impl StreamSettings {
    pub fn silent() -> Self {
        Self {
            silent: true,
            ..Self::default()
        }
    }

    pub fn with_policy(mut self, policy: MalformedItemPolicy) -> Self {
        self.malformed_items = policy;
        self
    }

    pub fn notifier(&self) -> Notifier {
        Notifier::new(self.silent)
    }
}

/// A named batch-data source
pub trait DataStream: Send + Sync {
    fn identity(&self) -> &StreamIdentity;

    fn stream_id(&self) -> &str {
        &self.identity().stream_id
    }

    fn stream_type(&self) -> &str {
        &self.identity().stream_type
    }

    /// Analyze one batch of items
    fn process_batch(&self, items: &[String]) -> NexusResult<BatchSummary>;

    /// What this stream's high-priority items are called
    fn priority_kind(&self) -> PriorityKind;

    /// Whether one item passes the high-priority filter
    fn is_priority(&self, item: &str, rules: &PriorityRules) -> bool;

    /// Keep only the high-priority items of a batch, in order
    fn filter_batch(&self, items: &[String], rules: &PriorityRules) -> FilteredBatch {
        FilteredBatch {
            stream_id: self.stream_id().to_string(),
            kind: self.priority_kind(),
            items: items
                .iter()
                .filter(|item| self.is_priority(item, rules))
                .cloned()
                .collect(),
        }
    }
}

/// Stream-specific result of one batch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BatchReport {
    Sensor { avg_temp: f64, temp_readings: usize },
    Transaction { net_flow: i64 },
    Event { errors: usize },
}

impl BatchReport {
    /// Short label for the kind of data in the batch
    pub fn label(&self) -> &'static str {
        match self {
            BatchReport::Sensor { .. } => "Sensor",
            BatchReport::Transaction { .. } => "Transaction",
            BatchReport::Event { .. } => "Event",
        }
    }

    /// Plural noun for the batch items
    pub fn unit(&self) -> &'static str {
        match self {
            BatchReport::Sensor { .. } => "readings",
            BatchReport::Transaction { .. } => "operations",
            BatchReport::Event { .. } => "events",
        }
    }
}

/// Result of [`DataStream::process_batch`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub stream_id: String,
    pub stream_type: String,
    /// Full batch size, malformed items included
    pub items: usize,
    /// Items dropped under [`MalformedItemPolicy::Skip`]
    pub skipped: usize,
    pub report: BatchReport,
}

impl BatchSummary {
    pub fn new(identity: &StreamIdentity, items: usize, skipped: usize, report: BatchReport) -> Self {
        Self {
            stream_id: identity.stream_id.clone(),
            stream_type: identity.stream_type.clone(),
            items,
            skipped,
            report,
        }
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.report {
            BatchReport::Sensor { avg_temp, .. } => write!(
                f,
                "Sensor analysis: {} readings processed, avg temp: {:?}°C",
                self.items, avg_temp
            ),
            BatchReport::Transaction { net_flow } => write!(
                f,
                "Transaction analysis: {} operations, net flow: {:+} units",
                self.items, net_flow
            ),
            BatchReport::Event { errors } => write!(
                f,
                "Event analysis: {} events, {} error detected",
                self.items, errors
            ),
        }
    }
}

/// Build an owned batch from string literals
pub fn to_batch<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items.iter().map(|s| s.as_ref().to_string()).collect()
}

/// Split a `key:value` item on its first colon
pub(crate) fn split_item(item: &str) -> Option<(&str, &str)> {
    let (key, value) = item.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        None
    } else {
        Some((key, value.trim()))
    }
}

/// Parse every item, applying the malformed-item policy.
///
/// Returns the parsed items and the number skipped.
pub(crate) fn parse_items<T>(
    identity: &StreamIdentity,
    policy: MalformedItemPolicy,
    items: &[String],
    parse: impl Fn(&str) -> Option<T>,
) -> NexusResult<(Vec<T>, usize)> {
    let mut parsed = Vec::with_capacity(items.len());
    let mut skipped = 0;

    for (index, item) in items.iter().enumerate() {
        match parse(item) {
            Some(value) => parsed.push(value),
            None => match policy {
                MalformedItemPolicy::Skip => {
                    nexus_log!(
                        LogLevel::Warn,
                        "stream",
                        "Skipping malformed item #{} {:?} (stream: {})",
                        index,
                        item,
                        identity.stream_id
                    );
                    skipped += 1;
                }
                MalformedItemPolicy::FailFast => {
                    return Err(NexusError::MalformedBatchItem {
                        stream_id: identity.stream_id.clone(),
                        index,
                        item: item.clone(),
                    });
                }
            },
        }
    }

    Ok((parsed, skipped))
}

/// Emit the construction notices shared by all stream kinds
pub(crate) fn announce(kind: &str, identity: &StreamIdentity, settings: &StreamSettings) {
    let notifier = settings.notifier();
    notifier.notice(&format!("Initializing {} Stream...", kind));
    notifier.notice(&format!(
        "Stream ID: {}, Type: {}",
        identity.stream_id, identity.stream_type
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_item() {
        assert_eq!(split_item("temp:22.5"), Some(("temp", "22.5")));
        assert_eq!(split_item(" buy : 100 "), Some(("buy", "100")));
        assert_eq!(split_item("a:b:c"), Some(("a", "b:c")));
        assert_eq!(split_item("login"), None);
        assert_eq!(split_item(":5"), None);
    }

    #[test]
    fn test_parse_items_skip_policy() {
        let identity = StreamIdentity::new("S1", "Test");
        let items = to_batch(&["1", "x", "3"]);
        let (parsed, skipped) = parse_items(&identity, MalformedItemPolicy::Skip, &items, |s| {
            s.parse::<i32>().ok()
        })
        .unwrap();

        assert_eq!(parsed, vec![1, 3]);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_parse_items_fail_fast_policy() {
        let identity = StreamIdentity::new("S1", "Test");
        let items = to_batch(&["1", "x", "y"]);
        let err = parse_items(&identity, MalformedItemPolicy::FailFast, &items, |s| {
            s.parse::<i32>().ok()
        })
        .unwrap_err();

        match err {
            NexusError::MalformedBatchItem { index, item, .. } => {
                assert_eq!(index, 1);
                assert_eq!(item, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_summary_rendering() {
        let identity = StreamIdentity::new("TRANS_001", "Financial Data");
        let gain = BatchSummary::new(&identity, 4, 0, BatchReport::Transaction { net_flow: 200 });
        assert_eq!(
            gain.to_string(),
            "Transaction analysis: 4 operations, net flow: +200 units"
        );

        let loss = BatchSummary::new(&identity, 3, 0, BatchReport::Transaction { net_flow: -25 });
        assert_eq!(
            loss.to_string(),
            "Transaction analysis: 3 operations, net flow: -25 units"
        );
    }

    #[test]
    fn test_policy_serde_names() {
        let policy: MalformedItemPolicy = serde_json::from_str("\"fail_fast\"").unwrap();
        assert_eq!(policy, MalformedItemPolicy::FailFast);
        assert_eq!(MalformedItemPolicy::default(), MalformedItemPolicy::Skip);
    }
}
