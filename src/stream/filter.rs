//! High-priority filtering over batch items
//!
//! Each stream decides which of its items are high priority under a shared
//! set of [`PriorityRules`]: temperature readings outside the normal band,
//! transactions at or above the large-amount threshold, and critical events.
//! Filtering never analyzes or rejects a batch; unparseable items are simply
//! not high priority.

use serde::{Deserialize, Serialize};

/// Normal operating band for temperature readings, inclusive
pub const NORMAL_TEMP_RANGE: (f64, f64) = (10.0, 30.0);

/// Absolute amount from which a transaction counts as large
pub const LARGE_TRANSACTION: u64 = 100;

/// Thresholds for the high-priority filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityRules {
    /// Temperatures outside this inclusive band raise a sensor alert
    pub normal_temp_range: (f64, f64),

    /// Transactions whose absolute amount reaches this are large
    pub large_transaction: u64,

    /// Event names treated as critical
    pub critical_events: Vec<String>,
}

impl Default for PriorityRules {
    fn default() -> Self {
        Self {
            normal_temp_range: NORMAL_TEMP_RANGE,
            large_transaction: LARGE_TRANSACTION,
            critical_events: vec!["error".to_string()],
        }
    }
}

impl PriorityRules {
    pub fn is_abnormal_temp(&self, value: f64) -> bool {
        let (low, high) = self.normal_temp_range;
        !(low..=high).contains(&value)
    }
}

/// What a high-priority item of a stream is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityKind {
    SensorAlert,
    LargeTransaction,
    CriticalEvent,
}

impl PriorityKind {
    /// Count with the right noun, e.g. `1 large transaction`
    pub fn describe(&self, count: usize) -> String {
        let noun = match self {
            PriorityKind::SensorAlert => "critical sensor alert",
            PriorityKind::LargeTransaction => "large transaction",
            PriorityKind::CriticalEvent => "critical event",
        };
        let plural = if count == 1 { "" } else { "s" };
        format!("{} {}{}", count, noun, plural)
    }
}

/// High-priority items kept from one batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredBatch {
    pub stream_id: String,
    pub kind: PriorityKind,
    pub items: Vec<String>,
}

impl FilteredBatch {
    pub fn describe(&self) -> String {
        self.kind.describe(self.items.len())
    }
}

/// Result of filtering one batch per registered stream
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriorityReport {
    pub batches: Vec<FilteredBatch>,
}

impl PriorityReport {
    pub fn total(&self) -> usize {
        self.batches.iter().map(|b| b.items.len()).sum()
    }

    /// Count kept items of one kind across every stream
    pub fn count(&self, kind: PriorityKind) -> usize {
        self.batches
            .iter()
            .filter(|b| b.kind == kind)
            .map(|b| b.items.len())
            .sum()
    }

    /// One-line report, e.g. `Filtered results: 2 critical sensor alerts, 1 large transaction`
    ///
    /// Kinds with no kept item are left out.
    pub fn headline(&self) -> String {
        let kinds = [
            PriorityKind::SensorAlert,
            PriorityKind::LargeTransaction,
            PriorityKind::CriticalEvent,
        ];
        let parts: Vec<String> = kinds
            .iter()
            .map(|kind| (kind, self.count(*kind)))
            .filter(|(_, count)| *count > 0)
            .map(|(kind, count)| kind.describe(count))
            .collect();

        if parts.is_empty() {
            "Filtered results: no high-priority data".to_string()
        } else {
            format!("Filtered results: {}", parts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_pluralizes() {
        assert_eq!(PriorityKind::LargeTransaction.describe(1), "1 large transaction");
        assert_eq!(
            PriorityKind::SensorAlert.describe(2),
            "2 critical sensor alerts"
        );
    }

    #[test]
    fn test_temperature_band_is_inclusive() {
        let rules = PriorityRules::default();
        assert!(!rules.is_abnormal_temp(10.0));
        assert!(!rules.is_abnormal_temp(30.0));
        assert!(rules.is_abnormal_temp(30.5));
        assert!(rules.is_abnormal_temp(-5.0));
    }

    #[test]
    fn test_headline_skips_empty_kinds() {
        let report = PriorityReport {
            batches: vec![
                FilteredBatch {
                    stream_id: "SENSOR_001".to_string(),
                    kind: PriorityKind::SensorAlert,
                    items: vec!["temp:35".to_string(), "temp:2".to_string()],
                },
                FilteredBatch {
                    stream_id: "TRANS_001".to_string(),
                    kind: PriorityKind::LargeTransaction,
                    items: vec!["sell:200".to_string()],
                },
                FilteredBatch {
                    stream_id: "EVENT_001".to_string(),
                    kind: PriorityKind::CriticalEvent,
                    items: vec![],
                },
            ],
        };

        assert_eq!(report.total(), 3);
        assert_eq!(
            report.headline(),
            "Filtered results: 2 critical sensor alerts, 1 large transaction"
        );
        assert_eq!(
            PriorityReport::default().headline(),
            "Filtered results: no high-priority data"
        );
    }

    #[test]
    fn test_rules_from_partial_json() {
        let rules: PriorityRules = serde_json::from_str(r#"{"large_transaction": 500}"#).unwrap();
        assert_eq!(rules.large_transaction, 500);
        assert_eq!(rules.normal_temp_range, NORMAL_TEMP_RANGE);
        assert_eq!(rules.critical_events, vec!["error"]);
    }
}
