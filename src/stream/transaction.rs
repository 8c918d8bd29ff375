use super::{
    announce, parse_items, split_item, BatchReport, BatchSummary, DataStream, PriorityKind,
    PriorityRules, StreamIdentity, StreamSettings,
};
use crate::error::{NexusError, NexusResult};

/// Financial transactions in `action:amount` form
///
/// `sell` entries add their amount to the net flow; every other action
/// subtracts it. The net is exact: a total outside the `i64` range fails the
/// batch instead of being clamped.
pub struct TransactionStream {
    identity: StreamIdentity,
    settings: StreamSettings,
}

impl TransactionStream {
    pub const STREAM_TYPE: &'static str = "Financial Data";

    pub fn new(stream_id: impl Into<String>) -> Self {
        Self::with_settings(stream_id, StreamSettings::default())
    }

    pub fn with_settings(stream_id: impl Into<String>, settings: StreamSettings) -> Self {
        let identity = StreamIdentity::new(stream_id, Self::STREAM_TYPE);
        announce("Transaction", &identity, &settings);
        Self { identity, settings }
    }
}

// Widened so negating i64::MIN is defined
fn parse_transaction(item: &str) -> Option<i128> {
    let (action, amount) = split_item(item)?;
    let amount = i128::from(amount.parse::<i64>().ok()?);
    Some(if action == "sell" { amount } else { -amount })
}

impl DataStream for TransactionStream {
    fn identity(&self) -> &StreamIdentity {
        &self.identity
    }

    fn process_batch(&self, items: &[String]) -> NexusResult<BatchSummary> {
        let notifier = self.settings.notifier();
        notifier.notice(&format!(
            "Processing transaction batch: [{}]",
            items.join(", ")
        ));

        let (flows, skipped) = parse_items(
            &self.identity,
            self.settings.malformed_items,
            items,
            parse_transaction,
        )?;
        let net_flow = i64::try_from(flows.iter().sum::<i128>()).map_err(|_| {
            NexusError::NetFlowOverflow {
                stream_id: self.identity.stream_id.clone(),
            }
        })?;

        let summary = BatchSummary::new(
            &self.identity,
            items.len(),
            skipped,
            BatchReport::Transaction { net_flow },
        );
        notifier.notice(&summary.to_string());
        Ok(summary)
    }

    fn priority_kind(&self) -> PriorityKind {
        PriorityKind::LargeTransaction
    }

    /// Transactions whose absolute amount reaches the large threshold
    fn is_priority(&self, item: &str, rules: &PriorityRules) -> bool {
        parse_transaction(item)
            .map(|flow| flow.unsigned_abs() >= u128::from(rules.large_transaction))
            .unwrap_or(false)
    }
}
