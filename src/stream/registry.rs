use super::{BatchSummary, DataStream, PriorityReport, PriorityRules, StreamFactory, StreamSettings};
use crate::config::NexusConfig;
use crate::error::{NexusError, NexusResult};
use crate::logger::LogLevel;
use crate::nexus_log;
use std::time::{Duration, Instant};

/// Ordered collection of registered streams
///
/// Registration is append-only. Batch `i` handed to [`process_batches`](Self::process_batches)
/// goes to the `i`-th registered stream.
#[derive(Default)]
pub struct StreamRegistry {
    streams: Vec<Box<dyn DataStream>>,
}

impl StreamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the streams listed in the configuration, in order
    pub fn from_config(config: &NexusConfig) -> Self {
        let settings = config.stream_settings();
        let mut registry = Self::new();
        for spec in &config.streams {
            registry.register_boxed(StreamFactory::create(spec.kind, &spec.stream_id, settings));
        }
        registry
    }

    pub fn register_stream<S: DataStream + 'static>(&mut self, stream: S) {
        self.register_boxed(Box::new(stream));
    }

    pub fn register_boxed(&mut self, stream: Box<dyn DataStream>) {
        nexus_log!(
            LogLevel::Debug,
            "registry",
            "Registered stream {} ({}) at position {}",
            stream.stream_id(),
            stream.stream_type(),
            self.streams.len()
        );
        self.streams.push(stream);
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    pub fn streams(&self) -> impl Iterator<Item = &dyn DataStream> {
        self.streams.iter().map(|s| s.as_ref())
    }

    pub fn get(&self, stream_id: &str) -> NexusResult<&dyn DataStream> {
        self.streams()
            .find(|s| s.stream_id() == stream_id)
            .ok_or_else(|| NexusError::StreamNotFound(stream_id.to_string()))
    }

    /// Dispatch batches positionally and run each stream's own analysis.
    ///
    /// A failing stream is recorded in its outcome; the remaining streams still
    /// run. Batches beyond the number of registered streams are counted as
    /// unmatched, and streams without a batch are left untouched.
    pub fn process_batches(&self, batches: &[Vec<String>]) -> BatchRun {
        let run_start = Instant::now();
        nexus_log!(
            LogLevel::Info,
            "registry",
            "Dispatching {} batches across {} streams",
            batches.len(),
            self.streams.len()
        );

        let outcomes: Vec<StreamOutcome> = self
            .streams
            .iter()
            .zip(batches.iter())
            .map(|(stream, batch)| {
                let started = Instant::now();
                let result = stream.process_batch(batch);
                if let Err(e) = &result {
                    nexus_log!(
                        LogLevel::Error,
                        "registry",
                        "Stream {} failed: {}",
                        stream.stream_id(),
                        e
                    );
                }
                StreamOutcome {
                    stream_id: stream.stream_id().to_string(),
                    stream_type: stream.stream_type().to_string(),
                    batch_size: batch.len(),
                    duration: started.elapsed(),
                    result,
                }
            })
            .collect();

        let unmatched_batches = batches.len().saturating_sub(self.streams.len());
        if unmatched_batches > 0 {
            nexus_log!(
                LogLevel::Warn,
                "registry",
                "{} batches had no registered stream",
                unmatched_batches
            );
        }

        BatchRun {
            outcomes,
            unmatched_batches,
            total_duration: run_start.elapsed(),
        }
    }

    /// Keep only the high-priority items of each batch, dispatched positionally
    ///
    /// Filtering never fails a stream; surplus batches are ignored.
    pub fn filter_batches(&self, batches: &[Vec<String>], rules: &PriorityRules) -> PriorityReport {
        let filtered = self
            .streams
            .iter()
            .zip(batches.iter())
            .map(|(stream, batch)| {
                let kept = stream.filter_batch(batch, rules);
                nexus_log!(
                    LogLevel::Debug,
                    "registry",
                    "Stream {} kept {} of {} items",
                    stream.stream_id(),
                    kept.items.len(),
                    batch.len()
                );
                kept
            })
            .collect();

        PriorityReport { batches: filtered }
    }
}

/// Result of running one stream against its batch
#[derive(Debug)]
pub struct StreamOutcome {
    pub stream_id: String,
    pub stream_type: String,
    pub batch_size: usize,
    pub duration: Duration,
    pub result: NexusResult<BatchSummary>,
}

impl StreamOutcome {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }

    /// One-line report, e.g. `- Sensor data: 2 readings processed`
    pub fn headline(&self) -> String {
        match &self.result {
            Ok(summary) => format!(
                "- {} data: {} {} processed",
                summary.report.label(),
                summary.items,
                summary.report.unit()
            ),
            Err(e) => format!("- {} ({}): failed: {}", self.stream_id, self.stream_type, e),
        }
    }
}

/// Result of [`StreamRegistry::process_batches`]
#[derive(Debug)]
pub struct BatchRun {
    pub outcomes: Vec<StreamOutcome>,
    pub unmatched_batches: usize,
    pub total_duration: Duration,
}

impl BatchRun {
    pub fn summaries(&self) -> impl Iterator<Item = &BatchSummary> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &StreamOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded())
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(StreamOutcome::succeeded) && self.unmatched_batches == 0
    }

    /// Total number of items handed to streams
    pub fn total_items(&self) -> usize {
        self.outcomes.iter().map(|o| o.batch_size).sum()
    }

    pub fn headlines(&self) -> Vec<String> {
        self.outcomes.iter().map(StreamOutcome::headline).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::{
        to_batch, BatchReport, EventStream, MalformedItemPolicy, PriorityKind, SensorStream,
        TransactionStream,
    };

    fn registry(settings: StreamSettings) -> StreamRegistry {
        let mut registry = StreamRegistry::new();
        registry.register_stream(SensorStream::with_settings("SENSOR_001", settings));
        registry.register_stream(TransactionStream::with_settings("TRANS_001", settings));
        registry.register_stream(EventStream::with_settings("EVENT_001", settings));
        registry
    }

    fn batches() -> Vec<Vec<String>> {
        vec![
            to_batch(&["temp:30", "humidity:40"]),
            to_batch(&["sell:200", "buy:50", "sell:75", "buy:25"]),
            to_batch(&["login", "logout", "error"]),
        ]
    }

    #[test]
    fn test_batches_dispatch_positionally() {
        let run = registry(StreamSettings::silent()).process_batches(&batches());

        assert!(run.all_succeeded());
        assert_eq!(run.total_items(), 9);
        assert_eq!(
            run.headlines(),
            vec![
                "- Sensor data: 2 readings processed",
                "- Transaction data: 4 operations processed",
                "- Event data: 3 events processed",
            ]
        );
    }

    #[test]
    fn test_streams_run_their_own_analysis() {
        let run = registry(StreamSettings::silent()).process_batches(&batches());
        let reports: Vec<&BatchReport> = run.summaries().map(|s| &s.report).collect();

        assert_eq!(
            reports,
            vec![
                &BatchReport::Sensor {
                    avg_temp: 30.0,
                    temp_readings: 1
                },
                &BatchReport::Transaction { net_flow: 200 },
                &BatchReport::Event { errors: 1 },
            ]
        );
    }

    #[test]
    fn test_failed_stream_does_not_stop_others() {
        let settings = StreamSettings::silent().with_policy(MalformedItemPolicy::FailFast);
        let mut input = batches();
        input[0] = to_batch(&["garbage"]);

        let run = registry(settings).process_batches(&input);

        assert_eq!(run.failed().count(), 1);
        assert_eq!(run.summaries().count(), 2);
        assert!(run.outcomes[0].headline().contains("failed"));
    }

    #[test]
    fn test_surplus_batches_are_unmatched() {
        let mut input = batches();
        input.push(to_batch(&["extra"]));

        let run = registry(StreamSettings::silent()).process_batches(&input);
        assert_eq!(run.outcomes.len(), 3);
        assert_eq!(run.unmatched_batches, 1);
        assert!(!run.all_succeeded());
    }

    #[test]
    fn test_lookup_by_id() {
        let registry = registry(StreamSettings::silent());
        assert_eq!(registry.get("TRANS_001").unwrap().stream_type(), "Financial Data");
        assert!(registry.get("MISSING").is_err());
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_filter_batches_keeps_high_priority_items() {
        let input = vec![
            to_batch(&["temp:35", "temp:22", "temp:2", "humidity:40"]),
            to_batch(&["sell:200", "buy:50", "sell:75", "buy:25"]),
            to_batch(&["login", "logout"]),
            to_batch(&["surplus"]),
        ];

        let report = registry(StreamSettings::silent()).filter_batches(&input, &PriorityRules::default());

        assert_eq!(report.batches.len(), 3);
        assert_eq!(report.count(PriorityKind::SensorAlert), 2);
        assert_eq!(report.batches[1].items, vec!["sell:200"]);
        assert_eq!(
            report.headline(),
            "Filtered results: 2 critical sensor alerts, 1 large transaction"
        );
    }
}
