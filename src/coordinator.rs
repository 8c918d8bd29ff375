//! Stateless façade over pipelines, adapters and stream registries
//!
//! The coordinator never inspects concrete types. Anything implementing
//! [`Runnable`] can be run, chained, or used as a fallback.

use crate::adapter::Adapter;
use crate::error::NexusResult;
use crate::logger::{LogLevel, Notifier};
use crate::nexus_log;
use crate::pipeline::Pipeline;
use crate::stream::registry::{BatchRun, StreamRegistry};
use crate::stream::{PriorityReport, PriorityRules};
use serde::Serialize;
use serde_json::Value;

/// Output of running one target
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// Label of the target that produced the output
    pub target: String,
    pub output: Value,
    /// Shape-specific summary, for targets that produce one
    pub summary: Option<String>,
}

/// Something the coordinator can run against a record
pub trait Runnable: Send + Sync {
    fn label(&self) -> &str;

    fn run(&self, data: Value) -> NexusResult<RunReport>;
}

impl Runnable for Pipeline {
    fn label(&self) -> &str {
        self.name()
    }

    fn run(&self, data: Value) -> NexusResult<RunReport> {
        Ok(RunReport {
            target: self.name().to_string(),
            output: self.process(data)?,
            summary: None,
        })
    }
}

impl Runnable for Adapter {
    fn label(&self) -> &str {
        self.pipeline_id()
    }

    fn run(&self, data: Value) -> NexusResult<RunReport> {
        let report = self.process(data)?;
        Ok(RunReport {
            target: report.pipeline_id,
            output: report.output,
            summary: Some(report.summary),
        })
    }
}

/// Result of [`Coordinator::chain`]
#[derive(Debug, Clone, PartialEq)]
pub struct ChainReport {
    /// One report per target, in chain order
    pub steps: Vec<RunReport>,
}

impl ChainReport {
    /// Output of the last target, or `None` for an empty chain
    pub fn output(&self) -> Option<&Value> {
        self.steps.last().map(|step| &step.output)
    }
}

/// Result of [`Coordinator::run_with_fallback`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveryReport {
    pub report: RunReport,
    /// Why the primary target was abandoned, if it was
    pub primary_error: Option<String>,
}

impl RecoveryReport {
    pub fn recovered(&self) -> bool {
        self.primary_error.is_some()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Coordinator {
    notifier: Notifier,
}

impl Coordinator {
    pub fn new() -> Self {
        Self::with_notifier(Notifier::new(false))
    }

    /// A coordinator that emits no progress notices
    pub fn silent() -> Self {
        Self::with_notifier(Notifier::new(true))
    }

    fn with_notifier(notifier: Notifier) -> Self {
        notifier.notice("Initializing Nexus Manager...");
        Self { notifier }
    }

    /// Run one target against `data`
    pub fn run(&self, target: &dyn Runnable, data: Value) -> NexusResult<RunReport> {
        nexus_log!(LogLevel::Debug, "coordinator", "Running {}", target.label());
        target.run(data)
    }

    /// Dispatch batch *i* to stream *i* of the registry
    pub fn process_batches(&self, registry: &StreamRegistry, batches: &[Vec<String>]) -> BatchRun {
        self.notifier.notice(&format!(
            "Processing {} batches across {} streams...",
            batches.len(),
            registry.len()
        ));
        let run = registry.process_batches(batches);
        for headline in run.headlines() {
            self.notifier.notice(&headline);
        }
        run
    }

    /// Keep only high-priority items, batch *i* filtered by stream *i*
    pub fn filter_batches(
        &self,
        registry: &StreamRegistry,
        batches: &[Vec<String>],
        rules: &PriorityRules,
    ) -> PriorityReport {
        self.notifier
            .notice("Stream filtering active: High-priority data only");
        let report = registry.filter_batches(batches, rules);
        self.notifier.notice(&report.headline());
        report
    }

    /// Run targets in order, feeding each output into the next
    ///
    /// The first failure stops the chain and is returned.
    pub fn chain(&self, targets: &[&dyn Runnable], data: Value) -> NexusResult<ChainReport> {
        let labels: Vec<&str> = targets.iter().map(|t| t.label()).collect();
        self.notifier.notice(&labels.join(" -> "));

        let mut steps: Vec<RunReport> = Vec::with_capacity(targets.len());
        let mut current = data;
        for target in targets {
            let report = target.run(current).map_err(|e| {
                nexus_log!(
                    LogLevel::Error,
                    "coordinator",
                    "Chain stopped at {}: {}",
                    target.label(),
                    e
                );
                e
            })?;
            current = report.output.clone();
            steps.push(report);
        }

        self.notifier.notice(&format!(
            "Chain result: {} targets completed",
            steps.len()
        ));
        Ok(ChainReport { steps })
    }

    /// Run `primary`; if it fails, run `backup` with the same input
    pub fn run_with_fallback(
        &self,
        primary: &dyn Runnable,
        backup: &dyn Runnable,
        data: Value,
    ) -> NexusResult<RecoveryReport> {
        match primary.run(data.clone()) {
            Ok(report) => Ok(RecoveryReport {
                report,
                primary_error: None,
            }),
            Err(e) => {
                nexus_log!(
                    LogLevel::Warn,
                    "coordinator",
                    "Error detected in {}: {}",
                    primary.label(),
                    e
                );
                self.notifier.notice(&format!(
                    "Recovery initiated: Switching to {}",
                    backup.label()
                ));
                let report = backup.run(data)?;
                self.notifier
                    .notice("Recovery successful: Pipeline restored, processing resumed");
                Ok(RecoveryReport {
                    report,
                    primary_error: Some(e.to_string()),
                })
            }
        }
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}
