//! Data processors: the validate → analyze → format contract
//!
//! Every processor implements [`DataProcessor`], supplying only its type-specific
//! logic. The control flow lives in [`drive`], which every processor reaches
//! through [`ProcessorExt::process`] and which no variant can override.
//!
//! # Example
//! ```
//! use nexus::processor::{NumericProcessor, ProcessorExt};
//! use serde_json::json;
//!
//! let numeric = NumericProcessor::silent();
//! let output = numeric.process(&json!([1, 2, 3, 4, 5]));
//! assert_eq!(output, "Output: Processed 5 numeric values, sum=15, avg=3.0");
//! ```

pub mod analysis;
pub mod factory;
pub mod log_entry;
pub mod numeric;
pub mod passthrough;
pub mod text;

pub use analysis::Analysis;
pub use factory::{ProcessorFactory, ProcessorKind};
pub use log_entry::LogProcessor;
pub use numeric::NumericProcessor;
pub use passthrough::PassthroughProcessor;
pub use text::TextProcessor;

use crate::error::{NexusError, NexusResult};
use crate::logger::{LogLevel, Notifier};
use crate::nexus_log;
use serde_json::Value;

/// Output returned by [`drive`] when validation rejects the input
pub const INVALID_DATA: &str = "Invalid data";

/// Identity and display settings shared by every processor variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorConfig {
    pub name: String,
    pub silent: bool,
}

impl ProcessorConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            silent: false,
        }
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn notifier(&self) -> Notifier {
        Notifier::new(self.silent)
    }

    /// Emit the construction notice for a freshly built processor
    pub(crate) fn announce(self) -> Self {
        self.notifier()
            .notice(&format!("Initializing {}...", self.name));
        self
    }
}

/// A processor for one data shape
///
/// Default bodies give identity behaviour: accept everything, pass the input
/// through as the `value` metric, and render it behind an `Output:` tag.
pub trait DataProcessor: Send + Sync {
    fn config(&self) -> &ProcessorConfig;

    fn name(&self) -> &str {
        &self.config().name
    }

    /// Check the input shape. Must return `false` on mismatch, never fail.
    fn validate(&self, _data: &Value) -> bool {
        true
    }

    /// Label used in the `Validation: ... verified` notice
    fn verified_label(&self) -> Option<&str> {
        None
    }

    /// Compute metrics for input that passed [`validate`](Self::validate)
    fn analyze(&self, data: &Value) -> NexusResult<Analysis> {
        Ok(Analysis::new().with("value", data.clone()))
    }

    fn format(&self, result: &Analysis) -> String {
        format!("Output: {}", result.display("value"))
    }
}

/// Run one input through validate → analyze → format, reporting failures.
///
/// `analyze` and `format` are never invoked for input that fails validation.
pub fn try_drive<P: DataProcessor + ?Sized>(processor: &P, data: &Value) -> NexusResult<String> {
    let notifier = processor.config().notifier();
    notifier.notice(&match data {
        Value::String(s) => format!("Processing data: \"{}\"", s),
        other => format!("Processing data: {}", other),
    });

    if !processor.validate(data) {
        return Err(NexusError::ValidationFailed {
            processor: processor.name().to_string(),
            reason: format!("unsupported input {}", data),
        });
    }
    if let Some(label) = processor.verified_label() {
        notifier.notice(&format!("Validation: {} verified", label));
    }

    let result = processor.analyze(data)?;
    Ok(processor.format(&result))
}

/// Run one input through the processor, recovering every failure locally.
///
/// Rejected input yields the fixed [`INVALID_DATA`] sentinel. An analysis
/// failure on input that passed validation is logged and yields the same
/// sentinel.
pub fn drive<P: DataProcessor + ?Sized>(processor: &P, data: &Value) -> String {
    match try_drive(processor, data) {
        Ok(output) => output,
        Err(e @ NexusError::ValidationFailed { .. }) => {
            nexus_log!(LogLevel::Debug, "processor", "{}", e);
            INVALID_DATA.to_string()
        }
        Err(e) => {
            nexus_log!(LogLevel::Error, "processor", "{}", e);
            INVALID_DATA.to_string()
        }
    }
}

/// Entry points for processing, available on every [`DataProcessor`]
pub trait ProcessorExt: DataProcessor {
    fn process(&self, data: &Value) -> String {
        drive(self, data)
    }

    fn try_process(&self, data: &Value) -> NexusResult<String> {
        try_drive(self, data)
    }
}

impl<P: DataProcessor + ?Sized> ProcessorExt for P {}
