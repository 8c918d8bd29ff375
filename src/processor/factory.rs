//! Processor factory for creating processors by kind
//!
//! Callers that only know a kind name (from configuration or user input) get a
//! boxed [`DataProcessor`] without naming the concrete type.

use super::{
    DataProcessor, LogProcessor, NumericProcessor, PassthroughProcessor, ProcessorConfig,
    TextProcessor,
};
use crate::config::NexusConfig;
use crate::error::{NexusError, NexusResult};
use serde::{Deserialize, Serialize};

/// The processor variants known to the factory
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProcessorKind {
    Passthrough,
    Numeric,
    Text,
    Log,
}

impl ProcessorKind {
    pub fn parse(s: &str) -> NexusResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "passthrough" | "default" => Ok(ProcessorKind::Passthrough),
            "numeric" => Ok(ProcessorKind::Numeric),
            "text" => Ok(ProcessorKind::Text),
            "log" => Ok(ProcessorKind::Log),
            other => Err(NexusError::UnknownProcessor(other.to_string())),
        }
    }

    /// Display name given to processors of this kind
    pub fn display_name(&self) -> &'static str {
        match self {
            ProcessorKind::Passthrough => "Data Processor",
            ProcessorKind::Numeric => "Numeric Processor",
            ProcessorKind::Text => "Text Processor",
            ProcessorKind::Log => "Log Processor",
        }
    }
}

pub struct ProcessorFactory;

impl ProcessorFactory {
    /// Create a processor of the given kind
    ///
    /// # Returns
    /// A boxed trait object implementing DataProcessor
    pub fn create(kind: ProcessorKind, silent: bool) -> Box<dyn DataProcessor> {
        let config = ProcessorConfig::new(kind.display_name()).silent(silent);
        match kind {
            ProcessorKind::Passthrough => Box::new(PassthroughProcessor::with_config(config)),
            ProcessorKind::Numeric => Box::new(NumericProcessor::with_config(config)),
            ProcessorKind::Text => Box::new(TextProcessor::with_config(config)),
            ProcessorKind::Log => Box::new(LogProcessor::with_config(config)),
        }
    }

    /// Create a processor that follows the configuration's `silent` flag
    pub fn create_from_config(kind: ProcessorKind, config: &NexusConfig) -> Box<dyn DataProcessor> {
        Self::create(kind, config.silent)
    }

    /// Create a processor from a kind name
    pub fn create_named(kind: &str, silent: bool) -> NexusResult<Box<dyn DataProcessor>> {
        Ok(Self::create(ProcessorKind::parse(kind)?, silent))
    }

    /// Create one processor of every kind
    pub fn create_all(silent: bool) -> Vec<Box<dyn DataProcessor>> {
        [
            ProcessorKind::Numeric,
            ProcessorKind::Text,
            ProcessorKind::Log,
            ProcessorKind::Passthrough,
        ]
        .into_iter()
        .map(|kind| Self::create(kind, silent))
        .collect()
    }
}
