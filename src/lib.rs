//! Polymorphic data processing
//!
//! - [`processor`]: handlers sharing the validate → analyze → format contract
//! - [`pipeline`]: ordered stage chains folded left to right
//! - [`adapter`]: pipelines bound to JSON, CSV or stream data
//! - [`stream`]: typed batch streams and their registry
//! - [`coordinator`]: runs, chains and recovers any of the above

pub mod adapter;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod logger;
pub mod pipeline;
pub mod processor;
pub mod stream;

pub use adapter::{Adapter, AdapterReport, DataShape};
pub use config::NexusConfig;
pub use coordinator::{Coordinator, Runnable, RunReport};
pub use error::{NexusError, NexusResult};
pub use logger::{init_tracing, LogLevel, LOGGER};
pub use pipeline::{Pipeline, PipelineStage, StageList};
pub use processor::{DataProcessor, ProcessorExt};
pub use stream::{DataStream, StreamRegistry};
