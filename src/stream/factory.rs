use super::{DataStream, EventStream, SensorStream, StreamSettings, TransactionStream};
use crate::error::{NexusError, NexusResult};
use serde::{Deserialize, Serialize};

/// The stream variants known to the factory
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Sensor,
    Transaction,
    Event,
}

impl StreamKind {
    pub fn parse(s: &str) -> NexusResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sensor" => Ok(StreamKind::Sensor),
            "transaction" => Ok(StreamKind::Transaction),
            "event" => Ok(StreamKind::Event),
            other => Err(NexusError::UnknownStream(other.to_string())),
        }
    }
}

/// Stream factory for creating streams by kind
pub struct StreamFactory;

impl StreamFactory {
    /// Create a stream of the given kind
    ///
    /// # Returns
    /// A boxed trait object implementing DataStream
    pub fn create(
        kind: StreamKind,
        stream_id: impl Into<String>,
        settings: StreamSettings,
    ) -> Box<dyn DataStream> {
        match kind {
            StreamKind::Sensor => Box::new(SensorStream::with_settings(stream_id, settings)),
            StreamKind::Transaction => {
                Box::new(TransactionStream::with_settings(stream_id, settings))
            }
            StreamKind::Event => Box::new(EventStream::with_settings(stream_id, settings)),
        }
    }
}
