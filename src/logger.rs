use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Number of entries kept by the in-memory log
const LOG_CAPACITY: usize = 1000;

/// Log level enum for type-safe logging
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug = 0,
    #[default]
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Debug,
            1 => LogLevel::Info,
            2 => LogLevel::Warn,
            3 => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

/// A single recorded log line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub source: String,
}

/// Simple circular buffer for fixed-size log storage
struct CircularBuffer {
    buffer: Vec<LogEntry>,
    head: usize,
    capacity: usize,
}

impl CircularBuffer {
    fn new(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            head: 0,
            capacity,
        }
    }

    fn push(&mut self, item: LogEntry) {
        if self.buffer.len() < self.capacity {
            self.buffer.push(item);
        } else {
            self.buffer[self.head] = item;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    fn to_vec(&self) -> Vec<LogEntry> {
        // Oldest entry first
        let mut result = Vec::with_capacity(self.buffer.len());
        result.extend_from_slice(&self.buffer[self.head..]);
        result.extend_from_slice(&self.buffer[..self.head]);
        result
    }

    fn clear(&mut self) {
        self.buffer.clear();
        self.head = 0;
    }
}

/// Commands for the logger thread
enum LogCommand {
    Log(LogEntry),
    GetLogs(Sender<Vec<LogEntry>>),
    Clear,
}

/// In-memory log of progress notices and diagnostics.
///
/// Entries are handed to a background thread over a bounded channel, so logging
/// never blocks the caller. Reads go through the same channel, which keeps them
/// ordered after every entry sent before them from the same thread.
pub struct Logger {
    sender: Sender<LogCommand>,
    min_level: Arc<AtomicU8>,
}

impl Logger {
    pub fn new() -> Self {
        Self::with_capacity(LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, receiver) = bounded(LOG_CAPACITY);
        let min_level = Arc::new(AtomicU8::new(LogLevel::Debug as u8));

        std::thread::spawn(move || {
            Self::logger_thread(receiver, capacity.max(1));
        });

        Self { sender, min_level }
    }

    /// Background thread that manages the log buffer
    fn logger_thread(receiver: Receiver<LogCommand>, capacity: usize) {
        let mut buffer = CircularBuffer::new(capacity);

        for cmd in receiver {
            match cmd {
                LogCommand::Log(entry) => buffer.push(entry),
                LogCommand::GetLogs(response_tx) => {
                    let _ = response_tx.send(buffer.to_vec());
                }
                LogCommand::Clear => buffer.clear(),
            }
        }
    }

    /// Record a message and mirror it to `tracing`
    pub fn log(&self, level: LogLevel, message: &str, source: &str) {
        match level {
            LogLevel::Error => tracing::error!(source, "{}", message),
            LogLevel::Warn => tracing::warn!(source, "{}", message),
            LogLevel::Info => tracing::info!(source, "{}", message),
            LogLevel::Debug => tracing::debug!(source, "{}", message),
        }

        if (level as u8) < self.min_level.load(Ordering::Relaxed) {
            return;
        }

        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            message: message.to_string(),
            source: source.to_string(),
        };

        // Non-blocking send (drops the entry if the channel is full)
        let _ = self.sender.try_send(LogCommand::Log(entry));
    }

    /// Set minimum level recorded in memory
    pub fn set_min_level(&self, level: LogLevel) {
        self.min_level.store(level as u8, Ordering::Relaxed);
    }

    pub fn get_min_level(&self) -> LogLevel {
        LogLevel::from_u8(self.min_level.load(Ordering::Relaxed))
    }

    pub fn get_logs(&self) -> Vec<LogEntry> {
        let (response_tx, response_rx) = bounded(1);
        if self.sender.send(LogCommand::GetLogs(response_tx)).is_ok() {
            response_rx.recv().unwrap_or_default()
        } else {
            Vec::new()
        }
    }

    pub fn clear_logs(&self) {
        let _ = self.sender.send(LogCommand::Clear);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

// Global logger instance
lazy_static::lazy_static! {
    pub static ref LOGGER: Logger = Logger::new();
}

/// Install a `tracing` fmt subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Progress notice emitter bound to a component's silence flag.
///
/// Notices are observable side effects only; nothing downstream reads them back.
#[derive(Debug, Clone, Copy)]
pub struct Notifier {
    silent: bool,
}

impl Notifier {
    pub fn new(silent: bool) -> Self {
        Self { silent }
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn notice(&self, message: &str) {
        if !self.silent {
            LOGGER.log(LogLevel::Info, message, "notice");
        }
    }
}

// Macro for easy logging
#[macro_export]
macro_rules! nexus_log {
    ($level:expr, $source:expr, $($arg:tt)*) => {
        {
            let message = format!($($arg)*);
            $crate::logger::LOGGER.log($level, &message, $source);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::Info,
            message: message.to_string(),
            source: "test".to_string(),
        }
    }

    #[test]
    fn test_circular_buffer_wraps_in_order() {
        let mut buffer = CircularBuffer::new(2);
        buffer.push(entry("a"));
        buffer.push(entry("b"));
        buffer.push(entry("c"));

        let messages: Vec<String> = buffer.to_vec().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["b", "c"]);

        buffer.clear();
        assert!(buffer.to_vec().is_empty());
    }

    #[test]
    fn test_logger_records_and_clears() {
        let logger = Logger::with_capacity(10);
        logger.log(LogLevel::Info, "first", "test");
        logger.log(LogLevel::Warn, "second", "test");

        let logs = logger.get_logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].message, "first");
        assert_eq!(logs[1].level, LogLevel::Warn);

        logger.clear_logs();
        assert!(logger.get_logs().is_empty());
    }

    #[test]
    fn test_min_level_filters_entries() {
        let logger = Logger::with_capacity(10);
        logger.set_min_level(LogLevel::Warn);
        assert_eq!(logger.get_min_level(), LogLevel::Warn);

        logger.log(LogLevel::Info, "dropped", "test");
        logger.log(LogLevel::Error, "kept", "test");

        let logs = logger.get_logs();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].message, "kept");
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("warn"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("verbose"), None);
        assert_eq!(LogLevel::Error.as_str(), "error");
    }

    #[test]
    fn test_silent_notifier_records_nothing() {
        let marker = "silent-notifier-marker-7f3a";
        Notifier::new(true).notice(marker);
        assert!(LOGGER.get_logs().iter().all(|e| !e.message.contains(marker)));

        let marker = "loud-notifier-marker-7f3a";
        Notifier::new(false).notice(marker);
        assert!(LOGGER.get_logs().iter().any(|e| e.message == marker));
    }
}
