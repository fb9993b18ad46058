//! Channelized output sinks behind the diagnostics logger.
//!
//! The sink itself is never gated by build mode: channel suppression is
//! the façade's job, so a component holding the sink can still write to
//! the error channel directly.

use std::sync::{Mutex, PoisonError};

/// Conventional output channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogChannel {
    /// General diagnostic output.
    Log,
    /// Verbose developer output; reserved, never emitted by built-in policies.
    Debug,
    /// Informational output; reserved, never emitted by built-in policies.
    Info,
    /// Recoverable anomalies.
    Warn,
    /// Failures.
    Error,
}

impl LogChannel {
    /// Conventional channel name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Channelized text-output destination.
pub trait LogSink: Send + Sync {
    /// Write one rendered line to `channel`.
    fn write(&self, channel: LogChannel, line: &str);
}

/// Forwards each channel to the corresponding `tracing` level.
///
/// The `log` channel maps to the `info` level; there is no finer match in
/// the tracing vocabulary.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, channel: LogChannel, line: &str) {
        match channel {
            LogChannel::Log | LogChannel::Info => tracing::info!("{line}"),
            LogChannel::Debug => tracing::debug!("{line}"),
            LogChannel::Warn => tracing::warn!("{line}"),
            LogChannel::Error => tracing::error!("{line}"),
        }
    }
}

/// Captures writes for assertions in tests and development tooling.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<(LogChannel, String)>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every `(channel, line)` pair written so far.
    pub fn entries(&self) -> Vec<(LogChannel, String)> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Lines written to `channel`.
    pub fn lines_for(&self, channel: LogChannel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(written, _)| *written == channel)
            .map(|(_, line)| line)
            .collect()
    }
}

impl LogSink for MemorySink {
    fn write(&self, channel: LogChannel, line: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((channel, line.to_owned()));
    }
}
