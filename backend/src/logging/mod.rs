//! Redacting diagnostics logging.
//!
//! Purpose: give every server-side code path one façade that sanitizes
//! structured payloads before emission and is silenced outside development
//! builds. Suppression is carried by an explicit per-channel policy value
//! threaded to each component at construction time; no process-wide output
//! state is mutated.
//!
//! Public surface:
//! - [`BuildMode`] — environment-resolved development/production flag.
//! - [`ChannelPolicy`] — per-channel enable map derived from build mode.
//! - [`DiagnosticsLogger`] — the redacting façade.
//! - [`RedactionPolicy`] — configurable sensitive-key substring list.
//! - [`LogSink`], [`TracingSink`], [`MemorySink`] — output destinations.

pub mod sanitize;
mod sink;

use std::sync::Arc;

use serde_json::Value;
use tracing_subscriber::EnvFilter;

pub use sanitize::{
    MAX_SANITIZE_DEPTH, REDACTED_MARKER, RedactionPolicy, SANITIZE_FALLBACK, SanitizeError,
};
pub use sink::{LogChannel, LogSink, MemorySink, TracingSink};

/// Build mode resolved from the execution environment.
///
/// # Examples
/// ```
/// use backend::logging::BuildMode;
///
/// assert_eq!(BuildMode::from_value("development"), BuildMode::Development);
/// assert_eq!(BuildMode::from_value("production"), BuildMode::Production);
/// assert_eq!(BuildMode::from_value("staging"), BuildMode::Production);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    /// Development build: diagnostics flow to the sink.
    Development,
    /// Any other build: the façade is silenced.
    Production,
}

impl BuildMode {
    /// Environment variable consulted by [`BuildMode::from_env`].
    pub const ENV_VAR: &'static str = "APP_ENV";

    /// Resolve the build mode from `APP_ENV`, once, at process start.
    ///
    /// When the variable is unset, debug builds default to development and
    /// release builds to production.
    pub fn from_env() -> Self {
        std::env::var(Self::ENV_VAR)
            .map_or_else(|_| Self::default_for_build(), |value| Self::from_value(&value))
    }

    /// Classify an environment value; anything but `development` is
    /// production.
    pub fn from_value(value: &str) -> Self {
        if value.eq_ignore_ascii_case("development") {
            Self::Development
        } else {
            Self::Production
        }
    }

    fn default_for_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }

    /// Whether this is a development build.
    pub fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Per-channel enable map threaded to the logger at construction.
///
/// Replaces the legacy approach of overriding process-wide output
/// functions at startup: the flags travel with the logger value, and the
/// sink itself stays writable for direct error-channel output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelPolicy {
    log: bool,
    debug: bool,
    info: bool,
    warn: bool,
    error: bool,
}

impl ChannelPolicy {
    /// Policy for the given build mode.
    ///
    /// Development enables `log`, `warn`, and `error`; `info` and `debug`
    /// stay reserved. Production silences every channel, `error` included.
    pub const fn for_build_mode(mode: BuildMode) -> Self {
        match mode {
            BuildMode::Development => Self {
                log: true,
                debug: false,
                info: false,
                warn: true,
                error: true,
            },
            BuildMode::Production => Self::silenced(),
        }
    }

    /// Policy with every channel disabled.
    pub const fn silenced() -> Self {
        Self {
            log: false,
            debug: false,
            info: false,
            warn: false,
            error: false,
        }
    }

    /// Whether `channel` may reach the sink.
    pub const fn enabled(self, channel: LogChannel) -> bool {
        match channel {
            LogChannel::Log => self.log,
            LogChannel::Debug => self.debug,
            LogChannel::Info => self.info,
            LogChannel::Warn => self.warn,
            LogChannel::Error => self.error,
        }
    }
}

/// Redacting logger façade.
///
/// Cheap to clone; components receive their own handle at construction
/// time. Payload-carrying call forms sanitize through the embedded
/// [`RedactionPolicy`] before anything reaches the sink. The façade never
/// raises: an unserialisable payload degrades to a fixed fallback string.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use backend::logging::{
///     BuildMode, ChannelPolicy, DiagnosticsLogger, MemorySink, RedactionPolicy,
/// };
/// use serde_json::json;
///
/// let sink = Arc::new(MemorySink::new());
/// let logger = DiagnosticsLogger::new(
///     ChannelPolicy::for_build_mode(BuildMode::Development),
///     RedactionPolicy::default(),
///     sink.clone(),
/// );
/// logger.warn_payload("sign-in failed", &json!({"password": "pw"}));
/// assert!(sink.entries()[0].1.contains("[REDACTED]"));
/// ```
#[derive(Clone)]
pub struct DiagnosticsLogger {
    policy: ChannelPolicy,
    redaction: RedactionPolicy,
    sink: Arc<dyn LogSink>,
}

impl DiagnosticsLogger {
    /// Build a logger from explicit policy, redaction rules, and sink.
    pub fn new(policy: ChannelPolicy, redaction: RedactionPolicy, sink: Arc<dyn LogSink>) -> Self {
        Self {
            policy,
            redaction,
            sink,
        }
    }

    /// Convenience constructor: default redaction rules, tracing-backed
    /// sink, channel policy derived from `mode`.
    pub fn for_build_mode(mode: BuildMode) -> Self {
        Self::new(
            ChannelPolicy::for_build_mode(mode),
            RedactionPolicy::default(),
            Arc::new(TracingSink),
        )
    }

    /// Emit a plain line on the `log` channel.
    pub fn log(&self, message: &str) {
        self.emit(LogChannel::Log, message, None);
    }

    /// Emit a message plus sanitized payload on the `log` channel.
    pub fn log_payload(&self, message: &str, payload: &Value) {
        self.emit(LogChannel::Log, message, Some(payload));
    }

    /// Emit a plain line on the `warn` channel.
    pub fn warn(&self, message: &str) {
        self.emit(LogChannel::Warn, message, None);
    }

    /// Emit a message plus sanitized payload on the `warn` channel.
    pub fn warn_payload(&self, message: &str, payload: &Value) {
        self.emit(LogChannel::Warn, message, Some(payload));
    }

    /// Emit a plain line on the `error` channel.
    pub fn error(&self, message: &str) {
        self.emit(LogChannel::Error, message, None);
    }

    /// Emit a message plus sanitized payload on the `error` channel.
    pub fn error_payload(&self, message: &str, payload: &Value) {
        self.emit(LogChannel::Error, message, Some(payload));
    }

    /// Reserved call form; disabled by every built-in policy.
    pub fn info(&self, message: &str) {
        self.emit(LogChannel::Info, message, None);
    }

    /// Reserved call form; disabled by every built-in policy.
    pub fn debug(&self, message: &str) {
        self.emit(LogChannel::Debug, message, None);
    }

    fn emit(&self, channel: LogChannel, message: &str, payload: Option<&Value>) {
        if !self.policy.enabled(channel) {
            return;
        }
        match payload {
            None => self.sink.write(channel, message),
            Some(payload) => {
                let rendered = self.redaction.render(payload);
                self.sink.write(channel, &format!("{message} {rendered}"));
            }
        }
    }
}

/// Install the process-wide tracing subscriber: JSON lines, `RUST_LOG`
/// filtering. Call once from the composition root before anything logs.
pub fn init_tracing() {
    if let Err(error) = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        tracing::warn!(error = %error, "tracing init failed");
    }
}
