//! Logging interceptor for hook observation.

use hooxs_core::{BoxError, Interceptor};

/// Verbosity of [`LoggingInterceptor`] events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// `TRACE`
    Trace,
    /// `DEBUG`
    #[default]
    Debug,
    /// `INFO`
    Info,
}

/// An interceptor that logs every observed hook name.
///
/// Register it with `before` or `after`; the `phase` label tells the two
/// apart in the output. Without the `tracing` feature it does nothing.
#[derive(Debug, Clone)]
pub struct LoggingInterceptor {
    phase: &'static str,
    level: LogLevel,
}

impl LoggingInterceptor {
    /// Log at `DEBUG` with the given phase label, e.g. `"before"`.
    pub const fn new(phase: &'static str) -> Self {
        Self {
            phase,
            level: LogLevel::Debug,
        }
    }

    /// Change the verbosity.
    pub const fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// The phase label.
    pub fn phase(&self) -> &'static str {
        self.phase
    }
}

impl Interceptor for LoggingInterceptor {
    fn intercept(&self, hook: &str) -> Result<(), BoxError> {
        #[cfg(feature = "tracing")]
        {
            let phase = self.phase;
            match self.level {
                LogLevel::Trace => tracing::trace!(hook, phase, "hook invoked"),
                LogLevel::Debug => tracing::debug!(hook, phase, "hook invoked"),
                LogLevel::Info => tracing::info!(hook, phase, "hook invoked"),
            }
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = hook; // Suppress unused warning
        }
        Ok(())
    }
}
