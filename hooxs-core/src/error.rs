//! Error types for hooxs.
//!
//! Handlers and interceptors fail with a plain [`BoxError`]. A failed
//! invocation surfaces as a [`CallError`], which keeps the original error
//! untouched: its `Display` and `source()` are those of the error the handler
//! produced, and [`CallError::into_source`] hands the box back for downcasting.

use std::time::Duration;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error returned by a failed hook invocation.
#[derive(Error, Debug)]
pub enum CallError {
    /// A handler failed. Remaining handlers for the call did not run.
    #[error(transparent)]
    Handler(BoxError),

    /// A "before" or "after" interceptor failed.
    #[error(transparent)]
    Interceptor(BoxError),

    /// A handler registered under the hook expects a different argument type.
    #[error("hook `{hook}` has handlers for `{expected}`, but was called with `{found}`")]
    ArgsMismatch {
        /// Name of the invoked hook.
        hook: String,
        /// Argument type the mismatching handler was registered with.
        expected: &'static str,
        /// Argument type passed to the call.
        found: &'static str,
    },

    /// A handler did not settle within the configured limit.
    #[error("handler for hook `{hook}` timed out after {after:?}")]
    Timeout {
        /// Name of the invoked hook.
        hook: String,
        /// The configured limit.
        after: Duration,
    },
}

impl CallError {
    /// Returns `true` if a handler produced this error.
    pub fn is_handler(&self) -> bool {
        matches!(self, CallError::Handler(_))
    }

    /// Returns `true` if an interceptor produced this error.
    pub fn is_interceptor(&self) -> bool {
        matches!(self, CallError::Interceptor(_))
    }

    /// Borrow the error produced by the failing handler or interceptor.
    pub fn source_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            CallError::Handler(err) | CallError::Interceptor(err) => Some(&**err),
            _ => None,
        }
    }

    /// Unwrap the error produced by the failing handler or interceptor.
    ///
    /// Registry-level failures (argument mismatch, timeout) are returned boxed
    /// as themselves.
    pub fn into_source(self) -> BoxError {
        match self {
            CallError::Handler(err) | CallError::Interceptor(err) => err,
            other => Box::new(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error, PartialEq)]
    #[error("boom")]
    struct Boom;

    #[test]
    fn test_handler_error_is_transparent() {
        let err = CallError::Handler(Box::new(Boom));
        assert_eq!(err.to_string(), "boom");
        assert!(err.is_handler());
        assert!(!err.is_interceptor());

        let source = err.into_source();
        assert_eq!(source.downcast_ref::<Boom>(), Some(&Boom));
    }

    #[test]
    fn test_string_errors_keep_message() {
        let err = CallError::Interceptor("denied".into());
        assert_eq!(err.to_string(), "denied");
        assert_eq!(err.source_error().map(ToString::to_string).as_deref(), Some("denied"));
    }

    #[test]
    fn test_registry_errors_box_themselves() {
        let err = CallError::Timeout {
            hook: "build".into(),
            after: Duration::from_millis(5),
        };
        assert!(err.source_error().is_none());

        let boxed = err.into_source();
        assert!(matches!(
            boxed.downcast_ref::<CallError>(),
            Some(CallError::Timeout { .. })
        ));
    }
}
