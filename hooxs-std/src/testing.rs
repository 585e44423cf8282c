//! Testing utilities for hooxs.
//!
//! This module provides utilities to make testing registries, handlers and
//! interceptors easier.
//!
//! # Features
//!
//! - [`CallLog`]: A shared, ordered record of what ran, with helpers that build
//!   recording handlers and interceptors
//! - [`CountingHandler`]: A handler that counts invocations
//! - [`FailingHandler`]: A handler that always fails with a fixed message

use hooxs_core::{BoxError, Handler, HookArgs, Interceptor, SharedHandler};
use parking_lot::Mutex;
use std::{
    fmt::Debug,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};
use thiserror::Error;

// ============================================================================
// Call Log
// ============================================================================

/// A shared log recording labels in the order handlers and interceptors ran.
///
/// Clones share the same log.
///
/// # Example
///
/// ```rust,ignore
/// let log = CallLog::new();
/// hooks.before(log.interceptor("before"));
/// hooks.register("x", log.handler::<()>("handler"));
///
/// hooks.call("x", &()).await?;
/// assert_eq!(log.entries(), ["before:x", "handler"]);
/// ```
#[derive(Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a label.
    pub fn record(&self, label: impl Into<String>) {
        self.entries.lock().push(label.into());
    }

    /// Get a clone of the recorded labels.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    /// Get the number of recorded labels.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Clear all recorded labels.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// A handler recording `label` each time it runs.
    pub fn handler<A: HookArgs>(&self, label: &str) -> SharedHandler<A> {
        let log = self.clone();
        let label = label.to_owned();
        SharedHandler::from_fn(move |_: &A| log.record(label.as_str()))
    }

    /// A handler recording `label(args)` each time it runs.
    pub fn handler_with_args<A: HookArgs + Debug>(&self, label: &str) -> SharedHandler<A> {
        let log = self.clone();
        let label = label.to_owned();
        SharedHandler::from_fn(move |args: &A| log.record(format!("{label}({args:?})")))
    }

    /// A handler recording `label` and then failing with `message`.
    pub fn failing_handler<A: HookArgs>(&self, label: &str, message: &str) -> SharedHandler<A> {
        let log = self.clone();
        let label = label.to_owned();
        let failure = FailingHandler::new(message);
        SharedHandler::from_fn(move |_: &A| {
            log.record(label.as_str());
            failure.fail()
        })
    }

    /// An interceptor recording `label:hook` each time it runs.
    pub fn interceptor(&self, label: &str) -> impl Interceptor + use<> {
        let log = self.clone();
        let label = label.to_owned();
        move |hook: &str| log.record(format!("{label}:{hook}"))
    }
}

impl Debug for CallLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CallLog").field(&*self.entries.lock()).finish()
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingHandler::new();
/// hooks.register("x", SharedHandler::<()>::new(counter.clone()));
///
/// hooks.call("x", &()).await?;
/// assert_eq!(counter.count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl<A: HookArgs> Handler<A> for CountingHandler {
    async fn call(&self, _args: &A) -> Result<(), BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Failing Handler
// ============================================================================

/// The error produced by [`FailingHandler`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TestFailure(pub String);

/// A handler that always fails with [`TestFailure`].
#[derive(Clone, Debug)]
pub struct FailingHandler {
    message: String,
}

impl FailingHandler {
    /// Create a handler failing with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn fail(&self) -> Result<(), TestFailure> {
        Err(TestFailure(self.message.clone()))
    }
}

impl<A: HookArgs> Handler<A> for FailingHandler {
    async fn call(&self, _args: &A) -> Result<(), BoxError> {
        self.fail().map_err(Into::into)
    }
}
