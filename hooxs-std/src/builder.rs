//! Builder for seeding a registry before it is shared.

use crate::{
    registry::Hooks,
    state::{HooksConfig, Stage, State},
};
use hooxs_core::{HookArgs, Interceptor, SharedHandler, SharedInterceptor};
#[cfg(feature = "timeout")]
use std::time::Duration;

/// Builder for constructing a [`Hooks`] registry.
///
/// Handlers and interceptors added here behave exactly like ones registered
/// on the built registry, in the order they were added. Unlike
/// [`Hooks::register`], seeding returns no [`Registration`]; use
/// [`Hooks::unregister`] with the handler to remove a seeded entry.
///
/// # Example
/// ```ignore
/// let hooks = Hooks::builder()
///     .hook("build:before", SharedHandler::from_fn(|_: &()| println!("building")))
///     .before(LoggingInterceptor::new())
///     .build();
/// ```
///
/// [`Registration`]: crate::Registration
#[derive(Default)]
pub struct HooksBuilder {
    state: State,
    config: HooksConfig,
}

impl HooksBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a handler for `name`.
    ///
    /// Empty names are skipped, as are handlers whose argument type differs
    /// from the one already seeded under `name`.
    pub fn hook<A: HookArgs>(mut self, name: impl AsRef<str>, handler: SharedHandler<A>) -> Self {
        let name = name.as_ref();
        if name.is_empty() {
            return self;
        }
        if let Err(expected) = self.state.push_handler(name, handler) {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                hook = name,
                expected,
                found = std::any::type_name::<A>(),
                "skipping seeded handler with a foreign argument type"
            );
            #[cfg(not(feature = "tracing"))]
            let _ = expected;
        }
        self
    }

    /// Add a "before" interceptor.
    pub fn before<I: Interceptor>(mut self, interceptor: I) -> Self {
        self.state
            .interceptors_mut(Stage::Before)
            .push(SharedInterceptor::new(interceptor));
        self
    }

    /// Add an "after" interceptor.
    pub fn after<I: Interceptor>(mut self, interceptor: I) -> Self {
        self.state
            .interceptors_mut(Stage::After)
            .push(SharedInterceptor::new(interceptor));
        self
    }

    /// Fail a call with [`CallError::Timeout`] when a single handler does not
    /// settle within `limit`.
    ///
    /// Must be awaited inside a Tokio runtime with the time driver enabled.
    ///
    /// [`CallError::Timeout`]: hooxs_core::CallError::Timeout
    #[cfg(feature = "timeout")]
    pub fn handler_timeout(mut self, limit: Duration) -> Self {
        self.config.handler_timeout = Some(limit);
        self
    }

    /// Get the number of seeded handler entries.
    pub fn len(&self) -> usize {
        self.state.handlers.values().map(Vec::len).sum()
    }

    /// Check if the builder has no handlers.
    pub fn is_empty(&self) -> bool {
        self.state.handlers.is_empty()
    }

    /// Build the registry.
    pub fn build(self) -> Hooks {
        Hooks::from_parts(self.state, self.config)
    }
}
