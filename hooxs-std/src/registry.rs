//! The hook registry.
//!
//! [`Hooks`] maps hook names to ordered handler sequences and keeps two
//! ordered interceptor collections that observe every invocation. It is a
//! cheap `Arc` handle: clones share the same registry, so handlers can hold
//! one and call back into it.
//!
//! # Invocation protocol
//!
//! [`Hooks::call`] snapshots what it will run, then:
//!
//! 1. runs every "before" interceptor in order; a failure aborts the call,
//! 2. runs the handlers serially, awaiting each before starting the next; a
//!    failure aborts the remaining handlers,
//! 3. runs every "after" interceptor in order, even when a handler failed,
//! 4. returns the handler failure if there was one, else the first "after"
//!    interceptor failure, else `Ok(())`.
//!
//! Registrations made while a call is in flight are seen by later calls only.

use crate::{
    builder::HooksBuilder,
    registration::Registration,
    state::{HooksConfig, Snapshot, Stage, State},
    typed::TypedHook,
};
use futures::future::BoxFuture;
use hooxs_core::{
    BoxError, CallError, HandlerId, Hook, HookArgs, Interceptor, SharedHandler, SharedInterceptor,
};
use parking_lot::RwLock;
use std::{
    fmt,
    future::Future,
    sync::{Arc, Weak},
};

/// Shared registry state behind every [`Hooks`] clone.
pub(crate) struct Inner {
    state: RwLock<State>,
    config: HooksConfig,
}

impl Inner {
    pub(crate) fn remove_handler(&self, name: &str, id: HandlerId) -> bool {
        let removed = self.state.write().remove_handler(name, id);
        #[cfg(feature = "tracing")]
        tracing::trace!(hook = name, removed, "handler unregistered");
        removed
    }

    pub(crate) fn remove_interceptor(&self, stage: Stage, id: HandlerId) -> bool {
        let removed = self.state.write().remove_interceptor(stage, id);
        #[cfg(feature = "tracing")]
        tracing::trace!(?stage, removed, "interceptor removed");
        removed
    }

    async fn run<A: HookArgs>(
        &self,
        name: &str,
        snapshot: Snapshot<A>,
        args: &A,
    ) -> Result<(), CallError> {
        for interceptor in &snapshot.before {
            interceptor.intercept(name).map_err(CallError::Interceptor)?;
        }

        let outcome = self.run_handlers(name, &snapshot.handlers, args).await;

        let after = snapshot
            .after
            .iter()
            .try_for_each(|interceptor| interceptor.intercept(name))
            .map_err(CallError::Interceptor);

        outcome.and(after)
    }

    async fn run_handlers<A: HookArgs>(
        &self,
        name: &str,
        handlers: &[SharedHandler<A>],
        args: &A,
    ) -> Result<(), CallError> {
        for handler in handlers {
            if let Err(err) = self.settle(name, handler.call(args)).await {
                #[cfg(feature = "tracing")]
                tracing::warn!(hook = name, error = %err, "hook handler failed");
                return Err(err);
            }
        }
        Ok(())
    }

    async fn settle(
        &self,
        name: &str,
        completion: BoxFuture<'_, Result<(), BoxError>>,
    ) -> Result<(), CallError> {
        #[cfg(feature = "timeout")]
        {
            if let Some(limit) = self.config.handler_timeout {
                return match tokio::time::timeout(limit, completion).await {
                    Ok(result) => result.map_err(CallError::Handler),
                    Err(_) => Err(CallError::Timeout {
                        hook: name.to_owned(),
                        after: limit,
                    }),
                };
            }
        }
        #[cfg(not(feature = "timeout"))]
        {
            let _ = name; // Only named in timeout errors
        }
        completion.await.map_err(CallError::Handler)
    }
}

#[cfg(feature = "tracing")]
fn instrument<F: Future>(name: &str, call: F) -> tracing::instrument::Instrumented<F> {
    use tracing::Instrument;
    call.instrument(tracing::debug_span!("hook_call", hook = %name))
}

#[cfg(not(feature = "tracing"))]
fn instrument<F: Future>(_name: &str, call: F) -> F {
    call
}

/// A registry of named hooks and global interceptors.
///
/// # Example
/// ```ignore
/// let hooks = Hooks::new();
///
/// hooks.before(|hook: &str| println!("-> {hook}"));
/// let registration = hooks.register(
///     "build:after",
///     SharedHandler::from_fn(|files: &Vec<String>| println!("{} files", files.len())),
/// );
///
/// hooks.call("build:after", &files).await?;
/// registration.unregister();
/// ```
#[derive(Clone)]
pub struct Hooks {
    inner: Arc<Inner>,
}

impl Hooks {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::from_parts(State::default(), HooksConfig::default())
    }

    /// Start building a registry with seeded handlers, interceptors or options.
    pub fn builder() -> HooksBuilder {
        HooksBuilder::new()
    }

    /// Create a registry seeded with one handler per name.
    ///
    /// Entries with an empty name are skipped, as [`register`](Self::register)
    /// would skip them.
    pub fn with_handlers<A, K, I>(initial: I) -> Self
    where
        A: HookArgs,
        K: AsRef<str>,
        I: IntoIterator<Item = (K, SharedHandler<A>)>,
    {
        initial
            .into_iter()
            .fold(HooksBuilder::new(), |builder, (name, handler)| {
                builder.hook(name.as_ref(), handler)
            })
            .build()
    }

    pub(crate) fn from_parts(state: State, config: HooksConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: RwLock::new(state),
                config,
            }),
        }
    }

    fn downgrade(&self) -> Weak<Inner> {
        Arc::downgrade(&self.inner)
    }

    /// Append `handler` to the sequence for `name`.
    ///
    /// The same handler may be registered several times; each registration is
    /// a separate entry. An empty `name`, or a name whose handlers take an
    /// argument type other than `A`, is ignored and yields a no-op
    /// [`Registration`].
    pub fn register<A: HookArgs>(&self, name: &str, handler: SharedHandler<A>) -> Registration {
        if name.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!("ignoring handler registered with an empty hook name");
            return Registration::noop();
        }

        let id = handler.id();
        let pushed = self.inner.state.write().push_handler(name, handler.clone());
        if let Err(expected) = pushed {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                hook = name,
                expected,
                found = std::any::type_name::<A>(),
                "ignoring handler registered with a foreign argument type"
            );
            #[cfg(not(feature = "tracing"))]
            let _ = expected;
            return Registration::noop();
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(hook = name, handler = ?id, "handler registered");

        Registration::handler(self.downgrade(), name, id, handler)
    }

    /// Remove one occurrence of `handler` from the sequence for `name`.
    ///
    /// Unknown names and handlers are ignored. The name is dropped once its
    /// last handler is removed.
    pub fn unregister<A: HookArgs>(&self, name: &str, handler: &SharedHandler<A>) {
        self.inner.remove_handler(name, handler.id());
    }

    /// Remove every handler registered for `name`.
    pub fn unregister_hook(&self, name: &str) {
        let removed = self.inner.state.write().handlers.remove(name);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            hook = name,
            handlers = removed.as_ref().map_or(0, Vec::len),
            "hook cleared"
        );
        drop(removed);
    }

    /// Remove every handler for every name. Interceptors are kept.
    pub fn unregister_all(&self) {
        let removed = std::mem::take(&mut self.inner.state.write().handlers);
        #[cfg(feature = "tracing")]
        tracing::debug!(hooks = removed.len(), "all hooks cleared");
        drop(removed);
    }

    /// Run `interceptor` before the handlers of every call.
    pub fn before<I: Interceptor>(&self, interceptor: I) -> Registration {
        self.intercept(Stage::Before, SharedInterceptor::new(interceptor))
    }

    /// Run `interceptor` after the handlers of every call, including failed ones.
    pub fn after<I: Interceptor>(&self, interceptor: I) -> Registration {
        self.intercept(Stage::After, SharedInterceptor::new(interceptor))
    }

    fn intercept(&self, stage: Stage, interceptor: SharedInterceptor) -> Registration {
        let id = interceptor.id();
        self.inner
            .state
            .write()
            .interceptors_mut(stage)
            .push(interceptor.clone());

        #[cfg(feature = "tracing")]
        tracing::debug!(?stage, interceptor = ?id, "interceptor added");

        Registration::interceptor(self.downgrade(), stage, id, interceptor)
    }

    /// Invoke every handler registered for `name` with `args`.
    ///
    /// "Before" interceptors run first, then the handlers one after another,
    /// then the "after" interceptors, which also run when a handler failed.
    /// Interceptors run even when no handler is registered.
    pub async fn call<A: HookArgs>(&self, name: &str, args: &A) -> Result<(), CallError> {
        let snapshot = self.inner.state.read().snapshot::<A>(name)?;

        #[cfg(feature = "tracing")]
        tracing::trace!(hook = name, handlers = snapshot.handlers.len(), "calling hook");

        instrument(name, self.inner.run(name, snapshot, args)).await
    }

    /// Typed access to the hook `H`.
    pub fn hook<H: Hook>(&self) -> TypedHook<'_, H> {
        TypedHook::new(self)
    }

    /// Names with at least one handler, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.state.read().handlers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns `true` if `name` has at least one handler.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.state.read().handlers.contains_key(name)
    }

    /// Number of handler entries for `name`.
    pub fn handler_count(&self, name: &str) -> usize {
        self.inner
            .state
            .read()
            .handlers
            .get(name)
            .map_or(0, Vec::len)
    }

    /// The handlers registered for `name`, in order.
    ///
    /// Returns `None` if `name` has no handlers or its handlers take an
    /// argument type other than `A`.
    pub fn handlers<A: HookArgs>(&self, name: &str) -> Option<Vec<SharedHandler<A>>> {
        self.inner.state.read().handlers_of(name)
    }

    /// Number of "before" interceptors.
    pub fn before_count(&self) -> usize {
        self.inner.state.read().before.len()
    }

    /// Number of "after" interceptors.
    pub fn after_count(&self) -> usize {
        self.inner.state.read().after.len()
    }

    /// Returns `true` if no handler is registered for any name.
    pub fn is_empty(&self) -> bool {
        self.inner.state.read().handlers.is_empty()
    }
}

impl Default for Hooks {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.read();
        let mut hooks: Vec<(&str, usize)> = state
            .handlers
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.len()))
            .collect();
        hooks.sort_unstable();

        f.debug_struct("Hooks")
            .field("hooks", &hooks)
            .field("before", &state.before.len())
            .field("after", &state.after.len())
            .field("config", &self.inner.config)
            .finish()
    }
}
