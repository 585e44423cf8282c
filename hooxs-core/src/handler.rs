//! # Handlers
//!
//! A handler is the unit of work registered against a hook name. It receives
//! a reference to the arguments passed to `call` and settles with `Ok(())` or
//! a failure.
//!
//! # Usage Patterns
//!
//! 1. **Async closure**: `|args: &Args| async move { ... }` implements
//!    [`Handler`] directly.
//! 2. **Synchronous closure**: `SharedHandler::from_fn(|args: &Args| { ... })`.
//! 3. **Struct implementation**: `impl Handler<Args> for MyHandler`.
//!
//! Registries store handlers as [`SharedHandler`], a reference-counted handle
//! whose allocation is its identity: unregistering compares handles by
//! pointer, never by value.

use crate::{args::HookArgs, error::BoxError, outcome::IntoOutcome};
use futures::future::BoxFuture;
use std::{fmt, future::Future, sync::Arc};

/// An async callable registered against a hook name.
///
/// This trait uses native `async fn` for static dispatch. Registries store
/// handlers through the object-safe [`DynHandler`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle hook arguments of type `{A}`",
    label = "missing `Handler<{A}>` implementation",
    note = "Use an async closure taking `&{A}`, or wrap a synchronous closure with `SharedHandler::from_fn`."
)]
pub trait Handler<A: HookArgs>: Send + Sync + 'static {
    /// Run the handler with the call's arguments.
    fn call(&self, args: &A) -> impl Future<Output = Result<(), BoxError>> + Send;
}

/// Dynamic object-safe version of [`Handler`].
pub trait DynHandler<A: HookArgs>: Send + Sync + 'static {
    /// Run the handler (dynamic dispatch version).
    fn call_dyn<'a>(&'a self, args: &'a A) -> BoxFuture<'a, Result<(), BoxError>>;
}

// Blanket implementation: Any type implementing Handler implements DynHandler automatically.
impl<A: HookArgs, T: Handler<A>> DynHandler<A> for T {
    fn call_dyn<'a>(&'a self, args: &'a A) -> BoxFuture<'a, Result<(), BoxError>> {
        Box::pin(self.call(args))
    }
}

// Blanket impl for async closures
impl<F, A, Fut, R> Handler<A> for F
where
    A: HookArgs,
    F: Fn(&A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send,
    R: IntoOutcome,
{
    async fn call(&self, args: &A) -> Result<(), BoxError> {
        (self)(args).await.into_outcome()
    }
}

/// Adapter running a synchronous closure as a [`Handler`].
///
/// Created by [`SharedHandler::from_fn`].
pub struct FromFn<F>(F);

impl<F, A, R> Handler<A> for FromFn<F>
where
    A: HookArgs,
    F: Fn(&A) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    fn call(&self, args: &A) -> impl Future<Output = Result<(), BoxError>> + Send {
        std::future::ready((self.0)(args).into_outcome())
    }
}

/// Identity of a registered handler or interceptor reference.
///
/// Two handles share an id exactly when they point at the same allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(usize);

impl HandlerId {
    pub(crate) fn of<T: ?Sized>(ptr: &Arc<T>) -> Self {
        Self(Arc::as_ptr(ptr).cast::<()>() as usize)
    }
}

/// A shared, reference-counted handler.
///
/// Cloning is O(1) and keeps the identity: every clone unregisters the same
/// entry.
///
/// # Example
///
/// ```rust,ignore
/// let log = SharedHandler::from_fn(|files: &Vec<String>| {
///     println!("built {} files", files.len());
/// });
///
/// hooks.register("build:after", log.clone());
/// hooks.unregister("build:after", &log);
/// ```
pub struct SharedHandler<A: HookArgs>(Arc<dyn DynHandler<A>>);

impl<A: HookArgs> SharedHandler<A> {
    /// Wrap any [`Handler`], including async closures.
    pub fn new<H: Handler<A>>(handler: H) -> Self {
        Self(Arc::new(handler))
    }

    /// Wrap a synchronous closure.
    pub fn from_fn<F, R>(f: F) -> Self
    where
        F: Fn(&A) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        Self::new(FromFn(f))
    }

    /// The identity used for unregistration.
    pub fn id(&self) -> HandlerId {
        HandlerId::of(&self.0)
    }

    /// Returns `true` if both handles refer to the same handler.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }

    /// Run the handler.
    pub fn call<'a>(&'a self, args: &'a A) -> BoxFuture<'a, Result<(), BoxError>> {
        self.0.call_dyn(args)
    }
}

impl<A: HookArgs> Clone for SharedHandler<A> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<A: HookArgs> fmt::Debug for SharedHandler<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedHandler").field(&self.id()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    struct Adder(Arc<AtomicUsize>);

    impl Handler<usize> for Adder {
        async fn call(&self, args: &usize) -> Result<(), BoxError> {
            self.0.fetch_add(*args, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_struct_handler() {
        let total = Arc::new(AtomicUsize::new(0));
        let handler = SharedHandler::<usize>::new(Adder(total.clone()));

        handler.call(&3).await.unwrap();
        handler.call(&4).await.unwrap();
        assert_eq!(total.load(Ordering::SeqCst), 7);
    }

    #[tokio::test]
    async fn test_async_closure_failure() {
        let handler = SharedHandler::new(|_: &()| async { Err::<(), _>("boom") });

        let err = handler.call(&()).await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[tokio::test]
    async fn test_sync_closure() {
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = seen.clone();
        let handler = SharedHandler::from_fn(move |n: &usize| {
            seen_clone.store(*n, Ordering::SeqCst);
        });

        handler.call(&42).await.unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 42);
    }

    #[test]
    fn test_identity_follows_allocation() {
        let a = SharedHandler::from_fn(|_: &()| {});
        let b = SharedHandler::from_fn(|_: &()| {});

        assert!(a.ptr_eq(&a.clone()));
        assert!(!a.ptr_eq(&b));
        assert_ne!(a.id(), b.id());
    }
}
