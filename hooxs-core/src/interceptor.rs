//! Global interceptors observing every hook invocation.

use crate::{error::BoxError, handler::HandlerId, outcome::IntoOutcome};
use std::{fmt, sync::Arc};

/// A callable run before or after every hook invocation, whatever the name.
///
/// Interceptors observe; they receive only the hook name and are synchronous.
/// Closures `Fn(&str)` returning `()` or `Result<(), E>` implement this trait.
pub trait Interceptor: Send + Sync + 'static {
    /// Observe an invocation of `hook`.
    fn intercept(&self, hook: &str) -> Result<(), BoxError>;
}

impl<F, R> Interceptor for F
where
    F: Fn(&str) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    fn intercept(&self, hook: &str) -> Result<(), BoxError> {
        (self)(hook).into_outcome()
    }
}

/// A shared, reference-counted interceptor.
pub struct SharedInterceptor(Arc<dyn Interceptor>);

impl SharedInterceptor {
    /// Wrap an interceptor.
    pub fn new<I: Interceptor>(interceptor: I) -> Self {
        Self(Arc::new(interceptor))
    }

    /// The identity used for removal.
    pub fn id(&self) -> HandlerId {
        HandlerId::of(&self.0)
    }

    /// Observe an invocation of `hook`.
    pub fn intercept(&self, hook: &str) -> Result<(), BoxError> {
        self.0.intercept(hook)
    }
}

impl Clone for SharedInterceptor {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl fmt::Debug for SharedInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedInterceptor").field(&self.id()).finish()
    }
}
