//! Compile-time checked access to a single hook.

use crate::{registration::Registration, registry::Hooks};
use hooxs_core::{CallError, Hook, SharedHandler};
use std::{fmt, marker::PhantomData};

/// A view of a [`Hooks`] registry restricted to the hook `H`.
///
/// Every operation forwards to the string-keyed API under `H::NAME`, with
/// `H::Args` fixed as the argument type.
///
/// # Example
///
/// ```rust,ignore
/// hooxs::define_hooks! {
///     pub BuildAfter = "build:after" => Vec<String>;
/// }
///
/// let build_after = hooks.hook::<BuildAfter>();
/// build_after.register(SharedHandler::from_fn(|files: &Vec<String>| { ... }));
/// build_after.call(&files).await?;
/// ```
pub struct TypedHook<'a, H: Hook> {
    hooks: &'a Hooks,
    _hook: PhantomData<fn() -> H>,
}

impl<'a, H: Hook> TypedHook<'a, H> {
    pub(crate) fn new(hooks: &'a Hooks) -> Self {
        Self {
            hooks,
            _hook: PhantomData,
        }
    }

    /// The hook's name.
    pub fn name(&self) -> &'static str {
        H::NAME
    }

    /// Register a handler for this hook.
    pub fn register(&self, handler: SharedHandler<H::Args>) -> Registration {
        self.hooks.register(H::NAME, handler)
    }

    /// Remove one occurrence of `handler`.
    pub fn unregister(&self, handler: &SharedHandler<H::Args>) {
        self.hooks.unregister(H::NAME, handler);
    }

    /// Remove every handler of this hook.
    pub fn clear(&self) {
        self.hooks.unregister_hook(H::NAME);
    }

    /// Number of handler entries.
    pub fn count(&self) -> usize {
        self.hooks.handler_count(H::NAME)
    }

    /// The registered handlers, in order.
    pub fn handlers(&self) -> Vec<SharedHandler<H::Args>> {
        self.hooks.handlers(H::NAME).unwrap_or_default()
    }

    /// Invoke the hook. See [`Hooks::call`].
    pub async fn call(&self, args: &H::Args) -> Result<(), CallError> {
        self.hooks.call(H::NAME, args).await
    }
}

impl<H: Hook> Clone for TypedHook<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H: Hook> Copy for TypedHook<'_, H> {}

impl<H: Hook> fmt::Debug for TypedHook<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedHook")
            .field("name", &H::NAME)
            .field("handlers", &self.count())
            .finish()
    }
}
