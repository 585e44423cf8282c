//! Handles returned by registration, each able to undo exactly one entry.

use crate::{registry::Inner, state::Stage};
use hooxs_core::HandlerId;
use std::{any::Any, fmt, sync::Weak};

#[derive(Debug)]
enum Target {
    Noop,
    Handler { name: String, id: HandlerId },
    Interceptor { stage: Stage, id: HandlerId },
}

/// Removes the handler or interceptor it was returned for.
///
/// A `Registration` holds a weak back-reference to its registry, the name it
/// was registered under and the identity of the registered reference.
/// Dropping it does *not* unregister anything.
///
/// # Example
///
/// ```rust,ignore
/// let registration = hooks.register("build", handler);
/// registration.unregister();
/// registration.unregister(); // no-op
/// ```
pub struct Registration {
    registry: Weak<Inner>,
    target: Target,
    // Keeps the registered reference alive so its identity cannot be reused
    // by a later allocation.
    _pin: Option<Box<dyn Any + Send + Sync>>,
}

impl Registration {
    /// A registration that does nothing, returned for ignored input.
    pub fn noop() -> Self {
        Self {
            registry: Weak::new(),
            target: Target::Noop,
            _pin: None,
        }
    }

    pub(crate) fn handler<P: Any + Send + Sync>(
        registry: Weak<Inner>,
        name: &str,
        id: HandlerId,
        pin: P,
    ) -> Self {
        Self {
            registry,
            target: Target::Handler {
                name: name.to_owned(),
                id,
            },
            _pin: Some(Box::new(pin)),
        }
    }

    pub(crate) fn interceptor<P: Any + Send + Sync>(
        registry: Weak<Inner>,
        stage: Stage,
        id: HandlerId,
        pin: P,
    ) -> Self {
        Self {
            registry,
            target: Target::Interceptor { stage, id },
            _pin: Some(Box::new(pin)),
        }
    }

    /// Remove the registered entry.
    ///
    /// Returns `true` if an entry was removed. Calling this again, or after
    /// the registry was dropped or cleared, is a no-op returning `false`.
    pub fn unregister(&self) -> bool {
        let Some(inner) = self.registry.upgrade() else {
            return false;
        };
        match &self.target {
            Target::Noop => false,
            Target::Handler { name, id } => inner.remove_handler(name, *id),
            Target::Interceptor { stage, id } => inner.remove_interceptor(*stage, *id),
        }
    }

    /// Returns `true` if this registration was returned for ignored input.
    pub fn is_noop(&self) -> bool {
        matches!(self.target, Target::Noop)
    }

    /// The hook name a handler was registered under.
    pub fn hook(&self) -> Option<&str> {
        match &self.target {
            Target::Handler { name, .. } => Some(name),
            _ => None,
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}
