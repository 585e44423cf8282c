//! # hooxs - Typed Hook Registry
//!
//! `hooxs` lets a program declare named extension points ("hooks"), register
//! any number of handlers per name, and invoke them in registration order.
//! Global "before" and "after" interceptors observe every invocation,
//! whatever the name.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hooxs::prelude::*;
//!
//! hooxs::define_hooks! {
//!     pub BuildBefore = "build:before" => ();
//!     pub BuildAfter = "build:after" => Vec<String>;
//! }
//!
//! let hooks = Hooks::new();
//! hooks.before(|hook: &str| println!("running {hook}"));
//!
//! let registration = hooks.hook::<BuildAfter>().register(SharedHandler::new(
//!     |files: &Vec<String>| {
//!         let count = files.len();
//!         async move { upload(count).await }
//!     },
//! ));
//!
//! hooks.hook::<BuildAfter>().call(&files).await?;
//! registration.unregister();
//! ```
//!
//! ## Guarantees
//!
//! - Handlers of one call run serially: handler N+1 starts only after
//!   handler N settled, whether it is synchronous or asynchronous.
//! - A failing handler stops the remaining handlers of that call; "after"
//!   interceptors still run, then the handler's error is returned unchanged.
//! - Each call works on a snapshot taken when it starts.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use hooxs_core::{
    // Error types
    BoxError,
    CallError,
    // Handlers
    DynHandler,
    FromFn,
    Handler,
    HandlerId,
    // Typed hooks
    Hook,
    HookArgs,
    // Interceptors
    Interceptor,
    IntoOutcome,
    SharedHandler,
    SharedInterceptor,
    define_hooks,
};

// Registry
pub use hooxs_std::{Hooks, HooksBuilder, Registration, TypedHook};

/// Standard interceptor implementations.
pub mod interceptors {
    pub use hooxs_std::interceptors::{LogLevel, LoggingInterceptor};
}

/// Testing utilities.
pub mod testing {
    pub use hooxs_std::testing::{CallLog, CountingHandler, FailingHandler, TestFailure};
}

/// Prelude module - common imports for hooxs.
///
/// # Usage
///
/// ```rust,ignore
/// use hooxs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, CallError, Handler, Hook, Hooks, Interceptor, Registration, SharedHandler,
        TypedHook,
    };
}
