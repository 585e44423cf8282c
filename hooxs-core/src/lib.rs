//! # hooxs-core
//!
//! Core traits for the hooxs hook registry.
//!
//! This crate has minimal dependencies and is meant to be imported by
//! libraries that only declare hooks or ship handlers, without pulling in the
//! registry from `hooxs-std`.
//!
//! # Building Blocks
//!
//! - [`Hook`]: a named extension point with a fixed argument type, usually
//!   declared with [`define_hooks!`]
//! - [`Handler`]: an async callable registered against a hook name, stored as
//!   a [`SharedHandler`] whose allocation is its identity
//! - [`Interceptor`]: a synchronous observer run before or after every
//!   invocation, stored as a [`SharedInterceptor`]
//! - [`IntoOutcome`]: what handlers and interceptors may return
//!
//! # Error Types
//!
//! - [`BoxError`] - What handlers and interceptors fail with
//! - [`CallError`] - A failed invocation, carrying the original error

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod args;
mod error;
mod handler;
mod hook;
mod interceptor;
mod outcome;

// Re-exports
pub use args::HookArgs;
pub use error::{BoxError, CallError};
pub use handler::{DynHandler, FromFn, Handler, HandlerId, SharedHandler};
pub use hook::Hook;
pub use interceptor::{Interceptor, SharedInterceptor};
pub use outcome::IntoOutcome;
