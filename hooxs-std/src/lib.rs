//! # hooxs-std
//!
//! The hook registry of the hooxs framework.
//!
//! This crate provides:
//! - **Registry**: [`Hooks`], [`HooksBuilder`], [`Registration`]
//! - **Typed access**: [`TypedHook`] for hooks declared with `define_hooks!`
//! - **Standard interceptors**: [`LoggingInterceptor`](interceptors::LoggingInterceptor)
//! - **Testing utilities**: [`testing`]
//!
//! # Features
//!
//! - `tracing`: log registrations and run each call in a `hook_call` span
//! - `timeout`: bound each handler with `HooksBuilder::handler_timeout`

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use hooxs_core;

mod builder;
mod registration;
mod registry;
mod state;
mod typed;

pub mod interceptors;
pub mod testing;

pub use builder::HooksBuilder;
pub use registration::Registration;
pub use registry::Hooks;
pub use typed::TypedHook;
