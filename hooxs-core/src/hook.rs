//! # Typed hooks
//!
//! A [`Hook`] ties a hook name to the argument type its handlers receive, so
//! registration and invocation through a typed accessor are checked by the
//! compiler instead of at call time.
//!
//! Hook types are usually zero-sized markers declared with [`define_hooks!`].
//!
//! [`define_hooks!`]: crate::define_hooks

use crate::args::HookArgs;

/// A named extension point with a fixed argument type.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a hook",
    label = "missing `Hook` implementation",
    note = "Declare hooks with `define_hooks!` or implement `Hook` with a `NAME` and `Args`."
)]
pub trait Hook: Send + Sync + 'static {
    /// The name handlers are registered and called under.
    const NAME: &'static str;

    /// The arguments every handler of this hook receives.
    type Args: HookArgs;
}

/// Declares marker types implementing [`Hook`].
///
/// # Example
///
/// ```rust,ignore
/// hooxs::define_hooks! {
///     /// Fired before a build starts.
///     pub BuildBefore = "build:before" => ();
///     /// Fired with the list of emitted files.
///     pub BuildAfter = "build:after" => Vec<String>;
/// }
///
/// hooks.hook::<BuildAfter>().call(&files).await?;
/// ```
#[macro_export]
macro_rules! define_hooks {
    ($(
        $(#[$meta:meta])*
        $vis:vis $ident:ident = $name:literal => $args:ty;
    )*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
            $vis struct $ident;

            impl $crate::Hook for $ident {
                const NAME: &'static str = $name;
                type Args = $args;
            }
        )*
    };
}
