//! Marker trait for hook arguments.

/// A marker trait for values passed to hook handlers.
///
/// Arguments must be `Send + Sync + 'static` so a call can be awaited from any
/// task. Hooks without arguments use `()`; several arguments travel as a tuple
/// or a struct.
///
/// # Example
///
/// ```rust,ignore
/// struct BuildFinished { files: Vec<String> }
///
/// hooks.call("build:after", &BuildFinished { files }).await?;
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be passed as hook arguments",
    label = "must be `Send + Sync + 'static`",
    note = "Hook arguments are shared by reference with every handler of the call."
)]
pub trait HookArgs: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> HookArgs for T {}
