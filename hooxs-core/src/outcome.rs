//! Outcome conversion for handler and interceptor return values.

use crate::error::BoxError;

/// Trait for converting a handler's or interceptor's return value into an
/// outcome.
///
/// # Default Implementations
///
/// - `()` → success
/// - `Result<(), E>` → success, or the error boxed as-is
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid hook outcome",
    label = "handlers and interceptors must return `()` or `Result<(), E>`",
    note = "`E` must convert into `Box<dyn Error + Send + Sync>`."
)]
pub trait IntoOutcome {
    /// Convert the return value into `Ok(())` or the failure it carries.
    fn into_outcome(self) -> Result<(), BoxError>;
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<E> IntoOutcome for Result<(), E>
where
    E: Into<BoxError>,
{
    fn into_outcome(self) -> Result<(), BoxError> {
        self.map_err(Into::into)
    }
}
