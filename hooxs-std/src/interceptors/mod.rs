//! Standard interceptor implementations.

mod logging;

pub use logging::{LogLevel, LoggingInterceptor};
