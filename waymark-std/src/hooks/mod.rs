//! Standard middleware.

pub mod logging;

pub use logging::LoggingHook;
