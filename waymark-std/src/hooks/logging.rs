//! Logging Hook - Observability for dispatched requests.

use crate::request::{Exchange, Request};
use waymark_core::{BoxError, Handler, Next};

/// Middleware that logs every exchange passing through it and forwards it
/// unchanged.
///
/// With the `tracing` feature, events are emitted at debug level; install a
/// subscriber to see them. Without it the hook only forwards.
///
/// # Example
///
/// ```rust,ignore
/// use waymark::{LoggingHook, Router};
///
/// let mut router = Router::<MyRequest, MyResponse>::new();
/// router.add_start(LoggingHook::named("api"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LoggingHook {
    name: &'static str,
}

impl LoggingHook {
    /// Create a new `LoggingHook` with a default name.
    pub fn new() -> Self {
        Self { name: "dispatch" }
    }

    /// Create a new `LoggingHook` with a custom name.
    ///
    /// The name is used in log messages to identify the pipeline stage.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }

    /// The stage name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for LoggingHook {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, S> Handler<Exchange<R, S>> for LoggingHook
where
    R: Request,
    S: 'static,
{
    fn call(&self, exchange: Exchange<R, S>, next: Next<Exchange<R, S>>) -> Result<(), BoxError> {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(
                name = %self.name,
                verb = exchange.request.verb(),
                path = exchange.request.path(),
                params = ?exchange.request.params(),
                extras = exchange.extras.len(),
                "processing request"
            );
        }
        next.call(exchange)
    }
}
