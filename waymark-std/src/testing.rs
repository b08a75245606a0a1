//! Testing utilities for Waymark.
//!
//! - [`RecordingHandler`]: A handler that records every exchange it receives
//! - [`OrderLog`]: A shared log for asserting handler order

use crate::request::{Exchange, Request, Routed};
use std::sync::{Arc, Mutex};
use waymark_core::{BoxError, Handler, Next};

// ============================================================================
// Recording Handler
// ============================================================================

/// One call seen by a [`RecordingHandler`].
#[derive(Debug, Clone)]
pub struct Recorded<R> {
    /// The routed request the handler received.
    pub request: Routed<R>,
    /// Number of passthrough extras present at the time of the call.
    pub extras: usize,
}

/// A handler that records every exchange it receives.
///
/// By default it forwards to the next handler; [`RecordingHandler::stalling`]
/// creates one that ends the chain instead.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingHandler::<MyRequest>::new();
///
/// router.get("/users/:id", recorder.clone())?;
/// router.dispatch("/users/1", &request, response)?;
///
/// assert_eq!(recorder.count(), 1);
/// assert_eq!(recorder.calls()[0].request.params().get("id"), Some("1"));
/// ```
pub struct RecordingHandler<R> {
    calls: Arc<Mutex<Vec<Recorded<R>>>>,
    forward: bool,
}

impl<R: Clone> RecordingHandler<R> {
    /// Create a recording handler that forwards.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            forward: true,
        }
    }

    /// Create a recording handler that never calls its continuation.
    pub fn stalling() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            forward: false,
        }
    }

    /// Get a clone of the recorded calls.
    pub fn calls(&self) -> Vec<Recorded<R>> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the number of recorded calls.
    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Clear all recorded calls.
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl<R: Clone> Default for RecordingHandler<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for RecordingHandler<R> {
    fn clone(&self) -> Self {
        Self {
            calls: self.calls.clone(),
            forward: self.forward,
        }
    }
}

impl<R, S> Handler<Exchange<R, S>> for RecordingHandler<R>
where
    R: Request,
    S: 'static,
{
    fn call(&self, exchange: Exchange<R, S>, next: Next<Exchange<R, S>>) -> Result<(), BoxError> {
        self.calls.lock().unwrap().push(Recorded {
            request: exchange.request.clone(),
            extras: exchange.extras.len(),
        });
        if self.forward {
            next.call(exchange)
        } else {
            Ok(())
        }
    }
}

// ============================================================================
// Order Log
// ============================================================================

/// A shared, ordered log of handler names.
///
/// Each [`OrderLog::step`] handler appends its name and forwards.
#[derive(Debug, Clone, Default)]
pub struct OrderLog {
    entries: Arc<Mutex<Vec<&'static str>>>,
}

impl OrderLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// A handler that appends `name` to this log and calls its continuation.
    pub fn step<R, S>(&self, name: &'static str) -> impl Handler<Exchange<R, S>> + use<R, S>
    where
        R: Request,
        S: 'static,
    {
        let entries = Arc::clone(&self.entries);
        move |exchange: Exchange<R, S>, next: Next<Exchange<R, S>>| -> Result<(), BoxError> {
            entries.lock().unwrap().push(name);
            next.call(exchange)
        }
    }

    /// A handler that appends `name` to this log and ends the chain.
    pub fn stop<R, S>(&self, name: &'static str) -> impl Handler<Exchange<R, S>> + use<R, S>
    where
        R: Request,
        S: 'static,
    {
        let entries = Arc::clone(&self.entries);
        move |_: Exchange<R, S>, _: Next<Exchange<R, S>>| -> Result<(), BoxError> {
            entries.lock().unwrap().push(name);
            Ok(())
        }
    }

    /// The logged names, in order.
    pub fn entries(&self) -> Vec<&'static str> {
        self.entries.lock().unwrap().clone()
    }

    /// Clear the log.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}
