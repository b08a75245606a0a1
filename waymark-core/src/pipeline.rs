//! # Continuation-passing pipeline
//!
//! A [`Pipeline`] is an immutable, ordered list of [`Handler`]s. Running it
//! invokes the first handler with the initial arguments and a [`Next`]
//! continuation. Each handler decides what happens afterwards:
//!
//! - **Forward**: call `next.call(args)` with the same arguments.
//! - **Extend / Replace**: call `next.call(other_args)`; later handlers only
//!   see what was passed.
//! - **End**: return without calling `next`. The remaining handlers never run.
//! - **Defer**: move `next` somewhere else (a spawned task, a queue) and call
//!   it later. The chain resumes whenever that call happens.
//!
//! `Next` is a cursor into the shared handler list, not a closure over the
//! remaining handlers, so it is cheap to clone and `Send + 'static`.
//!
//! # Errors
//!
//! Handler errors are not caught. An `Err` returned by a handler travels back
//! through every handler that synchronously called `next` and out of
//! [`Pipeline::run`].
//!
//! # Example
//!
//! ```
//! use waymark_core::{BoxError, Next, Pipeline};
//!
//! let double = |n: u32, next: Next<u32>| -> Result<(), BoxError> { next.call(n * 2) };
//! let check = |n: u32, _next: Next<u32>| -> Result<(), BoxError> {
//!     assert_eq!(n, 42);
//!     Ok(())
//! };
//!
//! let pipeline: Pipeline<u32> = Pipeline::new().with(double).with(check);
//! pipeline.run(21).unwrap();
//! ```

use crate::error::BoxError;
use std::{fmt, sync::Arc};

/// A single step of a pipeline.
///
/// The handler receives the current arguments and the continuation for the
/// rest of the chain. Closures of the shape
/// `Fn(A, Next<A>) -> Result<(), BoxError>` implement this trait.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a handler for `{A}`",
    label = "missing `Handler<{A}>` implementation",
    note = "Handlers take the arguments and a `Next<{A}>` and return `Result<(), BoxError>`."
)]
pub trait Handler<A>: Send + Sync + 'static {
    /// Runs this step.
    fn call(&self, args: A, next: Next<A>) -> Result<(), BoxError>;
}

// Blanket impl for closures
impl<A, F> Handler<A> for F
where
    F: Fn(A, Next<A>) -> Result<(), BoxError> + Send + Sync + 'static,
{
    fn call(&self, args: A, next: Next<A>) -> Result<(), BoxError> {
        (self)(args, next)
    }
}

/// A shared, type-erased handler.
pub type BoxHandler<A> = Arc<dyn Handler<A>>;

/// The continuation handed to every handler.
///
/// Holds the shared handler list and the index of the handler to run next.
pub struct Next<A> {
    handlers: Arc<[BoxHandler<A>]>,
    cursor: usize,
}

impl<A: 'static> Next<A> {
    /// Runs the rest of the pipeline with `args`.
    ///
    /// Returns `Ok(())` immediately when no handlers remain.
    pub fn call(self, args: A) -> Result<(), BoxError> {
        let Some(handler) = self.handlers.get(self.cursor).map(Arc::clone) else {
            return Ok(());
        };
        let next = Next {
            handlers: self.handlers,
            cursor: self.cursor + 1,
        };
        handler.call(args, next)
    }

    /// Number of handlers that calling this continuation may still run.
    pub fn remaining(&self) -> usize {
        self.handlers.len().saturating_sub(self.cursor)
    }

    /// Returns true if calling this continuation is a no-op.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

impl<A> Clone for Next<A> {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
            cursor: self.cursor,
        }
    }
}

impl<A> fmt::Debug for Next<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next")
            .field("cursor", &self.cursor)
            .field("len", &self.handlers.len())
            .finish()
    }
}

/// An ordered, immutable list of handlers.
pub struct Pipeline<A> {
    handlers: Arc<[BoxHandler<A>]>,
}

impl<A: 'static> Pipeline<A> {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self {
            handlers: Arc::from(Vec::new()),
        }
    }

    /// Returns a pipeline with `handler` appended.
    pub fn with<H: Handler<A>>(self, handler: H) -> Self {
        let mut handlers = self.handlers.to_vec();
        handlers.push(Arc::new(handler));
        Self {
            handlers: handlers.into(),
        }
    }

    /// Number of handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if the pipeline has no handlers.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs the pipeline from the first handler.
    ///
    /// An empty pipeline returns `Ok(())` without doing anything.
    pub fn run(&self, args: A) -> Result<(), BoxError> {
        Next {
            handlers: Arc::clone(&self.handlers),
            cursor: 0,
        }
        .call(args)
    }
}

impl<A: 'static> Default for Pipeline<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for Pipeline<A> {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
        }
    }
}

impl<A> fmt::Debug for Pipeline<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("len", &self.handlers.len())
            .finish()
    }
}

impl<A: 'static> From<Vec<BoxHandler<A>>> for Pipeline<A> {
    fn from(handlers: Vec<BoxHandler<A>>) -> Self {
        Self {
            handlers: handlers.into(),
        }
    }
}

impl<A: 'static> FromIterator<BoxHandler<A>> for Pipeline<A> {
    fn from_iter<I: IntoIterator<Item = BoxHandler<A>>>(iter: I) -> Self {
        Self {
            handlers: iter.into_iter().collect(),
        }
    }
}

/// Runs `handlers` in order with `args` as the initial arguments.
pub fn run<A: 'static>(handlers: impl IntoIterator<Item = BoxHandler<A>>, args: A) -> Result<(), BoxError> {
    handlers.into_iter().collect::<Pipeline<A>>().run(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    type Log = Arc<Mutex<Vec<String>>>;

    fn recorder(log: &Log, name: &'static str, forward: bool) -> BoxHandler<u32> {
        let log = Arc::clone(log);
        Arc::new(move |n: u32, next: Next<u32>| -> Result<(), BoxError> {
            log.lock().unwrap().push(format!("{name}:{n}"));
            if forward { next.call(n) } else { Ok(()) }
        })
    }

    #[test]
    fn test_empty_pipeline_is_noop() {
        let pipeline = Pipeline::<u32>::new();
        assert!(pipeline.is_empty());
        pipeline.run(1).unwrap();
        run(Vec::<BoxHandler<u32>>::new(), 1).unwrap();
    }

    #[test]
    fn test_handlers_run_in_order() {
        let log = Log::default();
        run(
            vec![
                recorder(&log, "a", true),
                recorder(&log, "b", true),
                recorder(&log, "c", true),
            ],
            7,
        )
        .unwrap();
        assert_eq!(*log.lock().unwrap(), ["a:7", "b:7", "c:7"]);
    }

    #[test]
    fn test_withheld_continuation_stops_chain() {
        let log = Log::default();
        run(
            vec![recorder(&log, "a", true), recorder(&log, "b", false), recorder(&log, "c", true)],
            1,
        )
        .unwrap();
        assert_eq!(*log.lock().unwrap(), ["a:1", "b:1"]);
    }

    #[test]
    fn test_continuation_replaces_args() {
        let log = Log::default();
        let add_ten: BoxHandler<u32> = Arc::new(|n: u32, next: Next<u32>| next.call(n + 10));
        run(vec![add_ten, recorder(&log, "b", true)], 1).unwrap();
        assert_eq!(*log.lock().unwrap(), ["b:11"]);
    }

    #[test]
    fn test_handler_error_propagates() {
        let log = Log::default();
        let fail: BoxHandler<u32> =
            Arc::new(|_: u32, _: Next<u32>| -> Result<(), BoxError> { Err("nope".into()) });
        let err = run(vec![recorder(&log, "a", true), fail, recorder(&log, "c", true)], 1)
            .unwrap_err();
        assert_eq!(err.to_string(), "nope");
        assert_eq!(*log.lock().unwrap(), ["a:1"]);
    }

    #[test]
    fn test_next_remaining() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let count_remaining = move |_: (), next: Next<()>| -> Result<(), BoxError> {
            seen_clone.lock().unwrap().push(next.remaining());
            next.call(())
        };
        let pipeline = Pipeline::<()>::new()
            .with(count_remaining.clone())
            .with(count_remaining);
        pipeline.run(()).unwrap();
        assert_eq!(*seen.lock().unwrap(), [1, 0]);
    }

    #[test]
    fn test_stashed_continuation_resumes_later() {
        let log = Log::default();
        let stash: Arc<Mutex<Option<Next<u32>>>> = Arc::default();
        let stash_clone = Arc::clone(&stash);
        let park: BoxHandler<u32> = Arc::new(move |_: u32, next: Next<u32>| {
            *stash_clone.lock().unwrap() = Some(next);
            Ok(())
        });

        run(vec![park, recorder(&log, "late", true)], 0).unwrap();
        assert!(log.lock().unwrap().is_empty());

        let next = stash.lock().unwrap().take().unwrap();
        assert!(!next.is_exhausted());
        next.call(5).unwrap();
        assert_eq!(*log.lock().unwrap(), ["late:5"]);
    }

    fn forward_all<A: Send + 'static>(len: usize) -> Pipeline<A> {
        (0..len)
            .map(|_| -> BoxHandler<A> { Arc::new(|args: A, next: Next<A>| next.call(args)) })
            .collect()
    }

    #[test]
    fn test_generic_pipeline_over_owned_args() {
        let pipeline = forward_all::<String>(3);
        assert_eq!(pipeline.len(), 3);
        pipeline.run("owned".to_string()).unwrap();

        let boxed: Vec<BoxHandler<Vec<u8>>> = (0..2)
            .map(|_| -> BoxHandler<Vec<u8>> { Arc::new(|v: Vec<u8>, next: Next<Vec<u8>>| next.call(v)) })
            .collect();
        run(boxed, vec![1, 2, 3]).unwrap();
        assert_eq!(Pipeline::<Vec<u8>>::default().len(), 0);
    }
}
