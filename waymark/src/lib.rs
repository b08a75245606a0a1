//! # waymark - Protocol-Agnostic Request Router
//!
//! `waymark` matches an abstract request (a path plus a verb) against an
//! ordered table of path patterns and runs the handlers bound to the first
//! route that serves it, wrapped between global start and end middleware.
//! Handlers form a continuation-passing chain: each one forwards, replaces
//! the arguments, defers, or ends the chain.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use waymark::prelude::*;
//!
//! #[derive(Clone)]
//! struct Req { verb: String }
//!
//! impl Request for Req {
//!     fn verb(&self) -> &str { &self.verb }
//! }
//!
//! let mut router = Router::<Req, Reply>::new();
//! router
//!     .add_start(LoggingHook::named("api"))
//!     .get("/users/:id", |ex: Exchange<Req, Reply>, next: Next<Exchange<Req, Reply>>| {
//!         let id = ex.request.params().get("id").unwrap_or_default().to_string();
//!         next.call(ex.with_extra(id))
//!     })?;
//!
//! router.dispatch("/users/42", &Req { verb: "GET".into() }, Reply::default())?;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use waymark_core::{
    // Error types
    BoxError,
    // Pipeline
    BoxHandler,
    DispatchError,
    Handler,
    Next,
    // Verbs
    ParseVerbError,
    Pipeline,
    RouteNotFound,
    Verb,
    run,
};

// Patterns
pub use waymark_std::pattern::{
    Key, KeyName, Matches, Params, PathSpec, Pattern, PatternError, PatternOptions,
};

// Requests
pub use waymark_std::request::{Exchange, Extras, Request, Routed};

// Routing
pub use waymark_std::routing::{PathRouter, Route, RouteHandler, Router};

// Hooks
pub use waymark_std::hooks::LoggingHook;

pub use waymark_std::regex;

/// Standard hook implementations.
pub mod hooks {
    pub use waymark_std::hooks::{LoggingHook, logging};
}

/// Testing utilities.
pub mod testing {
    pub use waymark_std::testing::{OrderLog, Recorded, RecordingHandler};
}

/// Prelude module - common imports for Waymark.
///
/// # Usage
///
/// ```rust,ignore
/// use waymark::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Errors
        BoxError,
        DispatchError,
        // Requests
        Exchange,
        // Core traits
        Handler,
        // Hooks
        LoggingHook,
        Next,
        Params,
        PathSpec,
        Request,
        Routed,
        // Routing
        Router,
        Verb,
    };
}
