//! # Routing
//!
//! ```text
//! dispatch(path, request, response)
//!     → scan routes in registration order
//!     → pattern.exec(path)             (path gate)
//!     → resolve verb bucket / `all`    (verb gate)
//!     → Routed { params, matches }
//!     → start ++ route handlers ++ end ++ callback
//!     → Pipeline::run(Exchange)
//! ```
//!
//! - First registered route wins, regardless of specificity.
//! - A route that matches the path but has no handlers for the verb (and no
//!   `all` handlers) is skipped, so a later, more permissive route can still
//!   serve the request.
//! - Registering the same spec again returns the existing route; handlers
//!   accumulate.

pub mod route;
pub mod router;

pub use route::{PathRouter, Route, RouteHandler};
pub use router::Router;
