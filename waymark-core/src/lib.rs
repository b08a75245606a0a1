//! # waymark-core
//!
//! Core types for the Waymark request router.
//!
//! This crate has minimal dependencies and holds the pieces every other part
//! of Waymark builds on:
//!
//! ## Pipeline ([`Pipeline`], [`Next`], [`Handler`])
//!
//! A continuation-passing executor. Handlers run one at a time in the order
//! they were composed; each receives the current arguments plus a [`Next`]
//! continuation. Calling the continuation runs the next handler with whatever
//! arguments were supplied, so a handler can forward, replace or extend the
//! data later handlers see. Not calling it ends the chain.
//!
//! ## Verbs ([`Verb`])
//!
//! The closed set of verbs a route can bind handlers to, plus the wildcard
//! [`Verb::All`].
//!
//! # Error Types
//!
//! - [`DispatchError`] - Top-level dispatch failure
//! - [`RouteNotFound`] - No route serves a path/verb combination
//! - [`BoxError`] - Errors raised by handlers

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod pipeline;
mod verb;

// Re-exports
pub use error::{BoxError, DispatchError, RouteNotFound};
pub use pipeline::{BoxHandler, Handler, Next, Pipeline, run};
pub use verb::{ParseVerbError, Verb};
