//! # waymark-std
//!
//! Standard implementations for the Waymark request router.
//!
//! This crate provides:
//! - **Pattern compilation**: [`pattern::Pattern`] turns a path spec such as
//!   `/users/:id` or a [`regex::Regex`] into a matcher plus parameter keys
//! - **Request model**: [`request::Routed`], [`request::Exchange`]
//! - **Routing**: [`routing::Router`] and its per-route [`routing::PathRouter`]
//! - **Standard hooks**: Logging
//! - **Testing utilities**: [`testing::RecordingHandler`], [`testing::OrderLog`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use waymark_core;

pub use regex;

// Modules
pub mod hooks;
pub mod pattern;
pub mod request;
pub mod routing;
pub mod testing;
