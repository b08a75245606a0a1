//! Verb set used to bind handlers on a route.

use std::{fmt, str::FromStr};
use thiserror::Error;

/// The action discriminator a route binds handlers to.
///
/// [`Verb::All`] is the wildcard: its handlers serve a request only when the
/// route has no handlers for the request's exact verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Verb {
    /// `get`
    Get,
    /// `post`
    Post,
    /// `put`
    Put,
    /// `patch`
    Patch,
    /// `delete`
    Delete,
    /// Catch-all verb.
    All,
}

/// Error returned when a string is not one of the known verbs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown verb: {0}")]
pub struct ParseVerbError(pub String);

impl Verb {
    /// The concrete verbs, in canonical order. Does not include [`Verb::All`].
    pub const METHODS: [Verb; 5] = [Verb::Get, Verb::Post, Verb::Put, Verb::Patch, Verb::Delete];

    /// Lowercase canonical name (`"get"`, ..., `"all"`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::Post => "post",
            Verb::Put => "put",
            Verb::Patch => "patch",
            Verb::Delete => "delete",
            Verb::All => "all",
        }
    }

    /// Uppercase constant name (`"GET"`, ..., `"ALL"`).
    pub const fn constant(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
            Verb::All => "ALL",
        }
    }

    /// Case-insensitive lookup. Returns `None` for unknown verbs.
    pub fn parse(s: &str) -> Option<Verb> {
        Verb::METHODS
            .into_iter()
            .chain([Verb::All])
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
    }
}

impl FromStr for Verb {
    type Err = ParseVerbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verb::parse(s).ok_or_else(|| ParseVerbError(s.to_string()))
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
