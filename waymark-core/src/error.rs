//! Error types for Waymark.
//!
//! - [`DispatchError`] - Everything a dispatch call can fail with
//! - [`RouteNotFound`] - No registered route yields handlers for a path
//! - [`BoxError`] - The error type handlers return

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// No registered route produced a handler set for the attempted path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Route: {path} does not match provided routes.")]
pub struct RouteNotFound {
    /// The path that was dispatched.
    pub path: String,
}

impl RouteNotFound {
    /// Create a not-found error for `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Errors that can occur during dispatch.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No route matched the path with a usable handler set.
    #[error(transparent)]
    RouteNotFound(#[from] RouteNotFound),

    /// A handler in the pipeline returned an error.
    ///
    /// The handler's error is carried as-is.
    #[error(transparent)]
    Handler(BoxError),
}

impl DispatchError {
    /// Returns the unmatched path if this is a not-found error.
    pub fn not_found_path(&self) -> Option<&str> {
        match self {
            DispatchError::RouteNotFound(e) => Some(&e.path),
            DispatchError::Handler(_) => None,
        }
    }

    /// Returns true if no route matched.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DispatchError::RouteNotFound(_))
    }
}

impl From<BoxError> for DispatchError {
    fn from(err: BoxError) -> Self {
        DispatchError::Handler(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_contains_path() {
        let err = DispatchError::from(RouteNotFound::new("/foo/bar/"));
        assert_eq!(
            err.to_string(),
            "Route: /foo/bar/ does not match provided routes."
        );
        assert_eq!(err.not_found_path(), Some("/foo/bar/"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_handler_error_is_transparent() {
        let inner: BoxError = "boom".into();
        let err = DispatchError::from(inner);
        assert_eq!(err.to_string(), "boom");
        assert!(!err.is_not_found());
        assert_eq!(err.not_found_path(), None);
    }
}
