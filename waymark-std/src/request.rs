//! Request model.
//!
//! The router never mutates the caller's request. On a match it clones it
//! into a [`Routed`] value that also carries the extracted [`Params`] and raw
//! [`Matches`], and threads that through the pipeline inside an [`Exchange`].

use crate::pattern::{Matches, Params};
use std::{any::Any, fmt, ops::Deref};

/// An incoming request the router can dispatch.
///
/// Only the verb is read; everything else is carried along untouched.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a routable request",
    label = "missing `Request` implementation",
    note = "Implement `Request::verb` to make `{Self}` dispatchable."
)]
pub trait Request: Clone + Send + Sync + 'static {
    /// The request verb, in any case (`"get"`, `"GET"`, ...).
    fn verb(&self) -> &str;
}

/// A request after routing: a copy of the original plus match data.
///
/// Derefs to the original request type.
#[derive(Debug, Clone, PartialEq)]
pub struct Routed<R> {
    request: R,
    params: Params,
    matches: Matches,
}

impl<R> Routed<R> {
    /// Wrap `request` with match data.
    pub fn new(request: R, params: Params, matches: Matches) -> Self {
        Self {
            request,
            params,
            matches,
        }
    }

    /// Extracted parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Raw match data.
    pub fn matches(&self) -> &Matches {
        &self.matches
    }

    /// The dispatched path.
    pub fn path(&self) -> &str {
        self.matches.input()
    }

    /// The copied request.
    pub fn inner(&self) -> &R {
        &self.request
    }

    /// Unwrap the copied request.
    pub fn into_inner(self) -> R {
        self.request
    }
}

impl<R> Deref for Routed<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.request
    }
}

// A routed request can be dispatched again, e.g. into a nested router.
impl<R: Request> Request for Routed<R> {
    fn verb(&self) -> &str {
        self.request.verb()
    }
}

/// Passthrough values handlers add for the handlers after them.
///
/// Values are type-erased and read back by type.
#[derive(Default)]
pub struct Extras {
    values: Vec<Box<dyn Any + Send + Sync>>,
}

impl Extras {
    /// No extras.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value.
    pub fn push<T: Any + Send + Sync>(&mut self, value: T) {
        self.values.push(Box::new(value));
    }

    /// The value at `index`, if it exists and has type `T`.
    pub fn get<T: Any>(&self, index: usize) -> Option<&T> {
        self.values.get(index)?.downcast_ref()
    }

    /// The first value of type `T`.
    pub fn find<T: Any>(&self) -> Option<&T> {
        self.values.iter().find_map(|v| v.downcast_ref())
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Drop all values.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl fmt::Debug for Extras {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extras")
            .field("len", &self.values.len())
            .finish()
    }
}

/// The arguments threaded through a route pipeline.
#[derive(Debug)]
pub struct Exchange<R, S> {
    /// The routed request.
    pub request: Routed<R>,
    /// The caller's response value.
    pub response: S,
    /// Values added by earlier handlers.
    pub extras: Extras,
}

impl<R, S> Exchange<R, S> {
    /// Start an exchange with no extras.
    pub fn new(request: Routed<R>, response: S) -> Self {
        Self {
            request,
            response,
            extras: Extras::new(),
        }
    }

    /// Returns the exchange with `value` appended to its extras.
    pub fn with_extra<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.extras.push(value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Req {
        verb: String,
        body: &'static str,
    }

    impl Request for Req {
        fn verb(&self) -> &str {
            &self.verb
        }
    }

    fn routed() -> Routed<Req> {
        let original = Req {
            verb: "GET".into(),
            body: "hello",
        };
        let matches = Matches::new(vec![Some("/a/1".into()), Some("1".into())], 0, "/a/1");
        let params = [("id", "1")].into_iter().collect();
        Routed::new(original, params, matches)
    }

    #[test]
    fn test_routed_keeps_original_fields() {
        let routed = routed();
        assert_eq!(routed.body, "hello");
        assert_eq!(routed.verb(), "GET");
        assert_eq!(routed.path(), "/a/1");
        assert_eq!(routed.params().get("id"), Some("1"));
        assert_eq!(routed.into_inner().body, "hello");
    }

    #[test]
    fn test_extras_typed_access() {
        let mut extras = Extras::new();
        extras.push(7_u32);
        extras.push("note");
        assert_eq!(extras.len(), 2);
        assert_eq!(extras.get::<u32>(0), Some(&7));
        assert_eq!(extras.get::<u32>(1), None);
        assert_eq!(extras.find::<&str>(), Some(&"note"));
        extras.clear();
        assert!(extras.is_empty());
    }

    #[test]
    fn test_exchange_with_extra() {
        let exchange = Exchange::new(routed(), ()).with_extra(String::from("payload"));
        assert_eq!(exchange.extras.find::<String>().map(String::as_str), Some("payload"));
    }
}
