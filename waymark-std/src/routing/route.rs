//! A single route and its registration handle.

use crate::{
    pattern::{Key, PathSpec, Pattern},
    request::Exchange,
};
use std::{collections::HashMap, fmt, sync::Arc};
use waymark_core::{BoxHandler, Handler, Verb};

/// A handler bound on a route or registered as middleware.
pub type RouteHandler<R, S> = BoxHandler<Exchange<R, S>>;

/// A compiled path spec plus its per-verb handler lists.
pub struct Route<R, S> {
    spec: PathSpec,
    pattern: Pattern,
    handlers: HashMap<Verb, Vec<RouteHandler<R, S>>>,
}

impl<R, S> Route<R, S> {
    pub(crate) fn new(spec: PathSpec, pattern: Pattern) -> Self {
        Self {
            spec,
            pattern,
            handlers: HashMap::new(),
        }
    }

    /// The spec this route was registered with.
    pub fn spec(&self) -> &PathSpec {
        &self.spec
    }

    /// The compiled pattern.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Parameter keys of the compiled pattern.
    pub fn keys(&self) -> &[Key] {
        self.pattern.keys()
    }

    /// Number of handlers bound to `verb`.
    pub fn handler_count(&self, verb: Verb) -> usize {
        self.handlers.get(&verb).map_or(0, Vec::len)
    }

    /// Returns true if no verb has any handler.
    ///
    /// Such a route still matches paths but never serves them.
    pub fn is_idle(&self) -> bool {
        self.handlers.values().all(Vec::is_empty)
    }

    pub(crate) fn push(&mut self, verb: Verb, handler: RouteHandler<R, S>) {
        self.handlers.entry(verb).or_default().push(handler);
    }

    /// Handlers serving `verb`: the exact bucket if non-empty, else the `all`
    /// bucket if non-empty.
    pub(crate) fn resolve(&self, verb: &str) -> Option<&[RouteHandler<R, S>]> {
        Verb::parse(verb)
            .and_then(|verb| self.bucket(verb))
            .or_else(|| self.bucket(Verb::All))
    }

    fn bucket(&self, verb: Verb) -> Option<&[RouteHandler<R, S>]> {
        self.handlers
            .get(&verb)
            .map(Vec::as_slice)
            .filter(|handlers| !handlers.is_empty())
    }
}

impl<R, S> fmt::Debug for Route<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts: Vec<_> = self
            .handlers
            .iter()
            .map(|(verb, handlers)| (*verb, handlers.len()))
            .collect();
        counts.sort();
        f.debug_struct("Route")
            .field("spec", &self.spec)
            .field("keys", &self.pattern.keys())
            .field("handlers", &counts)
            .finish()
    }
}

/// Registration handle for one route, returned by [`Router::route`].
///
/// Every method appends a handler to the route and returns the handle, so
/// calls chain: `router.route("/users/:id")?.get(show).delete(remove);`
///
/// [`Router::route`]: crate::routing::Router::route
pub struct PathRouter<'a, R, S> {
    route: &'a mut Route<R, S>,
}

macro_rules! verb_methods {
    ($($name:ident => $verb:expr),* $(,)?) => {
        $(
            #[doc = concat!("Append `handler` to the `", stringify!($name), "` handlers of this route.")]
            pub fn $name<H: Handler<Exchange<R, S>>>(self, handler: H) -> Self {
                self.on($verb, handler)
            }
        )*
    };
}

impl<'a, R, S> PathRouter<'a, R, S> {
    pub(crate) fn new(route: &'a mut Route<R, S>) -> Self {
        Self { route }
    }

    /// Append `handler` to the `verb` handlers of this route.
    pub fn on<H: Handler<Exchange<R, S>>>(self, verb: Verb, handler: H) -> Self {
        self.route.push(verb, Arc::new(handler));
        self
    }

    verb_methods! {
        get => Verb::Get,
        post => Verb::Post,
        put => Verb::Put,
        patch => Verb::Patch,
        delete => Verb::Delete,
        all => Verb::All,
    }

    /// The route being configured.
    pub fn route(&self) -> &Route<R, S> {
        &*self.route
    }
}

impl<R, S> fmt::Debug for PathRouter<'_, R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathRouter")
            .field("route", &self.route)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::PatternOptions;
    use waymark_core::{BoxError, Next};

    type Ex = Exchange<(), ()>;

    fn route(spec: &str) -> Route<(), ()> {
        let spec = PathSpec::from(spec);
        let pattern = Pattern::compile(&spec, &PatternOptions::default()).unwrap();
        Route::new(spec, pattern)
    }

    fn noop(_: Ex, _: Next<Ex>) -> Result<(), BoxError> {
        Ok(())
    }

    #[test]
    fn test_resolve_prefers_exact_verb() {
        let mut route = route("/foo");
        PathRouter::new(&mut route).get(noop).all(noop).all(noop);

        assert_eq!(route.resolve("GET").map(<[_]>::len), Some(1));
        assert_eq!(route.resolve("post").map(<[_]>::len), Some(2));
        assert_eq!(route.resolve("head").map(<[_]>::len), Some(2));
    }

    #[test]
    fn test_resolve_without_catch_all() {
        let mut route = route("/foo");
        PathRouter::new(&mut route).post(noop);

        assert!(route.resolve("get").is_none());
        assert!(route.resolve("POST").is_some());
        assert_eq!(route.handler_count(Verb::Post), 1);
        assert_eq!(route.handler_count(Verb::Get), 0);
    }

    #[test]
    fn test_idle_route() {
        let route = route("/idle");
        assert!(route.is_idle());
        assert!(route.resolve("get").is_none());
    }
}
