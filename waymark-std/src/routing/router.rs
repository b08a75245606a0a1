//! The router façade: route table, global middleware and dispatch.

use crate::{
    pattern::{PathSpec, Pattern, PatternError, PatternOptions},
    request::{Exchange, Request, Routed},
    routing::route::{PathRouter, Route, RouteHandler},
};
use std::{fmt, sync::Arc};
#[cfg(feature = "tracing")]
use tracing::{debug, trace};
use waymark_core::{DispatchError, Handler, Pipeline, RouteNotFound, Verb};

/// An ordered table of routes wrapped between global start and end
/// middleware.
///
/// `R` is the request type, `S` the response value handed to handlers.
///
/// # Example
///
/// ```
/// use waymark_std::{request::{Exchange, Request}, routing::Router};
/// use waymark_core::{BoxError, Next};
///
/// #[derive(Clone)]
/// struct Req(&'static str);
///
/// impl Request for Req {
///     fn verb(&self) -> &str {
///         self.0
///     }
/// }
///
/// let mut router = Router::<Req, ()>::new();
/// router.get("/users/:id", |ex: Exchange<Req, ()>, _next: Next<Exchange<Req, ()>>| -> Result<(), BoxError> {
///     assert_eq!(ex.request.params().get("id"), Some("42"));
///     Ok(())
/// })?;
///
/// router.dispatch("/users/42", &Req("GET"), ())?;
/// assert!(router.dispatch("/nope", &Req("GET"), ()).is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Router<R, S> {
    routes: Vec<Route<R, S>>,
    start: Vec<RouteHandler<R, S>>,
    end: Vec<RouteHandler<R, S>>,
    options: PatternOptions,
}

macro_rules! verb_shortcuts {
    ($($name:ident),* $(,)?) => {
        $(
            #[doc = concat!("Shortcut for `route(spec)?.", stringify!($name), "(handler)`; returns the router.")]
            pub fn $name<H: Handler<Exchange<R, S>>>(
                &mut self,
                spec: impl Into<PathSpec>,
                handler: H,
            ) -> Result<&mut Self, PatternError> {
                self.route(spec)?.$name(handler);
                Ok(self)
            }
        )*
    };
}

impl<R, S> Router<R, S>
where
    R: Request,
    S: 'static,
{
    /// Create an empty router with default pattern options.
    pub fn new() -> Self {
        Self::with_options(PatternOptions::default())
    }

    /// Create an empty router that compiles path specs with `options`.
    pub fn with_options(options: PatternOptions) -> Self {
        Self {
            routes: Vec::new(),
            start: Vec::new(),
            end: Vec::new(),
            options,
        }
    }

    /// The pattern options used for new routes.
    pub fn options(&self) -> &PatternOptions {
        &self.options
    }

    /// Look up the route registered for `spec`, or compile and append a new
    /// one.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if `spec` is new and does not compile.
    pub fn route(&mut self, spec: impl Into<PathSpec>) -> Result<PathRouter<'_, R, S>, PatternError> {
        let spec = spec.into();
        let index = match self.routes.iter().position(|route| *route.spec() == spec) {
            Some(index) => index,
            None => {
                let pattern = Pattern::compile(&spec, &self.options)?;
                #[cfg(feature = "tracing")]
                trace!(route = %spec, keys = pattern.keys().len(), "registered route");
                self.routes.push(Route::new(spec, pattern));
                self.routes.len() - 1
            }
        };
        Ok(PathRouter::new(&mut self.routes[index]))
    }

    verb_shortcuts!(get, post, put, patch, delete, all);

    /// Append a handler that runs before the route handlers of every match.
    pub fn add_start<H: Handler<Exchange<R, S>>>(&mut self, handler: H) -> &mut Self {
        self.start.push(Arc::new(handler));
        self
    }

    /// Append a handler that runs after the route handlers of every match.
    pub fn add_end<H: Handler<Exchange<R, S>>>(&mut self, handler: H) -> &mut Self {
        self.end.push(Arc::new(handler));
        self
    }

    /// Remove all routes and middleware.
    pub fn reset(&mut self) {
        self.routes.clear();
        self.start.clear();
        self.end.clear();
    }

    /// The verbs routes can bind to, without the `all` wildcard.
    pub const VERBS: &'static [Verb] = &Verb::METHODS;

    /// Same as [`Router::VERBS`].
    pub fn verbs() -> &'static [Verb] {
        Self::VERBS
    }

    /// Registered routes, in match order.
    pub fn routes(&self) -> &[Route<R, S>] {
        &self.routes
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no route is registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Route `request` for `path` and run the matched pipeline with
    /// `response`.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::RouteNotFound`] if no route serves `path` for the
    ///   request's verb.
    /// - [`DispatchError::Handler`] with the error a handler returned.
    #[doc(alias = "go")]
    pub fn dispatch(&self, path: &str, request: &R, response: S) -> Result<(), DispatchError> {
        self.dispatch_inner(path, request, response, None)
    }

    /// Like [`dispatch`](Self::dispatch), with `callback` appended after the
    /// end middleware.
    pub fn dispatch_with<H: Handler<Exchange<R, S>>>(
        &self,
        path: &str,
        request: &R,
        response: S,
        callback: H,
    ) -> Result<(), DispatchError> {
        self.dispatch_inner(path, request, response, Some(Arc::new(callback)))
    }

    fn dispatch_inner(
        &self,
        path: &str,
        request: &R,
        response: S,
        callback: Option<RouteHandler<R, S>>,
    ) -> Result<(), DispatchError> {
        let verb = request.verb();

        for route in &self.routes {
            let Some(matches) = route.pattern().exec(path) else {
                continue;
            };
            let Some(handlers) = route.resolve(verb) else {
                #[cfg(feature = "tracing")]
                trace!(path, verb, route = %route.spec(), "path matched but no handlers for verb");
                continue;
            };

            #[cfg(feature = "tracing")]
            debug!(path, verb, route = %route.spec(), handlers = handlers.len(), "route matched");

            let params = route.pattern().params(&matches);
            let routed = Routed::new(request.clone(), params, matches);
            let pipeline: Pipeline<Exchange<R, S>> = self
                .start
                .iter()
                .chain(handlers)
                .chain(&self.end)
                .cloned()
                .chain(callback)
                .collect();

            return pipeline
                .run(Exchange::new(routed, response))
                .map_err(DispatchError::Handler);
        }

        #[cfg(feature = "tracing")]
        debug!(path, verb, "no route matched");
        Err(RouteNotFound::new(path).into())
    }
}

impl<R: Request, S: 'static> Default for Router<R, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, S> fmt::Debug for Router<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .field("start", &self.start.len())
            .field("end", &self.end.len())
            .field("options", &self.options)
            .finish()
    }
}
