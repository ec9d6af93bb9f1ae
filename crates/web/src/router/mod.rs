mod matcher;

pub use matcher::{Matcher, UnknownMatcher, normalize_path};

use crate::handler::RequestHandler;
use std::fmt;
use tracing::trace;

/// An ordered list of routes; the first route whose matcher accepts the path wins.
///
/// The route list is fixed once built.
pub struct Router {
    routes: Vec<Route>,
}

/// A path, the strategy used to match it and the handler it dispatches to.
pub struct Route {
    path: String,
    matcher: Matcher,
    handler: Box<dyn RequestHandler>,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Finds the first route matching `path`
    ///
    /// # Arguments
    /// * `path` - The request path, without query string
    pub fn at(&self, path: &str) -> Option<&Route> {
        let route = self.routes.iter().find(|route| route.matches(path));
        trace!(path, matched = route.map(Route::path), "route lookup");
        route
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.routes).finish()
    }
}

impl Route {
    /// Creates a route; a path without a leading `/` gets one.
    pub fn new(path: impl Into<String>, matcher: Matcher, handler: impl RequestHandler + 'static) -> Self {
        let mut path = path.into();
        if !path.starts_with('/') {
            path.insert(0, '/');
        }
        Self { path, matcher, handler: Box::new(handler) }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn matcher(&self) -> Matcher {
        self.matcher
    }

    pub fn handler(&self) -> &dyn RequestHandler {
        self.handler.as_ref()
    }

    pub fn matches(&self, path: &str) -> bool {
        self.matcher.matches(&self.path, path)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route").field("path", &self.path).field("matcher", &self.matcher).finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct RouterBuilder {
    routes: Vec<Route>,
}

impl RouterBuilder {
    fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Binds an exact-match route.
    pub fn route(self, path: impl Into<String>, handler: impl RequestHandler + 'static) -> Self {
        self.route_with(path, Matcher::Exact, handler)
    }

    pub fn route_with(mut self, path: impl Into<String>, matcher: Matcher, handler: impl RequestHandler + 'static) -> Self {
        self.routes.push(Route::new(path, matcher, handler));
        self
    }

    /// Binds a route whose matcher is given by name, e.g. from a route table file.
    pub fn try_route(
        self,
        path: impl Into<String>,
        matcher: &str,
        handler: impl RequestHandler + 'static,
    ) -> Result<Self, UnknownMatcher> {
        let matcher = matcher.parse()?;
        Ok(self.route_with(path, matcher, handler))
    }

    pub fn build(self) -> Router {
        Router { routes: self.routes }
    }
}
