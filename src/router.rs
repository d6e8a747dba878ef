//! The route dispatcher.
//!
//! [`Router`] ties a [`RouteTable`] to a [`LearnersController`]. Navigation
//! runs this pipeline:
//!
//! 1. Normalize the fragment (see [`crate::fragment`]).
//! 2. Skip if it is already the current fragment; record it otherwise.
//! 3. Stop here unless the navigation asked to trigger.
//! 4. Resolve the first matching route (through the cache when enabled).
//! 5. Run `before_dispatch` middleware.
//! 6. Call the page handler, then `on_show_page` for `show*` handlers.
//! 7. Run `after_dispatch` middleware.

#[cfg(feature = "cache")]
use crate::cache::{CacheStats, RouteCache};
use crate::controller::LearnersController;
use crate::error::{NavigationError, NavigationResult};
use crate::fragment::{normalize_fragment, normalize_root, split_query, strip_root, url_path};
use crate::matching::PatternMatch;
#[cfg(feature = "middleware")]
use crate::middleware::NavigationMiddleware;
use crate::params::QueryParams;
use crate::route::{Page, RouteTable};
use crate::{debug_log, info_log, trace_log, warn_log};
use std::fmt;
#[cfg(feature = "middleware")]
use std::sync::Arc;

// ============================================================================
// NavigationEvent
// ============================================================================

/// A resolved navigation, as handed to the page handler and middleware.
///
/// `args` holds the handler's positional arguments: each capture of the
/// matched pattern in order, then the trailing query string.
///
/// # Example
///
/// ```
/// use learners_router::{NavigationEvent, Page};
///
/// let event = NavigationEvent {
///     page: Page::LearnerDetail,
///     fragment: "edx/?order_by=username".to_string(),
///     args: vec![Some("edx".into()), Some("order_by=username".into()), None],
///     replace: false,
/// };
/// assert_eq!(event.arg(0), Some("edx"));
/// assert_eq!(event.path(), "edx/");
/// assert_eq!(event.query_params().get("order_by"), Some(&"username".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEvent {
    /// The page being shown.
    pub page: Page,
    /// The normalized fragment.
    pub fragment: String,
    /// Positional handler arguments.
    pub args: Vec<Option<String>>,
    /// Whether the navigation asked to replace the current entry.
    pub replace: bool,
}

impl NavigationEvent {
    fn new(page: Page, fragment: String, captures: PatternMatch, replace: bool) -> Self {
        Self {
            page,
            fragment,
            args: captures.into_args(),
            replace,
        }
    }

    /// Positional argument `index`, `None` if absent or empty.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index)?.as_deref()
    }

    /// The fragment without its query string.
    pub fn path(&self) -> &str {
        split_query(&self.fragment).0
    }

    /// The raw query string of the fragment.
    pub fn query_string(&self) -> Option<&str> {
        split_query(&self.fragment).1
    }

    /// The query string parsed into parameters.
    pub fn query_params(&self) -> QueryParams {
        self.query_string()
            .map(QueryParams::from_query_string)
            .unwrap_or_default()
    }
}

// ============================================================================
// Options
// ============================================================================

/// Per-call navigation options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Run the matching page handler. When off, only the current fragment
    /// is updated.
    pub trigger: bool,
    /// Replace the current entry instead of adding one. Passed through to
    /// middleware.
    pub replace: bool,
}

impl NavigateOptions {
    /// Navigate and dispatch.
    pub const fn trigger() -> Self {
        Self {
            trigger: true,
            replace: false,
        }
    }

    /// Record the fragment without dispatching.
    pub const fn silent() -> Self {
        Self {
            trigger: false,
            replace: false,
        }
    }

    /// Mark the navigation as a replacement.
    pub const fn with_replace(mut self) -> Self {
        self.replace = true;
        self
    }
}

/// Router construction options.
///
/// # Example
///
/// ```
/// use learners_router::RouterOptions;
///
/// let options = RouterOptions::new()
///     .root("courses/demo/learners")
///     .cache_capacity(64);
/// assert_eq!(options.root, "/courses/demo/learners/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterOptions {
    /// Base path stripped from full URLs by [`Router::load_url`]. Always
    /// starts and ends with `/`.
    pub root: String,
    /// Number of resolved fragments kept when the `cache` feature is on.
    pub cache_capacity: usize,
}

impl RouterOptions {
    /// Default options: root `/`, default cache size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base path; it is normalized to `/segment/.../`.
    pub fn root(mut self, root: &str) -> Self {
        self.root = normalize_root(root).into_owned();
        self
    }

    /// Set the resolution cache capacity.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            root: "/".to_string(),
            cache_capacity: 256,
        }
    }
}

// ============================================================================
// Router
// ============================================================================

/// Dispatches URL fragments to a [`LearnersController`].
///
/// # Example
///
/// ```
/// use learners_router::{LearnersController, NavigateOptions, Page, Router};
///
/// #[derive(Default)]
/// struct Count {
///     shown: usize,
/// }
///
/// impl LearnersController for Count {
///     fn show_learner_roster_page(&mut self, _: Option<&str>, _: Option<&str>) {}
///     fn show_learner_detail_page(&mut self, _: &str, _: Option<&str>, _: Option<&str>) {}
///     fn show_not_found_page(&mut self, _: &str, _: Option<&str>) {}
///     fn on_show_page(&mut self) {
///         self.shown += 1;
///     }
/// }
///
/// let mut router = Router::new(Count::default());
/// let result = router.navigate("?text_search=edx", NavigateOptions::trigger());
///
/// assert_eq!(result.page(), Some(Page::LearnerRoster));
/// assert_eq!(router.controller().shown, 1);
/// ```
pub struct Router<C> {
    controller: C,
    table: RouteTable,
    root: String,
    fragment: Option<String>,
    #[cfg(feature = "middleware")]
    middleware: Vec<Arc<dyn NavigationMiddleware>>,
    #[cfg(feature = "cache")]
    cache: RouteCache,
}

impl<C: LearnersController> Router<C> {
    /// Create a router over the learners table with default options.
    pub fn new(controller: C) -> Self {
        Self::with_options(controller, RouterOptions::default())
    }

    /// Create a router over the learners table.
    pub fn with_options(controller: C, options: RouterOptions) -> Self {
        debug_log!(
            "Creating router (root '{}', cache capacity {})",
            options.root,
            options.cache_capacity
        );
        Self {
            controller,
            table: RouteTable::learners(),
            root: normalize_root(&options.root).into_owned(),
            fragment: None,
            #[cfg(feature = "middleware")]
            middleware: Vec::new(),
            #[cfg(feature = "cache")]
            cache: RouteCache::with_capacity(options.cache_capacity),
        }
    }

    /// Replace the route table, builder style.
    pub fn with_table(mut self, table: RouteTable) -> Self {
        self.set_table(table);
        self
    }

    /// Replace the route table. Cached resolutions are dropped.
    pub fn set_table(&mut self, table: RouteTable) {
        info_log!("Installing route table with {} routes", table.len());
        self.table = table;
        #[cfg(feature = "cache")]
        self.cache.clear();
    }

    /// Attach middleware, builder style.
    #[cfg(feature = "middleware")]
    pub fn with_middleware(mut self, middleware: impl NavigationMiddleware) -> Self {
        self.add_middleware(middleware);
        self
    }

    /// Attach middleware.
    #[cfg(feature = "middleware")]
    pub fn add_middleware(&mut self, middleware: impl NavigationMiddleware) {
        debug_log!(
            "Attached middleware '{}' (priority {})",
            middleware.name(),
            middleware.priority()
        );
        self.middleware.push(Arc::new(middleware));
    }

    /// The controller.
    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// The controller, mutably.
    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    /// Consume the router and return the controller.
    pub fn into_controller(self) -> C {
        self.controller
    }

    /// The active route table.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// The normalized root.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The current normalized fragment, `None` before the first navigation.
    pub fn current_fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Resolution cache statistics.
    #[cfg(feature = "cache")]
    pub fn cache_stats(&self) -> &CacheStats {
        self.cache.stats()
    }

    /// Resolve a fragment without dispatching or changing the current one.
    pub fn resolve(&mut self, fragment: &str) -> Option<NavigationEvent> {
        let fragment = normalize_fragment(fragment);
        let (index, captures) = self.lookup(fragment)?;
        let page = self.table.routes()[index].page();
        Some(NavigationEvent::new(
            page,
            fragment.to_string(),
            captures,
            false,
        ))
    }

    /// Navigate to a fragment.
    ///
    /// Navigating to the fragment that is already current does nothing.
    pub fn navigate(&mut self, fragment: &str, options: NavigateOptions) -> NavigationResult {
        let fragment = normalize_fragment(fragment);

        if self.fragment.as_deref() == Some(fragment) {
            debug_log!("Already at '{}', skipping navigation", fragment);
            return NavigationResult::Unchanged {
                fragment: fragment.to_string(),
            };
        }

        trace_log!(
            "Navigation '{}' -> '{}' ({:?})",
            self.fragment.as_deref().unwrap_or_default(),
            fragment,
            options
        );
        self.fragment = Some(fragment.to_string());

        if !options.trigger {
            return NavigationResult::Silent {
                fragment: fragment.to_string(),
            };
        }

        self.dispatch(fragment.to_string(), options.replace)
    }

    /// Dispatch the current fragment again, even though it did not change.
    ///
    /// Returns `None` before the first navigation.
    pub fn reload(&mut self) -> Option<NavigationResult> {
        let fragment = self.fragment.clone()?;
        Some(self.dispatch(fragment, false))
    }

    /// Navigate to a full URL or path under the router's root.
    ///
    /// A URL carrying a `#fragment` routes on that fragment and ignores the
    /// path. Otherwise the root is stripped from the path.
    ///
    /// ```
    /// # use learners_router::{LearnersController, Page, Router, RouterOptions};
    /// # struct Noop;
    /// # impl LearnersController for Noop {
    /// #     fn show_learner_roster_page(&mut self, _: Option<&str>, _: Option<&str>) {}
    /// #     fn show_learner_detail_page(&mut self, _: &str, _: Option<&str>, _: Option<&str>) {}
    /// #     fn show_not_found_page(&mut self, _: &str, _: Option<&str>) {}
    /// # }
    /// let options = RouterOptions::new().root("/courses/demo/learners/");
    /// let mut router = Router::with_options(Noop, options);
    ///
    /// let result = router
    ///     .load_url("https://insights.example.org/courses/demo/learners/edx")
    ///     .unwrap();
    /// assert_eq!(result.page(), Some(Page::LearnerDetail));
    ///
    /// assert!(router.load_url("/courses/other/").is_err());
    /// ```
    pub fn load_url(&mut self, url: &str) -> Result<NavigationResult, NavigationError> {
        let fragment = match url.split_once('#') {
            Some((_, hash)) => hash,
            None => strip_root(url_path(url), &self.root).ok_or_else(|| {
                warn_log!("URL '{}' is outside root '{}'", url, self.root);
                NavigationError::OutsideRoot {
                    url: url.to_string(),
                    root: self.root.clone(),
                }
            })?,
        };

        Ok(self.navigate(fragment, NavigateOptions::trigger()))
    }

    fn lookup(&mut self, fragment: &str) -> Option<(usize, PatternMatch)> {
        #[cfg(feature = "cache")]
        {
            if let Some(hit) = self.cache.get(fragment) {
                return Some(hit);
            }
        }

        let (index, captures) = self.table.resolve(fragment)?;

        #[cfg(feature = "cache")]
        self.cache
            .insert(fragment.to_string(), index, captures.clone());

        Some((index, captures))
    }

    fn dispatch(&mut self, fragment: String, replace: bool) -> NavigationResult {
        let Some((index, captures)) = self.lookup(&fragment) else {
            warn_log!("No route matched '{}'", fragment);
            return NavigationResult::Unmatched { fragment };
        };

        let page = self.table.routes()[index].page();
        let event = NavigationEvent::new(page, fragment, captures, replace);
        debug_log!("Resolved '{}' to {} {:?}", event.fragment, page, event.args);

        #[cfg(feature = "middleware")]
        let middleware = self.ordered_middleware();
        #[cfg(feature = "middleware")]
        {
            for mw in &middleware {
                mw.before_dispatch(&event);
            }
        }

        page.invoke(&mut self.controller, &event.args);
        if page.fires_show_hook() {
            self.controller.on_show_page();
        }

        #[cfg(feature = "middleware")]
        {
            for mw in middleware.iter().rev() {
                mw.after_dispatch(&event);
            }
        }

        info_log!("Showed {} for '{}'", page, event.fragment);
        NavigationResult::Dispatched {
            page,
            fragment: event.fragment,
        }
    }

    /// Middleware sorted by descending priority, registration order on ties.
    #[cfg(feature = "middleware")]
    fn ordered_middleware(&self) -> Vec<Arc<dyn NavigationMiddleware>> {
        let mut ordered = self.middleware.clone();
        ordered.sort_by_key(|mw| std::cmp::Reverse(mw.priority()));
        ordered
    }
}

impl<C: fmt::Debug> fmt::Debug for Router<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("controller", &self.controller)
            .field("table", &self.table)
            .field("root", &self.root)
            .field("fragment", &self.fragment)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Calls(Vec<String>);

    impl LearnersController for Calls {
        fn show_learner_roster_page(&mut self, query: Option<&str>, extra: Option<&str>) {
            self.0.push(format!("roster {:?} {:?}", query, extra));
        }

        fn show_learner_detail_page(
            &mut self,
            username: &str,
            query: Option<&str>,
            extra: Option<&str>,
        ) {
            self.0
                .push(format!("detail {} {:?} {:?}", username, query, extra));
        }

        fn show_not_found_page(&mut self, path: &str, query: Option<&str>) {
            self.0.push(format!("404 {} {:?}", path, query));
        }

        fn on_show_page(&mut self) {
            self.0.push("shown".to_string());
        }
    }

    #[test]
    fn test_dispatch_then_hook() {
        let mut router = Router::new(Calls::default());
        router.navigate("edx", NavigateOptions::trigger());

        assert_eq!(
            router.controller().0,
            vec!["detail edx None None", "shown"]
        );
    }

    #[test]
    fn test_silent_navigation_records_fragment() {
        let mut router = Router::new(Calls::default());
        let result = router.navigate("/edx/", NavigateOptions::silent());

        assert!(result.is_silent());
        assert_eq!(router.current_fragment(), Some("edx/"));
        assert!(router.controller().0.is_empty());
    }

    #[test]
    fn test_same_fragment_is_unchanged() {
        let mut router = Router::new(Calls::default());
        router.navigate("", NavigateOptions::trigger());
        let result = router.navigate("/", NavigateOptions::trigger());

        assert!(result.is_unchanged());
        assert_eq!(router.controller().0.len(), 2);
    }

    #[test]
    fn test_reload_dispatches_current() {
        let mut router = Router::new(Calls::default());
        assert!(router.reload().is_none());

        router.navigate("a/b", NavigateOptions::silent());
        let result = router.reload().unwrap();

        assert_eq!(result.page(), Some(Page::NotFound));
        assert_eq!(router.controller().0, vec!["404 a/b None", "shown"]);
    }

    #[test]
    fn test_resolve_does_not_dispatch() {
        let mut router = Router::new(Calls::default());
        let event = router.resolve("edx?page=2").unwrap();

        assert_eq!(event.page, Page::LearnerDetail);
        assert_eq!(event.arg(0), Some("edx"));
        assert_eq!(event.arg(1), Some("page=2"));
        assert_eq!(router.current_fragment(), None);
        assert!(router.controller().0.is_empty());
    }

    #[test]
    fn test_empty_table_is_unmatched() {
        let mut router = Router::new(Calls::default()).with_table(RouteTable::new());
        let result = router.navigate("edx", NavigateOptions::trigger());

        assert!(result.is_unmatched());
        assert!(router.controller().0.is_empty());
    }

    #[test]
    fn test_options_root_normalized() {
        let router = Router::with_options(
            Calls::default(),
            RouterOptions {
                root: "learners".to_string(),
                cache_capacity: 8,
            },
        );
        assert_eq!(router.root(), "/learners/");
    }

    #[cfg(feature = "cache")]
    #[test]
    fn test_set_table_invalidates_cache() {
        let mut router = Router::new(Calls::default());
        router.resolve("edx");
        router.resolve("edx");
        assert_eq!(router.cache_stats().hits, 1);

        router.set_table(RouteTable::learners());
        assert_eq!(router.cache_stats().invalidations, 1);
    }
}
