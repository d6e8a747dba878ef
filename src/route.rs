//! Route table: patterns in priority order, each bound to a page.

use crate::controller::LearnersController;
use crate::error::NavigationError;
use crate::matching::{CompiledPattern, PatternMatch};
use crate::{debug_log, trace_log};
use std::fmt;

/// Handlers named with this prefix are followed by the show-page hook.
pub const SHOW_PREFIX: &str = "show";

/// Pattern of the learner roster route.
pub const ROSTER_PATTERN: &str = "(/)(?*queryString)";
/// Pattern of the learner detail route.
pub const DETAIL_PATTERN: &str = ":username(/)(?*queryString)";
/// Catch-all pattern of the not-found route.
pub const NOT_FOUND_PATTERN: &str = "*notFound";

/// The page a route dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// The learner roster.
    LearnerRoster,
    /// A single learner's detail page.
    LearnerDetail,
    /// The not-found page.
    NotFound,
}

impl Page {
    /// Name of the controller method this page calls.
    pub const fn handler_name(self) -> &'static str {
        match self {
            Page::LearnerRoster => "show_learner_roster_page",
            Page::LearnerDetail => "show_learner_detail_page",
            Page::NotFound => "show_not_found_page",
        }
    }

    /// Whether dispatching this page fires the show-page hook.
    pub fn fires_show_hook(self) -> bool {
        self.handler_name().starts_with(SHOW_PREFIX)
    }

    /// Call this page's handler with positional arguments.
    ///
    /// Missing arguments are passed as `None` (or `""` where the handler
    /// takes a plain `&str`).
    pub fn invoke<C>(self, controller: &mut C, args: &[Option<String>])
    where
        C: LearnersController + ?Sized,
    {
        let arg = |index: usize| args.get(index).and_then(|value| value.as_deref());

        match self {
            Page::LearnerRoster => controller.show_learner_roster_page(arg(0), arg(1)),
            Page::LearnerDetail => {
                controller.show_learner_detail_page(arg(0).unwrap_or_default(), arg(1), arg(2));
            }
            Page::NotFound => controller.show_not_found_page(arg(0).unwrap_or_default(), arg(1)),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.handler_name())
    }
}

/// A compiled pattern bound to a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pattern: CompiledPattern,
    page: Page,
}

impl Route {
    /// Compile `pattern` and bind it to `page`.
    pub fn new(pattern: &str, page: Page) -> Result<Self, NavigationError> {
        Ok(Self {
            pattern: CompiledPattern::parse(pattern)?,
            page,
        })
    }

    /// The compiled pattern.
    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    /// The page this route shows.
    pub fn page(&self) -> Page {
        self.page
    }
}

/// Routes in priority order; the first match wins.
///
/// # Example
///
/// ```
/// use learners_router::{Page, RouteTable};
///
/// let table = RouteTable::new()
///     .route("(/)", Page::LearnerRoster)?
///     .route("*path", Page::NotFound)?;
///
/// let (index, _) = table.resolve("anything/at/all").unwrap();
/// assert_eq!(table.routes()[index].page(), Page::NotFound);
/// # Ok::<(), learners_router::NavigationError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The dashboard's table: roster, learner detail, then the catch-all.
    pub fn learners() -> Self {
        let routes = [
            (ROSTER_PATTERN, Page::LearnerRoster),
            (DETAIL_PATTERN, Page::LearnerDetail),
            (NOT_FOUND_PATTERN, Page::NotFound),
        ]
        .into_iter()
        .map(|(pattern, page)| Route::new(pattern, page).expect("built-in route pattern"))
        .collect();

        Self { routes }
    }

    /// Append a route with the lowest priority so far.
    pub fn route(mut self, pattern: &str, page: Page) -> Result<Self, NavigationError> {
        self.push(Route::new(pattern, page)?);
        Ok(self)
    }

    /// Append an already compiled route.
    pub fn push(&mut self, route: Route) {
        debug_log!(
            "Registered route '{}' -> {} (priority {})",
            route.pattern,
            route.page,
            self.routes.len()
        );
        self.routes.push(route);
    }

    /// All routes, highest priority first.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Return `true` if the table has no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Return the number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Find the first route matching a normalized fragment.
    ///
    /// Returns the route's index together with its captures.
    pub fn resolve(&self, fragment: &str) -> Option<(usize, PatternMatch)> {
        self.routes.iter().enumerate().find_map(|(index, route)| {
            trace_log!("Trying route '{}' for '{}'", route.pattern, fragment);
            route.pattern.matches(fragment).map(|m| (index, m))
        })
    }
}
