//! # learners-router
//!
//! Fragment router for the learner analytics dashboard.
//!
//! A [`Router`] owns a [`LearnersController`] and a [`RouteTable`]. Each call
//! to [`Router::navigate`] normalizes the URL fragment, picks the first route
//! that matches and calls the page handler on the controller with the
//! captured arguments. Handlers whose name starts with `show` are followed by
//! the controller's [`on_show_page`](LearnersController::on_show_page) hook.
//!
//! The default table has three routes, tried in order:
//!
//! | pattern                         | handler                    |
//! |---------------------------------|----------------------------|
//! | `(/)(?*queryString)`            | `show_learner_roster_page` |
//! | `:username(/)(?*queryString)`   | `show_learner_detail_page` |
//! | `*notFound`                     | `show_not_found_page`      |
//!
//! Nothing is ever rejected: a fragment no other route accepts lands on the
//! not-found page.
//!
//! # Example
//!
//! ```
//! use learners_router::{LearnersController, NavigateOptions, Router};
//!
//! #[derive(Default)]
//! struct Pages {
//!     shown: Vec<String>,
//! }
//!
//! impl LearnersController for Pages {
//!     fn show_learner_roster_page(&mut self, query: Option<&str>, _extra: Option<&str>) {
//!         self.shown.push(format!("roster {:?}", query));
//!     }
//!
//!     fn show_learner_detail_page(&mut self, username: &str, _q: Option<&str>, _e: Option<&str>) {
//!         self.shown.push(format!("detail {}", username));
//!     }
//!
//!     fn show_not_found_page(&mut self, path: &str, _query: Option<&str>) {
//!         self.shown.push(format!("404 {}", path));
//!     }
//! }
//!
//! let mut router = Router::new(Pages::default());
//! router.navigate("edx/", NavigateOptions::trigger());
//! router.navigate("a/b/c", NavigateOptions::trigger());
//!
//! assert_eq!(router.controller().shown, vec!["detail edx", "404 a/b/c"]);
//! ```
//!
//! # Features
//!
//! - `log` (default) / `tracing`: logging backend, see [`logging`].
//! - `middleware` (default): [`NavigationMiddleware`] observers.
//! - `cache` (default): LRU memoization of resolved fragments.

#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "cache")]
pub mod cache;
pub mod controller;
pub mod error;
pub mod fragment;
pub mod logging;
pub mod matching;
#[cfg(feature = "middleware")]
pub mod middleware;
pub mod params;
pub mod route;
pub mod router;

#[cfg(feature = "cache")]
pub use cache::{CacheStats, RouteCache};
pub use controller::LearnersController;
pub use error::{NavigationError, NavigationResult};
pub use fragment::{normalize_fragment, normalize_root, split_query, strip_root};
pub use matching::{CompiledPattern, PatternMatch};
#[cfg(feature = "middleware")]
pub use middleware::{middleware_fn, FnMiddleware, NavigationMiddleware};
pub use params::{decode_component, decode_uri, QueryParams};
pub use route::{Page, Route, RouteTable};
pub use router::{NavigateOptions, NavigationEvent, Router, RouterOptions};
