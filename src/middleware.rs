//! Dispatch observers.
//!
//! Middleware sees every dispatched navigation, before and after the page
//! handler runs. It cannot change where a fragment goes; that is the route
//! table's job. Typical uses are page-view analytics, timing and logging.
//!
//! # Execution order
//!
//! Higher [`priority`](NavigationMiddleware::priority) runs first for
//! `before_dispatch` and last for `after_dispatch`. Middleware with equal
//! priority keeps registration order on the way in.
//!
//! # Example
//!
//! ```
//! use learners_router::{middleware_fn, NavigationEvent};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let views = Arc::new(AtomicUsize::new(0));
//! let counter = views.clone();
//! let page_views = middleware_fn(
//!     |_event: &NavigationEvent| {},
//!     move |_event: &NavigationEvent| {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!     },
//! );
//! # let _ = page_views;
//! ```

use crate::router::NavigationEvent;

/// Observer run around each page dispatch.
pub trait NavigationMiddleware: Send + Sync + 'static {
    /// Called after the route is resolved, before the page handler runs.
    fn before_dispatch(&self, event: &NavigationEvent);

    /// Called after the page handler and the show-page hook ran.
    fn after_dispatch(&self, event: &NavigationEvent);

    /// Middleware name for debugging.
    fn name(&self) -> &'static str {
        "NavigationMiddleware"
    }

    /// Higher runs first for `before`, last for `after`.
    fn priority(&self) -> i32 {
        0
    }
}

/// Create middleware from two closures (before and after).
pub const fn middleware_fn<B, A>(before: B, after: A) -> FnMiddleware<B, A>
where
    B: Fn(&NavigationEvent) + Send + Sync + 'static,
    A: Fn(&NavigationEvent) + Send + Sync + 'static,
{
    FnMiddleware { before, after }
}

/// Middleware created from two closures via [`middleware_fn`].
pub struct FnMiddleware<B, A> {
    before: B,
    after: A,
}

impl<B, A> NavigationMiddleware for FnMiddleware<B, A>
where
    B: Fn(&NavigationEvent) + Send + Sync + 'static,
    A: Fn(&NavigationEvent) + Send + Sync + 'static,
{
    fn before_dispatch(&self, event: &NavigationEvent) {
        (self.before)(event);
    }

    fn after_dispatch(&self, event: &NavigationEvent) {
        (self.after)(event);
    }

    fn name(&self) -> &'static str {
        "FnMiddleware"
    }
}
