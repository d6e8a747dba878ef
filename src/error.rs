//! Navigation outcomes and errors.
//!
//! Dispatch itself never fails: a fragment no route accepts goes to the
//! not-found page. Errors only come from the edges:
//!
//! - [`NavigationError::InvalidPattern`] when a route pattern does not compile.
//! - [`NavigationError::OutsideRoot`] when [`Router::load_url`](crate::Router::load_url)
//!   is handed a URL that is not under the configured root.
//!
//! [`NavigationResult`] reports what a navigate call did.
//!
//! # Examples
//!
//! ```
//! use learners_router::{NavigationResult, Page};
//!
//! let result = NavigationResult::Dispatched {
//!     page: Page::LearnerDetail,
//!     fragment: "edx".into(),
//! };
//! assert!(result.is_dispatched());
//! assert_eq!(result.page(), Some(Page::LearnerDetail));
//! ```

use crate::route::Page;
use std::fmt;

// ============================================================================
// Navigation Result
// ============================================================================

/// Outcome of a single [`Router::navigate`](crate::Router::navigate) call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationResult {
    /// A page handler ran (the not-found page included).
    Dispatched { page: Page, fragment: String },
    /// The fragment was recorded without running a handler (`trigger` off).
    Silent { fragment: String },
    /// The fragment was already current; nothing ran.
    Unchanged { fragment: String },
    /// No route in the table accepted the fragment.
    Unmatched { fragment: String },
}

impl NavigationResult {
    /// Check if a page handler ran.
    pub fn is_dispatched(&self) -> bool {
        matches!(self, NavigationResult::Dispatched { .. })
    }

    /// Check if the fragment was recorded without dispatch.
    pub fn is_silent(&self) -> bool {
        matches!(self, NavigationResult::Silent { .. })
    }

    /// Check if the navigation was skipped as a repeat.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, NavigationResult::Unchanged { .. })
    }

    /// Check if the route table had no route for the fragment.
    ///
    /// Never happens with a table that ends in a catch-all.
    pub fn is_unmatched(&self) -> bool {
        matches!(self, NavigationResult::Unmatched { .. })
    }

    /// The page that was shown, if any.
    pub fn page(&self) -> Option<Page> {
        match self {
            NavigationResult::Dispatched { page, .. } => Some(*page),
            _ => None,
        }
    }

    /// The normalized fragment the navigation ended on.
    pub fn fragment(&self) -> &str {
        match self {
            NavigationResult::Dispatched { fragment, .. }
            | NavigationResult::Silent { fragment }
            | NavigationResult::Unchanged { fragment }
            | NavigationResult::Unmatched { fragment } => fragment,
        }
    }
}

// ============================================================================
// Navigation Error
// ============================================================================

/// Errors raised while building a route table or loading a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// A route pattern failed to compile.
    InvalidPattern { pattern: String, message: String },

    /// A full URL did not start with the router's root.
    OutsideRoot { url: String, root: String },
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::InvalidPattern { pattern, message } => {
                write!(f, "Invalid route pattern '{}': {}", pattern, message)
            }
            NavigationError::OutsideRoot { url, root } => {
                write!(f, "URL '{}' is outside the router root '{}'", url, root)
            }
        }
    }
}

impl std::error::Error for NavigationError {}

// ============================================================================
// Tests
// ============================================================================
