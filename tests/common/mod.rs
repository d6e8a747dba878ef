//! Test utilities for router tests
//!
//! Provides a recording controller and helpers shared by the integration
//! test crates.

#![allow(dead_code)]

use learners_router::*;

/// One controller call, with the arguments it received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Roster {
        query_string: Option<String>,
        extra: Option<String>,
    },
    Detail {
        username: String,
        query_string: Option<String>,
        extra: Option<String>,
    },
    NotFound {
        path: String,
        query_string: Option<String>,
    },
    ShowPage,
}

/// Controller that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingController {
    pub calls: Vec<Call>,
}

impl RecordingController {
    /// Calls other than the show-page hook.
    pub fn page_calls(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|call| **call != Call::ShowPage)
            .collect()
    }

    /// Number of times the show-page hook fired.
    pub fn show_page_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| **call == Call::ShowPage)
            .count()
    }

    pub fn last_page_call(&self) -> Option<&Call> {
        self.page_calls().last().copied()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl LearnersController for RecordingController {
    fn show_learner_roster_page(&mut self, query_string: Option<&str>, extra: Option<&str>) {
        self.calls.push(Call::Roster {
            query_string: query_string.map(String::from),
            extra: extra.map(String::from),
        });
    }

    fn show_learner_detail_page(
        &mut self,
        username: &str,
        query_string: Option<&str>,
        extra: Option<&str>,
    ) {
        self.calls.push(Call::Detail {
            username: username.to_string(),
            query_string: query_string.map(String::from),
            extra: extra.map(String::from),
        });
    }

    fn show_not_found_page(&mut self, path: &str, query_string: Option<&str>) {
        self.calls.push(Call::NotFound {
            path: path.to_string(),
            query_string: query_string.map(String::from),
        });
    }

    fn on_show_page(&mut self) {
        self.calls.push(Call::ShowPage);
    }
}

/// Initialise logging once per test binary.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A router over the learners table, with logging initialised.
pub fn learners_router() -> Router<RecordingController> {
    init_logging();
    Router::new(RecordingController::default())
}

/// Build an expected roster call.
pub fn roster(query_string: Option<&str>) -> Call {
    Call::Roster {
        query_string: query_string.map(String::from),
        extra: None,
    }
}

/// Build an expected detail call.
pub fn detail(username: &str, query_string: Option<&str>) -> Call {
    Call::Detail {
        username: username.to_string(),
        query_string: query_string.map(String::from),
        extra: None,
    }
}

/// Build an expected not-found call.
pub fn not_found(path: &str, query_string: Option<&str>) -> Call {
    Call::NotFound {
        path: path.to_string(),
        query_string: query_string.map(String::from),
    }
}
