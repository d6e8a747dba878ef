//! Unit tests for query string access from navigation events

use learners_router::{LearnersController, NavigateOptions, QueryParams, Router};

#[derive(Default)]
struct QueryCapture {
    roster_query: Option<QueryParams>,
}

impl LearnersController for QueryCapture {
    fn show_learner_roster_page(&mut self, query_string: Option<&str>, _extra: Option<&str>) {
        self.roster_query = query_string.map(QueryParams::from_query_string);
    }

    fn show_learner_detail_page(&mut self, _: &str, _: Option<&str>, _: Option<&str>) {}

    fn show_not_found_page(&mut self, _: &str, _: Option<&str>) {}
}

#[test]
fn test_controller_parses_roster_query() {
    let mut router = Router::new(QueryCapture::default());
    router.navigate(
        "?text_search=jane+doe&ignore_segments=inactive&ignore_segments=unenrolled&page=4",
        NavigateOptions::trigger(),
    );

    let query = router.controller().roster_query.clone().unwrap();
    assert_eq!(query.get("text_search"), Some(&"jane doe".to_string()));
    assert_eq!(query.get_all("ignore_segments").map(Vec::len), Some(2));
    assert_eq!(query.get_as::<u32>("page"), Some(4));
}

#[test]
fn test_event_query_params() {
    let mut router = Router::new(QueryCapture::default());
    let event = router.resolve("edx/?order_by=problems_attempted").unwrap();

    assert_eq!(event.path(), "edx/");
    assert_eq!(
        event.query_params().get("order_by"),
        Some(&"problems_attempted".to_string())
    );
}

#[test]
fn test_event_without_query_has_empty_params() {
    let mut router = Router::new(QueryCapture::default());
    let event = router.resolve("edx").unwrap();

    assert_eq!(event.query_string(), None);
    assert!(event.query_params().is_empty());
}
