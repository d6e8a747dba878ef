//! Unit tests for fragment normalization
//!
//! `normalize_fragment` must make every spelling of the root equivalent while
//! leaving trailing slashes for the routes to judge.

use learners_router::{normalize_fragment, normalize_root, split_query, strip_root};

#[test]
fn test_root_spellings() {
    for fragment in ["", "/", "#", " ", "/  "] {
        assert_eq!(normalize_fragment(fragment), "", "{:?}", fragment);
    }
}

#[test]
fn test_single_segment_spellings() {
    assert_eq!(normalize_fragment("username"), "username");
    assert_eq!(normalize_fragment("/username"), "username");
    assert_eq!(normalize_fragment("#username"), "username");
    assert_eq!(normalize_fragment("username/"), "username/");
}

#[test]
fn test_query_survives_normalization() {
    let fragment = normalize_fragment("/?text_search=some_username");
    assert_eq!(split_query(fragment), ("", Some("text_search=some_username")));
}

#[test]
fn test_root_round_trip_through_strip() {
    let root = normalize_root("courses/course-v1:edX+DemoX+Demo_Course/learners");
    assert_eq!(root, "/courses/course-v1:edX+DemoX+Demo_Course/learners/");

    let url = "/courses/course-v1:edX+DemoX+Demo_Course/learners/edx?page=2";
    assert_eq!(strip_root(url, &root), Some("edx?page=2"));
}
