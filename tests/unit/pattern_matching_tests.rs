//! Unit tests for route pattern matching
//!
//! Covers the three learners patterns plus the general token rules.

#[cfg(test)]
mod pattern_tests {
    use learners_router::{CompiledPattern, NavigationError, RouteTable, Page};

    fn compile(pattern: &str) -> CompiledPattern {
        CompiledPattern::parse(pattern).unwrap()
    }

    #[test]
    fn test_roster_pattern_captures_query() {
        let pattern = compile("(/)(?*queryString)");

        let m = pattern.matches("?text_search=some_username").unwrap();
        assert_eq!(m.get("queryString"), Some("text_search=some_username"));
        assert_eq!(m.into_args(), vec![Some("text_search=some_username".to_string()), None]);
    }

    #[test]
    fn test_detail_pattern_rejects_nested_paths() {
        let pattern = compile(":username(/)(?*queryString)");

        assert!(pattern.matches("username").is_some());
        assert!(pattern.matches("username/").is_some());
        assert!(pattern.matches("username/?a=b").is_some());
        assert!(pattern.matches("this/does/not/match").is_none());
        assert!(pattern.matches("").is_none());
    }

    #[test]
    fn test_not_found_pattern_matches_everything() {
        let pattern = compile("*notFound");
        for fragment in ["", "a", "a/b", "a/b/?c", "??"] {
            assert!(pattern.matches(fragment).is_some(), "{:?}", fragment);
        }
    }

    #[test]
    fn test_capture_names_in_order() {
        let pattern = compile("courses/:course/learners/:username(?*queryString)");
        let names: Vec<&str> = pattern.capture_names().collect();
        assert_eq!(names, vec!["course", "username", "queryString"]);
    }

    #[test]
    fn test_nested_optional_groups() {
        let pattern = compile("learners(/:username(/))");

        assert_eq!(pattern.matches("learners").unwrap().get("username"), None);
        assert_eq!(
            pattern.matches("learners/edx/").unwrap().get("username"),
            Some("edx")
        );
        assert!(pattern.matches("learners/edx/x").is_none());
    }

    #[test]
    fn test_unbalanced_group_reports_pattern() {
        match CompiledPattern::parse("(/)(?*queryString") {
            Err(NavigationError::InvalidPattern { pattern, message }) => {
                assert_eq!(pattern, "(/)(?*queryString");
                assert_eq!(message, "unclosed '('");
            }
            other => panic!("expected InvalidPattern, got {:?}", other),
        }
    }

    #[test]
    fn test_table_priority_wins_over_later_routes() {
        let table = RouteTable::new()
            .route("*anything", Page::NotFound)
            .and_then(|table| table.route(":username", Page::LearnerDetail))
            .unwrap();

        let (index, _) = table.resolve("edx").unwrap();
        assert_eq!(table.routes()[index].page(), Page::NotFound);
    }
}
