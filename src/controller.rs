//! The page controller the router drives.

/// Page handlers for the learner dashboard.
///
/// The router calls exactly one of the `show_*` methods per dispatched
/// navigation, then [`on_show_page`](Self::on_show_page) once, since every
/// handler here follows the `show` naming convention.
///
/// Optional arguments are `None` when the fragment did not supply them;
/// they are never `Some("")`.
pub trait LearnersController {
    /// Show the learner roster. `query_string` is the query after `?`, with
    /// reserved characters still escaped.
    fn show_learner_roster_page(&mut self, query_string: Option<&str>, extra: Option<&str>);

    /// Show one learner's detail page.
    fn show_learner_detail_page(
        &mut self,
        username: &str,
        query_string: Option<&str>,
        extra: Option<&str>,
    );

    /// Show the not-found page for `path` (decoded, without the query).
    fn show_not_found_page(&mut self, path: &str, query_string: Option<&str>);

    /// Called after any `show_*` handler ran.
    fn on_show_page(&mut self) {}
}

impl<C: LearnersController + ?Sized> LearnersController for Box<C> {
    fn show_learner_roster_page(&mut self, query_string: Option<&str>, extra: Option<&str>) {
        (**self).show_learner_roster_page(query_string, extra);
    }

    fn show_learner_detail_page(
        &mut self,
        username: &str,
        query_string: Option<&str>,
        extra: Option<&str>,
    ) {
        (**self).show_learner_detail_page(username, query_string, extra);
    }

    fn show_not_found_page(&mut self, path: &str, query_string: Option<&str>) {
        (**self).show_not_found_page(path, query_string);
    }

    fn on_show_page(&mut self) {
        (**self).on_show_page();
    }
}
