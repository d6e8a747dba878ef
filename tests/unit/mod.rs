//! Unit tests module
//!
//! Exercises the public helpers one at a time, outside the router.

mod fragment_normalization_tests;
mod pattern_matching_tests;
mod query_params_tests;
