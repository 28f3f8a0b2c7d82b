//! Unit tests for caseboard.

mod commit_tests;
mod hit_testing_tests;
