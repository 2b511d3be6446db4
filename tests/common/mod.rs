//! Shared helpers for integration tests.

pub mod assertions;
pub mod fixtures;
pub mod git_helpers;
