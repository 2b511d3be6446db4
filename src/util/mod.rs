//! Utility functions and helpers

pub mod cmd;

pub use cmd::{display_cmd, log_cmd};
