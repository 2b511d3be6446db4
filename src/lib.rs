//! gitgo - personal git branch workflow
//!
//! Work branches that track the mainline, rebase pulls, publishing for
//! review, landing on the mainline, and syncing work between machines.
//! Every operation is a fixed sequence of `git` invocations.

pub mod cli;
pub mod core;
pub mod git;
pub mod telemetry;
pub mod util;
