//! CLI command implementations
//!
//! Each workflow command group is implemented in its own module.

pub mod close;
pub mod discard;
pub mod info;
pub mod log;
pub mod pr;
pub mod publish;
pub mod pull;
pub mod push;
pub mod review;
pub mod status;
pub mod sync;
pub mod work;
