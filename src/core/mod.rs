//! Core types: configuration and remote URL handling

pub mod config;
pub mod remote_url;

pub use config::{ConfigError, GoConfig};
pub use remote_url::{parse_remote_url, Platform, RemoteInfo};
