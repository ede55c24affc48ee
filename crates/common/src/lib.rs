//! Shared types and configuration for the stepback workspace.

pub mod config;
pub mod types;

pub use config::{ConfigError, ControllerConfig, OverlapPolicy};
pub use types::{EntityId, Transform};

pub fn crate_info() -> &'static str {
    "stepback-common v0.1.0"
}
