//! Input sampling: the host's per-frame key and pointer state, reduced to the
//! few questions the player controller asks each tick.
//!
//! # Invariants
//! - At most one direction is selected per frame.
//! - The scene is ray-cast only on a frame where the secondary button went down.

pub mod frame;
pub mod source;

pub use frame::InputFrame;
pub use source::{InputSource, Key, click_point, select_direction};

pub fn crate_info() -> &'static str {
    "stepback-input v0.1.0"
}
