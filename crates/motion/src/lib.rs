//! Motion: animated moves as explicit task state advanced once per frame.
//!
//! # Invariants
//! - A task is advanced only by an external `tick(dt)`; nothing here sleeps or spawns.
//! - A finished task always leaves its entity exactly on the destination.
//! - The destination height is pinned to the height the move started from.

mod playback;
mod task;

pub use playback::{Playback, PlaybackStats};
pub use task::MoveToTask;

pub fn crate_info() -> &'static str {
    "stepback-motion v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("motion"));
    }
}
