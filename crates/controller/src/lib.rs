//! Player control: samples input once per tick, turns it into undoable move
//! actions, and drives the animated-move playback.
//!
//! # Invariants
//! - Direction, click and undo checks are independent; all may fire in one tick.
//! - Every movement goes through the action history, so it can be undone.
//! - Playback advances after the tick's input has been handled.

mod controller;
mod rig;

pub use controller::{FrameReport, PlayerController};
pub use rig::Rig;

pub fn crate_info() -> &'static str {
    "stepback-controller v0.1.0"
}
