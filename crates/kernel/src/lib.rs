//! Scene kernel: the host-side entity store that actions and playback mutate.
//!
//! # Invariants
//! - Entities are addressed only through `EntityId` handles.
//! - Iteration order is deterministic (BTreeMap).
//! - Operations on a missing entity report failure and leave the scene untouched.

pub mod scene;

pub use scene::{EntityData, Scene};

pub fn crate_info() -> &'static str {
    "stepback-kernel v0.1.0"
}
