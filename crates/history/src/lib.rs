//! Reversible actions and their undo history.
//!
//! # Invariants
//! - Every recorded action is applied immediately after it is recorded.
//! - The top of the history is the most recently applied, not yet reverted action.
//! - `revert` exactly cancels the matching `apply` when nothing else moved the entity.

pub mod action;
pub mod history;

pub use action::{Action, MoveAction, MoveTarget};
pub use history::ActionHistory;

pub fn crate_info() -> &'static str {
    "stepback-history v0.1.0"
}
