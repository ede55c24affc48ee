use std::fmt::Debug;

use crate::action::{Action, MoveAction, MoveTarget};

/// Last-in-first-out record of applied actions.
///
/// Unbounded by default. With a capacity limit the oldest entry is forgotten
/// once the limit is exceeded, and can no longer be undone.
#[derive(Debug, Clone)]
pub struct ActionHistory<A = MoveAction> {
    stack: Vec<A>,
    capacity: Option<usize>,
}

impl<A> ActionHistory<A> {
    /// Create an empty, unbounded history.
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            capacity: None,
        }
    }

    /// Create an empty history that keeps at most `limit` actions.
    /// A limit of zero is treated as one.
    pub fn with_capacity_limit(limit: usize) -> Self {
        Self {
            stack: Vec::new(),
            capacity: Some(limit.max(1)),
        }
    }

    /// Number of actions that can still be undone.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Whether there is nothing to undo.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// The most recently applied action.
    pub fn last(&self) -> Option<&A> {
        self.stack.last()
    }

    /// Maximum recorded actions, or `None` when unbounded.
    pub fn capacity_limit(&self) -> Option<usize> {
        self.capacity
    }
}

impl<A: Action + Debug> ActionHistory<A> {
    /// Record `action`, then apply it. `None` is a no-op.
    pub fn execute(&mut self, target: &mut dyn MoveTarget, action: Option<A>) {
        let Some(action) = action else {
            return;
        };
        tracing::debug!(?action, depth = self.stack.len() + 1, "execute");
        self.stack.push(action);
        if let Some(top) = self.stack.last() {
            top.apply(target);
        }

        if let Some(limit) = self.capacity {
            while self.stack.len() > limit {
                let evicted = self.stack.remove(0);
                tracing::debug!(?evicted, limit, "history full, oldest action dropped");
            }
        }
    }

    /// Revert the most recent action, then forget it.
    /// Returns false when there was nothing to undo.
    pub fn undo(&mut self, target: &mut dyn MoveTarget) -> bool {
        let Some(top) = self.stack.last() else {
            return false;
        };
        top.revert(target);
        let undone = self.stack.pop();
        tracing::debug!(?undone, depth = self.stack.len(), "undo");
        true
    }
}

impl<A> Default for ActionHistory<A> {
    fn default() -> Self {
        Self::new()
    }
}
