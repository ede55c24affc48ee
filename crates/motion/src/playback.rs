use stepback_common::{EntityId, OverlapPolicy};
use stepback_kernel::Scene;

use crate::task::MoveToTask;

/// Per-tick playback statistics for instrumentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackStats {
    /// Tasks that wrote a position this tick.
    pub advanced: usize,
    /// Tasks that reached their destination this tick and were dropped.
    pub finished: usize,
}

/// Cooperative scheduler for move tasks.
///
/// Tasks run in start order. Under [`OverlapPolicy::Overlap`] several tasks may
/// drive the same entity, and the one started last writes last each tick.
#[derive(Debug, Clone, Default)]
pub struct Playback {
    policy: OverlapPolicy,
    tasks: Vec<MoveToTask>,
    stats: PlaybackStats,
}

impl Playback {
    /// Create an idle playback that resolves overlapping moves with `policy`.
    pub fn new(policy: OverlapPolicy) -> Self {
        Self {
            policy,
            tasks: Vec::new(),
            stats: PlaybackStats::default(),
        }
    }

    /// How overlapping moves for one entity are resolved.
    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    /// Schedule a task. It first moves on the next `tick`.
    pub fn start(&mut self, task: MoveToTask) {
        if self.policy == OverlapPolicy::CancelAndReplace {
            self.cancel(task.entity);
        }
        tracing::debug!(
            entity = %task.entity.short(),
            start = ?task.start,
            end = ?task.end,
            duration = task.duration,
            "move-to started"
        );
        self.tasks.push(task);
    }

    /// Drop every in-flight task for `entity`. Returns how many were dropped.
    pub fn cancel(&mut self, entity: EntityId) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.entity != entity);
        let dropped = before - self.tasks.len();
        if dropped > 0 {
            tracing::debug!(entity = %entity.short(), dropped, "move-to cancelled");
        }
        dropped
    }

    /// Advance every task by `dt` and write the resulting positions into the scene.
    pub fn tick(&mut self, scene: &mut Scene, dt: f32) -> PlaybackStats {
        let mut stats = PlaybackStats::default();
        for task in &mut self.tasks {
            let position = task.advance(dt);
            scene.set_position(task.entity, position);
            stats.advanced += 1;
            if task.is_finished() {
                stats.finished += 1;
            }
        }
        self.tasks.retain(|t| !t.is_finished());
        self.stats = stats;

        tracing::trace!(
            advanced = stats.advanced,
            finished = stats.finished,
            remaining = self.tasks.len(),
            "playback tick"
        );
        stats
    }

    /// Number of moves still playing.
    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no move is playing.
    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// In-flight tasks in start order.
    pub fn tasks(&self) -> &[MoveToTask] {
        &self.tasks
    }

    /// Statistics from the most recent tick.
    pub fn stats(&self) -> PlaybackStats {
        self.stats
    }
}
