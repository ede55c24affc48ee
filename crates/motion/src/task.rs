use glam::Vec3;
use stepback_common::EntityId;

/// Linear move of one entity from `start` to `end` over `duration` seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveToTask {
    pub entity: EntityId,
    pub elapsed: f32,
    pub start: Vec3,
    pub end: Vec3,
    pub duration: f32,
}

impl MoveToTask {
    /// Build a task from the entity's current position. The destination keeps
    /// its x and z but takes `from.y`, so the move stays on the ground plane.
    pub fn new(entity: EntityId, from: Vec3, to: Vec3, duration: f32) -> Self {
        Self {
            entity,
            elapsed: 0.0,
            start: from,
            end: Vec3::new(to.x, from.y, to.z),
            duration,
        }
    }

    /// Advance by `dt` seconds and return the position for this frame.
    pub fn advance(&mut self, dt: f32) -> Vec3 {
        self.elapsed += dt.max(0.0);
        if self.is_finished() {
            self.end
        } else {
            self.start.lerp(self.end, self.elapsed / self.duration)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Completed fraction in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }
}
