use glam::Vec3;
use stepback_common::EntityId;
use stepback_history::MoveTarget;
use stepback_kernel::Scene;
use stepback_motion::{MoveToTask, Playback};

/// Borrowed view of the scene plus playback that actions move things through.
pub struct Rig<'a> {
    pub scene: &'a mut Scene,
    pub playback: &'a mut Playback,
    /// Seconds an animated move takes.
    pub move_duration: f32,
}

impl MoveTarget for Rig<'_> {
    fn position(&self, entity: EntityId) -> Option<Vec3> {
        self.scene.position(entity)
    }

    fn translate(&mut self, entity: EntityId, offset: Vec3) {
        self.scene.translate(entity, offset);
    }

    fn animate_to(&mut self, entity: EntityId, destination: Vec3) {
        let Some(from) = self.scene.position(entity) else {
            tracing::warn!(entity = %entity.short(), "animate_to on missing entity");
            return;
        };
        self.playback
            .start(MoveToTask::new(entity, from, destination, self.move_duration));
    }
}
