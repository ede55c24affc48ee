use glam::Vec3;
use serde::Serialize;
use stepback_common::{ControllerConfig, EntityId};
use stepback_history::{ActionHistory, MoveAction, MoveTarget};
use stepback_input::{InputSource, Key, click_point, select_direction};
use stepback_kernel::Scene;
use stepback_motion::{Playback, PlaybackStats};

use crate::rig::Rig;

/// What one call to [`PlayerController::update`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FrameReport {
    /// Offset of the discrete step taken this frame.
    pub moved: Option<Vec3>,
    /// Click destination of the animated move started this frame.
    pub animated: Option<Vec3>,
    /// Whether an action was undone this frame.
    pub undone: bool,
    #[serde(skip)]
    pub playback: PlaybackStats,
    /// Entity position once the frame finished.
    pub position: Option<Vec3>,
}

/// Moves one entity in response to input and keeps the moves undoable.
///
/// The controller holds only the entity's handle. The scene stays owned by the
/// host and is lent to `update` each frame.
#[derive(Debug, Clone)]
pub struct PlayerController {
    entity: EntityId,
    config: ControllerConfig,
    history: ActionHistory<MoveAction>,
    playback: Playback,
}

impl PlayerController {
    /// Create a controller for `entity` with an empty history and idle playback.
    pub fn new(entity: EntityId, config: ControllerConfig) -> Self {
        let history = match config.history_capacity {
            Some(limit) => ActionHistory::with_capacity_limit(limit),
            None => ActionHistory::new(),
        };
        Self {
            entity,
            playback: Playback::new(config.overlap),
            config,
            history,
        }
    }

    /// Handle of the entity this controller moves.
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// Tuning the controller was built with.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Recorded, undoable actions.
    pub fn history(&self) -> &ActionHistory<MoveAction> {
        &self.history
    }

    /// Animated moves still in flight.
    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    /// Run one frame: direction keys, then click-to-move, then undo, then
    /// advance any animated moves by `dt` seconds.
    pub fn update(&mut self, scene: &mut Scene, input: &impl InputSource, dt: f32) -> FrameReport {
        let _span = tracing::trace_span!("player_update", entity = %self.entity.short()).entered();
        let mut report = FrameReport::default();
        let entity = self.entity;

        let mut rig = Rig {
            scene: &mut *scene,
            playback: &mut self.playback,
            move_duration: self.config.move_duration,
        };

        let step = select_direction(input, self.config.step)
            .filter(|_| rig.position(entity).is_some());
        report.moved = step;
        self.history
            .execute(&mut rig, step.map(|offset| MoveAction::discrete(entity, offset)));

        let move_to = click_point(input).and_then(|hit| {
            let start = rig.position(entity)?;
            Some(MoveAction::animated(entity, start, hit))
        });
        if let Some(MoveAction::AnimatedMoveTo { destination, .. }) = move_to {
            report.animated = Some(destination);
        }
        self.history.execute(&mut rig, move_to);

        if input.key_pressed(Key::Undo) {
            report.undone = self.history.undo(&mut rig);
            if !report.undone {
                tracing::debug!("undo pressed with empty history");
            }
        }

        report.playback = self.playback.tick(scene, dt);
        report.position = scene.position(entity);
        report
    }

    /// Drive the playback alone, without sampling input, until no move is
    /// playing or `max_frames` ticks have run. Returns the ticks run.
    pub fn settle(&mut self, scene: &mut Scene, dt: f32, max_frames: usize) -> usize {
        let mut frames = 0;
        while !self.playback.is_idle() && frames < max_frames {
            self.playback.tick(scene, dt);
            frames += 1;
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepback_common::{OverlapPolicy, Transform};
    use stepback_input::InputFrame;

    const DT: f32 = 0.125;

    fn setup(config: ControllerConfig) -> (Scene, PlayerController) {
        let mut scene = Scene::new();
        let id = scene.spawn(Transform::default());
        (scene, PlayerController::new(id, config))
    }

    fn press(key: Key) -> InputFrame {
        InputFrame::idle().with_key(key)
    }

    fn click(hit: Vec3) -> InputFrame {
        InputFrame::idle().with_click(Some(hit))
    }

    #[test]
    fn arrow_steps_and_undo() {
        let (mut scene, mut pc) = setup(ControllerConfig::default());
        let id = pc.entity();

        let r = pc.update(&mut scene, &press(Key::Right), DT);
        assert_eq!(r.moved, Some(Vec3::X));
        assert_eq!(scene.position(id), Some(Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(pc.history().len(), 1);

        pc.update(&mut scene, &press(Key::Up), DT);
        assert_eq!(scene.position(id), Some(Vec3::new(1.0, 0.0, 1.0)));
        assert_eq!(pc.history().len(), 2);

        let r = pc.update(&mut scene, &press(Key::Undo), DT);
        assert!(r.undone);
        assert_eq!(scene.position(id), Some(Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(pc.history().len(), 1);

        pc.update(&mut scene, &press(Key::Undo), DT);
        assert_eq!(scene.position(id), Some(Vec3::ZERO));
        assert!(pc.history().is_empty());
    }

    #[test]
    fn idle_frame_records_nothing() {
        let (mut scene, mut pc) = setup(ControllerConfig::default());
        let r = pc.update(&mut scene, &InputFrame::idle(), DT);
        assert_eq!(r.moved, None);
        assert_eq!(r.animated, None);
        assert!(!r.undone);
        assert!(pc.history().is_empty());
        assert_eq!(r.position, Some(Vec3::ZERO));
    }

    #[test]
    fn undo_on_fresh_controller_is_harmless() {
        let (mut scene, mut pc) = setup(ControllerConfig::default());
        let r = pc.update(&mut scene, &press(Key::Undo), DT);
        assert!(!r.undone);
        assert_eq!(r.position, Some(Vec3::ZERO));
    }

    #[test]
    fn multiple_arrows_take_the_highest_priority() {
        let (mut scene, mut pc) = setup(ControllerConfig::default());
        let frame = InputFrame::idle()
            .with_key(Key::Right)
            .with_key(Key::Down);
        pc.update(&mut scene, &frame, DT);
        assert_eq!(scene.position(pc.entity()), Some(Vec3::NEG_Z));
        assert_eq!(pc.history().len(), 1);
    }

    #[test]
    fn move_and_undo_in_the_same_frame_cancel_out() {
        let (mut scene, mut pc) = setup(ControllerConfig::default());
        pc.update(&mut scene, &press(Key::Left), DT);

        let frame = InputFrame::idle().with_key(Key::Up).with_key(Key::Undo);
        let r = pc.update(&mut scene, &frame, DT);
        assert_eq!(r.moved, Some(Vec3::Z));
        assert!(r.undone);
        assert_eq!(scene.position(pc.entity()), Some(Vec3::NEG_X));
        assert_eq!(pc.history().len(), 1);
    }

    #[test]
    fn click_move_reaches_destination_with_height_pinned() {
        let (mut scene, mut pc) = setup(ControllerConfig::default());
        let id = pc.entity();

        let r = pc.update(&mut scene, &click(Vec3::new(5.0, 4.0, 3.0)), DT);
        assert_eq!(r.animated, Some(Vec3::new(5.0, 4.0, 3.0)));
        assert_eq!(pc.history().len(), 1);
        assert_eq!(
            pc.history().last(),
            Some(&MoveAction::animated(id, Vec3::ZERO, Vec3::new(5.0, 4.0, 3.0)))
        );
        // One tick in: an eighth of the way there.
        assert_eq!(scene.position(id), Some(Vec3::new(1.25, 0.0, 0.75)));

        for _ in 0..3 {
            pc.update(&mut scene, &InputFrame::idle(), DT);
        }
        assert_eq!(scene.position(id), Some(Vec3::new(5.0, 0.0, 3.0)));
        assert!(pc.playback().is_idle());
    }

    #[test]
    fn undo_click_move_animates_back() {
        let (mut scene, mut pc) = setup(ControllerConfig::default());
        let id = pc.entity();
        pc.update(&mut scene, &click(Vec3::new(4.0, 0.0, 0.0)), DT);
        pc.settle(&mut scene, DT, 100);
        assert_eq!(scene.position(id), Some(Vec3::new(4.0, 0.0, 0.0)));

        let r = pc.update(&mut scene, &press(Key::Undo), DT);
        assert!(r.undone);
        // Undo only starts the return trip.
        assert_eq!(scene.position(id), Some(Vec3::new(3.0, 0.0, 0.0)));
        let frames = pc.settle(&mut scene, DT, 100);
        assert_eq!(frames, 3);
        assert_eq!(scene.position(id), Some(Vec3::ZERO));
        assert!(pc.history().is_empty());
    }

    #[test]
    fn click_that_misses_records_nothing() {
        let (mut scene, mut pc) = setup(ControllerConfig::default());
        let r = pc.update(&mut scene, &InputFrame::idle().with_click(None), DT);
        assert_eq!(r.animated, None);
        assert!(pc.history().is_empty());
        assert!(pc.playback().is_idle());
    }

    #[test]
    fn second_click_replaces_in_flight_move() {
        let (mut scene, mut pc) = setup(ControllerConfig::default());
        let id = pc.entity();
        pc.update(&mut scene, &click(Vec3::new(8.0, 0.0, 0.0)), DT);
        pc.update(&mut scene, &InputFrame::idle(), DT);
        assert_eq!(scene.position(id), Some(Vec3::new(4.0, 0.0, 0.0)));

        pc.update(&mut scene, &click(Vec3::new(4.0, 0.0, 8.0)), DT);
        assert_eq!(pc.playback().active_count(), 1);
        assert_eq!(scene.position(id), Some(Vec3::new(4.0, 0.0, 2.0)));
        pc.settle(&mut scene, DT, 100);
        assert_eq!(scene.position(id), Some(Vec3::new(4.0, 0.0, 8.0)));

        // The second move recorded where the first one had got to.
        assert_eq!(
            pc.history().last(),
            Some(&MoveAction::animated(
                id,
                Vec3::new(4.0, 0.0, 0.0),
                Vec3::new(4.0, 0.0, 8.0)
            ))
        );
    }

    #[test]
    fn overlapping_clicks_race_with_latest_writer_winning() {
        let config = ControllerConfig {
            overlap: OverlapPolicy::Overlap,
            ..ControllerConfig::default()
        };
        let (mut scene, mut pc) = setup(config);
        let id = pc.entity();
        pc.update(&mut scene, &click(Vec3::new(8.0, 0.0, 0.0)), DT);
        assert_eq!(scene.position(id), Some(Vec3::new(2.0, 0.0, 0.0)));

        pc.update(&mut scene, &click(Vec3::new(2.0, 0.0, 8.0)), DT);
        assert_eq!(pc.playback().active_count(), 2);
        // The second task started from (2,0,0) and writes after the first.
        assert_eq!(scene.position(id), Some(Vec3::new(2.0, 0.0, 2.0)));

        // First task finishes two ticks later and stops writing.
        pc.update(&mut scene, &InputFrame::idle(), DT);
        pc.update(&mut scene, &InputFrame::idle(), DT);
        assert_eq!(pc.playback().active_count(), 1);
        assert_eq!(scene.position(id), Some(Vec3::new(2.0, 0.0, 6.0)));

        pc.settle(&mut scene, DT, 100);
        assert_eq!(scene.position(id), Some(Vec3::new(2.0, 0.0, 8.0)));
    }

    #[test]
    fn arrow_during_animation_is_overwritten_by_playback() {
        let (mut scene, mut pc) = setup(ControllerConfig::default());
        let id = pc.entity();
        pc.update(&mut scene, &click(Vec3::new(4.0, 0.0, 0.0)), DT);
        pc.update(&mut scene, &press(Key::Up), DT);
        assert_eq!(scene.position(id), Some(Vec3::new(2.0, 0.0, 0.0)));
        assert_eq!(pc.history().len(), 2);
    }

    #[test]
    fn history_capacity_from_config() {
        let config = ControllerConfig {
            history_capacity: Some(1),
            step: 2.0,
            ..ControllerConfig::default()
        };
        let (mut scene, mut pc) = setup(config);
        let id = pc.entity();
        pc.update(&mut scene, &press(Key::Right), DT);
        pc.update(&mut scene, &press(Key::Right), DT);
        assert_eq!(pc.history().len(), 1);

        pc.update(&mut scene, &press(Key::Undo), DT);
        pc.update(&mut scene, &press(Key::Undo), DT);
        assert_eq!(scene.position(id), Some(Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn despawned_entity_is_skipped() {
        let (mut scene, mut pc) = setup(ControllerConfig::default());
        scene.despawn(pc.entity());
        let r = pc.update(&mut scene, &click(Vec3::ONE), DT);
        assert_eq!(r.animated, None);
        assert_eq!(r.position, None);
        assert!(pc.history().is_empty());

        let r = pc.update(&mut scene, &press(Key::Up), DT);
        assert_eq!(r.moved, None);
        assert_eq!(r.position, None);
        assert!(pc.history().is_empty());
    }
}
