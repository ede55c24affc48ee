use glam::Vec3;
use serde::{Deserialize, Serialize};
use stepback_common::EntityId;

/// The capability an action invokes to move things.
///
/// Implemented by whatever owns the scene and the animation playback; actions
/// only ever see it for the duration of an `apply` or `revert` call.
pub trait MoveTarget {
    /// Current position of an entity, if it still exists.
    fn position(&self, entity: EntityId) -> Option<Vec3>;
    /// Shift an entity's position by `offset` immediately.
    fn translate(&mut self, entity: EntityId, offset: Vec3);
    /// Request an animated move of `entity` toward `destination`.
    /// Returns before the motion completes.
    fn animate_to(&mut self, entity: EntityId, destination: Vec3);
}

/// A unit of reversible work.
///
/// Calling `revert` without a prior `apply`, or either method twice in a row,
/// has no defined meaning.
pub trait Action {
    fn apply(&self, target: &mut dyn MoveTarget);
    fn revert(&self, target: &mut dyn MoveTarget);
}

/// A player movement. Each variant captures everything it needs for both
/// directions when it is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MoveAction {
    /// Step by a fixed offset. Undo = step back by the same offset.
    DiscreteMove { entity: EntityId, offset: Vec3 },
    /// Animate to `destination`. Undo = animate back to `start`.
    AnimatedMoveTo {
        entity: EntityId,
        start: Vec3,
        destination: Vec3,
    },
}

impl MoveAction {
    /// Step `entity` by `offset`.
    pub fn discrete(entity: EntityId, offset: Vec3) -> Self {
        Self::DiscreteMove { entity, offset }
    }

    /// Animate `entity` to `destination`, remembering `start` for undo.
    pub fn animated(entity: EntityId, start: Vec3, destination: Vec3) -> Self {
        Self::AnimatedMoveTo {
            entity,
            start,
            destination,
        }
    }

    /// The entity this action moves.
    pub fn entity(&self) -> EntityId {
        match self {
            Self::DiscreteMove { entity, .. } | Self::AnimatedMoveTo { entity, .. } => *entity,
        }
    }
}

impl Action for MoveAction {
    fn apply(&self, target: &mut dyn MoveTarget) {
        match *self {
            Self::DiscreteMove { entity, offset } => target.translate(entity, offset),
            Self::AnimatedMoveTo {
                entity,
                destination,
                ..
            } => target.animate_to(entity, destination),
        }
    }

    fn revert(&self, target: &mut dyn MoveTarget) {
        match *self {
            Self::DiscreteMove { entity, offset } => target.translate(entity, -offset),
            Self::AnimatedMoveTo { entity, start, .. } => target.animate_to(entity, start),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::BTreeMap;

    /// A target that moves instantly and records animation requests.
    #[derive(Debug, Default)]
    pub struct InstantTarget {
        pub positions: BTreeMap<EntityId, Vec3>,
        pub requests: Vec<(EntityId, Vec3)>,
    }

    impl InstantTarget {
        pub fn with_entity(position: Vec3) -> (Self, EntityId) {
            let id = EntityId::new();
            let mut t = Self::default();
            t.positions.insert(id, position);
            (t, id)
        }

        pub fn at(&self, id: EntityId) -> Vec3 {
            self.positions[&id]
        }
    }

    impl MoveTarget for InstantTarget {
        fn position(&self, entity: EntityId) -> Option<Vec3> {
            self.positions.get(&entity).copied()
        }

        fn translate(&mut self, entity: EntityId, offset: Vec3) {
            if let Some(p) = self.positions.get_mut(&entity) {
                *p += offset;
            }
        }

        fn animate_to(&mut self, entity: EntityId, destination: Vec3) {
            self.requests.push((entity, destination));
            if let Some(p) = self.positions.get_mut(&entity) {
                *p = destination;
            }
        }
    }
}
