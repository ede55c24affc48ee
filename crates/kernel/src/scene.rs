use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use stepback_common::{EntityId, Transform};

/// Per-entity data stored in the scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityData {
    pub transform: Transform,
}

/// The set of entities a controller can move.
///
/// Uses BTreeMap so iteration order does not depend on hashing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    entities: BTreeMap<EntityId, EntityData>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entities in the scene.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Read-only access to all entities.
    pub fn entities(&self) -> &BTreeMap<EntityId, EntityData> {
        &self.entities
    }

    /// Spawn a new entity with the given transform. Returns its id.
    pub fn spawn(&mut self, transform: Transform) -> EntityId {
        let id = EntityId::new();
        self.spawn_with_id(id, transform);
        id
    }

    /// Spawn an entity under a caller-chosen id, replacing any existing one.
    pub fn spawn_with_id(&mut self, id: EntityId, transform: Transform) {
        tracing::debug!(entity = %id.short(), position = ?transform.position, "spawn");
        self.entities.insert(id, EntityData { transform });
    }

    /// Remove an entity. Returns the data if it existed.
    pub fn despawn(&mut self, id: EntityId) -> Option<EntityData> {
        self.entities.remove(&id)
    }

    /// Get a reference to entity data.
    pub fn get(&self, id: EntityId) -> Option<&EntityData> {
        self.entities.get(&id)
    }

    /// Current position of an entity.
    pub fn position(&self, id: EntityId) -> Option<Vec3> {
        self.entities.get(&id).map(|d| d.transform.position)
    }

    /// Overwrite an entity's position. Returns false if the entity is gone.
    pub fn set_position(&mut self, id: EntityId, position: Vec3) -> bool {
        match self.entities.get_mut(&id) {
            Some(data) => {
                data.transform.position = position;
                true
            }
            None => {
                tracing::warn!(entity = %id.short(), "set_position on missing entity");
                false
            }
        }
    }

    /// Add `offset` to an entity's position. Returns false if the entity is gone.
    pub fn translate(&mut self, id: EntityId, offset: Vec3) -> bool {
        match self.entities.get_mut(&id) {
            Some(data) => {
                data.transform.position += offset;
                true
            }
            None => {
                tracing::warn!(entity = %id.short(), "translate on missing entity");
                false
            }
        }
    }
}
