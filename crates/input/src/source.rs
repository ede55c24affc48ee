use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Keys the player controller listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Undo,
}

impl Key {
    /// Direction keys in the order they win when several go down together.
    pub const DIRECTIONS: [Key; 4] = [Key::Up, Key::Down, Key::Left, Key::Right];

    /// Unit axis a direction key moves along. `None` for non-direction keys.
    pub fn axis(self) -> Option<Vec3> {
        match self {
            Key::Up => Some(Vec3::Z),
            Key::Down => Some(Vec3::NEG_Z),
            Key::Left => Some(Vec3::NEG_X),
            Key::Right => Some(Vec3::X),
            Key::Undo => None,
        }
    }
}

/// Host-supplied input for one frame.
pub trait InputSource {
    /// Whether `key` went down this frame.
    fn key_pressed(&self, key: Key) -> bool;
    /// Whether the secondary pointer button went down this frame.
    fn secondary_pressed(&self) -> bool;
    /// Ray-cast from the active viewpoint through the pointer into the scene's
    /// collidable geometry.
    fn raycast_pointer(&self) -> Option<Vec3>;
}

/// The point the player clicked this frame, if any.
pub fn click_point(input: &impl InputSource) -> Option<Vec3> {
    if !input.secondary_pressed() {
        return None;
    }
    let hit = input.raycast_pointer();
    if hit.is_none() {
        tracing::trace!("secondary click hit nothing");
    }
    hit
}

/// Displacement chosen by the direction keys this frame, scaled by `step`.
///
/// Only one direction wins: up, then down, then left, then right.
pub fn select_direction(input: &impl InputSource, step: f32) -> Option<Vec3> {
    Key::DIRECTIONS
        .into_iter()
        .find(|k| input.key_pressed(*k))
        .and_then(Key::axis)
        .map(|axis| axis * step)
}
