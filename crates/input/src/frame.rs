use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::source::{InputSource, Key};

/// A recorded input sample for one frame.
///
/// Lets a run be scripted from a file or built inline in tests, without a
/// window or a physics scene. `hit` stands in for the ray-cast result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFrame {
    pub keys: Vec<Key>,
    pub secondary: bool,
    pub hit: Option<Vec3>,
}

impl InputFrame {
    /// A frame with nothing pressed.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Add a key that went down this frame.
    pub fn with_key(mut self, key: Key) -> Self {
        self.keys.push(key);
        self
    }

    /// Press the secondary button; `hit` is what the ray-cast found.
    pub fn with_click(mut self, hit: Option<Vec3>) -> Self {
        self.secondary = true;
        self.hit = hit;
        self
    }
}

impl InputSource for InputFrame {
    fn key_pressed(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    fn secondary_pressed(&self) -> bool {
        self.secondary
    }

    fn raycast_pointer(&self) -> Option<Vec3> {
        self.hit
    }
}
