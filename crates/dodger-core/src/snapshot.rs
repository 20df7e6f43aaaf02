use serde::{Deserialize, Serialize};

use crate::geometry::Aabb;

/// Read-only view of a fully settled frame, handed to the render layer.
///
/// A snapshot owns its data, so it can be passed to another thread or
/// encoded for another process after `update` returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub frame: u64,
    pub player: Aabb,
    pub player_hitbox: Aabb,
    pub platforms: Vec<Aabb>,
    pub bombs: Vec<Aabb>,
    pub enemies: Vec<Aabb>,
    pub lives: u32,
    pub camera_x: f32,
    pub game_over: bool,
}

impl RenderSnapshot {
    /// MessagePack encoding.
    pub fn encode(&self) -> Result<Vec<u8>, rmp_serde::encode::Error> {
        rmp_serde::to_vec(self)
    }

    pub fn decode(data: &[u8]) -> Result<Self, rmp_serde::decode::Error> {
        rmp_serde::from_slice(data)
    }

    /// Translate a world-space box into screen space for the current camera.
    pub fn to_screen(&self, bounds: &Aabb) -> Aabb {
        Aabb {
            x: bounds.x - self.camera_x,
            ..*bounds
        }
    }
}
