use rand::Rng;
use serde::{Deserialize, Serialize};

use dodger_core::error::GeometryError;
use dodger_core::geometry::Aabb;

use crate::config::{LevelGenConfig, WorldSection};

/// A static, immovable rectangle. Never mutated after generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    bounds: Aabb,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Result<Self, GeometryError> {
        Ok(Self {
            bounds: Aabb::new(x, y, width, height)?,
        })
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn top(&self) -> f32 {
        self.bounds.y
    }

    pub fn underside(&self) -> f32 {
        self.bounds.bottom()
    }
}

/// A generated level: platforms in left-to-right insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub platforms: Vec<Platform>,
    /// Horizontal extent of the world in pixels.
    pub width: f32,
    pub height: f32,
}

impl Level {
    /// Top of the first platform under horizontal position `x`, if any.
    pub fn surface_at(&self, x: f32) -> Option<f32> {
        self.platforms
            .iter()
            .find(|p| x >= p.bounds().x && x < p.bounds().right())
            .map(Platform::top)
    }
}

/// Lay out platforms left to right from x=0, each standing on the bottom of
/// the world with a random width and height, separated by a random gap,
/// until the cursor passes `world.level_length`.
///
/// Deterministic for a given RNG state.
pub fn generate_level<R: Rng>(
    rng: &mut R,
    world: &WorldSection,
    cfg: &LevelGenConfig,
) -> Result<Level, GeometryError> {
    let mut platforms = Vec::new();
    let mut cursor = 0.0f32;

    while cursor < world.level_length {
        let width = rng.random_range(cfg.min_width..=cfg.max_width) as f32;
        let height = rng.random_range(cfg.min_height..=cfg.max_height) as f32;
        let gap = rng.random_range(cfg.min_gap..=cfg.max_gap) as f32;

        platforms.push(Platform::new(cursor, world.height - height, width, height)?);
        cursor += width + gap;
    }

    let last_right = platforms
        .last()
        .map(|p| p.bounds().right())
        .unwrap_or(0.0);

    Ok(Level {
        platforms,
        width: world.level_length.max(last_right),
        height: world.height,
    })
}
