use rand::Rng;
use serde::{Deserialize, Serialize};

use dodger_core::geometry::Aabb;

use crate::config::BombConfig;
use crate::error::WorldError;
use crate::level_gen::Platform;

/// Cap on vertical speed so repeated bounces cannot grow it without bound.
pub const TERMINAL_SPEED: f32 = 30.0;

/// A falling projectile that bounces off platform tops and the world floor.
/// Never rests and is never destroyed; see [`BombState::reset_to`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BombState {
    pub x: f32,
    pub y: f32,
    pub vy: f32,
    width: f32,
    height: f32,
    gravity: f32,
    min_speed: f32,
    max_speed: f32,
}

impl BombState {
    pub fn new(x: f32, y: f32, vy: f32, cfg: &BombConfig) -> Result<Self, WorldError> {
        Aabb::new(x, y, cfg.width, cfg.height)?;
        Ok(Self {
            x,
            y,
            vy,
            width: cfg.width,
            height: cfg.height,
            gravity: cfg.gravity,
            min_speed: cfg.min_speed,
            max_speed: cfg.max_speed,
        })
    }

    /// Place a bomb at a random spot along the top band of the world.
    pub fn spawn<R: Rng>(
        rng: &mut R,
        world_width: f32,
        cfg: &BombConfig,
    ) -> Result<Self, WorldError> {
        let mut bomb = Self::new(0.0, 0.0, 0.0, cfg)?;
        let (x, y) = bomb.random_spawn_point(rng, world_width, cfg.spawn_y_max);
        bomb.reset_to(x, y, rng);
        Ok(bomb)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Fall, then bounce off the world floor and any overlapping platform top.
    ///
    /// A bounce always leaves `vy` pointing up, so overlapping several
    /// platforms in one frame still reflects only once.
    pub fn update(&mut self, platforms: &[Platform], world_height: f32) {
        self.y += self.vy;
        self.vy = (self.vy + self.gravity).clamp(-TERMINAL_SPEED, TERMINAL_SPEED);

        if self.y > world_height {
            self.y = world_height;
            self.vy = -self.vy.abs();
        }

        for platform in platforms {
            if self.bounds().overlaps(platform.bounds()) {
                self.y = platform.top() - self.height;
                self.vy = -self.vy.abs();
            }
        }
    }

    /// Recycle the bomb at `(x, y)` with a fresh random downward speed.
    pub fn reset_to<R: Rng>(&mut self, x: f32, y: f32, rng: &mut R) {
        self.x = x;
        self.y = y;
        self.vy = rng.random_range(self.min_speed..=self.max_speed);
    }

    /// Random `(x, y)` with the bomb fully inside `[0, world_width]` and
    /// `y` in `[0, spawn_y_max]`.
    pub fn random_spawn_point<R: Rng>(
        &self,
        rng: &mut R,
        world_width: f32,
        spawn_y_max: f32,
    ) -> (f32, f32) {
        let max_x = (world_width - self.width).max(0.0);
        (
            rng.random_range(0.0..=max_x),
            rng.random_range(0.0..=spawn_y_max),
        )
    }
}
