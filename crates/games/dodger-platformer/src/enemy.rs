use rand::Rng;
use serde::{Deserialize, Serialize};

use dodger_core::geometry::Aabb;

use crate::config::EnemyConfig;
use crate::error::WorldError;

/// A roaming body that reflects off the arena bounds. Ignores platforms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnemyState {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    width: f32,
    height: f32,
}

impl EnemyState {
    pub fn new(x: f32, y: f32, vx: f32, vy: f32, cfg: &EnemyConfig) -> Result<Self, WorldError> {
        Aabb::new(x, y, cfg.width, cfg.height)?;
        if !(vx.is_finite() && vy.is_finite()) {
            return Err(WorldError::InvalidConfig(
                "enemy velocity must be finite".to_string(),
            ));
        }
        Ok(Self {
            x,
            y,
            vx,
            vy,
            width: cfg.width,
            height: cfg.height,
        })
    }

    /// Random in-bounds position and random velocity components in
    /// `[-max_speed, max_speed]`.
    pub fn spawn<R: Rng>(
        rng: &mut R,
        world_width: f32,
        world_height: f32,
        cfg: &EnemyConfig,
    ) -> Result<Self, WorldError> {
        let vx = rng.random_range(-cfg.max_speed..=cfg.max_speed);
        let vy = rng.random_range(-cfg.max_speed..=cfg.max_speed);
        let mut enemy = Self::new(0.0, 0.0, vx, vy, cfg)?;
        enemy.reset_position(rng, world_width, world_height);
        Ok(enemy)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Integrate and reflect off the arena walls, keeping the body inside
    /// `[0, world_width - width] x [0, world_height - height]`.
    pub fn update(&mut self, world_width: f32, world_height: f32) {
        self.x += self.vx;
        self.y += self.vy;

        let max_x = (world_width - self.width).max(0.0);
        if self.x < 0.0 {
            self.x = 0.0;
            self.vx = self.vx.abs();
        } else if self.x > max_x {
            self.x = max_x;
            self.vx = -self.vx.abs();
        }

        let max_y = (world_height - self.height).max(0.0);
        if self.y < 0.0 {
            self.y = 0.0;
            self.vy = self.vy.abs();
        } else if self.y > max_y {
            self.y = max_y;
            self.vy = -self.vy.abs();
        }
    }

    /// Recycle to a random in-bounds position. Velocity is kept.
    pub fn reset_position<R: Rng>(&mut self, rng: &mut R, world_width: f32, world_height: f32) {
        let max_x = (world_width - self.width).max(0.0);
        let max_y = (world_height - self.height).max(0.0);
        self.x = rng.random_range(0.0..=max_x);
        self.y = rng.random_range(0.0..=max_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const W: f32 = 1920.0;
    const H: f32 = 1080.0;

    fn enemy(x: f32, y: f32, vx: f32, vy: f32) -> EnemyState {
        EnemyState::new(x, y, vx, vy, &EnemyConfig::default()).unwrap()
    }

    #[test]
    fn moves_by_velocity() {
        let mut e = enemy(100.0, 100.0, 2.0, -1.5);
        e.update(W, H);
        assert_eq!((e.x, e.y), (102.0, 98.5));
    }

    #[test]
    fn reflects_off_left_wall() {
        let mut e = enemy(1.0, 100.0, -3.0, 0.0);
        e.update(W, H);
        assert_eq!(e.x, 0.0);
        assert_eq!(e.vx, 3.0);
    }

    #[test]
    fn reflects_off_right_and_bottom_walls() {
        let mut e = enemy(W - 41.0, H - 41.0, 3.0, 3.0);
        e.update(W, H);
        assert_eq!(e.x, W - 40.0);
        assert_eq!(e.y, H - 40.0);
        assert_eq!(e.vx, -3.0);
        assert_eq!(e.vy, -3.0);
    }

    #[test]
    fn reset_keeps_velocity_and_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut e = enemy(100.0, 100.0, 2.0, -2.0);
        for _ in 0..100 {
            e.reset_position(&mut rng, W, H);
            assert!(e.x >= 0.0 && e.x <= W - 40.0);
            assert!(e.y >= 0.0 && e.y <= H - 40.0);
            assert_eq!((e.vx, e.vy), (2.0, -2.0));
        }
    }

    #[test]
    fn spawn_velocity_in_range() {
        let mut rng = StdRng::seed_from_u64(9);
        let cfg = EnemyConfig::default();
        for _ in 0..100 {
            let e = EnemyState::spawn(&mut rng, W, H, &cfg).unwrap();
            assert!((-3.0..=3.0).contains(&e.vx));
            assert!((-3.0..=3.0).contains(&e.vy));
        }
    }

    #[test]
    fn nan_velocity_rejected() {
        let cfg = EnemyConfig::default();
        assert!(EnemyState::new(0.0, 0.0, f32::NAN, 0.0, &cfg).is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn enemy_never_leaves_arena(
                x in 0.0f32..=(W - 40.0),
                y in 0.0f32..=(H - 40.0),
                vx in -3.0f32..=3.0,
                vy in -3.0f32..=3.0,
                frames in 1usize..2000,
            ) {
                let mut e = enemy(x, y, vx, vy);
                for _ in 0..frames {
                    e.update(W, H);
                    prop_assert!(e.x >= 0.0 && e.x <= W - 40.0, "x={}", e.x);
                    prop_assert!(e.y >= 0.0 && e.y <= H - 40.0, "y={}", e.y);
                }
            }
        }
    }
}
