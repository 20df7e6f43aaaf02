use serde::{Deserialize, Serialize};

use dodger_core::geometry::{Aabb, HitboxInset};
use dodger_core::input::HorizontalIntent;

use crate::config::{FloorPolicy, PlayerConfig};
use crate::error::WorldError;
use crate::level_gen::Platform;

/// State of the player body.
///
/// `jumping` is the only jump-state flag: `grounded --jump()--> airborne
/// --land with vy > 0--> grounded`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerState {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub jumping: bool,
    pub lives: u32,
    width: f32,
    height: f32,
    speed: f32,
    gravity: f32,
    jump_power: f32,
    hitbox_inset: HitboxInset,
    floor: FloorPolicy,
}

impl PlayerState {
    pub fn new(x: f32, y: f32, cfg: &PlayerConfig) -> Result<Self, WorldError> {
        // Validates size and finiteness up front.
        Aabb::new(x, y, cfg.width, cfg.height)?;
        cfg.hitbox.validate_for(cfg.width, cfg.height)?;
        Ok(Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            jumping: false,
            lives: cfg.lives,
            width: cfg.width,
            height: cfg.height,
            speed: cfg.speed,
            gravity: cfg.gravity,
            jump_power: cfg.jump_power,
            hitbox_inset: cfg.hitbox,
            floor: cfg.floor,
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Visual sprite bounds.
    pub fn bounds(&self) -> Aabb {
        Aabb {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Collision box: the sprite bounds shrunk by the configured inset.
    pub fn hitbox(&self) -> Aabb {
        self.bounds().inset(&self.hitbox_inset)
    }

    /// Set `vx` from this frame's held direction. Must be reasserted every
    /// frame; `update` zeroes it after integration.
    pub fn set_horizontal_intent(&mut self, intent: HorizontalIntent) {
        self.vx = intent.sign() * self.speed;
    }

    /// Start a jump if grounded. No-op while airborne.
    pub fn jump(&mut self) {
        if !self.jumping {
            self.vy = self.jump_power;
            self.jumping = true;
        }
    }

    pub fn apply_gravity(&mut self) {
        match self.floor {
            FloorPolicy::Accumulate => self.vy += self.gravity,
            FloorPolicy::Clamp { floor_y } => {
                if self.y < floor_y - self.height {
                    self.vy += self.gravity;
                }
            },
        }
    }

    /// Integrate velocity, then resolve against `platforms` in order.
    pub fn update(&mut self, platforms: &[Platform], world_width: f32) {
        // Horizontal move is dropped if it would leave [0, world_width].
        let next_x = self.x + self.vx;
        if next_x < 0.0 || next_x + self.width > world_width {
            self.vx = 0.0;
        }

        self.x += self.vx;
        self.y += self.vy;
        self.vx = 0.0;

        if let FloorPolicy::Clamp { floor_y } = self.floor {
            let rest_y = floor_y - self.height;
            if self.y >= rest_y {
                self.y = rest_y;
                self.vy = 0.0;
                self.jumping = false;
            }
        }

        for platform in platforms {
            self.resolve_platform(platform);
        }
    }

    fn resolve_platform(&mut self, platform: &Platform) {
        if !self.hitbox().overlaps(platform.bounds()) {
            return;
        }

        if self.vy > 0.0 {
            // Falling: land on top
            self.y = platform.top() - self.height;
            self.vy = 0.0;
            self.jumping = false;
        } else if self.vy < 0.0 {
            // Rising: stop at the underside
            self.y = platform.underside();
            self.vy = 0.0;
        }
    }

    /// Lose one life, never going below zero. Returns true when no lives are
    /// left.
    pub fn take_damage(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }

    pub fn respawn(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.vx = 0.0;
        self.vy = 0.0;
        self.jumping = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD_WIDTH: f32 = 1920.0;

    fn player_at(x: f32, y: f32) -> PlayerState {
        PlayerState::new(x, y, &PlayerConfig::default()).unwrap()
    }

    fn floor_platform() -> Platform {
        Platform::new(0.0, 1080.0, 1920.0, 20.0).unwrap()
    }

    #[test]
    fn gravity_pulls_down() {
        let mut player = player_at(50.0, 100.0);
        let y_before = player.y;
        player.apply_gravity();
        player.update(&[], WORLD_WIDTH);
        assert!(player.y > y_before, "Gravity should pull player down");
        assert_eq!(player.vy, 0.5);
    }

    #[test]
    fn lands_on_floor_platform() {
        let mut player = player_at(50.0, 1070.0);
        player.jumping = true;

        player.apply_gravity();
        player.update(&[floor_platform()], WORLD_WIDTH);

        assert_eq!(player.y, 1080.0 - player.height());
        assert_eq!(player.vy, 0.0);
        assert!(!player.jumping);
    }

    #[test]
    fn standing_player_stays_on_platform() {
        let mut player = player_at(50.0, 1030.0);
        for _ in 0..100 {
            player.apply_gravity();
            player.update(&[floor_platform()], WORLD_WIDTH);
        }
        assert_eq!(player.y, 1030.0);
        assert!(!player.jumping);
    }

    #[test]
    fn ceiling_stops_ascent() {
        let ceiling = Platform::new(0.0, 900.0, 400.0, 20.0).unwrap();
        // Hitbox top just below the underside; one jump frame reaches it.
        let mut player = player_at(100.0, 915.0);
        player.jump();
        player.apply_gravity();
        player.update(&[ceiling], WORLD_WIDTH);

        assert_eq!(player.y, 920.0);
        assert_eq!(player.vy, 0.0);
        assert!(player.jumping, "Hitting a ceiling does not ground the player");
    }

    #[test]
    fn jump_sets_upward_velocity() {
        let mut player = player_at(50.0, 1030.0);
        player.jump();
        assert_eq!(player.vy, -10.0);
        assert!(player.jumping);
    }

    #[test]
    fn second_jump_is_ignored_while_airborne() {
        let mut player = player_at(50.0, 500.0);
        player.jump();
        player.apply_gravity();
        let vy_after_first = player.vy;
        player.jump();
        assert_eq!(player.vy, vy_after_first, "Double jump must be a no-op");
        assert!(player.jumping);
    }

    #[test]
    fn horizontal_velocity_is_one_shot() {
        let mut player = player_at(100.0, 100.0);
        player.set_horizontal_intent(HorizontalIntent::Right);
        assert_eq!(player.vx, 5.0);
        player.update(&[], WORLD_WIDTH);
        assert_eq!(player.x, 105.0);
        assert_eq!(player.vx, 0.0);

        // No intent reasserted: no movement
        player.update(&[], WORLD_WIDTH);
        assert_eq!(player.x, 105.0);

        player.set_horizontal_intent(HorizontalIntent::Left);
        assert_eq!(player.vx, -5.0);
        player.set_horizontal_intent(HorizontalIntent::None);
        assert_eq!(player.vx, 0.0);
    }

    #[test]
    fn horizontal_move_blocked_at_world_edges() {
        let mut player = player_at(2.0, 100.0);
        player.set_horizontal_intent(HorizontalIntent::Left);
        player.update(&[], WORLD_WIDTH);
        assert_eq!(player.x, 2.0, "Move past x=0 should be dropped");

        let mut player = player_at(WORLD_WIDTH - 52.0, 100.0);
        player.set_horizontal_intent(HorizontalIntent::Right);
        player.update(&[], WORLD_WIDTH);
        assert_eq!(player.x, WORLD_WIDTH - 52.0, "Move past right edge dropped");
    }

    #[test]
    fn take_damage_floors_at_zero() {
        let mut player = player_at(0.0, 0.0);
        assert!(!player.take_damage());
        assert!(!player.take_damage());
        assert!(player.take_damage());
        assert_eq!(player.lives, 0);
        assert!(player.take_damage());
        assert_eq!(player.lives, 0, "Lives must never go negative");
    }

    #[test]
    fn hitbox_uses_inset() {
        let player = player_at(50.0, 1030.0);
        let hitbox = player.hitbox();
        assert_eq!(hitbox.x, 60.0);
        assert_eq!(hitbox.y, 1040.0);
        assert_eq!(hitbox.width, 30.0);
        assert_eq!(hitbox.height, 40.0);
    }

    #[test]
    fn platforms_resolved_in_order() {
        // Two overlapping platforms: the later one wins.
        let high = Platform::new(0.0, 1000.0, 200.0, 100.0).unwrap();
        let low = Platform::new(0.0, 1040.0, 200.0, 60.0).unwrap();
        let mut player = player_at(50.0, 1000.0);
        player.vy = 2.0;
        player.update(&[high, low], WORLD_WIDTH);
        // `high` lands the player at 950 with vy = 0; `low` no longer overlaps
        assert_eq!(player.y, 950.0);
        assert_eq!(player.vy, 0.0);
    }

    #[test]
    fn clamp_floor_policy_rests_on_floor() {
        let cfg = PlayerConfig {
            floor: FloorPolicy::Clamp { floor_y: 480.0 },
            ..PlayerConfig::default()
        };
        let mut player = PlayerState::new(50.0, 300.0, &cfg).unwrap();
        player.jumping = true;
        for _ in 0..200 {
            player.apply_gravity();
            player.update(&[], WORLD_WIDTH);
        }
        assert_eq!(player.y, 430.0);
        assert_eq!(player.vy, 0.0);
        assert!(!player.jumping);

        // Gravity stops accumulating on the floor line
        player.apply_gravity();
        assert_eq!(player.vy, 0.0);

        // Jumping off the floor still works
        player.jump();
        player.apply_gravity();
        player.update(&[], WORLD_WIDTH);
        assert!(player.y < 430.0);
    }

    #[test]
    fn respawn_resets_motion() {
        let mut player = player_at(500.0, 2000.0);
        player.vy = 40.0;
        player.jumping = true;
        player.respawn(50.0, 1000.0);
        assert_eq!((player.x, player.y), (50.0, 1000.0));
        assert_eq!(player.vy, 0.0);
        assert!(!player.jumping);
    }

    #[test]
    fn invalid_player_config_rejected() {
        let cfg = PlayerConfig {
            width: 0.0,
            ..PlayerConfig::default()
        };
        assert!(PlayerState::new(0.0, 0.0, &cfg).is_err());

        let cfg = PlayerConfig {
            hitbox: HitboxInset::new(0.0, 50.0, 0.0, 0.0),
            ..PlayerConfig::default()
        };
        assert!(PlayerState::new(0.0, 0.0, &cfg).is_err());
    }

    // ================================================================
    // Property-based tests (proptest)
    // ================================================================

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_platform() -> impl Strategy<Value = Platform> {
            (0.0f32..5000.0, 100.0f32..1500.0, 60.0f32..400.0, 20.0f32..100.0)
                .prop_map(|(x, y, w, h)| Platform::new(x, y, w, h).unwrap())
        }

        proptest! {
            #[test]
            fn falling_player_lands_on_top(
                platform in any_platform(),
                vy in 0.1f32..20.0,
                penetration in 0.5f32..15.0,
            ) {
                let b = *platform.bounds();
                let mut player = player_at(0.0, 0.0);
                player.x = b.x + b.width / 2.0 - player.width() / 2.0;
                // After integration the feet sit `penetration` inside the top.
                player.y = b.y + penetration - player.height() - vy;
                player.vy = vy;
                player.jumping = true;

                player.update(&[platform], 10_000.0);

                prop_assert_eq!(player.y, b.y - player.height());
                prop_assert_eq!(player.vy, 0.0);
                prop_assert!(!player.jumping);
            }

            #[test]
            fn rising_player_stops_at_underside(
                platform in any_platform(),
                speed in 0.1f32..20.0,
                penetration in 0.5f32..15.0,
            ) {
                let b = *platform.bounds();
                let mut player = player_at(0.0, 0.0);
                player.x = b.x + b.width / 2.0 - player.width() / 2.0;
                // After integration the hitbox top sits `penetration` above the underside.
                let inset_top = player.hitbox().y - player.y;
                player.y = b.bottom() - inset_top - penetration + speed;
                player.vy = -speed;
                player.jumping = true;

                player.update(&[platform], 10_000.0);

                prop_assert_eq!(player.y, b.bottom());
                prop_assert_eq!(player.vy, 0.0);
            }

            #[test]
            fn jump_idempotent_while_airborne(extra_jumps in 1usize..10) {
                let mut player = player_at(50.0, 500.0);
                player.jump();
                let vy = player.vy;
                for _ in 0..extra_jumps {
                    player.jump();
                }
                prop_assert_eq!(player.vy, vy);
            }

            #[test]
            fn player_stays_finite_and_in_bounds(
                moves in proptest::collection::vec(0u8..6, 10..200)
            ) {
                let platforms = [
                    Platform::new(0.0, 1080.0, 1920.0, 20.0).unwrap(),
                    Platform::new(300.0, 950.0, 200.0, 20.0).unwrap(),
                ];
                let mut player = player_at(50.0, 1030.0);
                for m in moves {
                    let intent = match m % 3 {
                        0 => HorizontalIntent::Left,
                        1 => HorizontalIntent::Right,
                        _ => HorizontalIntent::None,
                    };
                    player.set_horizontal_intent(intent);
                    if m >= 3 {
                        player.jump();
                    }
                    player.apply_gravity();
                    player.update(&platforms, WORLD_WIDTH);

                    prop_assert!(player.x.is_finite() && player.y.is_finite());
                    prop_assert!(player.vx.is_finite() && player.vy.is_finite());
                    prop_assert!(player.x >= 0.0 && player.x + player.width() <= WORLD_WIDTH);
                }
            }
        }
    }
}
