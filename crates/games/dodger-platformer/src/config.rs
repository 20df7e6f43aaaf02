use serde::{Deserialize, Deserializer, Serialize};

use dodger_core::geometry::HitboxInset;

use crate::error::WorldError;

/// Gravity added to the player's vertical velocity every frame (px/frame^2).
pub const GRAVITY: f32 = 0.5;
/// Horizontal move speed (px/frame).
pub const MOVE_SPEED: f32 = 5.0;
/// Initial vertical velocity of a jump. Negative is up.
pub const JUMP_POWER: f32 = -10.0;
/// Player sprite width.
pub const PLAYER_WIDTH: f32 = 50.0;
/// Player sprite height.
pub const PLAYER_HEIGHT: f32 = 50.0;
/// Lives at session start.
pub const STARTING_LIVES: u32 = 3;
/// World height; also the lower bound bombs bounce back from.
pub const WORLD_HEIGHT: f32 = 1080.0;
/// Platforms are laid out until the cursor passes this x.
pub const LEVEL_LENGTH: f32 = 6000.0;
/// Visible width of the render viewport.
pub const VIEWPORT_WIDTH: f32 = 1920.0;
/// Distance the camera keeps between its left edge and the player.
pub const CAMERA_LEAD: f32 = 320.0;
/// How far below the world a player may fall before being respawned.
pub const FALL_MARGIN: f32 = 500.0;
/// Player hitbox margins. Keys left out of `[player.hitbox]` fall back to
/// these, not to zero.
pub const PLAYER_HITBOX: HitboxInset = HitboxInset {
    left: 10.0,
    top: 10.0,
    right: 10.0,
    bottom: 0.0,
};

/// How the player's vertical motion is bounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FloorPolicy {
    /// Gravity accumulates every frame; only platforms stop a fall.
    #[default]
    Accumulate,
    /// Gravity stops at a fixed floor line and the player rests on it.
    Clamp { floor_y: f32 },
}

/// World dimensions and camera behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSection {
    pub level_length: f32,
    pub height: f32,
    pub viewport_width: f32,
    pub camera_lead: f32,
    pub fall_margin: f32,
}

impl Default for WorldSection {
    fn default() -> Self {
        Self {
            level_length: LEVEL_LENGTH,
            height: WORLD_HEIGHT,
            viewport_width: VIEWPORT_WIDTH,
            camera_lead: CAMERA_LEAD,
            fall_margin: FALL_MARGIN,
        }
    }
}

/// Ranges for procedural platform layout, in whole pixels (inclusive).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelGenConfig {
    pub min_width: u32,
    pub max_width: u32,
    pub min_height: u32,
    pub max_height: u32,
    pub min_gap: u32,
    pub max_gap: u32,
}

impl Default for LevelGenConfig {
    fn default() -> Self {
        Self {
            min_width: 100,
            max_width: 300,
            min_height: 20,
            max_height: 100,
            min_gap: 50,
            max_gap: 200,
        }
    }
}

/// Player physics parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub gravity: f32,
    pub jump_power: f32,
    pub lives: u32,
    pub spawn_x: f32,
    #[serde(deserialize_with = "player_hitbox")]
    pub hitbox: HitboxInset,
    pub floor: FloorPolicy,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed: MOVE_SPEED,
            gravity: GRAVITY,
            jump_power: JUMP_POWER,
            lives: STARTING_LIVES,
            spawn_x: 50.0,
            hitbox: PLAYER_HITBOX,
            floor: FloorPolicy::Accumulate,
        }
    }
}

#[derive(Deserialize)]
struct PartialInset {
    left: Option<f32>,
    top: Option<f32>,
    right: Option<f32>,
    bottom: Option<f32>,
}

/// Fill margins missing from a partial `[player.hitbox]` table from
/// [`PLAYER_HITBOX`].
fn player_hitbox<'de, D: Deserializer<'de>>(deserializer: D) -> Result<HitboxInset, D::Error> {
    let partial = PartialInset::deserialize(deserializer)?;
    Ok(HitboxInset {
        left: partial.left.unwrap_or(PLAYER_HITBOX.left),
        top: partial.top.unwrap_or(PLAYER_HITBOX.top),
        right: partial.right.unwrap_or(PLAYER_HITBOX.right),
        bottom: partial.bottom.unwrap_or(PLAYER_HITBOX.bottom),
    })
}

/// Bomb parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BombConfig {
    pub count: usize,
    pub width: f32,
    pub height: f32,
    pub gravity: f32,
    /// Lower bound of the downward speed given on spawn and recycle.
    pub min_speed: f32,
    pub max_speed: f32,
    /// Bombs (re)spawn with `y` in `[0, spawn_y_max]`.
    pub spawn_y_max: f32,
}

impl Default for BombConfig {
    fn default() -> Self {
        Self {
            count: 5,
            width: 20.0,
            height: 20.0,
            gravity: 0.2,
            min_speed: 2.0,
            max_speed: 5.0,
            spawn_y_max: 200.0,
        }
    }
}

/// Enemy parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub count: usize,
    pub width: f32,
    pub height: f32,
    /// Velocity components are drawn from `[-max_speed, max_speed]`.
    pub max_speed: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            count: 3,
            width: 40.0,
            height: 40.0,
            max_speed: 3.0,
        }
    }
}

/// Top-level game configuration, loadable from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DodgerConfig {
    pub seed: u64,
    pub world: WorldSection,
    pub level: LevelGenConfig,
    pub player: PlayerConfig,
    pub bombs: BombConfig,
    pub enemies: EnemyConfig,
}

impl Default for DodgerConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            world: WorldSection::default(),
            level: LevelGenConfig::default(),
            player: PlayerConfig::default(),
            bombs: BombConfig::default(),
            enemies: EnemyConfig::default(),
        }
    }
}

impl DodgerConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is missing
    /// or unparseable.
    pub fn load() -> Self {
        let path =
            std::env::var("DODGER_CONFIG").unwrap_or_else(|_| "config/dodger.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<DodgerConfig>(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded configuration from {path}");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    DodgerConfig::default()
                },
            },
            Err(_) => {
                tracing::info!("No {path} found, using defaults");
                DodgerConfig::default()
            },
        }
    }

    /// Reject configurations that would produce degenerate geometry or
    /// non-finite physics.
    pub fn validate(&self) -> Result<(), WorldError> {
        let w = &self.world;
        ensure(
            w.level_length > 0.0 && w.level_length.is_finite(),
            "world.level_length must be positive",
        )?;
        ensure(
            w.height > 0.0 && w.height.is_finite(),
            "world.height must be positive",
        )?;
        ensure(
            w.viewport_width > 0.0 && w.viewport_width.is_finite(),
            "world.viewport_width must be positive",
        )?;
        ensure(
            w.camera_lead >= 0.0 && w.camera_lead.is_finite(),
            "world.camera_lead must be >= 0",
        )?;
        ensure(
            w.fall_margin >= 0.0 && w.fall_margin.is_finite(),
            "world.fall_margin must be >= 0",
        )?;

        let l = &self.level;
        ensure(
            l.min_width > 0 && l.min_width <= l.max_width,
            "level width range must be positive and ordered",
        )?;
        ensure(
            l.min_height > 0 && l.min_height <= l.max_height,
            "level height range must be positive and ordered",
        )?;
        ensure(l.min_gap <= l.max_gap, "level gap range must be ordered")?;
        ensure(
            (l.max_height as f32) < w.height,
            "level.max_height must be below world.height",
        )?;

        let p = &self.player;
        ensure(
            p.width > 0.0 && p.height > 0.0,
            "player size must be positive",
        )?;
        ensure(
            p.width < w.level_length && p.height < w.height,
            "player must fit inside the world",
        )?;
        ensure(
            p.speed >= 0.0 && p.speed.is_finite(),
            "player.speed must be >= 0",
        )?;
        ensure(
            p.gravity.is_finite() && p.gravity >= 0.0,
            "player.gravity must be >= 0",
        )?;
        ensure(
            p.jump_power.is_finite() && p.jump_power < 0.0,
            "player.jump_power must be negative (upward)",
        )?;
        ensure(p.lives > 0, "player.lives must be at least 1")?;
        ensure(
            p.spawn_x >= 0.0 && p.spawn_x + p.width <= w.level_length,
            "player.spawn_x must be inside the world",
        )?;
        p.hitbox.validate_for(p.width, p.height)?;
        if let FloorPolicy::Clamp { floor_y } = p.floor {
            ensure(
                floor_y.is_finite() && floor_y > p.height,
                "player.floor.floor_y must be finite and greater than the player height",
            )?;
        }

        let b = &self.bombs;
        ensure(b.width > 0.0 && b.height > 0.0, "bomb size must be positive")?;
        ensure(
            b.width < w.level_length,
            "bomb must fit inside the world",
        )?;
        ensure(
            b.gravity.is_finite() && b.gravity >= 0.0,
            "bombs.gravity must be >= 0",
        )?;
        ensure(
            b.min_speed.is_finite() && b.min_speed > 0.0 && b.min_speed <= b.max_speed,
            "bomb speed range must be positive and ordered",
        )?;
        ensure(
            b.max_speed.is_finite(),
            "bombs.max_speed must be finite",
        )?;
        ensure(
            b.spawn_y_max >= 0.0 && b.spawn_y_max < w.height,
            "bombs.spawn_y_max must be inside the world",
        )?;

        let e = &self.enemies;
        ensure(
            e.width > 0.0 && e.height > 0.0,
            "enemy size must be positive",
        )?;
        ensure(
            e.width < w.level_length && e.height < w.height,
            "enemy must fit inside the world",
        )?;
        ensure(
            e.max_speed.is_finite() && e.max_speed >= 0.0,
            "enemies.max_speed must be >= 0",
        )?;

        Ok(())
    }
}

fn ensure(condition: bool, message: &str) -> Result<(), WorldError> {
    if condition {
        Ok(())
    } else {
        Err(WorldError::InvalidConfig(message.to_string()))
    }
}
