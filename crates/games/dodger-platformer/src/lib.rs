pub mod bomb;
pub mod config;
pub mod enemy;
pub mod error;
pub mod level_gen;
pub mod physics;

use rand::SeedableRng;
use rand::rngs::StdRng;

use dodger_core::events::{GameEvent, HazardKind};
use dodger_core::input::FrameInput;
use dodger_core::simulation::FrameSimulation;
use dodger_core::snapshot::RenderSnapshot;

use bomb::BombState;
use config::{DodgerConfig, FloorPolicy, PlayerConfig};
use enemy::EnemyState;
use error::WorldError;
use level_gen::{Level, Platform, generate_level};
use physics::PlayerState;

/// A single play session: the level, the player, and fixed-size hazard pools.
///
/// Each frame runs input, gravity, player/platform resolution, bomb and
/// enemy motion, then hazard contact checks, in that order. Once lives reach
/// zero the world is frozen.
pub struct World {
    config: DodgerConfig,
    level: Level,
    player: PlayerState,
    bombs: Vec<BombState>,
    enemies: Vec<EnemyState>,
    rng: StdRng,
    spawn_x: f32,
    spawn_y: f32,
    camera_x: f32,
    frame: u64,
    game_over: bool,
}

impl World {
    /// Generate a world from `config`. The same seed always yields the same
    /// level, spawn positions, and hazard recycling sequence.
    pub fn new(config: DodgerConfig) -> Result<Self, WorldError> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let level = generate_level(&mut rng, &config.world, &config.level)?;

        let spawn_x = config.player.spawn_x;
        let spawn_y = spawn_height(&level, &config.player);
        let player = PlayerState::new(spawn_x, spawn_y, &config.player)?;

        let bombs = (0..config.bombs.count)
            .map(|_| BombState::spawn(&mut rng, level.width, &config.bombs))
            .collect::<Result<Vec<_>, _>>()?;
        let enemies = (0..config.enemies.count)
            .map(|_| EnemyState::spawn(&mut rng, level.width, level.height, &config.enemies))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            seed = config.seed,
            platforms = level.platforms.len(),
            bombs = bombs.len(),
            enemies = enemies.len(),
            width = level.width,
            "World generated"
        );

        let mut world = Self {
            config,
            level,
            player,
            bombs,
            enemies,
            rng,
            spawn_x,
            spawn_y,
            camera_x: 0.0,
            frame: 0,
            game_over: false,
        };
        world.camera_x = world.follow_camera();
        Ok(world)
    }

    pub fn config(&self) -> &DodgerConfig {
        &self.config
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.level.platforms
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn bombs(&self) -> &[BombState] {
        &self.bombs
    }

    pub fn enemies(&self) -> &[EnemyState] {
        &self.enemies
    }

    pub fn lives(&self) -> u32 {
        self.player.lives
    }

    pub fn camera_x(&self) -> f32 {
        self.camera_x
    }

    /// Horizontal camera offset keeping the player `camera_lead` pixels from
    /// the left edge, clamped to the level.
    fn follow_camera(&self) -> f32 {
        let world = &self.config.world;
        let max_x = (self.level.width - world.viewport_width).max(0.0);
        (self.player.x - world.camera_lead).clamp(0.0, max_x)
    }

    fn fell_out(&self) -> bool {
        matches!(self.config.player.floor, FloorPolicy::Accumulate)
            && self.player.y > self.level.height + self.config.world.fall_margin
    }

    /// Steps 6 and 7: damage the player and recycle each touching hazard.
    /// A sweep that takes the last life still runs to its end; the sweeps
    /// after it are skipped. Returns true when the player is out of lives.
    fn resolve_hazard_contacts(&mut self, events: &mut Vec<GameEvent>) -> bool {
        let hitbox = self.player.hitbox();
        let mut eliminated = false;

        for (index, bomb) in self.bombs.iter_mut().enumerate() {
            if !hitbox.overlaps(&bomb.bounds()) {
                continue;
            }
            let (x, y) = bomb.random_spawn_point(
                &mut self.rng,
                self.level.width,
                self.config.bombs.spawn_y_max,
            );
            bomb.reset_to(x, y, &mut self.rng);
            eliminated |= self.player.take_damage();
            tracing::debug!(
                index,
                lives = self.player.lives,
                frame = self.frame,
                "Player hit by bomb"
            );
            events.push(GameEvent::PlayerHit {
                hazard: HazardKind::Bomb,
                index,
                lives_remaining: self.player.lives,
            });
        }

        if eliminated {
            return true;
        }

        for (index, enemy) in self.enemies.iter_mut().enumerate() {
            if !hitbox.overlaps(&enemy.bounds()) {
                continue;
            }
            enemy.reset_position(&mut self.rng, self.level.width, self.level.height);
            eliminated |= self.player.take_damage();
            tracing::debug!(
                index,
                lives = self.player.lives,
                frame = self.frame,
                "Player hit by enemy"
            );
            events.push(GameEvent::PlayerHit {
                hazard: HazardKind::Enemy,
                index,
                lives_remaining: self.player.lives,
            });
        }
        eliminated
    }
}

impl FrameSimulation for World {
    fn update(&mut self, input: &FrameInput) -> Vec<GameEvent> {
        if self.game_over {
            return Vec::new();
        }

        self.frame += 1;
        let mut events = Vec::new();

        // 1. Input intent
        self.player.set_horizontal_intent(input.horizontal_intent());
        if input.jump_held {
            self.player.jump();
        }

        // 2. Gravity
        self.player.apply_gravity();

        // 3. Player vs platforms
        self.player.update(&self.level.platforms, self.level.width);
        if self.fell_out() {
            self.player.respawn(self.spawn_x, self.spawn_y);
            tracing::debug!(frame = self.frame, "Player fell out of the world, respawned");
            events.push(GameEvent::PlayerRespawned);
        }

        // 4. Bombs
        for bomb in &mut self.bombs {
            bomb.update(&self.level.platforms, self.level.height);
        }

        // 5. Enemies
        for enemy in &mut self.enemies {
            enemy.update(self.level.width, self.level.height);
        }

        // 6-7. Hazard contacts
        let eliminated = self.resolve_hazard_contacts(&mut events);

        // 8. Terminal state
        if eliminated {
            self.game_over = true;
            tracing::info!(frame = self.frame, "Game over");
            events.push(GameEvent::GameOver);
        }

        self.camera_x = self.follow_camera();
        events
    }

    fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            frame: self.frame,
            player: self.player.bounds(),
            player_hitbox: self.player.hitbox(),
            platforms: self.level.platforms.iter().map(|p| *p.bounds()).collect(),
            bombs: self.bombs.iter().map(BombState::bounds).collect(),
            enemies: self.enemies.iter().map(EnemyState::bounds).collect(),
            lives: self.player.lives,
            camera_x: self.camera_x,
            game_over: self.game_over,
        }
    }

    fn is_game_over(&self) -> bool {
        self.game_over
    }

    fn frame(&self) -> u64 {
        self.frame
    }
}

/// Spawn `y` that rests the player on whatever is under the spawn point:
/// the platform below its centre, the clamp floor, or the top of the world.
fn spawn_height(level: &Level, player: &PlayerConfig) -> f32 {
    let surface = level.surface_at(player.spawn_x + player.width / 2.0);
    let ground = match (player.floor, surface) {
        (FloorPolicy::Clamp { floor_y }, Some(top)) => top.min(floor_y),
        (FloorPolicy::Clamp { floor_y }, None) => floor_y,
        (FloorPolicy::Accumulate, Some(top)) => top,
        (FloorPolicy::Accumulate, None) => return 0.0,
    };
    (ground - player.height).max(0.0)
}
