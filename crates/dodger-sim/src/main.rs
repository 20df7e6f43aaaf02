use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use dodger_core::events::GameEvent;
use dodger_core::input::FrameInput;
use dodger_core::simulation::FrameSimulation;
use dodger_platformer::World;
use dodger_platformer::config::DodgerConfig;

const DEFAULT_MAX_FRAMES: u64 = 3600;
/// Frames between autopilot jump presses.
const JUMP_CADENCE: u64 = 40;

fn max_frames() -> u64 {
    match std::env::var("DODGER_MAX_FRAMES") {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            tracing::warn!("Invalid DODGER_MAX_FRAMES {raw:?}: {e}, using {DEFAULT_MAX_FRAMES}");
            DEFAULT_MAX_FRAMES
        }),
        Err(_) => DEFAULT_MAX_FRAMES,
    }
}

/// Hold right and tap jump on a fixed cadence.
fn autopilot(frame: u64) -> FrameInput {
    FrameInput {
        left_held: false,
        right_held: true,
        jump_held: frame % JUMP_CADENCE == 0,
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = DodgerConfig::load();
    let mut world = match World::new(config) {
        Ok(world) => world,
        Err(e) => {
            tracing::error!("Failed to build world: {e}");
            return ExitCode::FAILURE;
        },
    };

    let limit = max_frames();
    tracing::info!(limit, "Dodger simulation starting");

    let mut hits = 0u32;
    let mut respawns = 0u32;
    while world.frame() < limit && !world.is_game_over() {
        for event in world.update(&autopilot(world.frame())) {
            match event {
                GameEvent::PlayerHit { .. } => hits += 1,
                GameEvent::PlayerRespawned => respawns += 1,
                GameEvent::GameOver => {},
            }
        }
    }

    tracing::info!(
        frames = world.frame(),
        hits,
        respawns,
        lives = world.lives(),
        game_over = world.is_game_over(),
        "Simulation finished"
    );

    match serde_json::to_string_pretty(&world.snapshot()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            tracing::error!("Failed to serialize snapshot: {e}");
            ExitCode::FAILURE
        },
    }
}
