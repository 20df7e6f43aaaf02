use serde::{Deserialize, Serialize};

/// Which hazard collection an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    Bomb,
    Enemy,
}

/// Events emitted by a simulation during a frame update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The player touched a hazard; the hazard at `index` was recycled.
    PlayerHit {
        hazard: HazardKind,
        index: usize,
        lives_remaining: u32,
    },
    /// The player fell out of the world and was returned to the spawn point.
    PlayerRespawned,
    /// Lives reached zero. Emitted exactly once per session.
    GameOver,
}
