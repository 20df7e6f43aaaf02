use crate::events::GameEvent;
use crate::input::FrameInput;
use crate::snapshot::RenderSnapshot;

/// Core trait for a frame-driven game simulation.
///
/// The host owns the window, input polling, and drawing; it calls `update`
/// once per frame and then reads `snapshot` for the render pass.
pub trait FrameSimulation {
    /// Advance one frame. Does nothing once the game is over.
    fn update(&mut self, input: &FrameInput) -> Vec<GameEvent>;

    /// Settled state of the last completed frame.
    fn snapshot(&self) -> RenderSnapshot;

    /// Whether the terminal game-over state has been entered.
    fn is_game_over(&self) -> bool;

    /// Number of frames processed so far.
    fn frame(&self) -> u64;
}
