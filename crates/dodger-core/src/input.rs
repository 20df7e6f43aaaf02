use serde::{Deserialize, Serialize};

/// Held-button state sampled once at the top of a frame.
///
/// Inputs are level-triggered: holding jump while airborne is simply ignored
/// by the player's jump guard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    pub left_held: bool,
    pub right_held: bool,
    pub jump_held: bool,
}

impl FrameInput {
    pub fn horizontal_intent(&self) -> HorizontalIntent {
        match (self.left_held, self.right_held) {
            (true, false) => HorizontalIntent::Left,
            (false, true) => HorizontalIntent::Right,
            // Both or neither held: cancel out.
            _ => HorizontalIntent::None,
        }
    }
}

/// Horizontal movement requested for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HorizontalIntent {
    Left,
    Right,
    #[default]
    None,
}

impl HorizontalIntent {
    /// -1, 0, or +1.
    pub fn sign(self) -> f32 {
        match self {
            HorizontalIntent::Left => -1.0,
            HorizontalIntent::Right => 1.0,
            HorizontalIntent::None => 0.0,
        }
    }
}
