use serde::{Deserialize, Serialize};

/// Snapshot of the controls for one frame, as supplied by the input
/// collaborator.
///
/// `left`, `right` and `down` are held keys. `jump`, `reset` and `quit` are
/// presses: once seen they stay set until the frame consumes them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub down: bool,
    pub jump: bool,
    pub reset: bool,
    pub quit: bool,
}

#[derive(Debug)]
pub struct InputDecodeError(String);

impl std::fmt::Display for InputDecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed input: {}", self.0)
    }
}

impl std::error::Error for InputDecodeError {}

impl InputState {
    /// Horizontal intent: -1, 0 or +1. Right wins when both are held.
    pub fn horizontal(&self) -> i8 {
        if self.right {
            1
        } else if self.left {
            -1
        } else {
            0
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        rmp_serde::to_vec(self).unwrap_or_default()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, InputDecodeError> {
        rmp_serde::from_slice(bytes).map_err(|e| InputDecodeError(e.to_string()))
    }

    /// Fold a newer sample into a pending one. Held keys take the latest
    /// value; presses are OR-ed so a jump between two ticks is not lost.
    pub fn merge(&mut self, newer: &InputState) {
        self.left = newer.left;
        self.right = newer.right;
        self.down = newer.down;
        self.jump |= newer.jump;
        self.reset |= newer.reset;
        self.quit |= newer.quit;
    }

    /// Combine two sources sampled for the same frame: a key counts as down
    /// if either source has it down.
    pub fn union(self, other: &InputState) -> InputState {
        InputState {
            left: self.left || other.left,
            right: self.right || other.right,
            down: self.down || other.down,
            jump: self.jump || other.jump,
            reset: self.reset || other.reset,
            quit: self.quit || other.quit,
        }
    }
}
