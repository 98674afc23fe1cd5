use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::events::GameEvent;
use crate::input::InputState;

/// Core trait for a single-screen simulation driven by a fixed tick loop.
///
/// The caller owns input polling, rendering and audio; the game only
/// advances its own state and reports what happened through [`GameEvent`]s.
pub trait SimGame: Send + Sync {
    /// Game metadata for a title screen or log line.
    fn metadata(&self) -> GameMetadata;

    /// Called once before the first tick, and again whenever the caller
    /// wants a completely fresh session with a new config.
    fn init(&mut self, config: &GameConfig);

    /// Advance one frame. `input` is merged with anything queued through
    /// [`SimGame::apply_input`] since the previous frame.
    fn update(&mut self, dt: f32, input: &InputState) -> Vec<GameEvent>;

    /// Serialize the full simulation state.
    fn serialize_state(&self) -> Vec<u8>;

    /// Replace the simulation state with a previously serialized one.
    /// Malformed bytes are ignored.
    fn apply_state(&mut self, state: &[u8]);

    /// Queue an encoded [`InputState`] for the next frame.
    fn apply_input(&mut self, input: &[u8]);

    /// Reinitialize all session state to its construction values.
    fn reset(&mut self);

    /// Simulation tick rate in Hz.
    fn tick_rate(&self) -> f32 {
        60.0
    }

    fn pause(&mut self);

    fn resume(&mut self);

    /// Whether the session reached a terminal state (won or lost).
    /// The caller decides whether to keep ticking.
    fn is_session_over(&self) -> bool;
}

/// Game metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    pub name: String,
    pub description: String,
}

/// Configuration for a game session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seed for every random decision the session makes.
    pub seed: u64,
    /// Game-specific overrides.
    pub custom: HashMap<String, serde_json::Value>,
}

impl GameConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            custom: HashMap::new(),
        }
    }
}

/// Generates the `SimGame` methods that are identical across games:
/// `serialize_state`, `apply_state`, `pause`, `resume`.
///
/// `state` names the field path holding the serializable state (for
/// example `world.state`); the implementing struct also needs a
/// `paused: bool` field.
#[macro_export]
macro_rules! sim_game_boilerplate {
    (state_type: $StateType:ty, state: $($state:ident).+) => {
        fn serialize_state(&self) -> Vec<u8> {
            rmp_serde::to_vec(&self.$($state).+).expect("game state serialization must succeed")
        }

        fn apply_state(&mut self, state: &[u8]) {
            if let Ok(s) = rmp_serde::from_slice::<$StateType>(state) {
                self.$($state).+ = s;
            }
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn resume(&mut self) {
            self.paused = false;
        }
    };
}
