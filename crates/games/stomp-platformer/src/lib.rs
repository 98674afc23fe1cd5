pub mod combat;
pub mod config;
pub mod entities;
pub mod geometry;
pub mod level;
pub mod physics;
pub mod scoring;
pub mod spawner;
pub mod world;

use stomp_core::events::GameEvent;
use stomp_core::game_trait::{GameConfig, GameMetadata, SimGame};
use stomp_core::input::InputState;
use stomp_core::sim_game_boilerplate;

use config::StompConfig;
use world::{RenderView, SessionStatus, World, WorldState};

/// The single-screen platformer as a [`SimGame`].
pub struct StompGame {
    world: World,
    /// Config the game was built with; `init` overrides layer on top of it.
    base_config: StompConfig,
    /// Input queued through `apply_input` since the last tick.
    pending_input: Option<InputState>,
    paused: bool,
}

impl StompGame {
    pub fn new() -> Self {
        Self::with_config(StompConfig::default())
    }

    pub fn with_config(config: StompConfig) -> Self {
        Self {
            world: World::new(config.clone()),
            base_config: config,
            pending_input: None,
            paused: false,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn state(&self) -> &WorldState {
        &self.world.state
    }

    pub fn status(&self) -> SessionStatus {
        self.world.status()
    }

    pub fn render_view(&self) -> RenderView {
        self.world.render_view()
    }
}

impl Default for StompGame {
    fn default() -> Self {
        Self::new()
    }
}

impl SimGame for StompGame {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Stomp".to_string(),
            description: "Collect every coin before running out of lives.".to_string(),
        }
    }

    fn tick_rate(&self) -> f32 {
        self.world.config().tick_rate_hz
    }

    fn init(&mut self, config: &GameConfig) {
        let mut cfg = self.base_config.clone();

        // `custom.seed` wins over the top-level seed
        cfg.seed = config
            .custom
            .get("seed")
            .and_then(|v| v.as_u64())
            .unwrap_or(config.seed);

        if let Some(lives) = config
            .custom
            .get("starting_lives")
            .and_then(|v| v.as_u64())
            .and_then(|v| u32::try_from(v).ok())
        {
            cfg.combat.starting_lives = lives;
        }

        self.world = World::new(cfg);
        self.pending_input = None;
        self.paused = false;
    }

    fn update(&mut self, dt: f32, input: &InputState) -> Vec<GameEvent> {
        if self.paused {
            return Vec::new();
        }

        let frame = match self.pending_input.take() {
            Some(queued) => queued.union(input),
            None => *input,
        };
        self.world.tick(dt, &frame)
    }

    sim_game_boilerplate!(state_type: WorldState, state: world.state);

    fn apply_input(&mut self, input: &[u8]) {
        let sample = match InputState::decode(input) {
            Ok(sample) => sample,
            Err(e) => {
                tracing::debug!("Dropping input: {e}");
                return;
            },
        };
        // Presses (jump, reset, quit) accumulate until the next tick; held
        // keys take the latest sample.
        match &mut self.pending_input {
            Some(existing) => existing.merge(&sample),
            None => self.pending_input = Some(sample),
        }
    }

    fn reset(&mut self) {
        self.world.reset();
        self.pending_input = None;
    }

    fn is_session_over(&self) -> bool {
        self.world.status() != SessionStatus::Playing
    }
}
