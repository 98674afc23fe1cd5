use std::path::Path;

use serde::{Deserialize, Serialize};

/// Player and walker physics, in screen units per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Added to vy every tick (screen y grows downward).
    pub gravity: f32,
    pub move_speed: f32,
    /// vy set on jump; negative is up.
    pub jump_velocity: f32,
    /// Downward nudge applied when dropping through a platform.
    pub drop_nudge: f32,
    /// How far below a platform top the player's feet may sink and still land.
    pub land_tolerance: f32,
    /// Walker band above a platform top that still counts as standing on it.
    pub walker_band_above: f32,
    /// Walker band below a platform top that still counts as standing on it.
    pub walker_band_below: f32,
    /// Distance from a platform edge at which walkers turn around.
    pub walker_edge_margin: f32,
    /// Flat per-tick drop for unsupported walkers.
    pub walker_fall_step: f32,
    pub ground_enemy_speed: f32,
    pub patrol_enemy_speed: f32,
    pub powerup_speed: f32,
    /// Band below a platform top in which a power-up notices the platform edge.
    pub powerup_band_below: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.8,
            move_speed: 5.0,
            jump_velocity: -15.0,
            drop_nudge: 2.0,
            land_tolerance: 20.0,
            walker_band_above: 5.0,
            walker_band_below: 20.0,
            walker_edge_margin: 5.0,
            walker_fall_step: 5.0,
            ground_enemy_speed: 1.0,
            patrol_enemy_speed: 2.0,
            powerup_speed: 2.0,
            powerup_band_below: 5.0,
        }
    }
}

/// Combat, pickup and scoring rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub starting_lives: u32,
    /// A stomp needs the player's feet above `enemy top + stomp_band`.
    pub stomp_band: f32,
    pub stomp_bounce_velocity: f32,
    pub invincibility_ticks: u32,
    pub knockback: f32,
    /// Downward shift applied when shrinking, so the smaller hitbox drops
    /// back toward the surface it stood on.
    pub shrink_y_offset: f32,
    pub coin_points: u32,
    pub ground_enemy_points: u32,
    pub patrol_enemy_points: u32,
    /// Blink period for invincible players and the enemies they face.
    pub blink_period_ms: u64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            stomp_band: 20.0,
            stomp_bounce_velocity: -10.0,
            invincibility_ticks: 60,
            knockback: 50.0,
            shrink_y_offset: 20.0,
            coin_points: 10,
            ground_enemy_points: 100,
            patrol_enemy_points: 200,
            blink_period_ms: 200,
        }
    }
}

/// Patrol enemy spawn policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    pub max_patrol_enemies: usize,
    pub initial_interval_ms: f64,
    pub min_interval_ms: u32,
    pub max_interval_ms: u32,
    /// Horizontal distance off-screen at which patrol enemies appear.
    pub offscreen_margin: f32,
    /// Spawn height measured up from the bottom of the screen.
    pub floor_offset: f32,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            max_patrol_enemies: 4,
            initial_interval_ms: 5000.0,
            min_interval_ms: 3000,
            max_interval_ms: 7000,
            offscreen_margin: 50.0,
            floor_offset: 100.0,
        }
    }
}

/// World construction parameters not covered by the level layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub coin_count: usize,
    /// Platforms must sit at least this far above the floor line to hold coins.
    pub coin_min_height: f32,
    /// Horizontal inset of coin placement from the platform's left edge.
    pub coin_inset_left: f32,
    /// Horizontal inset of coin placement from the platform's right edge.
    pub coin_inset_right: f32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            coin_count: 10,
            coin_min_height: 100.0,
            coin_inset_left: 10.0,
            coin_inset_right: 30.0,
        }
    }
}

/// Top-level game configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StompConfig {
    pub seed: u64,
    pub tick_rate_hz: f32,
    pub physics: PhysicsConfig,
    pub combat: CombatConfig,
    pub spawner: SpawnerConfig,
    pub level: LevelConfig,
}

impl Default for StompConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_rate_hz: 60.0,
            physics: PhysicsConfig::default(),
            combat: CombatConfig::default(),
            spawner: SpawnerConfig::default(),
            level: LevelConfig::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config read error: {e}"),
            Self::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl StompConfig {
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml(&contents)
    }

    /// Load config from `$STOMP_CONFIG` or `config/stomp.toml`. Falls back to
    /// defaults if neither file exists or parses.
    pub fn load() -> Self {
        let path =
            std::env::var("STOMP_CONFIG").unwrap_or_else(|_| "config/stomp.toml".to_string());
        match Self::load_from(&path) {
            Ok(cfg) => cfg,
            Err(ConfigError::Io(_)) => Self::default(),
            Err(e) => {
                tracing::warn!("Failed to load {path}: {e}, using defaults");
                Self::default()
            },
        }
    }
}
