use rand::Rng;
use serde::{Deserialize, Serialize};

use stomp_core::events::SpawnSide;

use crate::config::SpawnerConfig;
use crate::entities::Enemy;
use crate::level::Level;

/// Timed source of patrol enemies entering from either screen edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    /// Session time of the last spawn (0 before the first).
    pub last_spawn_ms: f64,
    /// Time that must pass after `last_spawn_ms` before the next spawn.
    pub next_interval_ms: f64,
}

impl Spawner {
    pub fn new(cfg: &SpawnerConfig) -> Self {
        Self {
            last_spawn_ms: 0.0,
            next_interval_ms: cfg.initial_interval_ms,
        }
    }

    /// Whether a spawn is due at `now_ms` with `active` patrol enemies alive.
    pub fn is_due(&self, now_ms: f64, active: usize, cfg: &SpawnerConfig) -> bool {
        active < cfg.max_patrol_enemies && now_ms - self.last_spawn_ms > self.next_interval_ms
    }

    /// Spawn a patrol enemy if one is due, picking the entry side at random
    /// and rolling the next interval.
    pub fn maybe_spawn<R: Rng + ?Sized>(
        &mut self,
        now_ms: f64,
        active: usize,
        rng: &mut R,
        level: &Level,
        cfg: &SpawnerConfig,
        speed: f32,
    ) -> Option<Enemy> {
        if !self.is_due(now_ms, active, cfg) {
            return None;
        }

        let side = if rng.random_bool(0.5) {
            SpawnSide::Left
        } else {
            SpawnSide::Right
        };
        let x = match side {
            SpawnSide::Left => -cfg.offscreen_margin,
            SpawnSide::Right => level.width + cfg.offscreen_margin,
        };
        let y = level.height - cfg.floor_offset;

        self.last_spawn_ms = now_ms;
        let (lo, hi) = (cfg.min_interval_ms, cfg.max_interval_ms.max(cfg.min_interval_ms));
        self.next_interval_ms = f64::from(rng.random_range(lo..=hi));

        tracing::debug!(
            ?side,
            now_ms,
            next_interval_ms = self.next_interval_ms,
            "Patrol enemy spawned"
        );
        Some(Enemy::patrol(side, x, y, speed))
    }
}
