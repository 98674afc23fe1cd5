use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::config::LevelConfig;
use crate::entities::{Coin, PICKUP_SIZE};
use crate::geometry::Rect;

/// Screen width of the classic level.
pub const SCREEN_WIDTH: f32 = 800.0;
/// Screen height of the classic level.
pub const SCREEN_HEIGHT: f32 = 600.0;
/// Thickness of the ground slab at the bottom of the screen.
pub const GROUND_THICKNESS: f32 = 50.0;

/// Static level layout: platforms plus fixed spawn points. Immutable for the
/// whole session; reset rebuilds the world from the same layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub width: f32,
    pub height: f32,
    /// Support surfaces. The first entry is the full-width ground.
    pub platforms: Vec<Rect>,
    pub player_spawn: (f32, f32),
    pub ground_enemy_spawns: Vec<(f32, f32)>,
    pub powerup_spawns: Vec<(f32, f32)>,
}

impl Level {
    /// The one hand-built screen the game ships with.
    pub fn classic() -> Self {
        let ground_y = SCREEN_HEIGHT - GROUND_THICKNESS;
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            platforms: vec![
                Rect::new(0.0, ground_y, SCREEN_WIDTH, GROUND_THICKNESS),
                Rect::new(100.0, 450.0, 200.0, 20.0),
                Rect::new(400.0, 450.0, 200.0, 20.0),
                Rect::new(150.0, 350.0, 200.0, 20.0),
                Rect::new(450.0, 350.0, 200.0, 20.0),
                Rect::new(200.0, 250.0, 150.0, 20.0),
                Rect::new(450.0, 250.0, 150.0, 20.0),
                Rect::new(350.0, 180.0, 100.0, 15.0),
            ],
            player_spawn: (100.0, SCREEN_HEIGHT - 110.0),
            ground_enemy_spawns: vec![
                (150.0, 410.0),
                (450.0, 410.0),
                (200.0, 310.0),
                (500.0, 310.0),
                (250.0, 210.0),
            ],
            powerup_spawns: vec![(300.0, 450.0 - PICKUP_SIZE)],
        }
    }

    /// Y of the ground plane the player can never fall below.
    pub fn floor_y(&self) -> f32 {
        self.height - GROUND_THICKNESS
    }

    /// Platforms high enough above the floor to hold coins.
    pub fn coin_platforms(&self, cfg: &LevelConfig) -> Vec<Rect> {
        let limit = self.height - cfg.coin_min_height;
        self.platforms
            .iter()
            .filter(|p| p.y < limit)
            .copied()
            .collect()
    }

    /// Scatter `cfg.coin_count` coins on top of randomly chosen eligible
    /// platforms. Returns no coins if no platform qualifies.
    pub fn place_coins<R: Rng + ?Sized>(&self, cfg: &LevelConfig, rng: &mut R) -> Vec<Coin> {
        let eligible = self.coin_platforms(cfg);
        if eligible.is_empty() {
            tracing::warn!("Level has no platform eligible for coins");
            return Vec::new();
        }
        let mut coins = Vec::with_capacity(cfg.coin_count);
        for _ in 0..cfg.coin_count {
            let Some(plat) = eligible.choose(rng).copied() else {
                break;
            };
            let lo = (plat.x + cfg.coin_inset_left) as i32;
            let hi = ((plat.right() - cfg.coin_inset_right) as i32).max(lo);
            let x = rng.random_range(lo..=hi) as f32;
            coins.push(Coin::new(x, plat.y - PICKUP_SIZE));
        }
        coins
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn first_platform_is_full_width_ground() {
        let level = Level::classic();
        let ground = level.platforms[0];
        assert_eq!(ground.x, 0.0);
        assert_eq!(ground.width, level.width);
        assert_eq!(ground.y, level.floor_y());
        assert_eq!(ground.bottom(), level.height);
    }

    #[test]
    fn coin_platforms_exclude_ground_and_low_ledges() {
        let level = Level::classic();
        let eligible = level.coin_platforms(&LevelConfig::default());
        assert_eq!(eligible.len(), 7);
        assert!(eligible.iter().all(|p| p.y < level.height - 100.0));
    }

    #[test]
    fn places_exactly_the_configured_coin_count() {
        let level = Level::classic();
        let mut rng = StdRng::seed_from_u64(42);
        let coins = level.place_coins(&LevelConfig::default(), &mut rng);
        assert_eq!(coins.len(), 10);
    }

    #[test]
    fn coins_sit_on_eligible_platforms() {
        let level = Level::classic();
        let cfg = LevelConfig::default();
        let eligible = level.coin_platforms(&cfg);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            for coin in level.place_coins(&cfg, &mut rng) {
                let host = eligible.iter().find(|p| {
                    coin.body.bottom() == p.y
                        && coin.body.x >= p.x + cfg.coin_inset_left
                        && coin.body.x <= p.right() - cfg.coin_inset_right
                });
                assert!(
                    host.is_some(),
                    "Coin at ({}, {}) is not on an eligible platform (seed {seed})",
                    coin.body.x,
                    coin.body.y
                );
            }
        }
    }

    #[test]
    fn placement_is_deterministic_per_seed() {
        let level = Level::classic();
        let cfg = LevelConfig::default();
        let a = level.place_coins(&cfg, &mut StdRng::seed_from_u64(9));
        let b = level.place_coins(&cfg, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn no_eligible_platform_places_nothing() {
        let level = Level::classic();
        let cfg = LevelConfig {
            coin_min_height: 10_000.0,
            ..Default::default()
        };
        let coins = level.place_coins(&cfg, &mut StdRng::seed_from_u64(1));
        assert!(coins.is_empty());
    }

    #[test]
    fn player_spawn_stands_on_ground() {
        let level = Level::classic();
        let (_, y) = level.player_spawn;
        assert_eq!(y + 60.0, level.floor_y());
    }
}
