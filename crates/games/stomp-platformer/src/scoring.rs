use stomp_core::events::EnemyKind;

use crate::config::CombatConfig;

/// Points for stomping an enemy of the given kind.
///
/// Scoring: ground enemy = 100, patrol enemy = 200 with the default config.
pub fn stomp_points(kind: EnemyKind, cfg: &CombatConfig) -> u32 {
    match kind {
        EnemyKind::Ground => cfg.ground_enemy_points,
        EnemyKind::Patrol => cfg.patrol_enemy_points,
    }
}

/// Add `points` to `score`, saturating instead of wrapping.
pub fn award(score: &mut u32, points: u32) {
    *score = score.saturating_add(points);
}
