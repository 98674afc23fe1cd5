use stomp_core::events::GameEvent;

use crate::config::CombatConfig;
use crate::entities::{Coin, Enemy, Player, PowerUp, SizeClass};
use crate::scoring::{award, stomp_points};

/// How a player/enemy overlap resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Player came down on the enemy's head.
    Stomp,
    /// Player walked or jumped into the enemy's side.
    SideHit,
    /// Side contact while invincible: nothing happens.
    Shielded,
}

/// Classify an overlap, or `None` if the two don't touch or the enemy is
/// already dead.
pub fn classify_contact(player: &Player, enemy: &Enemy, cfg: &CombatConfig) -> Option<Contact> {
    if !enemy.alive || !player.body.overlaps(&enemy.body) {
        return None;
    }
    if player.body.bottom() < enemy.body.y + cfg.stomp_band && player.vy > 0.0 {
        Some(Contact::Stomp)
    } else if player.invincible {
        Some(Contact::Shielded)
    } else {
        Some(Contact::SideHit)
    }
}

/// Resolve the player against every live enemy in `enemies`. Enemies are
/// only marked dead here; the caller removes them after the whole pass.
pub fn resolve_enemies(
    player: &mut Player,
    enemies: &mut [Enemy],
    score: &mut u32,
    cfg: &CombatConfig,
    events: &mut Vec<GameEvent>,
) {
    for enemy in enemies.iter_mut() {
        match classify_contact(player, enemy, cfg) {
            Some(Contact::Stomp) => {
                let points = stomp_points(enemy.kind, cfg);
                enemy.alive = false;
                award(score, points);
                player.vy = cfg.stomp_bounce_velocity;
                events.push(GameEvent::EnemyStomped {
                    kind: enemy.kind,
                    points,
                });
            },
            Some(Contact::SideHit) => {
                let shrank = apply_side_hit(player, enemy, cfg);
                events.push(GameEvent::PlayerHit {
                    lives: player.lives,
                    shrank,
                });
            },
            Some(Contact::Shielded) | None => {},
        }
    }
}

/// Damage the player and knock them away from `enemy`. Returns whether the
/// hit cost a size class rather than a life.
fn apply_side_hit(player: &mut Player, enemy: &Enemy, cfg: &CombatConfig) -> bool {
    let shrank = player.size == SizeClass::Large;
    if shrank {
        player.shrink(cfg.shrink_y_offset);
    } else {
        player.lose_life();
    }
    player.grant_invincibility(cfg.invincibility_ticks);

    if player.body.x < enemy.body.x {
        player.body.x -= cfg.knockback;
    } else {
        player.body.x += cfg.knockback;
    }
    shrank
}

/// Mark every coin the player touches as collected.
pub fn collect_coins(
    player: &Player,
    coins: &mut [Coin],
    score: &mut u32,
    cfg: &CombatConfig,
    events: &mut Vec<GameEvent>,
) {
    for coin in coins.iter_mut() {
        if coin.collected || !player.body.overlaps(&coin.body) {
            continue;
        }
        coin.collected = true;
        award(score, cfg.coin_points);
        events.push(GameEvent::CoinCollected { score: *score });
    }
}

/// Mark every power-up the player touches as collected: one extra life and
/// the large size class each.
pub fn collect_powerups(player: &mut Player, powerups: &mut [PowerUp], events: &mut Vec<GameEvent>) {
    for powerup in powerups.iter_mut() {
        if powerup.collected || !player.body.overlaps(&powerup.body) {
            continue;
        }
        powerup.collected = true;
        player.lives = player.lives.saturating_add(1);
        player.grow();
        events.push(GameEvent::PowerUpCollected {
            lives: player.lives,
        });
    }
}
