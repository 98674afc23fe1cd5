use serde::{Deserialize, Serialize};

use stomp_core::events::{EnemyKind, SpawnSide};

use crate::geometry::Rect;

/// Small player hitbox width.
pub const SMALL_WIDTH: f32 = 40.0;
/// Small player hitbox height.
pub const SMALL_HEIGHT: f32 = 60.0;
/// Large hitbox = small hitbox × this, rounded to whole units.
pub const GROWTH_FACTOR: f64 = 1.3;
pub const GROUND_ENEMY_SIZE: f32 = 40.0;
pub const PATROL_ENEMY_SIZE: f32 = 50.0;
pub const PICKUP_SIZE: f32 = 30.0;

/// Horizontal heading, used both for sprite facing and walker direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeClass {
    Small,
    Large,
}

impl SizeClass {
    /// Hitbox (width, height) for this size class.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            SizeClass::Small => (SMALL_WIDTH, SMALL_HEIGHT),
            SizeClass::Large => (scaled(SMALL_WIDTH), scaled(SMALL_HEIGHT)),
        }
    }
}

fn scaled(v: f32) -> f32 {
    (f64::from(v) * GROWTH_FACTOR).round() as f32
}

/// The player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Rect,
    pub vx: f32,
    pub vy: f32,
    /// Airborne: set by jumping or dropping, cleared on landing.
    pub jumping: bool,
    /// Dropping through platforms; only the ground plane stops the fall.
    pub fall_through: bool,
    pub lives: u32,
    pub facing: Facing,
    pub size: SizeClass,
    pub invincible: bool,
    pub invincible_ticks: u32,
}

impl Player {
    pub fn new(x: f32, y: f32, lives: u32) -> Self {
        let (width, height) = SizeClass::Small.dimensions();
        Self {
            body: Rect::new(x, y, width, height),
            vx: 0.0,
            vy: 0.0,
            jumping: false,
            fall_through: false,
            lives,
            facing: Facing::Right,
            size: SizeClass::Small,
            invincible: false,
            invincible_ticks: 0,
        }
    }

    /// Switch to the large size class. A no-op when already large.
    pub fn grow(&mut self) {
        self.set_size(SizeClass::Large);
    }

    /// Switch back to the small size class, shifting down by `y_offset` so
    /// the shrunken hitbox stays near the ground.
    pub fn shrink(&mut self, y_offset: f32) {
        if self.size == SizeClass::Small {
            return;
        }
        self.set_size(SizeClass::Small);
        self.body.y += y_offset;
    }

    fn set_size(&mut self, size: SizeClass) {
        let (width, height) = size.dimensions();
        self.size = size;
        self.body.width = width;
        self.body.height = height;
    }

    pub fn grant_invincibility(&mut self, ticks: u32) {
        self.invincible = true;
        self.invincible_ticks = ticks;
    }

    /// Count one tick of invincibility down, clearing the flag at zero.
    pub fn tick_invincibility(&mut self) {
        if !self.invincible {
            return;
        }
        self.invincible_ticks = self.invincible_ticks.saturating_sub(1);
        if self.invincible_ticks == 0 {
            self.invincible = false;
        }
    }

    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    pub fn is_airborne(&self) -> bool {
        self.jumping
    }
}

/// A walking enemy. Ground enemies are placed with the level; patrol enemies
/// come from the spawner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub body: Rect,
    pub speed: f32,
    pub direction: Facing,
    pub alive: bool,
    pub on_platform: bool,
    pub spawn_side: Option<SpawnSide>,
}

impl Enemy {
    pub fn ground(x: f32, y: f32, speed: f32) -> Self {
        Self {
            kind: EnemyKind::Ground,
            body: Rect::new(x, y, GROUND_ENEMY_SIZE, GROUND_ENEMY_SIZE),
            speed,
            direction: Facing::Left,
            alive: true,
            on_platform: false,
            spawn_side: None,
        }
    }

    /// A patrol enemy entering from `side`, heading toward the other side.
    pub fn patrol(side: SpawnSide, x: f32, y: f32, speed: f32) -> Self {
        let direction = match side {
            SpawnSide::Left => Facing::Right,
            SpawnSide::Right => Facing::Left,
        };
        Self {
            kind: EnemyKind::Patrol,
            body: Rect::new(x, y, PATROL_ENEMY_SIZE, PATROL_ENEMY_SIZE),
            speed,
            direction,
            alive: true,
            on_platform: false,
            spawn_side: Some(side),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub body: Rect,
    pub collected: bool,
}

impl Coin {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            body: Rect::new(x, y, PICKUP_SIZE, PICKUP_SIZE),
            collected: false,
        }
    }
}

/// Growth mushroom. Walks like an enemy but never hurts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub body: Rect,
    pub direction: Facing,
    pub collected: bool,
}

impl PowerUp {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            body: Rect::new(x, y, PICKUP_SIZE, PICKUP_SIZE),
            direction: Facing::Right,
            collected: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_is_small_times_growth() {
        assert_eq!(SizeClass::Small.dimensions(), (40.0, 60.0));
        assert_eq!(SizeClass::Large.dimensions(), (52.0, 78.0));
    }

    #[test]
    fn grow_is_idempotent() {
        let mut player = Player::new(100.0, 490.0, 3);
        player.grow();
        player.grow();
        player.grow();
        assert_eq!(player.size, SizeClass::Large);
        assert_eq!((player.body.width, player.body.height), (52.0, 78.0));
    }

    #[test]
    fn shrink_restores_small_and_shifts_down() {
        let mut player = Player::new(100.0, 400.0, 3);
        player.grow();
        player.shrink(20.0);
        assert_eq!(player.size, SizeClass::Small);
        assert_eq!((player.body.width, player.body.height), (40.0, 60.0));
        assert_eq!(player.body.y, 420.0);
    }

    #[test]
    fn shrink_when_small_is_noop() {
        let mut player = Player::new(100.0, 400.0, 3);
        player.shrink(20.0);
        assert_eq!(player.body.y, 400.0);
    }

    #[test]
    fn invincibility_counts_down_and_clears() {
        let mut player = Player::new(0.0, 0.0, 3);
        player.grant_invincibility(3);
        player.tick_invincibility();
        player.tick_invincibility();
        assert!(player.invincible);
        player.tick_invincibility();
        assert!(!player.invincible);
        assert_eq!(player.invincible_ticks, 0);
        player.tick_invincibility();
        assert_eq!(player.invincible_ticks, 0);
    }

    #[test]
    fn lives_floor_at_zero() {
        let mut player = Player::new(0.0, 0.0, 1);
        player.lose_life();
        player.lose_life();
        assert_eq!(player.lives, 0);
    }

    #[test]
    fn patrol_heads_away_from_its_side() {
        let from_left = Enemy::patrol(SpawnSide::Left, -50.0, 500.0, 2.0);
        let from_right = Enemy::patrol(SpawnSide::Right, 850.0, 500.0, 2.0);
        assert_eq!(from_left.direction, Facing::Right);
        assert_eq!(from_right.direction, Facing::Left);
        assert_eq!(from_left.kind, EnemyKind::Patrol);
        assert_eq!(from_left.body.width, PATROL_ENEMY_SIZE);
    }
}
