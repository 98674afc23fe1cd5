use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use stomp_core::events::GameEvent;
use stomp_core::input::InputState;
use stomp_core::time::TickClock;

use crate::combat;
use crate::config::StompConfig;
use crate::entities::{Coin, Enemy, Facing, Player, PowerUp, SizeClass};
use crate::geometry::Rect;
use crate::level::Level;
use crate::physics::{Patrol, tick_player};
use crate::spawner::Spawner;

/// Derived session status. Victory takes precedence over defeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Playing,
    Victory,
    Defeated,
}

/// Everything that changes during a session. This is the serialized state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    pub player: Player,
    pub ground_enemies: Vec<Enemy>,
    pub patrol_enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub powerups: Vec<PowerUp>,
    pub score: u32,
    /// Set once when the last coin is collected; cleared only by reset.
    pub victory: bool,
    /// Latch so the game-over event fires once per session. Cleared only by
    /// reset, so regaining a life and dropping back to zero stays silent.
    pub game_over_announced: bool,
    pub spawner: Spawner,
    pub clock: TickClock,
}

impl WorldState {
    /// Construction values for a new session on `level`.
    fn fresh(level: &Level, config: &StompConfig, rng: &mut StdRng) -> Self {
        let (px, py) = level.player_spawn;
        Self {
            player: Player::new(px, py, config.combat.starting_lives),
            ground_enemies: level
                .ground_enemy_spawns
                .iter()
                .map(|&(x, y)| Enemy::ground(x, y, config.physics.ground_enemy_speed))
                .collect(),
            patrol_enemies: Vec::new(),
            coins: level.place_coins(&config.level, rng),
            powerups: level
                .powerup_spawns
                .iter()
                .map(|&(x, y)| PowerUp::new(x, y))
                .collect(),
            score: 0,
            victory: false,
            game_over_announced: false,
            spawner: Spawner::new(&config.spawner),
            clock: TickClock::new(),
        }
    }
}

/// What a sprite in the render view represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteKind {
    Player,
    GroundEnemy,
    PatrolEnemy,
    Coin,
    PowerUp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteView {
    pub kind: SpriteKind,
    pub rect: Rect,
    /// `None` for sprites without a heading (coins).
    pub facing: Option<Facing>,
    /// Blink phase; invisible sprites are skipped by the renderer this frame.
    pub visible: bool,
}

/// Read-only snapshot for the renderer. Sprites are in draw order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderView {
    pub width: f32,
    pub height: f32,
    pub platforms: Vec<Rect>,
    pub sprites: Vec<SpriteView>,
    pub player_size: SizeClass,
    pub score: u32,
    pub lives: u32,
    pub status: SessionStatus,
    pub hud: String,
    pub banner: Option<String>,
}

/// The simulation: session state plus the fixed level, config and RNG.
pub struct World {
    pub state: WorldState,
    level: Level,
    config: StompConfig,
    rng: StdRng,
}

impl World {
    pub fn new(config: StompConfig) -> Self {
        Self::with_level(config, Level::classic())
    }

    pub fn with_level(config: StompConfig, level: Level) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let state = WorldState::fresh(&level, &config, &mut rng);
        Self {
            state,
            level,
            config,
            rng,
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn config(&self) -> &StompConfig {
        &self.config
    }

    /// Rebuild every entity and counter from construction values. Coins are
    /// re-scattered from the continuing RNG stream.
    pub fn reset(&mut self) {
        self.state = WorldState::fresh(&self.level, &self.config, &mut self.rng);
        tracing::info!(seed = self.config.seed, "Session reset");
    }

    pub fn status(&self) -> SessionStatus {
        if self.state.victory {
            SessionStatus::Victory
        } else if self.state.player.lives == 0 {
            SessionStatus::Defeated
        } else {
            SessionStatus::Playing
        }
    }

    /// Whether blinking sprites are drawn this frame.
    pub fn blink_visible(&self) -> bool {
        !self.state.player.invincible
            || self
                .state
                .clock
                .phase_on(self.config.combat.blink_period_ms)
    }

    /// Advance the session by one frame.
    pub fn tick(&mut self, dt: f32, input: &InputState) -> Vec<GameEvent> {
        let mut events = Vec::new();

        if input.reset {
            self.reset();
            events.push(GameEvent::Reset);
        }

        self.state.clock.advance(dt);
        self.spawn_patrols(&mut events);
        self.step_physics(input);
        self.resolve_contacts(&mut events);
        self.purge();
        self.check_defeat(&mut events);

        events
    }

    fn spawn_patrols(&mut self, events: &mut Vec<GameEvent>) {
        let state = &mut self.state;
        let spawned = state.spawner.maybe_spawn(
            state.clock.now_ms(),
            state.patrol_enemies.len(),
            &mut self.rng,
            &self.level,
            &self.config.spawner,
            self.config.physics.patrol_enemy_speed,
        );
        if let Some(enemy) = spawned {
            if let Some(side) = enemy.spawn_side {
                events.push(GameEvent::EnemySpawned { side });
            }
            state.patrol_enemies.push(enemy);
        }
    }

    fn step_physics(&mut self, input: &InputState) {
        let physics = &self.config.physics;
        let state = &mut self.state;

        // The player is frozen in place once the level is won.
        if !state.victory {
            tick_player(&mut state.player, input, &self.level, physics);
        }
        state.player.tick_invincibility();

        let platforms = &self.level.platforms;
        for powerup in &mut state.powerups {
            powerup.patrol(platforms, physics);
        }
        for enemy in state
            .patrol_enemies
            .iter_mut()
            .chain(state.ground_enemies.iter_mut())
            .filter(|e| e.alive)
        {
            enemy.patrol(platforms, physics);
        }
    }

    fn resolve_contacts(&mut self, events: &mut Vec<GameEvent>) {
        let cfg = &self.config.combat;
        let state = &mut self.state;

        let coins_before = state.coins.iter().filter(|c| !c.collected).count();
        combat::collect_coins(&state.player, &mut state.coins, &mut state.score, cfg, events);
        let coins_after = state.coins.iter().filter(|c| !c.collected).count();

        if !state.victory && coins_before > 0 && coins_after == 0 {
            state.victory = true;
            state.player.vx = 0.0;
            state.player.vy = 0.0;
            tracing::info!(score = state.score, "All coins collected");
            events.push(GameEvent::Victory { score: state.score });
        }

        combat::collect_powerups(&mut state.player, &mut state.powerups, events);

        if state.victory {
            return;
        }
        combat::resolve_enemies(
            &mut state.player,
            &mut state.patrol_enemies,
            &mut state.score,
            cfg,
            events,
        );
        combat::resolve_enemies(
            &mut state.player,
            &mut state.ground_enemies,
            &mut state.score,
            cfg,
            events,
        );
    }

    /// Drop everything marked dead or collected during this tick.
    fn purge(&mut self) {
        let state = &mut self.state;
        state.coins.retain(|c| !c.collected);
        state.powerups.retain(|p| !p.collected);
        state.patrol_enemies.retain(|e| e.alive);
        state.ground_enemies.retain(|e| e.alive);
    }

    fn check_defeat(&mut self, events: &mut Vec<GameEvent>) {
        if self.status() != SessionStatus::Defeated || self.state.game_over_announced {
            return;
        }
        self.state.game_over_announced = true;
        tracing::info!(score = self.state.score, "Game over");
        events.push(GameEvent::GameOverReached {
            score: self.state.score,
        });
    }

    pub fn render_view(&self) -> RenderView {
        let state = &self.state;
        let blink = self.blink_visible();
        let mut sprites = Vec::new();

        sprites.extend(state.coins.iter().map(|c| SpriteView {
            kind: SpriteKind::Coin,
            rect: c.body,
            facing: None,
            visible: true,
        }));
        sprites.extend(state.powerups.iter().map(|p| SpriteView {
            kind: SpriteKind::PowerUp,
            rect: p.body,
            facing: Some(p.direction),
            visible: true,
        }));
        for (list, kind) in [
            (&state.patrol_enemies, SpriteKind::PatrolEnemy),
            (&state.ground_enemies, SpriteKind::GroundEnemy),
        ] {
            sprites.extend(list.iter().filter(|e| e.alive).map(|e| SpriteView {
                kind,
                rect: e.body,
                facing: Some(e.direction),
                visible: blink,
            }));
        }
        sprites.push(SpriteView {
            kind: SpriteKind::Player,
            rect: state.player.body,
            facing: Some(state.player.facing),
            visible: blink,
        });

        let status = self.status();
        let banner = match status {
            SessionStatus::Playing => None,
            SessionStatus::Victory => Some("YOU WIN! - Press R to restart".to_string()),
            SessionStatus::Defeated => Some("GAME OVER - Press R to restart".to_string()),
        };

        RenderView {
            width: self.level.width,
            height: self.level.height,
            platforms: self.level.platforms.clone(),
            sprites,
            player_size: state.player.size,
            score: state.score,
            lives: state.player.lives,
            status,
            hud: format!("Lives: {}  Score: {}", state.player.lives, state.score),
            banner,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(StompConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use stomp_core::test_helpers::FRAME_DT;

    use super::*;

    fn world() -> World {
        World::new(StompConfig::default())
    }

    /// Move the first remaining coin under the player so the next tick
    /// collects it.
    fn drop_coin_on_player(world: &mut World) {
        let player = world.state.player.body;
        if let Some(coin) = world.state.coins.first_mut() {
            coin.body.x = player.x;
            coin.body.y = player.y;
        }
    }

    fn collect_all_coins(world: &mut World) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while !world.state.coins.is_empty() {
            drop_coin_on_player(world);
            events.extend(world.tick(FRAME_DT, &InputState::default()));
        }
        events
    }

    /// Park a ground enemy beside the player for a side hit next tick.
    fn enemy_beside_player(world: &mut World) {
        let player = world.state.player.body;
        world.state.patrol_enemies.clear();
        // Zero speed keeps it parked.
        world.state.ground_enemies = vec![Enemy::ground(player.x + 20.0, player.y + 20.0, 0.0)];
    }

    fn run(world: &mut World, ticks: usize) -> Vec<GameEvent> {
        (0..ticks)
            .flat_map(|_| world.tick(FRAME_DT, &InputState::default()))
            .collect()
    }

    #[test]
    fn construction_places_ten_coins_on_raised_platforms() {
        let world = world();
        assert_eq!(world.state.coins.len(), 10);
        let limit = world.level().height - 100.0;
        for coin in &world.state.coins {
            let host = world
                .level()
                .platforms
                .iter()
                .find(|p| coin.body.bottom() == p.y && p.y < limit);
            assert!(host.is_some(), "Coin at {:?} not atop an eligible platform", coin.body);
        }
    }

    #[test]
    fn construction_matches_classic_layout() {
        let world = world();
        assert_eq!(world.state.player.body.x, 100.0);
        assert_eq!(world.state.player.body.y, 490.0);
        assert_eq!(world.state.player.lives, 3);
        assert_eq!(world.state.ground_enemies.len(), 5);
        assert_eq!(world.state.powerups.len(), 1);
        assert!(world.state.patrol_enemies.is_empty());
        assert_eq!(world.status(), SessionStatus::Playing);
    }

    #[test]
    fn collecting_last_coin_wins_once() {
        let mut world = world();
        let events = collect_all_coins(&mut world);

        assert!(world.state.victory);
        assert_eq!(world.status(), SessionStatus::Victory);
        assert_eq!(world.state.score, 100);
        let victories = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Victory { .. }))
            .count();
        assert_eq!(victories, 1);

        let later = world.tick(FRAME_DT, &InputState::default());
        assert!(!later.iter().any(|e| matches!(e, GameEvent::Victory { .. })));
        assert!(world.state.victory, "victory holds until reset");
    }

    #[test]
    fn victory_freezes_player_and_skips_combat() {
        let mut world = world();
        collect_all_coins(&mut world);
        let pos = world.state.player.body;
        enemy_beside_player(&mut world);

        let input = InputState {
            right: true,
            jump: true,
            ..Default::default()
        };
        world.tick(FRAME_DT, &input);

        assert_eq!(world.state.player.body, pos);
        assert_eq!(world.state.player.lives, 3);
    }

    #[test]
    fn last_coin_beats_enemy_contact_in_the_same_tick() {
        let mut world = world();
        world.state.coins.truncate(1);
        drop_coin_on_player(&mut world);
        enemy_beside_player(&mut world);

        let events = world.tick(FRAME_DT, &InputState::default());

        assert_eq!(
            events,
            vec![
                GameEvent::CoinCollected { score: 10 },
                GameEvent::Victory { score: 10 },
            ]
        );
        assert_eq!(world.state.player.lives, 3);
        assert!(world.state.victory);
        assert_eq!(world.status(), SessionStatus::Victory);
    }

    #[test]
    fn reset_during_victory_restores_fresh_session() {
        let mut world = world();
        collect_all_coins(&mut world);
        for _ in 0..30 {
            world.tick(FRAME_DT, &InputState::default());
        }

        let events = world.tick(
            FRAME_DT,
            &InputState {
                reset: true,
                ..Default::default()
            },
        );

        assert!(events.contains(&GameEvent::Reset));
        assert!(!world.state.victory);
        assert_eq!(world.state.score, 0);
        assert_eq!(world.state.coins.len(), 10);
        assert_eq!(world.state.player.body.x, 100.0);
        assert_eq!(world.state.player.body.y, 490.0);
        assert_eq!(world.status(), SessionStatus::Playing);
        assert_eq!(world.state.clock.ticks(), 1);
    }

    #[test]
    fn level_without_coin_ledges_never_wins() {
        let level = Level {
            platforms: vec![Rect::new(0.0, 550.0, 800.0, 50.0)],
            ground_enemy_spawns: Vec::new(),
            ..Level::classic()
        };
        let mut world = World::with_level(StompConfig::default(), level);
        assert!(world.state.coins.is_empty());
        run(&mut world, 10);
        assert_eq!(world.status(), SessionStatus::Playing);
    }

    #[test]
    fn reset_rerolls_coins_from_the_same_stream() {
        let mut world = world();
        let first = world.state.coins.clone();
        world.reset();
        assert_eq!(world.state.coins.len(), 10);
        assert_ne!(world.state.coins, first);
    }

    #[test]
    fn coin_count_never_increases() {
        let mut world = world();
        let mut prev = world.state.coins.len();
        for i in 0..600 {
            let input = InputState {
                right: i % 120 < 60,
                left: i % 120 >= 60,
                jump: i % 40 == 0,
                ..Default::default()
            };
            world.tick(FRAME_DT, &input);
            assert!(world.state.coins.len() <= prev);
            prev = world.state.coins.len();
        }
    }

    #[test]
    fn game_over_fires_once_per_session() {
        let mut world = world();
        world.state.player.lives = 1;
        enemy_beside_player(&mut world);

        let mut events = world.tick(FRAME_DT, &InputState::default());
        events.extend(run(&mut world, 120));

        assert_eq!(world.status(), SessionStatus::Defeated);
        let overs = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOverReached { .. }))
            .count();
        assert_eq!(overs, 1);
        assert!(world.state.game_over_announced);
    }

    #[test]
    fn regained_life_does_not_rearm_game_over() {
        let mut world = world();
        world.state.player.lives = 0;
        let mut events = world.tick(FRAME_DT, &InputState::default());

        // A power-up at zero lives leaves Defeated for a while.
        world.state.player.lives = 1;
        events.extend(world.tick(FRAME_DT, &InputState::default()));
        assert_eq!(world.status(), SessionStatus::Playing);

        world.state.player.lives = 0;
        events.extend(world.tick(FRAME_DT, &InputState::default()));
        assert_eq!(world.status(), SessionStatus::Defeated);

        let overs = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOverReached { .. }))
            .count();
        assert_eq!(overs, 1);
    }

    #[test]
    fn reset_clears_game_over_latch() {
        let mut world = world();
        world.state.player.lives = 0;
        let events = world.tick(FRAME_DT, &InputState::default());
        assert!(events.iter().any(|e| matches!(e, GameEvent::GameOverReached { .. })));

        world.reset();
        assert!(!world.state.game_over_announced);
        world.state.player.lives = 0;
        let events = world.tick(FRAME_DT, &InputState::default());
        assert!(events.iter().any(|e| matches!(e, GameEvent::GameOverReached { .. })));
    }

    #[test]
    fn defeated_session_keeps_simulating() {
        let mut world = world();
        world.state.player.lives = 0;
        world.tick(FRAME_DT, &InputState::default());
        let x = world.state.player.body.x;
        world.tick(
            FRAME_DT,
            &InputState {
                right: true,
                ..Default::default()
            },
        );
        assert_eq!(world.state.player.body.x, x + 5.0);
        assert_eq!(world.status(), SessionStatus::Defeated);
    }

    #[test]
    fn patrol_enemy_spawns_after_five_seconds() {
        let mut world = world();
        let events = run(&mut world, 301);
        let spawned = events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemySpawned { .. }))
            .count();
        assert_eq!(spawned, 1);
    }

    #[test]
    fn patrol_enemies_never_exceed_cap() {
        let mut world = world();
        for _ in 0..(60 * 60) {
            world.tick(FRAME_DT, &InputState::default());
            assert!(world.state.patrol_enemies.len() <= 4);
        }
    }

    #[test]
    fn blink_alternates_while_invincible() {
        let mut world = world();
        assert!(world.blink_visible());
        world.state.player.grant_invincibility(60);

        world.state.clock = TickClock::new();
        world.state.clock.advance(0.05);
        assert!(world.blink_visible(), "50 ms: on");
        world.state.clock.advance(0.1);
        assert!(!world.blink_visible(), "150 ms: off");
        world.state.clock.advance(0.1);
        assert!(world.blink_visible(), "250 ms: on");
    }

    #[test]
    fn render_view_reports_hud_and_banner() {
        let mut world = world();
        let view = world.render_view();
        assert_eq!(view.hud, "Lives: 3  Score: 0");
        assert_eq!(view.banner, None);
        assert_eq!(view.platforms.len(), 8);
        assert_eq!(view.sprites.last().map(|s| s.kind), Some(SpriteKind::Player));
        let coins = view
            .sprites
            .iter()
            .filter(|s| s.kind == SpriteKind::Coin)
            .count();
        assert_eq!(coins, 10);

        collect_all_coins(&mut world);
        let view = world.render_view();
        assert_eq!(view.status, SessionStatus::Victory);
        assert_eq!(view.banner.as_deref(), Some("YOU WIN! - Press R to restart"));
    }

    #[test]
    fn victory_banner_wins_over_game_over() {
        let mut world = world();
        collect_all_coins(&mut world);
        world.state.player.lives = 0;
        assert_eq!(world.status(), SessionStatus::Victory);
        assert_eq!(
            world.render_view().banner.as_deref(),
            Some("YOU WIN! - Press R to restart")
        );
    }

    #[test]
    fn same_seed_same_session() {
        let mut a = world();
        let mut b = world();
        let input = InputState {
            right: true,
            ..Default::default()
        };
        for _ in 0..400 {
            assert_eq!(a.tick(FRAME_DT, &input), b.tick(FRAME_DT, &input));
        }
        assert_eq!(a.state, b.state);
    }
}
