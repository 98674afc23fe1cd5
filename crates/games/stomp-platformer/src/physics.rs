use stomp_core::input::InputState;

use crate::config::PhysicsConfig;
use crate::entities::{Enemy, Facing, Player, PowerUp};
use crate::geometry::Rect;
use crate::level::Level;

/// Advance the player one tick: horizontal movement, drop-through, jump,
/// gravity, then platform contact.
///
/// Returns whether the player ended the tick standing on a surface.
pub fn tick_player(
    player: &mut Player,
    input: &InputState,
    level: &Level,
    cfg: &PhysicsConfig,
) -> bool {
    let dir = input.horizontal();
    player.vx = f32::from(dir) * cfg.move_speed;
    match dir {
        1 => player.facing = Facing::Right,
        -1 => player.facing = Facing::Left,
        _ => {},
    }
    player.body.x += player.vx;

    // Down is read before jump, so holding both drops instead of jumping.
    if input.down && !player.is_airborne() {
        player.fall_through = true;
        player.jumping = true;
        player.body.y += cfg.drop_nudge;
    }

    if input.jump && !player.is_airborne() {
        player.vy = cfg.jump_velocity;
        player.jumping = true;
        player.fall_through = false;
    }

    apply_gravity(player, cfg);
    resolve_platforms(player, level, cfg)
}

pub(crate) fn apply_gravity(player: &mut Player, cfg: &PhysicsConfig) {
    player.vy += cfg.gravity;
    player.body.y += player.vy;
}

/// Snap the player onto any platform its feet reached this tick. Platforms
/// are ignored while dropping through; the ground plane never is.
pub(crate) fn resolve_platforms(player: &mut Player, level: &Level, cfg: &PhysicsConfig) -> bool {
    let mut landed = false;
    if !player.fall_through {
        for platform in &level.platforms {
            if player.body.rests_on(platform, 0.0, cfg.land_tolerance) {
                land(player, platform.y);
                landed = true;
            }
        }
    }

    let floor_y = level.floor_y();
    if !landed && player.body.bottom() > floor_y {
        land(player, floor_y);
        landed = true;
    }
    landed
}

fn land(player: &mut Player, surface_y: f32) {
    player.body.snap_bottom_to(surface_y);
    player.vy = 0.0;
    player.jumping = false;
    player.fall_through = false;
}

/// Parameters of the "walk until the platform edge, then turn" movement
/// shared by enemies and power-ups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatrolRule {
    pub speed: f32,
    /// Feet may hover this far above a platform top and still stand on it.
    pub band_above: f32,
    /// Feet may sink this far below a platform top and still stand on it.
    pub band_below: f32,
    /// Turn when the leading edge is within this distance of the platform edge.
    pub edge_margin: f32,
    /// Per-tick drop when unsupported; `None` walkers float.
    pub fall_step: Option<f32>,
}

/// Anything that walks back and forth along the platform under it.
pub trait Patrol {
    fn patrol_rule(&self, cfg: &PhysicsConfig) -> PatrolRule;

    /// Advance one tick against the platform set.
    fn patrol(&mut self, platforms: &[Rect], cfg: &PhysicsConfig);
}

/// Move `body` one tick along `direction`, turning at platform edges.
///
/// Returns whether the walker ended the tick supported by a platform.
pub fn patrol_step(
    body: &mut Rect,
    direction: &mut Facing,
    rule: &PatrolRule,
    platforms: &[Rect],
) -> bool {
    body.x += direction.sign() * rule.speed;

    let mut supported = false;
    for platform in platforms {
        if !body.rests_on(platform, rule.band_above, rule.band_below) {
            continue;
        }
        supported = true;
        let at_edge = match *direction {
            Facing::Left => body.x <= platform.x + rule.edge_margin,
            Facing::Right => body.right() >= platform.right() - rule.edge_margin,
        };
        if at_edge {
            *direction = direction.flipped();
            break;
        }
    }

    if !supported && let Some(step) = rule.fall_step {
        body.y += step;
        if let Some(below) = platforms
            .iter()
            .find(|p| body.bottom() <= p.y && body.overlaps_horizontally(p))
        {
            body.snap_bottom_to(below.y);
            supported = true;
        }
    }
    supported
}

impl Patrol for Enemy {
    fn patrol_rule(&self, cfg: &PhysicsConfig) -> PatrolRule {
        PatrolRule {
            speed: self.speed,
            band_above: cfg.walker_band_above,
            band_below: cfg.walker_band_below,
            edge_margin: cfg.walker_edge_margin,
            fall_step: Some(cfg.walker_fall_step),
        }
    }

    fn patrol(&mut self, platforms: &[Rect], cfg: &PhysicsConfig) {
        let rule = self.patrol_rule(cfg);
        self.on_platform = patrol_step(&mut self.body, &mut self.direction, &rule, platforms);
    }
}

impl Patrol for PowerUp {
    fn patrol_rule(&self, cfg: &PhysicsConfig) -> PatrolRule {
        PatrolRule {
            speed: cfg.powerup_speed,
            band_above: 0.0,
            band_below: cfg.powerup_band_below,
            edge_margin: 0.0,
            fall_step: None,
        }
    }

    fn patrol(&mut self, platforms: &[Rect], cfg: &PhysicsConfig) {
        let rule = self.patrol_rule(cfg);
        patrol_step(&mut self.body, &mut self.direction, &rule, platforms);
    }
}
