//! Input/control resolver
//!
//! Turns one tick's control snapshot into ship rotation, thrust, shots and
//! hyperspace jumps.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GameState, ParticleTint, ProjectileKind};
use super::tick::TickInput;
use crate::{heading, normalize_angle};

/// Apply a control snapshot to the ship
pub fn apply_controls(state: &mut GameState, input: &TickInput) {
    let step = state.config.rotation_step();
    let ship = &mut state.ship;
    if input.rotate_left {
        ship.angle -= step;
    }
    if input.rotate_right {
        ship.angle += step;
    }
    ship.angle = normalize_angle(ship.angle);

    ship.thrusting = input.thrust;
    if input.thrust {
        apply_thrust(state);
    }

    if input.teleport && state.ship.teleport_cooldown == 0 {
        teleport(state);
    }

    if input.fire && state.fire_cooldown == 0 {
        fire(state);
    }
}

/// Accelerate along the facing direction, cap speed by rescaling, and
/// sometimes leave an exhaust particle behind.
fn apply_thrust(state: &mut GameState) {
    let thrust = state.config.ship_thrust;
    let ship = &mut state.ship;
    let dir = heading(ship.angle);
    ship.vel += dir * thrust;
    ship.vel = ship.vel.clamp_length_max(ship.max_speed);

    if state.rng.random_bool(0.5) {
        let back = state.ship.pos - dir * state.ship.radius;
        let jitter = Vec2::new(
            state.rng.random_range(-1.0..1.0),
            state.rng.random_range(-1.0..1.0),
        );
        let vel = state.ship.vel - dir * state.config.trail_kick + jitter;
        let lifetime = state.config.trail_lifetime;
        state.emit_particle(back, vel, ParticleTint::Accent, lifetime);
    }
}

/// Launch one projectile from the nose and restart the gun cooldown
fn fire(state: &mut GameState) {
    let ship = &state.ship;
    let pos = ship.nose();
    let vel = ship.vel + heading(ship.angle) * state.config.projectile_speed;
    state.fire_cooldown = if ship.rapid_fire.is_active() {
        state.config.rapid_fire_delay
    } else {
        state.config.fire_delay
    };
    state.spawn_projectile(ProjectileKind::Player, pos, vel);
    state.events.push(GameEvent::ShotFired);
}

/// Hyperspace: burst out, land anywhere inside the margin at rest, burst in.
/// The destination is not checked for hazards.
fn teleport(state: &mut GameState) {
    let burst = state.config.teleport_burst;
    let speed = state.config.teleport_burst_speed;
    let lifetime = state.config.burst_lifetime;
    let margin = state.config.teleport_margin;
    let (w, h) = (state.config.world_width, state.config.world_height);

    let from = state.ship.pos;
    state.emit_burst(from, burst, speed, ParticleTint::Bright, lifetime);

    let to = Vec2::new(
        state.rng.random_range(margin..w - margin),
        state.rng.random_range(margin..h - margin),
    );
    state.ship.pos = to;
    state.ship.vel = Vec2::ZERO;
    state.emit_burst(to, burst, speed, ParticleTint::Bright, lifetime);

    state.ship.teleport_cooldown = state.config.teleport_cooldown;
    state.events.push(GameEvent::Teleported);
    log::debug!("Teleport ({:.0}, {:.0}) -> ({:.0}, {:.0})", from.x, from.y, to.x, to.y);
}
