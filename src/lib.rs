//! Asteroid Deluxe - arcade combat simulation core
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (motion, collisions, waves, session)
//! - `config`: Flat options record supplied at construction
//! - `error`: Configuration errors
//!
//! Rendering and audio live in the host. The host feeds a [`sim::TickInput`]
//! into [`sim::Simulation::advance_tick`] at 60 Hz, maps the returned
//! [`sim::FrameEvents`] to sounds and draws [`sim::Simulation::snapshot`].

pub mod config;
pub mod error;
pub mod sim;

pub use config::{QualityPreset, SimConfig};
pub use error::ConfigError;

use glam::Vec2;
use rand::Rng;

/// Default tuning constants (60 ticks per second)
pub mod consts {
    /// Logical simulation rate
    pub const TICK_RATE: u32 = 60;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 1200.0;
    pub const WORLD_HEIGHT: f32 = 900.0;

    pub const STARTING_LIVES: u32 = 3;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 15.0;
    pub const SHIP_ROTATION_STEP_DEG: f32 = 5.0;
    pub const SHIP_THRUST: f32 = 0.2;
    pub const SHIP_MAX_SPEED: f32 = 8.0;
    pub const SHIP_FRICTION: f32 = 0.99;
    /// Post-respawn immunity (2 seconds)
    pub const INVULNERABLE_TICKS: u32 = 2 * TICK_RATE;

    /// Gun
    pub const FIRE_DELAY: u32 = 10;
    pub const RAPID_FIRE_DELAY: u32 = 5;
    pub const PROJECTILE_SPEED: f32 = 10.0;
    pub const PROJECTILE_RADIUS: f32 = 3.0;
    pub const PROJECTILE_LIFETIME: u32 = 60;

    /// Hyperspace (3 seconds)
    pub const TELEPORT_COOLDOWN: u32 = 3 * TICK_RATE;
    pub const TELEPORT_MARGIN: f32 = 100.0;
    pub const TELEPORT_BURST: usize = 30;

    /// Waves
    pub const OBSTACLE_BASE_COUNT: u32 = 4;
    pub const SAFE_ZONE_RADIUS: f32 = 150.0;
    pub const OBSTACLE_MIN_AXIS_SPEED: f32 = 0.5;
    pub const OBSTACLE_MAX_AXIS_SPEED: f32 = 2.0;

    /// Hunter (every 10 seconds, shoots every 1.5 seconds)
    pub const HUNTER_SPAWN_INTERVAL: u32 = 10 * TICK_RATE;
    pub const HUNTER_RADIUS: f32 = 20.0;
    pub const HUNTER_SHOOT_DELAY: u32 = 90;
    pub const HUNTER_PROJECTILE_SPEED: f32 = 5.0;
    pub const HUNTER_AIM_JITTER: f32 = 0.3;
    pub const HUNTER_DESPAWN_MARGIN: f32 = 50.0;
    pub const HUNTER_KILL_BONUS: u64 = 500;

    /// Buffs (lifetime 10 seconds, effect 5 seconds)
    pub const BUFF_DROP_CHANCE: f64 = 0.1;
    pub const BUFF_RADIUS: f32 = 15.0;
    pub const BUFF_LIFETIME: u32 = 10 * TICK_RATE;
    pub const BUFF_DURATION: u32 = 5 * TICK_RATE;

    /// Particles
    pub const EXPLOSION_BURST: usize = 30;
    pub const EXPLOSION_SPEED: (f32, f32) = (2.0, 8.0);
    pub const TELEPORT_BURST_SPEED: (f32, f32) = (1.0, 5.0);
    pub const BURST_LIFETIME: u32 = 40;
    pub const TRAIL_KICK: f32 = 3.0;
    pub const TRAIL_LIFETIME: u32 = 20;
    pub const PARTICLE_DAMPING: f32 = 0.98;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit vector a ship facing `angle` points along.
///
/// Screen space: angle 0 faces up (-y), positive angles turn clockwise.
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), -angle.cos())
}

/// Wrap a single coordinate into [0, max)
#[inline]
pub fn wrap_coord(value: f32, max: f32) -> f32 {
    let wrapped = value.rem_euclid(max);
    // rem_euclid can round up to `max` for tiny negative inputs
    if wrapped >= max { 0.0 } else { wrapped }
}

/// Wrap a position into the [0, w) x [0, h) world rectangle
#[inline]
pub fn wrap_position(pos: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(wrap_coord(pos.x, width), wrap_coord(pos.y, height))
}

/// Strict circle overlap: distance between centers less than the radius sum
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) < reach * reach
}

/// Random direction scaled by a speed drawn from `[min_speed, max_speed)`
pub fn random_burst_velocity<R: Rng + ?Sized>(rng: &mut R, min_speed: f32, max_speed: f32) -> Vec2 {
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    let speed = rng.random_range(min_speed..max_speed);
    Vec2::new(angle.cos(), angle.sin()) * speed
}
