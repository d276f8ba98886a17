//! Deterministic simulation module
//!
//! All gameplay lives here. Rules for this module:
//! - One call to `tick` is one logical 1/60 s step; no wall clock
//! - Randomness only through the state's seeded PCG stream
//! - Entities are kept in creation order and resolved in that order
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod control;
pub mod director;
pub mod hunter;
pub mod motion;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use session::Session;
pub use snapshot::{
    BuffView, HunterView, ObstacleView, ParticleView, ProjectileView, RenderState, ShipView,
};
pub use state::{
    Buff, BuffKind, Countdown, GameEvent, GamePhase, GameState, Hunter, Obstacle, Particle,
    ParticleTint, Projectile, ProjectileKind, Ship, SizeClass,
};
pub use tick::{FrameEvents, Simulation, TickInput, tick};
