//! Fixed timestep simulation tick
//!
//! One call advances the world by exactly one logical tick (1/60 s). The
//! caller owns the clock; nothing in here sleeps or reads time.

use glam::Vec2;
use rand::Rng;

use super::snapshot::RenderState;
use super::state::{GameEvent, GameState};
use super::{collision, control, director, hunter, motion};
use crate::config::SimConfig;
use crate::error::ConfigError;

/// Controls held during a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub fire: bool,
    /// Hyperspace jump
    pub teleport: bool,
}

impl TickInput {
    /// Build from logical control names. Unknown names are ignored.
    pub fn from_controls<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut input = Self::default();
        for name in names {
            match name {
                "rotate_left" => input.rotate_left = true,
                "rotate_right" => input.rotate_right = true,
                "thrust" => input.thrust = true,
                "fire" => input.fire = true,
                "teleport" => input.teleport = true,
                other => log::trace!("Ignoring unknown control {other:?}"),
            }
        }
        input
    }
}

/// Events raised during one tick, in the order they happened
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameEvents {
    events: Vec<GameEvent>,
}

impl FrameEvents {
    pub fn iter(&self) -> std::slice::Iter<'_, GameEvent> {
        self.events.iter()
    }

    pub fn contains(&self, event: &GameEvent) -> bool {
        self.events.contains(event)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn as_slice(&self) -> &[GameEvent] {
        &self.events
    }
}

impl IntoIterator for FrameEvents {
    type Item = GameEvent;
    type IntoIter = std::vec::IntoIter<GameEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

/// Advance the game state by one tick.
///
/// Order: ship timers, controls, motion, hunter AI, collisions, wave/spawn
/// director. After GameOver this is a no-op that reports no events.
pub fn tick(state: &mut GameState, input: &TickInput) -> FrameEvents {
    if state.is_game_over() {
        return FrameEvents::default();
    }

    state.events.clear();
    state.time_ticks += 1;

    motion::tick_ship_timers(&mut state.ship, &mut state.fire_cooldown);
    control::apply_controls(state, input);
    motion::integrate(state);
    hunter::think(state);
    collision::resolve_collisions(state);

    // No refills once the last life is gone
    if !state.is_game_over() {
        director::update(state);
    }

    check_invariants(state);

    FrameEvents {
        events: std::mem::take(&mut state.events),
    }
}

/// Debug-build checks on the post-tick world
fn check_invariants(state: &GameState) {
    if !cfg!(debug_assertions) {
        return;
    }
    let (w, h) = (state.config.world_width, state.config.world_height);
    let inside = |p: Vec2| p.x >= 0.0 && p.x < w && p.y >= 0.0 && p.y < h;

    debug_assert!(inside(state.ship.pos), "ship escaped the world: {}", state.ship.pos);
    for p in &state.projectiles {
        debug_assert!(inside(p.pos), "projectile {} escaped: {}", p.id, p.pos);
        debug_assert!(p.lifetime > 0, "expired projectile {} still live", p.id);
    }
    for o in &state.obstacles {
        debug_assert!(inside(o.pos), "obstacle {} escaped: {}", o.id, o.pos);
    }
    for b in &state.buffs {
        debug_assert!(b.lifetime > 0, "expired buff {} still live", b.id);
    }
    for p in &state.particles {
        debug_assert!(inside(p.pos), "particle escaped: {}", p.pos);
    }
    if let Some(hunter) = &state.hunter {
        debug_assert!(hunter.pos.y >= 0.0 && hunter.pos.y < h);
    }
}

/// Host-facing simulation: owns the state, hands out snapshots.
///
/// A tick mutates several collections in a fixed order; a multi-threaded
/// host must guard the whole `Simulation` with one lock.
#[derive(Debug, Clone)]
pub struct Simulation {
    state: GameState,
}

impl Simulation {
    /// New session seeded from the thread RNG
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let seed = rand::rng().random::<u64>();
        Self::with_seed(config, seed)
    }

    /// New session with a fixed seed (reproducible runs and tests)
    pub fn with_seed(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut state = GameState::new(config, seed);
        director::spawn_wave(&mut state);
        log::info!(
            "Simulation started (seed {seed}, {} quality)",
            state.config.quality.as_str()
        );
        Ok(Self { state })
    }

    pub fn advance_tick(&mut self, input: &TickInput) -> FrameEvents {
        tick(&mut self.state, input)
    }

    pub fn snapshot(&self) -> RenderState {
        RenderState::capture(&self.state)
    }

    /// Fresh session: score 0, full lives, wave 1, new ship and first wave
    pub fn reset(&mut self) {
        let state = &mut self.state;
        state.session.reset(state.config.starting_lives);
        state.clear_world();
        state.time_ticks = 0;
        director::spawn_wave(state);
        log::info!("Session reset");
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for tooling and scenario setup
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }
}
