//! Wave/spawn director
//!
//! Seeds waves of large obstacles outside the center safe zone and schedules
//! hunter visits. Owns no entities once they are spawned.

use glam::Vec2;
use rand::Rng;

use super::hunter;
use super::state::{GameEvent, GameState, SizeClass};

/// Rejection-sampling budget before falling back to the origin corner
const MAX_PLACEMENT_ATTEMPTS: u32 = 1000;

/// Obstacle count for a wave: base + (wave - 1)
pub fn wave_obstacle_count(base: u32, wave: u32) -> u32 {
    base + wave.saturating_sub(1)
}

/// Populate the current wave (used at session start and after each clear)
pub fn spawn_wave(state: &mut GameState) {
    let wave = state.session.wave();
    let count = wave_obstacle_count(state.config.obstacle_base_count, wave);
    for _ in 0..count {
        let pos = safe_spawn_point(state);
        state.spawn_obstacle(pos, SizeClass::Large);
    }
    log::info!("Wave {wave}: {count} obstacles");
}

/// Uniform point in the world, redrawn while inside the safe zone
fn safe_spawn_point(state: &mut GameState) -> Vec2 {
    let (w, h) = (state.config.world_width, state.config.world_height);
    let center = state.config.center();
    let safe = state.config.safe_zone_radius;
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let p = Vec2::new(state.rng.random_range(0.0..w), state.rng.random_range(0.0..h));
        if p.distance(center) >= safe {
            return p;
        }
    }
    Vec2::ZERO
}

/// End-of-tick checks: refill an empty field, tick the hunter schedule
pub fn update(state: &mut GameState) {
    if state.obstacles.is_empty() {
        let wave = state.session.next_wave();
        state.events.push(GameEvent::WaveCleared { wave });
        spawn_wave(state);
    }

    state.hunter_timer = state.hunter_timer.saturating_add(1);
    if state.hunter_timer >= state.config.hunter_spawn_interval && state.hunter.is_none() {
        hunter::spawn(state);
        state.hunter_timer = 0;
    }
}
