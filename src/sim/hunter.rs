//! Hunter AI: a saucer that crosses the field and takes inaccurate shots at
//! the nearest ship.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GameState, Hunter, ProjectileKind};

/// Vertical drift limit
const MAX_DRIFT: f32 = 2.0;
/// Per-tick vertical wobble
const WOBBLE: f32 = 0.1;

/// Create a hunter just outside a random side edge, heading inward
pub fn spawn(state: &mut GameState) {
    let config = &state.config;
    let (w, h) = (config.world_width, config.world_height);
    let edge_offset = config.hunter_radius;
    let from_left = state.rng.random_bool(0.5);

    let (x, vx) = if from_left {
        (-edge_offset, state.rng.random_range(1.0..2.0))
    } else {
        (w + edge_offset, state.rng.random_range(-2.0..-1.0))
    };
    // Keep clear of the top and bottom bands on tall enough worlds
    let band = (h * 0.5 - 1.0).min(100.0).max(0.0);
    let y = state.rng.random_range(band..h - band);
    let vy = state.rng.random_range(-1.0..1.0);

    state.hunter = Some(Hunter {
        pos: Vec2::new(x, y),
        vel: Vec2::new(vx, vy),
        radius: state.config.hunter_radius,
        shoot_cooldown: 0,
    });
    state.events.push(GameEvent::HunterSpawned);
    log::info!("Hunter spawned on the {} edge", if from_left { "left" } else { "right" });
}

/// Per-tick behaviour after motion: wobble, cool down, shoot when ready
pub fn think(state: &mut GameState) {
    let wobble = state.rng.random_range(-WOBBLE..WOBBLE);
    let Some(hunter) = state.hunter.as_mut() else {
        return;
    };
    hunter.vel.y = (hunter.vel.y + wobble).clamp(-MAX_DRIFT, MAX_DRIFT);
    hunter.shoot_cooldown = hunter.shoot_cooldown.saturating_sub(1);
    if hunter.shoot_cooldown > 0 {
        return;
    }

    let origin = hunter.pos;
    let ships = [state.ship.pos];
    let Some(target) = nearest(origin, &ships) else {
        return;
    };

    let jitter = state.config.hunter_aim_jitter;
    let bearing = (target - origin).to_angle() + state.rng.random_range(-jitter..=jitter);
    let vel = Vec2::from_angle(bearing) * state.config.hunter_projectile_speed;

    if let Some(hunter) = state.hunter.as_mut() {
        hunter.shoot_cooldown = state.config.hunter_shoot_delay;
    }
    state.spawn_projectile(ProjectileKind::Hunter, origin, vel);
    state.events.push(GameEvent::HunterFired);
}

/// Closest candidate to `origin`, recomputed fresh every call
pub fn nearest(origin: Vec2, candidates: &[Vec2]) -> Option<Vec2> {
    candidates
        .iter()
        .copied()
        .min_by(|a, b| a.distance_squared(origin).total_cmp(&b.distance_squared(origin)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    fn state_with_hunter(pos: Vec2) -> GameState {
        let mut state = GameState::new(SimConfig::default(), 3);
        state.hunter = Some(Hunter {
            pos,
            vel: Vec2::new(1.5, 0.0),
            radius: 20.0,
            shoot_cooldown: 0,
        });
        state
    }

    #[test]
    fn test_spawn_outside_side_edge_moving_inward() {
        let mut state = GameState::new(SimConfig::default(), 99);
        for _ in 0..50 {
            spawn(&mut state);
            let h = state.hunter.as_ref().expect("spawned");
            if h.pos.x < 0.0 {
                assert_eq!(h.pos.x, -20.0);
                assert!(h.vel.x >= 1.0 && h.vel.x < 2.0);
            } else {
                assert_eq!(h.pos.x, 1220.0);
                assert!(h.vel.x >= -2.0 && h.vel.x < -1.0);
            }
            assert!(h.pos.y >= 100.0 && h.pos.y < 800.0);
            assert!(h.vel.y.abs() <= 1.0);
            assert_eq!(h.shoot_cooldown, 0);
        }
    }

    #[test]
    fn test_shoots_at_ship_within_jitter() {
        let mut state = state_with_hunter(Vec2::new(100.0, 450.0));
        state.ship.pos = Vec2::new(600.0, 450.0);
        think(&mut state);

        assert_eq!(state.projectiles.len(), 1);
        let shot = &state.projectiles[0];
        assert_eq!(shot.kind, ProjectileKind::Hunter);
        assert!((shot.vel.length() - 5.0).abs() < 1e-4);
        // True bearing is 0 rad (straight right)
        assert!(shot.vel.to_angle().abs() <= 0.3 + 1e-5);
        assert_eq!(state.hunter.as_ref().map(|h| h.shoot_cooldown), Some(90));
        assert!(state.events.contains(&GameEvent::HunterFired));
    }

    #[test]
    fn test_holds_fire_while_cooling_down() {
        let mut state = state_with_hunter(Vec2::new(100.0, 450.0));
        if let Some(h) = state.hunter.as_mut() {
            h.shoot_cooldown = 5;
        }
        think(&mut state);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.hunter.as_ref().map(|h| h.shoot_cooldown), Some(4));
    }

    #[test]
    fn test_vertical_drift_stays_clamped() {
        let mut state = state_with_hunter(Vec2::new(100.0, 450.0));
        if let Some(h) = state.hunter.as_mut() {
            h.vel.y = 1.99;
            h.shoot_cooldown = 1000;
        }
        for _ in 0..500 {
            think(&mut state);
            let vy = state.hunter.as_ref().map(|h| h.vel.y).unwrap_or_default();
            assert!(vy.abs() <= MAX_DRIFT);
        }
    }

    #[test]
    fn test_nearest_picks_closest() {
        let origin = Vec2::ZERO;
        let picks = [Vec2::new(50.0, 0.0), Vec2::new(-10.0, 5.0), Vec2::new(0.0, 30.0)];
        assert_eq!(nearest(origin, &picks), Some(Vec2::new(-10.0, 5.0)));
        assert_eq!(nearest(origin, &[]), None);
    }
}
