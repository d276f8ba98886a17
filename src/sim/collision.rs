//! Collision detection and resolution
//!
//! Circle-circle overlap between entity categories, resolved in a fixed
//! priority order so outcomes are reproducible:
//!
//! 1. Player projectile vs obstacle (first obstacle in order wins)
//! 2. Player projectile vs hunter (only if that projectile hit no obstacle)
//! 3. Ship vs obstacle, hunter projectile, hunter (skipped while protected)
//! 4. Ship vs buff
//!
//! Entities are removed from their collection the moment they are resolved,
//! so nothing can be matched twice in one pass.

use rand::Rng;

use super::state::{BuffKind, GameEvent, GameState, ParticleTint, ProjectileKind, Ship};
use crate::circles_overlap;

/// Run every collision rule once
pub fn resolve_collisions(state: &mut GameState) {
    resolve_player_shots(state);
    resolve_ship_hazards(state);
    resolve_pickups(state);
}

fn resolve_player_shots(state: &mut GameState) {
    let mut i = 0;
    while i < state.projectiles.len() {
        let shot = &state.projectiles[i];
        if shot.kind != ProjectileKind::Player {
            i += 1;
            continue;
        }
        let (pos, radius) = (shot.pos, shot.radius);

        let hit_obstacle = state
            .obstacles
            .iter()
            .position(|o| circles_overlap(pos, radius, o.pos, o.radius));
        if let Some(index) = hit_obstacle {
            state.projectiles.remove(i);
            destroy_obstacle(state, index);
            continue;
        }

        let hit_hunter = state
            .hunter
            .as_ref()
            .is_some_and(|h| circles_overlap(pos, radius, h.pos, h.radius));
        if hit_hunter {
            state.projectiles.remove(i);
            destroy_hunter(state);
            continue;
        }

        i += 1;
    }
}

/// Score, explode and split the obstacle at `index`; maybe drop a buff
fn destroy_obstacle(state: &mut GameState, index: usize) {
    let obstacle = state.obstacles.remove(index);
    state.session.award(obstacle.size.score());
    state.explode(obstacle.pos, ParticleTint::Accent);
    state.events.push(GameEvent::ObstacleDestroyed {
        size: obstacle.size,
    });

    if let Some(child) = obstacle.size.split() {
        for _ in 0..2 {
            state.spawn_obstacle(obstacle.pos, child);
        }
    }

    if state.rng.random_bool(state.config.buff_drop_chance) {
        let kind = if state.rng.random_bool(0.5) {
            BuffKind::RapidFire
        } else {
            BuffKind::Shield
        };
        state.spawn_buff(obstacle.pos, kind);
    }
}

fn destroy_hunter(state: &mut GameState) {
    let Some(hunter) = state.hunter.take() else {
        return;
    };
    state.session.award(state.config.hunter_kill_bonus);
    state.explode(hunter.pos, ParticleTint::Bright);
    state.events.push(GameEvent::HunterDestroyed);
    log::info!("Hunter destroyed, +{}", state.config.hunter_kill_bonus);
}

fn resolve_ship_hazards(state: &mut GameState) {
    if state.ship.is_protected() {
        return;
    }
    let (pos, radius) = (state.ship.pos, state.ship.radius);

    let rammed = state
        .obstacles
        .iter()
        .position(|o| circles_overlap(pos, radius, o.pos, o.radius));
    if let Some(index) = rammed {
        // Rammed rocks vanish without splitting or scoring
        state.obstacles.remove(index);
        destroy_ship(state);
        return;
    }

    let shot = state.projectiles.iter().position(|p| {
        p.kind == ProjectileKind::Hunter && circles_overlap(pos, radius, p.pos, p.radius)
    });
    if let Some(index) = shot {
        state.projectiles.remove(index);
        destroy_ship(state);
        return;
    }

    let collided = state
        .hunter
        .as_ref()
        .is_some_and(|h| circles_overlap(pos, radius, h.pos, h.radius));
    if collided {
        destroy_ship(state);
        if let Some(hunter) = state.hunter.take() {
            state.explode(hunter.pos, ParticleTint::Bright);
            state.events.push(GameEvent::HunterDestroyed);
        }
    }
}

/// Lose a life and swap in a brand-new ship; the wreck is dropped whole
fn destroy_ship(state: &mut GameState) {
    let wreck = state.ship.pos;
    state.explode(wreck, ParticleTint::Accent);
    state.events.push(GameEvent::ShipDestroyed);
    state.ship = Ship::respawned(&state.config);

    if state.session.lose_life() {
        state.events.push(GameEvent::GameOver);
    } else {
        log::info!("Ship destroyed, {} lives left", state.session.lives());
    }
}

/// Collect at most one overlapping buff; its timer is set, not extended
fn resolve_pickups(state: &mut GameState) {
    let (pos, radius) = (state.ship.pos, state.ship.radius);
    let Some(index) = state
        .buffs
        .iter()
        .position(|b| circles_overlap(pos, radius, b.pos, b.radius))
    else {
        return;
    };

    let buff = state.buffs.remove(index);
    let duration = state.config.buff_duration;
    match buff.kind {
        BuffKind::RapidFire => state.ship.rapid_fire.arm(duration),
        BuffKind::Shield => state.ship.shield.arm(duration),
    }
    state.events.push(GameEvent::BuffCollected { kind: buff.kind });
    log::debug!("Collected {:?}", buff.kind);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::state::{GamePhase, Hunter, SizeClass};
    use glam::Vec2;

    fn quiet_state() -> GameState {
        let config = SimConfig {
            buff_drop_chance: 0.0,
            ..Default::default()
        };
        GameState::new(config, 21)
    }

    fn place_obstacle(state: &mut GameState, pos: Vec2, size: SizeClass) -> u32 {
        state.spawn_obstacle(pos, size);
        let obstacle = state.obstacles.last_mut().expect("just spawned");
        obstacle.pos = pos;
        obstacle.id
    }

    fn count(state: &GameState, size: SizeClass) -> usize {
        state.obstacles.iter().filter(|o| o.size == size).count()
    }

    fn hunter_at(pos: Vec2) -> Hunter {
        Hunter {
            pos,
            vel: Vec2::ZERO,
            radius: 20.0,
            shoot_cooldown: 50,
        }
    }

    #[test]
    fn test_large_splits_into_two_medium() {
        let mut state = quiet_state();
        let at = Vec2::new(200.0, 200.0);
        place_obstacle(&mut state, at, SizeClass::Large);
        state.spawn_projectile(ProjectileKind::Player, at, Vec2::ZERO);

        resolve_collisions(&mut state);

        assert!(state.projectiles.is_empty());
        assert_eq!(count(&state, SizeClass::Large), 0);
        assert_eq!(count(&state, SizeClass::Medium), 2);
        assert!(state.obstacles.iter().all(|o| o.pos == at));
        assert_eq!(state.session.score(), 20);
        assert_eq!(state.particles.len(), 30);
    }

    #[test]
    fn test_medium_splits_small_and_small_vanishes() {
        let mut state = quiet_state();
        place_obstacle(&mut state, Vec2::new(200.0, 200.0), SizeClass::Medium);
        place_obstacle(&mut state, Vec2::new(900.0, 700.0), SizeClass::Small);
        state.spawn_projectile(ProjectileKind::Player, Vec2::new(200.0, 200.0), Vec2::ZERO);
        state.spawn_projectile(ProjectileKind::Player, Vec2::new(900.0, 700.0), Vec2::ZERO);

        resolve_collisions(&mut state);

        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(count(&state, SizeClass::Small), 2);
        assert_eq!(state.session.score(), 50 + 100);
    }

    #[test]
    fn test_one_projectile_resolves_only_first_obstacle() {
        let mut state = quiet_state();
        let at = Vec2::new(400.0, 400.0);
        let first = place_obstacle(&mut state, at, SizeClass::Small);
        let second = place_obstacle(&mut state, at, SizeClass::Small);
        state.spawn_projectile(ProjectileKind::Player, at, Vec2::ZERO);

        resolve_collisions(&mut state);

        let ids: Vec<u32> = state.obstacles.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![second]);
        assert!(!ids.contains(&first));
        assert_eq!(state.session.score(), 100);
    }

    #[test]
    fn test_obstacle_hit_shields_hunter() {
        let mut state = quiet_state();
        let at = Vec2::new(300.0, 300.0);
        place_obstacle(&mut state, at, SizeClass::Small);
        state.hunter = Some(hunter_at(at));
        state.spawn_projectile(ProjectileKind::Player, at, Vec2::ZERO);

        resolve_collisions(&mut state);

        assert!(state.hunter.is_some());
        assert_eq!(state.session.score(), 100);
    }

    #[test]
    fn test_projectile_kills_hunter_for_bonus() {
        let mut state = quiet_state();
        let at = Vec2::new(300.0, 300.0);
        state.hunter = Some(hunter_at(at));
        state.spawn_projectile(ProjectileKind::Player, at + Vec2::new(10.0, 0.0), Vec2::ZERO);

        resolve_collisions(&mut state);

        assert!(state.hunter.is_none());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.session.score(), 500);
        assert!(state.events.contains(&GameEvent::HunterDestroyed));
        assert!(
            state
                .particles
                .iter()
                .all(|p| p.tint == ParticleTint::Bright)
        );
    }

    #[test]
    fn test_ship_rams_obstacle() {
        let mut state = quiet_state();
        let center = state.config.center();
        state.ship.pos = Vec2::new(100.0, 100.0);
        state.ship.vel = Vec2::new(4.0, 4.0);
        state.ship.angle = 1.0;
        place_obstacle(&mut state, Vec2::new(110.0, 100.0), SizeClass::Large);

        resolve_collisions(&mut state);

        assert_eq!(state.session.lives(), 2);
        assert!(state.obstacles.is_empty(), "rammed obstacle removed without splitting");
        assert_eq!(state.session.score(), 0);
        assert_eq!(state.ship.pos, center);
        assert_eq!(state.ship.vel, Vec2::ZERO);
        assert_eq!(state.ship.angle, 0.0);
        assert!(state.ship.invulnerable.is_active());
        assert_eq!(state.ship.invulnerable.remaining(), 120);
        assert!(state.events.contains(&GameEvent::ShipDestroyed));
    }

    #[test]
    fn test_protected_ship_ignores_hazards() {
        let mut state = quiet_state();
        let pos = state.ship.pos;
        place_obstacle(&mut state, pos, SizeClass::Large);
        state.spawn_projectile(ProjectileKind::Hunter, pos, Vec2::ZERO);
        state.hunter = Some(hunter_at(pos));

        state.ship.shield.arm(10);
        resolve_collisions(&mut state);
        assert_eq!(state.session.lives(), 3);

        state.ship.shield.arm(0);
        state.ship.invulnerable.arm(10);
        resolve_collisions(&mut state);
        assert_eq!(state.session.lives(), 3);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.projectiles.len(), 1);
        assert!(state.hunter.is_some());
    }

    #[test]
    fn test_hunter_projectile_kills_ship() {
        let mut state = quiet_state();
        state.ship.pos = Vec2::new(100.0, 100.0);
        state.spawn_projectile(ProjectileKind::Hunter, Vec2::new(105.0, 100.0), Vec2::ZERO);

        resolve_collisions(&mut state);

        assert!(state.projectiles.is_empty());
        assert_eq!(state.session.lives(), 2);
    }

    #[test]
    fn test_player_shot_does_not_hit_own_ship() {
        let mut state = quiet_state();
        let pos = state.ship.pos;
        state.spawn_projectile(ProjectileKind::Player, pos, Vec2::ZERO);
        resolve_collisions(&mut state);
        assert_eq!(state.session.lives(), 3);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_hunter_collision_is_mutual_destruction() {
        let mut state = quiet_state();
        state.ship.pos = Vec2::new(100.0, 100.0);
        state.hunter = Some(hunter_at(Vec2::new(120.0, 100.0)));

        resolve_collisions(&mut state);

        assert!(state.hunter.is_none());
        assert_eq!(state.session.lives(), 2);
        // Ship burst plus hunter burst
        assert_eq!(state.particles.len(), 60);
        // No bonus for ramming
        assert_eq!(state.session.score(), 0);
    }

    #[test]
    fn test_last_life_transitions_to_game_over() {
        let config = SimConfig {
            starting_lives: 1,
            ..Default::default()
        };
        let mut state = GameState::new(config, 8);
        let pos = state.ship.pos;
        place_obstacle(&mut state, pos, SizeClass::Small);

        resolve_collisions(&mut state);

        assert_eq!(state.session.lives(), 0);
        assert_eq!(state.session.phase(), GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver));
    }

    #[test]
    fn test_buff_sets_full_duration_without_stacking() {
        let mut state = quiet_state();
        state.ship.rapid_fire.arm(50);
        let pos = state.ship.pos;
        state.spawn_buff(pos, BuffKind::RapidFire);

        resolve_collisions(&mut state);

        assert!(state.buffs.is_empty());
        assert_eq!(state.ship.rapid_fire.remaining(), 300);
        assert!(state.ship.rapid_fire.is_active());
    }

    #[test]
    fn test_one_buff_per_pass() {
        let mut state = quiet_state();
        let pos = state.ship.pos;
        state.spawn_buff(pos, BuffKind::Shield);
        state.spawn_buff(pos, BuffKind::RapidFire);

        resolve_collisions(&mut state);
        assert!(state.ship.shield.is_active());
        assert!(!state.ship.rapid_fire.is_active());
        assert_eq!(state.buffs.len(), 1);
    }

    #[test]
    fn test_guaranteed_drop_spawns_buff_at_obstacle() {
        let config = SimConfig {
            buff_drop_chance: 1.0,
            ..Default::default()
        };
        let mut state = GameState::new(config, 4);
        let at = Vec2::new(250.0, 250.0);
        place_obstacle(&mut state, at, SizeClass::Small);
        state.spawn_projectile(ProjectileKind::Player, at, Vec2::ZERO);

        resolve_collisions(&mut state);

        assert_eq!(state.buffs.len(), 1);
        assert_eq!(state.buffs[0].pos, at);
        assert_eq!(state.buffs[0].lifetime, 600);
    }

    #[test]
    fn test_second_pass_destroys_nothing() {
        let mut state = quiet_state();
        let at = Vec2::new(200.0, 200.0);
        place_obstacle(&mut state, at, SizeClass::Large);
        state.spawn_projectile(ProjectileKind::Player, at, Vec2::ZERO);
        state.hunter = Some(hunter_at(Vec2::new(900.0, 200.0)));
        let ship_pos = state.ship.pos;
        place_obstacle(&mut state, ship_pos, SizeClass::Small);

        resolve_collisions(&mut state);
        let score = state.session.score();
        let lives = state.session.lives();
        let obstacles = state.obstacles.len();
        let particles = state.particles.len();

        resolve_collisions(&mut state);
        assert_eq!(state.session.score(), score);
        assert_eq!(state.session.lives(), lives);
        assert_eq!(state.obstacles.len(), obstacles);
        assert_eq!(state.particles.len(), particles);
    }
}
