//! Motion and lifecycle
//!
//! Integrates velocity into position, wraps into the world rectangle, counts
//! down lifetimes and retires expired entities. No scoring or destruction
//! semantics live here.

use crate::wrap_position;

use super::state::{GameState, Ship};

/// Advance the ship's countdowns and the gun cooldown by one tick.
///
/// Runs at the head of the tick so a timer armed later in the same tick is
/// observed at its full value once the tick completes.
pub fn tick_ship_timers(ship: &mut Ship, fire_cooldown: &mut u32) {
    if ship.rapid_fire.tick() {
        log::debug!("Rapid fire expired");
    }
    if ship.shield.tick() {
        log::debug!("Shield expired");
    }
    ship.invulnerable.tick();
    ship.teleport_cooldown = ship.teleport_cooldown.saturating_sub(1);
    *fire_cooldown = fire_cooldown.saturating_sub(1);
}

/// Move every entity one tick and drop the ones that expired
pub fn integrate(state: &mut GameState) {
    let (w, h) = (state.config.world_width, state.config.world_height);
    let damping = state.config.particle_damping;

    // Ship: friction first, then move
    let ship = &mut state.ship;
    ship.vel *= ship.friction;
    ship.pos = wrap_position(ship.pos + ship.vel, w, h);

    for projectile in &mut state.projectiles {
        projectile.pos = wrap_position(projectile.pos + projectile.vel, w, h);
        debug_assert!(projectile.lifetime > 0, "expired projectile survived a tick");
        projectile.lifetime = projectile.lifetime.saturating_sub(1);
    }
    state.projectiles.retain(|p| p.lifetime > 0);

    for obstacle in &mut state.obstacles {
        obstacle.pos = wrap_position(obstacle.pos + obstacle.vel, w, h);
        obstacle.rotation = crate::normalize_angle(obstacle.rotation + obstacle.spin);
    }

    integrate_hunter(state);

    for buff in &mut state.buffs {
        buff.lifetime = buff.lifetime.saturating_sub(1);
        buff.pulse += 0.1;
    }
    state.buffs.retain(|b| b.lifetime > 0);

    for particle in &mut state.particles {
        particle.pos = wrap_position(particle.pos + particle.vel, w, h);
        particle.vel *= damping;
        particle.lifetime = particle.lifetime.saturating_sub(1);
    }
    state.particles.retain(|p| p.lifetime > 0);
}

/// Hunter drifts across horizontally without wrapping; vertical wraps.
/// Removed once it is a full margin past either side.
fn integrate_hunter(state: &mut GameState) {
    let Some(hunter) = state.hunter.as_mut() else {
        return;
    };
    let (w, h) = (state.config.world_width, state.config.world_height);
    let margin = state.config.hunter_despawn_margin;

    hunter.pos += hunter.vel;
    hunter.pos.y = crate::wrap_coord(hunter.pos.y, h);

    if hunter.pos.x < -margin || hunter.pos.x > w + margin {
        log::debug!("Hunter left the field at x={:.1}", hunter.pos.x);
        state.hunter = None;
    }
}
