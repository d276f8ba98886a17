//! Game state and core simulation types
//!
//! Every live entity is owned by one of the collections on [`GameState`].
//! Nothing holds a reference to another entity; lookups such as "nearest
//! ship" are recomputed each tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::session::Session;
use crate::config::SimConfig;
use crate::random_burst_velocity;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Lives exhausted; only `reset` leaves this state
    GameOver,
}

/// A (flag, remaining ticks) timer. The flag is set exactly while ticks remain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    active: bool,
    remaining: u32,
}

impl Countdown {
    /// Start (or restart) the timer at `ticks`, replacing any remaining time
    pub fn arm(&mut self, ticks: u32) {
        self.remaining = ticks;
        self.active = ticks > 0;
    }

    pub fn armed(ticks: u32) -> Self {
        let mut countdown = Self::default();
        countdown.arm(ticks);
        countdown
    }

    /// Advance one tick. Returns true on the tick the timer runs out.
    pub fn tick(&mut self) -> bool {
        debug_assert_eq!(self.active, self.remaining > 0, "countdown flag out of sync");
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            self.active = false;
            return true;
        }
        false
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing (radians, 0 = up)
    pub angle: f32,
    pub radius: f32,
    pub max_speed: f32,
    pub friction: f32,
    pub rapid_fire: Countdown,
    pub shield: Countdown,
    pub invulnerable: Countdown,
    pub teleport_cooldown: u32,
    /// Thrust was applied this tick (renderer draws exhaust)
    pub thrusting: bool,
}

impl Ship {
    /// A fresh ship at rest at `pos`
    pub fn new(config: &SimConfig, pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            angle: 0.0,
            radius: config.ship_radius,
            max_speed: config.ship_max_speed,
            friction: config.ship_friction,
            rapid_fire: Countdown::default(),
            shield: Countdown::default(),
            invulnerable: Countdown::default(),
            teleport_cooldown: 0,
            thrusting: false,
        }
    }

    /// Replacement ship after a death: centered, at rest, briefly immune
    pub fn respawned(config: &SimConfig) -> Self {
        let mut ship = Self::new(config, config.center());
        ship.invulnerable.arm(config.invulnerable_ticks);
        ship
    }

    /// Immune to every hazard (invulnerability window or shield)
    #[inline]
    pub fn is_protected(&self) -> bool {
        self.invulnerable.is_active() || self.shield.is_active()
    }

    /// Point projectiles leave from
    #[inline]
    pub fn nose(&self) -> Vec2 {
        self.pos + crate::heading(self.angle) * self.radius
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Player,
    Hunter,
}

/// A bullet. Wraps at world edges; expires by lifetime only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub kind: ProjectileKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub lifetime: u32,
}

/// Obstacle size classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    Large,
    Medium,
    Small,
}

impl SizeClass {
    pub fn radius(&self) -> f32 {
        match self {
            SizeClass::Large => 40.0,
            SizeClass::Medium => 25.0,
            SizeClass::Small => 15.0,
        }
    }

    pub fn score(&self) -> u64 {
        match self {
            SizeClass::Large => 20,
            SizeClass::Medium => 50,
            SizeClass::Small => 100,
        }
    }

    /// Class of the two fragments left when destroyed
    pub fn split(&self) -> Option<SizeClass> {
        match self {
            SizeClass::Large => Some(SizeClass::Medium),
            SizeClass::Medium => Some(SizeClass::Small),
            SizeClass::Small => None,
        }
    }
}

/// A drifting, splitting rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub size: SizeClass,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Collision radius (the outline is cosmetic)
    pub radius: f32,
    /// Irregular silhouette in local space
    pub outline: Vec<Vec2>,
    /// Render rotation (radians)
    pub rotation: f32,
    /// Rotation per tick (radians)
    pub spin: f32,
}

impl Obstacle {
    pub fn new<R: Rng + ?Sized>(
        id: u32,
        pos: Vec2,
        size: SizeClass,
        config: &SimConfig,
        rng: &mut R,
    ) -> Self {
        let radius = size.radius();
        let vel = Vec2::new(
            drift_component(rng, config.obstacle_min_axis_speed, config.obstacle_max_axis_speed),
            drift_component(rng, config.obstacle_min_axis_speed, config.obstacle_max_axis_speed),
        );

        let vertex_count = rng.random_range(8..=12);
        let step = 360.0 / vertex_count as f32;
        let outline = (0..vertex_count)
            .map(|i| {
                let angle = (step * i as f32 + rng.random_range(-15.0..15.0)).to_radians();
                let dist = radius + rng.random_range(-radius * 0.3..radius * 0.2);
                Vec2::new(angle.cos(), angle.sin()) * dist
            })
            .collect();

        Self {
            id,
            size,
            pos,
            vel,
            radius,
            outline,
            rotation: rng.random_range(0.0..std::f32::consts::TAU),
            spin: rng.random_range(-2.0f32..2.0).to_radians(),
        }
    }

    /// Outline rotated and placed in world space
    pub fn world_outline(&self) -> Vec<Vec2> {
        let rot = Vec2::from_angle(self.rotation);
        self.outline.iter().map(|p| self.pos + rot.rotate(*p)).collect()
    }
}

/// One velocity axis with a floor on its magnitude: slow draws snap to ±1
fn drift_component<R: Rng + ?Sized>(rng: &mut R, min_speed: f32, max_speed: f32) -> f32 {
    let v: f32 = rng.random_range(-max_speed..max_speed);
    if v.abs() < min_speed {
        if v >= 0.0 { 1.0 } else { -1.0 }
    } else {
        v
    }
}

/// The saucer that hunts the ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hunter {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub shoot_cooldown: u32,
}

/// Pickup kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuffKind {
    RapidFire,
    Shield,
}

/// A collectible modifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Buff {
    pub id: u32,
    pub kind: BuffKind,
    pub pos: Vec2,
    pub radius: f32,
    pub lifetime: u32,
    /// Render pulse phase
    pub pulse: f32,
}

/// Render color selector for particles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleTint {
    /// Thrust trail, obstacle and ship explosions
    Accent,
    /// Hyperspace bursts and hunter explosions
    Bright,
}

/// A cosmetic particle; never collides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub tint: ParticleTint,
    pub lifetime: u32,
    pub max_lifetime: u32,
    pub size: f32,
}

impl Particle {
    /// Remaining life as a 0..1 fraction (for alpha)
    pub fn fade(&self) -> f32 {
        if self.max_lifetime == 0 {
            0.0
        } else {
            self.lifetime as f32 / self.max_lifetime as f32
        }
    }
}

/// Tagged per-tick events for the host (sound, HUD flashes)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired,
    HunterFired,
    Explosion { at: Vec2, tint: ParticleTint },
    ObstacleDestroyed { size: SizeClass },
    HunterSpawned,
    HunterDestroyed,
    BuffDropped { kind: BuffKind },
    BuffCollected { kind: BuffKind },
    ShipDestroyed,
    Teleported,
    /// A cleared wave was replaced; carries the new wave number
    WaveCleared { wave: u32 },
    GameOver,
}

/// Complete simulation state: the context object every system mutates
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: SimConfig,
    /// Seed the run was started with
    pub seed: u64,
    pub rng: Pcg32,
    /// Ticks simulated since construction or reset
    pub time_ticks: u64,
    pub session: Session,
    pub ship: Ship,
    /// Ticks until the gun may fire again
    pub fire_cooldown: u32,
    /// Player and hunter projectiles, in creation order
    pub projectiles: Vec<Projectile>,
    pub obstacles: Vec<Obstacle>,
    pub hunter: Option<Hunter>,
    pub buffs: Vec<Buff>,
    pub particles: Vec<Particle>,
    /// Ticks since the last hunter spawn
    pub hunter_timer: u32,
    /// Events raised during the current tick
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Empty world with a centered ship and no obstacles.
    ///
    /// Use [`super::director::spawn_wave`] (or `Simulation`) to seed wave 1.
    pub fn new(config: SimConfig, seed: u64) -> Self {
        let ship = Ship::new(&config, config.center());
        let session = Session::new(config.starting_lives);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            session,
            ship,
            fire_cooldown: 0,
            projectiles: Vec::new(),
            obstacles: Vec::new(),
            hunter: None,
            buffs: Vec::new(),
            particles: Vec::new(),
            hunter_timer: 0,
            events: Vec::new(),
            next_id: 1,
            config,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Drop every entity and put a fresh ship at the center
    pub fn clear_world(&mut self) {
        self.ship = Ship::new(&self.config, self.config.center());
        self.fire_cooldown = 0;
        self.projectiles.clear();
        self.obstacles.clear();
        self.hunter = None;
        self.buffs.clear();
        self.particles.clear();
        self.hunter_timer = 0;
        self.events.clear();
    }

    pub fn spawn_obstacle(&mut self, pos: Vec2, size: SizeClass) {
        let id = self.next_entity_id();
        let obstacle = Obstacle::new(id, pos, size, &self.config, &mut self.rng);
        self.obstacles.push(obstacle);
    }

    pub fn spawn_projectile(&mut self, kind: ProjectileKind, pos: Vec2, vel: Vec2) {
        let id = self.next_entity_id();
        // Hunter shots can start outside the field
        let pos = self.wrap(pos);
        self.projectiles.push(Projectile {
            id,
            kind,
            pos,
            vel,
            radius: self.config.projectile_radius,
            lifetime: self.config.projectile_lifetime,
        });
    }

    pub fn spawn_buff(&mut self, pos: Vec2, kind: BuffKind) {
        let id = self.next_entity_id();
        self.buffs.push(Buff {
            id,
            kind,
            pos,
            radius: self.config.buff_radius,
            lifetime: self.config.buff_lifetime,
            pulse: 0.0,
        });
        self.events.push(GameEvent::BuffDropped { kind });
    }

    /// Add a particle, evicting the oldest when at the quality cap
    pub fn emit_particle(&mut self, pos: Vec2, vel: Vec2, tint: ParticleTint, lifetime: u32) {
        let cap = self.config.max_particles();
        if cap == 0 {
            return;
        }
        if self.particles.len() >= cap {
            self.particles.remove(0);
        }
        let size = self.rng.random_range(2..=4) as f32;
        let pos = self.wrap(pos);
        self.particles.push(Particle {
            pos,
            vel,
            tint,
            lifetime,
            max_lifetime: lifetime,
            size,
        });
    }

    /// Omnidirectional burst of `count` particles
    pub fn emit_burst(
        &mut self,
        at: Vec2,
        count: usize,
        speed: (f32, f32),
        tint: ParticleTint,
        lifetime: u32,
    ) {
        for _ in 0..count {
            let vel = random_burst_velocity(&mut self.rng, speed.0, speed.1);
            self.emit_particle(at, vel, tint, lifetime);
        }
    }

    /// Explosion burst plus its event
    pub fn explode(&mut self, at: Vec2, tint: ParticleTint) {
        let config = &self.config;
        let (count, speed, lifetime) =
            (config.explosion_burst, config.explosion_speed, config.burst_lifetime);
        self.emit_burst(at, count, speed, tint, lifetime);
        self.events.push(GameEvent::Explosion { at, tint });
    }

    /// Wrap a point into the world rectangle
    #[inline]
    pub fn wrap(&self, pos: Vec2) -> Vec2 {
        crate::wrap_position(pos, self.config.world_width, self.config.world_height)
    }

    pub fn is_game_over(&self) -> bool {
        self.session.phase() == GamePhase::GameOver
    }
}
