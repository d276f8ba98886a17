//! Read-only render view of the world after a tick

use glam::Vec2;
use serde::Serialize;

use super::state::{BuffKind, GameState, ParticleTint, ProjectileKind, SizeClass};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipView {
    pub pos: Vec2,
    pub angle: f32,
    pub radius: f32,
    pub thrusting: bool,
    pub shielded: bool,
    /// Renderer flickers the ship while set
    pub invulnerable: bool,
    pub rapid_fire: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub radius: f32,
    pub kind: ProjectileKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleView {
    pub pos: Vec2,
    pub size: SizeClass,
    pub rotation: f32,
    /// Silhouette in world space
    pub outline: Vec<Vec2>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HunterView {
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuffView {
    pub pos: Vec2,
    pub kind: BuffKind,
    pub radius: f32,
    pub pulse: f32,
    /// Ticks before the buff despawns uncollected
    pub lifetime: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub tint: ParticleTint,
    pub size: f32,
    /// 1.0 when spawned, 0.0 at expiry
    pub fade: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderState {
    pub tick: u64,
    /// Seed that reproduces this run
    pub seed: u64,
    pub score: u64,
    pub lives: u32,
    pub wave: u32,
    pub game_over: bool,
    pub ship: ShipView,
    pub projectiles: Vec<ProjectileView>,
    pub obstacles: Vec<ObstacleView>,
    pub hunter: Option<HunterView>,
    pub buffs: Vec<BuffView>,
    pub particles: Vec<ParticleView>,
}

impl RenderState {
    pub fn capture(state: &GameState) -> Self {
        let ship = &state.ship;
        Self {
            tick: state.time_ticks,
            seed: state.seed,
            score: state.session.score(),
            lives: state.session.lives(),
            wave: state.session.wave(),
            game_over: state.is_game_over(),
            ship: ShipView {
                pos: ship.pos,
                angle: ship.angle,
                radius: ship.radius,
                thrusting: ship.thrusting,
                shielded: ship.shield.is_active(),
                invulnerable: ship.invulnerable.is_active(),
                rapid_fire: ship.rapid_fire.is_active(),
            },
            projectiles: state
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    pos: p.pos,
                    radius: p.radius,
                    kind: p.kind,
                })
                .collect(),
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    pos: o.pos,
                    size: o.size,
                    rotation: o.rotation,
                    outline: o.world_outline(),
                })
                .collect(),
            hunter: state.hunter.as_ref().map(|h| HunterView {
                pos: h.pos,
                radius: h.radius,
            }),
            buffs: state
                .buffs
                .iter()
                .map(|b| BuffView {
                    pos: b.pos,
                    kind: b.kind,
                    radius: b.radius,
                    pulse: b.pulse,
                    lifetime: b.lifetime,
                })
                .collect(),
            particles: state
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    tint: p.tint,
                    size: p.size,
                    fade: p.fade(),
                })
                .collect(),
        }
    }
}
