//! Simulation configuration
//!
//! A single flat options record handed to the simulation at construction.
//! Every field has a default matching the classic tuning, so a JSON file only
//! needs to name the values it overrides.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Particle budget presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub const ALL: [QualityPreset; 3] = [Self::Low, Self::Medium, Self::High];

    /// Lowercase name used on the command line and in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Case-insensitive lookup by [`QualityPreset::as_str`] name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.as_str().eq_ignore_ascii_case(name))
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

/// Flat options record. All durations are in ticks at `tick_rate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    /// Cadence the host promises to call `advance_tick` at
    pub tick_rate: u32,
    pub starting_lives: u32,

    // === Ship ===
    pub ship_radius: f32,
    pub ship_rotation_step_deg: f32,
    pub ship_thrust: f32,
    pub ship_max_speed: f32,
    pub ship_friction: f32,
    pub invulnerable_ticks: u32,

    // === Gun ===
    pub fire_delay: u32,
    pub rapid_fire_delay: u32,
    pub projectile_speed: f32,
    pub projectile_radius: f32,
    pub projectile_lifetime: u32,

    // === Hyperspace ===
    pub teleport_cooldown: u32,
    /// Inset from every edge the destination is drawn within
    pub teleport_margin: f32,
    pub teleport_burst: usize,

    // === Waves ===
    pub obstacle_base_count: u32,
    pub safe_zone_radius: f32,
    pub obstacle_min_axis_speed: f32,
    pub obstacle_max_axis_speed: f32,

    // === Hunter ===
    pub hunter_spawn_interval: u32,
    pub hunter_radius: f32,
    pub hunter_shoot_delay: u32,
    pub hunter_projectile_speed: f32,
    /// Max aim error either side of the true bearing (radians)
    pub hunter_aim_jitter: f32,
    pub hunter_despawn_margin: f32,
    pub hunter_kill_bonus: u64,

    // === Buffs ===
    pub buff_drop_chance: f64,
    pub buff_radius: f32,
    pub buff_lifetime: u32,
    pub buff_duration: u32,

    // === Effects ===
    pub explosion_burst: usize,
    /// Speed range of explosion particles
    pub explosion_speed: (f32, f32),
    /// Speed range of hyperspace burst particles
    pub teleport_burst_speed: (f32, f32),
    /// Lifetime of explosion and hyperspace particles
    pub burst_lifetime: u32,
    /// Exhaust speed relative to the ship, opposite the heading
    pub trail_kick: f32,
    pub trail_lifetime: u32,
    /// Particle velocity multiplier per tick
    pub particle_damping: f32,
    pub quality: QualityPreset,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            tick_rate: TICK_RATE,
            starting_lives: STARTING_LIVES,

            ship_radius: SHIP_RADIUS,
            ship_rotation_step_deg: SHIP_ROTATION_STEP_DEG,
            ship_thrust: SHIP_THRUST,
            ship_max_speed: SHIP_MAX_SPEED,
            ship_friction: SHIP_FRICTION,
            invulnerable_ticks: INVULNERABLE_TICKS,

            fire_delay: FIRE_DELAY,
            rapid_fire_delay: RAPID_FIRE_DELAY,
            projectile_speed: PROJECTILE_SPEED,
            projectile_radius: PROJECTILE_RADIUS,
            projectile_lifetime: PROJECTILE_LIFETIME,

            teleport_cooldown: TELEPORT_COOLDOWN,
            teleport_margin: TELEPORT_MARGIN,
            teleport_burst: TELEPORT_BURST,

            obstacle_base_count: OBSTACLE_BASE_COUNT,
            safe_zone_radius: SAFE_ZONE_RADIUS,
            obstacle_min_axis_speed: OBSTACLE_MIN_AXIS_SPEED,
            obstacle_max_axis_speed: OBSTACLE_MAX_AXIS_SPEED,

            hunter_spawn_interval: HUNTER_SPAWN_INTERVAL,
            hunter_radius: HUNTER_RADIUS,
            hunter_shoot_delay: HUNTER_SHOOT_DELAY,
            hunter_projectile_speed: HUNTER_PROJECTILE_SPEED,
            hunter_aim_jitter: HUNTER_AIM_JITTER,
            hunter_despawn_margin: HUNTER_DESPAWN_MARGIN,
            hunter_kill_bonus: HUNTER_KILL_BONUS,

            buff_drop_chance: BUFF_DROP_CHANCE,
            buff_radius: BUFF_RADIUS,
            buff_lifetime: BUFF_LIFETIME,
            buff_duration: BUFF_DURATION,

            explosion_burst: EXPLOSION_BURST,
            explosion_speed: EXPLOSION_SPEED,
            teleport_burst_speed: TELEPORT_BURST_SPEED,
            burst_lifetime: BURST_LIFETIME,
            trail_kick: TRAIL_KICK,
            trail_lifetime: TRAIL_LIFETIME,
            particle_damping: PARTICLE_DAMPING,
            quality: QualityPreset::Medium,
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// World center, where ships spawn
    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.world_width / 2.0, self.world_height / 2.0)
    }

    /// Per-tick rotation in radians
    pub fn rotation_step(&self) -> f32 {
        self.ship_rotation_step_deg.to_radians()
    }

    /// Live particle cap
    pub fn max_particles(&self) -> usize {
        self.quality.max_particles()
    }

    /// Check every value is in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (w, h) = (self.world_width, self.world_height);
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(ConfigError::InvalidDimension {
                width: w,
                height: h,
            });
        }

        fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
            ConfigError::InvalidValue { field, reason }
        }

        if self.tick_rate == 0 {
            return Err(invalid("tick_rate", "must be positive"));
        }
        if self.starting_lives == 0 {
            return Err(invalid("starting_lives", "must be positive"));
        }
        if !(self.ship_friction > 0.0 && self.ship_friction <= 1.0) {
            return Err(invalid("ship_friction", "must be in (0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.buff_drop_chance) {
            return Err(invalid("buff_drop_chance", "must be in [0, 1]"));
        }

        let radii = [
            ("ship_radius", self.ship_radius),
            ("projectile_radius", self.projectile_radius),
            ("hunter_radius", self.hunter_radius),
            ("buff_radius", self.buff_radius),
        ];
        for (field, r) in radii {
            if !(r > 0.0) {
                return Err(invalid(field, "radius must be positive"));
            }
        }

        let periods = [
            ("fire_delay", self.fire_delay),
            ("rapid_fire_delay", self.rapid_fire_delay),
            ("projectile_lifetime", self.projectile_lifetime),
            ("hunter_spawn_interval", self.hunter_spawn_interval),
            ("hunter_shoot_delay", self.hunter_shoot_delay),
            ("buff_lifetime", self.buff_lifetime),
            ("buff_duration", self.buff_duration),
            ("burst_lifetime", self.burst_lifetime),
            ("trail_lifetime", self.trail_lifetime),
        ];
        for (field, ticks) in periods {
            if ticks == 0 {
                return Err(invalid(field, "must be at least one tick"));
            }
        }

        if !(self.obstacle_min_axis_speed >= 0.0
            && self.obstacle_max_axis_speed > self.obstacle_min_axis_speed)
        {
            return Err(invalid(
                "obstacle_max_axis_speed",
                "must exceed obstacle_min_axis_speed",
            ));
        }
        let speed_ranges = [
            ("explosion_speed", self.explosion_speed),
            ("teleport_burst_speed", self.teleport_burst_speed),
        ];
        for (field, (min, max)) in speed_ranges {
            if !(min >= 0.0 && max > min && max.is_finite()) {
                return Err(invalid(field, "needs 0 <= min < max"));
            }
        }
        if !(self.particle_damping > 0.0 && self.particle_damping <= 1.0) {
            return Err(invalid("particle_damping", "must be in (0, 1]"));
        }
        if !(self.trail_kick >= 0.0 && self.trail_kick.is_finite()) {
            return Err(invalid("trail_kick", "must be a non-negative speed"));
        }
        if !(self.ship_max_speed > 0.0) {
            return Err(invalid("ship_max_speed", "must be positive"));
        }
        if !(self.hunter_aim_jitter >= 0.0 && self.hunter_aim_jitter.is_finite()) {
            return Err(invalid("hunter_aim_jitter", "must be a non-negative angle"));
        }
        if self.teleport_margin < 0.0 || self.teleport_margin * 2.0 >= w.min(h) {
            return Err(invalid("teleport_margin", "leaves no room to land"));
        }
        // Corners must stay outside the safe zone or waves can never spawn
        let half_diag = self.center().length();
        if self.safe_zone_radius < 0.0 || self.safe_zone_radius >= half_diag {
            return Err(invalid("safe_zone_radius", "covers the whole world"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SimConfig::from_json(r#"{ "world_width": 800, "quality": "High" }"#)
            .expect("valid config");
        assert_eq!(config.world_width, 800.0);
        assert_eq!(config.world_height, WORLD_HEIGHT);
        assert_eq!(config.quality, QualityPreset::High);
        assert_eq!(config.teleport_cooldown, 180);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = SimConfig::from_json("{ world_width: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let config = SimConfig {
            world_width: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let config = SimConfig {
            ship_friction: 1.5,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "ship_friction",
                reason: "must be in (0, 1]",
            })
        );

        let config = SimConfig {
            safe_zone_radius: 5000.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SimConfig {
            projectile_lifetime: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_effect_tuning_defaults_and_checks() {
        let config = SimConfig::default();
        assert_eq!(config.explosion_speed, (2.0, 8.0));
        assert_eq!(config.teleport_burst_speed, (1.0, 5.0));
        assert_eq!(config.burst_lifetime, 40);
        assert_eq!(config.trail_lifetime, 20);
        assert_eq!(config.trail_kick, 3.0);
        assert_eq!(config.particle_damping, 0.98);

        let config = SimConfig::from_json(r#"{ "explosion_speed": [1.0, 3.0], "particle_damping": 0.9 }"#)
            .expect("valid config");
        assert_eq!(config.explosion_speed, (1.0, 3.0));
        assert_eq!(config.particle_damping, 0.9);

        let inverted = SimConfig {
            teleport_burst_speed: (5.0, 1.0),
            ..Default::default()
        };
        assert_eq!(
            inverted.validate(),
            Err(ConfigError::InvalidValue {
                field: "teleport_burst_speed",
                reason: "needs 0 <= min < max",
            })
        );

        let undamped = SimConfig {
            particle_damping: 1.5,
            ..Default::default()
        };
        assert!(undamped.validate().is_err());

        let no_trail = SimConfig {
            trail_lifetime: 0,
            ..Default::default()
        };
        assert!(no_trail.validate().is_err());
    }

    #[test]
    fn test_quality_preset_names() {
        assert_eq!(QualityPreset::from_name("Medium"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_name("LOW"), Some(QualityPreset::Low));
        assert_eq!(QualityPreset::from_name("ultra"), None);
        for preset in QualityPreset::ALL {
            assert_eq!(QualityPreset::from_name(preset.as_str()), Some(preset));
        }
        assert!(QualityPreset::Low.max_particles() < QualityPreset::High.max_particles());
    }
}
