//! Asteroid Deluxe headless runner
//!
//! Plays an attract-mode session for a number of ticks and prints the final
//! render snapshot as JSON. Useful for soak runs and tuning configs.
//!
//! Usage: `asteroid-deluxe [TICKS] [CONFIG.json|-] [SEED] [QUALITY]`
//!
//! `-` for the config keeps the defaults; QUALITY is low, medium or high.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    if let Err(e) = native::run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive `Simulation` directly
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use asteroid_deluxe::{QualityPreset, SimConfig};
    use asteroid_deluxe::sim::{GameEvent, GameState, Simulation, TickInput};
    use glam::Vec2;

    const DEFAULT_TICKS: u64 = 60 * 60;

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let mut args = std::env::args().skip(1);

        let ticks = match args.next() {
            Some(arg) => arg.parse::<u64>()?,
            None => DEFAULT_TICKS,
        };
        let mut config = match args.next() {
            Some(path) if path != "-" => {
                let text = std::fs::read_to_string(&path)?;
                log::info!("Loaded config from {path}");
                SimConfig::from_json(&text)?
            }
            _ => SimConfig::default(),
        };
        let seed = args.next().map(|s| s.parse::<u64>()).transpose()?;
        if let Some(name) = args.next() {
            config.quality = QualityPreset::from_name(&name)
                .ok_or_else(|| format!("unknown quality preset {name:?}"))?;
        }
        let mut sim = match seed {
            Some(seed) => Simulation::with_seed(config, seed)?,
            None => Simulation::new(config)?,
        };

        log::info!("Asteroid Deluxe (headless) running {ticks} ticks");

        for n in 0..ticks {
            let input = autopilot(sim.state(), n);
            let events = sim.advance_tick(&input);
            for event in events.iter() {
                match event {
                    GameEvent::WaveCleared { wave } => log::info!("Tick {n}: wave {wave}"),
                    GameEvent::ShipDestroyed => {
                        log::info!("Tick {n}: ship lost, {} left", sim.state().session.lives())
                    }
                    GameEvent::HunterSpawned => log::debug!("Tick {n}: hunter inbound"),
                    _ => {}
                }
            }
            if sim.is_game_over() {
                log::info!("Game over after {} ticks", n + 1);
                break;
            }
        }

        let snapshot = sim.snapshot();
        log::info!(
            "Final score {} (wave {}, {} lives, seed {})",
            snapshot.score,
            snapshot.wave,
            snapshot.lives,
            snapshot.seed
        );
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        Ok(())
    }

    /// Turn toward the nearest obstacle and shoot; jump away when crowded
    fn autopilot(state: &GameState, n: u64) -> TickInput {
        let ship = &state.ship;
        let Some(target) = state
            .obstacles
            .iter()
            .min_by(|a, b| {
                a.pos
                    .distance_squared(ship.pos)
                    .total_cmp(&b.pos.distance_squared(ship.pos))
            })
        else {
            return TickInput::default();
        };

        let to_target = target.pos - ship.pos;
        // Headings are measured clockwise from straight up
        let wanted = Vec2::new(to_target.x, -to_target.y);
        let wanted = wanted.x.atan2(wanted.y);
        let delta = asteroid_deluxe::normalize_angle(wanted - ship.angle);
        let step = state.config.rotation_step();

        let crowded = to_target.length() < target.radius + ship.radius * 3.0;
        TickInput {
            rotate_left: delta < -step * 0.5,
            rotate_right: delta > step * 0.5,
            thrust: n % 90 < 20 && !crowded,
            fire: delta.abs() < step * 2.0,
            teleport: crowded && !ship.is_protected(),
        }
    }
}
