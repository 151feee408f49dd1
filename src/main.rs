//! Bounce entry point
//!
//! Drawing and input belong to an external frontend. Natively this binary
//! runs a headless session instead: clicks come from a seeded RNG, the
//! simulation is ticked at the configured frame rate, and the balls left at
//! the end are printed as JSON.
//!
//! Usage: `bounce [settings.json] [seed]`

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use bounce::Settings;
use bounce::sim::{SimEvent, TickInput, TickStatus, World, tick};

/// Seconds of simulated time per session
const SESSION_SECONDS: u32 = 20;
/// Simulated seconds between clicks
const CLICK_INTERVAL_SECONDS: f32 = 0.5;
/// The reset key is pressed once, this far into the session
const RESET_AT_FRACTION: f32 = 0.5;

#[derive(Debug, Default)]
struct SessionStats {
    spawned: usize,
    culled: usize,
    collisions: usize,
    floor_bounces: usize,
}

impl SessionStats {
    fn absorb(&mut self, events: &[SimEvent]) {
        for event in events {
            match event {
                SimEvent::Spawned { .. } => self.spawned += 1,
                SimEvent::Culled { id } => {
                    log::debug!("Ball {} left the screen", id);
                    self.culled += 1;
                }
                SimEvent::Collided { .. } => self.collisions += 1,
                SimEvent::FloorBounce { .. } => self.floor_bounces += 1,
                SimEvent::Cleared { count } => log::info!("Reset removed {} balls", count),
            }
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Bounce (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(12345);
    log::info!("Session seed: {}", seed);

    let mut rng = Pcg32::seed_from_u64(seed);
    let mut world = World::new(settings);
    let mut stats = SessionStats::default();

    let fps = world.settings.fps.max(1);
    let total_frames = SESSION_SECONDS.saturating_mul(fps);
    let click_every = ((CLICK_INTERVAL_SECONDS * fps as f32) as u32).max(1);
    let reset_frame = (total_frames as f32 * RESET_AT_FRACTION) as u32;

    for frame in 1..=total_frames {
        let mut input = TickInput::default();

        if frame % click_every == 0 {
            let (w, h) = (world.settings.width, world.settings.height);
            input.spawn = Some(Vec2::new(
                rng.random_range(0.0..w.max(1.0)),
                rng.random_range(0.0..h.max(1.0)),
            ));
        }
        input.clear = frame == reset_frame;
        input.quit = frame == total_frames;

        let status = tick(&mut world, &input);
        stats.absorb(&world.drain_events());

        if status == TickStatus::Quit {
            break;
        }
    }

    log::info!(
        "Session over after {} frames: {} spawned, {} culled, {} collisions, {} floor bounces, {} alive",
        world.frame,
        stats.spawned,
        stats.culled,
        stats.collisions,
        stats.floor_bounces,
        world.balls().len()
    );

    match serde_json::to_string_pretty(&world.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize balls: {}", e),
    }
}
