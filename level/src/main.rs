use anyhow::Result;
use bevy_math::Vec3;
use clap::Parser;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::path::PathBuf;
use tokio::{
    sync::mpsc::unbounded_channel,
    time::{self, Duration, Instant, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use common::components::Position;
use level::{
    Level, LevelConfig,
    constants::{PLAYER_SPEED, TICK_RATE},
    init_tracing,
};

const STUCK_DISTANCE: f32 = 1e-3;

// ============================================================================
// CLI Argument Parsing
// ============================================================================

#[derive(Parser)]
#[command(author, version, about = "Maze level runner", long_about = None)]
struct Args {
    /// Level configuration file (JSON); the built-in maze is used when omitted
    #[arg(short, long)]
    level: Option<PathBuf>,

    /// Maximum number of frames to run
    #[arg(short, long, default_value_t = 36_000)]
    ticks: u64,

    /// Seed for ghost and autopilot randomness
    #[arg(long)]
    seed: Option<u64>,

    /// Disable ghost spawning
    #[arg(long, default_value_t = false)]
    no_ghosts: bool,

    /// Pace frames at the level tick rate instead of running flat out
    #[arg(long, default_value_t = false)]
    realtime: bool,
}

// ============================================================================
// Autopilot
// ============================================================================

// Scripted stand-in for the player controller: walks a cardinal direction and picks a
// new one when stuck or after a while.
struct Autopilot {
    rng: StdRng,
    direction: Vec3,
    ticks_left: u32,
    last_pos: Position,
}

impl Autopilot {
    fn new(seed: Option<u64>) -> Self {
        Self {
            rng: seed.map_or_else(StdRng::from_os_rng, |s| StdRng::seed_from_u64(s.wrapping_add(1))),
            direction: Vec3::ZERO,
            ticks_left: 0,
            last_pos: Position::default(),
        }
    }

    fn steer(&mut self, player_pos: Position) -> Vec3 {
        let stuck = player_pos.ground_distance(&self.last_pos) < STUCK_DISTANCE;
        if stuck || self.ticks_left == 0 {
            self.direction = match self.rng.random_range(0..4) {
                0 => Vec3::X,
                1 => Vec3::NEG_X,
                2 => Vec3::Z,
                _ => Vec3::NEG_Z,
            };
            self.ticks_left = self.rng.random_range(30..180);
        }

        self.ticks_left -= 1;
        self.last_pos = player_pos;
        self.direction * PLAYER_SPEED
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    let mut config = match &args.level {
        Some(path) => LevelConfig::load(path)?,
        None => LevelConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.no_ghosts {
        config.num_ghosts = 0;
    }

    // Channel standing in for the level-transition orchestrator
    let (to_orchestrator, mut from_level) = unbounded_channel();

    let mut level = Level::new(&config, to_orchestrator);
    let mut autopilot = Autopilot::new(config.seed);

    info!("starting level loop...");

    let tick_duration = Duration::from_nanos(1_000_000_000 / TICK_RATE);
    let mut interval = time::interval(tick_duration);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut handoff = None;
    for frame in 0..args.ticks {
        if args.realtime {
            interval.tick().await;
        }

        let velocity = autopilot.steer(level.player_position());
        level.set_player_intent(velocity);

        let update_start = Instant::now();
        level.tick(tick_duration);
        let update_elapsed = update_start.elapsed();

        if update_elapsed > tick_duration {
            warn!(
                "tick {} took {:.2}ms (exceeded {:.2}ms budget)",
                frame,
                update_elapsed.as_secs_f64() * 1000.0,
                tick_duration.as_secs_f64() * 1000.0
            );
        }

        if frame % TICK_RATE == 0 {
            for view in level.ghost_views() {
                debug!(
                    ghost_id = view.id.0,
                    x = view.position.x,
                    z = view.position.z,
                    facing = view.facing,
                    state = level.ghost_state(view.id).map_or("gone", |s| s.name()),
                    "ghost"
                );
            }
        }

        if let Ok(received) = from_level.try_recv() {
            handoff = Some(received);
            break;
        }
    }

    match handoff {
        Some(handoff) => info!(
            outcome = ?handoff.outcome,
            level_id = %handoff.level_id,
            door_id = %handoff.door_id,
            "level finished"
        ),
        None => info!("no outcome after {} ticks", args.ticks),
    }
    info!(
        score = level.score(),
        pellets_remaining = level.pellets_remaining(),
        elapsed = ?level.now(),
        "final tally"
    );

    level.unload();
    Ok(())
}
