//! Flappy Sim headless runner
//!
//! Drives a session in real time with a simple autopilot standing in for the
//! player, logging snapshots as JSON. Usage:
//!
//! ```text
//! flappy-sim [SEED]
//! ```

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use flappy_sim::sim::{GameEvent, GamePhase, Snapshot};
use flappy_sim::{Driver, InputHandle, Session, Tuning};

/// How long the demo runs before shutting down
const RUN_TIME: Duration = Duration::from_secs(20);
/// Log a snapshot every this many frames
const SNAPSHOT_EVERY: u64 = 120;

fn main() {
    env_logger::init();
    log::info!("Flappy Sim (headless) starting...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });
    log::info!("Seed: {}", seed);

    let (driver, input) = Driver::new(Session::new(seed));
    let tuning = driver.session().tuning().clone();

    // Player thread: starts the game, stops the demo after RUN_TIME
    let player = input.clone();
    let timer = std::thread::spawn(move || {
        player.start();
        std::thread::sleep(RUN_TIME);
        player.shutdown();
    });

    let pilot = input;
    let mut frames: u64 = 0;
    let session = driver.run(|snapshot, events| {
        frames += 1;
        for event in events {
            report(event, &pilot);
        }
        if snapshot.phase == GamePhase::Running && should_flap(snapshot, &tuning) {
            pilot.tap();
        }
        if frames % SNAPSHOT_EVERY == 0 {
            match snapshot.to_json() {
                Ok(json) => log::info!("{}", json),
                Err(e) => log::warn!("Snapshot serialization failed: {}", e),
            }
        }
    });

    if timer.join().is_err() {
        log::error!("Player thread panicked");
    }

    println!(
        "Runs: {}  Last score: {}  Best: {}",
        session.runs(),
        session.score(),
        session.best_score()
    );
}

/// Log feedback events and restart after a crash
fn report(event: &GameEvent, pilot: &InputHandle) {
    match event {
        GameEvent::Scored { score } => log::info!("Score: {}", score),
        GameEvent::Crashed {
            cause,
            score,
            new_best,
        } => {
            log::info!(
                "Crashed into {:?} at {}{}",
                cause,
                score,
                if *new_best { " (new best!)" } else { "" }
            );
            pilot.restart();
        }
        _ => {}
    }
}

/// Flap when falling below the middle of the next gap
fn should_flap(snapshot: &Snapshot, tuning: &Tuning) -> bool {
    let target = snapshot
        .obstacles
        .iter()
        .find(|o| o.x + tuning.obstacle_width >= snapshot.body_x)
        .map(|o| {
            let gap = tuning.playfield_height - o.top_height - o.bottom_height;
            o.top_height + gap * 0.6
        })
        .unwrap_or(tuning.playfield_height * 0.5);

    snapshot.body_velocity > 0.0 && snapshot.body_y + tuning.body_height > target
}
