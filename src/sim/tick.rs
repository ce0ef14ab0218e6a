//! Fixed step simulation tick and session state machine
//!
//! Every mutation goes through here and is guarded by the current phase.
//! A tick that arrives while the session is not running is dropped without
//! touching any state, so late ticks after a pause or a crash are harmless.

use super::collision::{self, CollisionKind};
use super::physics;
use super::spawn;
use super::state::{GameEvent, GamePhase, Session};

/// What a single call to [`tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session was not running; nothing changed
    Skipped,
    /// Simulation advanced one step
    Advanced,
    /// Simulation advanced and the run ended
    Crashed(CollisionKind),
}

/// Advance the session by one fixed step
pub fn tick(session: &mut Session) -> TickOutcome {
    if session.phase != GamePhase::Running {
        return TickOutcome::Skipped;
    }

    session.time_ticks += 1;

    // Integrate
    let flap = std::mem::take(&mut session.flap_pending);
    session.flap_ticks = session.flap_ticks.saturating_sub(1);
    physics::step(&mut session.body, flap, &session.tuning);

    // Spawn, scroll, prune
    if let Some(obstacle) = spawn::maybe_spawn(
        &session.obstacles,
        &session.tuning,
        session.scores.score,
        &mut session.rng,
    ) {
        session.obstacles.push(obstacle);
    }
    let speed = session.tuning.obstacle_speed;
    let width = session.tuning.obstacle_width;
    for obstacle in &mut session.obstacles {
        obstacle.x -= speed;
    }
    session.obstacles.retain(|o| o.right(width) >= 0.0);

    // Collide and score
    let report = collision::check(&session.body, &mut session.obstacles, &session.tuning);
    for _ in &report.passed {
        let score = session.scores.record_passes(1);
        log::debug!("Passed obstacle, score {}", score);
        session.events.push(GameEvent::Scored { score });
    }

    log::trace!(
        "tick {}: y={:.2} vel={:.2} obstacles={}",
        session.time_ticks,
        session.body.pos.y,
        session.body.vel,
        session.obstacles.len()
    );

    match report.collision {
        Some(cause) => {
            session.end_run(cause);
            TickOutcome::Crashed(cause)
        }
        None => TickOutcome::Advanced,
    }
}

impl Session {
    /// Tap: starts from Idle, queues a flap while Running
    pub fn on_tap(&mut self) {
        match self.phase {
            GamePhase::Idle => self.on_start(),
            GamePhase::Running => {
                // Taps between two ticks coalesce into one flap
                if !self.flap_pending {
                    self.flap_pending = true;
                    self.flap_ticks = self.tuning.flap_indicator_ticks;
                    self.events.push(GameEvent::Flapped);
                }
            }
            GamePhase::Paused | GamePhase::Ended => {}
        }
    }

    /// Pause button: Running <-> Paused, ignored otherwise
    pub fn on_pause_toggle(&mut self) {
        match self.phase {
            GamePhase::Running => {
                self.phase = GamePhase::Paused;
                self.events.push(GameEvent::Paused);
                log::info!("Paused at tick {} (score {})", self.time_ticks, self.score());
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Running;
                self.events.push(GameEvent::Resumed);
                log::info!("Resumed at tick {}", self.time_ticks);
            }
            GamePhase::Idle | GamePhase::Ended => {}
        }
    }

    /// Start a fresh run from any phase
    ///
    /// Starting while a run is in progress behaves exactly like a restart.
    pub fn on_start(&mut self) {
        self.reset_run();
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Started { run: self.runs });
        log::info!("Run {} started (best {})", self.runs, self.best_score());
    }

    /// Restart button on the game-over screen
    pub fn on_restart(&mut self) {
        self.on_start();
    }

    /// "Keep playing" button on the game-over screen; same reset as restart
    pub fn on_continue(&mut self) {
        self.on_start();
    }

    /// Running -> Ended; folds the score into the best
    pub(crate) fn end_run(&mut self, cause: CollisionKind) {
        self.phase = GamePhase::Ended;
        self.flap_pending = false;
        let new_best = self.scores.finish_run();
        self.events.push(GameEvent::Crashed {
            cause,
            score: self.scores.score,
            new_best,
        });
        log::info!(
            "Run {} ended after {} ticks: {:?}, score {} (best {})",
            self.runs,
            self.time_ticks,
            cause,
            self.scores.score,
            self.scores.best
        );
    }
}
