//! Single-consumer event loop
//!
//! Input events may come from any thread, but only the driver thread touches
//! the `Session`. Commands and clock ticks are multiplexed with `select!` so
//! one tick always runs to completion before the next event is looked at.
//!
//! ```text
//!   input threads ──InputHandle──> [command queue] ──┐
//!                                                    ├─ select! ─> Session
//!   frame clock (only while Running) ────────────────┘
//! ```
//!
//! The clock is a `crossbeam_channel::tick` receiver that only exists while
//! the session is running. Pausing or ending a run swaps it for `never()`,
//! and resuming or restarting arms a brand new one, so no tick scheduled
//! under an old state can be delivered into a new one.

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, never, select, unbounded};

use crate::consts::FRAME_RATE;
use crate::sim::{GameEvent, GamePhase, Session, Snapshot, TickOutcome, tick};

/// Discrete events from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Tap,
    PauseToggle,
    Start,
    Restart,
    Continue,
    /// Stop the driver loop and hand the session back
    Shutdown,
}

/// Cloneable sender for input threads
#[derive(Debug, Clone)]
pub struct InputHandle {
    tx: Sender<Command>,
}

impl InputHandle {
    /// Queue a command; false once the driver is gone
    pub fn send(&self, command: Command) -> bool {
        self.tx.send(command).is_ok()
    }

    pub fn tap(&self) -> bool {
        self.send(Command::Tap)
    }

    pub fn pause_toggle(&self) -> bool {
        self.send(Command::PauseToggle)
    }

    pub fn start(&self) -> bool {
        self.send(Command::Start)
    }

    pub fn restart(&self) -> bool {
        self.send(Command::Restart)
    }

    pub fn continue_run(&self) -> bool {
        self.send(Command::Continue)
    }

    pub fn shutdown(&self) -> bool {
        self.send(Command::Shutdown)
    }
}

/// Owns the session and serializes everything that mutates it
pub struct Driver {
    session: Session,
    rx: Receiver<Command>,
    frame_interval: Duration,
    clock: Receiver<Instant>,
    clock_armed: bool,
}

impl Driver {
    /// Wrap a session; returns the driver and the first input handle
    ///
    /// The driver loop ends once every handle has been dropped.
    pub fn new(session: Session) -> (Self, InputHandle) {
        let (tx, rx) = unbounded();
        let mut driver = Self {
            session,
            rx,
            frame_interval: Duration::from_secs_f64(1.0 / FRAME_RATE),
            clock: never(),
            clock_armed: false,
        };
        driver.sync_clock(false);
        (driver, InputHandle { tx })
    }

    /// Set the clock rate in frames per second
    ///
    /// # Panics
    ///
    /// Panics if `fps` is not a positive finite number.
    pub fn with_frame_rate(mut self, fps: f64) -> Self {
        assert!(fps > 0.0 && fps.is_finite(), "Frame rate must be positive, got {}", fps);
        self.frame_interval = Duration::from_secs_f64(1.0 / fps);
        self.sync_clock(true);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// True while a frame clock is scheduled
    pub fn clock_armed(&self) -> bool {
        self.clock_armed
    }

    /// Apply one command; false for `Shutdown`
    pub fn apply(&mut self, command: Command) -> bool {
        let was_running = self.session.phase == GamePhase::Running;
        let resets = matches!(command, Command::Start | Command::Restart | Command::Continue);

        if resets {
            // Drop any pending tick before the session is reset
            self.disarm();
        }

        match command {
            Command::Tap => self.session.on_tap(),
            Command::PauseToggle => self.session.on_pause_toggle(),
            Command::Start => self.session.on_start(),
            Command::Restart => self.session.on_restart(),
            Command::Continue => self.session.on_continue(),
            Command::Shutdown => return false,
        }

        self.sync_clock(resets || !was_running);
        true
    }

    /// Run one simulation step, as the clock does on every frame
    pub fn frame(&mut self) -> TickOutcome {
        let outcome = tick(&mut self.session);
        if matches!(outcome, TickOutcome::Crashed(_)) {
            self.disarm();
        }
        outcome
    }

    /// Apply every queued command without blocking
    ///
    /// Returns false if a `Shutdown` was seen; commands after it stay queued.
    pub fn pump(&mut self) -> bool {
        while let Ok(command) = self.rx.try_recv() {
            if !self.apply(command) {
                return false;
            }
        }
        true
    }

    /// Block on commands and clock ticks until shutdown
    ///
    /// `on_frame` runs after every processed command or tick with a fresh
    /// snapshot and the feedback events produced since the last call.
    pub fn run<F>(mut self, mut on_frame: F) -> Session
    where
        F: FnMut(&Snapshot, &[GameEvent]),
    {
        log::info!(
            "Driver running at {:.1} fps",
            1.0 / self.frame_interval.as_secs_f64()
        );

        loop {
            let rx = self.rx.clone();
            let clock = self.clock.clone();

            select! {
                recv(rx) -> message => match message {
                    Ok(command) => {
                        if !self.apply(command) {
                            log::info!("Shutdown requested");
                            break;
                        }
                    }
                    Err(_) => {
                        log::info!("All input handles dropped");
                        break;
                    }
                },
                recv(clock) -> _ => {
                    self.frame();
                }
            }

            let events = self.session.drain_events();
            on_frame(&self.session.snapshot(), &events);
        }

        self.session
    }

    /// Match the clock to the session phase
    ///
    /// `fresh` forces a new clock even if one is already armed.
    fn sync_clock(&mut self, fresh: bool) {
        if self.session.phase != GamePhase::Running {
            self.disarm();
        } else if fresh || !self.clock_armed {
            self.clock = crossbeam_channel::tick(self.frame_interval);
            self.clock_armed = true;
        }
    }

    fn disarm(&mut self) {
        self.clock = never();
        self.clock_armed = false;
    }
}
