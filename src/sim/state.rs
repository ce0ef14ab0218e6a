//! Session state and core simulation types
//!
//! The `Session` is the only mutable root. Everything the renderer or the
//! feedback layer sees is reached through it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, CollisionKind};
use super::scoring::Scoreboard;
use crate::tuning::{Tuning, TuningError};

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first start
    Idle,
    /// Active gameplay, ticks advance the simulation
    Running,
    /// Suspended mid-run, all state retained
    Paused,
    /// Run finished on a collision
    Ended,
}

/// Feedback for the haptics/audio layer, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started { run: u32 },
    Flapped,
    Scored { score: u32 },
    Paused,
    Resumed,
    Crashed {
        cause: CollisionKind,
        score: u32,
        new_best: bool,
    },
}

/// The player-controlled body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner; x never changes after spawn
    pub pos: Vec2,
    /// Vertical velocity (positive = down)
    pub vel: f32,
    pub size: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, vel: 0.0, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.pos + self.size)
    }

    /// Visual rotation in degrees: nose up while rising, diving when falling
    pub fn tilt_degrees(&self) -> f32 {
        (self.vel * 3.0).clamp(-30.0, 90.0)
    }
}

/// A pair of segments with a gap between them, scrolling left
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Height of the segment hanging from the ceiling
    pub top_height: f32,
    /// Height of the segment rising from the playfield floor
    pub bottom_height: f32,
    /// Set once the body has cleared this obstacle
    pub passed: bool,
}

impl Obstacle {
    #[inline]
    pub fn right(&self, width: f32) -> f32 {
        self.x + width
    }

    /// Upper boundary of the bottom segment
    #[inline]
    pub fn bottom_top(&self, playfield_height: f32) -> f32 {
        playfield_height - self.bottom_height
    }

    pub fn gap(&self, playfield_height: f32) -> f32 {
        playfield_height - self.top_height - self.bottom_height
    }
}

/// One play session: current run plus the best score across runs
///
/// State is read through getters. The event operations and
/// [`tick`](super::tick) are the only ways to change it.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Seed the generator RNG started from
    pub(crate) seed: u64,
    pub(crate) tuning: Tuning,
    pub(crate) phase: GamePhase,
    pub(crate) body: Body,
    /// Active obstacles, oldest (leftmost) first
    pub(crate) obstacles: Vec<Obstacle>,
    pub(crate) scores: Scoreboard,
    /// Ticks simulated in the current run
    pub(crate) time_ticks: u64,
    /// Number of runs started in this session
    pub(crate) runs: u32,
    /// Flap requested since the last tick
    pub(crate) flap_pending: bool,
    /// Ticks left on the flap indicator
    pub(crate) flap_ticks: u32,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
}

impl Session {
    /// Create an idle session with the build-time constants
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create an idle session; the tuning stays fixed for its lifetime
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let body = Body::new(tuning.spawn_position(), tuning.body_size());
        Self {
            seed,
            tuning,
            phase: GamePhase::Idle,
            body,
            obstacles: Vec::new(),
            scores: Scoreboard::default(),
            time_ticks: 0,
            runs: 0,
            flap_pending: false,
            flap_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Active obstacles, oldest first
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }

    /// Ticks simulated in the current run
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Runs started so far, including the current one
    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn score(&self) -> u32 {
        self.scores.score
    }

    pub fn best_score(&self) -> u32 {
        self.scores.best
    }

    pub fn is_flapping(&self) -> bool {
        self.flap_ticks > 0
    }

    /// Take the feedback events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Put the body back at its spawn pose and clear the run
    ///
    /// Best score and RNG stream carry over.
    pub(crate) fn reset_run(&mut self) {
        self.body = Body::new(self.tuning.spawn_position(), self.tuning.body_size());
        self.obstacles.clear();
        self.scores.reset_run();
        self.time_ticks = 0;
        self.flap_pending = false;
        self.flap_ticks = 0;
        self.runs += 1;
    }
}
