//! Flappy Sim - deterministic core of a tap-to-flap side-scroller
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, session state)
//! - `tuning`: Per-session game balance, defaults from `consts`
//! - `driver`: Single-consumer loop serializing input events and clock ticks

pub mod driver;
pub mod sim;
pub mod tuning;

pub use driver::{Command, Driver, InputHandle};
pub use sim::{GameEvent, GamePhase, Session, Snapshot};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// Distances are in logical pixels, velocities in pixels per tick. One tick is
/// one display refresh; nothing is scaled by elapsed time.
pub mod consts {
    /// Display refresh the constants are tuned for
    pub const FRAME_RATE: f64 = 60.0;

    /// Playfield dimensions (portrait phone, logical pixels)
    pub const PLAYFIELD_WIDTH: f32 = 390.0;
    pub const PLAYFIELD_HEIGHT: f32 = 844.0;
    /// Ground strip along the bottom edge
    pub const GROUND_HEIGHT: f32 = 50.0;

    /// Body bounding box
    pub const BODY_WIDTH: f32 = 50.0;
    pub const BODY_HEIGHT: f32 = 35.0;
    /// Spawn pose as a fraction of the playfield
    pub const BODY_X_FRACTION: f32 = 1.0 / 3.0;
    pub const BODY_Y_FRACTION: f32 = 1.0 / 2.5;

    /// Downward acceleration added every tick
    pub const GRAVITY: f32 = 0.4;
    /// Velocity set by a flap (negative = up)
    pub const FLAP_VELOCITY: f32 = -9.0;
    /// Ticks the flap indicator stays lit (~100ms)
    pub const FLAP_INDICATOR_TICKS: u32 = 6;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const OBSTACLE_GAP: f32 = 220.0;
    pub const OBSTACLE_SPEED: f32 = 1.8;
    pub const SPAWN_DISTANCE: f32 = 250.0;
    /// Shortest segment the generator will produce
    pub const MIN_SEGMENT_HEIGHT: f32 = 100.0;

    /// Early-game easing: wider gaps until this many obstacles are cleared
    pub const EASY_OBSTACLE_COUNT: u32 = 3;
    pub const EASY_GAP_BONUS: f32 = 50.0;
}
