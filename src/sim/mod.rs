//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no elapsed-time scaling
//! - Seeded RNG only, and only for obstacle gaps
//! - Obstacles kept oldest first
//! - No rendering, input or platform dependencies

pub mod collision;
pub mod physics;
pub mod scoring;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, CollisionKind, CollisionReport};
pub use scoring::Scoreboard;
pub use snapshot::{ObstacleView, Snapshot};
pub use spawn::maybe_spawn;
pub use state::{Body, GameEvent, GamePhase, Obstacle, Session};
pub use tick::{TickOutcome, tick};
