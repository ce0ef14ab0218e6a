//! Read-only view of a session for the renderer
//!
//! Built once per rendered frame. Serializable so an out-of-process renderer
//! can consume it as JSON.

use serde::{Deserialize, Serialize};

use super::state::{GamePhase, Session};

/// Render-facing view of one obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub x: f32,
    pub top_height: f32,
    pub bottom_height: f32,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub body_x: f32,
    pub body_y: f32,
    pub body_velocity: f32,
    /// Rotation in degrees derived from velocity
    pub tilt_degrees: f32,
    pub obstacles: Vec<ObstacleView>,
    pub score: u32,
    pub best_score: u32,
    pub is_flapping: bool,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Session {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            body_x: self.body.pos.x,
            body_y: self.body.pos.y,
            body_velocity: self.body.vel,
            tilt_degrees: self.body.tilt_degrees(),
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    x: o.x,
                    top_height: o.top_height,
                    bottom_height: o.bottom_height,
                })
                .collect(),
            score: self.scores.score,
            best_score: self.scores.best,
            is_flapping: self.is_flapping(),
        }
    }
}
