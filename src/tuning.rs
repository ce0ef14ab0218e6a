//! Game balance values
//!
//! A `Tuning` is fixed for the lifetime of a session. Values come from the
//! build-time constants in [`crate::consts`]; library callers may override
//! fields with struct update syntax, and the session validates the result.

use glam::Vec2;
use thiserror::Error;

use crate::consts::*;

/// A tuning the simulation cannot run with
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuningError {
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("widest gap ({gap}) plus two minimum segments does not fit a playfield of height {height}")]
    GapTooTall { gap: f32, height: f32 },
    #[error("body ({size}) does not fit above the ground in a {width}x{height} playfield")]
    BodyTooLarge { size: Vec2, width: f32, height: f32 },
}

/// Simulation constants for one session
#[derive(Debug, Clone, PartialEq)]
pub struct Tuning {
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub ground_height: f32,
    pub body_width: f32,
    pub body_height: f32,
    pub gravity: f32,
    pub flap_velocity: f32,
    pub flap_indicator_ticks: u32,
    pub obstacle_width: f32,
    pub obstacle_gap: f32,
    pub obstacle_speed: f32,
    pub spawn_distance: f32,
    pub min_segment_height: f32,
    pub easy_obstacle_count: u32,
    pub easy_gap_bonus: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            ground_height: GROUND_HEIGHT,
            body_width: BODY_WIDTH,
            body_height: BODY_HEIGHT,
            gravity: GRAVITY,
            flap_velocity: FLAP_VELOCITY,
            flap_indicator_ticks: FLAP_INDICATOR_TICKS,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_gap: OBSTACLE_GAP,
            obstacle_speed: OBSTACLE_SPEED,
            spawn_distance: SPAWN_DISTANCE,
            min_segment_height: MIN_SEGMENT_HEIGHT,
            easy_obstacle_count: EASY_OBSTACLE_COUNT,
            easy_gap_bonus: EASY_GAP_BONUS,
        }
    }
}

impl Tuning {
    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let all = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("ground_height", self.ground_height),
            ("body_width", self.body_width),
            ("body_height", self.body_height),
            ("gravity", self.gravity),
            ("flap_velocity", self.flap_velocity),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_gap", self.obstacle_gap),
            ("obstacle_speed", self.obstacle_speed),
            ("spawn_distance", self.spawn_distance),
            ("min_segment_height", self.min_segment_height),
            ("easy_gap_bonus", self.easy_gap_bonus),
        ];
        for (field, value) in all {
            if !value.is_finite() {
                return Err(TuningError::NotFinite { field, value });
            }
        }

        let positive = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("body_width", self.body_width),
            ("body_height", self.body_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_speed", self.obstacle_speed),
            ("spawn_distance", self.spawn_distance),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        let non_negative = [
            ("ground_height", self.ground_height),
            ("gravity", self.gravity),
            ("obstacle_gap", self.obstacle_gap),
            ("min_segment_height", self.min_segment_height),
            ("easy_gap_bonus", self.easy_gap_bonus),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(TuningError::Negative { field, value });
            }
        }

        let widest = self.obstacle_gap + self.easy_gap_bonus;
        if widest + 2.0 * self.min_segment_height > self.playfield_height {
            return Err(TuningError::GapTooTall {
                gap: widest,
                height: self.playfield_height,
            });
        }

        let spawn = self.spawn_position();
        if spawn.y + self.body_height > self.ground_y()
            || spawn.x + self.body_width > self.playfield_width
        {
            return Err(TuningError::BodyTooLarge {
                size: self.body_size(),
                width: self.playfield_width,
                height: self.playfield_height,
            });
        }

        Ok(())
    }

    /// Top edge of the ground strip
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.playfield_height - self.ground_height
    }

    #[inline]
    pub fn body_size(&self) -> Vec2 {
        Vec2::new(self.body_width, self.body_height)
    }

    /// Top-left corner of the body at the start of a run
    pub fn spawn_position(&self) -> Vec2 {
        Vec2::new(
            self.playfield_width * BODY_X_FRACTION,
            self.playfield_height * BODY_Y_FRACTION,
        )
    }

    /// Gap height for the next obstacle given the current score
    pub fn gap_for_score(&self, score: u32) -> f32 {
        if score < self.easy_obstacle_count {
            self.obstacle_gap + self.easy_gap_bonus
        } else {
            self.obstacle_gap
        }
    }

    /// Realised distance between consecutive obstacles
    ///
    /// A new obstacle appears on the first tick the previous one is strictly
    /// more than `spawn_distance` from the right edge, so the spacing rounds up
    /// to the next whole number of scroll steps.
    pub fn obstacle_pitch(&self) -> f32 {
        let steps = (self.spawn_distance / self.obstacle_speed).floor() + 1.0;
        steps * self.obstacle_speed
    }
}
