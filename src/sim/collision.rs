//! Collision detection for axis-aligned boxes
//!
//! The body, the obstacle segments and the playfield bounds are all
//! rectangles, so every check reduces to interval comparisons. Screen
//! coordinates: y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Body, Obstacle};
use crate::tuning::Tuning;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Strict overlap: boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// What the body ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    /// Bottom edge sank below the top of the ground strip
    Ground,
    /// Top edge rose above the playfield
    Ceiling,
    /// Hit a segment of the obstacle at this index
    Obstacle { index: usize },
}

/// Outcome of one collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Indices of obstacles cleared for the first time this tick
    pub passed: Vec<usize>,
    /// First collision found, if any
    pub collision: Option<CollisionKind>,
}

impl CollisionReport {
    pub fn collided(&self) -> bool {
        self.collision.is_some()
    }
}

/// Check the body against the playfield bounds
pub fn bounds_collision(body: &Body, tuning: &Tuning) -> Option<CollisionKind> {
    if body.bottom() > tuning.ground_y() {
        Some(CollisionKind::Ground)
    } else if body.top() < 0.0 {
        Some(CollisionKind::Ceiling)
    } else {
        None
    }
}

/// Check the body against both segments of one obstacle
///
/// The body collides when it overlaps the obstacle's columns horizontally
/// while sticking out of the gap band vertically.
pub fn obstacle_collision(body: &Body, obstacle: &Obstacle, tuning: &Tuning) -> bool {
    let width = tuning.obstacle_width;
    let height = tuning.playfield_height;
    let body_box = body.bounds();

    let top_segment = Aabb::new(
        Vec2::new(obstacle.x, f32::NEG_INFINITY),
        Vec2::new(obstacle.right(width), obstacle.top_height),
    );
    let bottom_segment = Aabb::new(
        Vec2::new(obstacle.x, obstacle.bottom_top(height)),
        Vec2::new(obstacle.right(width), f32::INFINITY),
    );

    body_box.overlaps(&top_segment) || body_box.overlaps(&bottom_segment)
}

/// Run pass detection and collision checks for one tick
///
/// Bounds are checked first. Obstacles are then scanned oldest first; each
/// one is tested for a first-time pass before it is tested for a hit, and
/// the first hit stops the scan. Newly passed obstacles get their `passed`
/// flag set so they are never reported twice.
pub fn check(body: &Body, obstacles: &mut [Obstacle], tuning: &Tuning) -> CollisionReport {
    let mut report = CollisionReport::default();

    if let Some(kind) = bounds_collision(body, tuning) {
        report.collision = Some(kind);
        return report;
    }

    for (index, obstacle) in obstacles.iter_mut().enumerate() {
        if !obstacle.passed && obstacle.right(tuning.obstacle_width) < body.left() {
            obstacle.passed = true;
            report.passed.push(index);
        }

        if obstacle_collision(body, obstacle, tuning) {
            report.collision = Some(CollisionKind::Obstacle { index });
            break;
        }
    }

    report
}
