//! Vertical integration of the body
//!
//! Plain Euler: one step per tick, no clamping. Bounds are the collision
//! detector's job.

use super::state::Body;
use crate::tuning::Tuning;

/// Advance the body by one tick
///
/// A pending flap replaces the velocity instead of adding to it, so several
/// taps between two ticks still produce a single flap.
pub fn step(body: &mut Body, flap: bool, tuning: &Tuning) {
    if flap {
        body.vel = tuning.flap_velocity;
    } else {
        body.vel += tuning.gravity;
    }
    body.pos.y += body.vel;
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn body_at(y: f32) -> Body {
        Body::new(Vec2::new(100.0, y), Vec2::new(50.0, 35.0))
    }

    #[test]
    fn test_gravity_accumulates() {
        let tuning = Tuning::default();
        let mut body = body_at(100.0);

        step(&mut body, false, &tuning);
        assert_eq!(body.vel, tuning.gravity);
        assert_eq!(body.pos.y, 100.0 + tuning.gravity);

        step(&mut body, false, &tuning);
        assert_eq!(body.vel, 2.0 * tuning.gravity);
        assert!((body.pos.y - (100.0 + 3.0 * tuning.gravity)).abs() < 1e-4);
    }

    #[test]
    fn test_flap_resets_velocity() {
        let tuning = Tuning::default();
        let mut body = body_at(300.0);
        body.vel = 12.0;

        step(&mut body, true, &tuning);
        assert_eq!(body.vel, tuning.flap_velocity);
        assert_eq!(body.pos.y, 300.0 + tuning.flap_velocity);
    }

    #[test]
    fn test_x_never_moves() {
        let tuning = Tuning::default();
        let mut body = body_at(300.0);
        for i in 0..50 {
            step(&mut body, i % 7 == 0, &tuning);
        }
        assert_eq!(body.pos.x, 100.0);
    }

    #[test]
    fn test_no_clamping() {
        let tuning = Tuning::default();
        let mut body = body_at(-500.0);
        body.vel = -30.0;
        step(&mut body, false, &tuning);
        assert!(body.pos.y < -500.0);
    }

    #[test]
    fn test_gravity_only_run_is_reproducible() {
        let tuning = Tuning {
            playfield_height: 100_000.0,
            ..Tuning::default()
        };
        let run = || {
            let mut body = body_at(tuning.spawn_position().y);
            for _ in 0..100 {
                step(&mut body, false, &tuning);
            }
            body
        };

        let a = run();
        let b = run();
        assert_eq!(a, b);
        assert_eq!(a.vel.to_bits(), b.vel.to_bits());
        assert_eq!(a.pos.y.to_bits(), b.pos.y.to_bits());
        // v = 100g, y = y0 + g * 100 * 101 / 2
        assert!((a.vel - 100.0 * tuning.gravity).abs() < 1e-3);
        let expected_y = tuning.spawn_position().y + tuning.gravity * 5050.0;
        assert!((a.pos.y - expected_y).abs() < 0.05);
    }
}
