//! Obstacle generation
//!
//! Only the gap position is random. Spacing is fully determined by the
//! spawn distance and scroll speed, so two seeds produce obstacles at the
//! same x positions with different gap heights.

use rand::Rng;

use super::state::Obstacle;
use crate::tuning::Tuning;

/// True when the generator should add an obstacle this tick
pub fn should_spawn(obstacles: &[Obstacle], tuning: &Tuning) -> bool {
    match obstacles.last() {
        None => true,
        Some(last) => last.x < tuning.playfield_width - tuning.spawn_distance,
    }
}

/// Produce a new obstacle at the right edge if spacing allows
///
/// Does not touch `obstacles`; the caller appends the result.
pub fn maybe_spawn<R: Rng>(
    obstacles: &[Obstacle],
    tuning: &Tuning,
    score: u32,
    rng: &mut R,
) -> Option<Obstacle> {
    if !should_spawn(obstacles, tuning) {
        return None;
    }

    let gap = tuning.gap_for_score(score);
    let obstacle = generate_obstacle(tuning, gap, rng);
    log::debug!(
        "Spawned obstacle: top={:.1} gap={:.1} bottom={:.1}",
        obstacle.top_height,
        gap,
        obstacle.bottom_height
    );
    Some(obstacle)
}

/// Build an obstacle at the right edge with a randomly placed gap
///
/// The top segment height is drawn uniformly so both segments keep at least
/// `min_segment_height`. Degenerate inputs are clamped rather than rejected:
/// the gap never exceeds the playfield, and when no valid range is left the
/// gap is centred. A non-finite playfield never reaches the RNG.
pub fn generate_obstacle<R: Rng>(tuning: &Tuning, gap: f32, rng: &mut R) -> Obstacle {
    let height = tuning.playfield_height.max(0.0);
    let gap = gap.clamp(0.0, height);

    let lo = tuning.min_segment_height.max(0.0);
    let hi = height - gap - lo;

    let top_height = if hi >= lo && hi.is_finite() {
        rng.random_range(lo..=hi)
    } else {
        (height - gap) / 2.0
    };
    let bottom_height = (height - top_height - gap).max(0.0);

    Obstacle {
        x: tuning.playfield_width,
        top_height,
        bottom_height,
        passed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn scroll(obstacles: &mut [Obstacle], speed: f32) {
        for obstacle in obstacles {
            obstacle.x -= speed;
        }
    }

    #[test]
    fn test_spawns_when_empty() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let obstacle = maybe_spawn(&[], &tuning, 0, &mut rng).unwrap();
        assert_eq!(obstacle.x, tuning.playfield_width);
        assert!(!obstacle.passed);
    }

    #[test]
    fn test_respects_spawn_distance() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let threshold = tuning.playfield_width - tuning.spawn_distance;

        let mut last = generate_obstacle(&tuning, tuning.obstacle_gap, &mut rng);
        last.x = threshold;
        assert!(maybe_spawn(&[last.clone()], &tuning, 0, &mut rng).is_none());

        last.x = threshold - 0.5;
        assert!(maybe_spawn(&[last], &tuning, 0, &mut rng).is_some());
    }

    #[test]
    fn test_early_gap_is_wider() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let easy = maybe_spawn(&[], &tuning, 0, &mut rng).unwrap();
        let normal = maybe_spawn(&[], &tuning, tuning.easy_obstacle_count, &mut rng).unwrap();

        let height = tuning.playfield_height;
        assert!((easy.gap(height) - (tuning.obstacle_gap + tuning.easy_gap_bonus)).abs() < 1e-3);
        assert!((normal.gap(height) - tuning.obstacle_gap).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_gap_is_clamped() {
        let tuning = Tuning {
            playfield_height: 300.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(9);

        let obstacle = generate_obstacle(&tuning, 1000.0, &mut rng);
        assert_eq!(obstacle.top_height, 0.0);
        assert_eq!(obstacle.bottom_height, 0.0);

        // No room for two minimum segments around a 250 gap
        let obstacle = generate_obstacle(&tuning, 250.0, &mut rng);
        assert_eq!(obstacle.top_height, 25.0);
        assert_eq!(obstacle.bottom_height, 25.0);
    }

    #[test]
    fn test_spacing_is_deterministic() {
        // Integer speed and distances keep the arithmetic exact
        let tuning = Tuning {
            obstacle_speed: 2.0,
            spawn_distance: 250.0,
            playfield_width: 400.0,
            ..Tuning::default()
        };
        let pitch = tuning.obstacle_pitch();

        for seed in [1, 2, 3] {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut obstacles: Vec<Obstacle> = Vec::new();
            for _ in 0..1000 {
                if let Some(obstacle) = maybe_spawn(&obstacles, &tuning, 0, &mut rng) {
                    obstacles.push(obstacle);
                }
                scroll(&mut obstacles, tuning.obstacle_speed);
            }

            // 1000 ticks at 2px cover 2000px: one spawn at tick 0, then one per pitch
            let expected = 1 + ((1000.0 - 1.0) * tuning.obstacle_speed / pitch).floor() as usize;
            assert_eq!(obstacles.len(), expected);
            for pair in obstacles.windows(2) {
                assert_eq!(pair[1].x - pair[0].x, pitch);
            }
        }
    }

    #[test]
    fn test_spacing_with_default_tuning() {
        // 1.8 is not exact in f32, so repeated scrolling drifts slightly
        const TOLERANCE: f32 = 1e-2;
        let tuning = Tuning::default();
        let pitch = tuning.obstacle_pitch();
        assert!((pitch - 250.2).abs() < 1e-3);

        for seed in [1, 2, 3] {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut obstacles: Vec<Obstacle> = Vec::new();
            for _ in 0..1000 {
                if let Some(obstacle) = maybe_spawn(&obstacles, &tuning, 0, &mut rng) {
                    obstacles.push(obstacle);
                }
                scroll(&mut obstacles, tuning.obstacle_speed);
            }

            assert!(obstacles.len() >= 7);
            for pair in obstacles.windows(2) {
                let diff = pair[1].x - pair[0].x;
                assert!(
                    (diff - pitch).abs() < TOLERANCE,
                    "spacing {diff} drifted from {pitch}"
                );
            }
        }
    }

    #[test]
    fn test_infinite_playfield_does_not_panic() {
        let tuning = Tuning {
            playfield_height: f32::INFINITY,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(4);
        let obstacle = generate_obstacle(&tuning, tuning.obstacle_gap, &mut rng);
        assert!(obstacle.bottom_height >= 0.0);
    }

    proptest! {
        #[test]
        fn prop_segments_fill_playfield(seed in any::<u64>(), score in 0u32..10, height in 500.0f32..2000.0) {
            let tuning = Tuning { playfield_height: height, ..Tuning::default() };
            let mut rng = Pcg32::seed_from_u64(seed);
            let gap = tuning.gap_for_score(score);
            let obstacle = generate_obstacle(&tuning, gap, &mut rng);

            prop_assert!(obstacle.top_height >= tuning.min_segment_height);
            prop_assert!(obstacle.bottom_height >= tuning.min_segment_height - 1e-2);
            let total = obstacle.top_height + gap + obstacle.bottom_height;
            prop_assert!((total - height).abs() < 1e-2);
        }

        #[test]
        fn prop_clamped_gap_never_negative(seed in any::<u64>(), gap in -500.0f32..5000.0, height in 1.0f32..1000.0) {
            let tuning = Tuning { playfield_height: height, ..Tuning::default() };
            let mut rng = Pcg32::seed_from_u64(seed);
            let obstacle = generate_obstacle(&tuning, gap, &mut rng);

            prop_assert!(obstacle.top_height >= 0.0);
            prop_assert!(obstacle.bottom_height >= 0.0);
            let realised = obstacle.gap(height);
            prop_assert!(realised >= -1e-2 && realised <= height + 1e-2);
        }
    }
}
