//! Easing-curve trajectory generation for a single joint.
//!
//! Forward moves follow `start + (end - start) * sin(x)^|a|`, resets follow
//! `start * cos(x)`, with `x` sweeping `(0, π/2]` over the step count.

use std::f64::consts::FRAC_PI_2;

/// Interpolated angles for one move plus the angle to commit once every
/// sample has been recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub angles: Vec<f64>,
    pub end: f64,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.angles.iter().copied()
    }
}

fn clamp_steps(step_count: i64) -> usize {
    step_count.max(0) as usize
}

/// Phase of step `i` (1-based) out of `n`, in `(0, π/2]`.
fn phase(i: usize, n: usize) -> f64 {
    i as f64 / n as f64 * FRAC_PI_2
}

/// Ease-in move from `current_angle` by `delta` degrees.
///
/// The sign of `acceleration` is ignored. A negative `step_count` is treated
/// as zero, which yields no samples.
pub fn generate_move(
    current_angle: f64,
    delta: f64,
    acceleration: f64,
    step_count: i64,
) -> Trajectory {
    let steps = clamp_steps(step_count);
    let start = current_angle;
    let end = start + delta;
    let acc = acceleration.abs();

    let angles = (1..=steps)
        .map(|i| start + (end - start) * phase(i, steps).sin().powf(acc))
        .collect();

    Trajectory { angles, end }
}

/// Ease-out move from `current_angle` back to zero.
///
/// The resting angle is exactly `0.0` whatever the last sample is.
pub fn generate_reset(current_angle: f64, step_count: i64) -> Trajectory {
    let steps = clamp_steps(step_count);

    let angles = (1..=steps)
        .map(|i| current_angle * phase(i, steps).cos())
        .collect();

    Trajectory { angles, end: 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_length_and_final_sample() {
        for &steps in &[1_i64, 2, 7, 300] {
            for &acc in &[0.5, 1.0, 15.0, -3.0] {
                let traj = generate_move(10.0, 45.0, acc, steps);
                assert_eq!(traj.len(), steps as usize);
                assert_eq!(traj.end, 55.0);
                assert!((traj.angles.last().unwrap() - 55.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_move_monotonic_for_positive_delta() {
        let traj = generate_move(0.0, 45.0, 15.0, 300);
        for pair in traj.angles.windows(2) {
            assert!(pair[1] >= pair[0], "{} then {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_move_zero_acceleration_jumps_to_end() {
        let traj = generate_move(5.0, -20.0, 0.0, 4);
        assert_eq!(traj.angles, vec![-15.0; 4]);
    }

    #[test]
    fn test_higher_acceleration_ramps_slower() {
        let gentle = generate_move(0.0, 45.0, 1.0, 100);
        let steep = generate_move(0.0, 45.0, 15.0, 100);
        assert!(steep.angles[10] < gentle.angles[10]);
    }

    #[test]
    fn test_move_non_positive_steps_is_empty() {
        assert!(generate_move(0.0, 45.0, 15.0, 0).is_empty());

        let traj = generate_move(3.0, 45.0, 15.0, -5);
        assert!(traj.is_empty());
        assert_eq!(traj.end, 48.0);
    }

    #[test]
    fn test_reset_zero_steps_is_empty() {
        let traj = generate_reset(45.0, 0);
        assert!(traj.is_empty());
        assert_eq!(traj.end, 0.0);
        assert!(generate_reset(45.0, -1).is_empty());
    }

    #[test]
    fn test_reset_decays_towards_zero() {
        let n = 10;
        let traj = generate_reset(45.0, n);
        assert_eq!(traj.len(), n as usize);

        let expected_first = 45.0 * (FRAC_PI_2 / n as f64).cos();
        assert!((traj.angles[0] - expected_first).abs() < 1e-12);
        assert!(traj.angles[0].abs() < 45.0);

        for pair in traj.angles.windows(2) {
            assert!(pair[1].abs() <= pair[0].abs());
        }
        assert!(traj.angles.last().unwrap().abs() < 1e-9);
        assert_eq!(traj.end, 0.0);
    }
}
