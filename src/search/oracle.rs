//! Stability oracle for search trials
//!
//! A trial stays healthy while every non-central body keeps its distance from
//! the origin within 50%..150% of the distance it had when the trial started.
//! Bodies closer than 0.1 AU to the origin are never flagged, which keeps bodies
//! that start near the origin from tripping the ratio test on tiny movements.

use crate::simulation::integrator::is_finite;
use crate::simulation::states::System;

/// Lowest allowed current/baseline distance ratio
pub const MIN_RATIO: f64 = 0.5;

/// Highest allowed current/baseline distance ratio
pub const MAX_RATIO: f64 = 1.5;

/// Bodies nearer than this to the origin (AU) are ignored
pub const MIN_DISTANCE_AU: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    /// Every body is inside the band
    Holding,
    /// Body at `index` left the band with the given distance ratio
    Breached { index: usize, ratio: f64 },
    /// Some position or velocity is NaN or infinite
    Diverged,
}

/// Both bounds are exclusive: a ratio of exactly 0.5 or 1.5 is still inside.
pub fn breaches(ratio: f64, distance: f64) -> bool {
    (ratio < MIN_RATIO || ratio > MAX_RATIO) && distance >= MIN_DISTANCE_AU
}

/// Compare `live` against the trial-start `baseline`, body by body.
/// The central body is skipped. Both systems must hold the same bodies in the same order.
pub fn classify(baseline: &System, live: &System) -> Verdict {
    if !is_finite(live) {
        return Verdict::Diverged;
    }

    for (index, (start, now)) in baseline.bodies.iter().zip(live.bodies.iter()).enumerate() {
        if index == live.central {
            continue;
        }
        let distance = now.distance_from_origin();
        let ratio = distance / start.distance_from_origin();
        if breaches(ratio, distance) {
            return Verdict::Breached { index, ratio };
        }
    }

    Verdict::Holding
}
