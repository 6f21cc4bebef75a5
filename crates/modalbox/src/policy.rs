#![forbid(unsafe_code)]

//! Release decision for swipe-to-close.
//!
//! A released drag either completes the close or snaps back open. The rule
//! only looks at motion along the entry axis, signed so that positive means
//! toward the entry edge:
//!
//! - displacement toward the entry edge, at or past the threshold, closes;
//! - a fling (velocity at or past the fling threshold) closes regardless of
//!   displacement;
//! - anything else snaps back.

use modalbox_core::{Edge, GestureSample};

/// Default fling velocity in px/ms (1000 px/s).
pub const DEFAULT_FLING_VELOCITY: f64 = 1.0;

/// Outcome of a released swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDecision {
    ContinueClose,
    SnapBack,
}

/// Decide a released swipe.
///
/// `entry_edge_sign` is `+1.0` when closing moves down (bottom entry) and
/// `-1.0` when it moves up (top entry); see [`Edge::closing_sign`]. Uses
/// [`DEFAULT_FLING_VELOCITY`].
pub fn decide(
    displacement_px: f64,
    velocity_px_per_ms: f64,
    swipe_threshold_px: f64,
    entry_edge_sign: f64,
) -> SwipeDecision {
    SwipeDecisionPolicy::new(swipe_threshold_px).decide(
        displacement_px,
        velocity_px_per_ms,
        entry_edge_sign,
    )
}

/// Thresholds for [`decide`], bundled so the controller can carry them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeDecisionPolicy {
    pub threshold_px: f64,
    pub fling_velocity: f64,
}

impl SwipeDecisionPolicy {
    pub const fn new(threshold_px: f64) -> Self {
        Self {
            threshold_px,
            fling_velocity: DEFAULT_FLING_VELOCITY,
        }
    }

    /// Set the fling velocity threshold.
    pub fn fling_velocity(mut self, px_per_ms: f64) -> Self {
        self.fling_velocity = px_per_ms;
        self
    }

    /// Decide from raw screen-space values.
    pub fn decide(
        &self,
        displacement_px: f64,
        velocity_px_per_ms: f64,
        entry_edge_sign: f64,
    ) -> SwipeDecision {
        let sign = if entry_edge_sign < 0.0 { -1.0 } else { 1.0 };
        let toward_entry = displacement_px * sign;
        let speed_toward_entry = velocity_px_per_ms * sign;

        let dragged_far = toward_entry > 0.0 && toward_entry >= self.threshold_px;
        if dragged_far || speed_toward_entry >= self.fling_velocity {
            SwipeDecision::ContinueClose
        } else {
            SwipeDecision::SnapBack
        }
    }

    /// Decide a terminal gesture sample for a modal entering from `entry`.
    pub fn decide_sample(&self, sample: &GestureSample, entry: Edge) -> SwipeDecision {
        self.decide(
            sample.displacement_px,
            sample.velocity_px_per_ms,
            entry.closing_sign(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn past_threshold_closes() {
        assert_eq!(decide(60.0, 0.0, 50.0, 1.0), SwipeDecision::ContinueClose);
    }

    #[test]
    fn short_slow_release_snaps_back() {
        assert_eq!(decide(30.0, 0.1, 50.0, 1.0), SwipeDecision::SnapBack);
    }

    #[test]
    fn fling_closes_short_of_threshold() {
        assert_eq!(decide(10.0, 1.5, 50.0, 1.0), SwipeDecision::ContinueClose);
    }

    #[test]
    fn fling_away_from_entry_snaps_back() {
        assert_eq!(decide(10.0, -3.0, 50.0, 1.0), SwipeDecision::SnapBack);
    }

    #[test]
    fn top_entry_uses_upward_motion() {
        assert_eq!(decide(-60.0, 0.0, 50.0, -1.0), SwipeDecision::ContinueClose);
        assert_eq!(decide(60.0, 0.0, 50.0, -1.0), SwipeDecision::SnapBack);
        assert_eq!(decide(-5.0, -2.0, 50.0, -1.0), SwipeDecision::ContinueClose);
    }

    #[test]
    fn edge_exact_threshold_closes() {
        assert_eq!(decide(50.0, 0.0, 50.0, 1.0), SwipeDecision::ContinueClose);
    }

    #[test]
    fn edge_zero_threshold_closes_on_any_forward_motion() {
        assert_eq!(decide(0.5, 0.0, 0.0, 1.0), SwipeDecision::ContinueClose);
        assert_eq!(decide(0.0, 0.0, 0.0, 1.0), SwipeDecision::SnapBack);
        assert_eq!(decide(-1.0, 0.0, 0.0, 1.0), SwipeDecision::SnapBack);
        assert_eq!(decide(0.0, 0.0, 0.0, -1.0), SwipeDecision::SnapBack);
    }

    #[test]
    fn edge_nan_inputs_snap_back() {
        assert_eq!(decide(f64::NAN, f64::NAN, 50.0, 1.0), SwipeDecision::SnapBack);
    }

    #[test]
    fn custom_fling_velocity() {
        let policy = SwipeDecisionPolicy::new(50.0).fling_velocity(3.0);
        assert_eq!(policy.decide(10.0, 2.0, 1.0), SwipeDecision::SnapBack);
        assert_eq!(policy.decide(10.0, 3.0, 1.0), SwipeDecision::ContinueClose);
    }
}
