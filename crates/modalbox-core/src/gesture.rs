#![forbid(unsafe_code)]

//! Vertical drag tracking: turns raw pointer positions into displacement and
//! velocity samples.
//!
//! [`GestureTracker`] accepts a drag only when it starts inside an activation
//! band measured from the edge the user grabs. Once accepted, every pointer
//! move yields a [`GestureSample`] with the displacement from the starting
//! point and a velocity estimated over a short trailing window
//! ([`VelocityTracker`]).
//!
//! # Invariants
//!
//! 1. Samples are only produced between an accepted `begin` and the matching
//!    `end` / `cancel`.
//! 2. `end` always returns the terminal sample of an active gesture and leaves
//!    the tracker idle.
//! 3. Velocity is 0.0 until two samples with distinct timestamps exist.
//!
//! # Failure Modes
//!
//! - Timestamps that go backwards are treated as simultaneous with the latest
//!   recorded one.
//! - `update` / `end` without an active gesture return `None`.

use std::collections::VecDeque;
use std::time::Duration;

use web_time::Instant;

/// Only samples this recent contribute to the velocity estimate.
pub const VELOCITY_WINDOW: Duration = Duration::from_millis(100);

/// One observation of an active drag.
///
/// Both values are in screen space: positive means downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    /// Distance from where the drag started.
    pub displacement_px: f64,
    /// Estimated instantaneous velocity.
    pub velocity_px_per_ms: f64,
    pub timestamp: Instant,
}

// ---------------------------------------------------------------------------
// VelocityTracker
// ---------------------------------------------------------------------------

/// Windowed velocity estimate over recent positions.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    history: VecDeque<(Instant, f64)>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a position.
    pub fn push(&mut self, at: Instant, position: f64) {
        let at = match self.history.back() {
            Some(&(last, _)) if at < last => last,
            _ => at,
        };
        self.history.push_back((at, position));
        while let Some(&(oldest, _)) = self.history.front() {
            if at.duration_since(oldest) > VELOCITY_WINDOW && self.history.len() > 2 {
                self.history.pop_front();
            } else {
                break;
            }
        }
    }

    /// Velocity in px/ms across the retained window.
    pub fn velocity(&self) -> f64 {
        let (Some(&(t0, p0)), Some(&(t1, p1))) = (self.history.front(), self.history.back())
        else {
            return 0.0;
        };
        let dt_ms = t1.duration_since(t0).as_secs_f64() * 1000.0;
        if dt_ms <= 0.0 {
            return 0.0;
        }
        (p1 - p0) / dt_ms
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

// ---------------------------------------------------------------------------
// GestureTracker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct ActiveDrag {
    origin_y: f64,
    last: GestureSample,
}

/// Tracks a single vertical drag from activation to release.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    drag: Option<ActiveDrag>,
    velocity: VelocityTracker,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to start a drag at `origin_y`.
    ///
    /// `distance_from_edge` is how far inside the modal the touch landed,
    /// measured from the grabbed edge. The drag is accepted only when that
    /// distance is within `swipe_area`. Starting while a drag is active
    /// replaces it.
    pub fn begin(
        &mut self,
        origin_y: f64,
        distance_from_edge: f64,
        swipe_area: f64,
        now: Instant,
    ) -> bool {
        if !(0.0..=swipe_area).contains(&distance_from_edge) {
            return false;
        }
        self.velocity.clear();
        self.velocity.push(now, origin_y);
        self.drag = Some(ActiveDrag {
            origin_y,
            last: GestureSample {
                displacement_px: 0.0,
                velocity_px_per_ms: 0.0,
                timestamp: now,
            },
        });
        true
    }

    /// Record a pointer move and return the resulting sample.
    pub fn update(&mut self, y: f64, now: Instant) -> Option<GestureSample> {
        let drag = self.drag.as_mut()?;
        self.velocity.push(now, y);
        drag.last = GestureSample {
            displacement_px: y - drag.origin_y,
            velocity_px_per_ms: self.velocity.velocity(),
            timestamp: now,
        };
        Some(drag.last)
    }

    /// Finish the drag at `y`, returning the terminal sample.
    pub fn end(&mut self, y: f64, now: Instant) -> Option<GestureSample> {
        let sample = self.update(y, now)?;
        self.reset();
        Some(sample)
    }

    /// Abandon the drag without a terminal sample. Returns whether one was active.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.drag.is_some();
        self.reset();
        was_active
    }

    /// Whether a drag is currently being tracked.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.drag.is_some()
    }

    /// Most recent sample of the active drag.
    pub fn last_sample(&self) -> Option<GestureSample> {
        self.drag.as_ref().map(|d| d.last)
    }

    fn reset(&mut self) {
        self.drag = None;
        self.velocity.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const MS_10: Duration = Duration::from_millis(10);
    const MS_50: Duration = Duration::from_millis(50);

    #[test]
    fn begin_inside_area_is_accepted() {
        let mut tracker = GestureTracker::new();
        assert!(tracker.begin(300.0, 20.0, 50.0, Instant::now()));
        assert!(tracker.is_active());
    }

    #[test]
    fn begin_outside_area_is_rejected() {
        let mut tracker = GestureTracker::new();
        assert!(!tracker.begin(300.0, 80.0, 50.0, Instant::now()));
        assert!(!tracker.begin(300.0, -1.0, 50.0, Instant::now()));
        assert!(!tracker.is_active());
        assert!(tracker.update(310.0, Instant::now()).is_none());
    }

    #[test]
    fn update_reports_displacement_and_velocity() {
        let mut tracker = GestureTracker::new();
        let t = Instant::now();
        tracker.begin(100.0, 0.0, 50.0, t);

        let sample = tracker.update(150.0, t + MS_50).unwrap();
        assert!((sample.displacement_px - 50.0).abs() < 1e-9);
        assert!((sample.velocity_px_per_ms - 1.0).abs() < 1e-9);
    }

    #[test]
    fn end_returns_terminal_sample_and_goes_idle() {
        let mut tracker = GestureTracker::new();
        let t = Instant::now();
        tracker.begin(100.0, 0.0, 50.0, t);
        tracker.update(120.0, t + MS_10);

        let last = tracker.end(130.0, t + MS_50).unwrap();
        assert!((last.displacement_px - 30.0).abs() < 1e-9);
        assert!(!tracker.is_active());
        assert!(tracker.end(140.0, t + MS_50).is_none());
    }

    #[test]
    fn cancel_reports_whether_active() {
        let mut tracker = GestureTracker::new();
        assert!(!tracker.cancel());
        tracker.begin(0.0, 0.0, 10.0, Instant::now());
        assert!(tracker.cancel());
        assert!(tracker.last_sample().is_none());
    }

    #[test]
    fn velocity_window_drops_stale_samples() {
        let mut velocity = VelocityTracker::new();
        let t = Instant::now();
        velocity.push(t, 0.0);
        // Long pause, then a quick flick.
        velocity.push(t + Duration::from_millis(500), 0.0);
        velocity.push(t + Duration::from_millis(540), 0.0);
        velocity.push(t + Duration::from_millis(560), 60.0);
        // Only the last 100ms count: 60px over the 60ms since the pause ended.
        assert!((velocity.velocity() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn edge_velocity_zero_without_elapsed_time() {
        let mut velocity = VelocityTracker::new();
        let t = Instant::now();
        assert_eq!(velocity.velocity(), 0.0);
        velocity.push(t, 0.0);
        velocity.push(t, 40.0);
        assert_eq!(velocity.velocity(), 0.0);
    }

    #[test]
    fn edge_backwards_timestamps_are_clamped() {
        let mut velocity = VelocityTracker::new();
        let t = Instant::now() + MS_50;
        velocity.push(t, 0.0);
        velocity.push(t - MS_10, 20.0);
        assert_eq!(velocity.velocity(), 0.0);
    }

    #[test]
    fn edge_negative_displacement_is_reported_raw() {
        let mut tracker = GestureTracker::new();
        let t = Instant::now();
        tracker.begin(200.0, 5.0, 10.0, t);
        let sample = tracker.update(150.0, t + MS_50).unwrap();
        assert!(sample.displacement_px < 0.0);
        assert!(sample.velocity_px_per_ms < 0.0);
    }
}
