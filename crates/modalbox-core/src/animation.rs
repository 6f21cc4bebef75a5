#![forbid(unsafe_code)]

//! Cancelable position animations.
//!
//! This module provides:
//! - [`Easing`] curves for entrance and exit motion
//! - [`AnimationHandle`], an identity for one in-flight transition
//! - the [`AnimationDriver`] / [`FrameDriver`] seams a modal drives
//! - [`TimedDriver`], a deterministic driver pumped by frame deltas
//!
//! # Example
//!
//! ```ignore
//! let mut driver = TimedDriver::new();
//! let handle = driver.start(800.0, 250.0, Duration::from_millis(400), Easing::EaseOut);
//!
//! // Each frame, advance and forward the events to whoever owns `handle`.
//! for event in driver.tick(frame_delta) {
//!     match event {
//!         AnimationEvent::Frame { handle, position } => { /* move */ }
//!         AnimationEvent::Complete { handle } => { /* settle */ }
//!     }
//! }
//! ```
//!
//! # Invariants
//!
//! - Handles are never reused by a driver.
//! - A live handle produces exactly one `Complete`, always preceded by a final
//!   `Frame` at its target position.
//! - A canceled handle produces no further events.
//! - Progress is always in [0.0, 1.0]; overshooting easings may move the
//!   reported position past the target mid-flight, never at completion.
//!
//! # Failure Modes
//!
//! - Zero-duration animations complete on the next tick.
//! - Canceling an unknown or finished handle is a no-op.

use std::time::Duration;

// ============================================================================
// Easing Functions
// ============================================================================

/// Easing curve applied to linear progress.
///
/// Every curve maps `[0, 1]` onto `[0, 1]`, so an animated position never
/// leaves the segment between its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Easing {
    Linear,
    /// Cubic deceleration.
    #[default]
    EaseOut,
    /// Cubic acceleration.
    EaseIn,
}

impl Easing {
    /// Eased progress for linear progress `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t.powi(3),
            Self::EaseOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

// ============================================================================
// Handles and events
// ============================================================================

/// Identity of one in-flight animation.
///
/// Completion and frame events carry the handle that produced them so the
/// owner can discard events from animations it has already superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationHandle(u64);

impl AnimationHandle {
    /// Wrap a raw id. Drivers must never hand out the same id twice.
    #[inline]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Progress reported by a driver for a live handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationEvent {
    /// The animated value moved.
    Frame {
        handle: AnimationHandle,
        position: f64,
    },
    /// The animation reached its target. Fires once per handle.
    Complete { handle: AnimationHandle },
}

impl AnimationEvent {
    /// Handle this event belongs to.
    #[inline]
    pub fn handle(&self) -> AnimationHandle {
        match *self {
            Self::Frame { handle, .. } | Self::Complete { handle } => handle,
        }
    }
}

/// Starts and cancels position animations.
///
/// Implementations deliver [`AnimationEvent`]s for every live handle back to
/// the owner, either from [`FrameDriver::tick`] or through whatever frame
/// callback the host platform provides.
pub trait AnimationDriver {
    /// Start animating from `from` to `to` over `duration`.
    fn start(
        &mut self,
        from: f64,
        to: f64,
        duration: Duration,
        easing: Easing,
    ) -> AnimationHandle;

    /// Cancel a live animation. No events are delivered for it afterwards.
    fn cancel(&mut self, handle: AnimationHandle);
}

/// A driver advanced explicitly by the host's frame loop.
pub trait FrameDriver: AnimationDriver {
    /// Advance all live animations by `delta` and collect their events.
    fn tick(&mut self, delta: Duration) -> Vec<AnimationEvent>;
}

/// Duration for covering `remaining` of a full travel, never above `full`.
///
/// `remaining` is a fraction of the full travel; values outside [0.0, 1.0]
/// are clamped and NaN counts as a full travel.
pub fn scaled_duration(full: Duration, remaining: f64) -> Duration {
    let fraction = if remaining.is_nan() {
        1.0
    } else {
        remaining.clamp(0.0, 1.0)
    };
    full.mul_f64(fraction).min(full)
}

// ============================================================================
// TimedDriver
// ============================================================================

#[derive(Debug, Clone)]
struct Track {
    handle: AnimationHandle,
    from: f64,
    to: f64,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl Track {
    fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    fn position(&self) -> f64 {
        let eased = self.easing.apply(self.progress());
        self.from + (self.to - self.from) * eased
    }
}

/// Deterministic in-process driver: positions advance only on [`tick`].
///
/// [`tick`]: FrameDriver::tick
#[derive(Debug, Clone, Default)]
pub struct TimedDriver {
    next_id: u64,
    tracks: Vec<Track>,
}

impl TimedDriver {
    /// Create an idle driver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live animations.
    #[inline]
    pub fn live(&self) -> usize {
        self.tracks.len()
    }

    /// Whether `handle` is still running.
    pub fn is_live(&self, handle: AnimationHandle) -> bool {
        self.tracks.iter().any(|t| t.handle == handle)
    }

    /// Current interpolated position of a live animation.
    pub fn position(&self, handle: AnimationHandle) -> Option<f64> {
        self.tracks
            .iter()
            .find(|t| t.handle == handle)
            .map(Track::position)
    }
}

impl AnimationDriver for TimedDriver {
    fn start(
        &mut self,
        from: f64,
        to: f64,
        duration: Duration,
        easing: Easing,
    ) -> AnimationHandle {
        self.next_id += 1;
        let handle = AnimationHandle(self.next_id);
        self.tracks.push(Track {
            handle,
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
        });
        handle
    }

    fn cancel(&mut self, handle: AnimationHandle) {
        self.tracks.retain(|t| t.handle != handle);
    }
}

impl FrameDriver for TimedDriver {
    fn tick(&mut self, delta: Duration) -> Vec<AnimationEvent> {
        let mut out = Vec::with_capacity(self.tracks.len() * 2);
        self.tracks.retain_mut(|track| {
            track.elapsed = track.elapsed.saturating_add(delta);
            if track.progress() >= 1.0 {
                out.push(AnimationEvent::Frame {
                    handle: track.handle,
                    position: track.to,
                });
                out.push(AnimationEvent::Complete {
                    handle: track.handle,
                });
                false
            } else {
                out.push(AnimationEvent::Frame {
                    handle: track.handle,
                    position: track.position(),
                });
                true
            }
        });
        out
    }
}

// ============================================================================
// Tests
// ============================================================================
