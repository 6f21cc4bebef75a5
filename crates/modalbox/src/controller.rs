#![forbid(unsafe_code)]

//! Modal state machine: open/close transitions, swipe-to-close, and lifecycle
//! events.
//!
//! # State Machine
//!
//! ```text
//!            open()                 complete
//!  Closed ───────────▶ Opening ─────────────▶ Open
//!    ▲                  │  ▲                   │ close() / backdrop / back
//!    │         close()  │  │ open()            │ swipe start (interactive)
//!    │ complete         ▼  │ snap-back         ▼
//!    └──────────────── Closing ◀───────────────┘
//! ```
//!
//! `Closing` has two sub-states. In the *interactive* sub-state a drag drives
//! the position directly and no animation is live. On release the
//! [`SwipeDecisionPolicy`] hands off to the *animated* sub-state: either a
//! close animation from the released position, or a snap-back animation that
//! re-enters `Opening`.
//!
//! # Invariants
//!
//! 1. `Open` / `Closed` ⇔ at rest, no animation handle, no gesture.
//! 2. At most one animation handle is live; starting one cancels the previous.
//! 3. Animation events whose handle is not the live one are ignored.
//! 4. State is committed before any [`ModalEvent`] is returned, so a failing
//!    host callback can never leave the machine half-transitioned.
//! 5. `Opened` is only reported when the modal reaches `Open` after having
//!    been `Closed`; a snap-back or a reversed close does not re-announce.
//!
//! # Failure Modes
//!
//! - Redundant or masked calls return no events.
//! - Layout changes during a drag are deferred until the drag ends.
//! - Dropping the controller cancels its live animation without reporting.

use std::fmt;
use std::time::Duration;

use modalbox_core::{
    AnimationDriver, AnimationEvent, AnimationHandle, Edge, FrameDriver, GestureTracker, Layout,
    TimedDriver, Viewport, scaled_duration,
};
use web_time::Instant;

use crate::config::ModalConfig;
use crate::error::ConfigError;
use crate::policy::{SwipeDecision, SwipeDecisionPolicy};

const TARGET: &str = "modalbox.controller";

// ============================================================================
// Public types
// ============================================================================

/// Lifecycle state of a mounted modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum ModalState {
    /// Fully hidden and at rest.
    #[default]
    Closed,
    /// Animating toward open.
    Opening,
    /// Fully visible and at rest.
    Open,
    /// Being dragged, or animating toward closed.
    Closing,
}

impl ModalState {
    /// Whether the modal should be rendered.
    #[inline]
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Whether a transition is in progress.
    #[inline]
    pub fn is_transitioning(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }

    /// Whether the modal is at rest.
    #[inline]
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Open | Self::Closed)
    }
}

/// Lifecycle notification for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalEvent {
    /// The modal finished opening.
    Opened,
    /// The modal finished closing.
    Closed,
    /// A swipe close started (`true`) or was abandoned (`false`).
    ClosingState(bool),
    /// Backdrop press or back button asked to close; the host decides.
    RequestClose,
}

/// Render parameters for the current position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModalFrame {
    /// Top edge of the modal in container coordinates.
    pub y: f64,
    /// Backdrop opacity to draw with, already scaled by visibility.
    pub backdrop_opacity: f32,
    pub visible: bool,
}

/// What triggered a transition (logging only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cause {
    Programmatic,
    Backdrop,
    BackButton,
    Swipe,
    Animation,
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Programmatic => "programmatic",
            Self::Backdrop => "backdrop",
            Self::BackButton => "back_button",
            Self::Swipe => "swipe",
            Self::Animation => "animation",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Open,
    Closed,
}

/// Who is driving the position right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Motion {
    Idle,
    Animating {
        handle: AnimationHandle,
        target: Target,
    },
    Interactive,
}

// ============================================================================
// ModalController
// ============================================================================

/// State machine for one mounted modal.
///
/// Every operation returns the [`ModalEvent`]s it produced, in order. The
/// controller never calls host code itself; see [`Modal`](crate::Modal) for
/// callback dispatch.
#[derive(Debug)]
pub struct ModalController<D: AnimationDriver = TimedDriver> {
    config: ModalConfig,
    viewport: Viewport,
    layout: Layout,
    relayout_pending: bool,
    state: ModalState,
    motion: Motion,
    y: f64,
    driver: D,
    tracker: GestureTracker,
    /// `ClosingState(true)` was reported and not yet balanced.
    closing_reported: bool,
    /// The modal left `Closed` and has not announced `Opened` yet.
    announce_open: bool,
    /// Backdrop / back-button closes are routed to the host instead.
    request_close_override: bool,
}

impl<D: AnimationDriver> ModalController<D> {
    /// Mount a modal.
    ///
    /// With `start_open` the modal begins settled in `Open`: no animation runs
    /// and no `Opened` is reported.
    pub fn new(config: ModalConfig, viewport: Viewport, driver: D) -> Result<Self, ConfigError> {
        config.validate()?;
        let layout = resolve_layout(&config, viewport);
        let (state, y) = if config.start_open {
            (ModalState::Open, layout.rest_y())
        } else {
            (ModalState::Closed, layout.hidden_y())
        };
        tracing::debug!(target: TARGET, state = ?state, y, "modal mounted");
        Ok(Self {
            config,
            viewport,
            layout,
            relayout_pending: false,
            state,
            motion: Motion::Idle,
            y,
            driver,
            tracker: GestureTracker::new(),
            closing_reported: false,
            announce_open: false,
            request_close_override: false,
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub fn state(&self) -> ModalState {
        self.state
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.state == ModalState::Open
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.state == ModalState::Closed
    }

    /// Whether a drag is currently driving the position.
    #[inline]
    pub fn is_interactive(&self) -> bool {
        self.motion == Motion::Interactive
    }

    /// Handle of the live animation, if any.
    pub fn live_handle(&self) -> Option<AnimationHandle> {
        match self.motion {
            Motion::Animating { handle, .. } => Some(handle),
            Motion::Idle | Motion::Interactive => None,
        }
    }

    /// Current top edge y.
    #[inline]
    pub fn position(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn config(&self) -> &ModalConfig {
        &self.config
    }

    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    #[inline]
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Render parameters for the current position.
    pub fn frame(&self) -> ModalFrame {
        let backdrop_opacity = if self.config.backdrop_enabled {
            self.config.backdrop_opacity * self.layout.visible_fraction(self.y) as f32
        } else {
            0.0
        };
        ModalFrame {
            y: self.y,
            backdrop_opacity: if self.state.is_visible() {
                backdrop_opacity
            } else {
                0.0
            },
            visible: self.state.is_visible(),
        }
    }

    /// Route backdrop and back-button closes to [`ModalEvent::RequestClose`]
    /// instead of closing.
    pub fn set_request_close_override(&mut self, enabled: bool) {
        self.request_close_override = enabled;
    }

    // -------------------------------------------------------------------------
    // Programmatic control
    // -------------------------------------------------------------------------

    /// Open the modal. No-op while `Opening` or `Open`.
    ///
    /// While `Closing`, the close is abandoned and the modal animates back
    /// open from where it is.
    pub fn open(&mut self) -> Vec<ModalEvent> {
        let mut out = Vec::new();
        match self.state {
            ModalState::Open | ModalState::Opening => {}
            ModalState::Closed => {
                self.announce_open = true;
                self.animate_to(Target::Open);
                self.set_state(ModalState::Opening, Cause::Programmatic);
            }
            ModalState::Closing => {
                if self.is_interactive() {
                    self.tracker.cancel();
                    self.motion = Motion::Idle;
                    self.apply_pending_layout();
                }
                self.animate_to(Target::Open);
                self.set_state(ModalState::Opening, Cause::Programmatic);
                self.balance_closing_state(&mut out);
            }
        }
        out
    }

    /// Close the modal. No-op while `Closed` or already animating closed.
    ///
    /// While `Opening`, the open animation is canceled and the close starts
    /// from the current intermediate position. During a drag, the drag is
    /// abandoned and the close completes from the dragged position.
    pub fn close(&mut self) -> Vec<ModalEvent> {
        self.close_with(Cause::Programmatic)
    }

    /// Follow the host's `isOpen` flag.
    pub fn set_open(&mut self, open: bool) -> Vec<ModalEvent> {
        if open { self.open() } else { self.close() }
    }

    // -------------------------------------------------------------------------
    // User dismissal
    // -------------------------------------------------------------------------

    /// Backdrop was pressed.
    ///
    /// Ignored unless the modal is `Open`, enabled, has a backdrop, and
    /// `backdrop_press_to_close` is set.
    pub fn press_backdrop(&mut self) -> Vec<ModalEvent> {
        if self.config.is_disabled
            || !self.config.backdrop_enabled
            || !self.config.backdrop_press_to_close
            || self.state != ModalState::Open
        {
            return Vec::new();
        }
        self.request_close(Cause::Backdrop)
    }

    /// Whether a back-button press would be consumed right now.
    pub fn handles_back_button(&self) -> bool {
        self.config.honors_back_button() && self.state == ModalState::Open
    }

    /// Hardware back button was pressed. Same semantics as a backdrop press.
    pub fn press_back_button(&mut self) -> Vec<ModalEvent> {
        if !self.handles_back_button() {
            return Vec::new();
        }
        self.request_close(Cause::BackButton)
    }

    // -------------------------------------------------------------------------
    // Swipe to close
    // -------------------------------------------------------------------------

    /// A pointer went down at container y `y`.
    ///
    /// Starts the interactive close when the modal is `Open` and at rest,
    /// swipes are enabled, and the touch is inside the swipe area, measured
    /// from the modal edge facing away from the entry edge.
    pub fn pointer_down(&mut self, y: f64, now: Instant) -> Vec<ModalEvent> {
        let mut out = Vec::new();
        if self.config.is_disabled
            || !self.config.swipe_to_close
            || self.state != ModalState::Open
            || self.motion != Motion::Idle
        {
            return out;
        }

        let modal_height = self.viewport.modal_height.max(0.0);
        let distance_from_edge = match self.layout.entry() {
            Edge::Bottom => y - self.y,
            Edge::Top => self.y + modal_height - y,
        };
        let swipe_area = self.config.swipe_area.unwrap_or(modal_height);
        if !self.tracker.begin(y, distance_from_edge, swipe_area, now) {
            return out;
        }

        self.motion = Motion::Interactive;
        self.set_state(ModalState::Closing, Cause::Swipe);
        self.closing_reported = true;
        out.push(ModalEvent::ClosingState(true));
        out
    }

    /// The pointer moved during a drag.
    pub fn pointer_move(&mut self, y: f64, now: Instant) -> Vec<ModalEvent> {
        if !self.is_interactive() {
            return Vec::new();
        }
        if let Some(sample) = self.tracker.update(y, now) {
            let toward_entry = sample.displacement_px * self.layout.entry().closing_sign();
            self.y = self.layout.y_at_displacement(toward_entry);
        }
        Vec::new()
    }

    /// The pointer was released; decide between closing and snapping back.
    pub fn pointer_up(&mut self, y: f64, now: Instant) -> Vec<ModalEvent> {
        if !self.is_interactive() {
            return Vec::new();
        }
        let Some(sample) = self.tracker.end(y, now) else {
            return self.snap_back();
        };
        let toward_entry = sample.displacement_px * self.layout.entry().closing_sign();
        self.y = self.layout.y_at_displacement(toward_entry);

        let policy = SwipeDecisionPolicy::new(self.config.swipe_threshold)
            .fling_velocity(self.config.fling_velocity);
        let decision = policy.decide_sample(&sample, self.layout.entry());
        tracing::debug!(
            target: TARGET,
            displacement = sample.displacement_px,
            velocity = sample.velocity_px_per_ms,
            decision = ?decision,
            "swipe released"
        );

        match decision {
            SwipeDecision::ContinueClose => {
                self.motion = Motion::Idle;
                self.apply_pending_layout();
                self.animate_to(Target::Closed);
                Vec::new()
            }
            SwipeDecision::SnapBack => self.snap_back(),
        }
    }

    /// The platform took the pointer away mid-drag. Snaps back open.
    pub fn pointer_cancel(&mut self) -> Vec<ModalEvent> {
        if !self.is_interactive() {
            return Vec::new();
        }
        self.tracker.cancel();
        self.snap_back()
    }

    // -------------------------------------------------------------------------
    // Animation plumbing
    // -------------------------------------------------------------------------

    /// Apply an event from the driver.
    ///
    /// Events for any handle other than the live one are dropped.
    pub fn handle_animation(&mut self, event: AnimationEvent) -> Vec<ModalEvent> {
        let mut out = Vec::new();
        let Motion::Animating { handle, target } = self.motion else {
            tracing::trace!(target: TARGET, handle = event.handle().id(), "stale animation event");
            return out;
        };
        if handle != event.handle() {
            tracing::trace!(target: TARGET, handle = event.handle().id(), "stale animation event");
            return out;
        }

        match event {
            AnimationEvent::Frame { position, .. } => self.y = position,
            AnimationEvent::Complete { .. } => {
                self.motion = Motion::Idle;
                match target {
                    Target::Open => {
                        self.y = self.layout.rest_y();
                        self.set_state(ModalState::Open, Cause::Animation);
                        if std::mem::take(&mut self.announce_open) {
                            out.push(ModalEvent::Opened);
                        }
                    }
                    Target::Closed => {
                        self.y = self.layout.hidden_y();
                        self.closing_reported = false;
                        self.announce_open = false;
                        self.set_state(ModalState::Closed, Cause::Animation);
                        out.push(ModalEvent::Closed);
                    }
                }
            }
        }
        out
    }

    // -------------------------------------------------------------------------
    // Configuration and geometry
    // -------------------------------------------------------------------------

    /// Replace the configuration.
    ///
    /// Geometry-affecting changes re-derive the layout (deferred during a
    /// drag). Disabling the modal mid-drag snaps it back open.
    pub fn set_config(&mut self, config: ModalConfig) -> Result<Vec<ModalEvent>, ConfigError> {
        config.validate()?;
        let geometry = self.config.affects_geometry(&config);
        let disabled = config.is_disabled;
        self.config = config;

        let out = self.apply_disabled(disabled);
        if geometry {
            self.relayout();
        }
        Ok(out)
    }

    /// Toggle `is_disabled`.
    pub fn set_disabled(&mut self, disabled: bool) -> Vec<ModalEvent> {
        self.config.is_disabled = disabled;
        self.apply_disabled(disabled)
    }

    /// The render surface reported new measurements.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.relayout();
    }

    /// The on-screen keyboard changed height (0 when hidden).
    pub fn set_keyboard_height(&mut self, height: f64) {
        self.viewport.keyboard_height = height.max(0.0);
        self.relayout();
    }

    /// Tear the modal down. Cancels any live animation without reporting.
    pub fn unmount(self) {
        tracing::debug!(target: TARGET, state = ?self.state, "modal unmounted");
        drop(self);
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn close_with(&mut self, cause: Cause) -> Vec<ModalEvent> {
        match self.state {
            ModalState::Closed => {}
            ModalState::Closing => {
                if self.is_interactive() {
                    self.tracker.cancel();
                    self.motion = Motion::Idle;
                    self.apply_pending_layout();
                    self.animate_to(Target::Closed);
                }
            }
            ModalState::Open | ModalState::Opening => {
                self.animate_to(Target::Closed);
                self.set_state(ModalState::Closing, cause);
            }
        }
        Vec::new()
    }

    /// Disabling mid-drag abandons the drag and snaps back open.
    fn apply_disabled(&mut self, disabled: bool) -> Vec<ModalEvent> {
        if !disabled || !self.is_interactive() {
            return Vec::new();
        }
        self.tracker.cancel();
        self.snap_back()
    }

    fn request_close(&mut self, cause: Cause) -> Vec<ModalEvent> {
        if self.request_close_override {
            tracing::debug!(target: TARGET, cause = %cause, "close requested from host");
            return vec![ModalEvent::RequestClose];
        }
        self.close_with(cause)
    }

    fn snap_back(&mut self) -> Vec<ModalEvent> {
        let mut out = Vec::new();
        self.motion = Motion::Idle;
        self.apply_pending_layout();
        self.animate_to(Target::Open);
        self.set_state(ModalState::Opening, Cause::Swipe);
        self.balance_closing_state(&mut out);
        out
    }

    fn balance_closing_state(&mut self, out: &mut Vec<ModalEvent>) {
        if std::mem::take(&mut self.closing_reported) {
            out.push(ModalEvent::ClosingState(false));
        }
    }

    /// Start (or restart) the animation toward `target` from the current y.
    ///
    /// The duration is scaled by the share of the travel left to cover.
    fn animate_to(&mut self, target: Target) {
        if let Some(handle) = self.live_handle() {
            self.driver.cancel(handle);
            tracing::debug!(target: TARGET, handle = handle.id(), "animation superseded");
        }
        let (to, easing) = match target {
            Target::Open => (self.layout.rest_y(), self.config.open_easing),
            Target::Closed => (self.layout.hidden_y(), self.config.close_easing),
        };
        let remaining = self.layout.remaining_fraction(self.y, to);
        let duration = scaled_duration(self.config.animation_duration, remaining);
        let handle = self.driver.start(self.y, to, duration, easing);
        tracing::debug!(
            target: TARGET,
            handle = handle.id(),
            from = self.y,
            to,
            duration_ms = duration.as_millis() as u64,
            "animation started"
        );
        self.motion = Motion::Animating { handle, target };
    }

    fn relayout(&mut self) {
        if self.is_interactive() {
            self.relayout_pending = true;
            return;
        }
        self.layout = resolve_layout(&self.config, self.viewport);
        self.relayout_pending = false;
        match self.motion {
            Motion::Idle => {
                self.y = match self.state {
                    ModalState::Closed => self.layout.hidden_y(),
                    _ => self.layout.rest_y(),
                };
            }
            Motion::Animating { target, .. } => self.animate_to(target),
            Motion::Interactive => {}
        }
    }

    fn apply_pending_layout(&mut self) {
        if self.relayout_pending {
            self.layout = resolve_layout(&self.config, self.viewport);
            self.relayout_pending = false;
        }
    }

    fn set_state(&mut self, next: ModalState, cause: Cause) {
        if self.state != next {
            tracing::debug!(
                target: TARGET,
                from = ?self.state,
                to = ?next,
                cause = %cause,
                "modal state changed"
            );
        }
        self.state = next;
    }
}

impl<D: FrameDriver> ModalController<D> {
    /// Advance the driver by one frame and apply its events.
    pub fn tick(&mut self, delta: Duration) -> Vec<ModalEvent> {
        let events = self.driver.tick(delta);
        let mut out = Vec::new();
        for event in events {
            out.extend(self.handle_animation(event));
        }
        out
    }
}

impl<D: AnimationDriver> Drop for ModalController<D> {
    fn drop(&mut self) {
        if let Some(handle) = self.live_handle() {
            self.driver.cancel(handle);
        }
        self.tracker.cancel();
    }
}

fn resolve_layout(config: &ModalConfig, viewport: Viewport) -> Layout {
    Layout::resolve(
        viewport,
        config.placement,
        config.entry,
        config.keyboard_top_offset,
    )
}

// ============================================================================
// Tests
// ============================================================================
