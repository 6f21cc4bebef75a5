#![forbid(unsafe_code)]

//! A mounted modal: controller plus host callbacks.

use std::time::Duration;

use modalbox_core::{AnimationDriver, AnimationEvent, FrameDriver, TimedDriver, Viewport};
use web_time::Instant;

use crate::callbacks::ModalCallbacks;
use crate::config::ModalConfig;
use crate::controller::{ModalController, ModalEvent, ModalFrame, ModalState};
use crate::error::ModalError;

/// A [`ModalController`] wired to [`ModalCallbacks`].
///
/// Each operation applies the transition, then runs the matching hooks. A
/// hook error is returned after the transition has been committed.
#[derive(Debug)]
pub struct Modal<D: AnimationDriver = TimedDriver> {
    controller: ModalController<D>,
    callbacks: ModalCallbacks,
}

impl Modal<TimedDriver> {
    /// Mount with the built-in frame-stepped driver.
    pub fn new(config: ModalConfig, viewport: Viewport) -> Result<Self, ModalError> {
        Self::with_driver(config, viewport, TimedDriver::new())
    }
}

impl<D: AnimationDriver> Modal<D> {
    pub fn with_driver(config: ModalConfig, viewport: Viewport, driver: D) -> Result<Self, ModalError> {
        let controller = ModalController::new(config, viewport, driver)?;
        Ok(Self {
            controller,
            callbacks: ModalCallbacks::new(),
        })
    }

    /// Install host hooks, replacing any previous ones.
    pub fn callbacks(mut self, callbacks: ModalCallbacks) -> Self {
        self.set_callbacks(callbacks);
        self
    }

    pub fn set_callbacks(&mut self, callbacks: ModalCallbacks) {
        self.controller
            .set_request_close_override(callbacks.overrides_close());
        self.callbacks = callbacks;
    }

    #[inline]
    pub fn controller(&self) -> &ModalController<D> {
        &self.controller
    }

    #[inline]
    pub fn state(&self) -> ModalState {
        self.controller.state()
    }

    #[inline]
    pub fn frame(&self) -> ModalFrame {
        self.controller.frame()
    }

    pub fn open(&mut self) -> Result<(), ModalError> {
        let events = self.controller.open();
        self.emit(&events)
    }

    pub fn close(&mut self) -> Result<(), ModalError> {
        let events = self.controller.close();
        self.emit(&events)
    }

    pub fn set_open(&mut self, open: bool) -> Result<(), ModalError> {
        let events = self.controller.set_open(open);
        self.emit(&events)
    }

    pub fn press_backdrop(&mut self) -> Result<(), ModalError> {
        let events = self.controller.press_backdrop();
        self.emit(&events)
    }

    /// Returns whether the press was consumed.
    pub fn press_back_button(&mut self) -> Result<bool, ModalError> {
        if !self.controller.handles_back_button() {
            return Ok(false);
        }
        let events = self.controller.press_back_button();
        self.emit(&events)?;
        Ok(true)
    }

    pub fn pointer_down(&mut self, y: f64, now: Instant) -> Result<(), ModalError> {
        let events = self.controller.pointer_down(y, now);
        self.emit(&events)
    }

    pub fn pointer_move(&mut self, y: f64, now: Instant) -> Result<(), ModalError> {
        let events = self.controller.pointer_move(y, now);
        self.emit(&events)
    }

    pub fn pointer_up(&mut self, y: f64, now: Instant) -> Result<(), ModalError> {
        let events = self.controller.pointer_up(y, now);
        self.emit(&events)
    }

    pub fn pointer_cancel(&mut self) -> Result<(), ModalError> {
        let events = self.controller.pointer_cancel();
        self.emit(&events)
    }

    /// Feed an event from an externally driven animation backend.
    pub fn handle_animation(&mut self, event: AnimationEvent) -> Result<(), ModalError> {
        let events = self.controller.handle_animation(event);
        self.emit(&events)
    }

    pub fn set_config(&mut self, config: ModalConfig) -> Result<(), ModalError> {
        let events = self.controller.set_config(config)?;
        self.emit(&events)
    }

    pub fn set_disabled(&mut self, disabled: bool) -> Result<(), ModalError> {
        let events = self.controller.set_disabled(disabled);
        self.emit(&events)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.controller.set_viewport(viewport);
    }

    pub fn set_keyboard_height(&mut self, height: f64) {
        self.controller.set_keyboard_height(height);
    }

    /// Tear down without running any hooks.
    pub fn unmount(self) {
        self.controller.unmount();
    }

    fn emit(&mut self, events: &[ModalEvent]) -> Result<(), ModalError> {
        self.callbacks.dispatch(events)
    }
}

impl<D: FrameDriver> Modal<D> {
    /// Advance animations by one frame.
    pub fn tick(&mut self, delta: Duration) -> Result<(), ModalError> {
        let events = self.controller.tick(delta);
        self.emit(&events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Platform;
    use crate::error::Hook;
    use std::cell::Cell;
    use std::rc::Rc;

    const SEC_1: Duration = Duration::from_secs(1);

    fn modal(config: ModalConfig) -> Modal {
        Modal::new(config, Viewport::new(800.0, 300.0)).unwrap()
    }

    fn counter() -> (Rc<Cell<u32>>, impl FnMut() -> Result<(), crate::BoxError>) {
        let count = Rc::new(Cell::new(0));
        let seen = count.clone();
        (count, move || {
            seen.set(seen.get() + 1);
            Ok(())
        })
    }

    #[test]
    fn open_close_cycle_fires_each_hook_once() {
        let (opened, on_open) = counter();
        let (closed, on_closed) = counter();
        let mut m = modal(ModalConfig::default()).callbacks(
            ModalCallbacks::new().on_open(on_open).on_closed(on_closed),
        );

        m.open().unwrap();
        m.open().unwrap();
        m.tick(SEC_1).unwrap();
        m.tick(SEC_1).unwrap();
        assert_eq!(opened.get(), 1);

        m.close().unwrap();
        m.tick(SEC_1).unwrap();
        assert_eq!(closed.get(), 1);
        assert_eq!(m.state(), ModalState::Closed);
    }

    #[test]
    fn request_close_hook_keeps_modal_open() {
        let (requested, on_request) = counter();
        let mut m = modal(ModalConfig::default().start_open(true))
            .callbacks(ModalCallbacks::new().on_request_close(on_request));
        m.press_backdrop().unwrap();
        assert_eq!(requested.get(), 1);
        assert_eq!(m.state(), ModalState::Open);

        m.close().unwrap();
        assert_eq!(m.state(), ModalState::Closing);
    }

    #[test]
    fn failing_hook_surfaces_after_commit() {
        let mut m = modal(ModalConfig::default())
            .callbacks(ModalCallbacks::new().on_open(|| Err("host exploded".into())));
        m.open().unwrap();
        let err = m.tick(SEC_1).unwrap_err();
        assert_eq!(err.hook(), Some(Hook::OnOpen));
        assert_eq!(m.state(), ModalState::Open);
    }

    #[test]
    fn back_button_consumption() {
        let config = ModalConfig::for_platform(Platform::Android)
            .start_open(true)
            .back_button_closes(true);
        let mut m = modal(config);
        assert!(m.press_back_button().unwrap());
        assert!(!m.press_back_button().unwrap());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = Modal::new(
            ModalConfig::default().swipe_threshold(f64::NAN),
            Viewport::new(800.0, 300.0),
        )
        .unwrap_err();
        assert!(matches!(err, ModalError::Config(_)));
    }
}
