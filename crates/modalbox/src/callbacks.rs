#![forbid(unsafe_code)]

//! Host lifecycle hooks and their dispatch.
//!
//! Hooks run after the controller has committed its state. Dispatch stops at
//! the first failing hook; later events from the same operation are dropped
//! and the failure is returned as [`ModalError::Callback`].

use std::fmt;

use crate::controller::ModalEvent;
use crate::error::{BoxError, Hook, ModalError};

const TARGET: &str = "modalbox.callbacks";

type Hook0 = Box<dyn FnMut() -> Result<(), BoxError>>;
type Hook1 = Box<dyn FnMut(bool) -> Result<(), BoxError>>;

/// Optional host hooks, one per lifecycle event.
#[derive(Default)]
pub struct ModalCallbacks {
    on_open: Option<Hook0>,
    on_closed: Option<Hook0>,
    on_closing_state: Option<Hook1>,
    on_request_close: Option<Hook0>,
}

impl fmt::Debug for ModalCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalCallbacks")
            .field("on_open", &self.on_open.is_some())
            .field("on_closed", &self.on_closed.is_some())
            .field("on_closing_state", &self.on_closing_state.is_some())
            .field("on_request_close", &self.on_request_close.is_some())
            .finish()
    }
}

impl ModalCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once the modal is fully open.
    pub fn on_open<F>(mut self, f: F) -> Self
    where
        F: FnMut() -> Result<(), BoxError> + 'static,
    {
        self.on_open = Some(Box::new(f));
        self
    }

    /// Called once the modal is fully closed.
    pub fn on_closed<F>(mut self, f: F) -> Self
    where
        F: FnMut() -> Result<(), BoxError> + 'static,
    {
        self.on_closed = Some(Box::new(f));
        self
    }

    /// Called with `true` when a swipe close starts, `false` when it is
    /// abandoned.
    pub fn on_closing_state<F>(mut self, f: F) -> Self
    where
        F: FnMut(bool) -> Result<(), BoxError> + 'static,
    {
        self.on_closing_state = Some(Box::new(f));
        self
    }

    /// Takes over backdrop and back-button closes. The modal stays open; the
    /// host decides whether to call `close`.
    pub fn on_request_close<F>(mut self, f: F) -> Self
    where
        F: FnMut() -> Result<(), BoxError> + 'static,
    {
        self.on_request_close = Some(Box::new(f));
        self
    }

    /// Whether a request-close hook is installed.
    #[inline]
    pub fn overrides_close(&self) -> bool {
        self.on_request_close.is_some()
    }

    /// Run the hooks for `events` in order.
    pub fn dispatch(&mut self, events: &[ModalEvent]) -> Result<(), ModalError> {
        if events.is_empty() {
            return Ok(());
        }
        let _span =
            tracing::debug_span!(target: TARGET, "modal.dispatch", events = events.len()).entered();
        for &event in events {
            let (hook, result) = match event {
                ModalEvent::Opened => (Hook::OnOpen, call(&mut self.on_open)),
                ModalEvent::Closed => (Hook::OnClosed, call(&mut self.on_closed)),
                ModalEvent::ClosingState(closing) => (
                    Hook::OnClosingState,
                    self.on_closing_state.as_mut().map_or(Ok(()), |f| f(closing)),
                ),
                ModalEvent::RequestClose => {
                    (Hook::OnRequestClose, call(&mut self.on_request_close))
                }
            };
            if let Err(source) = result {
                tracing::warn!(
                    target: TARGET,
                    hook = %hook,
                    error = %source,
                    "modal callback failed"
                );
                return Err(ModalError::Callback { hook, source });
            }
        }
        Ok(())
    }
}

fn call(hook: &mut Option<Hook0>) -> Result<(), BoxError> {
    hook.as_mut().map_or(Ok(()), |f| f())
}
