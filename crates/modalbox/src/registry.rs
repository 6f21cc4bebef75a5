#![forbid(unsafe_code)]

//! Mounted-modal registry with a static-style facade.
//!
//! `ModalRegistry` owns every mounted [`Modal`] in mount order. The facade
//! calls [`open`](ModalRegistry::open) and [`close`](ModalRegistry::close)
//! address the *current instance*: the most recently mounted modal still
//! present. Individual modals are addressed by [`ModalId`].
//!
//! # Invariants
//!
//! - IDs are never reused, even across registries.
//! - Unmounting the current instance makes the previous mount current.
//! - Back-button presses go to the topmost modal that consumes them.
//!
//! # Failure Modes
//!
//! - Facade calls with nothing mounted return `Ok(false)`.
//! - Calls for an unknown [`ModalId`] return `Ok(false)` / `None`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use modalbox_core::{AnimationDriver, FrameDriver, TimedDriver};

use crate::error::ModalError;
use crate::modal::Modal;

const TARGET: &str = "modalbox.registry";

static MODAL_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identifier of a mounted modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModalId(u64);

impl ModalId {
    fn next() -> Self {
        Self(MODAL_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Owner of all mounted modals.
#[derive(Debug)]
pub struct ModalRegistry<D: AnimationDriver = TimedDriver> {
    mounted: Vec<(ModalId, Modal<D>)>,
}

impl<D: AnimationDriver> Default for ModalRegistry<D> {
    fn default() -> Self {
        Self {
            mounted: Vec::new(),
        }
    }
}

impl<D: AnimationDriver> ModalRegistry<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a modal; it becomes the current instance.
    pub fn mount(&mut self, modal: Modal<D>) -> ModalId {
        let id = ModalId::next();
        tracing::debug!(target: TARGET, id = id.id(), mounted = self.mounted.len() + 1, "modal mounted");
        self.mounted.push((id, modal));
        id
    }

    /// Unmount a modal, cancelling its animation without running hooks.
    pub fn unmount(&mut self, id: ModalId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let (_, modal) = self.mounted.remove(index);
        modal.unmount();
        tracing::debug!(target: TARGET, id = id.id(), mounted = self.mounted.len(), "modal unmounted");
        true
    }

    /// ID of the current instance.
    pub fn current(&self) -> Option<ModalId> {
        self.mounted.last().map(|(id, _)| *id)
    }

    pub fn get(&self, id: ModalId) -> Option<&Modal<D>> {
        self.mounted
            .iter()
            .find(|(mid, _)| *mid == id)
            .map(|(_, m)| m)
    }

    pub fn get_mut(&mut self, id: ModalId) -> Option<&mut Modal<D>> {
        self.mounted
            .iter_mut()
            .find(|(mid, _)| *mid == id)
            .map(|(_, m)| m)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.mounted.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
    }

    /// Iterate modals in mount order.
    pub fn iter(&self) -> impl Iterator<Item = (ModalId, &Modal<D>)> {
        self.mounted.iter().map(|(id, m)| (*id, m))
    }

    /// Open the current instance. Returns whether one was mounted.
    pub fn open(&mut self) -> Result<bool, ModalError> {
        match self.current() {
            Some(id) => self.open_id(id),
            None => {
                tracing::debug!(target: TARGET, "open with no mounted modal");
                Ok(false)
            }
        }
    }

    /// Close the current instance. Returns whether one was mounted.
    pub fn close(&mut self) -> Result<bool, ModalError> {
        match self.current() {
            Some(id) => self.close_id(id),
            None => {
                tracing::debug!(target: TARGET, "close with no mounted modal");
                Ok(false)
            }
        }
    }

    pub fn open_id(&mut self, id: ModalId) -> Result<bool, ModalError> {
        match self.get_mut(id) {
            Some(modal) => modal.open().map(|()| true),
            None => Ok(false),
        }
    }

    pub fn close_id(&mut self, id: ModalId) -> Result<bool, ModalError> {
        match self.get_mut(id) {
            Some(modal) => modal.close().map(|()| true),
            None => Ok(false),
        }
    }

    /// Route a hardware back press to the topmost modal that consumes it.
    pub fn press_back_button(&mut self) -> Result<bool, ModalError> {
        for (id, modal) in self.mounted.iter_mut().rev() {
            if modal.controller().handles_back_button() {
                tracing::debug!(target: TARGET, id = id.id(), "back button routed");
                return modal.press_back_button();
            }
        }
        Ok(false)
    }
}

impl<D: FrameDriver> ModalRegistry<D> {
    /// Advance every mounted modal by one frame.
    ///
    /// All modals are ticked even if a hook fails; the first error is
    /// returned.
    pub fn tick(&mut self, delta: Duration) -> Result<(), ModalError> {
        let mut first_err = None;
        for (_, modal) in &mut self.mounted {
            if let Err(err) = modal.tick(delta)
                && first_err.is_none()
            {
                first_err = Some(err);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

impl<D: AnimationDriver> ModalRegistry<D> {
    fn index_of(&self, id: ModalId) -> Option<usize> {
        self.mounted.iter().position(|(mid, _)| *mid == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ModalConfig, Platform};
    use crate::controller::ModalState;
    use modalbox_core::Viewport;

    const SEC_1: Duration = Duration::from_secs(1);

    fn modal() -> Modal {
        Modal::new(
            ModalConfig::for_platform(Platform::Android),
            Viewport::new(800.0, 300.0),
        )
        .unwrap()
    }

    #[test]
    fn facade_without_instance_is_noop() {
        let mut registry: ModalRegistry = ModalRegistry::new();
        assert!(!registry.open().unwrap());
        assert!(!registry.close().unwrap());
        assert!(!registry.press_back_button().unwrap());
        assert!(registry.current().is_none());
    }

    #[test]
    fn facade_targets_last_mounted() {
        let mut registry = ModalRegistry::new();
        let first = registry.mount(modal());
        let second = registry.mount(modal());
        assert_eq!(registry.current(), Some(second));

        assert!(registry.open().unwrap());
        assert_eq!(registry.get(second).unwrap().state(), ModalState::Opening);
        assert_eq!(registry.get(first).unwrap().state(), ModalState::Closed);

        assert!(registry.unmount(second));
        assert_eq!(registry.current(), Some(first));
        assert!(registry.open().unwrap());
        assert_eq!(registry.get(first).unwrap().state(), ModalState::Opening);
    }

    #[test]
    fn ids_are_unique() {
        let mut registry = ModalRegistry::new();
        let a = registry.mount(modal());
        registry.unmount(a);
        let b = registry.mount(modal());
        assert_ne!(a, b);
        assert!(b.id() > a.id());
    }

    #[test]
    fn unknown_id_is_noop() {
        let mut registry = ModalRegistry::new();
        let id = registry.mount(modal());
        registry.unmount(id);
        assert!(!registry.unmount(id));
        assert!(!registry.open_id(id).unwrap());
        assert!(registry.get(id).is_none());
    }

    #[test]
    fn tick_advances_all() {
        let mut registry = ModalRegistry::new();
        let a = registry.mount(modal());
        let b = registry.mount(modal());
        registry.open_id(a).unwrap();
        registry.open_id(b).unwrap();
        registry.tick(SEC_1).unwrap();
        assert!(registry.iter().all(|(_, m)| m.state() == ModalState::Open));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn back_button_goes_to_topmost_consumer() {
        let mut registry = ModalRegistry::new();
        let config = ModalConfig::for_platform(Platform::Android)
            .start_open(true)
            .back_button_closes(true);
        let viewport = Viewport::new(800.0, 300.0);
        let lower = registry.mount(Modal::new(config.clone(), viewport).unwrap());
        let upper = registry.mount(Modal::new(config, viewport).unwrap());

        assert!(registry.press_back_button().unwrap());
        assert_eq!(registry.get(upper).unwrap().state(), ModalState::Closing);
        assert_eq!(registry.get(lower).unwrap().state(), ModalState::Open);

        assert!(registry.press_back_button().unwrap());
        assert_eq!(registry.get(lower).unwrap().state(), ModalState::Closing);
        assert!(!registry.press_back_button().unwrap());
    }
}
