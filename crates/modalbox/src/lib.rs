#![forbid(unsafe_code)]

//! Sliding modal overlay: state machine, swipe-to-close, and lifecycle hooks.
//!
//! # Role in modalbox
//! This crate turns host input (programmatic open/close, backdrop presses,
//! back-button presses, pointer drags, animation frames) into modal state
//! transitions and lifecycle events. Rendering is left to the host: read
//! [`ModalFrame`] each frame and draw the modal at `y` over a backdrop of
//! `backdrop_opacity`.
//!
//! # Layers
//! - [`ModalController`]: the pure state machine; returns [`ModalEvent`]s.
//! - [`Modal`]: a controller plus [`ModalCallbacks`]; runs hooks after each
//!   transition.
//! - [`ModalRegistry`]: owns mounted modals and provides the static-style
//!   `open` / `close` facade.
//!
//! # Example
//!
//! ```ignore
//! let mut modal = Modal::new(ModalConfig::default(), Viewport::new(800.0, 300.0))?
//!     .callbacks(ModalCallbacks::new().on_closed(|| {
//!         println!("closed");
//!         Ok(())
//!     }));
//! modal.open()?;
//! while modal.state().is_transitioning() {
//!     modal.tick(Duration::from_millis(16))?;
//! }
//! ```

pub mod callbacks;
pub mod config;
pub mod controller;
pub mod error;
pub mod modal;
pub mod policy;
pub mod registry;

pub use callbacks::ModalCallbacks;
pub use config::{ModalConfig, Platform};
pub use controller::{ModalController, ModalEvent, ModalFrame, ModalState};
pub use error::{BoxError, ConfigError, Hook, ModalError};
pub use modal::Modal;
pub use policy::{DEFAULT_FLING_VELOCITY, SwipeDecision, SwipeDecisionPolicy, decide};
pub use registry::{ModalId, ModalRegistry};

pub use modalbox_core::{
    AnimationDriver, AnimationEvent, AnimationHandle, Easing, Edge, FrameDriver, Layout,
    Placement, TimedDriver, Viewport,
};
