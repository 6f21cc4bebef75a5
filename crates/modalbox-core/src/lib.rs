#![forbid(unsafe_code)]

//! Core: geometry, animation driving, and drag tracking for sliding modals.
//!
//! # Role in modalbox
//! `modalbox-core` holds the collaborators the modal state machine talks to,
//! without any modal semantics of its own.
//!
//! # Primary responsibilities
//! - **Layout**: resting and hidden positions from placement, entry edge and
//!   measured sizes, including keyboard avoidance.
//! - **AnimationDriver**: cancelable, identity-checked position animations and
//!   a deterministic frame-pumped implementation.
//! - **GestureTracker**: displacement and velocity samples for a vertical drag
//!   that starts inside an activation band.
//!
//! # How it fits in the system
//! `modalbox` owns a driver and a tracker per mounted modal and feeds their
//! output through its controller. Nothing here keeps global state.

pub mod animation;
pub mod geometry;
pub mod gesture;

pub use animation::{
    AnimationDriver, AnimationEvent, AnimationHandle, Easing, FrameDriver, TimedDriver,
    scaled_duration,
};
pub use geometry::{Edge, Layout, Placement, Viewport};
pub use gesture::{GestureSample, GestureTracker, VelocityTracker};
