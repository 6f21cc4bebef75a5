#![forbid(unsafe_code)]

//! Per-mount modal configuration.
//!
//! # Example
//!
//! ```ignore
//! let config = ModalConfig::for_platform(Platform::Android)
//!     .placement(Placement::Bottom)
//!     .swipe_threshold(80.0)
//!     .back_button_closes(true);
//! config.validate()?;
//! ```
//!
//! Geometry-affecting fields (`placement`, `entry`, `keyboard_top_offset`)
//! re-derive the layout when changed after mount. All other fields take effect
//! on the next transition.

use std::time::Duration;

use modalbox_core::{Easing, Edge, Placement};

use crate::error::ConfigError;
use crate::policy::DEFAULT_FLING_VELOCITY;

/// Host platform, used for back-button gating and keyboard defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Platform {
    Ios,
    Android,
    #[default]
    Other,
}

impl Platform {
    /// Platform this binary was compiled for.
    pub const fn current() -> Self {
        if cfg!(target_os = "ios") {
            Self::Ios
        } else if cfg!(target_os = "android") {
            Self::Android
        } else {
            Self::Other
        }
    }

    /// Whether the platform delivers hardware back-button events.
    #[inline]
    pub const fn has_back_button(self) -> bool {
        matches!(self, Self::Android)
    }

    /// Default space kept free above a keyboard-pushed modal (status bar).
    #[inline]
    pub const fn default_keyboard_top_offset(self) -> f64 {
        match self {
            Self::Ios => 22.0,
            Self::Android | Self::Other => 0.0,
        }
    }
}

/// Modal configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModalConfig {
    /// Where the open modal rests.
    pub placement: Placement,
    /// Edge the modal enters from and exits toward.
    pub entry: Edge,
    pub backdrop_enabled: bool,
    /// Backdrop opacity when fully open, in `[0.0, 1.0]`.
    pub backdrop_opacity: f32,
    pub backdrop_press_to_close: bool,
    pub swipe_to_close: bool,
    /// Release displacement (px) that completes a swipe close.
    pub swipe_threshold: f64,
    /// Height (px) of the band a swipe may start in. `None` = whole modal.
    pub swipe_area: Option<f64>,
    #[cfg_attr(feature = "serde", serde(with = "duration_ms"))]
    pub animation_duration: Duration,
    pub back_button_closes: bool,
    /// Mount already open, without animation or `on_open`.
    pub start_open: bool,
    /// Minimum y of a keyboard-pushed modal.
    pub keyboard_top_offset: f64,
    /// Masks gestures and backdrop presses. Programmatic calls still apply.
    pub is_disabled: bool,
    pub platform: Platform,
    pub open_easing: Easing,
    pub close_easing: Easing,
    /// Release velocity (px/ms) toward the entry edge that forces a close.
    pub fling_velocity: f64,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self::for_platform(Platform::current())
    }
}

impl ModalConfig {
    /// Create a new default configuration for the current platform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults for a specific platform.
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            placement: Placement::Center,
            entry: Edge::Bottom,
            backdrop_enabled: true,
            backdrop_opacity: 0.5,
            backdrop_press_to_close: true,
            swipe_to_close: true,
            swipe_threshold: 50.0,
            swipe_area: None,
            animation_duration: Duration::from_millis(400),
            back_button_closes: false,
            start_open: false,
            keyboard_top_offset: platform.default_keyboard_top_offset(),
            is_disabled: false,
            platform,
            open_easing: Easing::EaseOut,
            close_easing: Easing::EaseIn,
            fling_velocity: DEFAULT_FLING_VELOCITY,
        }
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn entry(mut self, entry: Edge) -> Self {
        self.entry = entry;
        self
    }

    pub fn backdrop(mut self, enabled: bool) -> Self {
        self.backdrop_enabled = enabled;
        self
    }

    pub fn backdrop_opacity(mut self, opacity: f32) -> Self {
        self.backdrop_opacity = opacity;
        self
    }

    pub fn backdrop_press_to_close(mut self, close: bool) -> Self {
        self.backdrop_press_to_close = close;
        self
    }

    pub fn swipe_to_close(mut self, swipe: bool) -> Self {
        self.swipe_to_close = swipe;
        self
    }

    pub fn swipe_threshold(mut self, px: f64) -> Self {
        self.swipe_threshold = px;
        self
    }

    pub fn swipe_area(mut self, px: f64) -> Self {
        self.swipe_area = Some(px);
        self
    }

    pub fn animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    pub fn back_button_closes(mut self, close: bool) -> Self {
        self.back_button_closes = close;
        self
    }

    pub fn start_open(mut self, open: bool) -> Self {
        self.start_open = open;
        self
    }

    pub fn keyboard_top_offset(mut self, px: f64) -> Self {
        self.keyboard_top_offset = px;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.is_disabled = disabled;
        self
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn open_easing(mut self, easing: Easing) -> Self {
        self.open_easing = easing;
        self
    }

    pub fn close_easing(mut self, easing: Easing) -> Self {
        self.close_easing = easing;
        self
    }

    pub fn fling_velocity(mut self, px_per_ms: f64) -> Self {
        self.fling_velocity = px_per_ms;
        self
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.backdrop_opacity.is_finite() || !(0.0..=1.0).contains(&self.backdrop_opacity) {
            return Err(ConfigError::BackdropOpacityOutOfRange(self.backdrop_opacity));
        }
        finite("swipe_threshold", self.swipe_threshold)?;
        if self.swipe_threshold < 0.0 {
            return Err(ConfigError::NegativeSwipeThreshold(self.swipe_threshold));
        }
        if let Some(area) = self.swipe_area {
            finite("swipe_area", area)?;
            if area <= 0.0 {
                return Err(ConfigError::NonPositiveSwipeArea(area));
            }
        }
        finite("keyboard_top_offset", self.keyboard_top_offset)?;
        finite("fling_velocity", self.fling_velocity)?;
        if self.fling_velocity <= 0.0 {
            return Err(ConfigError::NonPositiveFlingVelocity(self.fling_velocity));
        }
        Ok(())
    }

    /// Whether moving from `self` to `next` changes the resolved layout.
    pub fn affects_geometry(&self, next: &Self) -> bool {
        self.placement != next.placement
            || self.entry != next.entry
            || self.keyboard_top_offset != next.keyboard_top_offset
    }

    /// Whether back-button events should close this modal.
    #[inline]
    pub fn honors_back_button(&self) -> bool {
        self.back_button_closes && self.platform.has_back_button()
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFiniteValue { field })
    }
}

#[cfg(feature = "serde")]
mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
