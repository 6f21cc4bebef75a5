#![forbid(unsafe_code)]

//! Vertical geometry for sliding overlays.
//!
//! All values are logical pixels along the vertical axis, origin at the top of
//! the container. A modal is described by two y positions: where it rests when
//! open and where it hides when closed. Everything between is motion.
//!
//! # Invariants
//!
//! - `Layout::travel()` is never negative.
//! - `Layout::y_at_displacement` never leaves the segment `[rest_y, hidden_y]`.
//! - While the keyboard is visible, `rest_y >= keyboard_top_offset`.

/// Screen edge a modal slides in from and exits toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Edge {
    /// Enters from above, dismissed by swiping up.
    Top,
    /// Enters from below, dismissed by swiping down.
    #[default]
    Bottom,
}

impl Edge {
    /// Sign of a displacement that moves the modal toward this edge.
    ///
    /// `+1.0` for [`Edge::Bottom`] (y grows downward), `-1.0` for [`Edge::Top`].
    #[inline]
    pub const fn closing_sign(self) -> f64 {
        match self {
            Self::Top => -1.0,
            Self::Bottom => 1.0,
        }
    }
}

/// Resting placement of an open modal inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Placement {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Measured sizes reported by the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Height of the container the modal is laid out in.
    pub container_height: f64,
    /// Measured height of the modal itself.
    pub modal_height: f64,
    /// Height currently covered by the on-screen keyboard (0 when hidden).
    pub keyboard_height: f64,
}

impl Viewport {
    /// Create a viewport with no keyboard shown.
    #[inline]
    pub const fn new(container_height: f64, modal_height: f64) -> Self {
        Self {
            container_height,
            modal_height,
            keyboard_height: 0.0,
        }
    }

    /// Set the keyboard height.
    #[must_use]
    pub fn with_keyboard(mut self, keyboard_height: f64) -> Self {
        self.keyboard_height = keyboard_height;
        self
    }

    /// Whether the keyboard currently overlaps the container.
    #[inline]
    pub fn keyboard_visible(&self) -> bool {
        self.keyboard_height > 0.0
    }

    /// Container height left above the keyboard.
    #[inline]
    pub fn usable_height(&self) -> f64 {
        (self.container_height - self.keyboard_height.max(0.0)).max(0.0)
    }
}

/// Resolved resting and hidden positions for one modal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    rest_y: f64,
    hidden_y: f64,
    entry: Edge,
}

impl Layout {
    /// Resolve a layout from placement, entry edge and measured sizes.
    ///
    /// `keyboard_top_offset` only applies while the keyboard is visible: the
    /// modal is pushed up by the keyboard but never above that offset.
    pub fn resolve(
        viewport: Viewport,
        placement: Placement,
        entry: Edge,
        keyboard_top_offset: f64,
    ) -> Self {
        let modal_height = viewport.modal_height.max(0.0);
        let usable = viewport.usable_height();

        let mut rest_y = match placement {
            Placement::Top => 0.0,
            Placement::Center => (usable - modal_height) / 2.0,
            Placement::Bottom => usable - modal_height,
        };
        if viewport.keyboard_visible() && rest_y < keyboard_top_offset {
            rest_y = keyboard_top_offset;
        }

        let hidden_y = match entry {
            Edge::Top => -modal_height,
            Edge::Bottom => viewport.container_height.max(0.0),
        };

        Self {
            rest_y,
            hidden_y,
            entry,
        }
    }

    /// Y position of the fully open modal.
    #[inline]
    pub const fn rest_y(&self) -> f64 {
        self.rest_y
    }

    /// Y position of the fully hidden modal.
    #[inline]
    pub const fn hidden_y(&self) -> f64 {
        self.hidden_y
    }

    #[inline]
    pub const fn entry(&self) -> Edge {
        self.entry
    }

    /// Distance between the resting and hidden positions.
    #[inline]
    pub fn travel(&self) -> f64 {
        (self.hidden_y - self.rest_y).abs()
    }

    /// Signed displacement of `y` from rest, positive toward the entry edge.
    #[inline]
    pub fn displacement_of(&self, y: f64) -> f64 {
        (y - self.rest_y) * self.entry.closing_sign()
    }

    /// Y position for a closing-direction displacement.
    ///
    /// The displacement is clamped to `[0, travel]`: the modal can neither be
    /// pushed further open than its resting position nor past hidden.
    pub fn y_at_displacement(&self, displacement: f64) -> f64 {
        let d = if displacement.is_nan() {
            0.0
        } else {
            displacement.clamp(0.0, self.travel())
        };
        self.rest_y + d * self.entry.closing_sign()
    }

    /// Fraction of the modal still in its open position, in `[0.0, 1.0]`.
    pub fn visible_fraction(&self, y: f64) -> f64 {
        let travel = self.travel();
        if travel <= f64::EPSILON {
            return 1.0;
        }
        (1.0 - self.displacement_of(y) / travel).clamp(0.0, 1.0)
    }

    /// Fraction of the travel left between `y` and `target`, in `[0.0, 1.0]`.
    pub fn remaining_fraction(&self, y: f64, target: f64) -> f64 {
        let travel = self.travel();
        if travel <= f64::EPSILON {
            return 0.0;
        }
        ((target - y).abs() / travel).clamp(0.0, 1.0)
    }
}
