//! Core types for spark-focus.
//!
//! Handles, flags and the colour type shared by the widget tree and the
//! focus manager.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// ViewId
// =============================================================================

/// Handle to a view in a [`ViewTree`](crate::engine::ViewTree).
///
/// Handles are generational: when a view is released its slot may be reused,
/// but the generation is bumped, so an old handle never resolves to the new
/// occupant. The focus manager only ever stores these handles, never the
/// widgets themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId {
    index: u32,
    generation: u32,
}

impl ViewId {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Arena slot of this handle.
    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Generation the slot had when this handle was issued.
    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}:{}", self.index, self.generation)
    }
}

// =============================================================================
// View flags (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Per-view behaviour flags.
    ///
    /// Combine with bitwise OR: `ViewFlags::FOCUSABLE | ViewFlags::VISIBLE`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ViewFlags: u8 {
        const NONE = 0;
        /// Can hold keyboard focus.
        const FOCUSABLE = 1 << 0;
        /// Groups its descendants for focus history.
        const FOCUS_ROOT = 1 << 1;
        /// Receives mouse events from hit testing.
        const MOUSE_OPAQUE = 1 << 2;
        const VISIBLE = 1 << 3;
    }
}

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Alpha 255 = fully opaque, 0 = fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Default keyboard focus highlight.
    pub const FOCUS_DEFAULT: Self = Self::rgb(81, 152, 213);

    /// Linear interpolation between `from` and `to`.
    ///
    /// `t` is clamped to `[0, 1]`; `t == 0` yields `from`, `t == 1` yields `to`.
    pub fn lerp(from: Self, to: Self, t: f32) -> Self {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |a: u8, b: u8| -> u8 {
            let v = a as f32 + (b as f32 - a as f32) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Self {
            r: mix(from.r, to.r),
            g: mix(from.g, to.g),
            b: mix(from.b, to.b),
            a: mix(from.a, to.a),
        }
    }

    /// Multiply the alpha channel by `factor` (clamped to `[0, 1]`).
    pub fn scale_alpha(self, factor: f32) -> Self {
        let factor = if factor.is_nan() { 0.0 } else { factor.clamp(0.0, 1.0) };
        Self {
            a: (self.a as f32 * factor).round() as u8,
            ..self
        }
    }
}
