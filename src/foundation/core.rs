use crate::foundation::error::{ScrollFxError, ScrollFxResult};

pub use kurbo::Rect;

/// Handle to an element in a host [`crate::host::document::Document`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId(pub u32);

impl ElementId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Host time or duration in whole milliseconds.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    /// Zero milliseconds.
    pub const ZERO: Self = Self(0);

    /// Convert fractional seconds to milliseconds, rounding to nearest.
    ///
    /// Negative and non-finite inputs map to zero.
    pub fn from_secs_f64(secs: f64) -> Self {
        if !secs.is_finite() || secs <= 0.0 {
            return Self::ZERO;
        }
        Self((secs * 1000.0).round() as u64)
    }

    /// Saturating addition.
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Saturating subtraction.
    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Multiply by an integer step count.
    pub fn times(self, n: u64) -> Self {
        Self(self.0.saturating_mul(n))
    }
}

/// Visible viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels. Zero while the host cannot measure it yet.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a validated viewport with finite, non-negative dimensions.
    pub fn new(width: f64, height: f64) -> ScrollFxResult<Self> {
        if !width.is_finite() || width < 0.0 {
            return Err(ScrollFxError::validation(
                "Viewport width must be finite and >= 0",
            ));
        }
        if !height.is_finite() || height < 0.0 {
            return Err(ScrollFxError::validation(
                "Viewport height must be finite and >= 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// Return `true` when the width can be used as a divisor-derived scale input.
    pub fn is_measurable(self) -> bool {
        self.width.is_finite() && self.width > 0.0
    }

    /// Vertical midpoint in viewport coordinates.
    pub fn middle_y(self) -> f64 {
        self.height / 2.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
