//! Scroll-progress to per-layer vertical offsets.
//!
//! Offsets scale with `viewport_width / reference_width`, so a layout authored at the reference
//! width keeps its proportions on narrower or wider screens.

use crate::foundation::core::{ElementId, Viewport};

/// One parallax layer: an element and its offset at full progress on a reference-width screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layer {
    /// Element moved by this layer.
    pub element: ElementId,
    /// Baseline translation distance at the reference width.
    pub distance: f64,
}

/// Computed offset for one layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerOffset {
    /// Layer element.
    pub element: ElementId,
    /// Vertical offset in pixels.
    pub offset: f64,
}

/// Maps scroll progress to layer offsets.
///
/// Until a usable viewport width has been measured the driver produces no offsets.
#[derive(Clone, Debug)]
pub struct ParallaxDriver {
    reference_width: f64,
    layers: Vec<Layer>,
    multiplier: Option<f64>,
}

impl ParallaxDriver {
    /// Driver for `layers` authored at `reference_width`.
    pub fn new(reference_width: f64, layers: Vec<Layer>) -> Self {
        Self {
            reference_width,
            layers,
            multiplier: None,
        }
    }

    /// Registered layers.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Current width multiplier, if measured.
    pub fn multiplier(&self) -> Option<f64> {
        self.multiplier
    }

    /// Compute the multiplier from the viewport width.
    ///
    /// An unmeasurable viewport or reference width leaves the previous state untouched and
    /// returns `None`.
    pub fn measure(&mut self, viewport: Viewport) -> Option<f64> {
        let reference_ok = self.reference_width.is_finite() && self.reference_width > 0.0;
        if !viewport.is_measurable() || !reference_ok {
            tracing::debug!(
                viewport_width = viewport.width,
                reference_width = self.reference_width,
                "parallax width not measurable yet"
            );
            return None;
        }
        let m = viewport.width / self.reference_width;
        self.multiplier = Some(m);
        Some(m)
    }

    /// Measure only if no multiplier has been computed yet. Returns `true` when measured.
    pub fn ensure_measured(&mut self, viewport: Viewport) -> bool {
        self.multiplier.is_some() || self.measure(viewport).is_some()
    }

    /// Offset of `layer` at full progress.
    pub fn target_offset(&self, layer: &Layer) -> Option<f64> {
        self.multiplier.map(|m| layer.distance * m)
    }

    /// Offsets for every layer at `progress` (clamped to `[0, 1]`). Empty until measured.
    pub fn offsets(&self, progress: f64) -> Vec<LayerOffset> {
        let Some(m) = self.multiplier else {
            return Vec::new();
        };
        let p = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.layers
            .iter()
            .map(|l| LayerOffset {
                element: l.element,
                offset: p * l.distance * m,
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/parallax.rs"]
mod tests;
