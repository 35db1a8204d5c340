use crate::{
    animation::ease::Ease,
    animation::props::{Lerp, Property, PropertySet},
    foundation::core::{ElementId, Millis},
};

/// Description of one "animate these properties to these values" request.
#[derive(Clone, Debug, PartialEq)]
pub struct TweenSpec {
    /// Target values.
    pub props: PropertySet,
    /// Time from first frame to completion.
    pub duration: Millis,
    /// Easing applied to normalized progress.
    pub ease: Ease,
    /// Delay before the tween starts. Start values are captured when the delay elapses.
    pub delay: Millis,
    /// Kill every running tween on the same element, not only ones animating the same
    /// properties.
    pub overwrite: bool,
}

impl TweenSpec {
    /// Tween to `props` over `duration` with the default ease.
    pub fn to(props: PropertySet, duration: Millis) -> Self {
        Self {
            props,
            duration,
            ease: Ease::default(),
            delay: Millis::ZERO,
            overwrite: false,
        }
    }

    /// Replace the ease.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Replace the start delay.
    pub fn delay(mut self, delay: Millis) -> Self {
        self.delay = delay;
        self
    }
}

/// One property of one element being interpolated.
#[derive(Clone, Debug)]
pub(crate) struct ActiveTween {
    pub(crate) element: ElementId,
    pub(crate) prop: Property,
    /// Captured on the first tick at or after `start`.
    pub(crate) from: Option<f64>,
    pub(crate) to: f64,
    pub(crate) start: Millis,
    pub(crate) duration: Millis,
    pub(crate) ease: Ease,
}

impl ActiveTween {
    pub(crate) fn has_started(&self, now: Millis) -> bool {
        now >= self.start
    }

    /// Normalized linear progress at `now`, clamped to `[0, 1]`.
    pub(crate) fn progress(&self, now: Millis) -> f64 {
        if now < self.start {
            return 0.0;
        }
        if self.duration.0 == 0 {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start).0 as f64;
        (elapsed / self.duration.0 as f64).clamp(0.0, 1.0)
    }

    /// Eased value at `now`. Requires `from` to have been captured.
    pub(crate) fn sample(&self, now: Millis) -> Option<f64> {
        let from = self.from?;
        let t = self.ease.apply(self.progress(now));
        Some(f64::lerp(&from, &self.to, t))
    }

    pub(crate) fn is_finished(&self, now: Millis) -> bool {
        self.from.is_some() && self.progress(now) >= 1.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
