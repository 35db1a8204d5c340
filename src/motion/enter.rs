use crate::{
    foundation::core::{Rect, Viewport},
    foundation::error::{ScrollFxError, ScrollFxResult},
    scroll::region::TriggerPos,
};

/// Fires when the scroll position crosses a start offset moving forward.
///
/// The first observation counts as a crossing when it is already past the start, so an element
/// that is on screen at mount still gets its enter action.
#[derive(Clone, Debug, PartialEq)]
pub struct EnterTrigger {
    start: f64,
    once: bool,
    last: Option<f64>,
    fired: u32,
}

impl EnterTrigger {
    /// Trigger at an absolute scroll offset.
    pub fn new(start: f64, once: bool) -> Self {
        Self {
            start,
            once,
            last: None,
            fired: 0,
        }
    }

    /// Trigger at the offset where `pos` is satisfied for an element laid out at `rect`.
    pub fn resolve(
        pos: &TriggerPos,
        rect: Rect,
        viewport: Viewport,
        once: bool,
    ) -> ScrollFxResult<Self> {
        let start = pos.scroll_offset(rect, viewport);
        if !start.is_finite() {
            return Err(ScrollFxError::trigger(format!(
                "enter position `{pos}` resolved to a non-finite offset"
            )));
        }
        Ok(Self::new(start, once))
    }

    /// Scroll offset that fires the trigger.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Move the start offset, e.g. after a layout change. Crossing state is kept.
    pub fn set_start(&mut self, start: f64) {
        self.start = start;
    }

    /// Number of times the trigger has fired.
    pub fn fire_count(&self) -> u32 {
        self.fired
    }

    /// `true` when a one-shot trigger has already fired.
    pub fn is_spent(&self) -> bool {
        self.once && self.fired > 0
    }

    /// Observe a scroll position. Returns `true` when the enter action should run.
    pub fn on_scroll(&mut self, y: f64) -> bool {
        let was_before = self.last.is_none_or(|l| l < self.start);
        self.last = Some(y);
        if self.is_spent() || !was_before || y < self.start {
            return false;
        }
        self.fired += 1;
        tracing::debug!(start = self.start, y, "enter trigger fired");
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/enter.rs"]
mod tests;
