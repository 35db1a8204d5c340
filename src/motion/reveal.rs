use crate::foundation::core::{ElementId, Millis};
use crate::host::stage::Environment;

/// One registered reveal element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealTarget {
    /// Element handle; `None` when the element was never attached.
    pub element: Option<ElementId>,
    /// Position in the registered sequence; determines the stagger delay.
    pub index: usize,
    triggered: bool,
}

impl RevealTarget {
    /// `true` once the reveal has been scheduled.
    pub fn is_triggered(&self) -> bool {
        self.triggered
    }
}

/// A reveal that became eligible during a scroll pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledReveal {
    /// Element to reveal.
    pub element: ElementId,
    /// Registration index.
    pub index: usize,
    /// Delay before the reveal action runs.
    pub delay: Millis,
}

/// One-shot reveals fired when an element's vertical middle passes above the viewport middle.
#[derive(Clone, Debug)]
pub struct RevealTrigger {
    targets: Vec<RevealTarget>,
    stagger: Millis,
}

impl RevealTrigger {
    /// Delay added per registration index.
    pub const DEFAULT_STAGGER: Millis = Millis(100);

    /// Register attached elements in order.
    pub fn new(elements: impl IntoIterator<Item = ElementId>, stagger: Millis) -> Self {
        Self::with_slots(elements.into_iter().map(Some), stagger)
    }

    /// Register element slots in order. Empty slots keep their index but never fire.
    pub fn with_slots(
        slots: impl IntoIterator<Item = Option<ElementId>>,
        stagger: Millis,
    ) -> Self {
        let targets = slots
            .into_iter()
            .enumerate()
            .map(|(index, element)| RevealTarget {
                element,
                index,
                triggered: false,
            })
            .collect();
        Self { targets, stagger }
    }

    /// Registered targets in order.
    pub fn targets(&self) -> &[RevealTarget] {
        &self.targets
    }

    /// Number of targets that have not fired yet.
    pub fn pending(&self) -> usize {
        self.targets.iter().filter(|t| !t.triggered).count()
    }

    /// Evaluate every untriggered target against the current scroll state.
    ///
    /// Targets that qualify are marked triggered before this returns, so later passes during the
    /// stagger window never schedule them again.
    pub fn on_scroll(&mut self, env: &impl Environment) -> Vec<ScheduledReveal> {
        let viewport_middle = env.viewport().middle_y();
        let mut out = Vec::new();
        for target in self.targets.iter_mut().filter(|t| !t.triggered) {
            let Some(element) = target.element else {
                continue;
            };
            let Some(rect) = env.bounding_rect(element) else {
                continue;
            };
            let element_middle = rect.y0 + rect.height() / 2.0;
            if element_middle - viewport_middle < 0.0 {
                target.triggered = true;
                out.push(ScheduledReveal {
                    element,
                    index: target.index,
                    delay: self.stagger.times(target.index as u64),
                });
            }
        }
        if !out.is_empty() {
            tracing::debug!(count = out.len(), "reveals scheduled");
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/reveal.rs"]
mod tests;
