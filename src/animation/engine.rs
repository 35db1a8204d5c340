use crate::{
    animation::props::PropertySet,
    animation::tween::{ActiveTween, TweenSpec},
    foundation::core::{ElementId, Millis},
    host::document::Document,
};

/// Tweening engine contract used by every motion component.
///
/// Implementations must treat unknown or detached elements as a no-op.
pub trait Animator {
    /// Write `props` immediately, cancelling running tweens on the same properties.
    fn set(&mut self, element: ElementId, props: &PropertySet);
    /// Animate `element` toward `tween.props`.
    fn to(&mut self, element: ElementId, tween: &TweenSpec);
    /// Stop every running tween on `element`, leaving current values in place.
    fn kill(&mut self, element: ElementId);
}

/// Reference tween engine ticking [`ActiveTween`]s into a [`Document`].
#[derive(Debug, Default)]
pub struct Tweener {
    active: Vec<ActiveTween>,
}

impl Tweener {
    /// Create an idle engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of property tweens still running or waiting on a delay.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// `true` when nothing is running.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// `true` when `element` has a running or pending tween.
    pub fn is_animating(&self, element: ElementId) -> bool {
        self.active.iter().any(|t| t.element == element)
    }

    pub(crate) fn start(&mut self, now: Millis, element: ElementId, spec: &TweenSpec) {
        if spec.overwrite {
            self.kill(element);
        }
        let start = now.saturating_add(spec.delay);
        for (prop, to) in spec.props.iter() {
            self.active
                .retain(|t| !(t.element == element && t.prop == prop));
            self.active.push(ActiveTween {
                element,
                prop,
                from: None,
                to,
                start,
                duration: spec.duration,
                ease: spec.ease,
            });
        }
    }

    pub(crate) fn cancel_props(&mut self, element: ElementId, props: &PropertySet) {
        self.active
            .retain(|t| !(t.element == element && props.get(t.prop).is_some()));
    }

    pub(crate) fn kill(&mut self, element: ElementId) {
        self.active.retain(|t| t.element != element);
    }

    /// Advance every tween to `now`, writing interpolated values and dropping finished ones.
    pub(crate) fn tick(&mut self, now: Millis, doc: &mut Document) {
        self.active.retain_mut(|t| {
            if !doc.is_attached(t.element) {
                return false;
            }
            if !t.has_started(now) {
                return true;
            }
            if t.from.is_none() {
                t.from = doc.prop(t.element, t.prop);
            }
            if let Some(v) = t.sample(now) {
                doc.set_prop(t.element, t.prop, v);
            }
            !t.is_finished(now)
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/engine.rs"]
mod tests;
