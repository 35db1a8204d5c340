use crate::{
    animation::engine::{Animator, Tweener},
    animation::props::PropertySet,
    animation::tween::TweenSpec,
    foundation::core::{ElementId, Millis, Rect, Viewport},
    host::document::Document,
    host::events::{EventHub, EventKind, HostEvent, Subscription},
    host::timers::{TimerId, TimerQueue},
};

/// Read-only view of the host environment.
pub trait Environment {
    /// Current viewport size.
    fn viewport(&self) -> Viewport;
    /// Current vertical scroll position.
    fn scroll_y(&self) -> f64;
    /// Current host time.
    fn now(&self) -> Millis;
    /// Element box relative to the viewport, `None` when unknown or detached.
    fn bounding_rect(&self, element: ElementId) -> Option<Rect>;
}

/// Everything a listener or timer callback may read or mutate.
#[derive(Debug)]
pub struct World {
    document: Document,
    viewport: Viewport,
    scroll_y: f64,
    now: Millis,
    timers: TimerQueue,
    tweens: Tweener,
}

impl World {
    fn new(viewport: Viewport) -> Self {
        Self {
            document: Document::new(),
            viewport,
            scroll_y: 0.0,
            now: Millis::ZERO,
            timers: TimerQueue::default(),
            tweens: Tweener::new(),
        }
    }

    /// Borrow the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutably borrow the document.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Pending timers.
    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    /// Running tweens.
    pub fn tweens(&self) -> &Tweener {
        &self.tweens
    }

    /// Run `callback` once, `delay` from now.
    pub fn schedule<F>(&mut self, delay: Millis, callback: F) -> TimerId
    where
        F: FnOnce(&mut World) + 'static,
    {
        let due = self.now.saturating_add(delay);
        self.timers.schedule(due, Box::new(callback))
    }

    /// Cancel a pending callback.
    pub fn cancel_timer(&mut self, id: TimerId) -> bool {
        self.timers.cancel(id)
    }

    fn set_now(&mut self, now: Millis) {
        self.now = now;
        self.document.set_now(now);
    }
}

impl Environment for World {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn now(&self) -> Millis {
        self.now
    }

    fn bounding_rect(&self, element: ElementId) -> Option<Rect> {
        let r = self.document.rect(element)?;
        Some(Rect::new(
            r.x0,
            r.y0 - self.scroll_y,
            r.x1,
            r.y1 - self.scroll_y,
        ))
    }
}

impl Animator for World {
    fn set(&mut self, element: ElementId, props: &PropertySet) {
        self.tweens.cancel_props(element, props);
        for (prop, value) in props.iter() {
            self.document.set_prop(element, prop, value);
        }
    }

    fn to(&mut self, element: ElementId, tween: &TweenSpec) {
        self.tweens.start(self.now, element, tween);
        self.tweens.tick(self.now, &mut self.document);
    }

    fn kill(&mut self, element: ElementId) {
        self.tweens.kill(element);
    }
}

/// Headless host: a document, a viewport, a clock, timers, tweens, and event dispatch.
///
/// Time only moves through [`Stage::advance`], which makes playback fully deterministic.
#[derive(Debug)]
pub struct Stage {
    world: World,
    hub: EventHub,
    frame: Millis,
}

impl Stage {
    /// Default frame length.
    pub const DEFAULT_FRAME: Millis = Millis(16);

    /// Guard against callbacks that keep rescheduling themselves with zero delay.
    const MAX_TIMER_ROUNDS: usize = 64;

    /// Create a stage with an empty document.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            world: World::new(viewport),
            hub: EventHub::new(),
            frame: Self::DEFAULT_FRAME,
        }
    }

    /// Override the frame length used by [`Stage::advance`]. Zero is treated as one millisecond.
    pub fn with_frame(mut self, frame: Millis) -> Self {
        self.frame = Millis(frame.0.max(1));
        self
    }

    /// Borrow the world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutably borrow the world.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Borrow the document.
    pub fn document(&self) -> &Document {
        &self.world.document
    }

    /// Mutably borrow the document.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.world.document
    }

    /// Borrow the event hub.
    pub fn hub(&self) -> &EventHub {
        &self.hub
    }

    /// Register a listener. See [`EventHub::subscribe`].
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, kind: EventKind, listener: F) -> Subscription
    where
        F: FnMut(&HostEvent, &mut World) + 'static,
    {
        self.hub.subscribe(kind, listener)
    }

    /// Current host time.
    pub fn now(&self) -> Millis {
        self.world.now
    }

    /// Current scroll position.
    pub fn scroll_y(&self) -> f64 {
        self.world.scroll_y
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.world.viewport
    }

    /// Scroll to `y` (clamped at 0) and dispatch a scroll event. Non-finite input is ignored.
    pub fn scroll_to(&mut self, y: f64) {
        if !y.is_finite() {
            tracing::debug!(y, "ignoring non-finite scroll position");
            return;
        }
        let y = y.max(0.0);
        self.world.scroll_y = y;
        self.dispatch(HostEvent::Scroll { y });
        self.run_due_timers();
    }

    /// Change the viewport and dispatch a resize event.
    pub fn resize(&mut self, viewport: Viewport) {
        self.world.viewport = viewport;
        self.dispatch(HostEvent::Resize { viewport });
        self.run_due_timers();
    }

    /// Report one iteration of a looping CSS animation on `element`.
    pub fn animation_iteration(&mut self, element: ElementId) {
        self.dispatch(HostEvent::AnimationIteration { element });
        self.run_due_timers();
    }

    /// Advance host time by `dt`.
    ///
    /// Time moves in frame-sized steps, shortened so every timer fires exactly at its due time.
    /// Each step fires due timers, ticks tweens, then dispatches a frame event.
    pub fn advance(&mut self, dt: Millis) {
        let target = self.world.now.saturating_add(dt);
        self.run_due_timers();
        while self.world.now < target {
            let now = self.world.now;
            let mut step = self.frame.min(target.saturating_sub(now));
            if let Some(due) = self.world.timers.next_due()
                && due > now
            {
                step = step.min(due.saturating_sub(now));
            }
            let now = now.saturating_add(step);
            self.world.set_now(now);
            self.run_due_timers();
            self.world.tweens.tick(now, &mut self.world.document);
            self.dispatch(HostEvent::Frame { now, dt: step });
            self.run_due_timers();
        }
    }

    fn dispatch(&mut self, event: HostEvent) {
        tracing::trace!(?event, listeners = self.hub.listener_count(event.kind()), "dispatch");
        self.hub.dispatch(&event, &mut self.world);
    }

    fn run_due_timers(&mut self) {
        for _ in 0..Self::MAX_TIMER_ROUNDS {
            let due = self.world.timers.take_due(self.world.now);
            if due.is_empty() {
                return;
            }
            for (id, callback) in due {
                tracing::trace!(?id, now = self.world.now.0, "timer fired");
                callback(&mut self.world);
            }
        }
        tracing::debug!("zero-delay timer chain cut short");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/stage.rs"]
mod tests;
