use crate::{
    animation::engine::Animator,
    animation::props::{Property, PropertySet},
    animation::tween::TweenSpec,
    foundation::core::{ElementId, Millis},
    foundation::error::ScrollFxResult,
    foundation::random::RandomSource,
    host::events::{EventKind, HostEvent, Subscription},
    host::stage::{Environment, Stage, World},
    host::timers::TimerId,
    motion::enter::EnterTrigger,
    motion::intro::{ExplosionIntro, TextSplitter, WhitespaceSplitter},
    motion::parallax::{Layer, ParallaxDriver},
    motion::pulse::PulseController,
    motion::reveal::RevealTrigger,
    scene::config::Scene,
    scene::model::{ResizePolicy, TweenDef},
    scroll::region::{ScrollRegion, TriggerPos},
    scroll::timeline::ScrubbedProgress,
};
use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

type Tweens = Rc<[(ElementId, TweenSpec)]>;

struct ParallaxRuntime {
    driver: ParallaxDriver,
    trigger: ElementId,
    start: TriggerPos,
    end: TriggerPos,
    region: ScrollRegion,
    scrub: ScrubbedProgress,
    resize: ResizePolicy,
}

impl ParallaxRuntime {
    fn resolve_region(&mut self, world: &World) {
        match world.document().rect(self.trigger) {
            Some(rect) => {
                self.region = ScrollRegion::resolve(&self.start, &self.end, rect, world.viewport());
            }
            None => tracing::debug!("parallax trigger detached; keeping previous region"),
        }
    }

    fn apply(&self, world: &mut World) {
        for o in self.driver.offsets(self.scrub.value()) {
            world.set(o.element, &PropertySet::new().with(Property::Y, o.offset));
        }
    }

    fn on_scroll(&mut self, world: &mut World) {
        let newly_measured =
            self.driver.multiplier().is_none() && self.driver.ensure_measured(world.viewport());
        self.scrub
            .set_target(self.region.progress(world.scroll_y()));
        if newly_measured || !self.scrub.is_settling() {
            self.apply(world);
        }
    }

    fn on_frame(&mut self, dt: Millis, world: &mut World) {
        if self.scrub.step(dt).is_some() {
            self.apply(world);
        }
    }

    fn on_resize(&mut self, world: &mut World) {
        let viewport = world.viewport();
        match self.resize {
            ResizePolicy::Ignore => {
                if self.driver.multiplier().is_none() && self.driver.ensure_measured(viewport) {
                    self.apply(world);
                }
            }
            ResizePolicy::Remeasure => {
                self.driver.measure(viewport);
                self.resolve_region(world);
                self.scrub.snap(self.region.progress(world.scroll_y()));
                self.apply(world);
            }
        }
    }
}

struct RevealRuntime {
    trigger: RevealTrigger,
    class: Option<Rc<str>>,
    tweens: Tweens,
}

struct EnterRuntime {
    trigger: EnterTrigger,
    element: ElementId,
    pos: TriggerPos,
    tweens: Tweens,
}

struct PulseRuntime {
    controller: PulseController,
    element: ElementId,
    class: Rc<str>,
}

struct Shared {
    parallax: Option<ParallaxRuntime>,
    reveal: Option<RevealRuntime>,
    enters: Vec<EnterRuntime>,
    pulse: Option<PulseRuntime>,
    timers: Vec<TimerId>,
    animated: BTreeSet<ElementId>,
    created: Vec<ElementId>,
    rng: Box<dyn RandomSource>,
}

impl Shared {
    fn track_timer(&mut self, world: &World, id: TimerId) {
        self.timers.retain(|t| world.timers().is_pending(*t));
        self.timers.push(id);
    }

    fn on_scroll(&mut self, world: &mut World, alive: &Rc<Cell<bool>>) {
        if let Some(p) = &mut self.parallax {
            p.on_scroll(world);
        }

        let y = world.scroll_y();
        for e in &mut self.enters {
            if e.trigger.on_scroll(y) {
                run_tweens(world, &e.tweens);
            }
        }

        let Some(reveal) = &mut self.reveal else {
            return;
        };
        let scheduled = reveal.trigger.on_scroll(&*world);
        let mut ids = Vec::with_capacity(scheduled.len());
        for r in scheduled {
            let alive = Rc::clone(alive);
            let class = reveal.class.clone();
            let tweens = Rc::clone(&reveal.tweens);
            let element = r.element;
            ids.push(world.schedule(r.delay, move |world: &mut World| {
                if !alive.get() || !world.document().is_attached(element) {
                    tracing::debug!(?element, "reveal target gone; skipping");
                    return;
                }
                if let Some(class) = &class {
                    world.document_mut().add_class(element, class);
                }
                run_tweens(world, &tweens);
            }));
        }
        for id in ids {
            self.track_timer(world, id);
        }
    }

    fn on_resize(&mut self, world: &mut World) {
        if let Some(p) = &mut self.parallax {
            p.on_resize(world);
        }
        let remeasure = self
            .parallax
            .as_ref()
            .is_some_and(|p| p.resize == ResizePolicy::Remeasure);
        if remeasure {
            for e in &mut self.enters {
                if let Some(rect) = world.document().rect(e.element) {
                    e.trigger
                        .set_start(e.pos.scroll_offset(rect, world.viewport()));
                }
            }
        }
    }

    fn on_iteration(
        &mut self,
        element: ElementId,
        world: &mut World,
        alive: &Rc<Cell<bool>>,
        me: &Weak<RefCell<Shared>>,
    ) {
        let Some(pulse) = &mut self.pulse else {
            return;
        };
        if pulse.element != element {
            return;
        }
        let Some(pause) = pulse.controller.on_iteration(self.rng.as_mut()) else {
            return;
        };
        world.document_mut().add_class(element, &pulse.class);
        let alive = Rc::clone(alive);
        let me = Weak::clone(me);
        let class = Rc::clone(&pulse.class);
        let id = world.schedule(pause, move |world: &mut World| {
            if !alive.get() {
                return;
            }
            if let Some(shared) = me.upgrade()
                && let Some(p) = &mut shared.borrow_mut().pulse
            {
                p.controller.resume();
            }
            world.document_mut().remove_class(element, &class);
        });
        self.track_timer(world, id);
    }
}

fn run_tweens(world: &mut World, tweens: &[(ElementId, TweenSpec)]) {
    for (element, spec) in tweens {
        world.to(*element, spec);
    }
}

/// Live wiring between one [`Scene`] and a [`Stage`].
///
/// Created by [`ViewBinding::mount`]. Dropping the binding unsubscribes every listener and turns
/// pending callbacks into no-ops; [`ViewBinding::dispose`] additionally cancels those callbacks,
/// stops running tweens and removes elements the binding created.
pub struct ViewBinding {
    subscriptions: Vec<Subscription>,
    shared: Rc<RefCell<Shared>>,
    alive: Rc<Cell<bool>>,
}

impl std::fmt::Debug for ViewBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewBinding")
            .field("subscriptions", &self.subscriptions.len())
            .field("alive", &self.alive.get())
            .finish_non_exhaustive()
    }
}

impl ViewBinding {
    /// Attach `scene` to the elements already present in `stage`'s document.
    ///
    /// Names that do not resolve to an attached element are skipped. Only malformed trigger
    /// positions fail; call [`Scene::validate`] first to catch every other problem up front.
    ///
    /// Intro text is split on whitespace; use [`ViewBinding::mount_with_splitter`] to supply a
    /// different [`TextSplitter`].
    pub fn mount(
        stage: &mut Stage,
        scene: &Scene,
        rng: impl RandomSource + 'static,
    ) -> ScrollFxResult<Self> {
        Self::mount_with_splitter(stage, scene, rng, &WhitespaceSplitter)
    }

    /// Like [`ViewBinding::mount`], splitting intro text with `splitter`.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn mount_with_splitter(
        stage: &mut Stage,
        scene: &Scene,
        rng: impl RandomSource + 'static,
        splitter: &dyn TextSplitter,
    ) -> ScrollFxResult<Self> {
        let def = scene.def();
        let world = stage.world_mut();
        let lookup = |world: &World, name: &str| {
            let id = world.document().lookup(name);
            if id.is_none() {
                tracing::debug!(name, "element not attached; skipping");
            }
            id
        };
        let resolve_tweens = |world: &World, tweens: &[TweenDef]| -> Tweens {
            tweens
                .iter()
                .flat_map(|t| {
                    let spec = t.spec();
                    t.targets
                        .iter()
                        .filter_map(|n| lookup(world, n))
                        .map(move |id| (id, spec.clone()))
                        .collect::<Vec<_>>()
                })
                .collect()
        };
        let mut animated = BTreeSet::new();

        for init in &def.initial {
            let props = init.props();
            for name in &init.targets {
                if let Some(id) = lookup(world, name) {
                    world.set(id, &props);
                    animated.insert(id);
                }
            }
        }

        let mut parallax = None;
        if let Some(p) = &def.parallax {
            let start: TriggerPos = p.start.parse()?;
            let end: TriggerPos = p.end.parse()?;
            if let Some(trigger) = lookup(world, &p.trigger) {
                let layers: Vec<Layer> = p
                    .layers
                    .iter()
                    .filter_map(|l| {
                        lookup(world, &l.element).map(|element| Layer {
                            element,
                            distance: l.distance,
                        })
                    })
                    .collect();
                animated.extend(layers.iter().map(|l| l.element));
                let mut rt = ParallaxRuntime {
                    driver: ParallaxDriver::new(p.reference_width, layers),
                    trigger,
                    start,
                    end,
                    region: ScrollRegion::new(0.0, 0.0),
                    scrub: ScrubbedProgress::new(Millis::from_secs_f64(p.scrub)),
                    resize: p.resize,
                };
                rt.driver.measure(world.viewport());
                rt.resolve_region(world);
                rt.scrub.snap(rt.region.progress(world.scroll_y()));
                rt.apply(world);
                parallax = Some(rt);
            }
        }

        let reveal = def.reveal.as_ref().map(|r| {
            let slots: Vec<Option<ElementId>> =
                r.targets.iter().map(|n| lookup(world, n)).collect();
            let tweens = resolve_tweens(world, &r.tweens);
            animated.extend(tweens.iter().map(|(id, _)| *id));
            RevealRuntime {
                trigger: RevealTrigger::with_slots(slots, Millis(r.stagger_ms)),
                class: r.class.as_deref().map(Rc::from),
                tweens,
            }
        });

        let mut enters = Vec::new();
        for e in &def.enter {
            let pos: TriggerPos = e.start.parse()?;
            let Some(element) = lookup(world, &e.trigger) else {
                continue;
            };
            let Some(rect) = world.document().rect(element) else {
                continue;
            };
            let mut trigger = EnterTrigger::resolve(&pos, rect, world.viewport(), e.once)?;
            let tweens = resolve_tweens(world, &e.tweens);
            animated.extend(tweens.iter().map(|(id, _)| *id));
            if trigger.on_scroll(world.scroll_y()) {
                run_tweens(world, &tweens);
            }
            enters.push(EnterRuntime {
                trigger,
                element,
                pos,
                tweens,
            });
        }

        let pulse = def.pulse.as_ref().and_then(|p| {
            lookup(world, &p.element).map(|element| PulseRuntime {
                controller: PulseController::new(p.min_secs, p.max_secs),
                element,
                class: Rc::from(p.class.as_str()),
            })
        });

        let mut rng: Box<dyn RandomSource> = Box::new(rng);
        let mut created = Vec::new();
        if let Some(i) = &def.intro
            && let Some(container) = lookup(world, &i.element)
            && let Some(rect) = world.document().rect(container)
        {
            let container_name = i.element.as_str();
            let plan = ExplosionIntro::new(i.config()).plan(&i.text, splitter, rng.as_mut());
            for word in plan {
                let id = world.document_mut().insert_child(
                    container,
                    format!("{container_name}/word-{}", word.index),
                    rect,
                );
                world.set(id, &word.start);
                world.to(id, &word.settle);
                created.push(id);
            }
            animated.extend(created.iter().copied());
            tracing::debug!(words = created.len(), "explosion intro started");
        }

        let wants_scroll = parallax.is_some() || reveal.is_some() || !enters.is_empty();
        let wants_frame = parallax.is_some();
        let wants_resize = parallax.is_some();
        let wants_iteration = pulse.is_some();

        let shared = Rc::new(RefCell::new(Shared {
            parallax,
            reveal,
            enters,
            pulse,
            timers: Vec::new(),
            animated,
            created,
            rng,
        }));
        let alive = Rc::new(Cell::new(true));
        let mut subscriptions = Vec::new();

        if wants_scroll {
            let shared = Rc::clone(&shared);
            let alive = Rc::clone(&alive);
            subscriptions.push(stage.subscribe(EventKind::Scroll, move |_, world| {
                shared.borrow_mut().on_scroll(world, &alive);
            }));
        }
        if wants_frame {
            let shared = Rc::clone(&shared);
            subscriptions.push(stage.subscribe(EventKind::Frame, move |event, world| {
                if let HostEvent::Frame { dt, .. } = event
                    && let Some(p) = &mut shared.borrow_mut().parallax
                {
                    p.on_frame(*dt, world);
                }
            }));
        }
        if wants_resize {
            let shared = Rc::clone(&shared);
            subscriptions.push(stage.subscribe(EventKind::Resize, move |_, world| {
                shared.borrow_mut().on_resize(world);
            }));
        }
        if wants_iteration {
            let me = Rc::downgrade(&shared);
            let alive = Rc::clone(&alive);
            subscriptions.push(stage.subscribe(
                EventKind::AnimationIteration,
                move |event, world| {
                    let HostEvent::AnimationIteration { element } = event else {
                        return;
                    };
                    if let Some(shared) = me.upgrade() {
                        shared
                            .borrow_mut()
                            .on_iteration(*element, world, &alive, &me);
                    }
                },
            ));
        }

        tracing::debug!(listeners = subscriptions.len(), "view mounted");
        Ok(Self {
            subscriptions,
            shared,
            alive,
        })
    }

    /// `false` once the binding has been disposed.
    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    /// Number of host listeners held.
    pub fn listener_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Parallax width multiplier, once measured.
    pub fn parallax_multiplier(&self) -> Option<f64> {
        self.shared
            .borrow()
            .parallax
            .as_ref()
            .and_then(|p| p.driver.multiplier())
    }

    /// Displayed parallax progress.
    pub fn parallax_progress(&self) -> Option<f64> {
        self.shared
            .borrow()
            .parallax
            .as_ref()
            .map(|p| p.scrub.value())
    }

    /// Reveal targets that have not fired yet.
    pub fn pending_reveals(&self) -> usize {
        self.shared
            .borrow()
            .reveal
            .as_ref()
            .map_or(0, |r| r.trigger.pending())
    }

    /// Elements this binding inserted into the document.
    pub fn created_elements(&self) -> Vec<ElementId> {
        self.shared.borrow().created.clone()
    }

    /// Tear down: unsubscribe, cancel owned timers, stop tweens, detach created elements.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn dispose(mut self, stage: &mut Stage) {
        self.alive.set(false);
        self.subscriptions.clear();
        let world = stage.world_mut();
        let mut shared = self.shared.borrow_mut();
        let cancelled = shared
            .timers
            .drain(..)
            .filter(|id| world.cancel_timer(*id))
            .count();
        for el in &shared.animated {
            world.kill(*el);
        }
        for el in shared.created.drain(..) {
            world.document_mut().detach(el);
        }
        tracing::debug!(cancelled, "view disposed");
    }
}

impl Drop for ViewBinding {
    fn drop(&mut self) {
        self.alive.set(false);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/binding.rs"]
mod tests;
