//! Scrollfx drives scroll-synchronized motion for a landing page.
//!
//! A page is described by a [`Scene`]: element boxes plus the motion components bound to them.
//!
//! - Load and validate a [`Scene`]
//! - Populate a [`Stage`] document and [`ViewBinding::mount`] the scene on it
//! - Feed host signals ([`Stage::scroll_to`], [`Stage::resize`], [`Stage::advance`]) and read
//!   the resulting [`Document`] state or its [`Mutation`] journal
//!
//! The motion components ([`ParallaxDriver`], [`RevealTrigger`], [`EnterTrigger`],
//! [`PulseController`], [`ExplosionIntro`]) are plain state machines and can be driven by any
//! host that implements [`Environment`] and [`Animator`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod host;
pub(crate) mod motion;
pub(crate) mod scene;
pub(crate) mod scroll;
pub(crate) mod view;

pub use crate::foundation::core::{ElementId, Millis, Rect, Viewport};
pub use crate::foundation::error::{ScrollFxError, ScrollFxResult};
pub use crate::foundation::random::{RandomSource, Rng64};

pub use crate::animation::ease::Ease;
pub use crate::animation::engine::{Animator, Tweener};
pub use crate::animation::props::{Lerp, Property, PropertySet};
pub use crate::animation::tween::TweenSpec;

pub use crate::host::document::{Change, Document, ElementState, Mutation};
pub use crate::host::events::{EventHub, EventKind, HostEvent, Subscription};
pub use crate::host::stage::{Environment, Stage, World};
pub use crate::host::timers::{TimerId, TimerQueue};

pub use crate::motion::enter::EnterTrigger;
pub use crate::motion::intro::{
    ExplosionConfig, ExplosionIntro, TextSplitter, WhitespaceSplitter, WordScatter,
};
pub use crate::motion::parallax::{Layer, LayerOffset, ParallaxDriver};
pub use crate::motion::pulse::PulseController;
pub use crate::motion::reveal::{RevealTarget, RevealTrigger, ScheduledReveal};

pub use crate::scene::config::Scene;
pub use crate::scene::model::ResizePolicy;
pub use crate::scroll::region::{Anchor, AnchorBase, Length, ScrollRegion, TriggerPos};
pub use crate::scroll::timeline::ScrubbedProgress;

pub use crate::view::binding::ViewBinding;
