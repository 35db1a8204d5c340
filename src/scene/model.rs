use crate::{
    animation::ease::Ease,
    animation::props::{Property, PropertySet},
    animation::tween::TweenSpec,
    foundation::core::{Millis, Rect},
    motion::intro::ExplosionConfig,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What the parallax driver does when the viewport changes size after mount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizePolicy {
    /// Keep the multiplier measured at mount.
    #[default]
    Ignore,
    /// Recompute the multiplier and scroll region from the new viewport.
    Remeasure,
}

pub(crate) const SCENE_VERSION: &str = "1";

fn default_version() -> String {
    SCENE_VERSION.to_owned()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SceneDef {
    #[serde(default = "default_version")]
    pub(crate) version: String,
    pub(crate) elements: Vec<ElementDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) parallax: Option<ParallaxDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) initial: Vec<InitialDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) reveal: Option<RevealDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) enter: Vec<EnterDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) pulse: Option<PulseDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) intro: Option<IntroDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ElementDef {
    pub(crate) name: String,
    pub(crate) rect: RectDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) parent: Option<String>,
}

/// Layout box as `[x0, y0, x1, y1]` or `{ "x0": .., "y0": .., "x1": .., "y1": .. }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct RectDef(pub(crate) [f64; 4]);

impl<'de> Deserialize<'de> for RectDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Arr([f64; 4]),
            Obj { x0: f64, y0: f64, x1: f64, y1: f64 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Arr(a) => Ok(Self(a)),
            Repr::Obj { x0, y0, x1, y1 } => Ok(Self([x0, y0, x1, y1])),
        }
    }
}

impl RectDef {
    pub(crate) fn rect(self) -> Rect {
        let [x0, y0, x1, y1] = self.0;
        Rect::new(x0, y0, x1, y1)
    }
}

fn default_start() -> String {
    "top top".to_owned()
}

fn default_end() -> String {
    "bottom top".to_owned()
}

fn default_reference_width() -> f64 {
    3260.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ParallaxDef {
    pub(crate) trigger: String,
    #[serde(default = "default_start")]
    pub(crate) start: String,
    #[serde(default = "default_end")]
    pub(crate) end: String,
    /// Catch-up time in seconds; 0 follows scroll directly.
    #[serde(default)]
    pub(crate) scrub: f64,
    #[serde(default = "default_reference_width")]
    pub(crate) reference_width: f64,
    #[serde(default)]
    pub(crate) resize: ResizePolicy,
    pub(crate) layers: Vec<LayerDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct LayerDef {
    pub(crate) element: String,
    pub(crate) distance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct InitialDef {
    pub(crate) targets: Vec<String>,
    pub(crate) props: BTreeMap<Property, f64>,
}

impl InitialDef {
    pub(crate) fn props(&self) -> PropertySet {
        PropertySet::from(&self.props)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TweenDef {
    pub(crate) targets: Vec<String>,
    pub(crate) to: BTreeMap<Property, f64>,
    /// Seconds.
    pub(crate) duration: f64,
    #[serde(default)]
    pub(crate) ease: Ease,
    /// Seconds.
    #[serde(default)]
    pub(crate) delay: f64,
    #[serde(default)]
    pub(crate) overwrite: bool,
}

impl TweenDef {
    pub(crate) fn spec(&self) -> TweenSpec {
        let mut spec = TweenSpec::to(
            PropertySet::from(&self.to),
            Millis::from_secs_f64(self.duration),
        )
        .ease(self.ease)
        .delay(Millis::from_secs_f64(self.delay));
        spec.overwrite = self.overwrite;
        spec
    }
}

fn default_stagger_ms() -> u64 {
    100
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RevealDef {
    pub(crate) targets: Vec<String>,
    #[serde(default = "default_stagger_ms")]
    pub(crate) stagger_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) class: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) tweens: Vec<TweenDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct EnterDef {
    pub(crate) trigger: String,
    pub(crate) start: String,
    #[serde(default)]
    pub(crate) once: bool,
    #[serde(default)]
    pub(crate) tweens: Vec<TweenDef>,
}

fn default_pause_class() -> String {
    "pause".to_owned()
}

fn default_min_secs() -> u32 {
    1
}

fn default_max_secs() -> u32 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct PulseDef {
    pub(crate) element: String,
    #[serde(default = "default_pause_class")]
    pub(crate) class: String,
    #[serde(default = "default_min_secs")]
    pub(crate) min_secs: u32,
    #[serde(default = "default_max_secs")]
    pub(crate) max_secs: u32,
}

fn default_intro_duration() -> f64 {
    1.5
}

fn default_intro_stagger() -> f64 {
    0.08
}

fn default_intro_depth() -> [f64; 2] {
    [-900.0, -300.0]
}

fn default_max_rotation() -> f64 {
    180.0
}

fn default_intro_ease() -> Ease {
    Ease::OutCubic
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct IntroDef {
    pub(crate) element: String,
    pub(crate) text: String,
    #[serde(default = "default_intro_duration")]
    pub(crate) duration: f64,
    #[serde(default = "default_intro_stagger")]
    pub(crate) stagger: f64,
    #[serde(default = "default_intro_depth")]
    pub(crate) depth: [f64; 2],
    #[serde(default = "default_max_rotation")]
    pub(crate) max_rotation: f64,
    #[serde(default = "default_intro_ease")]
    pub(crate) ease: Ease,
}

impl IntroDef {
    pub(crate) fn config(&self) -> ExplosionConfig {
        ExplosionConfig {
            duration: Millis::from_secs_f64(self.duration),
            stagger: Millis::from_secs_f64(self.stagger),
            depth: (self.depth[0], self.depth[1]),
            max_rotation: self.max_rotation,
            ease: self.ease,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
