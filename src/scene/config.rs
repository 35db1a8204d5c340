use crate::{
    foundation::core::{ElementId, Rect},
    foundation::error::{ScrollFxError, ScrollFxResult},
    host::document::Document,
    motion::pulse::PulseController,
    scene::model::{SCENE_VERSION, SceneDef, TweenDef},
    scroll::region::TriggerPos,
};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Scene boundary object.
///
/// The JSON-facing description of one page: its element layout and which motion components
/// drive which elements. Load it, [`Scene::validate`] it, [`Scene::populate`] a document from
/// it, then mount it with [`crate::ViewBinding::mount`].
#[derive(Debug, Clone)]
pub struct Scene {
    def: SceneDef,
}

impl Scene {
    /// Parse a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrollFxResult<Self> {
        let def: SceneDef = serde_json::from_reader(r)
            .map_err(|e| ScrollFxError::serde(format!("parse scene JSON: {e}")))?;
        Ok(Self { def })
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollFxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrollFxError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Build a scene from an in-memory JSON value.
    pub fn from_value(value: serde_json::Value) -> ScrollFxResult<Self> {
        let def: SceneDef = serde_json::from_value(value)
            .map_err(|e| ScrollFxError::serde(format!("parse scene JSON: {e}")))?;
        Ok(Self { def })
    }

    /// Serialize back to JSON.
    pub fn to_value(&self) -> ScrollFxResult<serde_json::Value> {
        serde_json::to_value(&self.def)
            .map_err(|e| ScrollFxError::serde(format!("serialize scene JSON: {e}")))
    }

    /// Schema version string.
    pub fn version(&self) -> &str {
        &self.def.version
    }

    /// Declared element names, in declaration order.
    pub fn element_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.def.elements.iter().map(|e| e.name.as_str())
    }

    /// Page-space layout box of a declared element.
    pub fn element_rect(&self, name: &str) -> Option<Rect> {
        self.def
            .elements
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.rect.rect())
    }

    /// Check structural invariants and every element reference.
    pub fn validate(&self) -> ScrollFxResult<()> {
        let def = &self.def;
        if def.version != SCENE_VERSION {
            return Err(ScrollFxError::validation(format!(
                "unsupported scene version '{}' (expected '{SCENE_VERSION}')",
                def.version
            )));
        }

        let mut names = BTreeSet::new();
        for el in &def.elements {
            if el.name.trim().is_empty() {
                return Err(ScrollFxError::validation("element name must be non-empty"));
            }
            if !el.rect.0.iter().all(|v| v.is_finite()) {
                return Err(ScrollFxError::validation(format!(
                    "element '{}' rect must be finite",
                    el.name
                )));
            }
            let [x0, y0, x1, y1] = el.rect.0;
            if x1 < x0 || y1 < y0 {
                return Err(ScrollFxError::validation(format!(
                    "element '{}' rect must have x1 >= x0 and y1 >= y0",
                    el.name
                )));
            }
            if let Some(parent) = &el.parent
                && !names.contains(parent.as_str())
            {
                return Err(ScrollFxError::validation(format!(
                    "element '{}' parent '{parent}' must be declared before it",
                    el.name
                )));
            }
            if !names.insert(el.name.as_str()) {
                return Err(ScrollFxError::validation(format!(
                    "duplicate element name '{}'",
                    el.name
                )));
            }
        }
        let known = |what: &str, name: &str| -> ScrollFxResult<()> {
            if names.contains(name) {
                Ok(())
            } else {
                Err(ScrollFxError::validation(format!(
                    "{what} references unknown element '{name}'"
                )))
            }
        };

        if let Some(p) = &def.parallax {
            known("parallax trigger", &p.trigger)?;
            p.start.parse::<TriggerPos>()?;
            p.end.parse::<TriggerPos>()?;
            if !p.scrub.is_finite() || p.scrub < 0.0 {
                return Err(ScrollFxError::validation(
                    "parallax scrub must be finite and >= 0",
                ));
            }
            if !p.reference_width.is_finite() || p.reference_width <= 0.0 {
                return Err(ScrollFxError::validation(
                    "parallax reference_width must be finite and > 0",
                ));
            }
            for layer in &p.layers {
                known("parallax layer", &layer.element)?;
                if !layer.distance.is_finite() {
                    return Err(ScrollFxError::validation(format!(
                        "parallax layer '{}' distance must be finite",
                        layer.element
                    )));
                }
            }
        }

        for init in &def.initial {
            for t in &init.targets {
                known("initial state", t)?;
            }
            if init.props.values().any(|v| !v.is_finite()) {
                return Err(ScrollFxError::validation(
                    "initial state values must be finite",
                ));
            }
        }

        if let Some(r) = &def.reveal {
            for t in &r.targets {
                known("reveal", t)?;
            }
            if r.class.as_deref().is_some_and(|c| c.trim().is_empty()) {
                return Err(ScrollFxError::validation("reveal class must be non-empty"));
            }
            validate_tweens(&r.tweens, &known)?;
        }

        for e in &def.enter {
            known("enter trigger", &e.trigger)?;
            e.start.parse::<TriggerPos>()?;
            validate_tweens(&e.tweens, &known)?;
        }

        if let Some(p) = &def.pulse {
            known("pulse", &p.element)?;
            if p.class.trim().is_empty() {
                return Err(ScrollFxError::validation("pulse class must be non-empty"));
            }
            if p.min_secs > p.max_secs {
                return Err(ScrollFxError::validation(
                    "pulse min_secs must be <= max_secs",
                ));
            }
            if p.max_secs > PulseController::MAX_PAUSE_SECS {
                return Err(ScrollFxError::validation(format!(
                    "pulse max_secs must be <= {}",
                    PulseController::MAX_PAUSE_SECS
                )));
            }
        }

        if let Some(i) = &def.intro {
            known("intro", &i.element)?;
            if i.text.trim().is_empty() {
                return Err(ScrollFxError::validation("intro text must be non-empty"));
            }
            for (what, v) in [("duration", i.duration), ("stagger", i.stagger)] {
                if !v.is_finite() || v < 0.0 {
                    return Err(ScrollFxError::validation(format!(
                        "intro {what} must be finite and >= 0"
                    )));
                }
            }
            if !i.depth.iter().all(|v| v.is_finite()) || !i.max_rotation.is_finite() {
                return Err(ScrollFxError::validation(
                    "intro depth and max_rotation must be finite",
                ));
            }
        }

        Ok(())
    }

    /// Insert every declared element into `doc`, parents before children.
    ///
    /// Returns the handle assigned to each name.
    pub fn populate(&self, doc: &mut Document) -> BTreeMap<String, ElementId> {
        let mut ids = BTreeMap::new();
        for el in &self.def.elements {
            let rect = el.rect.rect();
            let parent = el.parent.as_ref().and_then(|p| ids.get(p).copied());
            let id = match parent {
                Some(parent) => doc.insert_child(parent, el.name.clone(), rect),
                None => doc.insert(el.name.clone(), rect),
            };
            ids.insert(el.name.clone(), id);
        }
        tracing::debug!(elements = ids.len(), "scene populated");
        ids
    }

    pub(crate) fn def(&self) -> &SceneDef {
        &self.def
    }
}

fn validate_tweens(
    tweens: &[TweenDef],
    known: &dyn Fn(&str, &str) -> ScrollFxResult<()>,
) -> ScrollFxResult<()> {
    for tw in tweens {
        for t in &tw.targets {
            known("tween", t)?;
        }
        if tw.to.is_empty() {
            return Err(ScrollFxError::validation("tween must animate at least one property"));
        }
        if tw.to.values().any(|v| !v.is_finite()) {
            return Err(ScrollFxError::validation("tween values must be finite"));
        }
        for (what, v) in [("duration", tw.duration), ("delay", tw.delay)] {
            if !v.is_finite() || v < 0.0 {
                return Err(ScrollFxError::validation(format!(
                    "tween {what} must be finite and >= 0"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
