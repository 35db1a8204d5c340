use crate::{
    animation::props::Property,
    foundation::core::{ElementId, Millis, Rect},
};
use std::collections::{BTreeMap, BTreeSet};

/// Host-side state of one element.
#[derive(Clone, Debug)]
pub struct ElementState {
    name: String,
    rect: Rect,
    parent: Option<ElementId>,
    attached: bool,
    props: BTreeMap<Property, f64>,
    classes: BTreeSet<String>,
}

impl ElementState {
    /// Unique element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Layout box in page coordinates, before any animated transform.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Parent element, if any.
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// `false` once the element has been removed from the document.
    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

/// One observable change applied to the document.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Mutation {
    /// Host time of the change.
    pub at: Millis,
    /// Element name.
    pub element: String,
    /// What changed.
    pub change: Change,
}

/// Kind of document change.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Change {
    /// A property received a new value.
    Prop {
        /// Property written.
        prop: Property,
        /// New value.
        value: f64,
    },
    /// A class was added.
    AddClass {
        /// Class name.
        class: String,
    },
    /// A class was removed.
    RemoveClass {
        /// Class name.
        class: String,
    },
    /// The element was removed from the document.
    Detach,
}

/// Headless element tree with animated properties, classes, and a change journal.
///
/// Every write to a detached or unknown element is ignored and returns `false`.
///
/// The journal keeps every [`Mutation`] until [`Document::take_journal`] drains it, so a
/// long-running host should drain it periodically.
#[derive(Debug, Default)]
pub struct Document {
    elements: Vec<ElementState>,
    by_name: BTreeMap<String, ElementId>,
    journal: Vec<Mutation>,
    now: Millis,
}

impl Document {
    /// Empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root element. Reusing a name rebinds the name to the new element.
    pub fn insert(&mut self, name: impl Into<String>, rect: Rect) -> ElementId {
        self.insert_with_parent(name, rect, None)
    }

    /// Add an element under `parent`.
    pub fn insert_child(
        &mut self,
        parent: ElementId,
        name: impl Into<String>,
        rect: Rect,
    ) -> ElementId {
        self.insert_with_parent(name, rect, Some(parent))
    }

    fn insert_with_parent(
        &mut self,
        name: impl Into<String>,
        rect: Rect,
        parent: Option<ElementId>,
    ) -> ElementId {
        let name = name.into();
        let id = ElementId(self.elements.len() as u32);
        self.by_name.insert(name.clone(), id);
        self.elements.push(ElementState {
            name,
            rect,
            parent,
            attached: true,
            props: BTreeMap::new(),
            classes: BTreeSet::new(),
        });
        id
    }

    /// Find an attached element by name.
    pub fn lookup(&self, name: &str) -> Option<ElementId> {
        let id = *self.by_name.get(name)?;
        self.is_attached(id).then_some(id)
    }

    /// Borrow element state, attached or not.
    pub fn element(&self, id: ElementId) -> Option<&ElementState> {
        self.elements.get(id.index())
    }

    /// `true` when `id` exists and is attached.
    pub fn is_attached(&self, id: ElementId) -> bool {
        self.element(id).is_some_and(ElementState::is_attached)
    }

    /// Number of elements ever inserted.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// `true` when nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Page-space layout box of an attached element.
    pub fn rect(&self, id: ElementId) -> Option<Rect> {
        self.element(id).filter(|e| e.attached).map(|e| e.rect)
    }

    /// Current value of `prop`, falling back to its rest value. `None` when detached.
    pub fn prop(&self, id: ElementId, prop: Property) -> Option<f64> {
        let el = self.element(id).filter(|e| e.attached)?;
        Some(el.props.get(&prop).copied().unwrap_or(prop.rest_value()))
    }

    /// Write a property. Unchanged values are not journaled.
    pub fn set_prop(&mut self, id: ElementId, prop: Property, value: f64) -> bool {
        let now = self.now;
        let Some(el) = self.elements.get_mut(id.index()).filter(|e| e.attached) else {
            return false;
        };
        let prev = el.props.insert(prop, value);
        if prev.is_some_and(|p| p.to_bits() == value.to_bits()) {
            return true;
        }
        let element = el.name.clone();
        self.journal.push(Mutation {
            at: now,
            element,
            change: Change::Prop { prop, value },
        });
        true
    }

    /// `true` when the attached element carries `class`.
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.element(id)
            .is_some_and(|e| e.attached && e.classes.contains(class))
    }

    /// Add a class. Returns `false` for detached elements.
    pub fn add_class(&mut self, id: ElementId, class: &str) -> bool {
        let now = self.now;
        let Some(el) = self.elements.get_mut(id.index()).filter(|e| e.attached) else {
            return false;
        };
        if el.classes.insert(class.to_owned()) {
            let element = el.name.clone();
            self.journal.push(Mutation {
                at: now,
                element,
                change: Change::AddClass {
                    class: class.to_owned(),
                },
            });
        }
        true
    }

    /// Remove a class. Returns `false` for detached elements.
    pub fn remove_class(&mut self, id: ElementId, class: &str) -> bool {
        let now = self.now;
        let Some(el) = self.elements.get_mut(id.index()).filter(|e| e.attached) else {
            return false;
        };
        if el.classes.remove(class) {
            let element = el.name.clone();
            self.journal.push(Mutation {
                at: now,
                element,
                change: Change::RemoveClass {
                    class: class.to_owned(),
                },
            });
        }
        true
    }

    /// Remove an element and all of its descendants.
    pub fn detach(&mut self, id: ElementId) {
        if !self.is_attached(id) {
            return;
        }
        let mut doomed = vec![id];
        let mut i = 0;
        while i < doomed.len() {
            let parent = doomed[i];
            doomed.extend(
                self.elements
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.attached && e.parent == Some(parent))
                    .map(|(idx, _)| ElementId(idx as u32)),
            );
            i += 1;
        }
        for id in doomed {
            let el = &mut self.elements[id.index()];
            if !el.attached {
                continue;
            }
            el.attached = false;
            let element = el.name.clone();
            self.journal.push(Mutation {
                at: self.now,
                element,
                change: Change::Detach,
            });
        }
    }

    /// Attached children of `parent`, in insertion order.
    pub fn children(&self, parent: ElementId) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.attached && e.parent == Some(parent))
            .map(|(idx, _)| ElementId(idx as u32))
            .collect()
    }

    /// Changes recorded so far.
    pub fn journal(&self) -> &[Mutation] {
        &self.journal
    }

    /// Drain the change journal.
    pub fn take_journal(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.journal)
    }

    pub(crate) fn set_now(&mut self, now: Millis) {
        self.now = now;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/document.rs"]
mod tests;
