use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Animatable numeric element properties.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Property {
    /// Horizontal translation in pixels.
    X,
    /// Vertical translation in pixels.
    Y,
    /// Vertical translation as a percentage of the element's own height.
    YPercent,
    /// Uniform scale factor.
    Scale,
    /// Opacity in `[0, 1]`.
    Opacity,
    /// Rotation around the horizontal axis, degrees.
    RotationX,
    /// Rotation around the vertical axis, degrees.
    RotationY,
    /// Depth translation in pixels.
    Z,
}

impl Property {
    /// Value an element reports before anything has been written.
    pub fn rest_value(self) -> f64 {
        match self {
            Self::Scale | Self::Opacity => 1.0,
            _ => 0.0,
        }
    }
}

/// Interpolation contract for animated values.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

/// Ordered set of property targets. Later writes to the same property replace earlier ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertySet {
    entries: SmallVec<[(Property, f64); 4]>,
}

impl PropertySet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`PropertySet::insert`].
    pub fn with(mut self, prop: Property, value: f64) -> Self {
        self.insert(prop, value);
        self
    }

    /// Insert or replace a property value.
    pub fn insert(&mut self, prop: Property, value: f64) {
        match self.entries.iter_mut().find(|(p, _)| *p == prop) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((prop, value)),
        }
    }

    /// Look up a property value.
    pub fn get(&self, prop: Property) -> Option<f64> {
        self.entries
            .iter()
            .find(|(p, _)| *p == prop)
            .map(|(_, v)| *v)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Property, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no property is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Property, f64)> for PropertySet {
    fn from_iter<I: IntoIterator<Item = (Property, f64)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (p, v) in iter {
            out.insert(p, v);
        }
        out
    }
}

impl From<&BTreeMap<Property, f64>> for PropertySet {
    fn from(map: &BTreeMap<Property, f64>) -> Self {
        map.iter().map(|(p, v)| (*p, *v)).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/props.rs"]
mod tests;
