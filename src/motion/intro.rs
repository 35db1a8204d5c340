//! Word-explosion intro: words start scattered in depth and rotation, then settle to rest.

use crate::{
    animation::ease::Ease,
    animation::props::{Property, PropertySet},
    animation::tween::TweenSpec,
    foundation::core::Millis,
    foundation::random::RandomSource,
};

/// Splits a text block into ordered words.
pub trait TextSplitter {
    /// Words of `text`, in reading order.
    fn split(&self, text: &str) -> Vec<String>;
}

/// Splits on Unicode whitespace and drops empty pieces.
#[derive(Clone, Copy, Debug, Default)]
pub struct WhitespaceSplitter;

impl TextSplitter for WhitespaceSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_owned).collect()
    }
}

/// Explosion parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExplosionConfig {
    /// Settle duration per word.
    pub duration: Millis,
    /// Extra delay per word index.
    pub stagger: Millis,
    /// Range of the initial `z` offset.
    pub depth: (f64, f64),
    /// Initial rotations are drawn from `[-max_rotation, max_rotation]` degrees.
    pub max_rotation: f64,
    /// Settle easing.
    pub ease: Ease,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            duration: Millis(1500),
            stagger: Millis(80),
            depth: (-900.0, -300.0),
            max_rotation: 180.0,
            ease: Ease::OutCubic,
        }
    }
}

/// Initial state and settle tween for one word.
#[derive(Clone, Debug, PartialEq)]
pub struct WordScatter {
    /// Word text.
    pub word: String,
    /// Position in the text.
    pub index: usize,
    /// Scattered starting properties.
    pub start: PropertySet,
    /// Tween back to rest.
    pub settle: TweenSpec,
}

/// Plans the explosion for a text block.
#[derive(Clone, Debug, Default)]
pub struct ExplosionIntro {
    config: ExplosionConfig,
}

impl ExplosionIntro {
    /// Intro with explicit parameters.
    pub fn new(config: ExplosionConfig) -> Self {
        Self { config }
    }

    /// Parameters in use.
    pub fn config(&self) -> &ExplosionConfig {
        &self.config
    }

    /// Properties every word ends at.
    pub fn rest() -> PropertySet {
        PropertySet::new()
            .with(Property::Opacity, 1.0)
            .with(Property::Z, 0.0)
            .with(Property::RotationX, 0.0)
            .with(Property::RotationY, 0.0)
    }

    /// Split `text` and draw a scatter for every word.
    ///
    /// Draw order is fixed (z, then rotation x, then rotation y, per word) so a seeded source
    /// always yields the same plan.
    pub fn plan(
        &self,
        text: &str,
        splitter: &dyn TextSplitter,
        rng: &mut dyn RandomSource,
    ) -> Vec<WordScatter> {
        let (lo, hi) = self.config.depth;
        let (lo, hi) = (lo.min(hi), lo.max(hi));
        let rot = self.config.max_rotation.abs();
        splitter
            .split(text)
            .into_iter()
            .enumerate()
            .map(|(index, word)| {
                let start = PropertySet::new()
                    .with(Property::Opacity, 0.0)
                    .with(Property::Z, rng.range_f64(lo, hi))
                    .with(Property::RotationX, rng.range_f64(-rot, rot))
                    .with(Property::RotationY, rng.range_f64(-rot, rot));
                let settle = TweenSpec::to(Self::rest(), self.config.duration)
                    .ease(self.config.ease)
                    .delay(self.config.stagger.times(index as u64));
                WordScatter {
                    word,
                    index,
                    start,
                    settle,
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/intro.rs"]
mod tests;
