//! `scrollfx-std` provides ready-made scenes on top of the `scrollfx` JSON-first API.
//!
//! The landing page ships in two variants over the same engine: a plain one, and one that adds
//! a word-explosion intro over the hero.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use serde_json::{Value, json};

/// Width the landing-page parallax distances were authored at.
pub const REFERENCE_WIDTH: f64 = 3260.0;

/// Parallax layers of the hero section: element name and distance at the reference width.
pub const HERO_LAYERS: [(&str, f64); 7] = [
    ("contents", 273.0),
    ("mountains", 370.0),
    ("cliff", 555.0),
    ("forest", 240.0),
    ("grass", -250.0),
    ("rocks", -110.0),
    ("logo-wrap", 860.0),
];

/// Characters of the about-section title, revealed one after another.
pub const TITLE_CHARS: [char; 5] = ['A', 'b', 'o', 'u', 't'];

/// Text scattered by the explosion intro.
pub const INTRO_TEXT: &str = "Discover the untamed wild";

/// Landing-page flavour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LandingVariant {
    /// Parallax, reveals, image zoom, and logo pulse.
    #[default]
    Plain,
    /// Everything in [`LandingVariant::Plain`] plus the word-explosion intro.
    Explosion,
}

impl LandingVariant {
    /// Every variant.
    pub const ALL: [Self; 2] = [Self::Plain, Self::Explosion];

    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Explosion => "explosion",
        }
    }
}

impl std::str::FromStr for LandingVariant {
    type Err = scrollfx::ScrollFxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.name() == s)
            .ok_or_else(|| scrollfx::ScrollFxError::validation(format!("unknown variant '{s}'")))
    }
}

fn char_name(i: usize, c: char) -> String {
    format!("char-{i}-{c}")
}

fn elements(variant: LandingVariant) -> Vec<Value> {
    let hero = [0.0, 0.0, 1630.0, 1000.0];
    let mut out = vec![json!({ "name": "hero", "rect": hero })];
    for (name, _) in HERO_LAYERS {
        let parent = if name == "logo-wrap" { "contents" } else { "hero" };
        let rect = if name == "logo-wrap" {
            [615.0, 180.0, 1015.0, 420.0]
        } else {
            hero
        };
        out.push(json!({ "name": name, "rect": rect, "parent": parent }));
    }
    if variant == LandingVariant::Explosion {
        out.push(json!({ "name": "intro-title", "rect": [215.0, 440.0, 1415.0, 560.0], "parent": "hero" }));
    }

    out.push(json!({ "name": "about", "rect": [0.0, 1000.0, 1630.0, 2000.0] }));
    out.push(json!({ "name": "title-wrap", "rect": [415.0, 1300.0, 1215.0, 1420.0], "parent": "about" }));
    out.push(json!({ "name": "line-before", "rect": [415.0, 1359.0, 615.0, 1361.0], "parent": "title-wrap" }));
    out.push(json!({ "name": "line-after", "rect": [1015.0, 1359.0, 1215.0, 1361.0], "parent": "title-wrap" }));
    for (i, c) in TITLE_CHARS.iter().enumerate() {
        let x0 = 665.0 + 60.0 * i as f64;
        out.push(json!({
            "name": char_name(i, *c),
            "rect": [x0, 1310.0, x0 + 60.0, 1410.0],
            "parent": "title-wrap"
        }));
    }

    out.push(json!({ "name": "gallery", "rect": [0.0, 2000.0, 1630.0, 3200.0] }));
    out.push(json!({ "name": "image", "rect": [315.0, 2200.0, 1315.0, 2900.0], "parent": "gallery" }));
    out.push(json!({ "name": "leaves-top", "rect": [215.0, 2100.0, 1415.0, 2400.0], "parent": "gallery" }));
    out.push(json!({ "name": "leaves-bottom", "rect": [215.0, 2700.0, 1415.0, 3000.0], "parent": "gallery" }));
    out
}

/// Build the landing-page scene as a `serde_json::Value`.
pub fn landing_page_value(variant: LandingVariant) -> Value {
    let layers: Vec<Value> = HERO_LAYERS
        .iter()
        .map(|(element, distance)| json!({ "element": element, "distance": distance }))
        .collect();
    let chars: Vec<String> = TITLE_CHARS
        .iter()
        .enumerate()
        .map(|(i, c)| char_name(i, *c))
        .collect();

    let mut scene = json!({
        "version": "1",
        "elements": elements(variant),
        "parallax": {
            "trigger": "hero",
            "start": "top top",
            "end": "bottom top",
            "scrub": 1.0,
            "reference_width": REFERENCE_WIDTH,
            "resize": "ignore",
            "layers": layers
        },
        "initial": [
            { "targets": ["line-before"], "props": { "opacity": 0.0, "x": -100.0 } },
            { "targets": ["line-after"], "props": { "opacity": 0.0, "x": 100.0 } },
            { "targets": ["image"], "props": { "scale": 1.0 } },
            { "targets": ["leaves-bottom"], "props": { "yPercent": -10.0 } }
        ],
        "reveal": {
            "targets": chars,
            "stagger_ms": 100,
            "class": "animate",
            "tweens": [{
                "targets": ["line-before", "line-after"],
                "to": { "opacity": 1.0, "x": 0.0 },
                "duration": 1.0,
                "ease": "power1.inOut"
            }]
        },
        "enter": [{
            "trigger": "image",
            "start": "center-=30% center",
            "once": false,
            "tweens": [
                { "targets": ["leaves-top"], "to": { "yPercent": -20.0 }, "duration": 0.9 },
                { "targets": ["leaves-bottom"], "to": { "yPercent": 35.0 }, "duration": 0.9 },
                { "targets": ["image"], "to": { "scale": 0.89 }, "duration": 1.2 }
            ]
        }],
        "pulse": { "element": "logo-wrap", "class": "pause", "min_secs": 1, "max_secs": 10 }
    });

    if variant == LandingVariant::Explosion {
        scene["intro"] = json!({
            "element": "intro-title",
            "text": INTRO_TEXT,
            "duration": 1.5,
            "stagger": 0.08,
            "depth": [-900.0, -300.0],
            "max_rotation": 180.0,
            "ease": "power2.out"
        });
    }
    scene
}

/// Build and parse the landing-page scene into a [`scrollfx::Scene`].
pub fn landing_page(variant: LandingVariant) -> scrollfx::ScrollFxResult<scrollfx::Scene> {
    scrollfx::Scene::from_value(landing_page_value(variant))
}
