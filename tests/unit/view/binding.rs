use super::*;
use crate::foundation::core::{Rect, Viewport};
use crate::foundation::random::Rng64;
use crate::host::document::Change;
use serde_json::json;

struct Fixed(f64);

impl RandomSource for Fixed {
    fn next_f64(&mut self) -> f64 {
        self.0
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn scene_json(scrub: f64) -> serde_json::Value {
    json!({
        "elements": [
            {"name": "hero", "rect": [0, 0, 1630, 1000]},
            {"name": "mountains", "rect": [0, 0, 1630, 1000], "parent": "hero"},
            {"name": "logo-wrap", "rect": [700, 200, 900, 400], "parent": "hero"},
            {"name": "line-before", "rect": [0, 1400, 200, 1402]},
            {"name": "char-0", "rect": [300, 1500, 340, 1600]},
            {"name": "char-1", "rect": [340, 1500, 380, 1600]},
            {"name": "char-2", "rect": [380, 1500, 420, 1600]},
            {"name": "image", "rect": [0, 2000, 800, 2600]}
        ],
        "parallax": {
            "trigger": "hero", "scrub": scrub, "reference_width": 3260,
            "layers": [
                {"element": "mountains", "distance": 370},
                {"element": "logo-wrap", "distance": 860}
            ]
        },
        "initial": [
            {"targets": ["line-before"], "props": {"opacity": 0, "x": -100}},
            {"targets": ["image"], "props": {"scale": 1}}
        ],
        "reveal": {
            "targets": ["char-0", "char-1", "char-2"], "class": "animate",
            "tweens": [{"targets": ["line-before"], "to": {"opacity": 1, "x": 0},
                        "duration": 1.0, "ease": "power1.inOut"}]
        },
        "enter": [{"trigger": "image", "start": "center-=30% center",
                   "tweens": [{"targets": ["image"], "to": {"scale": 0.89}, "duration": 1.2}]}],
        "pulse": {"element": "logo-wrap", "class": "pause", "min_secs": 1, "max_secs": 10}
    })
}

fn setup(scrub: f64, width: f64) -> (Stage, ViewBinding) {
    let scene = Scene::from_value(scene_json(scrub)).unwrap();
    scene.validate().unwrap();
    let mut stage = Stage::new(Viewport::new(width, 900.0).unwrap());
    scene.populate(stage.document_mut());
    let binding = ViewBinding::mount(&mut stage, &scene, Fixed(0.0)).unwrap();
    (stage, binding)
}

fn id(stage: &Stage, name: &str) -> ElementId {
    stage.document().lookup(name).unwrap()
}

fn prop(stage: &Stage, name: &str, p: Property) -> f64 {
    stage.document().prop(id(stage, name), p).unwrap()
}

#[test]
fn mount_applies_initial_state() {
    let (stage, binding) = setup(0.0, 1630.0);
    assert_eq!(prop(&stage, "line-before", Property::Opacity), 0.0);
    assert_eq!(prop(&stage, "line-before", Property::X), -100.0);
    assert_eq!(binding.parallax_multiplier(), Some(0.5));
    assert_eq!(binding.parallax_progress(), Some(0.0));
    assert_eq!(binding.listener_count(), 4);
    assert_eq!(binding.pending_reveals(), 3);
}

#[test]
fn unscrubbed_parallax_follows_scroll() {
    let (mut stage, _binding) = setup(0.0, 1630.0);
    stage.scroll_to(500.0);
    assert!(approx(prop(&stage, "mountains", Property::Y), 92.5));
    assert!(approx(prop(&stage, "logo-wrap", Property::Y), 215.0));
    stage.scroll_to(5000.0);
    assert!(approx(prop(&stage, "mountains", Property::Y), 185.0));
}

#[test]
fn scrubbed_parallax_catches_up_over_lag() {
    let (mut stage, binding) = setup(1.0, 1630.0);
    stage.scroll_to(500.0);
    assert_eq!(prop(&stage, "mountains", Property::Y), 0.0);
    stage.advance(Millis(400));
    let mid = prop(&stage, "mountains", Property::Y);
    assert!(mid > 0.0 && mid < 92.5, "{mid}");
    stage.advance(Millis(600));
    assert!(approx(prop(&stage, "mountains", Property::Y), 92.5));
    assert_eq!(binding.parallax_progress(), Some(0.5));
}

#[test]
fn reveals_are_staggered_and_run_tweens() {
    let (mut stage, binding) = setup(0.0, 1630.0);
    stage.scroll_to(1200.0);
    assert_eq!(binding.pending_reveals(), 0);
    assert!(stage.document().has_class(id(&stage, "char-0"), "animate"));
    assert!(!stage.document().has_class(id(&stage, "char-1"), "animate"));
    stage.advance(Millis(100));
    assert!(stage.document().has_class(id(&stage, "char-1"), "animate"));
    assert!(!stage.document().has_class(id(&stage, "char-2"), "animate"));
    stage.advance(Millis(100));
    assert!(stage.document().has_class(id(&stage, "char-2"), "animate"));

    stage.advance(Millis(1200));
    assert!(approx(prop(&stage, "line-before", Property::Opacity), 1.0));
    assert!(approx(prop(&stage, "line-before", Property::X), 0.0));
}

#[test]
fn reveal_of_removed_element_is_a_noop() {
    let (mut stage, _binding) = setup(0.0, 1630.0);
    stage.scroll_to(1200.0);
    let c2 = id(&stage, "char-2");
    let line = id(&stage, "line-before");
    stage.document_mut().detach(c2);

    // char-1 restarts the line tween at 100 ms, so it settles on the 1108 ms frame.
    // A reveal for char-2 would restart it at 200 ms and keep it running past 1110 ms.
    stage.advance(Millis(1150));
    assert!(stage.document().has_class(id(&stage, "char-1"), "animate"));
    assert!(!stage.world().tweens().is_animating(line));
    let journal = stage.document().journal();
    assert!(
        !journal
            .iter()
            .any(|m| m.element == "char-2" && matches!(m.change, Change::AddClass { .. }))
    );
    assert!(
        journal
            .iter()
            .filter(|m| m.element == "line-before")
            .all(|m| m.at < Millis(1110)),
        "line tween ran past the last live reveal"
    );
    assert!(approx(prop(&stage, "line-before", Property::Opacity), 1.0));
}

#[test]
fn enter_trigger_zooms_image_on_crossing() {
    let (mut stage, _binding) = setup(0.0, 1630.0);
    stage.scroll_to(1600.0);
    stage.advance(Millis(1500));
    assert_eq!(prop(&stage, "image", Property::Scale), 1.0);
    // start = 2000 + 300 - 180 - 450
    stage.scroll_to(1670.0);
    stage.advance(Millis(1200));
    assert!(approx(prop(&stage, "image", Property::Scale), 0.89));
}

#[test]
fn pulse_pauses_then_resumes() {
    let (mut stage, _binding) = setup(0.0, 1630.0);
    let logo = id(&stage, "logo-wrap");
    stage.animation_iteration(logo);
    assert!(stage.document().has_class(logo, "pause"));
    stage.animation_iteration(logo);
    assert_eq!(stage.world().timers().len(), 1);
    stage.advance(Millis(999));
    assert!(stage.document().has_class(logo, "pause"));
    stage.advance(Millis(1));
    assert!(!stage.document().has_class(logo, "pause"));
    // resumed: the next iteration pauses again
    stage.animation_iteration(logo);
    assert!(stage.document().has_class(logo, "pause"));
    // other elements are ignored
    stage.animation_iteration(id(&stage, "image"));
    assert!(!stage.document().has_class(id(&stage, "image"), "pause"));
}

#[test]
fn zero_width_defers_measurement() {
    let (mut stage, binding) = setup(0.0, 0.0);
    assert_eq!(binding.parallax_multiplier(), None);
    stage.scroll_to(500.0);
    assert_eq!(prop(&stage, "mountains", Property::Y), 0.0);

    stage.resize(Viewport::new(1630.0, 900.0).unwrap());
    assert_eq!(binding.parallax_multiplier(), Some(0.5));
    assert!(approx(prop(&stage, "mountains", Property::Y), 92.5));
}

#[test]
fn resize_is_ignored_by_default() {
    let (mut stage, binding) = setup(0.0, 1630.0);
    stage.resize(Viewport::new(3260.0, 900.0).unwrap());
    assert_eq!(binding.parallax_multiplier(), Some(0.5));
}

#[test]
fn remeasure_policy_tracks_width() {
    let mut v = scene_json(0.0);
    v["parallax"]["resize"] = json!("remeasure");
    let scene = Scene::from_value(v).unwrap();
    let mut stage = Stage::new(Viewport::new(1630.0, 900.0).unwrap());
    scene.populate(stage.document_mut());
    let binding = ViewBinding::mount(&mut stage, &scene, Rng64::new(1)).unwrap();
    stage.scroll_to(500.0);
    stage.resize(Viewport::new(3260.0, 900.0).unwrap());
    assert_eq!(binding.parallax_multiplier(), Some(1.0));
    assert!(approx(prop(&stage, "mountains", Property::Y), 185.0));
}

#[test]
fn dispose_releases_everything() {
    let (mut stage, binding) = setup(1.0, 1630.0);
    stage.scroll_to(1200.0);
    stage.animation_iteration(id(&stage, "logo-wrap"));
    assert!(!stage.world().timers().is_empty());

    binding.dispose(&mut stage);
    for kind in [
        EventKind::Scroll,
        EventKind::Frame,
        EventKind::Resize,
        EventKind::AnimationIteration,
    ] {
        assert_eq!(stage.hub().listener_count(kind), 0);
    }
    assert!(stage.world().timers().is_empty());
    assert!(stage.world().tweens().is_empty());

    let before = stage.document().journal().len();
    stage.scroll_to(300.0);
    stage.advance(Millis(2000));
    assert_eq!(stage.document().journal().len(), before);
}

#[test]
fn dropped_binding_leaves_pending_callbacks_inert() {
    let (mut stage, binding) = setup(0.0, 1630.0);
    stage.scroll_to(1200.0);
    drop(binding);
    assert_eq!(stage.hub().listener_count(EventKind::Scroll), 0);
    stage.advance(Millis(500));
    assert!(!stage.document().has_class(id(&stage, "char-2"), "animate"));
}

#[test]
fn explosion_intro_creates_and_settles_words() {
    let mut v = scene_json(0.0);
    v["elements"]
        .as_array_mut()
        .unwrap()
        .push(json!({"name": "title", "rect": [0, 100, 800, 200]}));
    v["intro"] = json!({"element": "title", "text": "Into the wild", "stagger": 0.1});
    let scene = Scene::from_value(v).unwrap();
    scene.validate().unwrap();
    let mut stage = Stage::new(Viewport::new(1630.0, 900.0).unwrap());
    scene.populate(stage.document_mut());
    let binding = ViewBinding::mount(&mut stage, &scene, Rng64::new(9)).unwrap();

    let words = binding.created_elements();
    assert_eq!(words.len(), 3);
    let title = id(&stage, "title");
    assert_eq!(stage.document().children(title), words);
    assert_eq!(stage.document().prop(words[2], Property::Opacity), Some(0.0));
    assert!(stage.document().prop(words[0], Property::Z).unwrap() < 0.0);

    stage.advance(Millis(1700));
    for w in &words {
        assert!(approx(stage.document().prop(*w, Property::Opacity).unwrap(), 1.0));
        assert!(approx(stage.document().prop(*w, Property::Z).unwrap(), 0.0));
    }

    binding.dispose(&mut stage);
    assert!(words.iter().all(|w| !stage.document().is_attached(*w)));
    assert!(stage.document().is_attached(title));
}

struct CommaSplitter;

impl TextSplitter for CommaSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        text.split(',').map(|w| w.trim().to_owned()).collect()
    }
}

#[test]
fn intro_uses_the_supplied_splitter() {
    let mut v = scene_json(0.0);
    v["elements"]
        .as_array_mut()
        .unwrap()
        .push(json!({"name": "title", "rect": [0, 100, 800, 200]}));
    v["intro"] = json!({"element": "title", "text": "Into the, wild"});
    let scene = Scene::from_value(v).unwrap();
    let mut stage = Stage::new(Viewport::new(1630.0, 900.0).unwrap());
    scene.populate(stage.document_mut());
    let binding =
        ViewBinding::mount_with_splitter(&mut stage, &scene, Rng64::new(9), &CommaSplitter)
            .unwrap();

    let words = binding.created_elements();
    assert_eq!(words.len(), 2);
    assert_eq!(
        stage.document().element(words[1]).unwrap().name(),
        "title/word-1"
    );
}

#[test]
fn missing_elements_are_skipped_at_mount() {
    let scene = Scene::from_value(scene_json(0.0)).unwrap();
    let mut stage = Stage::new(Viewport::new(1630.0, 900.0).unwrap());
    stage
        .document_mut()
        .insert("hero", Rect::new(0.0, 0.0, 1630.0, 1000.0));
    let binding = ViewBinding::mount(&mut stage, &scene, Fixed(0.5)).unwrap();
    stage.scroll_to(2000.0);
    stage.advance(Millis(500));
    assert_eq!(binding.pending_reveals(), 3);
    assert_eq!(binding.parallax_multiplier(), Some(0.5));
}
