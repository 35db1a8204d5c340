use super::*;
use serde_json::json;

fn base() -> serde_json::Value {
    json!({
        "version": "1",
        "elements": [
            {"name": "hero", "rect": [0, 0, 1630, 1000]},
            {"name": "mountains", "rect": [0, 0, 1630, 1000], "parent": "hero"},
            {"name": "image", "rect": [0, 2000, 800, 2600]},
            {"name": "char-0", "rect": [0, 1500, 40, 1600]},
            {"name": "logo-wrap", "rect": [700, 200, 900, 400], "parent": "hero"}
        ],
        "parallax": {
            "trigger": "hero", "scrub": 1.0,
            "layers": [{"element": "mountains", "distance": 370}]
        },
        "reveal": {"targets": ["char-0"], "class": "animate"},
        "enter": [{"trigger": "image", "start": "center-=30% center",
                   "tweens": [{"targets": ["image"], "to": {"scale": 0.89}, "duration": 1.2}]}],
        "pulse": {"element": "logo-wrap"}
    })
}

fn scene(v: serde_json::Value) -> Scene {
    Scene::from_value(v).unwrap()
}

#[test]
fn valid_scene_passes() {
    let s = scene(base());
    s.validate().unwrap();
    assert_eq!(s.version(), "1");
    assert_eq!(s.element_names().count(), 5);
    assert_eq!(s.element_rect("image").unwrap().y0, 2000.0);
}

#[test]
fn rejects_unknown_reference() {
    let mut v = base();
    v["reveal"]["targets"] = json!(["char-0", "char-9"]);
    let err = scene(v).validate().unwrap_err();
    assert!(err.to_string().contains("unknown element 'char-9'"), "{err}");
}

#[test]
fn rejects_non_positive_reference_width() {
    for w in [0.0, -10.0] {
        let mut v = base();
        v["parallax"]["reference_width"] = json!(w);
        let err = scene(v).validate().unwrap_err();
        assert!(err.to_string().contains("reference_width"), "{err}");
    }
}

#[test]
fn rejects_bad_trigger_position() {
    let mut v = base();
    v["enter"][0]["start"] = json!("middle center");
    let err = scene(v).validate().unwrap_err();
    assert!(matches!(err, ScrollFxError::Trigger(_)), "{err}");
}

#[test]
fn rejects_duplicate_names_and_late_parents() {
    let mut v = base();
    v["elements"][2]["name"] = json!("hero");
    assert!(scene(v).validate().unwrap_err().to_string().contains("duplicate"));

    let mut v = base();
    v["elements"][0]["parent"] = json!("image");
    let err = scene(v).validate().unwrap_err();
    assert!(err.to_string().contains("declared before"), "{err}");
}

#[test]
fn rejects_inverted_pulse_bounds_and_bad_version() {
    let mut v = base();
    v["pulse"]["min_secs"] = json!(5);
    v["pulse"]["max_secs"] = json!(2);
    assert!(scene(v).validate().is_err());

    let mut v = base();
    v["version"] = json!("2");
    assert!(scene(v).validate().unwrap_err().to_string().contains("version"));
}

#[test]
fn rejects_unbounded_pulse_pause() {
    let mut v = base();
    v["pulse"]["min_secs"] = json!(0);
    v["pulse"]["max_secs"] = json!(u32::MAX);
    let err = scene(v).validate().unwrap_err();
    assert!(err.to_string().contains("max_secs"), "{err}");

    let mut v = base();
    v["pulse"]["max_secs"] = json!(86_400);
    scene(v).validate().unwrap();
}

#[test]
fn parse_errors_are_serde_errors() {
    let err = Scene::from_reader("{ not json".as_bytes()).unwrap_err();
    assert!(matches!(err, ScrollFxError::Serde(_)));
    let err = Scene::from_value(json!({"elements": [], "colour": 1})).unwrap_err();
    assert!(matches!(err, ScrollFxError::Serde(_)));
    let err = Scene::from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, ScrollFxError::Validation(_)));
}

#[test]
fn populate_builds_tree() {
    let s = scene(base());
    let mut doc = Document::new();
    let ids = s.populate(&mut doc);
    assert_eq!(doc.len(), 5);
    let hero = ids["hero"];
    assert_eq!(doc.children(hero), vec![ids["mountains"], ids["logo-wrap"]]);
    assert_eq!(doc.lookup("image"), Some(ids["image"]));
    doc.detach(hero);
    assert!(!doc.is_attached(ids["logo-wrap"]));
}

#[test]
fn round_trips_through_json() {
    let s = scene(base());
    let again = Scene::from_value(s.to_value().unwrap()).unwrap();
    again.validate().unwrap();
    assert_eq!(
        again.element_names().collect::<Vec<_>>(),
        s.element_names().collect::<Vec<_>>()
    );
}
