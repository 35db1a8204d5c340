use super::*;
use serde_json::json;

#[test]
fn rect_accepts_array_or_object() {
    let a: RectDef = serde_json::from_value(json!([0, 10, 100, 60])).unwrap();
    let b: RectDef =
        serde_json::from_value(json!({"x0": 0, "y0": 10, "x1": 100, "y1": 60})).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.rect().height(), 50.0);
    assert!(serde_json::from_value::<RectDef>(json!([1, 2, 3])).is_err());
}

#[test]
fn parallax_defaults() {
    let p: ParallaxDef = serde_json::from_value(json!({
        "trigger": "hero",
        "layers": [{"element": "mountains", "distance": 370}]
    }))
    .unwrap();
    assert_eq!(p.start, "top top");
    assert_eq!(p.end, "bottom top");
    assert_eq!(p.scrub, 0.0);
    assert_eq!(p.reference_width, 3260.0);
    assert_eq!(p.resize, ResizePolicy::Ignore);
}

#[test]
fn tween_def_converts_seconds_and_props() {
    let t: TweenDef = serde_json::from_value(json!({
        "targets": ["line-before"],
        "to": {"opacity": 1, "x": 0},
        "duration": 1.0,
        "ease": "power1.inOut",
        "delay": 0.25
    }))
    .unwrap();
    let spec = t.spec();
    assert_eq!(spec.duration, Millis(1000));
    assert_eq!(spec.delay, Millis(250));
    assert_eq!(spec.ease, Ease::InOutQuad);
    assert_eq!(spec.props.get(Property::Opacity), Some(1.0));
    assert_eq!(spec.props.get(Property::X), Some(0.0));
    assert!(!spec.overwrite);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = serde_json::from_value::<PulseDef>(json!({"element": "logo", "speed": 2}));
    assert!(err.is_err());
}

#[test]
fn pulse_and_intro_defaults() {
    let p: PulseDef = serde_json::from_value(json!({"element": "logo"})).unwrap();
    assert_eq!((p.class.as_str(), p.min_secs, p.max_secs), ("pause", 1, 10));

    let i: IntroDef = serde_json::from_value(json!({"element": "title", "text": "hi"})).unwrap();
    let cfg = i.config();
    assert_eq!(cfg, ExplosionConfig::default());
}

#[test]
fn resize_policy_names() {
    let p: ResizePolicy = serde_json::from_value(json!("remeasure")).unwrap();
    assert_eq!(p, ResizePolicy::Remeasure);
    assert_eq!(serde_json::to_value(ResizePolicy::Ignore).unwrap(), json!("ignore"));
}
