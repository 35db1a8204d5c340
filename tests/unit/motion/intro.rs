use super::*;
use crate::foundation::random::Rng64;

#[test]
fn whitespace_splitter_drops_empty_pieces() {
    let words = WhitespaceSplitter.split("  Mountains\tand \n forests ");
    assert_eq!(words, vec!["Mountains", "and", "forests"]);
    assert!(WhitespaceSplitter.split("   ").is_empty());
}

#[test]
fn same_seed_same_plan() {
    let intro = ExplosionIntro::default();
    let a = intro.plan("a b c d", &WhitespaceSplitter, &mut Rng64::new(7));
    let b = intro.plan("a b c d", &WhitespaceSplitter, &mut Rng64::new(7));
    assert_eq!(a, b);
    let c = intro.plan("a b c d", &WhitespaceSplitter, &mut Rng64::new(8));
    assert_ne!(a, c);
}

#[test]
fn scatter_stays_within_configured_ranges() {
    let intro = ExplosionIntro::new(ExplosionConfig {
        depth: (-300.0, -900.0),
        max_rotation: -90.0,
        ..ExplosionConfig::default()
    });
    let text = "one two three four five six seven eight nine ten";
    for w in intro.plan(text, &WhitespaceSplitter, &mut Rng64::new(1)) {
        assert_eq!(w.start.get(Property::Opacity), Some(0.0));
        let z = w.start.get(Property::Z).unwrap();
        assert!((-900.0..-300.0).contains(&z), "z {z}");
        for p in [Property::RotationX, Property::RotationY] {
            let r = w.start.get(p).unwrap();
            assert!((-90.0..90.0).contains(&r), "{p:?} {r}");
        }
    }
}

#[test]
fn settle_tweens_are_staggered_to_rest() {
    let intro = ExplosionIntro::default();
    let plan = intro.plan("x y z", &WhitespaceSplitter, &mut Rng64::new(3));
    let delays: Vec<u64> = plan.iter().map(|w| w.settle.delay.0).collect();
    assert_eq!(delays, vec![0, 80, 160]);
    for w in &plan {
        assert_eq!(w.settle.props, ExplosionIntro::rest());
        assert_eq!(w.settle.duration, Millis(1500));
        assert_eq!(w.settle.ease, Ease::OutCubic);
    }
    assert_eq!(plan[2].word, "z");
    assert_eq!(plan[2].index, 2);
}
