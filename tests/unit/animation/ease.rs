use super::*;

#[test]
fn endpoints_are_stable() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in Ease::ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn parses_power_names_and_aliases() {
    assert_eq!("power1.inOut".parse::<Ease>().unwrap(), Ease::InOutQuad);
    assert_eq!("none".parse::<Ease>().unwrap(), Ease::Linear);
    assert_eq!("power2".parse::<Ease>().unwrap(), Ease::OutCubic);
    assert!("bounce.out".parse::<Ease>().is_err());
}
