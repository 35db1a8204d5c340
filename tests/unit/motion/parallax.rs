use super::*;

fn vp(width: f64) -> Viewport {
    Viewport {
        width,
        height: 900.0,
    }
}

fn layers() -> Vec<Layer> {
    vec![
        Layer {
            element: ElementId(0),
            distance: 370.0,
        },
        Layer {
            element: ElementId(1),
            distance: -250.0,
        },
    ]
}

#[test]
fn offset_at_unit_multiplier_and_half_progress() {
    let mut d = ParallaxDriver::new(
        1000.0,
        vec![Layer {
            element: ElementId(3),
            distance: 300.0,
        }],
    );
    assert_eq!(d.measure(vp(1000.0)), Some(1.0));
    assert_eq!(
        d.offsets(0.5),
        vec![LayerOffset {
            element: ElementId(3),
            offset: 150.0
        }]
    );
}

#[test]
fn offsets_scale_linearly_with_width() {
    for width in [320.0, 1630.0, 3260.0, 5000.0] {
        let mut a = ParallaxDriver::new(3260.0, layers());
        let mut b = ParallaxDriver::new(3260.0, layers());
        a.measure(vp(width));
        b.measure(vp(width * 2.0));
        for (x, y) in a.offsets(0.37).iter().zip(b.offsets(0.37).iter()) {
            assert!((y.offset - 2.0 * x.offset).abs() < 1e-9);
        }
    }
}

#[test]
fn zero_width_skips_without_dividing() {
    let mut d = ParallaxDriver::new(3260.0, layers());
    assert_eq!(d.measure(vp(0.0)), None);
    assert_eq!(d.measure(vp(f64::NAN)), None);
    assert!(d.offsets(1.0).is_empty());
    assert!(!d.ensure_measured(vp(0.0)));

    assert!(d.ensure_measured(vp(1630.0)));
    assert_eq!(d.multiplier(), Some(0.5));
    // already measured: later widths do not change it
    assert!(d.ensure_measured(vp(3260.0)));
    assert_eq!(d.multiplier(), Some(0.5));
}

#[test]
fn zero_reference_width_never_measures() {
    let mut d = ParallaxDriver::new(0.0, layers());
    assert_eq!(d.measure(vp(1000.0)), None);
    assert!(d.offsets(0.5).is_empty());
}

#[test]
fn progress_is_clamped() {
    let mut d = ParallaxDriver::new(3260.0, layers());
    d.measure(vp(3260.0));
    let full = d.offsets(4.0);
    assert_eq!(full[0].offset, 370.0);
    assert_eq!(full[1].offset, -250.0);
    assert_eq!(d.offsets(-1.0)[0].offset, 0.0);
    assert_eq!(d.target_offset(&d.layers()[0]), Some(370.0));
}
