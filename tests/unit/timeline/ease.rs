use super::*;

#[test]
fn endpoints_are_fixed() {
    for e in [Ease::Linear, Ease::OutQuad, Ease::InOutQuad, Ease::OutCubic] {
        assert_eq!(e.apply(0.0), 0.0, "{e:?}");
        assert_eq!(e.apply(1.0), 1.0, "{e:?}");
    }
}

#[test]
fn out_of_range_and_nan_clamp() {
    assert_eq!(Ease::InOutQuad.apply(-3.0), 0.0);
    assert_eq!(Ease::InOutQuad.apply(7.0), 1.0);
    assert_eq!(Ease::Linear.apply(f64::NAN), 0.0);
}

#[test]
fn in_out_quad_is_symmetric_at_midpoint() {
    assert_eq!(Ease::InOutQuad.apply(0.5), 0.5);
    let a = Ease::InOutQuad.apply(0.25);
    let b = Ease::InOutQuad.apply(0.75);
    assert!((a + b - 1.0).abs() < 1e-12);
}
