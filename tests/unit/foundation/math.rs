use super::*;

#[test]
fn clamp_axis_bounds_and_non_finite() {
    assert_eq!(clamp_axis(-3.5, 9.0), 0.0);
    assert_eq!(clamp_axis(4.25, 9.0), 4.25);
    assert_eq!(clamp_axis(12.0, 9.0), 9.0);
    assert_eq!(clamp_axis(f64::NAN, 9.0), 0.0);
    assert_eq!(clamp_axis(f64::INFINITY, 9.0), 9.0);
    assert_eq!(clamp_axis(f64::NEG_INFINITY, 9.0), 0.0);
}

#[test]
fn clamp_axis_is_idempotent() {
    for v in [-1e9, -0.5, 0.0, 0.3, 4.999, 7.0, 7.5, 1e9, f64::NAN] {
        let once = clamp_axis(v, 7.0);
        assert_eq!(clamp_axis(once, 7.0), once);
    }
}

#[test]
fn truncate_does_not_round() {
    assert_eq!(truncate_axis(0.0), 0);
    assert_eq!(truncate_axis(2.999), 2);
    assert_eq!(truncate_axis(3.0), 3);
}

#[test]
fn mix_seed_separates_streams() {
    let a = mix_seed(7, 0);
    let b = mix_seed(7, 1);
    let c = mix_seed(8, 0);
    assert_ne!(a, b);
    assert_ne!(a, c);
    assert_eq!(a, mix_seed(7, 0));
}
