use super::*;

#[test]
fn default_is_identity() {
    assert_eq!(Transform::default(), Transform::new(0.0, 0.0, 1.0));
    assert_eq!(Transform::default().offset(), Vec2::ZERO);
}

#[test]
fn validate_rejects_non_finite_and_non_positive_scale() {
    assert!(Transform::new(1.0, 2.0, 0.5).validate().is_ok());
    assert!(Transform::new(f64::NAN, 0.0, 1.0).validate().is_err());
    assert!(Transform::new(0.0, 0.0, f64::INFINITY).validate().is_err());
    assert!(Transform::new(0.0, 0.0, 0.0).validate().is_err());
}

#[test]
fn scale_range_normalizes_and_rejects_bad_bounds() {
    let r = ScaleRange::new(5.0, 0.1).unwrap();
    assert_eq!((r.min(), r.max()), (0.1, 5.0));
    assert!(ScaleRange::new(0.0, 1.0).is_err());
    assert!(ScaleRange::new(0.1, f64::INFINITY).is_err());
}

#[test]
fn clamp_stays_in_bounds() {
    let r = ScaleRange::GALLERY;
    assert_eq!(r.clamp(12.0), 5.0);
    assert_eq!(r.clamp(0.01), 0.1);
    assert_eq!(r.clamp(f64::NAN), 0.1);
    assert_eq!(r.clamp(f64::INFINITY), 5.0);
    assert_eq!(r.clamp(2.5), 2.5);
    assert!(ScaleRange::HEADER.contains(10.0));
    assert!(!ScaleRange::GALLERY.contains(10.0));
}

#[test]
fn clamped_touches_scale_only() {
    let t = Transform::new(-7.0, 2.5, 0.02).clamped(ScaleRange::GALLERY);
    assert_eq!(t, Transform::new(-7.0, 2.5, 0.1));
    let t = Transform::new(1.0, 1.0, 8.0);
    assert_eq!(t.clamped(ScaleRange::HEADER), t);
}

#[test]
fn rescaled_moves_translation_only() {
    let t = Transform::new(16.0, -8.0, 1.5).rescaled(Vec2::new(3.125, 3.125));
    assert_eq!(t, Transform::new(50.0, -25.0, 1.5));
}

#[test]
fn sanitized_repairs_persisted_values() {
    let t = Transform::new(f64::NAN, 4.0, 42.0).sanitized(ScaleRange::GALLERY);
    assert_eq!(t, Transform::new(0.0, 4.0, 5.0));

    let t = Transform::new(1.0, f64::NEG_INFINITY, -3.0).sanitized(ScaleRange::HEADER);
    assert_eq!(t, Transform::new(1.0, 0.0, 1.0));
}

#[test]
fn scale_range_serde_is_a_pair() {
    let json = serde_json::to_string(&ScaleRange::HEADER).unwrap();
    assert_eq!(json, "[0.1,10.0]");
    let back: ScaleRange = serde_json::from_str("[5.0, 0.1]").unwrap();
    assert_eq!(back, ScaleRange::GALLERY);
    assert!(serde_json::from_str::<ScaleRange>("[0.0, 1.0]").is_err());
}
