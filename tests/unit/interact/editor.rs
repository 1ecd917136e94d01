use super::*;

fn down(x: f64, y: f64) -> PointerEvent {
    PointerEvent::Down {
        pos: Point::new(x, y),
        over_surface: true,
    }
}

fn mv(x: f64, y: f64) -> PointerEvent {
    PointerEvent::Move {
        pos: Point::new(x, y),
    }
}

fn up(x: f64, y: f64) -> PointerEvent {
    PointerEvent::Up {
        pos: Point::new(x, y),
    }
}

fn wheel(delta: f64) -> PointerEvent {
    PointerEvent::Wheel {
        delta,
        over_surface: true,
    }
}

#[test]
fn events_without_source_are_ignored() {
    let mut ed = ImageEditor::headless(WheelZoom::GALLERY);
    assert_eq!(ed.handle(down(1.0, 1.0)), EventResponse::default());
    assert!(!ed.is_dragging());
    assert_eq!(ed.handle(wheel(100.0)), EventResponse::default());
    assert_eq!(ed.transform(), Transform::IDENTITY);
}

#[test]
fn drag_survives_leaving_the_surface() {
    let mut ed = ImageEditor::headless(WheelZoom::GALLERY);
    ed.attach(800, 600);
    assert!(ed.handle(down(100.0, 100.0)).consumed);

    // Moves far outside the surface bounds still track.
    let r = ed.handle(mv(-900.0, 2000.0));
    assert_eq!(r, EventResponse { changed: true, consumed: true });
    assert_eq!(ed.transform(), Transform::new(-1000.0, 1900.0, 1.0));

    assert!(ed.handle(up(-900.0, 2000.0)).consumed);
    assert!(!ed.is_dragging());
    assert!(!ed.handle(mv(0.0, 0.0)).consumed);
}

#[test]
fn press_outside_surface_does_not_start_a_drag() {
    let mut ed = ImageEditor::headless(WheelZoom::GALLERY);
    ed.attach(10, 10);
    let r = ed.handle(PointerEvent::Down {
        pos: Point::ORIGIN,
        over_surface: false,
    });
    assert!(!r.consumed);
    assert!(!ed.is_dragging());
}

#[test]
fn click_reports_no_change() {
    let mut ed = ImageEditor::headless(WheelZoom::GALLERY);
    ed.attach(10, 10);
    assert!(!ed.handle(down(5.0, 5.0)).changed);
    assert!(!ed.handle(up(5.0, 5.0)).changed);
    assert_eq!(ed.transform(), Transform::IDENTITY);
}

#[test]
fn wheel_is_consumed_only_over_surface() {
    let mut ed = ImageEditor::headless(WheelZoom::HEADER);
    ed.attach(10, 10);
    let outside = ed.handle(PointerEvent::Wheel {
        delta: 100.0,
        over_surface: false,
    });
    assert!(!outside.consumed);
    assert_eq!(ed.transform().scale, 1.0);

    let inside = ed.handle(wheel(100.0));
    assert!(inside.consumed && inside.changed);
    assert!((ed.transform().scale - 1.1).abs() < 1e-12);
}

#[test]
fn wheel_at_bound_is_consumed_but_unchanged() {
    let mut ed = ImageEditor::headless(WheelZoom::GALLERY);
    ed.attach(10, 10);
    ed.handle(wheel(1e9));
    let r = ed.handle(wheel(1e9));
    assert_eq!(r, EventResponse { changed: false, consumed: true });
    assert_eq!(ed.transform().scale, 5.0);
}

#[test]
fn display_ratio_applies_to_drags() {
    let mut ed = ImageEditor::headless(WheelZoom::GALLERY);
    ed.attach(10, 10);
    ed.set_display_ratio(0.5);
    ed.handle(down(0.0, 0.0));
    ed.handle(mv(10.0, 20.0));
    assert_eq!(ed.transform(), Transform::new(20.0, 40.0, 1.0));
}

#[test]
fn attaching_a_new_source_resets_and_ends_drag() {
    let mut ed = ImageEditor::headless(WheelZoom::GALLERY);
    ed.attach(10, 10);
    ed.handle(down(0.0, 0.0));
    ed.handle(mv(3.0, 4.0));
    ed.handle(wheel(500.0));
    ed.attach(20, 40);
    assert!(!ed.is_dragging());
    assert_eq!(ed.transform(), Transform::IDENTITY);
    assert_eq!(ed.source_size(), Some(Size::new(20.0, 40.0)));
}

#[test]
fn restored_transforms_are_sanitized() {
    let mut ed = ImageEditor::headless(WheelZoom::GALLERY);
    ed.attach_with(10, 10, Transform::new(7.0, f64::NAN, 50.0));
    assert_eq!(ed.transform(), Transform::new(7.0, 0.0, 5.0));
    ed.detach();
    assert_eq!(ed.source_size(), None);
    assert_eq!(ed.transform(), Transform::IDENTITY);
}

#[test]
fn fit_uses_attached_dimensions() {
    let mut ed = ImageEditor::headless(WheelZoom::GALLERY);
    assert!(ed.fit(FitPolicy::FitWidth, Viewport::square(320.0)).is_none());
    ed.attach(400, 200);
    let fit = ed.fit(FitPolicy::FitWidth, Viewport::square(320.0)).unwrap();
    assert_eq!((fit.draw_width, fit.draw_height), (320.0, 160.0));
}
