use super::*;

const RED: [u8; 4] = [255, 0, 0, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];
const PAPER: Rgba8 = Rgba8::opaque(245, 240, 232);

fn id() -> ImageId {
    ImageId::new("test")
}

fn image_from_fn(w: u32, h: u32, f: impl Fn(u32, u32) -> [u8; 4]) -> SourceImage {
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            data.extend_from_slice(&f(x, y));
        }
    }
    SourceImage::from_premul(w, h, data).unwrap()
}

fn solid(w: u32, h: u32, px: [u8; 4]) -> SourceImage {
    image_from_fn(w, h, |_, _| px)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn identity_square_source_fills_square_target() {
    let src = solid(4, 4, RED);
    let out = composite(&id(), &src, &Transform::IDENTITY, 4.0, 4.0, None).unwrap();
    assert!(out.data().chunks_exact(4).all(|px| px == RED));
}

#[test]
fn background_fill_is_exact_outside_the_drawn_image() {
    let src = solid(100, 100, RED);
    let t = Transform::new(0.0, 0.0, 0.1);
    let out = composite(&id(), &src, &t, 320.0, 1000.0, Some(PAPER)).unwrap();
    assert_eq!((out.width(), out.height()), (1000, 1000));

    // Fit is 1000x1000, scaled 0.1 about (500, 500): the image covers [450, 550)^2.
    let bg = PAPER.to_premul();
    let mut red = 0usize;
    for y in 0..1000 {
        for x in 0..1000 {
            let px = out.pixel(x, y).unwrap();
            let inside = (450..550).contains(&x) && (450..550).contains(&y);
            if inside {
                assert_eq!(px, RED, "({x},{y})");
                red += 1;
            } else {
                assert_eq!(px, bg, "({x},{y})");
            }
        }
    }
    assert_eq!(red, 100 * 100);
}

#[test]
fn translation_is_rescaled_to_output_units() {
    // 2x1 source: left half blue, right half green. Fit-width at 100 draws 100x50.
    let src = image_from_fn(2, 1, |x, _| if x == 0 { BLUE } else { GREEN });
    let t = Transform::new(10.0, 0.0, 1.0);
    let bg = PAPER.to_premul();

    let preview = composite(&id(), &src, &t, 100.0, 100.0, Some(PAPER)).unwrap();
    assert_eq!(preview.pixel(9, 10), Some(bg));
    assert_eq!(preview.pixel(10, 10), Some(BLUE));
    assert_eq!(preview.pixel(59, 10), Some(BLUE));
    assert_eq!(preview.pixel(60, 10), Some(GREEN));
    assert_eq!(preview.pixel(60, 50), Some(bg));

    let export = composite(&id(), &src, &t, 100.0, 300.0, Some(PAPER)).unwrap();
    assert_eq!(export.pixel(29, 10), Some(bg));
    assert_eq!(export.pixel(30, 10), Some(BLUE));
    assert_eq!(export.pixel(179, 10), Some(BLUE));
    assert_eq!(export.pixel(180, 10), Some(GREEN));
    assert_eq!(export.pixel(180, 149), Some(GREEN));
    assert_eq!(export.pixel(180, 150), Some(bg));
}

#[test]
fn visible_center_is_proportional_across_resolutions() {
    let natural = Size::new(400.0, 300.0);
    let t = Transform::new(16.0, -8.0, 1.5);
    let params = CompositeParams::square(320.0);

    let at_preview = visible_center(natural, &t, &params, Viewport::square(320.0));
    let at_output = visible_center(natural, &t, &params, Viewport::square(1000.0));
    assert!(close(at_preview.x, 176.0) && close(at_preview.y, 112.0));
    assert!(close(at_output.x, 550.0) && close(at_output.y, 350.0));

    for (v, o) in [(320.0, 1000.0), (320.0, 960.0), (250.0, 3000.0), (1000.0, 320.0)] {
        let params = CompositeParams::square(v);
        let a = visible_center(natural, &t, &params, Viewport::square(v));
        let b = visible_center(natural, &t, &params, Viewport::square(o));
        assert!(close(a.x / v, b.x / o));
        assert!(close(a.y / v, b.y / o));
    }
}

#[test]
fn crop_window_is_resolution_independent() {
    let natural = Size::new(640.0, 480.0);
    let t = Transform::new(-30.0, 12.5, 2.25);
    let params = CompositeParams::square(320.0);
    let a = source_crop_window(natural, &t, &params, Viewport::square(320.0)).unwrap();
    let b = source_crop_window(natural, &t, &params, Viewport::square(1000.0)).unwrap();
    for (p, q) in [(a.x0, b.x0), (a.y0, b.y0), (a.x1, b.x1), (a.y1, b.y1)] {
        assert!((p - q).abs() < 1e-6, "{a:?} vs {b:?}");
    }
}

#[test]
fn scale_pivots_around_fit_center() {
    let natural = Size::new(2.0, 2.0);
    let t = Transform::new(0.0, 0.0, 2.0);
    let params = CompositeParams::square(4.0);
    let w = source_crop_window(natural, &t, &params, Viewport::square(4.0)).unwrap();
    assert!(close(w.x0, 0.5) && close(w.y0, 0.5) && close(w.x1, 1.5) && close(w.y1, 1.5));
}

#[test]
fn panned_out_of_view_has_no_crop_window() {
    let natural = Size::new(10.0, 10.0);
    let t = Transform::new(10_000.0, 0.0, 1.0);
    let params = CompositeParams::square(320.0);
    assert!(source_crop_window(natural, &t, &params, Viewport::square(320.0)).is_none());

    let src = solid(10, 10, RED);
    let out = composite(&id(), &src, &t, 320.0, 64.0, Some(PAPER)).unwrap();
    assert!(out.data().chunks_exact(4).all(|px| px == PAPER.to_premul()));
}

#[test]
fn cover_header_fills_non_square_target() {
    let src = solid(1, 1, GREEN);
    let params = CompositeParams {
        fit: FitPolicy::Cover(crate::layout::fit::VerticalAlign::Center),
        preview: Viewport::new(200.0, 100.0).unwrap(),
        background: Some(PAPER),
    };
    let out = render_export(
        &id(),
        &src,
        &Transform::IDENTITY,
        &params,
        Viewport::new(600.0, 300.0).unwrap(),
    )
    .unwrap();
    assert_eq!((out.width(), out.height()), (600, 300));
    assert!(out.data().chunks_exact(4).all(|px| px == GREEN));
}

#[test]
fn cover_alignment_selects_visible_band() {
    use crate::layout::fit::VerticalAlign;

    // 2x4 source: top two rows red, bottom two rows blue.
    let src = image_from_fn(2, 4, |_, y| if y < 2 { RED } else { BLUE });
    let target = Viewport::new(20.0, 10.0).unwrap();
    let render = |align| {
        let params = CompositeParams {
            fit: FitPolicy::Cover(align),
            preview: target,
            background: None,
        };
        render_export(&id(), &src, &Transform::IDENTITY, &params, target).unwrap()
    };

    assert!(render(VerticalAlign::Top).data().chunks_exact(4).all(|px| px == RED));
    assert!(render(VerticalAlign::Bottom).data().chunks_exact(4).all(|px| px == BLUE));
}

#[test]
fn composite_into_without_background_keeps_existing_pixels() {
    let mut surface = RasterBuffer::filled(&id(), 8, 8, Rgba8::opaque(1, 2, 3)).unwrap();
    let src = solid(8, 8, [0, 0, 128, 128]);
    let t = Transform::new(4.0, 0.0, 1.0);
    composite_into(&mut surface, &src, &t, &CompositeParams::square(8.0)).unwrap();

    assert_eq!(surface.pixel(3, 3), Some([1, 2, 3, 255]));
    let blended = surface.pixel(4, 3).unwrap();
    assert_eq!(blended[3], 255);
    assert_eq!(blended[2], 128 + crate::foundation::math::mul_div255(3, 127));
}

#[test]
fn degenerate_source_renders_background_only() {
    let src = SourceImage::from_premul(0, 0, Vec::new()).unwrap();
    let out = composite(&id(), &src, &Transform::IDENTITY, 320.0, 16.0, Some(PAPER)).unwrap();
    assert!(out.data().chunks_exact(4).all(|px| px == PAPER.to_premul()));
}

#[test]
fn invalid_inputs_are_rejected() {
    let src = solid(2, 2, RED);
    let bad_t = Transform::new(f64::NAN, 0.0, 1.0);
    assert!(matches!(
        composite(&id(), &src, &bad_t, 320.0, 1000.0, None),
        Err(PosterError::Validation(_))
    ));
    assert!(matches!(
        composite(&id(), &src, &Transform::IDENTITY, 0.0, 1000.0, None),
        Err(PosterError::Validation(_))
    ));
    assert!(matches!(
        composite(&id(), &src, &Transform::IDENTITY, 320.0, 0.0, None),
        Err(PosterError::Validation(_))
    ));
}

#[test]
fn tiny_target_is_an_allocation_failure_for_that_image() {
    let src = solid(2, 2, RED);
    let err = composite(&id(), &src, &Transform::IDENTITY, 320.0, 0.4, None).unwrap_err();
    assert!(matches!(err, PosterError::RasterAllocation { .. }));
    assert_eq!(err.image_id(), Some(&id()));
}
