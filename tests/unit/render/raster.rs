use super::*;

fn id() -> ImageId {
    ImageId::new("raster")
}

#[test]
fn new_is_transparent_and_sized() {
    let r = RasterBuffer::new(&id(), 3, 2).unwrap();
    assert_eq!((r.width(), r.height()), (3, 2));
    assert_eq!(r.data().len(), 24);
    assert!(r.data().iter().all(|&b| b == 0));
    assert_eq!(r.pixel(3, 0), None);
}

#[test]
fn zero_sized_raster_is_an_allocation_failure() {
    for (w, h) in [(0, 10), (10, 0)] {
        let err = RasterBuffer::new(&id(), w, h).unwrap_err();
        assert!(matches!(err, PosterError::RasterAllocation { .. }));
        assert_eq!(err.image_id(), Some(&id()));
    }
}

#[test]
fn oversized_raster_is_an_allocation_failure() {
    let err = RasterBuffer::new(&id(), u32::MAX, u32::MAX).unwrap_err();
    assert!(matches!(err, PosterError::RasterAllocation { .. }));
}

#[test]
fn filled_stores_premultiplied_color() {
    let r = RasterBuffer::filled(&id(), 2, 2, Rgba8::new(200, 100, 0, 128)).unwrap();
    let want = Rgba8::new(200, 100, 0, 128).to_premul();
    assert!(r.data().chunks_exact(4).all(|px| px == want));
}

#[test]
fn encode_png_roundtrips_opaque_pixels() {
    let r = RasterBuffer::filled(&id(), 4, 3, Rgba8::opaque(245, 240, 232)).unwrap();
    let bytes = r.encode(OutputFormat::Png).unwrap();
    let back = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (4, 3));
    assert_eq!(back.get_pixel(2, 1).0, [245, 240, 232, 255]);
}

#[test]
fn encode_jpeg_drops_alpha() {
    let r = RasterBuffer::filled(&id(), 8, 8, Rgba8::opaque(10, 200, 30)).unwrap();
    let bytes = r.encode(OutputFormat::Jpeg { quality: 90 }).unwrap();
    let back = image::load_from_memory(&bytes).unwrap();
    assert_eq!((back.width(), back.height()), (8, 8));
    assert_eq!(OutputFormat::Jpeg { quality: 90 }.extension(), "jpg");
}
