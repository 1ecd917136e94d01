use image::imageops::FilterType;

use crate::{
    assets::source::SourceImage,
    foundation::core::ImageId,
    foundation::error::{PosterError, PosterResult},
    foundation::math::premultiply_rgba8_in_place,
};

/// Decode encoded image bytes into a premultiplied [`SourceImage`].
///
/// Failure is a [`PosterError::Decode`] carrying `id`; it is terminal for that image.
pub fn decode_image(id: &ImageId, bytes: &[u8]) -> PosterResult<SourceImage> {
    decode_image_with_limit(id, bytes, None)
}

/// Like [`decode_image`], downscaling so the longer side is at most `max_edge` pixels.
///
/// Aspect ratio is preserved. The returned natural dimensions are the downscaled ones, which
/// is what fit and composite must see.
#[tracing::instrument(skip(bytes), fields(bytes = bytes.len()))]
pub fn decode_image_with_limit(
    id: &ImageId,
    bytes: &[u8],
    max_edge: Option<u32>,
) -> PosterResult<SourceImage> {
    if max_edge == Some(0) {
        return Err(PosterError::validation("decode max_edge must be >= 1"));
    }
    let mut dyn_img =
        image::load_from_memory(bytes).map_err(|e| PosterError::decode(id.clone(), e.to_string()))?;

    if let Some(limit) = max_edge
        && dyn_img.width().max(dyn_img.height()) > limit
    {
        tracing::debug!(
            width = dyn_img.width(),
            height = dyn_img.height(),
            limit,
            "downscaling source image"
        );
        dyn_img = dyn_img.resize(limit, limit, FilterType::Triangle);
    }

    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    SourceImage::from_premul(width, height, rgba8_premul)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
