//! Compositing a transformed source image into a target box.
//!
//! The same [`Transform`], recorded in preview units, is replayed at any target resolution:
//!
//! 1. Fit the source into the *target* box (`FitRect` scales with the box).
//! 2. Rescale the translation by `target / preview`, per axis.
//! 3. Apply `T(pivot) * T(offset) * S(scale) * T(-pivot)` with the pivot at the fit center.
//! 4. Draw the source into the fit rectangle.
//!
//! Because every step is linear in the box size, the placement at output resolution equals
//! the preview placement scaled by `target / preview`, so the visible crop is the same.

use crate::{
    assets::source::SourceImage,
    foundation::core::{Affine, ImageId, Point, Rect, Rgba8, Size, Viewport},
    foundation::error::{PosterError, PosterResult},
    foundation::math::premul_over,
    layout::fit::{FitPolicy, fit_in_viewport},
    render::raster::{RasterBuffer, Surface, fill_surface},
    transform::affine::{pivot_transform, rect_to_rect},
    transform::state::Transform,
};

/// Everything about a use site that is fixed at configuration time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompositeParams {
    /// Base-fit policy.
    pub fit: FitPolicy,
    /// Box the transform was recorded in.
    pub preview: Viewport,
    /// Fill applied to the whole target before drawing. `None` draws over existing pixels.
    pub background: Option<Rgba8>,
}

impl CompositeParams {
    /// Square fit-width crop recorded in a `preview_edge` box (gallery items).
    pub fn square(preview_edge: f64) -> Self {
        Self {
            fit: FitPolicy::FitWidth,
            preview: Viewport::square(preview_edge),
            background: None,
        }
    }

    /// Same parameters with a background fill.
    pub fn with_background(mut self, color: Rgba8) -> Self {
        self.background = Some(color);
        self
    }

    fn validate(&self) -> PosterResult<()> {
        self.preview.validate()
    }
}

/// Mapping from source pixel coordinates to `target` coordinates.
///
/// `natural` is the source size. Translation in `transform` is in preview units.
pub fn image_placement(
    natural: Size,
    transform: &Transform,
    params: &CompositeParams,
    target: Viewport,
) -> Affine {
    let fit = fit_in_viewport(params.fit, natural.width, natural.height, target);
    let offset = transform.rescaled(params.preview.scale_to(target)).offset();
    pivot_transform(fit.center(), offset, transform.scale)
        * rect_to_rect(natural.to_vec2(), fit.origin(), fit.size())
}

/// Where the center of the source lands in `target` coordinates.
pub fn visible_center(
    natural: Size,
    transform: &Transform,
    params: &CompositeParams,
    target: Viewport,
) -> Point {
    let center = Point::new(natural.width / 2.0, natural.height / 2.0);
    image_placement(natural, transform, params, target) * center
}

/// The part of the source (in source pixels) that is visible inside `target`.
///
/// Independent of `target` resolution for a fixed transform, up to floating rounding.
/// `None` when nothing is visible.
pub fn source_crop_window(
    natural: Size,
    transform: &Transform,
    params: &CompositeParams,
    target: Viewport,
) -> Option<Rect> {
    let placement = image_placement(natural, transform, params, target);
    if placement.determinant() == 0.0 {
        return None;
    }
    let visible = placement.inverse().transform_rect_bbox(target.to_rect());
    let window = visible.intersect(natural.to_rect());
    (window.width() > 0.0 && window.height() > 0.0).then_some(window)
}

/// Draw `source` with `transform` into `surface`. The surface size is the target box.
///
/// When `params.background` is set the whole surface is filled first, so every pixel not
/// covered by the image equals the background exactly. A source with a zero side draws
/// nothing.
pub fn composite_into(
    surface: &mut dyn Surface,
    source: &SourceImage,
    transform: &Transform,
    params: &CompositeParams,
) -> PosterResult<()> {
    params.validate()?;
    transform.validate()?;

    let (width, height) = (surface.width(), surface.height());
    let expected = (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4);
    if surface.pixels_mut().len() != expected {
        return Err(PosterError::validation(
            "composite target expects a buffer matching width*height*4",
        ));
    }

    if let Some(bg) = params.background {
        fill_surface(surface, bg);
    }
    if width == 0 || height == 0 || source.is_empty() {
        return Ok(());
    }

    let target = Viewport {
        width: f64::from(width),
        height: f64::from(height),
    };
    let placement = image_placement(source.natural_size(), transform, params, target);
    draw_nearest(surface.pixels_mut(), width, height, source, placement);
    Ok(())
}

/// Allocate a `target`-sized raster and composite into it (export path).
///
/// Allocation failure is reported against `id`.
#[tracing::instrument(skip(source, params), fields(natural_w = source.natural_width(), natural_h = source.natural_height()))]
pub fn render_export(
    id: &ImageId,
    source: &SourceImage,
    transform: &Transform,
    params: &CompositeParams,
    target: Viewport,
) -> PosterResult<RasterBuffer> {
    target.validate()?;
    let (w, h) = target.pixel_size();
    let mut raster = RasterBuffer::new(id, w, h)?;
    composite_into(&mut raster, source, transform, params)?;
    Ok(raster)
}

/// Square fit-width export: `transform` recorded at `preview_edge`, rendered at
/// `target_edge` over an optional background.
pub fn composite(
    id: &ImageId,
    source: &SourceImage,
    transform: &Transform,
    preview_edge: f64,
    target_edge: f64,
    background: Option<Rgba8>,
) -> PosterResult<RasterBuffer> {
    let params = CompositeParams {
        background,
        ..CompositeParams::square(preview_edge)
    };
    render_export(id, source, transform, &params, Viewport::square(target_edge))
}

/// Inverse-mapped nearest-neighbour draw, sampling at pixel centers, source-over.
///
/// Only pixels whose centers map inside the source are written.
fn draw_nearest(dst: &mut [u8], width: u32, height: u32, source: &SourceImage, placement: Affine) {
    let src_w = f64::from(source.natural_width());
    let src_h = f64::from(source.natural_height());
    let bbox = placement.transform_rect_bbox(Rect::new(0.0, 0.0, src_w, src_h));

    let x0 = bbox.x0.floor().max(0.0) as u32;
    let y0 = bbox.y0.floor().max(0.0) as u32;
    let x1 = (bbox.x1.ceil().min(f64::from(width))).max(0.0) as u32;
    let y1 = (bbox.y1.ceil().min(f64::from(height))).max(0.0) as u32;
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let inv = placement.inverse();
    for y in y0..y1 {
        let yc = f64::from(y) + 0.5;
        for x in x0..x1 {
            let p = inv * Point::new(f64::from(x) + 0.5, yc);
            if !(p.x >= 0.0 && p.y >= 0.0 && p.x < src_w && p.y < src_h) {
                continue;
            }
            let sx = (p.x as u32).min(source.natural_width() - 1);
            let sy = (p.y as u32).min(source.natural_height() - 1);
            let src = source.pixel(sx, sy);

            let idx = ((y as usize) * (width as usize) + (x as usize)) * 4;
            let d = &mut dst[idx..idx + 4];
            let out = premul_over([d[0], d[1], d[2], d[3]], src);
            d.copy_from_slice(&out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
