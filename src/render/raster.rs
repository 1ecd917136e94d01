use std::io::Cursor;

use crate::foundation::core::{ImageId, Rgba8};
use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;

/// A render target: premultiplied RGBA8 pixels, row-major, tightly packed.
///
/// [`RasterBuffer`] is the offscreen implementation. Hosts implement it for their live
/// preview surface. Every composite call receives its target explicitly.
pub trait Surface {
    /// Width in pixels.
    fn width(&self) -> u32;
    /// Height in pixels.
    fn height(&self) -> u32;
    /// Mutable pixel bytes, `width * height * 4` long.
    fn pixels_mut(&mut self) -> &mut [u8];
}

/// Output encodings supported by [`RasterBuffer::encode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Lossless PNG (keeps alpha).
    Png,
    /// JPEG at the given quality (1..=100). Alpha is dropped.
    Jpeg {
        /// Encoder quality.
        quality: u8,
    },
}

impl OutputFormat {
    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg { .. } => "jpg",
        }
    }
}

/// Offscreen output raster, exclusively owned by the export call that created it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterBuffer {
    /// Allocate a transparent raster. Zero or overflowing sizes and allocator refusal are
    /// reported as [`PosterError::RasterAllocation`] for `id`.
    pub fn new(id: &ImageId, width: u32, height: u32) -> PosterResult<Self> {
        let fail = || PosterError::raster_allocation(id.clone(), width, height);
        if width == 0 || height == 0 {
            return Err(fail());
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(fail)?;

        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| fail())?;
        data.resize(len, 0);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Allocate and fill with `color`.
    pub fn filled(id: &ImageId, width: u32, height: u32, color: Rgba8) -> PosterResult<Self> {
        let mut raster = Self::new(id, width, height)?;
        raster.fill(color);
        Ok(raster)
    }

    /// Overwrite every pixel with `color`.
    pub fn fill(&mut self, color: Rgba8) {
        fill_surface(self, color);
    }

    /// Premultiplied pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Premultiplied pixel at `(x, y)`, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let p = &self.data[idx..idx + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Straight-alpha copy as an `image` buffer.
    pub fn to_rgba_image(&self) -> PosterResult<image::RgbaImage> {
        let mut straight = self.data.clone();
        unpremultiply_rgba8_in_place(&mut straight);
        image::RgbaImage::from_raw(self.width, self.height, straight)
            .ok_or_else(|| PosterError::encode("raster byte len does not match its dimensions"))
    }

    /// Encode into `format`.
    pub fn encode(&self, format: OutputFormat) -> PosterResult<Vec<u8>> {
        let rgba = image::DynamicImage::ImageRgba8(self.to_rgba_image()?);
        let mut buf = Vec::new();
        let mut cursor = Cursor::new(&mut buf);
        match format {
            OutputFormat::Png => rgba
                .write_to(&mut cursor, image::ImageFormat::Png)
                .map_err(|e| PosterError::encode(format!("png: {e}")))?,
            OutputFormat::Jpeg { quality } => {
                let rgb = rgba.to_rgb8();
                let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
                    &mut cursor,
                    quality.clamp(1, 100),
                );
                rgb.write_with_encoder(encoder)
                    .map_err(|e| PosterError::encode(format!("jpeg: {e}")))?;
            }
        }
        Ok(buf)
    }
}

impl Surface for RasterBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

/// Overwrite every pixel of `surface` with `color`.
pub fn fill_surface<S: Surface + ?Sized>(surface: &mut S, color: Rgba8) {
    let px = color.to_premul();
    for d in surface.pixels_mut().chunks_exact_mut(4) {
        d.copy_from_slice(&px);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
