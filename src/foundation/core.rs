use std::fmt;

use crate::foundation::error::{PosterError, PosterResult};

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Caller-provided identity of one source image (a gallery item, the header, ...).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ImageId(String);

impl ImageId {
    /// Wrap an identity string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ImageId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A fixed box an image is framed in: the preview viewport or the output raster.
///
/// Units are preview units for the editing viewport and pixels for output rasters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Box width.
    pub width: f64,
    /// Box height.
    pub height: f64,
}

impl Viewport {
    /// Build a viewport, rejecting non-finite or non-positive sides.
    pub fn new(width: f64, height: f64) -> PosterResult<Self> {
        let vp = Self { width, height };
        vp.validate()?;
        Ok(vp)
    }

    /// Square viewport with edge length `edge`.
    pub const fn square(edge: f64) -> Self {
        Self {
            width: edge,
            height: edge,
        }
    }

    /// Check that both sides are finite and positive.
    pub fn validate(self) -> PosterResult<()> {
        if !(self.width.is_finite() && self.height.is_finite()) {
            return Err(PosterError::validation("viewport sides must be finite"));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(PosterError::validation("viewport sides must be > 0"));
        }
        Ok(())
    }

    /// `true` when width and height are equal.
    pub fn is_square(self) -> bool {
        self.width == self.height
    }

    /// Raster dimensions for this box, rounded to whole pixels.
    pub fn pixel_size(self) -> (u32, u32) {
        fn px(v: f64) -> u32 {
            if v.is_finite() && v > 0.0 {
                v.round().min(f64::from(u32::MAX)) as u32
            } else {
                0
            }
        }
        (px(self.width), px(self.height))
    }

    /// Per-axis ratio mapping lengths in `self` to lengths in `target`.
    pub fn scale_to(self, target: Viewport) -> Vec2 {
        Vec2::new(target.width / self.width, target.height / self.height)
    }

    /// The box as a rectangle anchored at the origin.
    pub fn to_rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    /// Build a color from straight channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Premultiplied byte layout used by rasters (r,g,b already multiplied by a).
    pub fn to_premul(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
