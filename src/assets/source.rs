use std::sync::Arc;

use crate::foundation::core::Size;
use crate::foundation::error::{PosterError, PosterResult};

#[derive(Clone, Debug)]
/// Decoded source image in premultiplied RGBA8 form. Immutable once built.
pub struct SourceImage {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl SourceImage {
    /// Wrap premultiplied RGBA8 pixels (row-major, tightly packed).
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> PosterResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| PosterError::validation("source image dimensions overflow"))?;
        if rgba8_premul.len() != expected {
            return Err(PosterError::validation(format!(
                "source image byte len mismatch: expected {expected}, got {}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Natural width in pixels.
    pub fn natural_width(&self) -> u32 {
        self.width
    }

    /// Natural height in pixels.
    pub fn natural_height(&self) -> u32 {
        self.height
    }

    /// Natural size as floating point.
    pub fn natural_size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// `true` when either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Premultiplied pixel bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.rgba8_premul
    }

    /// Premultiplied pixel at `(x, y)`. Callers guarantee the coordinate is in bounds.
    #[inline]
    pub(crate) fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let p = &self.rgba8_premul[idx..idx + 4];
        [p[0], p[1], p[2], p[3]]
    }
}
