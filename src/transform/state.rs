//! The user transform applied on top of a fit rectangle.

use crate::foundation::core::Vec2;
use crate::foundation::error::{PosterError, PosterResult};

/// Translate + uniform scale, recorded in the units of the space it was captured in.
///
/// `x`/`y` are preview units unless explicitly rescaled with [`Transform::rescaled`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset.
    pub y: f64,
    /// Uniform scale multiplier around the fit rectangle center.
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The transform a freshly attached image starts with.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        scale: 1.0,
    };

    /// Build a transform from its three components.
    pub const fn new(x: f64, y: f64, scale: f64) -> Self {
        Self { x, y, scale }
    }

    /// Translation as a vector.
    pub fn offset(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// `true` when every component is finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.scale.is_finite()
    }

    /// Reject non-finite components and non-positive scales.
    pub fn validate(self) -> PosterResult<()> {
        if !self.is_finite() {
            return Err(PosterError::validation("transform components must be finite"));
        }
        if self.scale <= 0.0 {
            return Err(PosterError::validation("transform scale must be > 0"));
        }
        Ok(())
    }

    /// Same transform with its scale clamped into `range`.
    pub fn clamped(self, range: ScaleRange) -> Self {
        Self {
            scale: range.clamp(self.scale),
            ..self
        }
    }

    /// Translation rescaled per axis, e.g. from preview units to output pixels.
    ///
    /// Scale is a ratio and is left untouched.
    pub fn rescaled(self, ratio: Vec2) -> Self {
        Self {
            x: self.x * ratio.x,
            y: self.y * ratio.y,
            scale: self.scale,
        }
    }

    /// Repair persisted or externally produced values: non-finite offsets reset to 0, a
    /// non-finite or non-positive scale resets to 1, then scale is clamped into `range`.
    pub fn sanitized(self, range: ScaleRange) -> Self {
        let finite_or = |v: f64, d: f64| if v.is_finite() { v } else { d };
        let scale = if self.scale.is_finite() && self.scale > 0.0 {
            self.scale
        } else {
            1.0
        };
        Self {
            x: finite_or(self.x, 0.0),
            y: finite_or(self.y, 0.0),
            scale,
        }
        .clamped(range)
    }
}

/// Inclusive scale bounds. A property of the use site, not of the controllers.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct ScaleRange {
    min: f64,
    max: f64,
}

impl ScaleRange {
    /// Range used by the full-bleed header image.
    pub const HEADER: Self = Self {
        min: 0.1,
        max: 10.0,
    };

    /// Range used by per-item gallery crops.
    pub const GALLERY: Self = Self { min: 0.1, max: 5.0 };

    /// Build a range. Bounds are swapped when given out of order; they must be finite and
    /// positive.
    pub fn new(min: f64, max: f64) -> PosterResult<Self> {
        if !(min.is_finite() && max.is_finite()) {
            return Err(PosterError::validation("scale range bounds must be finite"));
        }
        if min <= 0.0 || max <= 0.0 {
            return Err(PosterError::validation("scale range bounds must be > 0"));
        }
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Ok(Self { min, max })
    }

    /// Lower bound.
    pub fn min(self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(self) -> f64 {
        self.max
    }

    /// Clamp `scale` into the range. NaN maps to the lower bound.
    pub fn clamp(self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.min;
        }
        scale.clamp(self.min, self.max)
    }

    /// `true` when `scale` lies inside the range.
    pub fn contains(self, scale: f64) -> bool {
        scale >= self.min && scale <= self.max
    }
}

impl TryFrom<[f64; 2]> for ScaleRange {
    type Error = PosterError;

    fn try_from(value: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(value[0], value[1])
    }
}

impl From<ScaleRange> for [f64; 2] {
    fn from(value: ScaleRange) -> Self {
        [value.min, value.max]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/state.rs"]
mod tests;
