use crate::transform::state::{ScaleRange, Transform};

/// Scale change per unit of wheel delta. A 100-unit wheel notch moves scale by 0.1.
pub const DEFAULT_WHEEL_SENSITIVITY: f64 = 0.001;

/// Add `raw_delta * sensitivity` to the scale and clamp into `range`.
///
/// Positive deltas zoom in. Hosts whose wheel events report "scroll down" as positive should
/// negate before calling. A non-finite step leaves the scale where it was (still clamped), so
/// the result is always finite and in range.
pub fn apply_zoom_delta(
    transform: &Transform,
    raw_delta: f64,
    sensitivity: f64,
    range: ScaleRange,
) -> Transform {
    let step = raw_delta * sensitivity;
    let base = range.clamp(transform.scale);
    let scale = if step.is_finite() {
        range.clamp(base + step)
    } else {
        base
    };
    Transform { scale, ..*transform }
}

/// Wheel-zoom configuration of one call site.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WheelZoom {
    /// Scale change per unit of wheel delta.
    pub sensitivity: f64,
    /// Allowed scale range.
    pub range: ScaleRange,
}

impl WheelZoom {
    /// Defaults for the full-bleed header image.
    pub const HEADER: Self = Self {
        sensitivity: DEFAULT_WHEEL_SENSITIVITY,
        range: ScaleRange::HEADER,
    };

    /// Defaults for gallery crops.
    pub const GALLERY: Self = Self {
        sensitivity: DEFAULT_WHEEL_SENSITIVITY,
        range: ScaleRange::GALLERY,
    };

    /// Apply one wheel tick to `transform`.
    pub fn apply(&self, transform: &Transform, raw_delta: f64) -> Transform {
        apply_zoom_delta(transform, raw_delta, self.sensitivity, self.range)
    }
}

impl Default for WheelZoom {
    fn default() -> Self {
        Self::GALLERY
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interact/zoom.rs"]
mod tests;
