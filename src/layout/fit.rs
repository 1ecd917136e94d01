//! Base-fit calculation: where an image sits inside a box before any user transform.
//!
//! Two policies exist, one per use site:
//!
//! - [`FitPolicy::FitWidth`] (gallery crops): the image width fills the box and the height
//!   follows the aspect ratio. This alone does not guarantee full coverage; the user's
//!   translate/scale does the rest.
//! - [`FitPolicy::Cover`] (full-bleed header): the image covers the whole box, overflow is
//!   clipped, and the vertical anchor is configurable.

use crate::foundation::core::{Point, Rect, Vec2, Viewport};

/// Vertical anchor for cover-fitted images whose height overflows the box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlign {
    /// Keep the top edge visible.
    Top,
    /// Center the image vertically.
    #[default]
    Center,
    /// Keep the bottom edge visible.
    Bottom,
}

/// Base-fit policy of a use site.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitPolicy {
    /// Width fills the box, height follows the aspect ratio, anchored at the origin.
    #[default]
    FitWidth,
    /// Image covers the box, horizontally centered, vertically anchored by the alignment.
    Cover(VerticalAlign),
}

/// Pre-transform draw rectangle of an image inside a box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitRect {
    /// Left edge inside the box.
    pub x: f64,
    /// Top edge inside the box.
    pub y: f64,
    /// Drawn width.
    pub draw_width: f64,
    /// Drawn height.
    pub draw_height: f64,
}

impl FitRect {
    fn at_origin(draw_width: f64, draw_height: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            draw_width,
            draw_height,
        }
    }

    /// Top-left corner.
    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Drawn size as a vector.
    pub fn size(self) -> Vec2 {
        Vec2::new(self.draw_width, self.draw_height)
    }

    /// Geometric center; the pivot for user scaling.
    pub fn center(self) -> Point {
        Point::new(
            self.x + self.draw_width / 2.0,
            self.y + self.draw_height / 2.0,
        )
    }

    /// The rectangle in box coordinates.
    pub fn to_rect(self) -> Rect {
        Rect::new(
            self.x,
            self.y,
            self.x + self.draw_width,
            self.y + self.draw_height,
        )
    }
}

/// Fit-width rule for a square box of edge `target_edge`.
///
/// A zero (or otherwise unusable) natural width yields a `target_edge` square instead of
/// dividing by zero.
pub fn compute_fit(natural_w: f64, natural_h: f64, target_edge: f64) -> FitRect {
    fit_width(natural_w, natural_h, Viewport::square(target_edge))
}

/// Fit rectangle for `policy` inside `viewport`.
pub fn fit_in_viewport(
    policy: FitPolicy,
    natural_w: f64,
    natural_h: f64,
    viewport: Viewport,
) -> FitRect {
    match policy {
        FitPolicy::FitWidth => fit_width(natural_w, natural_h, viewport),
        FitPolicy::Cover(align) => cover(natural_w, natural_h, viewport, align),
    }
}

fn fit_width(natural_w: f64, natural_h: f64, viewport: Viewport) -> FitRect {
    let fallback = FitRect::at_origin(viewport.width, viewport.height);
    if natural_w == 0.0 {
        return fallback;
    }
    let draw_height = viewport.width * natural_h / natural_w;
    if !draw_height.is_finite() || draw_height < 0.0 {
        return fallback;
    }
    FitRect::at_origin(viewport.width, draw_height)
}

fn cover(natural_w: f64, natural_h: f64, viewport: Viewport, align: VerticalAlign) -> FitRect {
    let fallback = FitRect::at_origin(viewport.width, viewport.height);
    if !(natural_w > 0.0 && natural_h > 0.0) {
        return fallback;
    }
    let scale = (viewport.width / natural_w).max(viewport.height / natural_h);
    if !scale.is_finite() {
        return fallback;
    }

    let draw_width = natural_w * scale;
    let draw_height = natural_h * scale;
    let x = (viewport.width - draw_width) / 2.0;
    let y = match align {
        VerticalAlign::Top => 0.0,
        VerticalAlign::Center => (viewport.height - draw_height) / 2.0,
        VerticalAlign::Bottom => viewport.height - draw_height,
    };
    FitRect {
        x,
        y,
        draw_width,
        draw_height,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;
