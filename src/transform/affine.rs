//! Affine helpers for pivoted user transforms.

use crate::foundation::core::{Affine, Point, Vec2};

/// User transform around `pivot`.
///
/// Canonical order: `T(pivot) * T(offset) * S(scale) * T(-pivot)`. The offset is folded in
/// before scaling so it is not itself scaled.
pub fn pivot_transform(pivot: Point, offset: Vec2, scale: f64) -> Affine {
    let t_pivot = Affine::translate(pivot.to_vec2());
    let t_offset = Affine::translate(offset);
    let t_scale = Affine::scale(scale);
    let t_unpivot = Affine::translate(-pivot.to_vec2());

    t_pivot * t_offset * t_scale * t_unpivot
}

/// Map a source pixel rectangle of `natural` size onto a destination rectangle at `origin`
/// with `draw` size.
pub fn rect_to_rect(natural: Vec2, origin: Point, draw: Vec2) -> Affine {
    Affine::translate(origin.to_vec2())
        * Affine::scale_non_uniform(draw.x / natural.x, draw.y / natural.y)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/affine.rs"]
mod tests;
