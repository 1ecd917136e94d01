/// Pivoted affine construction for user transforms.
pub mod affine;
/// Transform state and scale bounds.
pub mod state;
