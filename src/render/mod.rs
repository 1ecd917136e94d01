//! Compositing and export.

/// Batch export with per-item failure isolation.
pub mod batch;
/// Base-fit + user transform compositor.
pub mod composite;
/// Output rasters and the render target trait.
pub mod raster;
