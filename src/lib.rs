//! Posterframe is the interactive image placement and compositing core of a poster editor.
//!
//! A user positions an image inside a fixed preview box by dragging and wheel-zooming. The
//! resulting pan/zoom state is a plain [`Transform`] that can be persisted, restored and
//! replayed at a different output resolution:
//!
//! - Drive an [`ImageEditor`] from host pointer events
//! - Persist its transform with a [`Placement`]
//! - Render a full-resolution raster with [`render_export`], or many with [`export_batch`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Decoding encoded bytes into source images.
pub mod assets;
/// Editor and exporter configuration.
pub mod config;
/// Persisted image placements.
pub mod document;
/// Direct-manipulation controllers.
pub mod interact;
/// Base-fit geometry.
pub mod layout;
/// Compositing and export.
pub mod render;
/// User transform state and its affine form.
pub mod transform;

pub use crate::foundation::core::{Affine, ImageId, Point, Rect, Rgba8, Size, Vec2, Viewport};
pub use crate::foundation::error::{PosterError, PosterResult};

pub use crate::assets::decode::{decode_image, decode_image_with_limit};
pub use crate::assets::source::SourceImage;
pub use crate::config::ComposerConfig;
pub use crate::document::placement::{Placement, placements_from_json, placements_to_json};
pub use crate::interact::drag::{
    DragController, DragSession, NoCapture, PointerCapture, begin_drag, end_drag, update_drag,
};
pub use crate::interact::editor::{EventResponse, ImageEditor, PointerEvent};
pub use crate::interact::zoom::{DEFAULT_WHEEL_SENSITIVITY, WheelZoom, apply_zoom_delta};
pub use crate::layout::fit::{FitPolicy, FitRect, VerticalAlign, compute_fit, fit_in_viewport};
pub use crate::render::batch::{
    BatchReport, BatchStats, ExportItem, ExportJob, ExportOutcome, ExportSource, ExportThreading,
    ExportedImage, export_batch, export_one,
};
pub use crate::render::composite::{
    CompositeParams, composite, composite_into, image_placement, render_export,
    source_crop_window, visible_center,
};
pub use crate::render::raster::{OutputFormat, RasterBuffer, Surface, fill_surface};
pub use crate::transform::affine::{pivot_transform, rect_to_rect};
pub use crate::transform::state::{ScaleRange, Transform};
