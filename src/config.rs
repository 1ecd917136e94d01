//! Composer configuration: box sizes, scale ranges, wheel sensitivity and export settings
//! for the two image use sites (full-bleed header, gallery crops).

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    foundation::core::{Rgba8, Viewport},
    foundation::error::{PosterError, PosterResult},
    interact::drag::PointerCapture,
    interact::editor::ImageEditor,
    interact::zoom::WheelZoom,
    layout::fit::{FitPolicy, VerticalAlign},
    render::batch::ExportJob,
    render::composite::CompositeParams,
    render::raster::OutputFormat,
};

/// Configuration shared by the editors and the exporter.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComposerConfig {
    /// Edge of the square gallery preview box, in preview units.
    pub preview_edge: f64,
    /// Edge of the square gallery export raster, in pixels.
    pub output_edge: f64,
    /// Header preview box.
    pub header_preview: Viewport,
    /// Header export raster.
    pub header_output: Viewport,
    /// Vertical anchor of the cover-fitted header.
    pub header_align: VerticalAlign,
    /// Wheel zoom for the header.
    pub header_zoom: WheelZoom,
    /// Wheel zoom for gallery crops.
    pub gallery_zoom: WheelZoom,
    /// Document background used to fill exported rasters.
    pub background: Rgba8,
    /// Longest side, in pixels, sources are downscaled to on decode.
    pub max_decode_edge: Option<u32>,
    /// Encoding of exported rasters.
    pub output_format: OutputFormat,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            preview_edge: 320.0,
            output_edge: 1000.0,
            header_preview: Viewport {
                width: 375.0,
                height: 240.0,
            },
            header_output: Viewport {
                width: 1125.0,
                height: 720.0,
            },
            header_align: VerticalAlign::Center,
            header_zoom: WheelZoom::HEADER,
            gallery_zoom: WheelZoom::GALLERY,
            background: Rgba8::WHITE,
            max_decode_edge: Some(2048),
            output_format: OutputFormat::Png,
        }
    }
}

impl ComposerConfig {
    /// Parse and validate a configuration from a JSON reader. Missing fields take defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> PosterResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| PosterError::serde(format!("parse composer config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PosterResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PosterError::validation(format!("open composer config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check box sizes, sensitivities and the decode limit.
    pub fn validate(&self) -> PosterResult<()> {
        Viewport::square(self.preview_edge).validate()?;
        Viewport::square(self.output_edge).validate()?;
        self.header_preview.validate()?;
        self.header_output.validate()?;
        for (name, zoom) in [("header", self.header_zoom), ("gallery", self.gallery_zoom)] {
            if !zoom.sensitivity.is_finite() {
                return Err(PosterError::validation(format!(
                    "{name} wheel sensitivity must be finite"
                )));
            }
        }
        if self.max_decode_edge == Some(0) {
            return Err(PosterError::validation("max_decode_edge must be >= 1 when set"));
        }
        if let OutputFormat::Jpeg { quality } = self.output_format
            && !(1..=100).contains(&quality)
        {
            return Err(PosterError::validation("jpeg quality must be in 1..=100"));
        }
        Ok(())
    }

    /// Compositing parameters for gallery crops.
    pub fn gallery_params(&self) -> CompositeParams {
        CompositeParams::square(self.preview_edge).with_background(self.background)
    }

    /// Compositing parameters for the header.
    pub fn header_params(&self) -> CompositeParams {
        CompositeParams {
            fit: FitPolicy::Cover(self.header_align),
            preview: self.header_preview,
            background: Some(self.background),
        }
    }

    /// Batch export job for gallery crops.
    pub fn gallery_job(&self) -> ExportJob {
        ExportJob {
            params: self.gallery_params(),
            target: Viewport::square(self.output_edge),
            format: Some(self.output_format),
            max_decode_edge: self.max_decode_edge,
        }
    }

    /// Export job for the header.
    pub fn header_job(&self) -> ExportJob {
        ExportJob {
            params: self.header_params(),
            target: self.header_output,
            format: Some(self.output_format),
            max_decode_edge: self.max_decode_edge,
        }
    }

    /// Editor for one gallery item.
    pub fn gallery_editor<C: PointerCapture>(&self, capture: C) -> ImageEditor<C> {
        ImageEditor::new(self.gallery_zoom, capture)
    }

    /// Editor for the header.
    pub fn header_editor<C: PointerCapture>(&self, capture: C) -> ImageEditor<C> {
        ImageEditor::new(self.header_zoom, capture)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
