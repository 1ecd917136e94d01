use rayon::prelude::*;

use crate::{
    assets::decode::decode_image_with_limit,
    assets::source::SourceImage,
    foundation::core::{ImageId, Viewport},
    foundation::error::{PosterError, PosterResult},
    render::composite::{CompositeParams, render_export},
    render::raster::{OutputFormat, RasterBuffer},
    transform::state::Transform,
};

/// Pixels of one batch item, either still encoded or already decoded.
#[derive(Clone, Debug)]
pub enum ExportSource {
    /// Encoded bytes (PNG, JPEG, ...), decoded as part of the item's export.
    Encoded(Vec<u8>),
    /// A source decoded earlier, e.g. the one the editor is showing.
    Decoded(SourceImage),
}

/// One `(image, transform)` pair to export.
#[derive(Clone, Debug)]
pub struct ExportItem {
    /// Identity reported with the item's outcome.
    pub id: ImageId,
    /// Source pixels.
    pub source: ExportSource,
    /// Transform recorded in the job's preview box.
    pub transform: Transform,
}

/// Settings shared by every item of a batch.
#[derive(Clone, Debug)]
pub struct ExportJob {
    /// Fit policy, preview box and background.
    pub params: CompositeParams,
    /// Output box in pixels.
    pub target: Viewport,
    /// Encode each raster when set.
    pub format: Option<OutputFormat>,
    /// Downscale encoded sources whose longer side exceeds this many pixels.
    pub max_decode_edge: Option<u32>,
}

#[derive(Clone, Debug, Default)]
/// Threading controls for batch export.
pub struct ExportThreading {
    /// Export items in parallel when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

/// A successfully exported item.
#[derive(Clone, Debug)]
pub struct ExportedImage {
    /// Composited raster (premultiplied RGBA8).
    pub raster: RasterBuffer,
    /// Encoded bytes when the job requested a format.
    pub encoded: Option<Vec<u8>>,
}

/// Result of one item, tagged with its identity.
#[derive(Debug)]
pub struct ExportOutcome {
    /// Item identity.
    pub id: ImageId,
    /// Exported image or the item's terminal error.
    pub result: PosterResult<ExportedImage>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Aggregated batch counters.
pub struct BatchStats {
    /// Items submitted.
    pub total: usize,
    /// Items exported.
    pub succeeded: usize,
    /// Items that failed.
    pub failed: usize,
}

/// Outcomes in submission order plus counters.
#[derive(Debug)]
pub struct BatchReport {
    /// One outcome per submitted item, in submission order.
    pub outcomes: Vec<ExportOutcome>,
    /// Counters over `outcomes`.
    pub stats: BatchStats,
}

impl BatchReport {
    /// `true` when every item succeeded.
    pub fn is_complete(&self) -> bool {
        self.stats.failed == 0
    }

    /// Failed items with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&ImageId, &PosterError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.id, e)))
    }

    /// Successfully exported items.
    pub fn successes(&self) -> impl Iterator<Item = (&ImageId, &ExportedImage)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|img| (&o.id, img)))
    }
}

/// Export one item: decode (if needed) -> fit -> composite -> encode (if requested).
///
/// Per-image errors carry the item's identity.
pub fn export_one(item: &ExportItem, job: &ExportJob) -> PosterResult<ExportedImage> {
    let decoded;
    let source = match &item.source {
        ExportSource::Decoded(img) => img,
        ExportSource::Encoded(bytes) => {
            decoded = decode_image_with_limit(&item.id, bytes, job.max_decode_edge)?;
            &decoded
        }
    };

    let raster = render_export(&item.id, source, &item.transform, &job.params, job.target)
        .map_err(|e| e.with_image_id(&item.id))?;
    let encoded = match job.format {
        Some(format) => Some(raster.encode(format)?),
        None => None,
    };
    Ok(ExportedImage { raster, encoded })
}

/// Export every item into its own raster.
///
/// Items are independent: a failing item is reported in its outcome and never prevents the
/// others from completing. The outer error is reserved for batch-level problems (invalid
/// job, thread pool construction).
#[tracing::instrument(skip(items, job), fields(items = items.len()))]
pub fn export_batch(
    items: &[ExportItem],
    job: &ExportJob,
    threading: &ExportThreading,
) -> PosterResult<BatchReport> {
    job.target.validate()?;

    let results: Vec<PosterResult<ExportedImage>> = if threading.parallel {
        let pool = build_thread_pool(threading.threads)?;
        pool.install(|| items.par_iter().map(|item| export_one(item, job)).collect())
    } else {
        items.iter().map(|item| export_one(item, job)).collect()
    };

    let mut stats = BatchStats {
        total: items.len(),
        ..BatchStats::default()
    };
    let outcomes = items
        .iter()
        .zip(results)
        .map(|(item, result)| {
            match &result {
                Ok(_) => stats.succeeded += 1,
                Err(err) => {
                    stats.failed += 1;
                    tracing::warn!(id = %item.id, error = %err, "export item failed");
                }
            }
            ExportOutcome {
                id: item.id.clone(),
                result,
            }
        })
        .collect();

    Ok(BatchReport { outcomes, stats })
}

fn build_thread_pool(threads: Option<usize>) -> PosterResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(PosterError::validation(
            "export threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| PosterError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/batch.rs"]
mod tests;
