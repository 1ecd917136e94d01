use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "posterframe", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export every placement of a JSON document at output resolution.
    Export(ExportArgs),
    /// Print the base-fit rectangle of an image inside a box.
    Fit(FitArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Site {
    /// Square gallery crops (fit-width).
    Gallery,
    /// Full-bleed header (cover).
    Header,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input placements JSON (an array of `{ id, source, transform }`).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory; each image is written as `<id>.<ext>`.
    #[arg(long)]
    out_dir: PathBuf,

    /// Composer config JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Which use site's box sizes and fit policy to export with.
    #[arg(long, value_enum, default_value_t = Site::Gallery)]
    site: Site,

    /// Export items in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct FitArgs {
    /// Natural image width in pixels.
    #[arg(long)]
    width: u32,

    /// Natural image height in pixels.
    #[arg(long)]
    height: u32,

    /// Square box edge (fit-width).
    #[arg(long, conflicts_with_all = ["box_width", "box_height"])]
    edge: Option<f64>,

    /// Box width for a cover fit.
    #[arg(long, requires = "box_height")]
    box_width: Option<f64>,

    /// Box height for a cover fit.
    #[arg(long, requires = "box_width")]
    box_height: Option<f64>,

    /// Vertical anchor for a cover fit.
    #[arg(long, value_enum, default_value_t = Align::Center)]
    align: Align,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Align {
    Top,
    Center,
    Bottom,
}

impl From<Align> for posterframe::VerticalAlign {
    fn from(a: Align) -> Self {
        match a {
            Align::Top => Self::Top,
            Align::Center => Self::Center,
            Align::Bottom => Self::Bottom,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Export(args) => cmd_export(args),
        Command::Fit(args) => cmd_fit(args),
    }
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let cfg = match &args.config {
        Some(path) => posterframe::ComposerConfig::from_path(path)?,
        None => posterframe::ComposerConfig::default(),
    };
    let (job, range) = match args.site {
        Site::Gallery => (cfg.gallery_job(), cfg.gallery_zoom.range),
        Site::Header => (cfg.header_job(), cfg.header_zoom.range),
    };

    let json = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read placements '{}'", args.in_path.display()))?;
    let placements = posterframe::placements_from_json(&json, range)?;
    let sources_root = args.in_path.parent().unwrap_or_else(|| Path::new("."));

    let mut skipped = 0usize;
    let mut seen = BTreeSet::new();
    let mut items = Vec::with_capacity(placements.len());
    for p in placements {
        if !is_plain_file_name(p.id.as_str()) {
            eprintln!("skip '{}': id must be a plain file name", p.id);
            skipped += 1;
            continue;
        }
        if !seen.insert(p.id.clone()) {
            eprintln!("skip {}: duplicate id", p.id);
            skipped += 1;
            continue;
        }
        let path = sources_root.join(&p.source);
        match std::fs::read(&path) {
            Ok(bytes) => items.push(posterframe::ExportItem {
                id: p.id,
                source: posterframe::ExportSource::Encoded(bytes),
                transform: p.transform,
            }),
            Err(e) => {
                eprintln!("skip {}: read '{}': {e}", p.id, path.display());
                skipped += 1;
            }
        }
    }

    let threading = posterframe::ExportThreading {
        parallel: args.parallel,
        threads: args.threads,
    };
    let report = posterframe::export_batch(&items, &job, &threading)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    let ext = job.format.unwrap_or(posterframe::OutputFormat::Png).extension();
    let mut unwritten = 0usize;
    for (id, img) in report.successes() {
        let Some(bytes) = &img.encoded else {
            continue;
        };
        let out = args.out_dir.join(format!("{id}.{ext}"));
        match std::fs::write(&out, bytes) {
            Ok(()) => eprintln!("wrote {}", out.display()),
            Err(e) => {
                eprintln!("failed {id}: write '{}': {e}", out.display());
                unwritten += 1;
            }
        }
    }
    for (id, err) in report.failures() {
        eprintln!("failed {id}: {err}");
    }

    let failed = report.stats.failed + skipped + unwritten;
    if failed > 0 {
        anyhow::bail!(
            "{failed} of {} images failed to export",
            report.stats.total + skipped
        );
    }
    Ok(())
}

/// `true` when `id` is a single normal path component, so `<out_dir>/<id>.<ext>` stays
/// inside `out_dir`.
fn is_plain_file_name(id: &str) -> bool {
    let mut components = Path::new(id).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) => name == id,
        _ => false,
    }
}

fn cmd_fit(args: FitArgs) -> anyhow::Result<()> {
    let (policy, viewport) = match (args.edge, args.box_width, args.box_height) {
        (_, Some(w), Some(h)) => (
            posterframe::FitPolicy::Cover(args.align.into()),
            posterframe::Viewport::new(w, h)?,
        ),
        (edge, _, _) => {
            let edge = edge.unwrap_or(posterframe::ComposerConfig::default().preview_edge);
            (
                posterframe::FitPolicy::FitWidth,
                posterframe::Viewport::new(edge, edge)?,
            )
        }
    };
    let fit = posterframe::fit_in_viewport(
        policy,
        f64::from(args.width),
        f64::from(args.height),
        viewport,
    );
    let out = serde_json::json!({
        "x": fit.x,
        "y": fit.y,
        "draw_width": fit.draw_width,
        "draw_height": fit.draw_height,
    });
    println!("{out}");
    Ok(())
}
