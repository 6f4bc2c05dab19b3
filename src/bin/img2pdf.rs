//! CLI binary for img2pdf.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig`, renders a progress bar, and prints the outcome.

use anyhow::{Context, Result};
use clap::Parser;
use img2pdf::{
    convert, ConversionConfig, ConversionProgressCallback, ProgressCallback,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar, one tick per image, the current
/// file name as the bar message.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    /// Create a callback whose bar length is set by `on_run_start`.
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_run_start

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_run_start(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} images  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Converting");
    }

    fn on_image_start(&self, _index: usize, _total: usize, source_name: &str) {
        self.bar.set_message(source_name.to_string());
    }

    fn on_image_complete(&self, _index: usize, _total: usize) {
        self.bar.inc(1);
    }

    fn on_run_complete(&self, _total: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Three images, three pages, in this order
  img2pdf cover.png page2.jpg page3.bmp -o album.pdf

  # Shell glob supplies the ordering
  img2pdf scans/*.png -o scans.pdf

  # Machine-readable result (per-page geometry and scale)
  img2pdf --json photo.jpg -o photo.pdf

  # Quiet mode for scripts
  img2pdf -q *.tiff -o batch.pdf

PAGES:
  Every page is US Letter with a half-inch margin. Each image picks its own
  orientation: portrait when the image is at least as tall as it is wide
  (square images count as portrait), landscape otherwise. The image is
  scaled — up or down — to fit the printable area without distortion and
  centered on the page.

INPUTS:
  PNG, JPEG, BMP, and TIFF are detected by content, not extension. EXIF
  orientation (phone photos) is applied; transparency is flattened onto a
  white background. The first unreadable image aborts the run and names the
  file; nothing is skipped silently.
"#;

/// Convert ordered images into a single multi-page PDF, one page per image.
#[derive(Parser, Debug)]
#[command(
    name = "img2pdf",
    version,
    about = "Convert ordered images into a single multi-page PDF",
    long_about = "Convert an ordered list of raster images (PNG, JPEG, BMP, TIFF) into one \
PDF document, one Letter-size page per image. Page orientation, scaling, and centering are \
chosen per image; EXIF rotation and transparency are normalized automatically.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Image files, in page order.
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Write the PDF to this path.
    #[arg(short, long, env = "IMG2PDF_OUTPUT")]
    output: PathBuf,

    /// Internal PDF document title (defaults to the output file stem).
    #[arg(long, env = "IMG2PDF_TITLE")]
    title: Option<String>,

    /// Print the conversion result as JSON instead of a summary line.
    #[arg(long, env = "IMG2PDF_JSON")]
    json: bool,

    /// Disable the progress bar.
    #[arg(long, env = "IMG2PDF_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "IMG2PDF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "IMG2PDF_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Library INFO logs duplicate what the progress bar already shows, so
    // they stay off unless the bar is disabled or --verbose is set.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new_dynamic() as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };

    let mut builder = ConversionConfig::builder();
    if let Some(cb) = progress_cb {
        builder = builder.progress_callback(cb);
    }
    if let Some(ref title) = cli.title {
        builder = builder.title(title.clone());
    }
    let config = builder.build();

    // ── Run conversion ───────────────────────────────────────────────────
    let result = convert(&cli.images, &cli.output, &config);

    let output = match result {
        Ok(output) => output,
        Err(err) => {
            if !cli.quiet {
                eprintln!("{} {}", red("✘"), err);
            }
            return Err(err).context("Conversion failed");
        }
    };

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    } else if !cli.quiet {
        eprintln!(
            "{} {} pages  {}ms  →  {}",
            green("✔"),
            bold(&output.stats.page_count.to_string()),
            output.stats.total_duration_ms,
            bold(&output.destination.display().to_string()),
        );
        eprintln!(
            "   {} portrait  /  {} landscape",
            dim(&output.stats.portrait_pages.to_string()),
            dim(&output.stats.landscape_pages.to_string()),
        );
    }

    Ok(())
}
