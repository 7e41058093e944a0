//! CLI binary for pdf2png.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and reports the written files.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2png::{
    convert, ConversionConfig, ConversionProgressCallback, PageSelection, PdfSource,
    ProgressCallback, VerbosityLevel,
};
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a spinner until the page count is known,
/// then a bar that advances once per written page.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Opening PDF…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }

    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} pages  \
             ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Rendering");
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, total_pages: usize) {
        self.activate_bar(total_pages);
    }

    fn on_page_start(&self, page_num: u32, _total: usize) {
        self.bar.set_message(format!("page {page_num}"));
    }

    fn on_page_complete(&self, page_num: u32, total: usize, png_len: usize) {
        self.bar.println(format!(
            "  {} Page {:>3}  {}",
            green("✓"),
            page_num,
            dim(&format!("{:>8} bytes  ({total} selected)", png_len)),
        ));
        self.bar.inc(1);
    }

    fn on_conversion_complete(&self, rendered_pages: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {} pages rendered",
            green("✔"),
            bold(&rendered_pages.to_string())
        );
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Every page into the current directory (document_page_N.png)
  pdf2png document.pdf

  # Pages 2 and 4 at double resolution into ./out
  pdf2png --pages 2,4 --scale 2 -o out document.pdf

  # Same page twice, custom order, custom base name
  pdf2png --pages 3,1,3 --mask cover document.pdf

  # Fail instead of skipping pages the document does not have
  pdf2png --pages 1-10 --strict document.pdf

  # Read the PDF from stdin (files are named buffer_page_N.png)
  cat document.pdf | pdf2png -

  # Machine-readable manifest
  pdf2png --json document.pdf > pages.json

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH         Path to libpdfium (otherwise: next to the binary,
                          the working directory, then the system library)
  RUST_LOG                Override the log filter (e.g. pdf2png=debug)
"#;

/// Rasterise PDF pages to PNG images.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2png",
    version,
    about = "Rasterise PDF pages to PNG images",
    long_about = "Render pages of a PDF document (file or stdin) to PNG images using pdfium. \
Pages are written as {name}_page_{N}.png in request order.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// PDF file path, or `-` to read the PDF from stdin.
    input: String,

    /// Folder to write PNG files into (created if missing).
    #[arg(short, long, env = "PDF2PNG_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Base name for output files. Default: input file name, or `buffer` for stdin.
    #[arg(long, env = "PDF2PNG_MASK")]
    mask: Option<String>,

    /// Viewport scale; 1.0 renders one pixel per PDF point.
    #[arg(short, long, env = "PDF2PNG_SCALE", default_value_t = 1.0)]
    scale: f32,

    /// Page selection: all, 5, 2-4, or 1,3,3,2 (order and repeats kept).
    #[arg(long, env = "PDF2PNG_PAGES", default_value = "all", allow_hyphen_values = true)]
    pages: String,

    /// Fail when a requested page is outside the document instead of skipping it.
    #[arg(long, env = "PDF2PNG_STRICT")]
    strict: bool,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDF2PNG_PASSWORD")]
    password: Option<String>,

    /// Load embedded fonts instead of rasterising glyph outlines.
    #[arg(long, env = "PDF2PNG_EMBEDDED_FONTS")]
    embedded_fonts: bool,

    /// Allow substitution of installed system fonts.
    #[arg(long, env = "PDF2PNG_SYSTEM_FONTS")]
    system_fonts: bool,

    /// Engine diagnostics: errors, warnings, infos, or a number.
    #[arg(long, env = "PDF2PNG_VERBOSITY", default_value = "errors")]
    verbosity: String,

    /// Print a JSON manifest of the written pages to stdout.
    #[arg(long, env = "PDF2PNG_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "PDF2PNG_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2PNG_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2PNG_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO-level library logs.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        let cb = CliProgressCallback::new_dynamic();
        Some(cb as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;
    let source = read_source(&cli.input)?;

    // ── Run conversion ───────────────────────────────────────────────────
    let start = Instant::now();
    let pages = convert(source, &config)
        .await
        .context("Conversion failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&pages).context("Failed to serialise manifest")?;
        println!("{json}");
    } else if !cli.quiet {
        for page in &pages {
            if let Some(ref path) = page.path {
                println!("{}", path.display());
            }
        }
        eprintln!(
            "{}  {} pages  {}ms  →  {}",
            cyan("◆"),
            pages.len(),
            start.elapsed().as_millis(),
            bold(&cli.output_dir.display().to_string()),
        );
    }

    Ok(())
}

/// `-` reads the whole PDF from stdin; anything else is a path.
fn read_source(input: &str) -> Result<PdfSource> {
    if input == "-" {
        let mut bytes = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .context("Failed to read PDF from stdin")?;
        Ok(PdfSource::Bytes(bytes))
    } else {
        Ok(PdfSource::Path(PathBuf::from(input)))
    }
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let pages = parse_pages(&cli.pages)?;
    let verbosity: VerbosityLevel = cli.verbosity.parse().context("Invalid --verbosity")?;

    let mut builder = ConversionConfig::builder()
        .scale(cli.scale)
        .disable_embedded_fonts(!cli.embedded_fonts)
        .use_system_fonts(cli.system_fonts)
        .output_folder(&cli.output_dir)
        .pages(pages)
        .strict_page_validation(cli.strict)
        .verbosity(verbosity);

    if let Some(ref mask) = cli.mask {
        builder = builder.output_file_mask(mask);
    }
    if let Some(ref password) = cli.password {
        builder = builder.password(password);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Longest `a-b` range accepted by `--pages`; pdfium addresses pages with
/// a 16-bit index, so no document has more.
const MAX_RANGE_PAGES: i64 = u16::MAX as i64 + 1;

/// Parse `--pages` into a `PageSelection`.
///
/// Comma-separated items are single numbers or ascending `a-b` ranges.
/// Numbers outside the document are kept; the library skips or rejects them
/// depending on `--strict`.
fn parse_pages(s: &str) -> Result<PageSelection> {
    let s = s.trim().to_lowercase();

    if s == "all" {
        return Ok(PageSelection::All);
    }

    let mut pages = Vec::new();
    for item in s.split(',').map(str::trim) {
        match item.split_once('-').filter(|(start, _)| !start.is_empty()) {
            Some((start, end)) => {
                let start: i64 = start
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid start page in range '{item}'"))?;
                let end: i64 = end
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid end page in range '{item}'"))?;
                if start > end {
                    anyhow::bail!("Invalid page range '{item}': start must be <= end");
                }
                if end.checked_sub(start).is_none_or(|span| span >= MAX_RANGE_PAGES) {
                    anyhow::bail!(
                        "Invalid page range '{item}': spans more than {MAX_RANGE_PAGES} pages"
                    );
                }
                pages.extend(start..=end);
            }
            None => pages.push(
                item.parse::<i64>()
                    .with_context(|| format!("Invalid page number: '{item}'"))?,
            ),
        }
    }

    Ok(PageSelection::List(pages))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all() {
        assert_eq!(parse_pages("ALL").unwrap(), PageSelection::All);
    }

    #[test]
    fn parse_list_keeps_order_and_repeats() {
        assert_eq!(
            parse_pages("3,1,3").unwrap(),
            PageSelection::List(vec![3, 1, 3])
        );
    }

    #[test]
    fn parse_ranges_and_singles() {
        assert_eq!(
            parse_pages("2-4, 7").unwrap(),
            PageSelection::List(vec![2, 3, 4, 7])
        );
        assert_eq!(parse_pages("5").unwrap(), PageSelection::List(vec![5]));
    }

    #[test]
    fn parse_keeps_out_of_range_numbers() {
        assert_eq!(
            parse_pages("0,-1").unwrap(),
            PageSelection::List(vec![0, -1])
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_pages("4-2").is_err());
        assert!(parse_pages("one").is_err());
        assert!(parse_pages("1,,2").is_err());
    }

    #[test]
    fn parse_rejects_huge_range() {
        assert!(parse_pages("1-99999999999").is_err());
        assert!(parse_pages("1-65537").is_err());
        assert!(parse_pages("1-9223372036854775807").is_err());
    }

    #[test]
    fn parse_accepts_range_up_to_pdfium_limit() {
        match parse_pages("1-65536").unwrap() {
            PageSelection::List(pages) => {
                assert_eq!(pages.len(), 65_536);
                assert_eq!(pages.last(), Some(&65_536));
            }
            other => panic!("expected a list, got {other:?}"),
        }
    }
}
