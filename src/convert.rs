//! Conversion entry points.
//!
//! [`convert_with_engine`] is the whole pipeline, generic over any
//! [`RenderEngine`]. [`convert`] and [`convert_sync`] run that pipeline on a
//! blocking thread against the process-wide pdfium engine, because every
//! pdfium call blocks.

use crate::config::{ConversionConfig, VerbosityLevel};
use crate::engine::{DocumentHandle, PdfiumEngine, RenderEngine};
use crate::error::Pdf2PngError;
use crate::output::RenderedPage;
use crate::pipeline::input::{resolve_input, PdfSource};
use crate::pipeline::write::{base_name, OutputWriter};
use crate::pipeline::{encode, load, render};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Convert pages of a PDF file or buffer to PNG images.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `input`  — a path (`&str`, `String`, `&Path`, `PathBuf`) or PDF bytes
///   (`Vec<u8>`, `&[u8]`)
/// * `config` — conversion configuration
///
/// # Returns
/// One [`RenderedPage`] per rendered page, in request order.
///
/// # Errors
/// Any failure aborts the whole conversion. PNG files already written for
/// earlier pages are left in place.
///
/// # Example
/// ```rust,no_run
/// use pdf2png::{convert, ConversionConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ConversionConfig::builder().output_folder("pages").build()?;
///     for page in convert("document.pdf", &config).await? {
///         println!("{} → {:?}", page.name, page.path);
///     }
///     Ok(())
/// }
/// ```
pub async fn convert(
    input: impl Into<PdfSource>,
    config: &ConversionConfig,
) -> Result<Vec<RenderedPage>, Pdf2PngError> {
    let source = input.into();
    let config = config.clone();

    tokio::task::spawn_blocking(move || {
        let engine = PdfiumEngine::shared()?;
        convert_with_engine(engine, source, &config)
    })
    .await
    .map_err(|e| Pdf2PngError::Internal(format!("Render task panicked: {}", e)))?
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    input: impl Into<PdfSource>,
    config: &ConversionConfig,
) -> Result<Vec<RenderedPage>, Pdf2PngError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Pdf2PngError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert(input, config))
}

/// Run the conversion pipeline against `engine` on the calling thread.
pub fn convert_with_engine<E: RenderEngine>(
    engine: &E,
    input: impl Into<PdfSource>,
    config: &ConversionConfig,
) -> Result<Vec<RenderedPage>, Pdf2PngError> {
    let start = Instant::now();

    // ── Step 1: Resolve input ────────────────────────────────────────────
    let resolved = resolve_input(input.into())?;
    let writer = OutputWriter::new(
        config.output_folder.as_deref(),
        base_name(config.output_file_mask.as_deref(), resolved.stem.as_deref()),
    )?;

    // ── Step 2: Load document ────────────────────────────────────────────
    let params = load::load_params(config);
    let document = load::load_document(engine, resolved.bytes, &params)?;
    let total_pages = document.page_count();

    // ── Step 3: Select pages ─────────────────────────────────────────────
    let selection = config
        .pages
        .resolve(total_pages, config.strict_page_validation)?;
    if !selection.skipped.is_empty() && config.verbosity >= VerbosityLevel::Warnings {
        warn!(
            "Skipping out-of-range pages {:?} (document has {} pages)",
            selection.skipped, total_pages
        );
    }
    let selected = selection.pages.len();
    debug!("Selected {} pages for rendering", selected);

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(selected);
    }

    // ── Step 4: Render, encode and write, one page at a time ─────────────
    let fonts = load::font_options(config);
    let mut results = Vec::with_capacity(selected);

    for page_num in selection.pages {
        if let Some(ref cb) = config.progress_callback {
            cb.on_page_start(page_num, selected);
        }

        let surface =
            render::render_page(&document, page_num, config.scale, &fonts, config.verbosity)?;
        let png = encode::encode_page(page_num, &surface)?;
        let page = writer.emit(page_num, png, surface.width(), surface.height())?;

        if let Some(ref cb) = config.progress_callback {
            cb.on_page_complete(page_num, selected, page.content.len());
        }
        results.push(page);
    }

    info!(
        "Conversion complete: {}/{} pages in {}ms",
        results.len(),
        total_pages,
        start.elapsed().as_millis()
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(results.len());
    }

    Ok(results)
}
