//! # pdf2png
//!
//! Rasterise pages of a PDF document to PNG images.
//!
//! The crate is an orchestration layer: PDF parsing and rasterisation are
//! delegated to pdfium (through `pdfium-render`), pixel surfaces and PNG
//! encoding to the `image` crate. What lives here is input handling, page
//! selection, naming and persistence.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF (path or bytes)
//!  │
//!  ├─ 1. Input   check the path exists and read it, or take the buffer
//!  ├─ 2. Load    open the document with password / font / cmap parameters
//!  ├─ 3. Select  all pages, or an explicit list (strict or lenient)
//!  ├─ 4. Render  per page: viewport at scale → surface → engine render
//!  ├─ 5. Encode  surface → PNG bytes
//!  └─ 6. Write   `{base}_page_{N}.png`, optionally to an output folder
//! ```
//!
//! Pages are processed one at a time, in request order. Any error aborts the
//! whole conversion.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2png::{convert, ConversionConfig, PageSelection};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::builder()
//!         .scale(2.0)
//!         .pages(PageSelection::List(vec![1, 3]))
//!         .output_folder("out")
//!         .build()?;
//!     let pages = convert("document.pdf", &config).await?;
//!     for page in &pages {
//!         eprintln!("{}: {}x{} px", page.name, page.width, page.height);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2png` binary (clap + anyhow + serde_json + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! pdf2png = { version = "0.1", default-features = false }
//! ```
//!
//! ## PDFium
//!
//! The pdfium shared library is loaded at runtime from `PDFIUM_LIB_PATH`,
//! the executable's directory, the working directory, or the system library
//! path, in that order.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod canvas;
pub mod config;
pub mod convert;
pub mod engine;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use canvas::Surface;
pub use config::{
    ConversionConfig, ConversionConfigBuilder, PageSelection, ResolvedPages, VerbosityLevel,
};
pub use convert::{convert, convert_sync, convert_with_engine};
pub use engine::{
    DocumentHandle, FontOptions, LoadParams, PageHandle, PageSize, PdfiumEngine, RenderEngine,
    Viewport,
};
pub use error::{DocumentLoadError, PageRangeError, Pdf2PngError};
pub use output::RenderedPage;
pub use pipeline::input::PdfSource;
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
