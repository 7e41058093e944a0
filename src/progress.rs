//! Progress-callback trait for per-page rasterisation events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the pipeline renders each page. The pipeline runs on a blocking
//! thread, so implementations must be `Send + Sync`.
//!
//! # Example
//!
//! ```rust
//! use pdf2png::{ConversionConfig, ConversionProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     written: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for CountingCallback {
//!     fn on_page_complete(&self, page_num: u32, total_pages: usize, png_len: usize) {
//!         self.written.fetch_add(png_len, Ordering::SeqCst);
//!         eprintln!("page {page_num} done ({total_pages} selected)");
//!     }
//! }
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(Arc::new(CountingCallback { written: AtomicUsize::new(0) }))
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the conversion pipeline as it processes each page.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Pages are processed strictly in sequence, so events
/// for one page never interleave with another's.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once after page selection, before any page is rendered.
    ///
    /// # Arguments
    /// * `total_pages` — number of pages that will be rendered
    fn on_conversion_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called just before a page is fetched from the document.
    ///
    /// # Arguments
    /// * `page_num`    — 1-indexed page number
    /// * `total_pages` — number of pages selected for rendering
    fn on_page_start(&self, page_num: u32, total_pages: usize) {
        let _ = (page_num, total_pages);
    }

    /// Called after a page has been encoded (and written, if an output
    /// folder is configured).
    ///
    /// # Arguments
    /// * `page_num`    — 1-indexed page number
    /// * `total_pages` — number of pages selected for rendering
    /// * `png_len`     — size of the encoded PNG in bytes
    fn on_page_complete(&self, page_num: u32, total_pages: usize, png_len: usize) {
        let _ = (page_num, total_pages, png_len);
    }

    /// Called once after the last page completes. Not called on failure.
    fn on_conversion_complete(&self, rendered_pages: usize) {
        let _ = rendered_pages;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
