//! Conversion result types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One rendered page, in the order pages were requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedPage {
    /// Output file name: `{base}_page_{N}.png`.
    pub name: String,

    /// Encoded PNG bytes. Skipped when serialising a result manifest.
    #[serde(skip)]
    pub content: Vec<u8>,

    /// Absolute path the PNG was written to; `None` when no output folder
    /// was configured.
    pub path: Option<PathBuf>,

    /// 1-indexed page number this image was rendered from.
    pub page_num: u32,

    /// Pixel width of the image.
    pub width: u32,

    /// Pixel height of the image.
    pub height: u32,
}
