//! The document-rendering engine seam.
//!
//! The pipeline never parses or rasterises PDF data itself. It talks to an
//! engine through three traits:
//!
//! ```text
//! RenderEngine ──load_document──▶ DocumentHandle ──page(n)──▶ PageHandle
//!                                   page_count()                size() / viewport()
//!                                                               render(surface, …)
//! ```
//!
//! [`pdfium::PdfiumEngine`] is the production implementation. Documents and
//! pages borrow from the engine, so the pipeline can only hold them for the
//! duration of one conversion.

pub mod pdfium;

use crate::canvas::Surface;
use crate::config::VerbosityLevel;
use crate::error::{DocumentLoadError, Pdf2PngError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use self::pdfium::PdfiumEngine;

/// Where the engine should look for character-map resources.
pub const CMAP_RESOURCE_DIR: &str = "resources/cmaps/";

/// Location and encoding of character-map (cmap) data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CMapLocation {
    pub dir: PathBuf,
    /// Cmaps are stored in the compact binary ("packed") form.
    pub packed: bool,
}

impl Default for CMapLocation {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(CMAP_RESOURCE_DIR),
            packed: true,
        }
    }
}

/// Font handling requested from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontOptions {
    pub disable_embedded_fonts: bool,
    pub use_system_fonts: bool,
}

/// Everything the engine receives alongside the document bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadParams {
    pub cmap: CMapLocation,
    pub fonts: FontOptions,
    pub password: Option<String>,
    pub verbosity: VerbosityLevel,
}

/// Intrinsic page box in PDF points, after page rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

/// Pixel rectangle a page is rasterised into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub scale: f32,
}

impl Viewport {
    /// Scale `size` and truncate to whole pixels, never below one pixel.
    pub fn new(size: PageSize, scale: f32) -> Self {
        let px = |points: f32| ((points * scale).floor() as u32).max(1);
        Self {
            width: px(size.width),
            height: px(size.height),
            scale,
        }
    }
}

/// A PDF rendering backend.
pub trait RenderEngine {
    type Document<'e>: DocumentHandle
    where
        Self: 'e;

    /// Parse `bytes` into a document. Blocks until parsing completes.
    fn load_document(
        &self,
        bytes: Vec<u8>,
        params: &LoadParams,
    ) -> Result<Self::Document<'_>, DocumentLoadError>;
}

/// An open document.
pub trait DocumentHandle {
    type Page<'d>: PageHandle
    where
        Self: 'd;

    fn page_count(&self) -> u32;

    /// Fetch a page by its 1-indexed number.
    fn page(&self, number: u32) -> Result<Self::Page<'_>, Pdf2PngError>;
}

/// One page of an open document.
pub trait PageHandle {
    /// The 1-indexed page number this handle was fetched with.
    fn number(&self) -> u32;

    fn size(&self) -> PageSize;

    fn viewport(&self, scale: f32) -> Viewport {
        Viewport::new(self.size(), scale)
    }

    /// Rasterise the page into `surface`, which is already sized to
    /// `viewport`. Blocks until rendering completes.
    fn render(
        &self,
        surface: &mut Surface,
        viewport: &Viewport,
        fonts: &FontOptions,
    ) -> Result<(), Pdf2PngError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_scales_and_truncates() {
        let a4 = PageSize {
            width: 595.276,
            height: 841.89,
        };
        let v = Viewport::new(a4, 1.0);
        assert_eq!((v.width, v.height), (595, 841));

        let v = Viewport::new(a4, 2.0);
        assert_eq!((v.width, v.height), (1190, 1683));
    }

    #[test]
    fn viewport_is_never_empty() {
        let tiny = PageSize {
            width: 0.2,
            height: 0.2,
        };
        let v = Viewport::new(tiny, 1.0);
        assert_eq!((v.width, v.height), (1, 1));
    }

    #[test]
    fn default_cmap_location_is_packed() {
        let c = CMapLocation::default();
        assert!(c.packed);
        assert_eq!(c.dir, PathBuf::from(CMAP_RESOURCE_DIR));
    }
}
