//! pdfium-backed [`RenderEngine`].
//!
//! `pdfium-render` wraps the pdfium C++ library. Every call blocks, so the
//! async entry points run the whole pipeline inside `spawn_blocking` (see
//! [`crate::convert::convert`]).
//!
//! pdfium ships its own cmap tables and always rasterises glyph outlines, so
//! the cmap location and `disable_embedded_fonts` are accepted and only
//! logged. pdfium has no switch for system font substitution either:
//! `use_system_fonts` maps to `disable_native_text_rendering(false)`, which
//! lets pdfium draw text through the platform text API (GDI on Windows)
//! instead of as glyph paths. Other platforms render identically.

use super::{DocumentHandle, FontOptions, LoadParams, PageHandle, PageSize, RenderEngine, Viewport};
use crate::canvas::Surface;
use crate::error::{DocumentLoadError, Pdf2PngError};
use pdfium_render::prelude::*;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use tracing::debug;

// pdfium's library state is process-wide: dropping any `Pdfium` tears it
// down for every holder, so the pipeline binds at most once per process.
static SHARED: OnceLock<PdfiumEngine> = OnceLock::new();
static SHARED_INIT: Mutex<()> = Mutex::new(());

/// A bound pdfium library.
pub struct PdfiumEngine {
    pdfium: Pdfium,
}

impl PdfiumEngine {
    /// Bind to pdfium, trying in order:
    ///
    /// 1. `PDFIUM_LIB_PATH`
    /// 2. the directory of the running executable
    /// 3. the current directory
    /// 4. the system library search path
    ///
    /// Dropping the returned engine tears pdfium down for the whole process;
    /// the conversion entry points use [`PdfiumEngine::shared`] instead.
    pub fn bind() -> Result<Self, Pdf2PngError> {
        let mut attempts: Vec<String> = Vec::new();

        for candidate in library_candidates() {
            match Pdfium::bind_to_library(&candidate) {
                Ok(bindings) => {
                    debug!("Bound pdfium from {}", candidate.display());
                    return Ok(Self::from_pdfium(Pdfium::new(bindings)));
                }
                Err(e) => attempts.push(format!("{}: {e:?}", candidate.display())),
            }
        }

        match Pdfium::bind_to_system_library() {
            Ok(bindings) => {
                debug!("Bound system pdfium library");
                Ok(Self::from_pdfium(Pdfium::new(bindings)))
            }
            Err(e) => {
                attempts.push(format!("system library: {e:?}"));
                Err(Pdf2PngError::EngineUnavailable(attempts.join("; ")))
            }
        }
    }

    /// The process-wide engine, bound on first use and never dropped.
    ///
    /// A failed bind is not cached; the next call tries again.
    pub fn shared() -> Result<&'static PdfiumEngine, Pdf2PngError> {
        if let Some(engine) = SHARED.get() {
            return Ok(engine);
        }

        let _guard = SHARED_INIT
            .lock()
            .map_err(|_| Pdf2PngError::Internal("pdfium init lock poisoned".into()))?;
        if let Some(engine) = SHARED.get() {
            return Ok(engine);
        }
        let engine = Self::bind()?;
        Ok(SHARED.get_or_init(|| engine))
    }

    /// Wrap an already bound pdfium instance.
    pub fn from_pdfium(pdfium: Pdfium) -> Self {
        Self { pdfium }
    }
}

fn library_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(p) = std::env::var("PDFIUM_LIB_PATH") {
        if !p.is_empty() {
            candidates.push(PathBuf::from(p));
        }
    }
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|d| d.to_path_buf()))
    {
        candidates.push(Pdfium::pdfium_platform_library_name_at_path(&exe_dir));
    }
    candidates.push(Pdfium::pdfium_platform_library_name_at_path("./"));
    candidates
}

impl RenderEngine for PdfiumEngine {
    type Document<'e> = PdfiumDocument<'e>;

    fn load_document(
        &self,
        bytes: Vec<u8>,
        params: &LoadParams,
    ) -> Result<PdfiumDocument<'_>, DocumentLoadError> {
        debug!(
            "pdfium load: {} bytes, cmaps {} (packed={}), verbosity {}",
            bytes.len(),
            params.cmap.dir.display(),
            params.cmap.packed,
            params.verbosity.as_number()
        );

        let password = params.password.as_deref();
        self.pdfium
            .load_pdf_from_byte_vec(bytes, password)
            .map(|document| PdfiumDocument { document })
            .map_err(|e| classify_load_error(&e, password.is_some()))
    }
}

/// pdfium reports failures as opaque codes; bucket them by name.
fn classify_load_error(e: &PdfiumError, had_password: bool) -> DocumentLoadError {
    let err_str = format!("{:?}", e);
    if err_str.contains("Password") || err_str.contains("password") {
        if had_password {
            DocumentLoadError::WrongPassword
        } else {
            DocumentLoadError::PasswordRequired
        }
    } else if err_str.contains("Format") || err_str.contains("File") {
        DocumentLoadError::Corrupt { detail: err_str }
    } else {
        DocumentLoadError::Unsupported { detail: err_str }
    }
}

/// An open pdfium document.
pub struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
}

impl<'a> DocumentHandle for PdfiumDocument<'a> {
    type Page<'d>
        = PdfiumPage<'a>
    where
        Self: 'd;

    fn page_count(&self) -> u32 {
        u32::from(self.document.pages().len())
    }

    fn page(&self, number: u32) -> Result<PdfiumPage<'a>, Pdf2PngError> {
        let index = number
            .checked_sub(1)
            .and_then(|i| u16::try_from(i).ok())
            .ok_or_else(|| Pdf2PngError::RenderFailed {
                page: number,
                detail: "page number not addressable".into(),
            })?;

        let page = self
            .document
            .pages()
            .get(index)
            .map_err(|e| Pdf2PngError::RenderFailed {
                page: number,
                detail: format!("{:?}", e),
            })?;

        Ok(PdfiumPage { page, number })
    }
}

/// One page of a pdfium document.
pub struct PdfiumPage<'a> {
    page: PdfPage<'a>,
    number: u32,
}

impl PageHandle for PdfiumPage<'_> {
    fn number(&self) -> u32 {
        self.number
    }

    fn size(&self) -> PageSize {
        PageSize {
            width: self.page.width().value,
            height: self.page.height().value,
        }
    }

    fn render(
        &self,
        surface: &mut Surface,
        viewport: &Viewport,
        fonts: &FontOptions,
    ) -> Result<(), Pdf2PngError> {
        if !fonts.disable_embedded_fonts {
            debug!(
                "page {}: embedded font loading requested; pdfium rasterises outlines regardless",
                self.number
            );
        }

        let render_config = PdfRenderConfig::new()
            .set_target_size(viewport.width as i32, viewport.height as i32)
            .disable_native_text_rendering(!fonts.use_system_fonts);

        let bitmap = self
            .page
            .render_with_config(&render_config)
            .map_err(|e| Pdf2PngError::RenderFailed {
                page: self.number,
                detail: format!("{:?}", e),
            })?;

        surface.paint(&bitmap.as_image().to_rgba8());
        Ok(())
    }
}
