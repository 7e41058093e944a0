//! Error types for the pdf2png library.
//!
//! Every failure is fatal: the conversion either renders the full requested
//! page set or returns one [`Pdf2PngError`]. There is no per-page error
//! channel and no retry. PNG files written for earlier pages before a later
//! failure are left on disk.
//!
//! Two failure families carry their own nested enum so callers can match on
//! the cause without parsing messages:
//!
//! * [`DocumentLoadError`] — the engine rejected the document bytes.
//! * [`PageRangeError`] — strict page validation rejected the request.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdf2png library.
#[derive(Debug, Error)]
pub enum Pdf2PngError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input path does not exist.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    InputNotFound { path: PathBuf },

    /// Input path exists but could not be read.
    #[error("Failed to read PDF file '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Document errors ───────────────────────────────────────────────────
    /// The rendering engine could not open the document.
    #[error(transparent)]
    DocumentLoad(#[from] DocumentLoadError),

    /// Strict page validation failed; nothing was rendered.
    #[error(transparent)]
    InvalidPageRange(#[from] PageRangeError),

    /// The engine or canvas failed while rasterising a page.
    #[error("Rasterisation failed for page {page}: {detail}")]
    RenderFailed { page: u32, detail: String },

    /// The rendered surface could not be encoded to PNG.
    #[error("PNG encoding failed for page {page}: {detail}")]
    EncodeFailed { page: u32, detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create the output folder.
    #[error("Failed to create output folder '{path}': {source}")]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not write a PNG file.
    #[error("Failed to write output file '{path}': {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Engine binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Place libpdfium next to the executable or in the working directory,\n\
install it system-wide, or set PDFIUM_LIB_PATH=/path/to/libpdfium.\n\
Pre-built libraries: https://github.com/bblanchon/pdfium-binaries/releases\n"
    )]
    EngineUnavailable(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Pdf2PngError {
    /// True for errors raised by the filesystem (input read, output folder
    /// creation, output file write).
    pub fn is_file_system(&self) -> bool {
        matches!(
            self,
            Pdf2PngError::ReadFailed { .. }
                | Pdf2PngError::CreateDirFailed { .. }
                | Pdf2PngError::WriteFailed { .. }
        )
    }
}

/// Why the rendering engine refused a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentLoadError {
    /// Header, trailer or cross-reference data is damaged.
    #[error("PDF is corrupt: {detail}")]
    Corrupt { detail: String },

    /// The document is encrypted and no password was supplied.
    #[error("PDF is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired,

    /// A password was supplied but the engine rejected it.
    #[error("Wrong password for PDF")]
    WrongPassword,

    /// The data is not a format the engine understands.
    #[error("Unsupported document: {detail}")]
    Unsupported { detail: String },
}

/// A strict-mode page request that falls outside the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageRangeError {
    #[error("Invalid pages requested: page {page} is below 1 (page numbers must be >= 1)")]
    BelowFirst { page: i64 },

    #[error("Invalid pages requested: page {page} exceeds the document's {total} pages (page numbers must be <= total pages)")]
    BeyondLast { page: i64, total: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_password_is_a_load_error() {
        let e: Pdf2PngError = DocumentLoadError::WrongPassword.into();
        assert!(matches!(
            e,
            Pdf2PngError::DocumentLoad(DocumentLoadError::WrongPassword)
        ));
        assert!(e.to_string().contains("Wrong password"));
    }

    #[test]
    fn page_range_display() {
        let e: Pdf2PngError = PageRangeError::BeyondLast { page: 9, total: 5 }.into();
        let msg = e.to_string();
        assert!(msg.contains("page 9"), "got: {msg}");
        assert!(msg.contains("5 pages"), "got: {msg}");

        let e = PageRangeError::BelowFirst { page: 0 };
        assert!(e.to_string().contains(">= 1"));
    }

    #[test]
    fn render_failed_display() {
        let e = Pdf2PngError::RenderFailed {
            page: 3,
            detail: "bitmap allocation failed".into(),
        };
        assert!(e.to_string().contains("page 3"));
        assert!(e.to_string().contains("bitmap allocation failed"));
    }

    #[test]
    fn file_system_family() {
        let io = || std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(Pdf2PngError::WriteFailed {
            path: "out/a.png".into(),
            source: io(),
        }
        .is_file_system());
        assert!(Pdf2PngError::CreateDirFailed {
            path: "out".into(),
            source: io(),
        }
        .is_file_system());
        assert!(!Pdf2PngError::InputNotFound {
            path: "missing.pdf".into()
        }
        .is_file_system());
    }
}
