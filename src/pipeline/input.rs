//! Input resolution: turn a byte buffer or a path into document bytes.
//!
//! A path is checked for existence before anything else happens, so a typo
//! fails fast with [`Pdf2PngError::InputNotFound`] instead of surfacing as an
//! engine error. Buffers skip the filesystem entirely.

use crate::error::Pdf2PngError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the PDF comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfSource {
    /// PDF data already in memory.
    Bytes(Vec<u8>),
    /// A PDF file on disk.
    Path(PathBuf),
}

impl From<Vec<u8>> for PdfSource {
    fn from(bytes: Vec<u8>) -> Self {
        PdfSource::Bytes(bytes)
    }
}

impl From<&[u8]> for PdfSource {
    fn from(bytes: &[u8]) -> Self {
        PdfSource::Bytes(bytes.to_vec())
    }
}

impl From<PathBuf> for PdfSource {
    fn from(path: PathBuf) -> Self {
        PdfSource::Path(path)
    }
}

impl From<&Path> for PdfSource {
    fn from(path: &Path) -> Self {
        PdfSource::Path(path.to_path_buf())
    }
}

impl From<&PathBuf> for PdfSource {
    fn from(path: &PathBuf) -> Self {
        PdfSource::Path(path.clone())
    }
}

impl From<&str> for PdfSource {
    fn from(path: &str) -> Self {
        PdfSource::Path(PathBuf::from(path))
    }
}

impl From<String> for PdfSource {
    fn from(path: String) -> Self {
        PdfSource::Path(PathBuf::from(path))
    }
}

/// Document bytes plus what the output writer needs to know about their origin.
#[derive(Debug)]
pub struct ResolvedInput {
    pub bytes: Vec<u8>,
    /// File name of the input without directory and extension; `None` for
    /// buffers.
    pub stem: Option<String>,
}

/// Read the source into memory.
pub fn resolve_input(source: PdfSource) -> Result<ResolvedInput, Pdf2PngError> {
    match source {
        PdfSource::Bytes(bytes) => {
            debug!("Using in-memory PDF buffer ({} bytes)", bytes.len());
            Ok(ResolvedInput { bytes, stem: None })
        }
        PdfSource::Path(path) => resolve_local(path),
    }
}

fn resolve_local(path: PathBuf) -> Result<ResolvedInput, Pdf2PngError> {
    if !path.exists() {
        return Err(Pdf2PngError::InputNotFound { path });
    }

    let bytes = std::fs::read(&path).map_err(|source| Pdf2PngError::ReadFailed {
        path: path.clone(),
        source,
    })?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned());

    debug!("Resolved local PDF: {} ({} bytes)", path.display(), bytes.len());
    Ok(ResolvedInput { bytes, stem })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_skips_filesystem() {
        let r = resolve_input(PdfSource::from(&b"%PDF-1.7"[..])).unwrap();
        assert_eq!(r.bytes, b"%PDF-1.7");
        assert!(r.stem.is_none());
    }

    #[test]
    fn missing_path_is_not_found() {
        let err = resolve_input("/definitely/not/a/real/file.pdf".into()).unwrap_err();
        assert!(matches!(err, Pdf2PngError::InputNotFound { .. }));
    }

    #[test]
    fn path_yields_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("annual.report.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let r = resolve_input(path.into()).unwrap();
        assert_eq!(r.bytes, b"%PDF-1.4");
        assert_eq!(r.stem.as_deref(), Some("annual.report"));
    }

    #[test]
    fn directory_is_a_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_input(dir.path().into()).unwrap_err();
        assert!(err.is_file_system(), "got: {err}");
    }
}
