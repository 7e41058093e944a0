//! Output writing: name each page and optionally persist it.
//!
//! File names are `{base}_page_{N}.png`, where `base` is the configured mask,
//! else the input file's stem, else [`BUFFER_BASE_NAME`].

use crate::error::Pdf2PngError;
use crate::output::RenderedPage;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Base name used when the input was a buffer and no mask was given.
pub const BUFFER_BASE_NAME: &str = "buffer";

/// Pick the base file name for a conversion.
pub fn base_name(mask: Option<&str>, input_stem: Option<&str>) -> String {
    mask.or(input_stem)
        .unwrap_or(BUFFER_BASE_NAME)
        .to_string()
}

/// Names pages and writes them to the output folder, if any.
#[derive(Debug)]
pub struct OutputWriter {
    folder: Option<PathBuf>,
    base_name: String,
}

impl OutputWriter {
    /// Create the writer, creating `folder` (recursively) when it is absent.
    pub fn new(folder: Option<&Path>, base_name: String) -> Result<Self, Pdf2PngError> {
        let folder = match folder {
            Some(dir) => {
                if !dir.exists() {
                    std::fs::create_dir_all(dir).map_err(|source| {
                        Pdf2PngError::CreateDirFailed {
                            path: dir.to_path_buf(),
                            source,
                        }
                    })?;
                    debug!("Created output folder {}", dir.display());
                }
                let absolute = std::path::absolute(dir).map_err(|source| {
                    Pdf2PngError::CreateDirFailed {
                        path: dir.to_path_buf(),
                        source,
                    }
                })?;
                Some(absolute)
            }
            None => None,
        };
        Ok(Self { folder, base_name })
    }

    pub fn file_name(&self, page_num: u32) -> String {
        format!("{}_page_{}.png", self.base_name, page_num)
    }

    /// Build the result entry for a page, writing it to disk first when an
    /// output folder is configured.
    pub fn emit(
        &self,
        page_num: u32,
        content: Vec<u8>,
        width: u32,
        height: u32,
    ) -> Result<RenderedPage, Pdf2PngError> {
        let name = self.file_name(page_num);

        let path = match &self.folder {
            Some(folder) => {
                let path = folder.join(&name);
                std::fs::write(&path, &content).map_err(|source| {
                    Pdf2PngError::WriteFailed {
                        path: path.clone(),
                        source,
                    }
                })?;
                debug!("Wrote {}", path.display());
                Some(path)
            }
            None => None,
        };

        Ok(RenderedPage {
            name,
            content,
            path,
            page_num,
            width,
            height,
        })
    }
}
