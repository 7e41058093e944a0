//! Image encoding: rendered [`Surface`] → PNG bytes.
//!
//! PNG keeps rendered text lossless; the encoder runs with the `image`
//! crate's default compression and filter settings so the same surface
//! always produces the same bytes.

use crate::canvas::Surface;
use crate::error::Pdf2PngError;
use tracing::debug;

/// Encode a rendered page as PNG.
pub fn encode_page(page_num: u32, surface: &Surface) -> Result<Vec<u8>, Pdf2PngError> {
    let png = surface
        .encode_png()
        .map_err(|e| Pdf2PngError::EncodeFailed {
            page: page_num,
            detail: e.to_string(),
        })?;

    debug!("Encoded page {} → {} bytes PNG", page_num, png.len());
    Ok(png)
}
