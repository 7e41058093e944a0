//! Page rasterisation: page handle → viewport → surface → engine render.

use crate::canvas::Surface;
use crate::config::VerbosityLevel;
use crate::engine::{DocumentHandle, FontOptions, PageHandle};
use crate::error::Pdf2PngError;
use tracing::{debug, info};

/// Render one in-range page into a freshly allocated surface.
///
/// The surface is exactly the size of the page's viewport at `scale`.
pub fn render_page<D: DocumentHandle>(
    document: &D,
    page_num: u32,
    scale: f32,
    fonts: &FontOptions,
    verbosity: VerbosityLevel,
) -> Result<Surface, Pdf2PngError> {
    let page = document.page(page_num)?;
    let number = page.number();
    let viewport = page.viewport(scale);

    if verbosity >= VerbosityLevel::Infos {
        let size = page.size();
        info!(
            "Page {}: {:.1}x{:.1} pt at scale {} → {}x{} px",
            number, size.width, size.height, scale, viewport.width, viewport.height
        );
    }

    let mut surface = Surface::new(number, viewport.width, viewport.height)?;
    page.render(&mut surface, &viewport, fonts)?;

    debug!(
        "Rendered page {} → {}x{} px",
        number,
        surface.width(),
        surface.height()
    );
    Ok(surface)
}
