//! Document loading: hand the bytes and load parameters to the engine.

use crate::config::ConversionConfig;
use crate::engine::{CMapLocation, DocumentHandle, FontOptions, LoadParams, RenderEngine};
use crate::error::Pdf2PngError;
use tracing::info;

/// Build the engine's load parameters from a resolved config.
pub fn load_params(config: &ConversionConfig) -> LoadParams {
    LoadParams {
        cmap: CMapLocation::default(),
        fonts: font_options(config),
        password: config.password.clone(),
        verbosity: config.verbosity,
    }
}

pub fn font_options(config: &ConversionConfig) -> FontOptions {
    FontOptions {
        disable_embedded_fonts: config.disable_embedded_fonts,
        use_system_fonts: config.use_system_fonts,
    }
}

/// Parse the document. Engine rejections propagate as
/// [`Pdf2PngError::DocumentLoad`].
pub fn load_document<'e, E: RenderEngine>(
    engine: &'e E,
    bytes: Vec<u8>,
    params: &LoadParams,
) -> Result<E::Document<'e>, Pdf2PngError> {
    let document = engine.load_document(bytes, params)?;
    info!("PDF loaded: {} pages", document.page_count());
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VerbosityLevel;

    #[test]
    fn params_follow_config() {
        let config = ConversionConfig::builder()
            .password("secret")
            .use_system_fonts(true)
            .verbosity(VerbosityLevel::Infos)
            .build()
            .unwrap();

        let p = load_params(&config);
        assert_eq!(p.password.as_deref(), Some("secret"));
        assert!(p.fonts.use_system_fonts);
        assert!(p.fonts.disable_embedded_fonts);
        assert!(p.cmap.packed);
        assert_eq!(p.verbosity, VerbosityLevel::Infos);
    }

    #[test]
    fn default_params() {
        let p = load_params(&ConversionConfig::default());
        assert!(p.password.is_none());
        assert!(!p.fonts.use_system_fonts);
        assert_eq!(p.verbosity, VerbosityLevel::Errors);
    }
}
