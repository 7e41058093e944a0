//! Configuration types for PDF-to-PNG conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. [`ConversionConfigBuilder::build`] is
//! the only place defaults and validation are applied: once a config exists,
//! every field holds its final value and the pipeline never falls back to a
//! default on its own.

use crate::error::{PageRangeError, Pdf2PngError};
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Configuration for a PDF-to-PNG conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2png::{ConversionConfig, PageSelection};
///
/// let config = ConversionConfig::builder()
///     .scale(2.0)
///     .pages(PageSelection::List(vec![2, 4]))
///     .output_folder("out")
///     .build()
///     .unwrap();
/// assert_eq!(config.scale, 2.0);
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Viewport scale applied to the intrinsic page box. Default: 1.0.
    ///
    /// At 1.0 one PDF point maps to one pixel (72 DPI).
    pub scale: f32,

    /// Rasterise glyph outlines instead of loading embedded font programs
    /// as platform fonts. Default: true.
    pub disable_embedded_fonts: bool,

    /// Let the engine substitute installed system fonts. Default: false.
    pub use_system_fonts: bool,

    /// User password for encrypted documents.
    pub password: Option<String>,

    /// Folder the PNG files are written to. `None` keeps results in memory.
    pub output_folder: Option<PathBuf>,

    /// Base name for output files. `None` derives it from the input.
    pub output_file_mask: Option<String>,

    /// Pages to render. Default: all pages.
    pub pages: PageSelection,

    /// Reject the whole request when an explicit page is out of range,
    /// instead of skipping it. Default: false.
    pub strict_page_validation: bool,

    /// Engine diagnostic level. Default: [`VerbosityLevel::Errors`].
    pub verbosity: VerbosityLevel,

    /// Optional per-page progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            disable_embedded_fonts: true,
            use_system_fonts: false,
            password: None,
            output_folder: None,
            output_file_mask: None,
            pages: PageSelection::default(),
            strict_page_validation: false,
            verbosity: VerbosityLevel::default(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("scale", &self.scale)
            .field("disable_embedded_fonts", &self.disable_embedded_fonts)
            .field("use_system_fonts", &self.use_system_fonts)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("output_folder", &self.output_folder)
            .field("output_file_mask", &self.output_file_mask)
            .field("pages", &self.pages)
            .field("strict_page_validation", &self.strict_page_validation)
            .field("verbosity", &self.verbosity)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn scale(mut self, scale: f32) -> Self {
        self.config.scale = scale;
        self
    }

    pub fn disable_embedded_fonts(mut self, v: bool) -> Self {
        self.config.disable_embedded_fonts = v;
        self
    }

    pub fn use_system_fonts(mut self, v: bool) -> Self {
        self.config.use_system_fonts = v;
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn output_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.config.output_folder = Some(folder.into());
        self
    }

    pub fn output_file_mask(mut self, mask: impl Into<String>) -> Self {
        self.config.output_file_mask = Some(mask.into());
        self
    }

    pub fn pages(mut self, selection: PageSelection) -> Self {
        self.config.pages = selection;
        self
    }

    pub fn strict_page_validation(mut self, v: bool) -> Self {
        self.config.strict_page_validation = v;
        self
    }

    pub fn verbosity(mut self, level: VerbosityLevel) -> Self {
        self.config.verbosity = level;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    ///
    /// Empty password, mask and output folder values count as unset.
    pub fn build(mut self) -> Result<ConversionConfig, Pdf2PngError> {
        let c = &mut self.config;
        if !c.scale.is_finite() || c.scale <= 0.0 {
            return Err(Pdf2PngError::InvalidConfig(format!(
                "Scale must be a positive number, got {}",
                c.scale
            )));
        }
        if c.password.as_deref() == Some("") {
            c.password = None;
        }
        if c.output_file_mask.as_deref() == Some("") {
            c.output_file_mask = None;
        }
        if c
            .output_folder
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            c.output_folder = None;
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// How much diagnostic output the rendering engine produces.
///
/// The numeric values match the engine's conventional levels so callers
/// can pass either a name or a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Only errors. (default)
    #[default]
    Errors = 0,
    /// Errors and warnings, including skipped pages.
    Warnings = 1,
    /// Everything, including per-page geometry.
    Infos = 5,
}

impl VerbosityLevel {
    pub fn as_number(self) -> u8 {
        self as u8
    }

    /// Map any numeric level onto the nearest named level at or below it.
    pub fn from_number(n: u8) -> Self {
        match n {
            0 => VerbosityLevel::Errors,
            1..=4 => VerbosityLevel::Warnings,
            _ => VerbosityLevel::Infos,
        }
    }
}

impl FromStr for VerbosityLevel {
    type Err = Pdf2PngError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "errors" | "error" => Ok(VerbosityLevel::Errors),
            "warnings" | "warning" | "warn" => Ok(VerbosityLevel::Warnings),
            "infos" | "info" => Ok(VerbosityLevel::Infos),
            other => other.parse::<u8>().map(Self::from_number).map_err(|_| {
                Pdf2PngError::InvalidConfig(format!(
                    "Unknown verbosity '{other}': expected errors, warnings, infos or a number"
                ))
            }),
        }
    }
}

/// Specifies which pages of the PDF to render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSelection {
    /// Every page, in ascending order (default).
    #[default]
    All,
    /// Explicit 1-indexed page numbers, used verbatim: order is kept and
    /// duplicates render more than once.
    List(Vec<i64>),
}

/// Outcome of validating a [`PageSelection`] against a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPages {
    /// Pages to render, in render order.
    pub pages: Vec<u32>,
    /// Requested numbers dropped for lying outside `1..=total`.
    pub skipped: Vec<i64>,
}

impl PageSelection {
    /// Resolve the selection against a document of `total` pages.
    ///
    /// In strict mode any explicit entry below 1 is reported first, then any
    /// entry above `total`; nothing is rendered. Otherwise out-of-range
    /// entries are dropped and listed in [`ResolvedPages::skipped`].
    pub fn resolve(&self, total: u32, strict: bool) -> Result<ResolvedPages, PageRangeError> {
        let requested = match self {
            PageSelection::All => {
                return Ok(ResolvedPages {
                    pages: (1..=total).collect(),
                    skipped: Vec::new(),
                })
            }
            PageSelection::List(pages) => pages,
        };

        if strict {
            if let Some(&page) = requested.iter().find(|&&p| p < 1) {
                return Err(PageRangeError::BelowFirst { page });
            }
            if let Some(&page) = requested.iter().find(|&&p| p > i64::from(total)) {
                return Err(PageRangeError::BeyondLast { page, total });
            }
        }

        let (pages, skipped): (Vec<i64>, Vec<i64>) = requested
            .iter()
            .copied()
            .partition(|&p| p >= 1 && p <= i64::from(total));

        Ok(ResolvedPages {
            // In range, so the narrowing is lossless.
            pages: pages.into_iter().map(|p| p as u32).collect(),
            skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = ConversionConfig::default();
        assert_eq!(c.scale, 1.0);
        assert!(c.disable_embedded_fonts);
        assert!(!c.use_system_fonts);
        assert!(c.password.is_none());
        assert!(c.output_folder.is_none());
        assert!(c.output_file_mask.is_none());
        assert_eq!(c.pages, PageSelection::All);
        assert!(!c.strict_page_validation);
        assert_eq!(c.verbosity, VerbosityLevel::Errors);
    }

    #[test]
    fn explicit_false_is_honoured() {
        let c = ConversionConfig::builder()
            .disable_embedded_fonts(false)
            .build()
            .unwrap();
        assert!(!c.disable_embedded_fonts);
    }

    #[test]
    fn rejects_bad_scale() {
        for scale in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let err = ConversionConfig::builder().scale(scale).build().unwrap_err();
            assert!(matches!(err, Pdf2PngError::InvalidConfig(_)), "scale {scale}");
        }
    }

    #[test]
    fn empty_strings_count_as_unset() {
        let c = ConversionConfig::builder()
            .password("")
            .output_file_mask("")
            .output_folder("")
            .build()
            .unwrap();
        assert!(c.password.is_none());
        assert!(c.output_file_mask.is_none());
        assert!(c.output_folder.is_none());
    }

    #[test]
    fn debug_redacts_password() {
        let c = ConversionConfig::builder().password("hunter2").build().unwrap();
        let dbg = format!("{c:?}");
        assert!(!dbg.contains("hunter2"));
        assert!(dbg.contains("<redacted>"));
    }

    #[test]
    fn verbosity_parsing() {
        assert_eq!("errors".parse::<VerbosityLevel>().unwrap(), VerbosityLevel::Errors);
        assert_eq!("WARN".parse::<VerbosityLevel>().unwrap(), VerbosityLevel::Warnings);
        assert_eq!("infos".parse::<VerbosityLevel>().unwrap(), VerbosityLevel::Infos);
        assert_eq!("5".parse::<VerbosityLevel>().unwrap(), VerbosityLevel::Infos);
        assert_eq!("3".parse::<VerbosityLevel>().unwrap(), VerbosityLevel::Warnings);
        assert_eq!(VerbosityLevel::Infos.as_number(), 5);
        assert!("loud".parse::<VerbosityLevel>().is_err());
    }

    #[test]
    fn all_pages_ascending() {
        let r = PageSelection::All.resolve(5, false).unwrap();
        assert_eq!(r.pages, vec![1, 2, 3, 4, 5]);
        assert!(r.skipped.is_empty());
        assert!(PageSelection::All.resolve(0, true).unwrap().pages.is_empty());
    }

    #[test]
    fn list_keeps_order_and_duplicates() {
        let r = PageSelection::List(vec![3, 1, 3]).resolve(5, false).unwrap();
        assert_eq!(r.pages, vec![3, 1, 3]);
    }

    #[test]
    fn lenient_drops_out_of_range() {
        let r = PageSelection::List(vec![0, 2, 6, -1]).resolve(5, false).unwrap();
        assert_eq!(r.pages, vec![2]);
        assert_eq!(r.skipped, vec![0, 6, -1]);
    }

    #[test]
    fn strict_rejects_below_first_before_beyond_last() {
        let err = PageSelection::List(vec![9, 0]).resolve(5, true).unwrap_err();
        assert_eq!(err, PageRangeError::BelowFirst { page: 0 });

        let err = PageSelection::List(vec![2, 9]).resolve(5, true).unwrap_err();
        assert_eq!(err, PageRangeError::BeyondLast { page: 9, total: 5 });
    }

    #[test]
    fn strict_accepts_valid_list() {
        let r = PageSelection::List(vec![5, 1]).resolve(5, true).unwrap();
        assert_eq!(r.pages, vec![5, 1]);
    }
}
