//! Pixel surfaces the engine paints into.
//!
//! A [`Surface`] is one page's worth of RGBA pixels backed by
//! [`image::RgbaImage`]. It is created at the viewport size, handed to the
//! engine once, encoded once, then dropped.

use crate::error::Pdf2PngError;
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Largest width or height a surface may have, in pixels.
pub const MAX_SURFACE_DIMENSION: u32 = 32_767;

/// Pages are painted onto an opaque white background.
const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// An allocated RGBA pixel buffer.
#[derive(Debug, Clone)]
pub struct Surface {
    pixels: RgbaImage,
}

impl Surface {
    /// Allocate a white surface of exactly `width` × `height` pixels.
    ///
    /// `page` is only used to label the error.
    pub fn new(page: u32, width: u32, height: u32) -> Result<Self, Pdf2PngError> {
        if width == 0 || height == 0 {
            return Err(Pdf2PngError::RenderFailed {
                page,
                detail: format!("empty surface {width}x{height}"),
            });
        }
        if width > MAX_SURFACE_DIMENSION || height > MAX_SURFACE_DIMENSION {
            return Err(Pdf2PngError::RenderFailed {
                page,
                detail: format!(
                    "surface {width}x{height} exceeds the {MAX_SURFACE_DIMENSION}px limit; lower the scale"
                ),
            });
        }
        Ok(Self {
            pixels: RgbaImage::from_pixel(width, height, BACKGROUND),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut RgbaImage {
        &mut self.pixels
    }

    /// Copy `image` onto the surface at the origin. Anything outside the
    /// surface bounds is clipped.
    pub fn paint(&mut self, image: &RgbaImage) {
        image::imageops::replace(&mut self.pixels, image, 0, 0);
    }

    /// Encode the surface as PNG with the encoder's default settings.
    pub fn encode_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut buf = Vec::new();
        self.pixels
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
        Ok(buf)
    }
}
