//! Raster rendering of QR symbols

use crate::error::{Error, Result};
use crate::render::{ERROR_CORRECTION, RenderOptions};
use image::imageops;
use image::{DynamicImage, Rgb, RgbImage};
use qrcode::QrCode;

/// Quiet zone width on each side, in modules
const QUIET_ZONE_MODULES: u32 = 4;

/// Renders encoding strings into square RGB images
#[derive(Debug, Clone, Default)]
pub struct QrRenderer {
    options: RenderOptions,
}

impl QrRenderer {
    /// Create a renderer with the given options
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Options used for rendering
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `content` into a `size x size` image with a quiet zone.
    ///
    /// Modules are whole pixels; leftover space becomes extra white margin.
    /// Empty content is refused with [`Error::NothingToEncode`], and content
    /// needing more modules (quiet zone included) than `size` pixels with
    /// [`Error::ContentTooDense`].
    pub fn render(&self, content: &str) -> Result<RgbImage> {
        if content.is_empty() {
            return Err(Error::NothingToEncode);
        }

        let code = QrCode::with_error_correction_level(content.as_bytes(), ERROR_CORRECTION)
            .map_err(|e| Error::QrEncode(format!("Failed to create QR code: {}", e)))?;

        let size = self.options.size();
        let modules = code.width() as u32 + 2 * QUIET_ZONE_MODULES;
        if modules > size {
            // Fewer pixels than modules: any downscale would merge modules.
            return Err(Error::ContentTooDense { modules, size });
        }

        let image = code
            .render::<Rgb<u8>>()
            .dark_color(self.options.foreground().rgb())
            .light_color(self.options.background().rgb())
            .quiet_zone(true)
            .max_dimensions(size, size)
            .build();

        tracing::debug!(
            version = ?code.version(),
            modules,
            natural = image.width(),
            size,
            "Rendered QR symbol"
        );

        if image.width() == size {
            return Ok(image);
        }

        // Center on a white canvas; the extra margin only widens the quiet zone.
        let mut canvas = RgbImage::from_pixel(size, size, self.options.background().rgb());
        let offset = i64::from((size - image.width()) / 2);
        imageops::overlay(&mut canvas, &image, offset, offset);
        Ok(canvas)
    }

    /// Render into a [`DynamicImage`]
    pub fn render_dynamic(&self, content: &str) -> Result<DynamicImage> {
        Ok(DynamicImage::ImageRgb8(self.render(content)?))
    }
}
