//! QR code decoder using rqrr, for checking rendered output

use crate::error::{Error, Result};
use image::{DynamicImage, GrayImage};
use std::path::Path;

/// Decodes QR symbols back into their text content
pub struct QrDecoder {}

impl QrDecoder {
    /// Create a new QR decoder with default settings
    pub fn new() -> Self {
        Self {}
    }

    /// Decode the first QR code found in an image
    pub fn decode(&self, img: &DynamicImage) -> Result<String> {
        self.decode_gray(&img.to_luma8())
    }

    /// Decode the first QR code found in a grayscale image
    pub fn decode_gray(&self, img: &GrayImage) -> Result<String> {
        let mut prepared = rqrr::PreparedImage::prepare(img.clone());
        let grids = prepared.detect_grids();

        let Some(grid) = grids.first() else {
            return Err(Error::NoQrCodeFound);
        };

        match grid.decode() {
            Ok((meta, content)) => {
                tracing::debug!(
                    "Decoded QR: version={:?}, ecc_level={:?}, length={}",
                    meta.version,
                    meta.ecc_level,
                    content.len()
                );
                Ok(content)
            }
            Err(e) => Err(Error::QrDecode(format!("Decode failed: {:?}", e))),
        }
    }

    /// Load an image file (e.g. an exported PNG) and decode it
    pub fn decode_file(&self, path: &Path) -> Result<String> {
        let img = image::open(path)?;
        self.decode(&img)
    }
}

impl Default for QrDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_image_has_no_code() {
        let decoder = QrDecoder::new();
        let blank = GrayImage::from_pixel(200, 200, image::Luma([255u8]));
        assert!(matches!(
            decoder.decode_gray(&blank),
            Err(Error::NoQrCodeFound)
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let decoder = QrDecoder::new();
        assert!(decoder.decode_file(Path::new("does/not/exist.png")).is_err());
    }
}
