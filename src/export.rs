//! PNG export of rendered symbols

use crate::encoding::InputMode;
use crate::error::Result;
use bytes::Bytes;
use image::{ImageFormat, RgbImage};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Prefix shared by every exported file name
pub const FILENAME_PREFIX: &str = "qrcode";

/// File name used when exporting a symbol for `mode`, e.g. `qrcode-url.png`.
pub fn export_filename(mode: InputMode) -> String {
    format!("{FILENAME_PREFIX}-{mode}.png")
}

/// Encode an image as PNG bytes.
pub fn encode_png(image: &RgbImage) -> Result<Bytes> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(Bytes::from(buffer.into_inner()))
}

/// A PNG-encoded symbol ready to be saved
#[derive(Debug, Clone)]
pub struct PngExport {
    /// Target file name (no directory)
    pub filename: String,
    /// PNG byte stream
    pub bytes: Bytes,
}

impl PngExport {
    /// Encode `image` and pair it with the file name for `mode`.
    pub fn new(mode: InputMode, image: &RgbImage) -> Result<Self> {
        Ok(Self {
            filename: export_filename(mode),
            bytes: encode_png(image)?,
        })
    }

    /// Write the PNG into `dir`, creating it if needed. Existing files are replaced.
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        let _span = tracing::info_span!("export", file = %self.filename).entered();
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        fs::write(&path, &self.bytes)?;
        tracing::info!(path = %path.display(), bytes = self.bytes.len(), "Exported QR code");
        Ok(path)
    }
}
