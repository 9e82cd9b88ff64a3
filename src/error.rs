//! Error types for qrmaker operations

use thiserror::Error;

/// Result type alias using qrmaker's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qrmaker operations
#[derive(Error, Debug)]
pub enum Error {
    /// QR code encoding failed (e.g. content exceeds symbol capacity)
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// Symbol needs more modules than the requested size has pixels
    #[error("Content too dense for {size}px: symbol needs {modules} modules including quiet zone")]
    ContentTooDense {
        /// Modules per side, quiet zone included
        modules: u32,
        /// Requested size in pixels
        size: u32,
    },

    /// QR code decoding failed
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in image
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// The current form state derives an empty encoding string
    #[error("Nothing to encode: fill in the form first")]
    NothingToEncode,

    /// Foreground color could not be parsed
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Pixel size outside the supported range
    #[error("Invalid size {size}: expected {min}..={max} pixels")]
    InvalidSize {
        /// Requested size
        size: u32,
        /// Smallest accepted size
        min: u32,
        /// Largest accepted size
        max: u32,
    },

    /// Interactive shell command could not be parsed
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Other(format!("JSON error: {}", e))
    }
}

impl From<hex::FromHexError> for Error {
    fn from(e: hex::FromHexError) -> Self {
        Error::InvalidColor(format!("hex decode error: {}", e))
    }
}
