//! qrmaker - QR code generator for URLs, free text and contact cards
//!
//! The interesting part is the mapping from form input to the string that
//! gets encoded: URLs are normalized to carry a scheme, free text is passed
//! through, and contacts become vCard 3.0 text. Symbol construction itself
//! is delegated to the `qrcode` crate.
//!
//! # Features
//!
//! - **Encoding**: pure, total derivation of the encoding string per input mode
//! - **Session**: immutable form snapshots with recompute-on-change
//! - **Rendering**: fixed white background, highest error correction, 128-300 px
//! - **Export**: PNG bytes and a fixed `qrcode-<mode>.png` file name
//!
//! # Example
//!
//! ```no_run
//! use qrmaker::{Color, Encoder, FormEvent, InputMode, RenderOptions, Session};
//!
//! fn main() -> qrmaker::Result<()> {
//!     let options = RenderOptions::new(Color::NAVY, 256)?;
//!     let mut session = Session::new(Encoder::new(), options);
//!
//!     session.dispatch(FormEvent::SelectMode(InputMode::Url));
//!     session.dispatch(FormEvent::SetUrl("example.com".to_string()));
//!     assert_eq!(session.encoding(), "https://example.com");
//!
//!     let path = session.export()?.save_to(std::path::Path::new("."))?;
//!     println!("saved {}", path.display());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod cli;
pub mod config;
pub mod encoding;
pub mod error;
pub mod export;
pub mod logging;
pub mod output;
pub mod render;
pub mod shell;
pub mod state;

// Re-exports for convenience
pub use error::{Error, Result};

pub use config::{ExportOptions, LogRotation, LoggingOptions, QrmakerConfig, RenderDefaults};
pub use encoding::{
    ContactField, ContactRecord, Encoder, EncoderOptions, InputMode, derive_encoding,
};
pub use export::{PngExport, export_filename};
pub use render::{Color, QrDecoder, QrRenderer, RenderOptions};
pub use state::{FormEvent, FormState, Preview, Session};
