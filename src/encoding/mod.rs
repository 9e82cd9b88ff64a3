//! Derivation of the string that gets encoded into a QR symbol
//!
//! Everything in here is pure: the same mode and field values always
//! produce the same output, and no input can make derivation fail. An empty
//! result means there is nothing to encode yet.

mod url;
mod vcard;

pub use url::{DEFAULT_SCHEME, has_scheme, normalize_url, trim_input};
pub use vcard::{ContactField, ContactRecord, VcardEscaping, build_vcard, escape_text};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which form is active and therefore how the encoding string is derived
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// A web address, normalized to carry a scheme
    #[default]
    Url,
    /// Free-form text
    Text,
    /// A vCard contact
    Contact,
}

impl InputMode {
    /// Every mode, in tab order.
    pub const ALL: [InputMode; 3] = [InputMode::Url, InputMode::Text, InputMode::Contact];

    /// Lowercase identifier used on the command line and in file names.
    pub fn as_str(self) -> &'static str {
        match self {
            InputMode::Url => "url",
            InputMode::Text => "text",
            InputMode::Contact => "contact",
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "url" | "link" => Ok(InputMode::Url),
            "text" => Ok(InputMode::Text),
            "contact" | "vcard" => Ok(InputMode::Contact),
            other => Err(format!(
                "Unknown input mode '{other}', expected url, text or contact"
            )),
        }
    }
}

/// Fixed encoder behaviour, loaded from configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EncoderOptions {
    /// Strip leading/trailing whitespace from free text
    pub trim_text: bool,
    /// Escape reserved characters inside vCard values
    pub escape_vcard: bool,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            trim_text: true,
            escape_vcard: true,
        }
    }
}

/// Turns form state into an encoding string
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    options: EncoderOptions,
}

impl Encoder {
    /// Create an encoder with default options (trimmed text, escaped vCards)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder with explicit options
    pub fn with_options(options: EncoderOptions) -> Self {
        Self { options }
    }

    /// Options this encoder was built with
    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    /// Derive the encoding string for `mode`, reading only that mode's fields.
    pub fn derive(
        &self,
        mode: InputMode,
        url_text: &str,
        free_text: &str,
        contact: &ContactRecord,
    ) -> String {
        match mode {
            InputMode::Url => normalize_url(url_text),
            InputMode::Text => {
                if self.options.trim_text {
                    trim_input(free_text).to_string()
                } else {
                    free_text.to_string()
                }
            }
            InputMode::Contact => build_vcard(contact, self.vcard_escaping()),
        }
    }

    fn vcard_escaping(&self) -> VcardEscaping {
        if self.options.escape_vcard {
            VcardEscaping::Escaped
        } else {
            VcardEscaping::Verbatim
        }
    }
}

/// Derive the encoding string with default encoder options.
pub fn derive_encoding(
    mode: InputMode,
    url_text: &str,
    free_text: &str,
    contact: &ContactRecord,
) -> String {
    Encoder::new().derive(mode, url_text, free_text, contact)
}
