//! Command-line interface: argument parsing and the one-shot generate path
//!
//! `main` only loads configuration, installs logging and dispatches; the
//! work lives here so it can be driven with any writer.

use crate::config::QrmakerConfig;
use crate::encoding::{ContactRecord, Encoder, InputMode};
use crate::error::{Error, Result};
use crate::output::{GenerationReport, render_result};
use crate::render::{QrDecoder, render_terminal};
use crate::state::{FormState, Session};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "qrmaker",
    version,
    about = "Generate QR codes for URLs, text and contact cards"
)]
pub struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to qrmaker.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Foreground color: black, navy, green, red, purple or #RRGGBB
    #[arg(long, value_name = "COLOR", global = true)]
    pub color: Option<String>,

    /// Output size in pixels (128-300)
    #[arg(long, value_name = "PIXELS", global = true)]
    pub size: Option<u32>,

    /// Directory that receives qrcode-<mode>.png
    #[arg(short, long, value_name = "DIR", global = true)]
    pub out: Option<PathBuf>,

    /// Do not write a PNG file
    #[arg(long, global = true)]
    pub no_save: bool,

    /// Print the QR code to the terminal as well
    #[arg(long, global = true)]
    pub terminal: bool,

    /// Output results as formatted JSON instead of human-readable text
    #[arg(long, global = true)]
    pub json: bool,

    /// Insert vCard values verbatim instead of escaping ; , \ and newlines
    #[arg(long, global = true)]
    pub no_escape: bool,

    /// Keep leading/trailing whitespace in free text
    #[arg(long, global = true)]
    pub keep_whitespace: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// What to generate
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a web address; https:// is added when no scheme is given
    Url {
        /// Address to encode
        address: String,
    },
    /// Encode free text (read from stdin when omitted)
    Text {
        /// Text to encode
        text: Option<String>,
    },
    /// Encode a vCard contact
    Contact(ContactArgs),
    /// Edit the form interactively, one command per line
    Shell,
    /// Decode a QR image and print its content
    Verify {
        /// Image file to decode
        path: PathBuf,
    },
}

/// Contact card fields; omitted fields stay empty
#[derive(Args, Debug)]
pub struct ContactArgs {
    /// Full name
    #[arg(long, default_value = "")]
    pub name: String,
    /// Phone number
    #[arg(long, default_value = "")]
    pub phone: String,
    /// E-mail address
    #[arg(long, default_value = "")]
    pub email: String,
    /// Organization or company
    #[arg(long, alias = "company", default_value = "")]
    pub org: String,
    /// Street address
    #[arg(long, default_value = "")]
    pub address: String,
    /// Free-form note
    #[arg(long, default_value = "")]
    pub note: String,
}

impl From<&ContactArgs> for ContactRecord {
    fn from(args: &ContactArgs) -> Self {
        ContactRecord {
            name: args.name.clone(),
            phone: args.phone.clone(),
            email: args.email.clone(),
            organization: args.org.clone(),
            address: args.address.clone(),
            note: args.note.clone(),
        }
    }
}

impl Cli {
    /// Merge command-line flags over file and environment configuration.
    pub fn apply_overrides(&self, config: &mut QrmakerConfig) {
        if let Some(ref color) = self.color {
            config.render.color = color.clone();
        }
        if let Some(size) = self.size {
            config.render.size = size;
        }
        if let Some(ref out) = self.out {
            config.export.directory = out.clone();
        }
        if self.no_escape {
            config.encoder.escape_vcard = false;
        }
        if self.keep_whitespace {
            config.encoder.trim_text = false;
        }
    }
}

impl Command {
    /// Form snapshot for the one-shot subcommands; `None` for `shell` and `verify`.
    ///
    /// `read_text` supplies the text when `text` is given without an argument.
    pub fn form_state<F>(&self, read_text: F) -> Result<Option<FormState>>
    where
        F: FnOnce() -> Result<String>,
    {
        let form = match self {
            Command::Url { address } => FormState {
                mode: InputMode::Url,
                url: address.clone(),
                ..FormState::empty()
            },
            Command::Text { text } => FormState {
                mode: InputMode::Text,
                text: match text {
                    Some(text) => text.clone(),
                    None => read_text()?,
                },
                ..FormState::empty()
            },
            Command::Contact(args) => FormState {
                mode: InputMode::Contact,
                contact: args.into(),
                ..FormState::empty()
            },
            Command::Shell | Command::Verify { .. } => return Ok(None),
        };
        Ok(Some(form))
    }
}

/// Derive, save and report a single QR code.
///
/// The report is always written to `out`. An empty encoding saves nothing
/// and returns [`Error::NothingToEncode`] after the placeholder report.
/// Returns the saved file path, if any.
pub fn generate<W: Write>(
    cli: &Cli,
    form: FormState,
    config: &QrmakerConfig,
    out: &mut W,
) -> Result<Option<PathBuf>> {
    let options = config.render_options()?;
    let encoder = Encoder::with_options(config.encoder.clone());
    let session = Session::with_state(form, encoder, options);

    let _span = tracing::info_span!("generate", mode = %session.state().mode).entered();
    info!(bytes = session.encoding().len(), "Derived encoding");

    let saved_to = if session.preview().can_export() && !cli.no_save {
        Some(session.export()?.save_to(&config.export.directory)?)
    } else {
        None
    };

    let report = GenerationReport {
        mode: session.state().mode,
        content: session.encoding(),
        options: session.render_options(),
        saved_to: saved_to.as_deref(),
    };
    let rendered = render_result(&report);

    if cli.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&rendered.json)?)?;
    } else {
        for line in &rendered.human {
            writeln!(out, "{line}")?;
        }
    }

    if !session.preview().can_export() {
        return Err(Error::NothingToEncode);
    }

    if cli.terminal {
        writeln!(out, "{}", render_terminal(session.encoding())?)?;
    }

    Ok(saved_to)
}

/// Decode `path` and print its content.
pub fn verify<W: Write>(path: &Path, as_json: bool, out: &mut W) -> Result<()> {
    let content = QrDecoder::new().decode_file(path)?;
    if as_json {
        let payload = json!({
            "path": path.display().to_string(),
            "content": content,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&payload)?)?;
    } else {
        writeln!(out, "{content}")?;
    }
    Ok(())
}
