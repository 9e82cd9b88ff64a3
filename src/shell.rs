//! Line-driven interactive generator
//!
//! Each input line is one form event. After every event the encoding string
//! is recomputed and a one-line preview is printed; `show` prints the full
//! terminal rendering and `export` writes the PNG.

use crate::encoding::{ContactField, InputMode};
use crate::error::{Error, Result};
use crate::output::{GenerationReport, render_result};
use crate::render::{Color, render_terminal};
use crate::state::{FormEvent, Preview, Session};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const HELP: &str = "\
Commands:
  mode <url|text|contact>    switch input mode
  url <address>              set the URL field
  text <text>                set the text field (\\n inserts a line break)
  name|phone|email|org|address|note <value>
                             set a contact field
  extra                      show/hide optional contact fields
  color <name|#RRGGBB>       set the foreground color
  size <128-300>             set the output size in pixels
  show                       print the QR code in the terminal
  export [dir]               save qrcode-<mode>.png
  help                       show this help
  quit                       leave the shell";

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Forward an event to the form
    Form(FormEvent),
    /// Change the foreground color
    Color(Color),
    /// Change the output size
    Size(u32),
    /// Print the full preview
    Show,
    /// Export the PNG, optionally into a specific directory
    Export(Option<PathBuf>),
    /// Print usage
    Help,
    /// Leave the shell
    Quit,
}

impl ShellCommand {
    /// Short name used in tracing spans
    pub fn name(&self) -> &'static str {
        match self {
            ShellCommand::Form(FormEvent::SelectMode(_)) => "mode",
            ShellCommand::Form(FormEvent::SetUrl(_)) => "url",
            ShellCommand::Form(FormEvent::SetText(_)) => "text",
            ShellCommand::Form(FormEvent::SetContactField(field, _)) => field.label(),
            ShellCommand::Form(FormEvent::ToggleExtraFields) => "extra",
            ShellCommand::Color(_) => "color",
            ShellCommand::Size(_) => "size",
            ShellCommand::Show => "show",
            ShellCommand::Export(_) => "export",
            ShellCommand::Help => "help",
            ShellCommand::Quit => "quit",
        }
    }

    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim_start();
        if line.trim().is_empty() {
            return Ok(None);
        }

        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let word = word.to_ascii_lowercase();

        let command = match word.as_str() {
            "mode" | "tab" => {
                let mode = rest
                    .trim()
                    .parse::<InputMode>()
                    .map_err(Error::InvalidCommand)?;
                ShellCommand::Form(FormEvent::SelectMode(mode))
            }
            "url" => ShellCommand::Form(FormEvent::SetUrl(rest.to_string())),
            "text" => ShellCommand::Form(FormEvent::SetText(rest.replace("\\n", "\n"))),
            "extra" => ShellCommand::Form(FormEvent::ToggleExtraFields),
            "color" | "colour" => ShellCommand::Color(Color::parse(rest)?),
            "size" => {
                let size = rest.trim().parse::<u32>().map_err(|e| {
                    Error::InvalidCommand(format!("size expects a number of pixels: {e}"))
                })?;
                ShellCommand::Size(size)
            }
            "show" => ShellCommand::Show,
            "export" | "save" => {
                let dir = rest.trim();
                ShellCommand::Export((!dir.is_empty()).then(|| PathBuf::from(dir)))
            }
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => match other.parse::<ContactField>() {
                Ok(field) => {
                    ShellCommand::Form(FormEvent::SetContactField(field, rest.to_string()))
                }
                Err(_) => {
                    return Err(Error::InvalidCommand(format!(
                        "Unknown command '{other}', type 'help' for a list"
                    )));
                }
            },
        };

        Ok(Some(command))
    }
}

/// Read commands from `reader` until EOF or `quit`, writing feedback to `out`.
///
/// Command errors are reported and the loop continues; only I/O failures end it.
pub async fn run<R, W>(
    reader: R,
    out: &mut W,
    session: &mut Session,
    export_dir: &Path,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "qrmaker interactive shell, type 'help' for commands")?;
    write_summary(out, session)?;

    let mut lines = reader.lines();
    let mut line_no = 0u64;
    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                tracing::debug!(line = line_no, error = %err, "Rejected shell input");
                writeln!(out, "error: {err}")?;
                continue;
            }
        };

        if command == ShellCommand::Quit {
            break;
        }

        let span = tracing::info_span!("shell_command", line = line_no, command = command.name());
        let _entered = span.enter();
        if let Err(err) = execute(command, out, session, export_dir) {
            match err {
                Error::Io(_) => return Err(err),
                other => writeln!(out, "error: {other}")?,
            }
        }
    }

    tracing::debug!("Interactive shell finished");
    Ok(())
}

fn execute<W: Write>(
    command: ShellCommand,
    out: &mut W,
    session: &mut Session,
    export_dir: &Path,
) -> Result<()> {
    match command {
        ShellCommand::Form(event) => {
            session.dispatch(event);
            write_summary(out, session)?;
        }
        ShellCommand::Color(color) => {
            session.set_foreground(color);
            writeln!(out, "color: {color}")?;
        }
        ShellCommand::Size(size) => {
            session.set_size(size)?;
            writeln!(out, "size: {size}px")?;
        }
        ShellCommand::Show => {
            let report = GenerationReport {
                mode: session.state().mode,
                content: session.encoding(),
                options: session.render_options(),
                saved_to: None,
            };
            for line in render_result(&report).human {
                writeln!(out, "{line}")?;
            }
            if session.preview().can_export() {
                writeln!(out, "{}", render_terminal(session.encoding())?)?;
            }
        }
        ShellCommand::Export(dir) => {
            let export = session.export()?;
            let path = export.save_to(dir.as_deref().unwrap_or(export_dir))?;
            writeln!(out, "saved: {}", path.display())?;
        }
        ShellCommand::Help => writeln!(out, "{HELP}")?,
        ShellCommand::Quit => {}
    }
    Ok(())
}

fn write_summary<W: Write>(out: &mut W, session: &Session) -> Result<()> {
    let state = session.state();
    let extra = if state.show_extra_fields {
        " +extra"
    } else {
        ""
    };
    match session.preview() {
        Preview::Placeholder => writeln!(out, "[{}{extra}] (nothing to encode)", state.mode)?,
        Preview::Ready { content } => {
            writeln!(out, "[{}{extra}] {}", state.mode, content.replace('\n', "\u{23CE}"))?
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_form_commands() {
        assert_eq!(
            ShellCommand::parse("mode contact").unwrap(),
            Some(ShellCommand::Form(FormEvent::SelectMode(InputMode::Contact)))
        );
        assert_eq!(
            ShellCommand::parse("url  example.com ").unwrap(),
            Some(ShellCommand::Form(FormEvent::SetUrl(" example.com ".to_string())))
        );
        assert_eq!(
            ShellCommand::parse("url\texample.com").unwrap(),
            Some(ShellCommand::Form(FormEvent::SetUrl("example.com".to_string())))
        );
        assert_eq!(
            ShellCommand::parse("name\tHong Gildong").unwrap(),
            Some(ShellCommand::Form(FormEvent::SetContactField(
                ContactField::Name,
                "Hong Gildong".to_string()
            )))
        );
        assert_eq!(
            ShellCommand::parse("text a\\nb").unwrap(),
            Some(ShellCommand::Form(FormEvent::SetText("a\nb".to_string())))
        );
        assert_eq!(
            ShellCommand::parse("org Example Inc.").unwrap(),
            Some(ShellCommand::Form(FormEvent::SetContactField(
                ContactField::Organization,
                "Example Inc.".to_string()
            )))
        );
        assert_eq!(
            ShellCommand::parse("note").unwrap(),
            Some(ShellCommand::Form(FormEvent::SetContactField(
                ContactField::Note,
                String::new()
            )))
        );
        assert_eq!(
            ShellCommand::parse("extra").unwrap(),
            Some(ShellCommand::Form(FormEvent::ToggleExtraFields))
        );
    }

    #[test]
    fn test_parse_render_commands() {
        assert_eq!(
            ShellCommand::parse("color red").unwrap(),
            Some(ShellCommand::Color(Color::RED))
        );
        assert_eq!(
            ShellCommand::parse("SIZE 256").unwrap(),
            Some(ShellCommand::Size(256))
        );
        assert_eq!(
            ShellCommand::parse("export out/codes").unwrap(),
            Some(ShellCommand::Export(Some(PathBuf::from("out/codes"))))
        );
        assert_eq!(
            ShellCommand::parse("export").unwrap(),
            Some(ShellCommand::Export(None))
        );
        assert_eq!(ShellCommand::parse("   ").unwrap(), None);
        assert_eq!(ShellCommand::parse("quit").unwrap(), Some(ShellCommand::Quit));
    }

    #[test]
    fn test_command_names() {
        let named = |line: &str| ShellCommand::parse(line).unwrap().unwrap().name();
        assert_eq!(named("mode text"), "mode");
        assert_eq!(named("company Example"), "org");
        assert_eq!(named("export out"), "export");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            ShellCommand::parse("mode wifi"),
            Err(Error::InvalidCommand(_))
        ));
        assert!(matches!(
            ShellCommand::parse("size big"),
            Err(Error::InvalidCommand(_))
        ));
        assert!(matches!(
            ShellCommand::parse("color #12"),
            Err(Error::InvalidColor(_))
        ));
        assert!(matches!(
            ShellCommand::parse("frobnicate"),
            Err(Error::InvalidCommand(_))
        ));
    }

    #[tokio::test]
    async fn test_session_script() {
        let script = b"mode text\ntext   hello  \nsize 64\nmode url\nurl \nexport\nbogus\nquit\ntext never read\n";
        let mut session = Session::default();
        let mut out = Vec::new();
        let dir = tempfile::tempdir().unwrap();

        run(&script[..], &mut out, &mut session, dir.path())
            .await
            .unwrap();

        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("[text] hello\n"));
        assert!(transcript.contains("error: Invalid size 64"));
        assert!(transcript.contains("[url] (nothing to encode)"));
        assert!(transcript.contains("error: Nothing to encode"));
        assert!(transcript.contains("error: Invalid command: Unknown command 'bogus'"));
        assert_eq!(session.state().text, "  hello  ");
        assert_eq!(session.state().url, "");
        assert!(!dir.path().join("qrcode-url.png").exists());
    }
}
