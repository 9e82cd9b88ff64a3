//! Helpers for presenting generation results on the terminal

use crate::encoding::InputMode;
use crate::render::RenderOptions;
use serde_json::{Map, Value, json};
use std::path::Path;

/// Combined structured and human-readable representation of a generated code
#[derive(Debug, Clone)]
pub struct RenderedQr {
    /// Structured JSON representation suitable for scripting
    pub json: Value,
    /// Human-readable lines for terminal presentation
    pub human: Vec<String>,
}

/// Details of a single generation, borrowed from the caller
#[derive(Debug, Clone, Copy)]
pub struct GenerationReport<'a> {
    /// Mode the content was derived in
    pub mode: InputMode,
    /// Encoding string (may be empty)
    pub content: &'a str,
    /// Render parameters used
    pub options: &'a RenderOptions,
    /// Where the PNG was written, if it was exported
    pub saved_to: Option<&'a Path>,
}

/// Render a generation report into both JSON and human-readable forms.
pub fn render_result(report: &GenerationReport<'_>) -> RenderedQr {
    let json = report_value(report);
    let mut human = Vec::new();

    if report.content.is_empty() {
        human.push("Enter a value to generate a QR code.".to_string());
        return RenderedQr { json, human };
    }

    human.push(format!("Mode: {}", report.mode));
    human.push(format!(
        "Color: {}{}",
        report.options.foreground(),
        report
            .options
            .foreground()
            .palette_name()
            .map(|name| format!(" ({name})"))
            .unwrap_or_default()
    ));
    human.push(format!(
        "Size: {0}x{0} px, error correction H",
        report.options.size()
    ));

    let mut lines = report.content.lines();
    if let Some(first) = lines.next() {
        human.push(format!("Encoded value: {first}"));
    }
    for line in lines {
        human.push(format!("               {line}"));
    }

    if let Some(path) = report.saved_to {
        human.push(format!("Saved: {}", path.display()));
    }

    RenderedQr { json, human }
}

fn report_value(report: &GenerationReport<'_>) -> Value {
    let mut root = Map::new();
    root.insert(
        "mode".to_string(),
        Value::String(report.mode.as_str().to_string()),
    );
    root.insert(
        "content".to_string(),
        Value::String(report.content.to_string()),
    );
    root.insert("empty".to_string(), Value::Bool(report.content.is_empty()));
    root.insert(
        "render".to_string(),
        json!({
            "foreground": report.options.foreground().to_hex(),
            "background": report.options.background().to_hex(),
            "size": report.options.size(),
            "error_correction": "H",
        }),
    );
    root.insert(
        "saved_to".to_string(),
        report
            .saved_to
            .map(|path| Value::String(path.display().to_string()))
            .unwrap_or(Value::Null),
    );
    Value::Object(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Color;

    #[test]
    fn test_json_report() {
        let options = RenderOptions::new(Color::NAVY, 200).unwrap();
        let report = GenerationReport {
            mode: InputMode::Url,
            content: "https://example.com",
            options: &options,
            saved_to: Some(Path::new("out/qrcode-url.png")),
        };
        let rendered = render_result(&report);

        assert_eq!(rendered.json["mode"], "url");
        assert_eq!(rendered.json["content"], "https://example.com");
        assert_eq!(rendered.json["render"]["foreground"], "#1e3a8a");
        assert_eq!(rendered.json["render"]["background"], "#ffffff");
        assert_eq!(rendered.json["render"]["size"], 200);
        assert_eq!(rendered.json["saved_to"], "out/qrcode-url.png");
        assert!(rendered.human.iter().any(|l| l == "Color: #1e3a8a (navy)"));
    }

    #[test]
    fn test_multiline_content_is_indented() {
        let options = RenderOptions::default();
        let report = GenerationReport {
            mode: InputMode::Contact,
            content: "BEGIN:VCARD\nEND:VCARD",
            options: &options,
            saved_to: None,
        };
        let rendered = render_result(&report);
        assert!(rendered.human.contains(&"Encoded value: BEGIN:VCARD".to_string()));
        assert!(rendered.human.contains(&"               END:VCARD".to_string()));
        assert_eq!(rendered.json["saved_to"], Value::Null);
    }

    #[test]
    fn test_empty_content_shows_placeholder() {
        let options = RenderOptions::default();
        let report = GenerationReport {
            mode: InputMode::Text,
            content: "",
            options: &options,
            saved_to: None,
        };
        let rendered = render_result(&report);
        assert_eq!(rendered.human, vec!["Enter a value to generate a QR code.".to_string()]);
        assert_eq!(rendered.json["empty"], true);
    }
}
