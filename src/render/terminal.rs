//! Terminal preview using Unicode half blocks

use crate::error::{Error, Result};
use crate::render::ERROR_CORRECTION;
use qrcode::QrCode;
use qrcode::render::unicode;

/// Render `content` as Unicode half-block art, two modules per character row.
///
/// Colors are inverted so the symbol reads correctly on dark terminals.
pub fn render_terminal(content: &str) -> Result<String> {
    if content.is_empty() {
        return Err(Error::NothingToEncode);
    }

    let code = QrCode::with_error_correction_level(content.as_bytes(), ERROR_CORRECTION)
        .map_err(|e| Error::QrEncode(format!("Failed to create QR code: {}", e)))?;

    Ok(code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .quiet_zone(true)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_preview_is_square_ish() {
        let art = render_terminal("hello").unwrap();
        let lines: Vec<&str> = art.lines().collect();
        assert!(!lines.is_empty());
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|line| line.chars().count() == width));
        // Two modules per row, so roughly half as many rows as columns.
        assert!(lines.len() * 2 >= width);
    }

    #[test]
    fn test_terminal_preview_refuses_empty() {
        assert!(matches!(render_terminal(""), Err(Error::NothingToEncode)));
    }
}
