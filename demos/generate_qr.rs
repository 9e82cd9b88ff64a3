//! Generate a URL and a contact QR code and save them as PNG files
//!
//! Usage: cargo run --example generate_qr

use qrmaker::{Color, ContactField, Encoder, FormEvent, InputMode, RenderOptions, Session};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let options = RenderOptions::new(Color::NAVY, 256)?;
    let mut session = Session::new(Encoder::new(), options);

    session.dispatch(FormEvent::SetUrl("github.com/ghostkellz".to_string()));
    let path = session.export()?.save_to(Path::new("."))?;
    println!("✓ URL QR code saved to {}", path.display());
    println!("  Content: {}", session.encoding());

    session.dispatch(FormEvent::SelectMode(InputMode::Contact));
    session.dispatch(FormEvent::SetContactField(
        ContactField::Note,
        "Scanned from the demo".to_string(),
    ));
    let path = session.export()?.save_to(Path::new("."))?;
    println!("✓ Contact QR code saved to {}", path.display());
    println!("{}", session.encoding());

    Ok(())
}
