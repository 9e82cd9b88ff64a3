//! Form state and the session that keeps the preview in sync with it
//!
//! [`FormState`] is an immutable snapshot: every [`FormEvent`] produces a new
//! snapshot and the encoding string is recomputed from scratch. The
//! [`Session`] owns the current snapshot together with the render options
//! and is the only place that swaps snapshots.

use crate::encoding::{ContactField, ContactRecord, Encoder, InputMode};
use crate::error::{Error, Result};
use crate::export::PngExport;
use crate::render::{Color, QrRenderer, RenderOptions};
use image::RgbImage;

/// Snapshot of everything the user has typed or toggled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    /// Active input mode
    pub mode: InputMode,
    /// Contents of the URL field
    pub url: String,
    /// Contents of the free-text field
    pub text: String,
    /// Contents of the contact form
    pub contact: ContactRecord,
    /// Whether optional contact fields are shown; view state only
    pub show_extra_fields: bool,
}

impl FormState {
    /// A form with every field blank
    pub fn empty() -> Self {
        Self {
            mode: InputMode::Url,
            url: String::new(),
            text: String::new(),
            contact: ContactRecord::default(),
            show_extra_fields: false,
        }
    }

    /// Produce the snapshot that results from `event`.
    pub fn apply(&self, event: FormEvent) -> Self {
        let mut next = self.clone();
        match event {
            FormEvent::SelectMode(mode) => next.mode = mode,
            FormEvent::SetUrl(url) => next.url = url,
            FormEvent::SetText(text) => next.text = text,
            FormEvent::SetContactField(field, value) => {
                next.contact = self.contact.with(field, value);
            }
            FormEvent::ToggleExtraFields => next.show_extra_fields = !self.show_extra_fields,
        }
        next
    }

    /// Derive the encoding string for this snapshot.
    pub fn encoding(&self, encoder: &Encoder) -> String {
        encoder.derive(self.mode, &self.url, &self.text, &self.contact)
    }
}

impl Default for FormState {
    /// Sample values shown when the generator first opens
    fn default() -> Self {
        Self {
            mode: InputMode::Url,
            url: "https://example.com".to_string(),
            text: "Type the text you want to encode.".to_string(),
            contact: ContactRecord {
                name: "Hong Gildong".to_string(),
                phone: "010-1234-5678".to_string(),
                email: "hong@example.com".to_string(),
                organization: "Example Inc.".to_string(),
                address: "110 Sejong-daero, Jung-gu, Seoul".to_string(),
                note: String::new(),
            },
            show_extra_fields: false,
        }
    }
}

/// A discrete user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// Switch the active tab
    SelectMode(InputMode),
    /// Replace the URL field
    SetUrl(String),
    /// Replace the free-text field
    SetText(String),
    /// Replace one contact field
    SetContactField(ContactField, String),
    /// Show or hide optional contact fields
    ToggleExtraFields,
}

/// What the preview area should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// Nothing to encode; show a hint and keep export disabled
    Placeholder,
    /// A symbol can be rendered from `content`
    Ready {
        /// The current encoding string
        content: String,
    },
}

impl Preview {
    /// Whether export should be offered
    pub fn can_export(&self) -> bool {
        matches!(self, Preview::Ready { .. })
    }
}

/// Live generator state: current form snapshot, encoder and render options
#[derive(Debug, Clone)]
pub struct Session {
    state: FormState,
    encoder: Encoder,
    renderer: QrRenderer,
    encoding: String,
}

impl Session {
    /// Start a session from the default sample form
    pub fn new(encoder: Encoder, options: RenderOptions) -> Self {
        Self::with_state(FormState::default(), encoder, options)
    }

    /// Start a session from an explicit form snapshot
    pub fn with_state(state: FormState, encoder: Encoder, options: RenderOptions) -> Self {
        let encoding = state.encoding(&encoder);
        Self {
            state,
            encoder,
            renderer: QrRenderer::new(options),
            encoding,
        }
    }

    /// Current form snapshot
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Current encoding string (empty when there is nothing to encode)
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// Current render options
    pub fn render_options(&self) -> &RenderOptions {
        self.renderer.options()
    }

    /// Apply an input event and recompute the encoding string.
    pub fn dispatch(&mut self, event: FormEvent) -> &str {
        tracing::trace!(?event, "Form event");
        self.state = self.state.apply(event);
        self.encoding = self.state.encoding(&self.encoder);
        &self.encoding
    }

    /// Change the foreground color
    pub fn set_foreground(&mut self, color: Color) {
        let options = self.renderer.options().with_foreground(color);
        self.renderer = QrRenderer::new(options);
    }

    /// Change the output size; rejected sizes leave the session untouched
    pub fn set_size(&mut self, size: u32) -> Result<()> {
        let options = self.renderer.options().with_size(size)?;
        self.renderer = QrRenderer::new(options);
        Ok(())
    }

    /// Preview state for the current encoding
    pub fn preview(&self) -> Preview {
        if self.encoding.is_empty() {
            Preview::Placeholder
        } else {
            Preview::Ready {
                content: self.encoding.clone(),
            }
        }
    }

    /// Rasterize the current encoding
    pub fn render(&self) -> Result<RgbImage> {
        if self.encoding.is_empty() {
            return Err(Error::NothingToEncode);
        }
        self.renderer.render(&self.encoding)
    }

    /// Render and PNG-encode the current encoding for saving
    pub fn export(&self) -> Result<PngExport> {
        let image = self.render()?;
        PngExport::new(self.state.mode, &image)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Encoder::new(), RenderOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_switch_preserves_other_fields() {
        let state = FormState::empty().apply(FormEvent::SetUrl("example.org".to_string()));
        let switched = state
            .apply(FormEvent::SelectMode(InputMode::Text))
            .apply(FormEvent::SetText("hi".to_string()))
            .apply(FormEvent::SelectMode(InputMode::Url));

        assert_eq!(switched.url, "example.org");
        assert_eq!(switched.text, "hi");
        assert_eq!(switched.encoding(&Encoder::new()), "https://example.org");
    }

    #[test]
    fn test_apply_does_not_mutate_previous_snapshot() {
        let before = FormState::default();
        let after = before.apply(FormEvent::SetContactField(
            ContactField::Name,
            "Kim".to_string(),
        ));
        assert_eq!(before.contact.name, "Hong Gildong");
        assert_eq!(after.contact.name, "Kim");
    }

    #[test]
    fn test_toggle_extra_fields_does_not_change_encoding() {
        let encoder = Encoder::new();
        let state = FormState::default().apply(FormEvent::SelectMode(InputMode::Contact));
        let toggled = state.apply(FormEvent::ToggleExtraFields);
        assert!(toggled.show_extra_fields);
        assert_eq!(state.encoding(&encoder), toggled.encoding(&encoder));
    }

    #[test]
    fn test_session_recomputes_on_dispatch() {
        let mut session = Session::default();
        assert_eq!(session.encoding(), "https://example.com");

        assert_eq!(
            session.dispatch(FormEvent::SetUrl("rust-lang.org".to_string())),
            "https://rust-lang.org"
        );
        session.dispatch(FormEvent::SetUrl("  ".to_string()));
        assert_eq!(session.preview(), Preview::Placeholder);
        assert!(!session.preview().can_export());
    }

    #[test]
    fn test_session_export_requires_content() {
        let session = Session::with_state(
            FormState::empty(),
            Encoder::new(),
            RenderOptions::default(),
        );
        assert!(matches!(session.export(), Err(Error::NothingToEncode)));
        assert!(matches!(session.render(), Err(Error::NothingToEncode)));
    }

    #[test]
    fn test_session_render_options() {
        let mut session = Session::default();
        session.set_foreground(Color::GREEN);
        session.set_size(256).unwrap();
        assert!(session.set_size(64).is_err());

        assert_eq!(session.render_options().foreground(), Color::GREEN);
        assert_eq!(session.render_options().size(), 256);

        let image = session.render().unwrap();
        assert_eq!(image.dimensions(), (256, 256));

        let export = session.export().unwrap();
        assert_eq!(export.filename, "qrcode-url.png");
    }
}
