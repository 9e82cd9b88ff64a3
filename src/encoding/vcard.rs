//! vCard 3.0 construction for contact QR codes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Contact details entered by the user. Empty strings mean "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactRecord {
    /// Formatted name (`FN`)
    pub name: String,
    /// Telephone number (`TEL`), not validated
    pub phone: String,
    /// E-mail address (`EMAIL`), not validated
    pub email: String,
    /// Organization or company name (`ORG`)
    pub organization: String,
    /// Free-form street address, placed in the street component of `ADR`
    pub address: String,
    /// Optional note (`NOTE`), emitted only when non-empty
    pub note: String,
}

impl ContactRecord {
    /// True when no field carries any text.
    pub fn is_empty(&self) -> bool {
        ContactField::ALL
            .iter()
            .all(|field| self.get(*field).is_empty())
    }

    /// Read a single field.
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Phone => &self.phone,
            ContactField::Email => &self.email,
            ContactField::Organization => &self.organization,
            ContactField::Address => &self.address,
            ContactField::Note => &self.note,
        }
    }

    /// Return a copy with one field replaced.
    pub fn with(&self, field: ContactField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match field {
            ContactField::Name => next.name = value,
            ContactField::Phone => next.phone = value,
            ContactField::Email => next.email = value,
            ContactField::Organization => next.organization = value,
            ContactField::Address => next.address = value,
            ContactField::Note => next.note = value,
        }
        next
    }
}

/// Names of the editable contact fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    /// Full name
    Name,
    /// Phone number
    Phone,
    /// E-mail address
    Email,
    /// Organization / company
    Organization,
    /// Street address
    Address,
    /// Free-form note
    Note,
}

impl ContactField {
    /// Every field, in vCard line order.
    pub const ALL: [ContactField; 6] = [
        ContactField::Name,
        ContactField::Phone,
        ContactField::Email,
        ContactField::Organization,
        ContactField::Address,
        ContactField::Note,
    ];

    /// Short identifier used by the CLI and interactive shell.
    pub fn label(self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Phone => "phone",
            ContactField::Email => "email",
            ContactField::Organization => "org",
            ContactField::Address => "address",
            ContactField::Note => "note",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ContactField {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "name" | "fn" => Ok(ContactField::Name),
            "phone" | "tel" => Ok(ContactField::Phone),
            "email" => Ok(ContactField::Email),
            "org" | "organization" | "company" => Ok(ContactField::Organization),
            "address" | "adr" => Ok(ContactField::Address),
            "note" => Ok(ContactField::Note),
            other => Err(format!("Unknown contact field '{other}'")),
        }
    }
}

/// How reserved vCard characters in field values are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VcardEscaping {
    /// Escape `\`, `;`, `,` and newlines as RFC 6350 text values require
    #[default]
    Escaped,
    /// Insert values exactly as typed
    Verbatim,
}

/// Build the vCard text for `contact`.
///
/// Returns an empty string when every field is empty. Lines are joined with
/// `\n` without a trailing newline.
pub fn build_vcard(contact: &ContactRecord, escaping: VcardEscaping) -> String {
    if contact.is_empty() {
        return String::new();
    }

    let value = |raw: &str| match escaping {
        VcardEscaping::Escaped => escape_text(raw),
        VcardEscaping::Verbatim => raw.to_string(),
    };

    let mut lines = vec![
        "BEGIN:VCARD".to_string(),
        "VERSION:3.0".to_string(),
        format!("FN:{}", value(&contact.name)),
        format!("TEL:{}", value(&contact.phone)),
        format!("EMAIL:{}", value(&contact.email)),
        format!("ORG:{}", value(&contact.organization)),
        format!("ADR:;;{};;;;", value(&contact.address)),
    ];

    if !contact.note.is_empty() {
        lines.push(format!("NOTE:{}", value(&contact.note)));
    }

    lines.push("END:VCARD".to_string());
    lines.join("\n")
}

/// Escape a vCard text value.
pub fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\\n");
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}
