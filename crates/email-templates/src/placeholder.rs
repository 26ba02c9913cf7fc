//! Placeholder substitution.
//!
//! A placeholder is `{name}` where `name` is an ASCII identifier. Known names
//! are replaced with the matching contact value (or its fallback); unknown
//! names are removed so that no token survives rendering. Braces around
//! anything that is not an identifier are left untouched.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// The contact fields available to templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSnapshot {
    /// Persisted contact id (known once the row is written).
    #[serde(default)]
    pub id: Option<i64>,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub whatsapp: Option<String>,
    pub quantity: u32,
    /// Preferred travel date, `YYYY-MM-DD`.
    pub date: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl ContactSnapshot {
    /// A sample contact used for previews and test emails.
    pub fn sample() -> Self {
        Self {
            id: Some(0),
            full_name: "John Smith".to_string(),
            email: "john@example.com".to_string(),
            whatsapp: Some("+1 555 0100".to_string()),
            quantity: 2,
            date: "2024-12-25".to_string(),
            message: Some("We would love a guided tour with a sunset cruise.".to_string()),
        }
    }

    fn value(&self, placeholder: Placeholder) -> Option<Cow<'_, str>> {
        fn non_blank(s: &str) -> Option<Cow<'_, str>> {
            let s = s.trim();
            (!s.is_empty()).then_some(Cow::Borrowed(s))
        }

        match placeholder {
            Placeholder::FullName => non_blank(&self.full_name),
            Placeholder::Email => non_blank(&self.email),
            Placeholder::Whatsapp => self.whatsapp.as_deref().and_then(non_blank),
            Placeholder::Quantity => Some(Cow::Owned(self.quantity.to_string())),
            Placeholder::Date => non_blank(&self.date),
            Placeholder::Message => self.message.as_deref().and_then(non_blank),
            Placeholder::ContactId => self.id.map(|id| Cow::Owned(id.to_string())),
        }
    }

    /// Value for a placeholder, or its fallback literal when absent.
    pub fn resolve(&self, placeholder: Placeholder) -> Cow<'_, str> {
        self.value(placeholder)
            .unwrap_or(Cow::Borrowed(placeholder.fallback()))
    }
}

/// Tokens understood by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    FullName,
    Email,
    Whatsapp,
    Quantity,
    Date,
    Message,
    ContactId,
}

impl Placeholder {
    pub const ALL: [Placeholder; 7] = [
        Placeholder::FullName,
        Placeholder::Email,
        Placeholder::Whatsapp,
        Placeholder::Quantity,
        Placeholder::Date,
        Placeholder::Message,
        Placeholder::ContactId,
    ];

    /// Token name as written between braces.
    pub fn name(&self) -> &'static str {
        match self {
            Placeholder::FullName => "fullName",
            Placeholder::Email => "email",
            Placeholder::Whatsapp => "whatsapp",
            Placeholder::Quantity => "quantity",
            Placeholder::Date => "date",
            Placeholder::Message => "message",
            Placeholder::ContactId => "contactId",
        }
    }

    /// Literal used when the contact has no value.
    pub fn fallback(&self) -> &'static str {
        match self {
            Placeholder::FullName => "Traveller",
            Placeholder::Email => "Not provided",
            Placeholder::Whatsapp => "Not provided",
            Placeholder::Quantity => "1",
            Placeholder::Date => "Not specified",
            Placeholder::Message => "No additional message",
            Placeholder::ContactId => "-",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

/// Where substituted text ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// HTML body: template markup kept, contact values escaped.
    Html,
    /// Plain-text body: markup stripped, values raw.
    Text,
    /// Header line (subject): markup stripped, values raw, single line.
    Header,
}

/// Substitute every placeholder in `template` for the given target.
pub fn substitute(template: &str, contact: &ContactSnapshot, target: Target) -> String {
    let template: Cow<'_, str> = match target {
        Target::Html => Cow::Borrowed(template),
        Target::Text | Target::Header => Cow::Owned(strip_markup(template)),
    };

    let mut out = String::with_capacity(template.len());
    let mut rest: &str = &template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match after.find('}') {
            Some(close) if is_identifier(&after[..close]) => {
                let name = &after[..close];
                match Placeholder::from_name(name) {
                    Some(placeholder) => {
                        let value = contact.resolve(placeholder);
                        match target {
                            Target::Html => out.push_str(&escape_html(&value)),
                            Target::Text | Target::Header => out.push_str(&value),
                        }
                    }
                    None => {
                        warn!(token = %name, "Dropping unknown template placeholder");
                    }
                }
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    if target == Target::Header {
        collapse_whitespace(&out)
    } else {
        out
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape contact text for HTML element content. Line breaks become `<br>`.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\n' => out.push_str("<br>"),
            _ => out.push(c),
        }
    }
    out
}

/// Turn template markup into plain text.
///
/// `<br>` and `</p>` become line breaks, every other tag is dropped, and the
/// common entities are decoded.
pub fn strip_markup(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('>') {
            Some(close) => {
                let tag = after[..close].trim().to_ascii_lowercase();
                if tag.starts_with("br") || tag == "/p" {
                    out.push('\n');
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push('<');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    out.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
