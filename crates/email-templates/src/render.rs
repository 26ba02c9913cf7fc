//! Full email rendering: content + contact → subject, HTML and text bodies.

use askama::Template;
use serde::Serialize;
use tracing::warn;

use crate::content::{ContentOverride, TemplateContent};
use crate::placeholder::{substitute, ContactSnapshot, Placeholder, Target};
use crate::EmailKind;

/// A rendered email, ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedEmail {
    pub kind: EmailKind,
    pub subject: String,
    /// Complete HTML document with inline styles only.
    pub html: String,
    /// Plain-text alternative body.
    pub text: String,
}

/// One row of the info card.
struct InfoRow {
    label: &'static str,
    value: String,
}

/// The fixed visual shell around the substituted sections.
#[derive(Template)]
#[template(path = "email.html")]
struct EmailShell<'a> {
    title: &'a str,
    banner_title: &'a str,
    banner_subtitle: &'a str,
    greeting: &'a str,
    intro: &'a str,
    details: &'a str,
    rows: &'a [InfoRow],
    response: &'a str,
    signature: &'a str,
    footer: &'a str,
}

/// Substituted sections for one target.
struct Sections {
    greeting: String,
    intro: String,
    details: String,
    response: String,
    signature: String,
    footer: String,
}

impl Sections {
    fn build(content: &TemplateContent, contact: &ContactSnapshot, target: Target) -> Self {
        Self {
            greeting: substitute(&content.greeting, contact, target),
            intro: substitute(&content.intro, contact, target),
            details: substitute(&content.details, contact, target),
            response: substitute(&content.response, contact, target),
            signature: substitute(&content.signature, contact, target),
            footer: substitute(&content.footer, contact, target),
        }
    }
}

/// Render an email of `kind` for `contact`.
///
/// Starts from the default content for `kind`, applies `overrides`, and
/// substitutes placeholders. Never fails: missing content falls back to the
/// defaults and missing contact values to their fallback literals.
pub fn render(
    kind: EmailKind,
    contact: &ContactSnapshot,
    overrides: Option<&ContentOverride>,
) -> RenderedEmail {
    let content = TemplateContent::default_for(kind).with_override(overrides);
    render_content(kind, &content, contact)
}

/// Render already-resolved content.
pub fn render_content(
    kind: EmailKind,
    content: &TemplateContent,
    contact: &ContactSnapshot,
) -> RenderedEmail {
    let subject = substitute(&content.subject, contact, Target::Header);
    let rows = info_rows(kind, contact);

    let html_sections = Sections::build(content, contact, Target::Html);
    let text_sections = Sections::build(content, contact, Target::Text);

    let (banner_title, banner_subtitle) = match kind {
        EmailKind::Confirmation => ("Roving Travel", "Your next adventure starts here"),
        EmailKind::AdminNotification => ("New Travel Inquiry", "Roving Travel admin"),
    };

    let shell = EmailShell {
        title: &subject,
        banner_title,
        banner_subtitle,
        greeting: &html_sections.greeting,
        intro: &html_sections.intro,
        details: &html_sections.details,
        rows: &rows,
        response: &html_sections.response,
        signature: &html_sections.signature,
        footer: &html_sections.footer,
    };

    let html = shell.render().unwrap_or_else(|err| {
        warn!(kind = %kind, error = %err, "Email shell failed to render, using bare layout");
        bare_html(&subject, &html_sections)
    });

    let text = plain_text(&text_sections, &rows);

    RenderedEmail {
        kind,
        subject,
        html,
        text,
    }
}

fn info_rows(kind: EmailKind, contact: &ContactSnapshot) -> Vec<InfoRow> {
    let row = |label, placeholder| InfoRow {
        label,
        value: contact.resolve(placeholder).into_owned(),
    };

    match kind {
        EmailKind::Confirmation => vec![
            row("Travellers", Placeholder::Quantity),
            row("Preferred date", Placeholder::Date),
            row("WhatsApp", Placeholder::Whatsapp),
        ],
        EmailKind::AdminNotification => vec![
            row("Inquiry", Placeholder::ContactId),
            row("Name", Placeholder::FullName),
            row("Email", Placeholder::Email),
            row("WhatsApp", Placeholder::Whatsapp),
            row("Travellers", Placeholder::Quantity),
            row("Preferred date", Placeholder::Date),
        ],
    }
}

fn plain_text(sections: &Sections, rows: &[InfoRow]) -> String {
    let mut text = String::new();
    for part in [&sections.greeting, &sections.intro, &sections.details] {
        text.push_str(part);
        text.push_str("\n\n");
    }
    for row in rows {
        text.push_str(row.label);
        text.push_str(": ");
        text.push_str(&row.value);
        text.push('\n');
    }
    text.push('\n');
    text.push_str(&sections.response);
    text.push_str("\n\n");
    text.push_str(&sections.signature);
    text.push_str("\n\n-- \n");
    text.push_str(&sections.footer);
    text.push('\n');
    text
}

fn bare_html(subject: &str, sections: &Sections) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title></head>\
         <body style=\"font-family:Arial,sans-serif;\"><p>{}</p><p>{}</p><p>{}</p>\
         <p>{}</p><p>{}</p><p style=\"color:#888888;font-size:12px;\">{}</p></body></html>",
        crate::placeholder::escape_html(subject),
        sections.greeting,
        sections.intro,
        sections.details,
        sections.response,
        sections.signature,
        sections.footer,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn john() -> ContactSnapshot {
        ContactSnapshot {
            id: Some(42),
            full_name: "John Smith".to_string(),
            email: "john@example.com".to_string(),
            whatsapp: None,
            quantity: 2,
            date: "2024-12-25".to_string(),
            message: None,
        }
    }

    fn has_token(s: &str) -> bool {
        Placeholder::ALL
            .iter()
            .any(|p| s.contains(&format!("{{{}}}", p.name())))
    }

    #[test]
    fn test_render_leaves_no_tokens() {
        for kind in EmailKind::ALL {
            let email = render(kind, &john(), None);
            assert!(!has_token(&email.subject), "{kind}: {}", email.subject);
            assert!(!has_token(&email.html), "{kind}: token left in html");
            assert!(!has_token(&email.text), "{kind}: token left in text");
            assert!(email.html.contains("No additional message"));
            assert!(email.html.contains("Not provided"));
        }
    }

    #[test]
    fn test_confirmation_subject() {
        let email = render(EmailKind::Confirmation, &john(), None);
        assert_eq!(email.subject, "Thank you for your inquiry, John Smith!");
    }

    #[test]
    fn test_admin_email_carries_contact_id() {
        let email = render(EmailKind::AdminNotification, &john(), None);
        assert!(email.html.contains("#42"));
        assert!(email.text.contains("Inquiry: 42"));
        assert!(email.subject.contains("John Smith"));
    }

    #[test]
    fn test_html_is_self_contained_document() {
        let email = render(EmailKind::Confirmation, &john(), None);
        assert!(email.html.starts_with("<!DOCTYPE html>"));
        assert!(email.html.trim_end().ends_with("</html>"));
        assert!(!email.html.contains("<link"));
        assert!(!email.html.contains("<style"));
    }

    #[test]
    fn test_override_fields_are_used() {
        let overrides = ContentOverride {
            subject: Some("We got it, {fullName}".to_string()),
            footer: Some("Custom footer {email}".to_string()),
            ..Default::default()
        };
        let email = render(EmailKind::Confirmation, &john(), Some(&overrides));
        let defaults = TemplateContent::default_for(EmailKind::Confirmation);

        assert_eq!(email.subject, "We got it, John Smith");
        assert!(email.html.contains("Custom footer john@example.com"));
        assert!(email.html.contains(&defaults.intro));
    }

    #[test]
    fn test_contact_text_is_escaped_in_html() {
        let contact = ContactSnapshot {
            full_name: "<img src=x onerror=alert(1)>".to_string(),
            message: Some("Tom & Jerry <b>".to_string()),
            ..john()
        };
        let email = render(EmailKind::AdminNotification, &contact, None);
        assert!(!email.html.contains("<img src=x"));
        assert!(email.html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(email.html.contains("Tom &amp; Jerry &lt;b&gt;"));
        assert!(email.text.contains("Tom & Jerry <b>"));
    }

    #[test]
    fn test_text_body_has_no_markup() {
        let email = render(EmailKind::Confirmation, &john(), None);
        assert!(!email.text.contains("<br>"));
        assert!(!email.text.contains("<strong>"));
        assert!(email.text.contains("Warm regards,\nThe Roving Travel Team"));
    }
}
