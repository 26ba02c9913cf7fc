use email_templates::RenderedEmail;

/// An email message to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    /// Display name of the sender; the address is the account's
    pub from_name: String,
    /// Primary recipient
    pub to: String,
    /// Email subject
    pub subject: String,
    /// Plain text body
    pub body: String,
    /// Optional HTML body
    pub html_body: Option<String>,
}

impl Email {
    /// Create a plain-text email.
    pub fn new(
        from_name: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            from_name: from_name.into(),
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
            html_body: None,
        }
    }

    /// Build an email from a rendered template, sent under the kind's sender name.
    pub fn from_rendered(rendered: RenderedEmail, to: impl Into<String>) -> Self {
        Self {
            from_name: rendered.kind.sender_name().to_string(),
            to: to.into(),
            subject: rendered.subject,
            body: rendered.text,
            html_body: Some(rendered.html),
        }
    }

    /// Set the HTML body (creates multipart alternative with text fallback).
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html_body = Some(html.into());
        self
    }
}
