//! Input validation for contact inquiries.

use std::fmt;

use chrono::NaiveDate;

use crate::models::NewContact;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid email format.
    InvalidEmail(String),
    /// Invalid WhatsApp number.
    InvalidWhatsapp(String),
    /// Party size outside the accepted range.
    InvalidQuantity { min: u32, max: u32, actual: i64 },
    /// Date is not `YYYY-MM-DD`.
    InvalidDate(String),
    /// Not one of the contact statuses.
    InvalidStatus(String),
    /// Value too long.
    TooLong { field: String, max: usize, actual: usize },
    /// Empty value where one is required.
    Empty(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidEmail(msg) => write!(f, "Invalid email: {}", msg),
            ValidationError::InvalidWhatsapp(msg) => write!(f, "Invalid WhatsApp number: {}", msg),
            ValidationError::InvalidQuantity { min, max, actual } => {
                write!(f, "Party size must be between {} and {} (got {})", min, max, actual)
            }
            ValidationError::InvalidDate(value) => {
                write!(f, "Invalid date '{}': expected YYYY-MM-DD", value)
            }
            ValidationError::InvalidStatus(value) => write!(
                f,
                "Invalid status '{}': expected one of new, contacted, fake, booked, archived",
                value
            ),
            ValidationError::TooLong { field, max, actual } => {
                write!(f, "{} is too long ({} chars, max {})", field, actual, max)
            }
            ValidationError::Empty(field) => write!(f, "{} cannot be empty", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Maximum allowed length for email addresses.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum allowed length for names.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum allowed length for WhatsApp numbers.
pub const MAX_WHATSAPP_LENGTH: usize = 32;

/// Maximum allowed length for inquiry messages.
pub const MAX_MESSAGE_LENGTH: usize = 5000;

/// Accepted party sizes.
pub const MIN_QUANTITY: u32 = 1;
pub const MAX_QUANTITY: u32 = 100;

fn check_length(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
            actual,
        });
    }
    Ok(())
}

/// Validate an email address (basic RFC 5322 format check).
///
/// This is a basic validation that checks:
/// - Contains exactly one @
/// - Has at least one character before @
/// - Has at least one dot after @
/// - Is not too long
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Empty("email".to_string()));
    }

    check_length("email", email, MAX_EMAIL_LENGTH)?;

    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail(
            "must not contain whitespace".to_string(),
        ));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail(
            "must contain exactly one @ symbol".to_string(),
        ));
    };

    if domain.contains('@') {
        return Err(ValidationError::InvalidEmail(
            "must contain exactly one @ symbol".to_string(),
        ));
    }

    if local.is_empty() {
        return Err(ValidationError::InvalidEmail(
            "missing local part (before @)".to_string(),
        ));
    }

    if domain.is_empty() {
        return Err(ValidationError::InvalidEmail(
            "missing domain (after @)".to_string(),
        ));
    }

    if !domain.contains('.') {
        return Err(ValidationError::InvalidEmail(
            "domain must contain at least one dot".to_string(),
        ));
    }

    if domain.starts_with('.') || domain.ends_with('.') || domain.contains("..") {
        return Err(ValidationError::InvalidEmail(
            "malformed domain".to_string(),
        ));
    }

    Ok(())
}

/// Validate a full name.
pub fn validate_full_name(name: &str) -> Result<(), ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::Empty("full name".to_string()));
    }
    check_length("full name", name, MAX_NAME_LENGTH)
}

/// Validate a WhatsApp number: digits with an optional leading `+`, spaces,
/// dashes and parentheses allowed, at least 6 digits.
pub fn validate_whatsapp(number: &str) -> Result<(), ValidationError> {
    let number = number.trim();
    if number.is_empty() {
        return Err(ValidationError::Empty("WhatsApp number".to_string()));
    }
    check_length("WhatsApp number", number, MAX_WHATSAPP_LENGTH)?;

    for (i, c) in number.chars().enumerate() {
        let allowed = c.is_ascii_digit()
            || matches!(c, ' ' | '-' | '(' | ')')
            || (c == '+' && i == 0);
        if !allowed {
            return Err(ValidationError::InvalidWhatsapp(format!(
                "invalid character '{}'",
                c
            )));
        }
    }

    if number.chars().filter(char::is_ascii_digit).count() < 6 {
        return Err(ValidationError::InvalidWhatsapp(
            "must contain at least 6 digits".to_string(),
        ));
    }

    Ok(())
}

/// Validate a party size.
pub fn validate_quantity(quantity: i64) -> Result<u32, ValidationError> {
    if quantity < MIN_QUANTITY as i64 || quantity > MAX_QUANTITY as i64 {
        return Err(ValidationError::InvalidQuantity {
            min: MIN_QUANTITY,
            max: MAX_QUANTITY,
            actual: quantity,
        });
    }
    Ok(quantity as u32)
}

/// Validate a preferred date in `YYYY-MM-DD` form.
pub fn validate_preferred_date(date: &str) -> Result<NaiveDate, ValidationError> {
    let date = date.trim();
    if date.is_empty() {
        return Err(ValidationError::Empty("date".to_string()));
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(date.to_string()))
}

/// Validate an inquiry message.
pub fn validate_message(message: &str) -> Result<(), ValidationError> {
    check_length("message", message.trim(), MAX_MESSAGE_LENGTH)
}

/// Validate a responsible-person name.
pub fn validate_responsible(name: &str) -> Result<(), ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::Empty("responsible".to_string()));
    }
    check_length("responsible", name, MAX_NAME_LENGTH)
}

/// Validate every field of a new contact.
pub fn validate_new_contact(contact: &NewContact) -> Result<(), ValidationError> {
    validate_full_name(&contact.full_name)?;
    validate_email(&contact.email)?;
    if let Some(whatsapp) = &contact.whatsapp {
        validate_whatsapp(whatsapp)?;
    }
    validate_quantity(contact.quantity as i64)?;
    validate_preferred_date(&contact.preferred_date)?;
    if let Some(message) = &contact.message {
        validate_message(message)?;
    }
    Ok(())
}
