use super::{BookingRequest, Field};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

// whitespace as browsers see it: the usual Unicode spaces plus the BOM, without U+0085
const BLANK_CLASS: &str = r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let part = format!("[^@{}]+", BLANK_CLASS);
    Regex::new(&format!(r"^{part}@{part}\.{part}$")).unwrap()
});

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// First rule a booking request failed. `Display` gives the message the
/// server returns; the form uses [`ValidationError::client_message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Rep Name is required.")]
    RepNameRequired,
    #[error("Company Name is required.")]
    CompanyNameRequired,
    #[error("Email is required.")]
    EmailRequired,
    #[error("Invalid email address.")]
    EmailInvalid,
    #[error("Phone Number is required.")]
    PhoneRequired,
    #[error("Phone Number must be numeric.")]
    PhoneNotNumeric,
    #[error("Date is required.")]
    DateRequired,
}

impl ValidationError {
    pub fn field(self) -> Field {
        match self {
            ValidationError::RepNameRequired => Field::RepName,
            ValidationError::CompanyNameRequired => Field::CompanyName,
            ValidationError::EmailRequired | ValidationError::EmailInvalid => Field::Email,
            ValidationError::PhoneRequired | ValidationError::PhoneNotNumeric => Field::Phone,
            ValidationError::DateRequired => Field::Date,
        }
    }

    pub fn client_message(self) -> String {
        match self {
            ValidationError::EmailInvalid => "Please enter a valid email.".to_string(),
            other => other.to_string(),
        }
    }
}

fn is_blank_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

fn is_blank(value: &str) -> bool {
    value.chars().all(is_blank_char)
}

pub(crate) fn validate(request: &BookingRequest) -> Result<(), ValidationError> {
    if is_blank(&request.rep_name) {
        return Err(ValidationError::RepNameRequired);
    }
    if is_blank(&request.company_name) {
        return Err(ValidationError::CompanyNameRequired);
    }
    if is_blank(&request.email) {
        return Err(ValidationError::EmailRequired);
    }
    // patterns run on the raw value, surrounding whitespace fails them
    if !EMAIL_PATTERN.is_match(&request.email) {
        return Err(ValidationError::EmailInvalid);
    }
    if is_blank(&request.phone) {
        return Err(ValidationError::PhoneRequired);
    }
    if !PHONE_PATTERN.is_match(&request.phone) {
        return Err(ValidationError::PhoneNotNumeric);
    }
    // date is only checked for presence, whitespace counts
    if request.date.is_empty() {
        return Err(ValidationError::DateRequired);
    }
    Ok(())
}
