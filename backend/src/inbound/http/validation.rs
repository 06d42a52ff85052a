//! Request-shape validation for the users endpoints.
//!
//! The directory assumes well-formed inputs, so every rule about required
//! fields, email format, and credential length is enforced here before a
//! handler reaches the port.

use serde_json::json;

use crate::domain::{Credential, DisplayName, EmailAddress, Error, UserId, UserValidationError};

/// Default minimum credential length for registration.
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidEmail,
    PasswordTooShort,
    InvalidId,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::PasswordTooShort => "password_too_short",
            ErrorCode::InvalidId => "invalid_id",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) const NAME: FieldName = FieldName::new("name");
pub(crate) const EMAIL: FieldName = FieldName::new("email");
pub(crate) const PASSWORD: FieldName = FieldName::new("password");
pub(crate) const ID: FieldName = FieldName::new("id");

fn field_error(field: FieldName, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {name}"),
    )
}

/// Rules applied to inbound request bodies.
///
/// # Examples
/// ```
/// use user_directory::inbound::http::validation::RequestPolicy;
///
/// let policy = RequestPolicy::default();
/// assert!(!policy.require_name());
/// assert_eq!(policy.min_password_length(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestPolicy {
    require_name: bool,
    min_password_length: usize,
}

impl Default for RequestPolicy {
    fn default() -> Self {
        Self {
            require_name: false,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }
}

impl RequestPolicy {
    /// Build a policy from explicit settings.
    pub fn new(require_name: bool, min_password_length: usize) -> Self {
        Self {
            require_name,
            min_password_length,
        }
    }

    /// Whether a blank display name is rejected.
    pub fn require_name(&self) -> bool {
        self.require_name
    }

    /// Minimum number of characters in a registration password.
    pub fn min_password_length(&self) -> usize {
        self.min_password_length
    }

    pub(crate) fn name(&self, raw: Option<String>) -> Result<DisplayName, Error> {
        let name = DisplayName::new(raw.unwrap_or_default());
        if self.require_name && name.is_blank() {
            return Err(missing_field_error(NAME));
        }
        Ok(name)
    }

    pub(crate) fn new_password(&self, raw: Option<String>) -> Result<Credential, Error> {
        let credential = required_password(raw)?;
        if credential.char_count() < self.min_password_length {
            let min = self.min_password_length;
            return Err(field_error(
                PASSWORD,
                ErrorCode::PasswordTooShort,
                format!("password must be at least {min} characters"),
            ));
        }
        Ok(credential)
    }
}

pub(crate) fn email(raw: Option<String>) -> Result<EmailAddress, Error> {
    EmailAddress::new(raw.unwrap_or_default()).map_err(|err| match err {
        UserValidationError::EmptyEmail => missing_field_error(EMAIL),
        UserValidationError::InvalidEmail => {
            field_error(EMAIL, ErrorCode::InvalidEmail, err.to_string())
        }
    })
}

pub(crate) fn required_password(raw: Option<String>) -> Result<Credential, Error> {
    let credential = Credential::new(raw.unwrap_or_default());
    if credential.is_empty() {
        return Err(missing_field_error(PASSWORD));
    }
    Ok(credential)
}

pub(crate) fn user_id(raw: u64) -> Result<UserId, Error> {
    if raw == 0 {
        return Err(field_error(
            ID,
            ErrorCode::InvalidId,
            "user id must be a positive integer",
        ));
    }
    Ok(UserId::new(raw))
}
