//! User data model.
//!
//! A [`UserRecord`] is the directory's private view of an account, credential
//! included. Everything that leaves the directory is a [`User`] projection,
//! which carries only the identifier, display name, and email.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

/// Validation errors returned by [`EmailAddress::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Email does not look like `local@domain.tld`.
    InvalidEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Directory-assigned user identifier.
///
/// Identifiers are issued in strictly increasing order starting at `1` and are
/// never reissued, even after the owning record is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// The first identifier issued by a fresh directory.
    pub const FIRST: Self = Self(1);

    /// Wrap a raw identifier value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Access the raw identifier value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Identifier issued immediately after this one.
    pub(crate) const fn successor(self) -> Self {
        // A single process cannot exhaust the u64 id space.
        Self(self.0 + 1)
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human readable display name for the user.
///
/// The directory places no constraints on the name; whether an empty name is
/// acceptable is decided by the inbound adapter's request policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    /// Construct a display name from owned input.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self(display_name.into())
    }

    /// True when the name is blank once trimmed.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

/// Email address used as the unique login handle.
///
/// ## Invariants
/// - Non-empty and shaped like `local@domain.tld`.
/// - Stored exactly as supplied: comparisons are case-sensitive and no
///   normalisation is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`] from owned input.
    ///
    /// # Examples
    /// ```
    /// use user_directory::domain::EmailAddress;
    ///
    /// let email = EmailAddress::new("ada@example.com").expect("valid email");
    /// assert_eq!(email.as_ref(), "ada@example.com");
    /// assert!(EmailAddress::new("not-an-email").is_err());
    /// ```
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(email.into())
    }

    fn from_owned(email: String) -> Result<Self, UserValidationError> {
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(&email) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Opaque secret compared for equality during authentication.
///
/// The value is zeroed on drop and never rendered by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(Zeroizing<String>);

impl Credential {
    /// Wrap a caller-supplied secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    /// Number of characters in the secret.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    /// True when no secret was supplied.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Stored account owned exclusively by the directory.
///
/// `id` and `credential` are fixed at registration; only `name` and `email`
/// change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    id: UserId,
    name: DisplayName,
    email: EmailAddress,
    credential: Credential,
}

impl UserRecord {
    pub(crate) fn new(
        id: UserId,
        name: DisplayName,
        email: EmailAddress,
        credential: Credential,
    ) -> Self {
        Self {
            id,
            name,
            email,
            credential,
        }
    }

    /// Stable record identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Email currently attached to the record.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Exact comparison against the stored credential.
    pub fn credential_matches(&self, candidate: &Credential) -> bool {
        self.credential == *candidate
    }

    pub(crate) fn rename(&mut self, name: DisplayName, email: EmailAddress) {
        self.name = name;
        self.email = email;
    }

    /// Public projection of the record without its credential.
    pub fn projection(&self) -> User {
        User {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Application user as seen outside the directory.
///
/// Serialises as exactly `{"id", "name", "email"}`.
///
/// # Examples
/// ```
/// use user_directory::domain::{DisplayName, EmailAddress, User, UserId};
///
/// let email = EmailAddress::new("ada@example.com").expect("valid email");
/// let user = User::new(UserId::new(1), DisplayName::new("Ada"), email);
/// let json = serde_json::to_value(&user).expect("serialise user");
/// assert_eq!(json["id"], 1);
/// assert_eq!(json["name"], "Ada");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct User {
    #[schema(value_type = u64, example = 1)]
    id: UserId,
    #[schema(value_type = String, example = "Ada Lovelace")]
    name: DisplayName,
    #[schema(value_type = String, example = "ada@example.com")]
    email: EmailAddress,
}

impl User {
    /// Build a new [`User`] from validated components.
    pub fn new(id: UserId, name: DisplayName, email: EmailAddress) -> Self {
        Self { id, name, email }
    }

    /// Stable user identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Display name shown to other users.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Email address of the account.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}
