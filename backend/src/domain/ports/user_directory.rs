//! Driving port for the user directory use-cases.
//!
//! Inbound adapters call this port to register, authenticate, and manage
//! accounts without knowing how the directory stores them. HTTP handler tests
//! substitute a mock instead of a populated directory when they need to script
//! an outcome.

use crate::domain::{Credential, DisplayName, EmailAddress, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures reported by user directory operations.
    ///
    /// Every operation is total: it either succeeds or returns one of these
    /// kinds. None of them is fatal.
    pub enum DirectoryError {
        /// Another live record already uses the requested email.
        DuplicateEmail => "email already exists",
        /// Unknown email or wrong credential; the two are deliberately
        /// indistinguishable.
        InvalidCredentials => "invalid credentials",
        /// No live record carries the requested identifier.
        NotFound { id: UserId } => "user {id} not found",
    }
}

/// Domain use-case port for account management.
#[cfg_attr(test, mockall::automock)]
pub trait UserDirectory: Send + Sync {
    /// Store a new account and return its freshly issued identifier.
    fn register(
        &self,
        name: DisplayName,
        email: EmailAddress,
        credential: Credential,
    ) -> Result<UserId, DirectoryError>;

    /// Verify an email/credential pair and return the matching user.
    fn authenticate(
        &self,
        email: &EmailAddress,
        credential: &Credential,
    ) -> Result<User, DirectoryError>;

    /// Return every live user. An empty directory yields an empty list.
    fn list_all(&self) -> Vec<User>;

    /// Look up a single user by identifier.
    fn get_by_id(&self, id: UserId) -> Result<User, DirectoryError>;

    /// Replace the name and email of an existing user.
    fn update(&self, id: UserId, name: DisplayName, email: EmailAddress)
    -> Result<(), DirectoryError>;

    /// Remove a user. The identifier is never issued again.
    fn delete(&self, id: UserId) -> Result<(), DirectoryError>;
}
