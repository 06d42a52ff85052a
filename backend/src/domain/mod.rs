//! Domain primitives, the user directory, and its ports.
//!
//! Purpose: own identity data and the rules around it (email uniqueness,
//! identifier allocation, credential checks) independently of any transport.
//!
//! Public surface:
//! - `InMemoryUserDirectory`: the memory-resident directory.
//! - `User`: public projection of an account; never carries the credential.
//! - `Error` / `ErrorCode`: transport-agnostic API error payload.
//! - `ports`: the `UserDirectory` driving port and `DirectoryError`.
//! - `TraceId`: request-scoped correlation identifier.

pub mod directory;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::directory::InMemoryUserDirectory;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::TraceId;
pub use self::user::{
    Credential, DisplayName, EmailAddress, User, UserId, UserRecord, UserValidationError,
};
