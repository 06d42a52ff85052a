//! In-memory user directory.
//!
//! All state sits behind one coarse mutex. Every operation, including the
//! scan-then-insert of `register` and the scan-then-mutate of `update`, runs
//! entirely under that lock, so concurrent callers can never observe or create
//! two live records sharing an email, nor receive the same identifier twice.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::ports::{DirectoryError, UserDirectory};
use crate::domain::{Credential, DisplayName, EmailAddress, User, UserId, UserRecord};

#[derive(Debug)]
struct DirectoryState {
    records: BTreeMap<UserId, UserRecord>,
    next_id: UserId,
}

impl Default for DirectoryState {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: UserId::FIRST,
        }
    }
}

impl DirectoryState {
    /// True when a record other than `exclude` already uses `email`.
    fn email_taken(&self, email: &EmailAddress, exclude: Option<UserId>) -> bool {
        self.records
            .values()
            .any(|record| record.email() == email && Some(record.id()) != exclude)
    }

    fn allocate_id(&mut self) -> UserId {
        let id = self.next_id;
        self.next_id = id.successor();
        id
    }
}

/// Memory-resident [`UserDirectory`].
///
/// `list_all` returns users in ascending identifier order. Callers must not
/// rely on that ordering through the [`UserDirectory`] port.
///
/// # Examples
/// ```
/// use user_directory::domain::ports::UserDirectory;
/// use user_directory::domain::{Credential, DisplayName, EmailAddress, InMemoryUserDirectory};
///
/// let directory = InMemoryUserDirectory::new();
/// let email = EmailAddress::new("ada@example.com").expect("valid email");
/// let id = directory
///     .register(DisplayName::new("Ada"), email.clone(), Credential::new("pw123456"))
///     .expect("first registration succeeds");
/// let user = directory
///     .authenticate(&email, &Credential::new("pw123456"))
///     .expect("credentials match");
/// assert_eq!(user.id(), id);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    state: Mutex<DirectoryState>,
}

impl InMemoryUserDirectory {
    /// Create an empty directory whose first issued identifier is `1`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    /// True when the directory holds no records.
    pub fn is_empty(&self) -> bool {
        self.lock().records.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, DirectoryState> {
        // No operation panics while holding the guard with state half-written,
        // so a poisoned lock still protects consistent data.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn register(
        &self,
        name: DisplayName,
        email: EmailAddress,
        credential: Credential,
    ) -> Result<UserId, DirectoryError> {
        let mut state = self.lock();
        if state.email_taken(&email, None) {
            return Err(DirectoryError::duplicate_email());
        }
        let id = state.allocate_id();
        state
            .records
            .insert(id, UserRecord::new(id, name, email, credential));
        Ok(id)
    }

    fn authenticate(
        &self,
        email: &EmailAddress,
        credential: &Credential,
    ) -> Result<User, DirectoryError> {
        let state = self.lock();
        state
            .records
            .values()
            .find(|record| record.email() == email)
            .filter(|record| record.credential_matches(credential))
            .map(UserRecord::projection)
            .ok_or_else(DirectoryError::invalid_credentials)
    }

    fn list_all(&self) -> Vec<User> {
        self.lock()
            .records
            .values()
            .map(UserRecord::projection)
            .collect()
    }

    fn get_by_id(&self, id: UserId) -> Result<User, DirectoryError> {
        self.lock()
            .records
            .get(&id)
            .map(UserRecord::projection)
            .ok_or_else(|| DirectoryError::not_found(id))
    }

    fn update(
        &self,
        id: UserId,
        name: DisplayName,
        email: EmailAddress,
    ) -> Result<(), DirectoryError> {
        let mut state = self.lock();
        if !state.records.contains_key(&id) {
            return Err(DirectoryError::not_found(id));
        }
        if state.email_taken(&email, Some(id)) {
            return Err(DirectoryError::duplicate_email());
        }
        let record = state
            .records
            .get_mut(&id)
            .ok_or_else(|| DirectoryError::not_found(id))?;
        record.rename(name, email);
        Ok(())
    }

    fn delete(&self, id: UserId) -> Result<(), DirectoryError> {
        self.lock()
            .records
            .remove(&id)
            .map(drop)
            .ok_or_else(|| DirectoryError::not_found(id))
    }
}

#[cfg(test)]
mod tests;
