//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the directory port and remain testable with a mock.

use std::sync::Arc;

use crate::domain::ports::UserDirectory;
use crate::inbound::http::validation::RequestPolicy;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Directory backing every users endpoint.
    pub directory: Arc<dyn UserDirectory>,
    /// Validation rules applied before calling the directory.
    pub policy: RequestPolicy,
}

impl HttpState {
    /// Construct state with the default request policy.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use user_directory::domain::InMemoryUserDirectory;
    /// use user_directory::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(InMemoryUserDirectory::new()));
    /// assert!(!state.policy.require_name());
    /// ```
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self::with_policy(directory, RequestPolicy::default())
    }

    /// Construct state with an explicit request policy.
    pub fn with_policy(directory: Arc<dyn UserDirectory>, policy: RequestPolicy) -> Self {
        Self { directory, policy }
    }
}

impl std::fmt::Debug for HttpState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpState")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
