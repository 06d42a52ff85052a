//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use user_directory::inbound::http::validation::RequestPolicy;
use user_directory::settings::AppSettings;

/// Settings needed to construct the HTTP server.
#[derive(Debug, Clone, Copy)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) policy: RequestPolicy,
}

impl ServerConfig {
    /// Construct a server configuration from a bind address and request policy.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, policy: RequestPolicy) -> Self {
        Self { bind_addr, policy }
    }

    /// Derive the server configuration from loaded settings.
    ///
    /// # Errors
    /// Returns [`std::io::Error`] when the configured host is not an IP address.
    pub fn from_settings(settings: &AppSettings) -> std::io::Result<Self> {
        let bind_addr = settings.bind_addr().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind address {}: {e}", settings.host()),
            )
        })?;
        Ok(Self::new(bind_addr, settings.request_policy()))
    }
}
