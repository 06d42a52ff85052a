//! Server settings loaded via OrthoConfig.
//!
//! Values layer defaults, an optional configuration file, `USER_DIRECTORY_*`
//! environment variables, and command-line flags.

use std::net::{AddrParseError, IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::inbound::http::validation::{DEFAULT_MIN_PASSWORD_LENGTH, RequestPolicy};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Configuration values for the user directory server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_DIRECTORY")]
pub struct AppSettings {
    /// Interface address to bind.
    pub host: Option<String>,
    /// TCP port to listen on.
    pub port: Option<u16>,
    /// Reject registrations and updates without a display name.
    #[ortho_config(default = false)]
    pub require_name: bool,
    /// Minimum password length accepted at registration.
    pub min_password_length: Option<usize>,
}

impl AppSettings {
    /// Return the configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the configured port, falling back to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Resolve the socket address the server binds to.
    ///
    /// # Errors
    /// Returns [`AddrParseError`] when `host` is not an IP address literal.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let ip: IpAddr = self.host().parse()?;
        Ok(SocketAddr::new(ip, self.port()))
    }

    /// Build the request validation policy for the HTTP adapter.
    pub fn request_policy(&self) -> RequestPolicy {
        RequestPolicy::new(
            self.require_name,
            self.min_password_length
                .unwrap_or(DEFAULT_MIN_PASSWORD_LENGTH),
        )
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("user-directory")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("USER_DIRECTORY_HOST", None::<String>),
            ("USER_DIRECTORY_PORT", None::<String>),
            ("USER_DIRECTORY_REQUIRE_NAME", None::<String>),
            ("USER_DIRECTORY_MIN_PASSWORD_LENGTH", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default bind address"),
            SocketAddr::from(([0, 0, 0, 0], 8080))
        );
        assert_eq!(settings.request_policy(), RequestPolicy::default());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("USER_DIRECTORY_HOST", Some("127.0.0.1".to_owned())),
            ("USER_DIRECTORY_PORT", Some("9090".to_owned())),
            ("USER_DIRECTORY_REQUIRE_NAME", Some("true".to_owned())),
            ("USER_DIRECTORY_MIN_PASSWORD_LENGTH", Some("10".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("bind address"),
            SocketAddr::from(([127, 0, 0, 1], 9090))
        );
        let policy = settings.request_policy();
        assert!(policy.require_name());
        assert_eq!(policy.min_password_length(), 10);
    }

    #[rstest]
    fn command_line_flags_override_the_environment() {
        let _guard = lock_env([
            ("USER_DIRECTORY_HOST", None::<String>),
            ("USER_DIRECTORY_PORT", Some("9090".to_owned())),
            ("USER_DIRECTORY_REQUIRE_NAME", None::<String>),
            ("USER_DIRECTORY_MIN_PASSWORD_LENGTH", None::<String>),
        ]);

        let settings = AppSettings::load_from_iter([
            OsString::from("user-directory"),
            OsString::from("--port"),
            OsString::from("9191"),
        ])
        .expect("config should load");

        assert_eq!(settings.port(), 9191);
        assert_eq!(settings.host(), "0.0.0.0");
    }

    #[rstest]
    fn hostnames_are_rejected_as_bind_addresses() {
        let settings = AppSettings {
            host: Some("localhost".to_owned()),
            port: None,
            require_name: false,
            min_password_length: None,
        };

        assert!(settings.bind_addr().is_err());
    }
}
