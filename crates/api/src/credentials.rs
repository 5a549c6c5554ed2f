//! RIPE Atlas account credentials.

use crate::*;

/// Environment variable holding the account username.
pub const USERNAME_ENV: &str = "NETMET_USERNAME";

/// Environment variable holding the account API key.
pub const SECRET_KEY_ENV: &str = "NETMET_SECRET_KEY";

/// The RIPE Atlas account used for authenticated calls.
///
/// The secret key is redacted from debug output.
#[derive(Clone)]
pub struct Credentials {
    /// Account username, used as the billing identity on submissions.
    pub username: String,

    /// Account API key, passed as the `key` query parameter.
    pub secret_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Load credentials from the environment.
    ///
    /// Absent or empty variables are a fatal [NmError::MissingCredentials];
    /// there is no anonymous fallback for submission calls.
    pub fn from_env() -> NmResult<Self> {
        let username = std::env::var(USERNAME_ENV)
            .map_err(|_| NmError::MissingCredentials)?;
        let secret_key = std::env::var(SECRET_KEY_ENV)
            .map_err(|_| NmError::MissingCredentials)?;

        if username.is_empty() || secret_key.is_empty() {
            return Err(NmError::MissingCredentials);
        }

        Ok(Self {
            username,
            secret_key,
        })
    }
}
