//! Sign-in request types and credential storage errors

use std::collections::BTreeSet;
use std::fmt;

/// Email and password remembered for the next launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RememberedCredentials {
    pub email: String,
    pub password: String,
}

impl RememberedCredentials {
    #[must_use]
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }
}

/// Caller-side parameters of a sign-in
///
/// An empty scope set means "use the provider's configured defaults".
#[derive(Debug, Clone, Default)]
pub struct SignInRequest {
    pub scopes: BTreeSet<String>,
    pub remember_me: Option<RememberedCredentials>,
}

impl SignInRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request an explicit set of scopes
    #[must_use]
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Persist these credentials if the sign-in succeeds
    #[must_use]
    pub fn remember(mut self, credentials: RememberedCredentials) -> Self {
        self.remember_me = Some(credentials);
        self
    }
}

/// Credential vault errors
#[derive(Debug)]
pub enum VaultError {
    /// Reading or writing the backing storage failed
    Io(std::io::Error),
    /// A stored document could not be encoded or decoded
    Serialization(serde_json::Error),
}

impl fmt::Display for VaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VaultError::Io(err) => write!(f, "Vault storage I/O failed: {err}"),
            VaultError::Serialization(err) => write!(f, "Vault serialization failed: {err}"),
        }
    }
}

impl std::error::Error for VaultError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VaultError::Io(err) => Some(err),
            VaultError::Serialization(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        VaultError::Io(err)
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        VaultError::Serialization(err)
    }
}
