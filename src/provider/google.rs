//! Google Sign-In adapter (task-style SDK)
//!
//! The interactive flow is launched by the UI layer and yields a completed task. This
//! adapter translates that task into a [`SignInOutcome`]; there is no chained call.

use super::{ProviderLoginAdapter, GOOGLE};
use crate::models::{FailureKind, SignInOutcome, SignInSuccess};
use crate::utils::LoggingHelper;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Status codes reported by the Google Sign-In API
pub mod status_codes {
    pub const NETWORK_ERROR: i32 = 7;
    pub const DEVELOPER_ERROR: i32 = 10;
    pub const SIGN_IN_FAILED: i32 = 12500;
    pub const SIGN_IN_CANCELLED: i32 = 12501;
}

/// Signed-in Google account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleAccount {
    pub id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub id_token: Option<String>,
}

/// Failure extracted from a completed sign-in task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleApiException {
    pub status_code: i32,
    pub message: Option<String>,
}

impl GoogleApiException {
    #[must_use]
    pub fn new(status_code: i32) -> Self {
        Self {
            status_code,
            message: None,
        }
    }
}

impl fmt::Display for GoogleApiException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "Google API exception {}: {message}", self.status_code),
            None => write!(f, "Google API exception {}", self.status_code),
        }
    }
}

impl std::error::Error for GoogleApiException {}

/// Completed sign-in task as handed back by the SDK
pub type GoogleSignInTask = Result<GoogleAccount, GoogleApiException>;

/// The vendor sign-in client
#[async_trait]
pub trait GoogleSignInClient: Send + Sync {
    /// Launch the interactive flow and wait for its task
    async fn sign_in(&self, scopes: &[String]) -> GoogleSignInTask;

    async fn sign_out(&self) -> Result<(), GoogleApiException>;

    async fn revoke_access(&self) -> Result<(), GoogleApiException>;
}

/// [`ProviderLoginAdapter`] over Google Sign-In
pub struct GoogleSignInAdapter {
    client: Arc<dyn GoogleSignInClient>,
}

impl GoogleSignInAdapter {
    #[must_use]
    pub fn new(client: Arc<dyn GoogleSignInClient>) -> Self {
        Self { client }
    }

    /// Translate a completed task into an outcome
    ///
    /// The account carries no photo, so `photo_url` is always `None`. The provider token
    /// is the ID token, or the account id when the client was not configured to request one.
    #[must_use]
    pub fn handle_result(task: GoogleSignInTask) -> SignInOutcome {
        match task {
            Ok(account) => SignInOutcome::Success(SignInSuccess {
                provider: GOOGLE.to_string(),
                provider_token: account.id_token.unwrap_or_else(|| account.id.clone()),
                user_id: account.id,
                email: account.email,
                display_name: account.display_name,
                photo_url: None,
            }),
            Err(exception) => match Self::classify_status(exception.status_code) {
                None => SignInOutcome::Cancelled,
                Some(kind) => SignInOutcome::failed(
                    kind,
                    Some(exception.status_code.to_string()),
                    exception.message,
                ),
            },
        }
    }

    /// Map a status code onto the failure taxonomy; `None` means the user cancelled
    #[must_use]
    pub fn classify_status(status_code: i32) -> Option<FailureKind> {
        match status_code {
            status_codes::SIGN_IN_CANCELLED => None,
            status_codes::DEVELOPER_ERROR => Some(FailureKind::ConfigurationError),
            status_codes::NETWORK_ERROR => Some(FailureKind::NetworkError),
            _ => Some(FailureKind::Unknown),
        }
    }
}

#[async_trait]
impl ProviderLoginAdapter for GoogleSignInAdapter {
    fn provider(&self) -> &'static str {
        GOOGLE
    }

    async fn login(&self, scopes: &BTreeSet<String>) -> SignInOutcome {
        let scopes: Vec<String> = scopes.iter().cloned().collect();
        LoggingHelper::log_sign_in_start(GOOGLE, &scopes);

        let task = self.client.sign_in(&scopes).await;
        let outcome = Self::handle_result(task);

        LoggingHelper::log_sign_in_outcome(GOOGLE, &outcome);
        outcome
    }

    async fn sign_out(&self) -> bool {
        match self.client.sign_out().await {
            Ok(()) => true,
            Err(err) => {
                LoggingHelper::log_sign_out_failure(GOOGLE, "sign-out", &err);
                false
            }
        }
    }

    async fn revoke_access(&self) -> bool {
        match self.client.revoke_access().await {
            Ok(()) => true,
            Err(err) => {
                LoggingHelper::log_sign_out_failure(GOOGLE, "revoke", &err);
                false
            }
        }
    }
}
