use serde::{Deserialize, Serialize};

pub mod auth;

/// Message shown for every failed sign-in, whatever the underlying kind
pub const GENERIC_SIGN_IN_FAILURE_MESSAGE: &str = "Sign-in failed. Please try again.";

/// Stable classification of provider-level sign-in failures
///
/// User cancellation is not a failure kind; it is reported as
/// [`SignInOutcome::Cancelled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The vendor SDK reported an SDK-level failure
    ProviderError,
    /// The vendor classified the failure as a connectivity problem
    NetworkError,
    /// The vendor classified the failure as a developer or setup issue
    ConfigurationError,
    /// Any vendor status the classifier does not recognize
    Unknown,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FailureKind::ProviderError => "provider_error",
            FailureKind::NetworkError => "network_error",
            FailureKind::ConfigurationError => "configuration_error",
            FailureKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Payload of a successful sign-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInSuccess {
    pub provider: String,
    pub provider_token: String,
    pub user_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

/// The single result of one login invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SignInOutcome {
    Success(SignInSuccess),
    Cancelled,
    Failed {
        kind: FailureKind,
        /// Raw vendor code, for diagnostics only
        vendor_code: Option<String>,
        /// Vendor exception message, for diagnostics only
        detail: Option<String>,
    },
}

impl SignInOutcome {
    /// Build a `Failed` outcome
    #[must_use]
    pub fn failed(kind: FailureKind, vendor_code: Option<String>, detail: Option<String>) -> Self {
        SignInOutcome::Failed {
            kind,
            vendor_code,
            detail,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, SignInOutcome::Success(_))
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SignInOutcome::Cancelled)
    }

    /// Failure kind, if this outcome is a failure
    #[must_use]
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            SignInOutcome::Failed { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Message to surface to the user, if any
    ///
    /// Cancellation is indistinguishable from the user declining and shows nothing.
    /// Every failure kind maps to the same retry-capable message.
    #[must_use]
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            SignInOutcome::Failed { .. } => Some(GENERIC_SIGN_IN_FAILURE_MESSAGE),
            SignInOutcome::Success(_) | SignInOutcome::Cancelled => None,
        }
    }

    /// Short label for logging
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            SignInOutcome::Success(_) => "success",
            SignInOutcome::Cancelled => "cancelled",
            SignInOutcome::Failed { .. } => "failed",
        }
    }
}

/// Display profile fields fetched after a successful login
///
/// The all-`None` value is the degraded result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedProfile {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

impl EnrichedProfile {
    /// True when no field could be resolved
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.email.is_none() && self.display_name.is_none() && self.photo_url.is_none()
    }
}

/// Signed-in user as held by the session store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub provider: String,
    pub user_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

impl From<&SignInSuccess> for UserProfile {
    fn from(success: &SignInSuccess) -> Self {
        Self {
            provider: success.provider.clone(),
            user_id: success.user_id.clone(),
            email: success.email.clone(),
            display_name: success.display_name.clone(),
            photo_url: success.photo_url.clone(),
        }
    }
}
