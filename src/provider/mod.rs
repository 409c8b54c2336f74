//! Provider login adapters
//!
//! Each vendor SDK has its own completion model: Facebook Login reports through
//! registered listener callbacks, Google Sign-In hands back a completed task. The
//! adapters in this module hide that difference behind [`ProviderLoginAdapter`], so the
//! rest of the crate only ever sees one [`SignInOutcome`] per login.

use crate::models::SignInOutcome;
use async_trait::async_trait;
use std::collections::BTreeSet;

pub mod facebook;
pub mod google;
pub mod resolution;

pub use facebook::{
    FacebookCredential, FacebookException, FacebookLoginAdapter, FacebookLoginCallback,
    FacebookLoginManager,
};
pub use google::{
    GoogleAccount, GoogleApiException, GoogleSignInAdapter, GoogleSignInClient, GoogleSignInTask,
};

/// Provider name for Facebook Login
pub const FACEBOOK: &str = "facebook";

/// Provider name for Google Sign-In
pub const GOOGLE: &str = "google";

/// Uniform login contract over a vendor SDK
#[async_trait]
pub trait ProviderLoginAdapter: Send + Sync {
    /// Provider name, e.g. `"facebook"`
    fn provider(&self) -> &'static str;

    /// Run the vendor login flow and return its single outcome
    ///
    /// Suspends until the vendor reports completion. Provider failures are
    /// returned as [`SignInOutcome::Failed`], never raised.
    async fn login(&self, scopes: &BTreeSet<String>) -> SignInOutcome;

    /// Best-effort remote sign-out
    ///
    /// Returns `true` if the vendor confirmed it. Failures are logged, never raised.
    async fn sign_out(&self) -> bool {
        true
    }

    /// Best-effort revocation of the app's grant
    ///
    /// Returns `true` if the vendor confirmed it. Providers without revocation report `true`.
    async fn revoke_access(&self) -> bool {
        true
    }
}

/// Scopes requested when the caller does not name any
#[must_use]
pub fn default_scopes(provider: &str) -> BTreeSet<String> {
    let scopes: &[&str] = match provider {
        FACEBOOK => &["public_profile", "email"],
        GOOGLE => &["openid", "email", "profile"],
        _ => &[],
    };
    scopes.iter().map(ToString::to_string).collect()
}
