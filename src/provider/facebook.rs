//! Facebook Login adapter (listener-callback SDK)
//!
//! The SDK reports through three callbacks registered with its login manager. On
//! success the adapter chains a profile enrichment before answering, and treats the
//! pair (login callback, enrichment) as one logical completion guarded by a
//! [`Resolver`]: whichever callback claims the resolver first is the only one that can
//! answer, and enrichment failure folds into a degraded success.
//!
//! The SDK offers no way to unregister a callback, so a callback may fire after the
//! caller stopped waiting. Such a callback finds the resolver claimed or closed and does
//! nothing.

use super::resolution::{self, Resolver};
use super::{ProviderLoginAdapter, FACEBOOK};
use crate::enrichment::ProfileEnrichment;
use crate::models::{EnrichedProfile, FailureKind, SignInOutcome, SignInSuccess};
use crate::utils::LoggingHelper;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tokio::runtime::Handle;

/// Credential delivered to `on_success`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacebookCredential {
    pub user_id: String,
    pub access_token: String,
}

/// Exception delivered to `on_error`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacebookException {
    pub message: String,
    pub error_code: Option<i32>,
}

impl fmt::Display for FacebookException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.error_code {
            Some(code) => write!(f, "Facebook exception {code}: {}", self.message),
            None => write!(f, "Facebook exception: {}", self.message),
        }
    }
}

impl std::error::Error for FacebookException {}

/// Three-way login callback; the SDK invokes at most one method per login, from any thread
pub trait FacebookLoginCallback: Send + Sync {
    fn on_success(&self, credential: FacebookCredential);
    fn on_cancel(&self);
    fn on_error(&self, error: FacebookException);
}

/// The vendor login manager
pub trait FacebookLoginManager: Send + Sync {
    /// Register the callback for subsequent logins; there is no matching unregister
    fn register_callback(&self, callback: Arc<dyn FacebookLoginCallback>);

    /// Launch the interactive login UI
    fn start_interactive_login(&self, scopes: &[String]);

    /// Drop the SDK's cached access token
    fn log_out(&self);
}

/// [`ProviderLoginAdapter`] over the Facebook Login SDK
pub struct FacebookLoginAdapter {
    manager: Arc<dyn FacebookLoginManager>,
    enrichment: Arc<dyn ProfileEnrichment>,
}

impl FacebookLoginAdapter {
    #[must_use]
    pub fn new(
        manager: Arc<dyn FacebookLoginManager>,
        enrichment: Arc<dyn ProfileEnrichment>,
    ) -> Self {
        Self {
            manager,
            enrichment,
        }
    }
}

#[async_trait]
impl ProviderLoginAdapter for FacebookLoginAdapter {
    fn provider(&self) -> &'static str {
        FACEBOOK
    }

    async fn login(&self, scopes: &BTreeSet<String>) -> SignInOutcome {
        let Ok(runtime) = Handle::try_current() else {
            return SignInOutcome::failed(
                FailureKind::ConfigurationError,
                None,
                Some("Facebook login requires a Tokio runtime".to_string()),
            );
        };

        let scopes: Vec<String> = scopes.iter().cloned().collect();
        LoggingHelper::log_sign_in_start(FACEBOOK, &scopes);

        let (resolver, receiver) = resolution::pending();
        self.manager.register_callback(Arc::new(LoginCallbackBridge {
            resolver,
            enrichment: Arc::clone(&self.enrichment),
            runtime,
        }));
        self.manager.start_interactive_login(&scopes);

        let outcome = receiver.await.unwrap_or_else(|_| {
            LoggingHelper::log_callback_released(FACEBOOK);
            SignInOutcome::failed(
                FailureKind::ProviderError,
                None,
                Some("Login callback released without a result".to_string()),
            )
        });

        LoggingHelper::log_sign_in_outcome(FACEBOOK, &outcome);
        outcome
    }

    async fn sign_out(&self) -> bool {
        self.manager.log_out();
        true
    }
}

/// Callback registered with the SDK for one login
struct LoginCallbackBridge {
    resolver: Resolver<SignInOutcome>,
    enrichment: Arc<dyn ProfileEnrichment>,
    runtime: Handle,
}

impl FacebookLoginCallback for LoginCallbackBridge {
    fn on_success(&self, credential: FacebookCredential) {
        let Some(sender) = self.resolver.claim() else {
            LoggingHelper::log_late_callback(FACEBOOK, "onSuccess");
            return;
        };
        if sender.is_closed() {
            LoggingHelper::log_late_callback(FACEBOOK, "onSuccess");
            return;
        }

        let enrichment = Arc::clone(&self.enrichment);
        self.runtime.spawn(async move {
            let profile = enrich(enrichment, credential.access_token.clone()).await;
            let outcome = SignInOutcome::Success(SignInSuccess {
                provider: FACEBOOK.to_string(),
                provider_token: credential.access_token,
                user_id: credential.user_id,
                email: profile.email,
                display_name: profile.display_name,
                photo_url: profile.photo_url,
            });

            if sender.send(outcome).is_err() {
                LoggingHelper::log_late_callback(FACEBOOK, "enrichment");
            }
        });
    }

    fn on_cancel(&self) {
        if !self.resolver.resolve(SignInOutcome::Cancelled) {
            LoggingHelper::log_late_callback(FACEBOOK, "onCancel");
        }
    }

    fn on_error(&self, error: FacebookException) {
        let outcome = SignInOutcome::failed(
            FailureKind::ProviderError,
            error.error_code.map(|code| code.to_string()),
            Some(error.message),
        );
        if !self.resolver.resolve(outcome) {
            LoggingHelper::log_late_callback(FACEBOOK, "onError");
        }
    }
}

/// Run enrichment in its own task so a panicking implementation degrades instead of
/// tearing down the login
async fn enrich(enrichment: Arc<dyn ProfileEnrichment>, token: String) -> EnrichedProfile {
    match tokio::spawn(async move { enrichment.fetch(&token).await }).await {
        Ok(profile) => profile,
        Err(err) => {
            LoggingHelper::log_enrichment_degraded(&format!("enrichment task failed: {err}"));
            EnrichedProfile::default()
        }
    }
}
