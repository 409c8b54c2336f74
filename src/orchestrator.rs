//! Sign-in orchestration
//!
//! The caller-facing entry point: run a provider adapter, fold a success into the
//! [`SessionStore`], and write the opt-in credentials to the [`CredentialVault`].
//! Vault writes are side effects; a failed write is logged and the sign-in outcome is
//! returned unchanged.
//!
//! Callers are expected to serialize auth actions (one sign-in or sign-out in flight).

use crate::models::auth::{RememberedCredentials, SignInRequest};
use crate::models::{FailureKind, SignInOutcome, UserProfile};
use crate::provider::{default_scopes, ProviderLoginAdapter};
use crate::session::SessionStore;
use crate::settings::SignBridgeSettings;
use crate::utils::LoggingHelper;
use crate::vault::CredentialVault;
use log::{info, warn};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Builder for [`SignInOrchestrator`]
pub struct SignInOrchestratorBuilder {
    session: Arc<SessionStore>,
    vault: Arc<CredentialVault>,
    adapters: Vec<Arc<dyn ProviderLoginAdapter>>,
    settings: Option<SignBridgeSettings>,
}

impl SignInOrchestratorBuilder {
    /// Register a provider adapter; a later adapter for the same provider replaces it
    #[must_use]
    pub fn with_adapter(mut self, adapter: Arc<dyn ProviderLoginAdapter>) -> Self {
        self.adapters.push(adapter);
        self
    }

    /// Apply provider settings: disabled providers are skipped, configured scopes
    /// replace the provider defaults
    #[must_use]
    pub fn with_settings(mut self, settings: &SignBridgeSettings) -> Self {
        self.settings = Some(settings.clone());
        self
    }

    #[must_use]
    pub fn build(self) -> SignInOrchestrator {
        let mut adapters = HashMap::new();
        let mut scopes = HashMap::new();

        for adapter in self.adapters {
            let provider = adapter.provider();
            let provider_settings = self
                .settings
                .as_ref()
                .and_then(|settings| settings.get_provider(provider));

            if provider_settings.is_some_and(|p| !p.enabled) {
                LoggingHelper::log_provider_disabled(provider);
                continue;
            }

            let configured_scopes: BTreeSet<String> = provider_settings
                .map(|p| p.scopes.iter().cloned().collect())
                .unwrap_or_default();
            let provider_scopes = if configured_scopes.is_empty() {
                default_scopes(provider)
            } else {
                configured_scopes
            };

            LoggingHelper::log_provider_registered(
                provider,
                provider_settings.and_then(|p| p.display_name.as_deref()),
            );
            scopes.insert(provider.to_string(), provider_scopes);
            adapters.insert(provider.to_string(), adapter);
        }

        let mut names: Vec<&String> = adapters.keys().collect();
        names.sort();
        LoggingHelper::log_providers_summary(&names);

        SignInOrchestrator {
            session: self.session,
            vault: self.vault,
            adapters,
            scopes,
        }
    }
}

/// Caller-facing sign-in entry point
pub struct SignInOrchestrator {
    session: Arc<SessionStore>,
    vault: Arc<CredentialVault>,
    adapters: HashMap<String, Arc<dyn ProviderLoginAdapter>>,
    scopes: HashMap<String, BTreeSet<String>>,
}

impl SignInOrchestrator {
    #[must_use]
    pub fn builder(
        session: Arc<SessionStore>,
        vault: Arc<CredentialVault>,
    ) -> SignInOrchestratorBuilder {
        SignInOrchestratorBuilder {
            session,
            vault,
            adapters: Vec::new(),
            settings: None,
        }
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    #[must_use]
    pub fn vault(&self) -> &Arc<CredentialVault> {
        &self.vault
    }

    /// Registered provider names, sorted
    #[must_use]
    pub fn providers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.adapters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Scopes a request without explicit scopes would use
    #[must_use]
    pub fn scopes_for(&self, provider: &str) -> Option<&BTreeSet<String>> {
        self.scopes.get(provider)
    }

    /// Sign in with `provider`
    ///
    /// Only a `Success` mutates the session; `Cancelled` and `Failed` leave all state
    /// untouched. Remember-me credentials are written after the session update.
    pub async fn sign_in(&self, provider: &str, request: SignInRequest) -> SignInOutcome {
        let Some(adapter) = self.adapters.get(provider) else {
            warn!("Sign-in requested for unregistered provider {provider}");
            return SignInOutcome::failed(
                FailureKind::ConfigurationError,
                None,
                Some(format!("Provider {provider} is not registered")),
            );
        };

        let scopes = if request.scopes.is_empty() {
            self.scopes.get(provider).cloned().unwrap_or_default()
        } else {
            request.scopes
        };

        let outcome = adapter.login(&scopes).await;

        if let SignInOutcome::Success(success) = &outcome {
            self.session
                .update(&success.provider_token, UserProfile::from(success));

            if let Some(credentials) = &request.remember_me {
                self.remember(credentials);
            }
        }

        outcome
    }

    /// Sign out of the current session
    ///
    /// Remote sign-out (and revocation when `revoke` is set) is best-effort; the local
    /// session is cleared whatever the provider answers.
    pub async fn sign_out(&self, revoke: bool) {
        let current = self.session.current();

        if let Some(adapter) = current.provider().and_then(|p| self.adapters.get(p)) {
            let signed_out = adapter.sign_out().await;
            let revoked = if revoke {
                Some(adapter.revoke_access().await)
            } else {
                None
            };
            info!(
                "{} remote sign-out: signed_out={signed_out}, revoked={revoked:?}",
                adapter.provider()
            );
        }

        self.session.clear();
        info!("👋 Signed out");
    }

    /// Credentials to prefill on the sign-in screen
    #[must_use]
    pub fn remembered_credentials(&self) -> Option<RememberedCredentials> {
        self.vault.remembered().credentials()
    }

    /// Toggle remember-me; turning it off purges the stored credentials
    pub fn set_remember_me(&self, enabled: bool) {
        if let Err(err) = self.vault.remember_me().set_enabled(enabled) {
            LoggingHelper::log_persistence_failure("remember-me toggle", &err);
        }
    }

    pub fn save_social_password(&self, provider: &str, email: &str, password: &str) {
        if let Err(err) = self
            .vault
            .social_passwords()
            .save_password(provider, email, password)
        {
            LoggingHelper::log_persistence_failure("social password save", &err);
        }
    }

    #[must_use]
    pub fn social_password(&self, provider: &str, email: &str) -> Option<String> {
        self.vault.social_passwords().get_password(provider, email)
    }

    pub fn clear_social_password(&self, provider: &str, email: &str) {
        if let Err(err) = self.vault.social_passwords().clear_password(provider, email) {
            LoggingHelper::log_persistence_failure("social password clear", &err);
        }
    }

    fn remember(&self, credentials: &RememberedCredentials) {
        if let Err(err) = self
            .vault
            .remember_me()
            .save_credentials(&credentials.email, &credentials.password)
        {
            LoggingHelper::log_persistence_failure("remember-me save", &err);
        }
    }
}
