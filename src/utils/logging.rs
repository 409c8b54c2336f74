// Centralized logging for sign-in events. Tokens and passwords never reach these helpers.
use crate::models::SignInOutcome;
use log::{debug, info, warn};

pub struct LoggingHelper;

impl LoggingHelper {
    /// Log the start of an interactive login
    pub fn log_sign_in_start(provider: &str, scopes: &[String]) {
        info!("🔐 Starting {provider} sign-in with scopes: {scopes:?}");
    }

    /// Log the outcome handed back to the caller
    pub fn log_sign_in_outcome(provider: &str, outcome: &SignInOutcome) {
        match outcome {
            SignInOutcome::Success(success) => {
                info!(
                    "✅ {} sign-in succeeded for user {} (email={}, name={}, photo={})",
                    provider,
                    success.user_id,
                    presence(success.email.as_ref()),
                    presence(success.display_name.as_ref()),
                    presence(success.photo_url.as_ref()),
                );
            }
            SignInOutcome::Cancelled => info!("↩️  {provider} sign-in cancelled by user"),
            SignInOutcome::Failed {
                kind,
                vendor_code,
                detail,
            } => warn!(
                "❌ {provider} sign-in failed: kind={kind}, vendor_code={vendor_code:?}, detail={detail:?}"
            ),
        }
    }

    /// Log a vendor callback that arrived when nobody was waiting for it
    pub fn log_late_callback(provider: &str, callback: &str) {
        debug!("{provider} {callback} callback arrived after the sign-in was resolved or abandoned; ignoring");
    }

    /// Log that the vendor dropped its callback without invoking it
    pub fn log_callback_released(provider: &str) {
        warn!("{provider} SDK released the login callback without reporting a result");
    }

    /// Log enrichment degradation
    pub fn log_enrichment_degraded(reason: &str) {
        warn!("⚠️  Profile enrichment degraded, continuing with partial profile: {reason}");
    }

    /// Log a credential vault write that failed
    pub fn log_persistence_failure(operation: &str, error: &dyn std::fmt::Display) {
        warn!("⚠️  Credential vault {operation} failed, sign-in unaffected: {error}");
    }

    /// Log a remote sign-out or revoke failure
    pub fn log_sign_out_failure(provider: &str, operation: &str, error: &dyn std::fmt::Display) {
        warn!("⚠️  {provider} {operation} failed, local session is cleared regardless: {error}");
    }

    /// Log adapter registration
    pub fn log_provider_registered(provider: &str, display_name: Option<&str>) {
        let name = display_name.unwrap_or(provider);
        info!("✅ {name} sign-in registered ({provider})");
    }

    /// Log that a provider is disabled
    pub fn log_provider_disabled(provider: &str) {
        info!("⏭️  Provider {provider} is disabled, skipping");
    }

    /// Log summary of registered providers
    pub fn log_providers_summary(provider_names: &[&String]) {
        info!("🎯 Sign-in providers: {provider_names:?}");
    }
}

fn presence<T>(value: Option<&T>) -> &'static str {
    if value.is_some() {
        "present"
    } else {
        "missing"
    }
}
