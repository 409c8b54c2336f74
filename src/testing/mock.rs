//! Mock objects and fake implementations for testing
//!
//! Scripted stand-ins for the vendor SDKs, the enrichment call and the vault backend.

use crate::enrichment::ProfileEnrichment;
use crate::models::auth::VaultError;
use crate::models::EnrichedProfile;
use crate::provider::{
    FacebookCredential, FacebookException, FacebookLoginCallback, FacebookLoginManager,
    GoogleApiException, GoogleSignInClient, GoogleSignInTask,
};
use crate::vault::{Entries, KeyValueStore};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// What the scripted Facebook SDK does when the interactive login starts
#[derive(Debug, Clone)]
pub enum FacebookScript {
    Succeed(FacebookCredential),
    Cancel,
    Fail(FacebookException),
    /// Fire `on_success` twice
    SucceedTwice(FacebookCredential),
    /// Fire `on_cancel`, then `on_success`
    CancelThenSucceed(FacebookCredential),
    /// Fire `on_success` from a separate OS thread
    SucceedFromThread(FacebookCredential),
    /// Drop every registered callback without firing
    ReleaseCallback,
    /// Keep the callback and fire nothing; tests fire it later
    Hold,
}

/// Facebook login manager driven by a [`FacebookScript`]
pub struct ScriptedFacebookManager {
    script: FacebookScript,
    callbacks: Mutex<Vec<Arc<dyn FacebookLoginCallback>>>,
    registrations: AtomicUsize,
    requested_scopes: Mutex<Vec<Vec<String>>>,
    log_outs: AtomicUsize,
}

impl ScriptedFacebookManager {
    #[must_use]
    pub fn new(script: FacebookScript) -> Self {
        Self {
            script,
            callbacks: Mutex::new(Vec::new()),
            registrations: AtomicUsize::new(0),
            requested_scopes: Mutex::new(Vec::new()),
            log_outs: AtomicUsize::new(0),
        }
    }

    fn latest_callback(&self) -> Option<Arc<dyn FacebookLoginCallback>> {
        self.callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Fire `on_success` on the most recently registered callback
    pub fn fire_success(&self, credential: FacebookCredential) {
        if let Some(callback) = self.latest_callback() {
            callback.on_success(credential);
        }
    }

    /// Fire `on_cancel` on the most recently registered callback
    pub fn fire_cancel(&self) {
        if let Some(callback) = self.latest_callback() {
            callback.on_cancel();
        }
    }

    /// Fire `on_error` on the most recently registered callback
    pub fn fire_error(&self, error: FacebookException) {
        if let Some(callback) = self.latest_callback() {
            callback.on_error(error);
        }
    }

    /// Scopes of every interactive login started so far
    #[must_use]
    pub fn requested_scopes(&self) -> Vec<Vec<String>> {
        self.requested_scopes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn registration_count(&self) -> usize {
        self.registrations.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn log_out_count(&self) -> usize {
        self.log_outs.load(Ordering::SeqCst)
    }
}

impl FacebookLoginManager for ScriptedFacebookManager {
    fn register_callback(&self, callback: Arc<dyn FacebookLoginCallback>) {
        self.registrations.fetch_add(1, Ordering::SeqCst);
        self.callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(callback);
    }

    fn start_interactive_login(&self, scopes: &[String]) {
        self.requested_scopes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(scopes.to_vec());

        match self.script.clone() {
            FacebookScript::Succeed(credential) => self.fire_success(credential),
            FacebookScript::Cancel => self.fire_cancel(),
            FacebookScript::Fail(error) => self.fire_error(error),
            FacebookScript::SucceedTwice(credential) => {
                self.fire_success(credential.clone());
                self.fire_success(credential);
            }
            FacebookScript::CancelThenSucceed(credential) => {
                self.fire_cancel();
                self.fire_success(credential);
            }
            FacebookScript::SucceedFromThread(credential) => {
                if let Some(callback) = self.latest_callback() {
                    std::thread::spawn(move || callback.on_success(credential));
                }
            }
            FacebookScript::ReleaseCallback => self
                .callbacks
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clear(),
            FacebookScript::Hold => {}
        }
    }

    fn log_out(&self) {
        self.log_outs.fetch_add(1, Ordering::SeqCst);
    }
}

/// How [`MockEnrichment`] answers
#[derive(Debug, Clone)]
pub enum EnrichmentBehavior {
    Profile(EnrichedProfile),
    /// Answer the all-empty profile, as a failed request does
    Degraded,
    /// Panic inside `fetch`
    Panic,
}

/// Enrichment double that records the tokens it was called with
pub struct MockEnrichment {
    behavior: EnrichmentBehavior,
    tokens: Mutex<Vec<String>>,
}

impl MockEnrichment {
    #[must_use]
    pub fn new(behavior: EnrichmentBehavior) -> Self {
        Self {
            behavior,
            tokens: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.tokens.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn tokens(&self) -> Vec<String> {
        self.tokens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ProfileEnrichment for MockEnrichment {
    async fn fetch(&self, provider_token: &str) -> EnrichedProfile {
        self.tokens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(provider_token.to_string());

        match &self.behavior {
            EnrichmentBehavior::Profile(profile) => profile.clone(),
            EnrichmentBehavior::Degraded => EnrichedProfile::default(),
            EnrichmentBehavior::Panic => panic!("profile request exploded"),
        }
    }
}

/// Google client that completes every sign-in with a fixed task
pub struct ScriptedGoogleClient {
    task: GoogleSignInTask,
    sign_out_result: Result<(), GoogleApiException>,
    revoke_result: Result<(), GoogleApiException>,
    requested_scopes: Mutex<Vec<Vec<String>>>,
    sign_outs: AtomicUsize,
    revokes: AtomicUsize,
}

impl ScriptedGoogleClient {
    #[must_use]
    pub fn new(task: GoogleSignInTask) -> Self {
        Self {
            task,
            sign_out_result: Ok(()),
            revoke_result: Ok(()),
            requested_scopes: Mutex::new(Vec::new()),
            sign_outs: AtomicUsize::new(0),
            revokes: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn with_sign_out_result(mut self, result: Result<(), GoogleApiException>) -> Self {
        self.sign_out_result = result;
        self
    }

    #[must_use]
    pub fn with_revoke_result(mut self, result: Result<(), GoogleApiException>) -> Self {
        self.revoke_result = result;
        self
    }

    #[must_use]
    pub fn requested_scopes(&self) -> Vec<Vec<String>> {
        self.requested_scopes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn sign_out_count(&self) -> usize {
        self.sign_outs.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn revoke_count(&self) -> usize {
        self.revokes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GoogleSignInClient for ScriptedGoogleClient {
    async fn sign_in(&self, scopes: &[String]) -> GoogleSignInTask {
        self.requested_scopes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(scopes.to_vec());
        self.task.clone()
    }

    async fn sign_out(&self) -> Result<(), GoogleApiException> {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
        self.sign_out_result.clone()
    }

    async fn revoke_access(&self) -> Result<(), GoogleApiException> {
        self.revokes.fetch_add(1, Ordering::SeqCst);
        self.revoke_result.clone()
    }
}

/// Vault backend whose storage is always unavailable
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn load(&self, _namespace: &str) -> Result<Entries, VaultError> {
        Err(VaultError::Io(std::io::Error::other("storage unavailable")))
    }

    fn edit(&self, _namespace: &str, _edit: &mut dyn FnMut(&mut Entries)) -> Result<(), VaultError> {
        Err(VaultError::Io(std::io::Error::other("storage unavailable")))
    }
}
