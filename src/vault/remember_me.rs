//! Opt-in "remember me" record
//!
//! Stored in the `remember_me_store` namespace as `remember_me`, `email` and `password`.
//! Values are kept verbatim, without hashing or encryption.

use super::storage::{Entries, KeyValueStore};
use crate::models::auth::{RememberedCredentials, VaultError};
use crate::utils::LoggingHelper;
use serde_json::Value;
use std::sync::Arc;

pub const REMEMBER_ME_NAMESPACE: &str = "remember_me_store";

const KEY_ENABLED: &str = "remember_me";
const KEY_EMAIL: &str = "email";
const KEY_PASSWORD: &str = "password";

/// Snapshot of the remember-me namespace
///
/// When `enabled` is false, `email` and `password` are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RememberMeRecord {
    pub enabled: bool,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl RememberMeRecord {
    /// Credentials to prefill, if remember-me is on and both fields are stored
    #[must_use]
    pub fn credentials(&self) -> Option<RememberedCredentials> {
        if !self.enabled {
            return None;
        }
        match (&self.email, &self.password) {
            (Some(email), Some(password)) => Some(RememberedCredentials::new(email, password)),
            _ => None,
        }
    }
}

pub struct RememberMeStore {
    store: Arc<dyn KeyValueStore>,
}

impl RememberMeStore {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Whole record; unreadable storage reads as disabled
    #[must_use]
    pub fn record(&self) -> RememberMeRecord {
        match self.store.load(REMEMBER_ME_NAMESPACE) {
            Ok(entries) => RememberMeRecord {
                enabled: entries.get(KEY_ENABLED).and_then(Value::as_bool).unwrap_or(false),
                email: string_entry(&entries, KEY_EMAIL),
                password: string_entry(&entries, KEY_PASSWORD),
            },
            Err(err) => {
                LoggingHelper::log_persistence_failure("remember-me read", &err);
                RememberMeRecord::default()
            }
        }
    }

    #[must_use]
    pub fn is_remember_me_enabled(&self) -> bool {
        self.record().enabled
    }

    #[must_use]
    pub fn get_email(&self) -> Option<String> {
        self.record().email
    }

    #[must_use]
    pub fn get_password(&self) -> Option<String> {
        self.record().password
    }

    /// Turn remember-me on and store both fields
    ///
    /// # Errors
    ///
    /// Returns an error if the namespace cannot be written
    pub fn save_credentials(&self, email: &str, password: &str) -> Result<(), VaultError> {
        self.store.edit(REMEMBER_ME_NAMESPACE, &mut |entries| {
            entries.insert(KEY_ENABLED.to_string(), Value::Bool(true));
            entries.insert(KEY_EMAIL.to_string(), Value::String(email.to_string()));
            entries.insert(KEY_PASSWORD.to_string(), Value::String(password.to_string()));
        })
    }

    /// Set the flag; disabling removes the stored email and password
    ///
    /// # Errors
    ///
    /// Returns an error if the namespace cannot be written
    pub fn set_enabled(&self, enabled: bool) -> Result<(), VaultError> {
        self.store.edit(REMEMBER_ME_NAMESPACE, &mut |entries| {
            entries.insert(KEY_ENABLED.to_string(), Value::Bool(enabled));
            if !enabled {
                entries.remove(KEY_EMAIL);
                entries.remove(KEY_PASSWORD);
            }
        })
    }
}

fn string_entry(entries: &Entries, key: &str) -> Option<String> {
    entries.get(key).and_then(Value::as_str).map(ToString::to_string)
}
