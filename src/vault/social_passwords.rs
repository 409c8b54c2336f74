//! Per-provider, per-email saved passwords
//!
//! Stored in the `social_login_passwords` namespace under `"<provider>|<email>"`, both
//! components lowercased, so keys that differ only by case share one entry.

use super::storage::KeyValueStore;
use crate::models::auth::VaultError;
use crate::utils::LoggingHelper;
use serde_json::Value;
use std::sync::Arc;

pub const SOCIAL_PASSWORDS_NAMESPACE: &str = "social_login_passwords";

/// Storage key for a provider/email pair
#[must_use]
pub fn credential_key(provider: &str, email: &str) -> String {
    format!("{}|{}", provider.to_lowercase(), email.to_lowercase())
}

pub struct SocialPasswordStore {
    store: Arc<dyn KeyValueStore>,
}

impl SocialPasswordStore {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Saved password; unreadable storage reads as absent
    #[must_use]
    pub fn get_password(&self, provider: &str, email: &str) -> Option<String> {
        match self.store.load(SOCIAL_PASSWORDS_NAMESPACE) {
            Ok(entries) => entries
                .get(&credential_key(provider, email))
                .and_then(Value::as_str)
                .map(ToString::to_string),
            Err(err) => {
                LoggingHelper::log_persistence_failure("social password read", &err);
                None
            }
        }
    }

    /// # Errors
    ///
    /// Returns an error if the namespace cannot be written
    pub fn save_password(&self, provider: &str, email: &str, password: &str) -> Result<(), VaultError> {
        let key = credential_key(provider, email);
        self.store.edit(SOCIAL_PASSWORDS_NAMESPACE, &mut |entries| {
            entries.insert(key.clone(), Value::String(password.to_string()));
        })
    }

    /// # Errors
    ///
    /// Returns an error if the namespace cannot be written
    pub fn clear_password(&self, provider: &str, email: &str) -> Result<(), VaultError> {
        let key = credential_key(provider, email);
        self.store.edit(SOCIAL_PASSWORDS_NAMESPACE, &mut |entries| {
            entries.remove(&key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::storage::MemoryStore;

    fn store() -> SocialPasswordStore {
        SocialPasswordStore::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_credential_key_lowercases_both_parts() {
        assert_eq!(
            credential_key("Google", "User@Example.com"),
            "google|user@example.com"
        );
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let passwords = store();
        passwords.save_password("Google", "User@Example.com", "p").unwrap();

        assert_eq!(
            passwords.get_password("google", "user@example.com").as_deref(),
            Some("p")
        );
        assert_eq!(
            passwords.get_password("GOOGLE", "USER@EXAMPLE.COM").as_deref(),
            Some("p")
        );
        assert_eq!(passwords.get_password("facebook", "user@example.com"), None);
    }

    #[test]
    fn test_case_variant_overwrites() {
        let passwords = store();
        passwords.save_password("google", "user@example.com", "first").unwrap();
        passwords.save_password("Google", "USER@example.com", "second").unwrap();

        assert_eq!(
            passwords.get_password("google", "user@example.com").as_deref(),
            Some("second")
        );
    }

    #[test]
    fn test_clear_password() {
        let passwords = store();
        passwords.save_password("facebook", "a@b.com", "pw").unwrap();
        passwords.save_password("google", "a@b.com", "other").unwrap();

        passwords.clear_password("Facebook", "A@B.com").unwrap();

        assert_eq!(passwords.get_password("facebook", "a@b.com"), None);
        assert_eq!(passwords.get_password("google", "a@b.com").as_deref(), Some("other"));
    }
}
