//! Credential vault
//!
//! Persisted, opt-in credential storage: the "remember me" record and saved social
//! passwords. The vault owns its records exclusively and never touches the session.
//!
//! - [`storage`] - key-value backends (in-memory and file)
//! - [`remember_me`] - the remember-me record
//! - [`social_passwords`] - per-provider, per-email passwords

pub mod remember_me;
pub mod social_passwords;
pub mod storage;

pub use remember_me::{RememberMeRecord, RememberMeStore, REMEMBER_ME_NAMESPACE};
pub use social_passwords::{credential_key, SocialPasswordStore, SOCIAL_PASSWORDS_NAMESPACE};
pub use storage::{Entries, FileStore, KeyValueStore, MemoryStore};

use crate::settings::VaultSettings;
use log::info;
use std::sync::Arc;

/// Both credential stores over one backend
pub struct CredentialVault {
    remember_me: RememberMeStore,
    social_passwords: SocialPasswordStore,
}

impl CredentialVault {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            remember_me: RememberMeStore::new(Arc::clone(&store)),
            social_passwords: SocialPasswordStore::new(store),
        }
    }

    /// Vault that lives as long as the process
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// File vault when a storage directory is configured, in-memory otherwise
    #[must_use]
    pub fn from_settings(settings: &VaultSettings) -> Self {
        match &settings.storage_dir {
            Some(dir) => {
                info!("🔑 Credential vault stored under {dir}");
                Self::new(Arc::new(FileStore::new(dir)))
            }
            None => {
                info!("🔑 No vault storage directory configured, credentials kept in memory");
                Self::in_memory()
            }
        }
    }

    #[must_use]
    pub fn remember_me(&self) -> &RememberMeStore {
        &self.remember_me
    }

    #[must_use]
    pub fn social_passwords(&self) -> &SocialPasswordStore {
        &self.social_passwords
    }

    /// Current remember-me record
    #[must_use]
    pub fn remembered(&self) -> RememberMeRecord {
        self.remember_me.record()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stores_share_backend_but_not_namespaces() {
        let backend = Arc::new(MemoryStore::new());
        let vault = CredentialVault::new(backend.clone());

        vault.remember_me().save_credentials("a@b.com", "pw").unwrap();
        vault
            .social_passwords()
            .save_password("google", "a@b.com", "social")
            .unwrap();

        assert_eq!(backend.load(REMEMBER_ME_NAMESPACE).unwrap().len(), 3);
        assert_eq!(backend.load(SOCIAL_PASSWORDS_NAMESPACE).unwrap().len(), 1);
        assert!(vault.remembered().enabled);
    }

    #[test]
    fn test_from_settings_picks_backend() {
        let dir = tempfile::tempdir().unwrap();
        let settings = VaultSettings {
            storage_dir: Some(dir.path().display().to_string()),
        };

        let vault = CredentialVault::from_settings(&settings);
        vault.remember_me().save_credentials("a@b.com", "pw").unwrap();
        assert!(dir.path().join("remember_me_store.json").exists());

        let memory = CredentialVault::from_settings(&VaultSettings::default());
        assert!(!memory.remembered().enabled);
    }
}
