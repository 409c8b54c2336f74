use signbridge::settings::VaultSettings;
use signbridge::vault::{FileStore, REMEMBER_ME_NAMESPACE, SOCIAL_PASSWORDS_NAMESPACE};
use signbridge::CredentialVault;
use std::sync::Arc;

/// Records written through one vault are read back by a fresh vault over the same directory
#[test]
fn test_file_vault_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let vault = CredentialVault::new(Arc::new(FileStore::new(dir.path())));
        vault
            .remember_me()
            .save_credentials("riley@example.com", "hunter2")
            .unwrap();
        vault
            .social_passwords()
            .save_password("Facebook", "Riley@Example.com", "fb-pass")
            .unwrap();
    }

    let settings = VaultSettings {
        storage_dir: Some(dir.path().to_string_lossy().to_string()),
    };
    let reopened = CredentialVault::from_settings(&settings);

    assert!(reopened.remember_me().is_remember_me_enabled());
    assert_eq!(
        reopened.remember_me().get_email().as_deref(),
        Some("riley@example.com")
    );
    assert_eq!(
        reopened
            .social_passwords()
            .get_password("facebook", "riley@example.com")
            .as_deref(),
        Some("fb-pass")
    );

    assert!(dir.path().join(format!("{REMEMBER_ME_NAMESPACE}.json")).exists());
    assert!(dir
        .path()
        .join(format!("{SOCIAL_PASSWORDS_NAMESPACE}.json"))
        .exists());
}

#[test]
fn test_disabling_remember_me_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let vault = CredentialVault::new(Arc::new(FileStore::new(dir.path())));
    vault
        .remember_me()
        .save_credentials("a@b.com", "pw")
        .unwrap();
    vault.remember_me().set_enabled(false).unwrap();

    let reopened = CredentialVault::new(Arc::new(FileStore::new(dir.path())));
    let record = reopened.remembered();

    assert!(!record.enabled);
    assert_eq!(record.email, None);
    assert_eq!(record.password, None);
}

#[test]
fn test_clearing_one_social_password_keeps_the_others() {
    let dir = tempfile::tempdir().unwrap();
    let vault = CredentialVault::new(Arc::new(FileStore::new(dir.path())));
    let passwords = vault.social_passwords();

    passwords.save_password("google", "a@example.com", "one").unwrap();
    passwords.save_password("google", "b@example.com", "two").unwrap();
    passwords.clear_password("GOOGLE", "A@example.com").unwrap();

    assert_eq!(passwords.get_password("google", "a@example.com"), None);
    assert_eq!(
        passwords.get_password("google", "b@example.com").as_deref(),
        Some("two")
    );
}
