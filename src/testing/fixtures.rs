//! Test fixtures providing pre-built test objects

use crate::models::{EnrichedProfile, UserProfile};
use crate::provider::{default_scopes, FacebookCredential, GoogleAccount, FACEBOOK, GOOGLE};
use std::collections::BTreeSet;

use super::constants::{
    TEST_ACCESS_TOKEN, TEST_EMAIL, TEST_GOOGLE_EMAIL, TEST_GOOGLE_ID, TEST_GOOGLE_ID_TOKEN,
    TEST_GOOGLE_NAME, TEST_PHOTO_URL, TEST_USER_ID, TEST_USER_NAME,
};

/// Central fixture provider for all test data
pub struct TestFixtures;

impl TestFixtures {
    #[must_use]
    pub fn facebook_credential() -> FacebookCredential {
        FacebookCredential {
            user_id: TEST_USER_ID.to_string(),
            access_token: TEST_ACCESS_TOKEN.to_string(),
        }
    }

    #[must_use]
    pub fn enriched_profile() -> EnrichedProfile {
        EnrichedProfile {
            email: Some(TEST_EMAIL.to_string()),
            display_name: Some(TEST_USER_NAME.to_string()),
            photo_url: Some(TEST_PHOTO_URL.to_string()),
        }
    }

    #[must_use]
    pub fn google_account() -> GoogleAccount {
        GoogleAccount {
            id: TEST_GOOGLE_ID.to_string(),
            email: Some(TEST_GOOGLE_EMAIL.to_string()),
            display_name: Some(TEST_GOOGLE_NAME.to_string()),
            id_token: Some(TEST_GOOGLE_ID_TOKEN.to_string()),
        }
    }

    /// Signed-in Facebook user
    #[must_use]
    pub fn user_profile() -> UserProfile {
        UserProfile {
            provider: FACEBOOK.to_string(),
            user_id: TEST_USER_ID.to_string(),
            email: Some(TEST_EMAIL.to_string()),
            display_name: Some(TEST_USER_NAME.to_string()),
            photo_url: Some(TEST_PHOTO_URL.to_string()),
        }
    }

    #[must_use]
    pub fn facebook_scopes() -> BTreeSet<String> {
        default_scopes(FACEBOOK)
    }

    #[must_use]
    pub fn google_scopes() -> BTreeSet<String> {
        default_scopes(GOOGLE)
    }
}
