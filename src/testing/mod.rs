//! Unified testing utilities for signbridge
//!
//! - [`fixtures`] - Pre-built test data (credentials, accounts, profiles)
//! - [`mock`] - Scripted vendor SDKs, enrichment double and failing vault backend
//!
//! ## Usage
//!
//! ```rust
//! use signbridge::provider::{FacebookLoginAdapter, ProviderLoginAdapter};
//! use signbridge::testing::mock::{
//!     EnrichmentBehavior, FacebookScript, MockEnrichment, ScriptedFacebookManager,
//! };
//! use signbridge::testing::TestFixtures;
//! use std::sync::Arc;
//!
//! # async fn run() {
//! let manager = Arc::new(ScriptedFacebookManager::new(FacebookScript::Cancel));
//! let enrichment = Arc::new(MockEnrichment::new(EnrichmentBehavior::Degraded));
//! let adapter = FacebookLoginAdapter::new(manager, enrichment);
//!
//! let outcome = adapter.login(&TestFixtures::facebook_scopes()).await;
//! assert!(outcome.is_cancelled());
//! # }
//! ```

pub mod fixtures;
pub mod mock;

pub use fixtures::TestFixtures;

/// Common test constants
pub mod constants {
    /// Facebook user id
    pub const TEST_USER_ID: &str = "1001";

    /// Facebook access token
    pub const TEST_ACCESS_TOKEN: &str = "EAAB-test-access-token";

    /// Default test email address
    pub const TEST_EMAIL: &str = "riley@example.com";

    /// Default test user name
    pub const TEST_USER_NAME: &str = "Riley Runner";

    /// Large-format picture URL
    pub const TEST_PHOTO_URL: &str = "https://cdn.example.com/riley-large.jpg";

    pub const TEST_GOOGLE_ID: &str = "109876543210";
    pub const TEST_GOOGLE_EMAIL: &str = "jordan@example.com";
    pub const TEST_GOOGLE_NAME: &str = "Jordan Lift";
    pub const TEST_GOOGLE_ID_TOKEN: &str = "google-id-token";
}
