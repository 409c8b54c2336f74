#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

/// Version of the signbridge library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod enrichment;
pub mod models;
pub mod orchestrator;
pub mod provider;
pub mod session;
pub mod settings;
pub mod utils;
pub mod vault;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Re-export commonly used items
pub use enrichment::{GraphProfileClient, ProfileEnrichment};
pub use models::auth::{RememberedCredentials, SignInRequest, VaultError};
pub use models::{FailureKind, SignInOutcome, SignInSuccess, UserProfile};
pub use orchestrator::{SignInOrchestrator, SignInOrchestratorBuilder};
pub use provider::{FacebookLoginAdapter, GoogleSignInAdapter, ProviderLoginAdapter};
pub use session::{Session, SessionStore};
pub use settings::SignBridgeSettings;
pub use vault::CredentialVault;
