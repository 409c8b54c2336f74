//! Session Store - process-wide auth state
//!
//! `SessionStore` is the single owner of the live [`Session`]. It is constructed once at
//! app start and injected wherever the session is read; sign-out resets it to empty.
//!
//! Writes usually complete on a background completion context while reads happen on the
//! UI context, so the session sits behind a `RwLock` and every read returns a snapshot
//! of the latest committed value.

use crate::models::UserProfile;
use chrono::{DateTime, Utc};
use log::debug;
use std::sync::{PoisonError, RwLock};

/// Current auth token and user
///
/// Token, user and timestamp are set and cleared together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    user: Option<UserProfile>,
    authenticated_at: Option<DateTime<Utc>>,
}

impl Session {
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn authenticated_at(&self) -> Option<DateTime<Utc>> {
        self.authenticated_at
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Provider of the signed-in user
    #[must_use]
    pub fn provider(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.provider.as_str())
    }
}

/// Holder of the live session
#[derive(Debug, Default)]
pub struct SessionStore {
    session: RwLock<Session>,
}

impl SessionStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically replace token and user
    pub fn update(&self, token: &str, user: UserProfile) {
        let next = Session {
            token: Some(token.to_string()),
            user: Some(user),
            authenticated_at: Some(Utc::now()),
        };
        debug!(
            "Session updated for {} user {}",
            next.provider().unwrap_or_default(),
            next.user().map(|u| u.user_id.as_str()).unwrap_or_default()
        );
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = next;
    }

    /// Atomically reset to empty
    pub fn clear(&self) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Session::default();
        debug!("Session cleared");
    }

    /// Snapshot of the latest session
    #[must_use]
    pub fn current(&self) -> Session {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_authenticated()
    }
}
