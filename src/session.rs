// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory session store holding the bearer credential.
//!
//! One store is built per application and handed to the auth client (the only
//! writer) and to the gateway client (reader). Nothing is persisted; the
//! session lives as long as the process.

use chrono::{DateTime, Utc};
use std::sync::{Arc, PoisonError, RwLock};

/// Client-held representation of "currently logged in".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub access_token: Option<String>,
    pub id_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Valid iff both tokens and the expiry are present and `now < expires_at`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        match (&self.access_token, &self.id_token, self.expires_at) {
            (Some(_), Some(_), Some(expires_at)) => now < expires_at,
            _ => false,
        }
    }
}

/// Shared handle to the process-wide session.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current credential.
    pub fn set(
        &self,
        access_token: impl Into<String>,
        id_token: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) {
        let mut session = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *session = Session {
            access_token: Some(access_token.into()),
            id_token: Some(id_token.into()),
            expires_at: Some(expires_at),
        };
    }

    /// Reset every field to absent.
    pub fn clear(&self) {
        let mut session = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *session = Session::default();
    }

    /// Whether the session is valid right now (wall clock).
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.read().is_valid_at(now)
    }

    /// `"Bearer <id_token>"`, or an empty string when no ID token is held.
    pub fn auth_header(&self) -> String {
        self.read()
            .id_token
            .as_deref()
            .map(|token| format!("Bearer {}", token))
            .unwrap_or_default()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.read().expires_at
    }

    /// Copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Session> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_empty_store_is_invalid() {
        let store = SessionStore::new();
        assert!(!store.is_valid());
        assert_eq!(store.auth_header(), "");
        assert_eq!(store.expires_at(), None);
    }

    #[test]
    fn test_future_expiry_is_valid() {
        let store = SessionStore::new();
        store.set("access", "abc", Utc::now() + Duration::milliseconds(3_600_000));

        assert!(store.is_valid());
        assert_eq!(store.auth_header(), "Bearer abc");
    }

    #[test]
    fn test_past_expiry_is_invalid() {
        let store = SessionStore::new();
        for secs in [1, 60, 3600, 86_400 * 365] {
            store.set("access", "id", Utc::now() - Duration::seconds(secs));
            assert!(!store.is_valid(), "expired {secs}s ago should be invalid");
        }
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let now = Utc::now();
        let store = SessionStore::new();
        store.set("access", "id", now);

        assert!(!store.is_valid_at(now));
        assert!(store.is_valid_at(now - Duration::seconds(1)));
    }

    #[test]
    fn test_clear_invalidates() {
        let store = SessionStore::new();
        store.set("access", "id", Utc::now() + Duration::hours(1));
        store.clear();

        assert!(!store.is_valid());
        assert_eq!(store.auth_header(), "");
        assert_eq!(store.snapshot(), Session::default());
    }

    #[test]
    fn test_missing_token_is_invalid() {
        let session = Session {
            access_token: None,
            id_token: Some("id".to_string()),
            expires_at: Some(Utc::now() + Duration::hours(1)),
        };
        assert!(!session.is_valid_at(Utc::now()));

        let session = Session {
            access_token: Some("access".to_string()),
            id_token: None,
            expires_at: Some(Utc::now() + Duration::hours(1)),
        };
        assert!(!session.is_valid_at(Utc::now()));
    }

    #[test]
    fn test_clones_share_state() {
        let store = SessionStore::new();
        let reader = store.clone();
        store.set("access", "shared", Utc::now() + Duration::hours(1));

        assert_eq!(reader.auth_header(), "Bearer shared");
    }
}
