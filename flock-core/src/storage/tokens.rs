// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Token Store
//!
//! Access/refresh token pair persisted through a [`SecureStore`].

use super::secure::SecureStore;
use super::StorageError;
use crate::config::ClientConfig;

/// An access/refresh token pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    /// Short-lived bearer token attached to authenticated requests.
    pub access: String,
    /// Long-lived token exchanged for a new access token on 401.
    pub refresh: String,
}

/// Persists the session tokens in secure on-device storage.
///
/// Semantics are last-write-wins. Callers must not assume atomic
/// read-modify-write across `tokens`/`set`.
///
/// # Example
///
/// ```ignore
/// use flock_core::storage::{MemoryStore, TokenStore, Tokens};
///
/// let store = TokenStore::new(MemoryStore::new(), &config);
/// store.set(&Tokens { access: "a".into(), refresh: "r".into() })?;
/// let access = store.access_token()?;
/// ```
pub struct TokenStore<S: SecureStore> {
    store: S,
    access_key: String,
    refresh_key: String,
}

impl<S: SecureStore> TokenStore<S> {
    /// Creates a token store using the key names from `config`.
    pub fn new(store: S, config: &ClientConfig) -> Self {
        TokenStore {
            store,
            access_key: config.access_token_key.clone(),
            refresh_key: config.refresh_token_key.clone(),
        }
    }

    /// Returns the stored token pair, or None if either token is missing.
    pub fn tokens(&self) -> Result<Option<Tokens>, StorageError> {
        let access = self.store.load(&self.access_key)?;
        let refresh = self.store.load(&self.refresh_key)?;
        match (access, refresh) {
            (Some(access), Some(refresh)) => Ok(Some(Tokens { access, refresh })),
            _ => Ok(None),
        }
    }

    /// Returns the stored access token, if any.
    pub fn access_token(&self) -> Result<Option<String>, StorageError> {
        self.store.load(&self.access_key)
    }

    /// Returns the stored refresh token, if any.
    pub fn refresh_token(&self) -> Result<Option<String>, StorageError> {
        self.store.load(&self.refresh_key)
    }

    /// Stores a token pair, overwriting any previous one.
    pub fn set(&self, tokens: &Tokens) -> Result<(), StorageError> {
        self.store.save(&self.access_key, &tokens.access)?;
        self.store.save(&self.refresh_key, &tokens.refresh)
    }

    /// Overwrites only the access token (after a successful refresh).
    pub fn set_access_token(&self, access: &str) -> Result<(), StorageError> {
        self.store.save(&self.access_key, access)
    }

    /// Overwrites only the refresh token (when the server rotates it).
    pub fn set_refresh_token(&self, refresh: &str) -> Result<(), StorageError> {
        self.store.save(&self.refresh_key, refresh)
    }

    /// Removes both tokens. Safe to call when nothing is stored.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.delete(&self.access_key)?;
        self.store.delete(&self.refresh_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn create_store() -> TokenStore<MemoryStore> {
        TokenStore::new(MemoryStore::new(), &ClientConfig::default())
    }

    #[test]
    fn test_empty_store_has_no_tokens() {
        let store = create_store();
        assert_eq!(store.tokens().unwrap(), None);
        assert_eq!(store.access_token().unwrap(), None);
    }

    #[test]
    fn test_set_and_get_tokens() {
        let store = create_store();
        let tokens = Tokens {
            access: "access-1".into(),
            refresh: "refresh-1".into(),
        };

        store.set(&tokens).unwrap();
        assert_eq!(store.tokens().unwrap(), Some(tokens));
    }

    #[test]
    fn test_set_access_token_keeps_refresh() {
        let store = create_store();
        store
            .set(&Tokens {
                access: "old".into(),
                refresh: "refresh-1".into(),
            })
            .unwrap();

        store.set_access_token("new").unwrap();

        let tokens = store.tokens().unwrap().unwrap();
        assert_eq!(tokens.access, "new");
        assert_eq!(tokens.refresh, "refresh-1");
    }

    #[test]
    fn test_clear_removes_both() {
        let store = create_store();
        store
            .set(&Tokens {
                access: "a".into(),
                refresh: "r".into(),
            })
            .unwrap();

        store.clear().unwrap();
        assert_eq!(store.tokens().unwrap(), None);
        assert_eq!(store.refresh_token().unwrap(), None);
    }

    #[test]
    fn test_partial_pair_is_no_session() {
        let store = create_store();
        store.set_access_token("only-access").unwrap();

        // A lone access token is not a usable session
        assert_eq!(store.tokens().unwrap(), None);
        assert_eq!(store.access_token().unwrap(), Some("only-access".into()));
    }
}
