// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Secure Storage Module
//!
//! Provides platform-native secure storage for tokens.
//! Uses OS keychains (macOS Keychain, Linux Secret Service, Windows
//! Credential Manager) when available.

use crate::storage::StorageError;

/// Trait for secure storage of small secrets (tokens).
///
/// Implementations should use platform-native secure storage when available:
/// - macOS: Keychain
/// - Linux: Secret Service (GNOME Keyring, KDE Wallet)
/// - Windows: Credential Manager
///
/// Semantics are last-write-wins; callers must not assume atomic
/// read-modify-write.
pub trait SecureStore: Send + Sync {
    /// Saves a value to secure storage, overwriting any previous value.
    fn save(&self, name: &str, value: &str) -> Result<(), StorageError>;

    /// Loads a value from secure storage.
    /// Returns None if the entry doesn't exist.
    fn load(&self, name: &str) -> Result<Option<String>, StorageError>;

    /// Deletes a value from secure storage. Deleting a missing entry is a
    /// no-op.
    fn delete(&self, name: &str) -> Result<(), StorageError>;

    /// Checks if an entry exists in secure storage.
    fn contains(&self, name: &str) -> Result<bool, StorageError> {
        Ok(self.load(name)?.is_some())
    }
}

/// Platform keyring implementation using the `keyring` crate.
/// Available when the `secure-storage` feature is enabled.
#[cfg(feature = "secure-storage")]
pub struct PlatformKeyring {
    service: String,
}

#[cfg(feature = "secure-storage")]
impl PlatformKeyring {
    /// Creates a new platform keyring accessor.
    ///
    /// # Arguments
    /// * `service` - The service name to use for keychain entries (e.g., "flock")
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }
}

#[cfg(feature = "secure-storage")]
impl SecureStore for PlatformKeyring {
    fn save(&self, name: &str, value: &str) -> Result<(), StorageError> {
        let entry = keyring::Entry::new(&self.service, name)
            .map_err(|e| StorageError::Keychain(format!("Keyring error: {}", e)))?;

        entry
            .set_password(value)
            .map_err(|e| StorageError::Keychain(format!("Failed to save to keychain: {}", e)))
    }

    fn load(&self, name: &str) -> Result<Option<String>, StorageError> {
        let entry = keyring::Entry::new(&self.service, name)
            .map_err(|e| StorageError::Keychain(format!("Keyring error: {}", e)))?;

        match entry.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StorageError::Keychain(format!(
                "Failed to load from keychain: {}",
                e
            ))),
        }
    }

    fn delete(&self, name: &str) -> Result<(), StorageError> {
        let entry = keyring::Entry::new(&self.service, name)
            .map_err(|e| StorageError::Keychain(format!("Keyring error: {}", e)))?;

        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already deleted
            Err(e) => Err(StorageError::Keychain(format!(
                "Failed to delete from keychain: {}",
                e
            ))),
        }
    }
}

/// In-memory store.
///
/// Used by tests and by mobile hosts that persist tokens through their own
/// platform storage (Android Keystore, iOS Keychain) and only hand them to
/// the library for the lifetime of the process.
#[derive(Default)]
pub struct MemoryStore {
    entries: std::sync::Mutex<std::collections::HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: std::sync::Mutex::new(std::collections::HashMap::new()),
        }
    }
}

impl SecureStore for MemoryStore {
    fn save(&self, name: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().unwrap().get(name).cloned())
    }

    fn delete(&self, name: &str) -> Result<(), StorageError> {
        self.entries.lock().unwrap().remove(name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_save_load() {
        let store = MemoryStore::new();

        store.save("token", "abc123").unwrap();
        let loaded = store.load("token").unwrap();

        assert_eq!(loaded, Some("abc123".to_string()));
    }

    #[test]
    fn test_memory_store_entry_not_found() {
        let store = MemoryStore::new();
        let loaded = store.load("nonexistent").unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn test_memory_store_delete() {
        let store = MemoryStore::new();

        store.save("token", "abc").unwrap();
        assert!(store.contains("token").unwrap());

        store.delete("token").unwrap();
        assert!(!store.contains("token").unwrap());
    }

    #[test]
    fn test_memory_store_delete_missing_is_noop() {
        let store = MemoryStore::new();
        store.delete("never_saved").unwrap();
    }

    #[test]
    fn test_memory_store_overwrite() {
        let store = MemoryStore::new();

        store.save("token", "first").unwrap();
        store.save("token", "second").unwrap();

        let loaded = store.load("token").unwrap();
        assert_eq!(loaded, Some("second".to_string()));
    }

    // =============================================================================
    // Platform Keyring Tests (only run when secure-storage feature is enabled)
    // =============================================================================

    #[cfg(feature = "secure-storage")]
    mod keyring_tests {
        use super::*;

        // Note: These tests interact with the actual system keychain.
        // They require a Secret Service daemon (GNOME Keyring, KDE Wallet) on Linux,
        // or equivalent on macOS/Windows. Run manually with desktop session active.

        #[test]
        #[ignore = "Requires system keychain (desktop session)"]
        fn test_platform_keyring_save_load() {
            let store = PlatformKeyring::new("flock-test-unit");

            // Clean up from any previous failed tests
            let _ = store.delete("test_token_1");

            store.save("test_token_1", "secret-value").unwrap();
            let loaded = store.load("test_token_1").unwrap();
            assert_eq!(loaded, Some("secret-value".to_string()));

            // Clean up
            store.delete("test_token_1").unwrap();
        }

        #[test]
        #[ignore = "Requires system keychain (desktop session)"]
        fn test_platform_keyring_not_found() {
            let store = PlatformKeyring::new("flock-test-unit");
            let loaded = store.load("nonexistent_token_xyz").unwrap();
            assert_eq!(loaded, None);
        }

        #[test]
        #[ignore = "Requires system keychain (desktop session)"]
        fn test_platform_keyring_delete() {
            let store = PlatformKeyring::new("flock-test-unit");

            let _ = store.delete("test_token_2");

            store.save("test_token_2", "v").unwrap();
            assert!(store.contains("test_token_2").unwrap());

            store.delete("test_token_2").unwrap();
            assert!(!store.contains("test_token_2").unwrap());
        }
    }
}
