// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Token Storage
//!
//! Secure on-device storage for the access and refresh tokens. Uses the OS
//! keychain (macOS Keychain, Linux Secret Service, Windows Credential
//! Manager) when the `secure-storage` feature is enabled, with an in-memory
//! store for tests and for hosts that manage persistence themselves.

#[cfg(feature = "testing")]
pub mod error;
#[cfg(not(feature = "testing"))]
mod error;

#[cfg(feature = "testing")]
pub mod secure;
#[cfg(not(feature = "testing"))]
mod secure;

#[cfg(feature = "testing")]
pub mod tokens;
#[cfg(not(feature = "testing"))]
mod tokens;

pub use error::StorageError;

#[cfg(feature = "secure-storage")]
pub use secure::PlatformKeyring;
pub use secure::{MemoryStore, SecureStore};

pub use tokens::{TokenStore, Tokens};
