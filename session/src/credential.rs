//! The durable credential slot.
//!
//! SYSTEM CONTEXT
//! ==============
//! The persisted `auth_token` is the single source of truth for "is the
//! caller authenticated". `HttpClient` and `AuthGateway` both read it at call
//! time instead of caching a copy.

#[cfg(test)]
#[path = "credential_test.rs"]
mod credential_test;

use std::cell::RefCell;

use crate::error::CredentialError;

/// Conventional name of the persisted slot (localStorage key, file name).
pub const CREDENTIAL_KEY: &str = "auth_token";

/// One durable key/value slot holding the bearer credential.
pub trait CredentialStore {
    /// Raw stored value, if any.
    fn get(&self) -> Option<String>;

    /// Replace the stored value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage rejects the write.
    fn set(&self, token: &str) -> Result<(), CredentialError>;

    /// Remove the stored value. Removing an absent value succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage rejects the delete.
    fn remove(&self) -> Result<(), CredentialError>;

    /// The usable credential: an empty stored string counts as absent.
    fn token(&self) -> Option<String> {
        self.get().filter(|token| !token.trim().is_empty())
    }
}

/// Process-local store for tests and embedders without durable storage.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: RefCell<Option<String>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self { slot: RefCell::new(Some(token.to_owned())) }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn set(&self, token: &str) -> Result<(), CredentialError> {
        *self.slot.borrow_mut() = Some(token.to_owned());
        Ok(())
    }

    fn remove(&self) -> Result<(), CredentialError> {
        self.slot.borrow_mut().take();
        Ok(())
    }
}
