//! `localStorage` credential slot.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use session::{CredentialError, CredentialStore};
#[cfg(feature = "csr")]
use session::CREDENTIAL_KEY;

/// Stores the bearer token under `auth_token`. Storage is looked up on every
/// call so a browser that blocks it later only loses persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageCredentials;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl CredentialStore for LocalStorageCredentials {
    fn get(&self) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(CREDENTIAL_KEY).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn set(&self, token: &str) -> Result<(), CredentialError> {
        #[cfg(feature = "csr")]
        {
            let storage = local_storage().ok_or_else(|| CredentialError::Unavailable("localStorage".to_owned()))?;
            storage
                .set_item(CREDENTIAL_KEY, token)
                .map_err(|_| CredentialError::Unavailable("localStorage rejected the write".to_owned()))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = token;
            Err(CredentialError::Unavailable("localStorage requires a browser".to_owned()))
        }
    }

    fn remove(&self) -> Result<(), CredentialError> {
        #[cfg(feature = "csr")]
        {
            let Some(storage) = local_storage() else {
                return Ok(());
            };
            storage
                .remove_item(CREDENTIAL_KEY)
                .map_err(|_| CredentialError::Unavailable("localStorage rejected the removal".to_owned()))
        }
        #[cfg(not(feature = "csr"))]
        {
            Ok(())
        }
    }
}
