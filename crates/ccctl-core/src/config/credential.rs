//! Storage for client secrets
//!
//! Profile values are either plaintext or `keyring:<key>` references into the
//! OS keyring. References only resolve with the `secure-storage` feature.

use super::error::{ConfigError, Result};

/// Prefix marking a profile value as a keyring reference
const KEYRING_PREFIX: &str = "keyring:";

#[cfg(feature = "secure-storage")]
const SERVICE_NAME: &str = "ccctl";

/// Where newly stored secrets end up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStorage {
    Plaintext,
    #[cfg(feature = "secure-storage")]
    Keyring,
}

#[derive(Debug, Clone)]
pub struct CredentialStore {
    storage: CredentialStorage,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::plaintext()
    }
}

impl CredentialStore {
    /// Store that writes secrets into the config file as-is
    pub fn plaintext() -> Self {
        Self {
            storage: CredentialStorage::Plaintext,
        }
    }

    /// Store that writes secrets into the OS keyring
    ///
    /// Falls back to plaintext when the keyring cannot be opened.
    #[cfg(feature = "secure-storage")]
    pub fn keyring() -> Self {
        if keyring::Entry::new(SERVICE_NAME, "__availability_check__").is_ok() {
            Self {
                storage: CredentialStorage::Keyring,
            }
        } else {
            tracing::warn!("OS keyring unavailable, storing credentials in plaintext");
            Self::plaintext()
        }
    }

    pub fn storage(&self) -> CredentialStorage {
        self.storage
    }

    /// Persist `secret` under `key`, returning the value to write into the profile
    pub fn store(&self, key: &str, secret: &str) -> Result<String> {
        match self.storage {
            CredentialStorage::Plaintext => {
                tracing::trace!("Storing '{}' in the config file", key);
                Ok(secret.to_string())
            }
            #[cfg(feature = "secure-storage")]
            CredentialStorage::Keyring => {
                entry(key)?.set_password(secret).map_err(|e| {
                    ConfigError::KeyringError(format!("Failed to store '{}': {}", key, e))
                })?;
                Ok(format!("{}{}", KEYRING_PREFIX, key))
            }
        }
    }

    /// Resolve a profile value to the actual secret
    pub fn resolve(&self, value: &str) -> Result<String> {
        let Some(key) = value.strip_prefix(KEYRING_PREFIX) else {
            return Ok(value.to_string());
        };

        #[cfg(feature = "secure-storage")]
        {
            entry(key)?.get_password().map_err(|e| {
                ConfigError::KeyringError(format!("Failed to read '{}' from keyring: {}", key, e))
            })
        }
        #[cfg(not(feature = "secure-storage"))]
        {
            Err(ConfigError::CredentialError(format!(
                "'{}' is stored in the keyring but ccctl was built without the secure-storage feature",
                key
            )))
        }
    }

    /// Drop the keyring entry behind `value`, if it is a reference
    pub fn forget(&self, value: &str) -> Result<()> {
        let Some(key) = value.strip_prefix(KEYRING_PREFIX) else {
            return Ok(());
        };

        #[cfg(feature = "secure-storage")]
        {
            match entry(key)?.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
                Err(e) => Err(ConfigError::KeyringError(format!(
                    "Failed to delete '{}' from keyring: {}",
                    key, e
                ))),
            }
        }
        #[cfg(not(feature = "secure-storage"))]
        {
            tracing::debug!("Skipping keyring cleanup for '{}'", key);
            Ok(())
        }
    }

    pub fn is_keyring_reference(value: &str) -> bool {
        value.starts_with(KEYRING_PREFIX)
    }
}

#[cfg(feature = "secure-storage")]
fn entry(key: &str) -> Result<keyring::Entry> {
    keyring::Entry::new(SERVICE_NAME, key).map_err(|e| ConfigError::KeyringError(e.to_string()))
}
