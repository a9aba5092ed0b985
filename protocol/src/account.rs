//! # Accounts
//!
//! An [`Account`] is what a wallet stores: a public key in the clear and a
//! private key that is encrypted at rest. Decrypting that private key is the
//! job of the key store, which the protocol reaches only through the
//! [`PrivateKeyDecryptor`] capability handed to each call.
//!
//! Decrypted key material is held in [`Zeroizing`] buffers and dropped at the
//! end of the operation that needed it. Nothing here caches a key.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::crypto::keys::{KeyError, NemKeypair, NemPrivateKey, NemPublicKey};

/// Failure reported by a key store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyStoreError {
    #[error("key store is locked")]
    Locked,

    #[error("no private key available for this account")]
    NotFound,

    #[error("key store failure: {0}")]
    Backend(String),
}

/// Failure while turning an [`Account`] into usable key material.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error(transparent)]
    KeyStore(#[from] KeyStoreError),

    #[error(transparent)]
    Key(#[from] KeyError),
}

// ---------------------------------------------------------------------------
// Key store capability
// ---------------------------------------------------------------------------

/// Decrypts an account's stored private key into its hex form.
///
/// Implemented by whatever owns encryption at rest (a keychain, a password
/// vault, an HSM bridge). Closures with the right signature implement it too,
/// which keeps tests short.
pub trait PrivateKeyDecryptor {
    fn decrypt_private_key(&self, encrypted: &str) -> Result<Zeroizing<String>, KeyStoreError>;
}

impl<F> PrivateKeyDecryptor for F
where
    F: Fn(&str) -> Result<Zeroizing<String>, KeyStoreError>,
{
    fn decrypt_private_key(&self, encrypted: &str) -> Result<Zeroizing<String>, KeyStoreError> {
        self(encrypted)
    }
}

/// A key store whose "encrypted" keys are the plain hex keys.
///
/// For tooling that receives the private key from the environment, and for
/// tests. Never use it to persist keys.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaintextKeys;

impl PrivateKeyDecryptor for PlaintextKeys {
    fn decrypt_private_key(&self, encrypted: &str) -> Result<Zeroizing<String>, KeyStoreError> {
        if encrypted.is_empty() {
            return Err(KeyStoreError::NotFound);
        }
        Ok(Zeroizing::new(encrypted.to_owned()))
    }
}

/// Decrypts `encrypted` through `keys` and parses the resulting hex.
pub fn unlock_private_key<D>(encrypted: &str, keys: &D) -> Result<NemPrivateKey, AccountError>
where
    D: PrivateKeyDecryptor + ?Sized,
{
    let hex = keys.decrypt_private_key(encrypted)?;
    Ok(NemPrivateKey::from_hex(&hex)?)
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

/// A wallet account as handed over by account storage.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    public_key: NemPublicKey,
    encrypted_private_key: String,
}

impl Account {
    pub fn new(public_key: NemPublicKey, encrypted_private_key: impl Into<String>) -> Self {
        Self {
            public_key,
            encrypted_private_key: encrypted_private_key.into(),
        }
    }

    /// Builds an account from its public key hex.
    pub fn from_hex(
        public_key_hex: &str,
        encrypted_private_key: impl Into<String>,
    ) -> Result<Self, KeyError> {
        Ok(Self::new(
            NemPublicKey::from_hex(public_key_hex)?,
            encrypted_private_key,
        ))
    }

    pub fn public_key(&self) -> &NemPublicKey {
        &self.public_key
    }

    pub fn encrypted_private_key(&self) -> &str {
        &self.encrypted_private_key
    }

    /// Decrypts the private key and pairs it with the account's public key.
    ///
    /// Fails with [`KeyError::KeypairMismatch`] when the decrypted key does
    /// not derive the stored public key.
    pub fn unlock<D>(&self, keys: &D) -> Result<NemKeypair, AccountError>
    where
        D: PrivateKeyDecryptor + ?Sized,
    {
        let private_key = unlock_private_key(&self.encrypted_private_key, keys)?;
        let keypair = NemKeypair::from_private_key(private_key);
        if keypair.public_key() != &self.public_key {
            return Err(KeyError::KeypairMismatch.into());
        }
        Ok(keypair)
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("public_key", &self.public_key)
            .field("encrypted_private_key", &"<redacted>")
            .finish()
    }
}
