//! # Secure Messaging
//!
//! End-to-end encrypted transfer messages between two accounts.
//!
//! ## Format
//!
//! ```text
//! salt (32) || iv (16) || AES-256-CBC(key, iv, PKCS#7(plaintext))
//! key = Keccak-256(compress(a · -B) XOR salt)
//! ```
//!
//! The sender seals with its private key and the recipient's public key; the
//! recipient opens with its private key and the sender's public key. Both
//! derive the same key (see [`crate::crypto::key_exchange`]).
//!
//! ## Randomness
//!
//! Salt and IV come from the caller's CSPRNG (`OsRng` in production, a
//! seeded `StdRng` in tests), so two seals of the same text differ.
//!
//! ## Failure model
//!
//! Structural problems (too short to hold salt and IV, a public key that is
//! not a curve point) are errors. A payload that decrypts to bad padding or
//! to bytes that are not UTF-8 is not an error: it simply carries no text,
//! and [`decrypt_message`] returns `Ok(None)`.

use rand_core::{CryptoRng, RngCore};
use thiserror::Error;
use tracing::debug;

use crate::account::{unlock_private_key, AccountError, PrivateKeyDecryptor};
use crate::config::{IV_LENGTH, MIN_ENCRYPTED_MESSAGE_LENGTH, SALT_LENGTH};
use crate::crypto::encryption;
use crate::crypto::key_exchange::{derive_shared_key, KeyExchangeError};
use crate::crypto::keys::{KeyError, NemPrivateKey, NemPublicKey};
use crate::transaction::types::Message;

/// Errors raised by secure messaging.
#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("encrypted message is {len} bytes, shorter than salt and IV")]
    UndersizedCiphertext { len: usize },

    #[error("key exchange failed: {0}")]
    KeyExchangeFailure(#[from] KeyExchangeError),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Key(#[from] KeyError),
}

// ---------------------------------------------------------------------------
// Key-level operations
// ---------------------------------------------------------------------------

/// Seals `plaintext` from `sender` to `recipient`, returning
/// `salt || iv || ciphertext`.
pub fn seal<R>(
    plaintext: &[u8],
    sender: &NemPrivateKey,
    recipient: &NemPublicKey,
    rng: &mut R,
) -> Result<Vec<u8>, MessagingError>
where
    R: RngCore + CryptoRng,
{
    let mut salt = [0u8; SALT_LENGTH];
    rng.fill_bytes(&mut salt);
    let mut iv = [0u8; IV_LENGTH];
    rng.fill_bytes(&mut iv);

    let key = derive_shared_key(sender, recipient, &salt)?;
    let ciphertext = encryption::encrypt(&key, &iv, plaintext);

    let mut packed = Vec::with_capacity(SALT_LENGTH + IV_LENGTH + ciphertext.len());
    packed.extend_from_slice(&salt);
    packed.extend_from_slice(&iv);
    packed.extend_from_slice(&ciphertext);

    debug!(recipient = %recipient, len = packed.len(), "sealed message");
    Ok(packed)
}

/// Opens a packed payload sealed by `sender` for `recipient`.
///
/// `Ok(None)` when the bytes do not decrypt under the derived key.
pub fn open(
    packed: &[u8],
    recipient: &NemPrivateKey,
    sender: &NemPublicKey,
) -> Result<Option<Vec<u8>>, MessagingError> {
    let (salt, iv, ciphertext) = split_packed(packed)?;
    let key = derive_shared_key(recipient, sender, &salt)?;

    match encryption::decrypt(&key, &iv, ciphertext) {
        Ok(plaintext) => Ok(Some(plaintext)),
        Err(_) => {
            debug!(sender = %sender, len = packed.len(), "message did not decrypt");
            Ok(None)
        }
    }
}

fn split_packed(
    packed: &[u8],
) -> Result<([u8; SALT_LENGTH], [u8; IV_LENGTH], &[u8]), MessagingError> {
    if packed.len() < MIN_ENCRYPTED_MESSAGE_LENGTH {
        return Err(MessagingError::UndersizedCiphertext { len: packed.len() });
    }
    let (salt_bytes, rest) = packed.split_at(SALT_LENGTH);
    let (iv_bytes, ciphertext) = rest.split_at(IV_LENGTH);

    let mut salt = [0u8; SALT_LENGTH];
    salt.copy_from_slice(salt_bytes);
    let mut iv = [0u8; IV_LENGTH];
    iv.copy_from_slice(iv_bytes);
    Ok((salt, iv, ciphertext))
}

// ---------------------------------------------------------------------------
// Account-level operations
// ---------------------------------------------------------------------------

/// Encrypts `plaintext` for `recipient_public_key`, decrypting the sender's
/// private key through `keys` for the duration of the call.
pub fn encrypt_message<D, R>(
    plaintext: &[u8],
    sender_encrypted_private_key: &str,
    recipient_public_key: &str,
    keys: &D,
    rng: &mut R,
) -> Result<Vec<u8>, MessagingError>
where
    D: PrivateKeyDecryptor + ?Sized,
    R: RngCore + CryptoRng,
{
    let recipient = NemPublicKey::from_hex(recipient_public_key)?;
    let sender = unlock_private_key(sender_encrypted_private_key, keys)?;
    seal(plaintext, &sender, &recipient, rng)
}

/// Decrypts a packed payload received from `sender_public_key`.
///
/// Returns the text, or `None` when the payload does not decrypt or is not
/// UTF-8. Input shorter than 48 bytes fails before any key is decrypted.
pub fn decrypt_message<D>(
    packed: &[u8],
    recipient_encrypted_private_key: &str,
    sender_public_key: &str,
    keys: &D,
) -> Result<Option<String>, MessagingError>
where
    D: PrivateKeyDecryptor + ?Sized,
{
    if packed.len() < MIN_ENCRYPTED_MESSAGE_LENGTH {
        return Err(MessagingError::UndersizedCiphertext { len: packed.len() });
    }
    let sender = NemPublicKey::from_hex(sender_public_key)?;
    let recipient = unlock_private_key(recipient_encrypted_private_key, keys)?;

    let text = open(packed, &recipient, &sender)?.and_then(|bytes| String::from_utf8(bytes).ok());
    Ok(text)
}

/// Encrypts `text` and wraps it as a secure [`Message`] ready to attach to a
/// transfer.
pub fn secure_message<D, R>(
    text: &str,
    sender_encrypted_private_key: &str,
    recipient_public_key: &str,
    keys: &D,
    rng: &mut R,
) -> Result<Message, MessagingError>
where
    D: PrivateKeyDecryptor + ?Sized,
    R: RngCore + CryptoRng,
{
    let sealed = encrypt_message(
        text.as_bytes(),
        sender_encrypted_private_key,
        recipient_public_key,
        keys,
        rng,
    )?;
    Ok(Message::secure(sealed))
}
