//! # AES-256-CBC Encryption
//!
//! The symmetric half of secure messaging. The network fixes the cipher:
//! AES-256 in CBC mode with PKCS#7 padding and a 16-byte IV carried next to
//! the ciphertext. This module only does the block cipher; salt, key
//! derivation and packing live in [`crate::messaging`].
//!
//! CBC without a MAC does not authenticate. A wrong key usually shows up as
//! a padding failure, but not always; callers treat the output as untrusted
//! bytes until it decodes.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use thiserror::Error;

use crate::config::{AES_KEY_LENGTH, IV_LENGTH};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Errors that can occur during decryption.
///
/// Kept vague: wrong key and corrupted ciphertext look the same.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncryptionError {
    #[error("decryption failed -- wrong key or corrupted ciphertext")]
    DecryptFailed,
}

/// Encrypts `plaintext` with AES-256-CBC / PKCS#7.
///
/// The output is always a non-empty multiple of 16 bytes; an empty plaintext
/// encrypts to one block of padding.
///
/// ```
/// use nem_protocol::crypto::encryption::{decrypt, encrypt};
///
/// let key = [0x42u8; 32];
/// let iv = [0x24u8; 16];
/// let sealed = encrypt(&key, &iv, b"hello");
/// assert_eq!(sealed.len(), 16);
/// assert_eq!(decrypt(&key, &iv, &sealed).unwrap(), b"hello");
/// ```
pub fn encrypt(key: &[u8; AES_KEY_LENGTH], iv: &[u8; IV_LENGTH], plaintext: &[u8]) -> Vec<u8> {
    Aes256CbcEnc::new(GenericArray::from_slice(key), GenericArray::from_slice(iv))
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

/// Decrypts AES-256-CBC / PKCS#7 ciphertext.
///
/// Fails with [`EncryptionError::DecryptFailed`] when the ciphertext length
/// is not a whole number of blocks or the padding is invalid.
pub fn decrypt(
    key: &[u8; AES_KEY_LENGTH],
    iv: &[u8; IV_LENGTH],
    ciphertext: &[u8],
) -> Result<Vec<u8>, EncryptionError> {
    if ciphertext.is_empty() {
        return Err(EncryptionError::DecryptFailed);
    }
    Aes256CbcDec::new(GenericArray::from_slice(key), GenericArray::from_slice(iv))
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| EncryptionError::DecryptFailed)
}
