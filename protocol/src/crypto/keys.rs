//! # Key Management
//!
//! Key types for the network's Ed25519 variant.
//!
//! Two quirks separate these keys from textbook Ed25519:
//!
//! - The private key hex string is the *big-endian* rendering of the 32-byte
//!   seed. The seed is therefore the byte-reversed decode of the hex.
//! - Key expansion hashes the seed with Keccak-512 instead of SHA-512.
//!
//! Get either one wrong and every derived public key, signature and shared
//! secret is valid Ed25519 that no node will accept.
//!
//! ## Security considerations
//!
//! - Seed bytes are zeroized on drop.
//! - `Debug` output never includes private material.
//! - Key bytes are never logged.

use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use ed25519_dalek::hazmat::ExpandedSecretKey;
use ed25519_dalek::{Signature as DalekSignature, VerifyingKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use zeroize::{ZeroizeOnDrop, Zeroizing};

use super::hash::keccak512;
use crate::codec::{hex_to_array, to_hex, CodecError};
use crate::config::{PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};

/// Errors that can occur during key operations.
///
/// None of the messages carry key material.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(#[source] CodecError),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(#[source] CodecError),

    #[error("public key is not a valid curve point")]
    InvalidCurvePoint,

    #[error("invalid signature: {0}")]
    InvalidSignature(#[source] CodecError),

    #[error("public key does not match the private key")]
    KeypairMismatch,
}

/// Strips the `00` sign-byte prefix some wallets export (66 characters) so
/// that only the 64-character form reaches the decoder.
pub fn normalize_private_key(hex: &str) -> &str {
    let trimmed = hex.trim();
    if trimmed.len() == 2 * PRIVATE_KEY_LENGTH + 2 && trimmed.starts_with("00") {
        &trimmed[2..]
    } else {
        trimmed
    }
}

// ---------------------------------------------------------------------------
// NemPrivateKey
// ---------------------------------------------------------------------------

/// A 32-byte private seed.
///
/// Deliberately not `Clone`, `Serialize` or `Display`. It lives for the
/// duration of one signing or encryption call and is wiped on drop.
#[derive(ZeroizeOnDrop)]
pub struct NemPrivateKey {
    seed: [u8; PRIVATE_KEY_LENGTH],
}

impl NemPrivateKey {
    /// Parses a private key as exported by wallets (64 hex characters, or 66
    /// with a leading `00`).
    pub fn from_hex(hex: &str) -> Result<Self, KeyError> {
        let normalized = normalize_private_key(hex);
        let mut seed: [u8; PRIVATE_KEY_LENGTH] =
            hex_to_array(normalized).map_err(KeyError::InvalidPrivateKey)?;
        seed.reverse();
        Ok(Self { seed })
    }

    /// Builds a key from the raw seed, i.e. already in little-endian order.
    pub fn from_seed(seed: [u8; PRIVATE_KEY_LENGTH]) -> Self {
        Self { seed }
    }

    /// Keccak-512 of the seed: clamped scalar in the low half, nonce prefix
    /// in the high half.
    pub(crate) fn expanded(&self) -> ExpandedSecretKey {
        let digest = Zeroizing::new(keccak512(&self.seed));
        ExpandedSecretKey::from_bytes(&digest)
    }

    /// The unclamped scalar bytes (low half of the expanded key). Callers
    /// hand these to the curve's `*_clamped` multiplications.
    pub(crate) fn scalar_bytes(&self) -> Zeroizing<[u8; 32]> {
        let digest = Zeroizing::new(keccak512(&self.seed));
        let mut scalar = Zeroizing::new([0u8; 32]);
        scalar.copy_from_slice(&digest[..32]);
        scalar
    }

    /// Derives the matching public key.
    pub fn public_key(&self) -> NemPublicKey {
        let point = EdwardsPoint::mul_base_clamped(*self.scalar_bytes());
        NemPublicKey {
            bytes: point.compress().to_bytes(),
        }
    }
}

impl fmt::Debug for NemPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NemPrivateKey(<redacted>)")
    }
}

// ---------------------------------------------------------------------------
// NemPublicKey
// ---------------------------------------------------------------------------

/// A 32-byte compressed Edwards point.
///
/// Construction only checks the length. Whether the bytes decompress to a
/// curve point is checked where it matters: signature verification and key
/// exchange, each with its own error.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NemPublicKey {
    bytes: [u8; PUBLIC_KEY_LENGTH],
}

impl NemPublicKey {
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Parses 64 hex characters. Public keys are not byte-reversed.
    pub fn from_hex(hex: &str) -> Result<Self, KeyError> {
        let bytes = hex_to_array(hex.trim()).map_err(KeyError::InvalidPublicKey)?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.bytes
    }

    /// Lowercase hex, 64 characters.
    pub fn to_hex(&self) -> String {
        to_hex(&self.bytes)
    }

    /// Converts to an ed25519-dalek verifying key, rejecting bytes that are
    /// not a curve point.
    pub fn to_verifying_key(&self) -> Result<VerifyingKey, KeyError> {
        VerifyingKey::from_bytes(&self.bytes).map_err(|_| KeyError::InvalidCurvePoint)
    }

    /// Decompresses to an Edwards point for key exchange.
    pub(crate) fn to_point(&self) -> Option<EdwardsPoint> {
        CompressedEdwardsY(self.bytes).decompress()
    }
}

impl fmt::Display for NemPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for NemPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NemPublicKey({})", &self.to_hex()[..16])
    }
}

// ---------------------------------------------------------------------------
// NemKeypair
// ---------------------------------------------------------------------------

/// A private key together with its public key.
///
/// The public key is always derived (or checked against a derivation), so a
/// keypair can never sign under someone else's public key.
pub struct NemKeypair {
    private_key: NemPrivateKey,
    public_key: NemPublicKey,
}

impl NemKeypair {
    pub fn from_private_key(private_key: NemPrivateKey) -> Self {
        let public_key = private_key.public_key();
        Self {
            private_key,
            public_key,
        }
    }

    /// Parses a private key hex string and derives its public key.
    pub fn from_private_key_hex(hex: &str) -> Result<Self, KeyError> {
        Ok(Self::from_private_key(NemPrivateKey::from_hex(hex)?))
    }

    /// Builds a keypair from both halves, failing with
    /// [`KeyError::KeypairMismatch`] if they do not belong together.
    pub fn from_parts(private_key_hex: &str, public_key_hex: &str) -> Result<Self, KeyError> {
        let expected = NemPublicKey::from_hex(public_key_hex)?;
        let keypair = Self::from_private_key_hex(private_key_hex)?;
        if keypair.public_key != expected {
            return Err(KeyError::KeypairMismatch);
        }
        Ok(keypair)
    }

    pub fn private_key(&self) -> &NemPrivateKey {
        &self.private_key
    }

    pub fn public_key(&self) -> &NemPublicKey {
        &self.public_key
    }
}

impl fmt::Debug for NemKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NemKeypair(pub={})", self.public_key.to_hex())
    }
}

// ---------------------------------------------------------------------------
// NemSignature
// ---------------------------------------------------------------------------

/// A 64-byte signature (`R || s`).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct NemSignature {
    bytes: [u8; SIGNATURE_LENGTH],
}

impl NemSignature {
    pub fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self { bytes }
    }

    pub fn from_hex(hex: &str) -> Result<Self, KeyError> {
        let bytes = hex_to_array(hex.trim()).map_err(KeyError::InvalidSignature)?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.bytes
    }

    /// Lowercase hex, 128 characters.
    pub fn to_hex(&self) -> String {
        to_hex(&self.bytes)
    }

    pub(crate) fn to_dalek_signature(self) -> DalekSignature {
        DalekSignature::from_bytes(&self.bytes)
    }
}

impl From<DalekSignature> for NemSignature {
    fn from(sig: DalekSignature) -> Self {
        Self {
            bytes: sig.to_bytes(),
        }
    }
}

impl fmt::Debug for NemSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NemSignature({}...)", &self.to_hex()[..16])
    }
}
