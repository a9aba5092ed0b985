//! # Hashing Utilities
//!
//! The network predates the final SHA-3 standard and uses the original
//! Keccak submission (different padding byte, different output). Every hash
//! in the protocol goes through here so nobody accidentally reaches for
//! `Sha3_256` and produces keys the node has never heard of.
//!
//! - **Keccak-512** drives the Ed25519 variant: key expansion, the nonce
//!   hash and the challenge hash.
//! - **Keccak-256** finalizes the shared key in secure messaging.

use sha3::{Digest, Keccak256, Keccak512};

/// Keccak-256 of `data`.
///
/// # Example
///
/// ```
/// use nem_protocol::crypto::keccak256;
///
/// let hash = keccak256(b"");
/// assert_eq!(
///     hex::encode(hash),
///     "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
/// );
/// ```
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Keccak256::digest(data));
    out
}

/// Keccak-512 of `data`.
pub fn keccak512(data: &[u8]) -> [u8; 64] {
    let mut out = [0u8; 64];
    out.copy_from_slice(&Keccak512::digest(data));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keccak256_empty_input() {
        // Legacy Keccak, not FIPS-202 SHA3-256 (which starts with a7ffc6f8).
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn keccak512_empty_input() {
        assert_eq!(
            hex::encode(keccak512(b"")),
            "0eab42de4c3ceb9235fc91acffe746b29c29a8c366b7c60e4e67c466f36a4304\
             c00fa9caf9d87976ba469bcbe06713b435f091ef2769fb160cdab33d3670680e"
        );
    }

    #[test]
    fn hashes_are_deterministic() {
        assert_eq!(keccak256(b"nem"), keccak256(b"nem"));
        assert_ne!(keccak256(b"nem"), keccak256(b"NEM"));
        assert_eq!(keccak512(b"nem").len(), 64);
    }
}
