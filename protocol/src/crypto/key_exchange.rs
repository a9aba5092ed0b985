//! # Shared Key Derivation
//!
//! Derives the symmetric key for secure messages from one party's private
//! key, the other party's public key and a per-message salt:
//!
//! ```text
//! a      = clamp(Keccak-512(seed)[0..32])
//! shared = compress(a · (-B))
//! key    = Keccak-256(shared XOR salt)
//! ```
//!
//! The exchange works directly on the Edwards form of the account keys, so
//! the same key pair that signs transactions also receives messages. The
//! negation of `B` and the clamped multiplication follow the network's
//! reference implementation; both sides compute `a · b · (-G)`.

use thiserror::Error;
use zeroize::{Zeroize, Zeroizing};

use super::hash::keccak256;
use super::keys::{NemPrivateKey, NemPublicKey};
use crate::config::{AES_KEY_LENGTH, SALT_LENGTH};

/// The curve primitive rejected its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyExchangeError {
    #[error("public key does not decompress to a curve point")]
    InvalidPoint,

    #[error("public key is a small-order point")]
    SmallOrderPoint,
}

/// Derives the 32-byte message key shared between `private_key`'s owner and
/// `public_key`'s owner for the given `salt`.
pub fn derive_shared_key(
    private_key: &NemPrivateKey,
    public_key: &NemPublicKey,
    salt: &[u8; SALT_LENGTH],
) -> Result<Zeroizing<[u8; AES_KEY_LENGTH]>, KeyExchangeError> {
    let point = public_key.to_point().ok_or(KeyExchangeError::InvalidPoint)?;
    if point.is_small_order() {
        return Err(KeyExchangeError::SmallOrderPoint);
    }

    let shared_point = (-point).mul_clamped(*private_key.scalar_bytes());
    let mut shared = shared_point.compress().to_bytes();
    for (byte, salt_byte) in shared.iter_mut().zip(salt.iter()) {
        *byte ^= salt_byte;
    }

    let key = Zeroizing::new(keccak256(&shared));
    shared.zeroize();
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::NemKeypair;

    fn keypair(seed: u8) -> NemKeypair {
        NemKeypair::from_private_key(NemPrivateKey::from_seed([seed; 32]))
    }

    #[test]
    fn both_sides_derive_the_same_key() {
        let alice = keypair(1);
        let bob = keypair(2);
        let salt = [9u8; SALT_LENGTH];

        let alice_side = derive_shared_key(alice.private_key(), bob.public_key(), &salt).unwrap();
        let bob_side = derive_shared_key(bob.private_key(), alice.public_key(), &salt).unwrap();
        assert_eq!(*alice_side, *bob_side);
    }

    #[test]
    fn matches_known_derivation() {
        let alice = NemKeypair::from_private_key_hex(
            "575dbb3062267eff57c970a336ebbc8fbcfe12c5bd3ed7bc11eb0481d7704ced",
        )
        .unwrap();
        let bob = NemKeypair::from_private_key_hex(
            "5b0e3fa5d3b49a79022d7c1e121ba1cbbf4db5821f47ab8c708ef88defc29bfe",
        )
        .unwrap();
        let mut salt = [0u8; SALT_LENGTH];
        for (i, b) in salt.iter_mut().enumerate() {
            *b = i as u8;
        }

        let expected = "7b99b56e76283853ad35a1e5b16cca4febdacec065082fb47f685bf8a736a089";
        let forward = derive_shared_key(alice.private_key(), bob.public_key(), &salt).unwrap();
        let backward = derive_shared_key(bob.private_key(), alice.public_key(), &salt).unwrap();
        assert_eq!(hex::encode(*forward), expected);
        assert_eq!(hex::encode(*backward), expected);
    }

    #[test]
    fn salt_changes_the_key() {
        let alice = keypair(1);
        let bob = keypair(2);

        let k1 = derive_shared_key(alice.private_key(), bob.public_key(), &[0u8; 32]).unwrap();
        let k2 = derive_shared_key(alice.private_key(), bob.public_key(), &[1u8; 32]).unwrap();
        assert_ne!(*k1, *k2);
    }

    #[test]
    fn third_party_derives_a_different_key() {
        let alice = keypair(1);
        let bob = keypair(2);
        let eve = keypair(3);
        let salt = [5u8; SALT_LENGTH];

        let real = derive_shared_key(alice.private_key(), bob.public_key(), &salt).unwrap();
        let eve_guess = derive_shared_key(eve.private_key(), alice.public_key(), &salt).unwrap();
        assert_ne!(*real, *eve_guess);
    }

    #[test]
    fn rejects_point_off_the_curve() {
        let alice = keypair(1);
        // y = 2 has no matching x on the curve.
        let mut bytes = [0u8; 32];
        bytes[0] = 2;
        let bogus = NemPublicKey::from_bytes(bytes);
        assert_eq!(
            derive_shared_key(alice.private_key(), &bogus, &[0u8; 32]).unwrap_err(),
            KeyExchangeError::InvalidPoint
        );
    }

    #[test]
    fn rejects_identity_point() {
        let alice = keypair(1);
        // Compressed identity: y = 1, sign bit clear.
        let mut bytes = [0u8; 32];
        bytes[0] = 1;
        let identity = NemPublicKey::from_bytes(bytes);
        assert_eq!(
            derive_shared_key(alice.private_key(), &identity, &[0u8; 32]).unwrap_err(),
            KeyExchangeError::SmallOrderPoint
        );
    }
}
