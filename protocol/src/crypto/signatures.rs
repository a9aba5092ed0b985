//! # Digital Signatures
//!
//! Ed25519 signing and verification with Keccak-512 in place of SHA-512.
//!
//! The curve arithmetic is ed25519-dalek's; only the hash is swapped, via the
//! `hazmat` raw signing entry points that take the digest as a type
//! parameter. Signatures stay deterministic: the same key and message always
//! produce the same 64 bytes.

use ed25519_dalek::hazmat::{raw_sign, raw_verify};
use sha3::Keccak512;
use thiserror::Error;

use super::keys::{KeyError, NemKeypair, NemPublicKey, NemSignature};

/// Errors during signature operations.
#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("signature verification failed")]
    VerificationFailed,

    #[error(transparent)]
    Key(#[from] KeyError),
}

/// Signs `message` with `keypair`.
///
/// Fails only if the keypair's public key is not a curve point, which cannot
/// happen for a keypair built by derivation.
pub fn sign(keypair: &NemKeypair, message: &[u8]) -> Result<NemSignature, SignatureError> {
    let verifying_key = keypair.public_key().to_verifying_key()?;
    let expanded = keypair.private_key().expanded();
    let signature = raw_sign::<Keccak512>(&expanded, message, &verifying_key);
    Ok(NemSignature::from(signature))
}

/// Verifies `signature` over `message` against `public_key`.
pub fn verify(
    public_key: &NemPublicKey,
    message: &[u8],
    signature: &NemSignature,
) -> Result<(), SignatureError> {
    let verifying_key = public_key.to_verifying_key()?;
    raw_verify::<Keccak512>(&verifying_key, message, &signature.to_dalek_signature())
        .map_err(|_| SignatureError::VerificationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::NemPrivateKey;

    fn keypair(seed: u8) -> NemKeypair {
        NemKeypair::from_private_key(NemPrivateKey::from_seed([seed; 32]))
    }

    #[test]
    fn test_reference_vector() {
        let kp = NemKeypair::from_private_key_hex(
            "abf4cf55a2b3f742d7543d9cc17f50447b969e6e06f5ea9195d428ab12b7318d",
        )
        .unwrap();
        assert_eq!(
            kp.public_key().to_hex(),
            "8a558c728c21c126181e5e654b404a45b4f0137ce88177435a69978cc6bec1f4"
        );

        let data = hex::decode(
            "8ce03cd60514233b86789729102ea09e867fc6d964dea8c2018ef7d0a2e0e24bf7e348e917116690b9",
        )
        .unwrap();
        let sig = sign(&kp, &data).unwrap();
        assert_eq!(
            sig.to_hex(),
            "d9cec0cc0e3465fab229f8e1d6db68ab9cc99a18cb0435f70deb6100948576cd\
             5c0aa1feb550bdd8693ef81eb10a556a622db1f9301986827b96716a7134230c"
        );
        assert!(verify(kp.public_key(), &data, &sig).is_ok());
    }

    #[test]
    fn test_sign_verify_roundtrip() {
        let kp = keypair(1);
        let sig = sign(&kp, b"transfer 10 xem").unwrap();
        assert!(verify(kp.public_key(), b"transfer 10 xem", &sig).is_ok());
    }

    #[test]
    fn test_signing_is_deterministic() {
        let kp = keypair(2);
        let a = sign(&kp, b"same bytes").unwrap();
        let b = sign(&kp, b"same bytes").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_wrong_message_fails() {
        let kp = keypair(3);
        let sig = sign(&kp, b"original").unwrap();
        assert!(matches!(
            verify(kp.public_key(), b"tampered", &sig),
            Err(SignatureError::VerificationFailed)
        ));
    }

    #[test]
    fn test_wrong_key_fails() {
        let signer = keypair(4);
        let other = keypair(5);
        let sig = sign(&signer, b"payload").unwrap();
        assert!(verify(other.public_key(), b"payload", &sig).is_err());
    }

    #[test]
    fn test_flipped_signature_bit_fails() {
        let kp = keypair(6);
        let sig = sign(&kp, b"payload").unwrap();
        let mut bytes = *sig.as_bytes();
        bytes[10] ^= 0x01;
        let corrupted = NemSignature::from_bytes(bytes);
        assert!(verify(kp.public_key(), b"payload", &corrupted).is_err());
    }

    #[test]
    fn test_not_interchangeable_with_standard_ed25519() {
        use ed25519_dalek::{Signer, SigningKey};

        let seed = [7u8; 32];
        let standard = SigningKey::from_bytes(&seed).sign(b"payload");
        let nem = sign(
            &NemKeypair::from_private_key(NemPrivateKey::from_seed(seed)),
            b"payload",
        )
        .unwrap();
        assert_ne!(standard.to_bytes(), *nem.as_bytes());
    }

    #[test]
    fn test_empty_message_signs() {
        let kp = keypair(8);
        let sig = sign(&kp, b"").unwrap();
        assert!(verify(kp.public_key(), b"", &sig).is_ok());
    }
}
