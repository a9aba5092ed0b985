//! # Cryptographic Primitives
//!
//! Everything security-related flows through here: key parsing, the
//! Keccak-flavoured Ed25519 used for transaction signatures, the shared key
//! derivation behind secure messages, and the AES-256-CBC cipher that seals
//! them.
//!
//! - **Ed25519 / Keccak-512** for signatures.
//! - **Edwards-form ECDH + Keccak-256** for message keys.
//! - **AES-256-CBC / PKCS#7** for message payloads.
//!
//! Each is a thin wrapper around an audited implementation with the
//! network's parameters pinned.

pub mod encryption;
pub mod hash;
pub mod key_exchange;
pub mod keys;
pub mod signatures;

pub use hash::{keccak256, keccak512};
pub use key_exchange::{derive_shared_key, KeyExchangeError};
pub use keys::{KeyError, NemKeypair, NemPrivateKey, NemPublicKey, NemSignature};
pub use signatures::{sign, verify, SignatureError};
