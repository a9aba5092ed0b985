// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # NEM Protocol Core Library
//!
//! Everything a wallet needs between "the user pressed send" and "the node
//! accepted it": bit-exact transaction serialization, fee calculation,
//! Keccak-flavoured Ed25519 signatures and end-to-end encrypted messages.
//!
//! The wire format is not ours to improve. A node deserializes exactly the
//! layout in [`transaction::serializer`] and verifies exactly the signature
//! scheme in [`crypto::signatures`]; one byte off and the transaction is
//! rejected. Everything here is deterministic except the salt and IV of a
//! secure message, and those come from an RNG the caller passes in.
//!
//! ## Architecture
//!
//! - **codec**: Little-endian fields, length prefixes, hex.
//! - **config**: Network ids, type codes, field widths, fee thresholds.
//! - **crypto**: Keys, signatures, key exchange, AES-256-CBC.
//! - **fee**: The two fee components. Summing them is the caller's call.
//! - **account**: Public key plus encrypted private key, and the key store
//!   capability that decrypts it.
//! - **transaction**: Build, serialize, parse, sign.
//! - **messaging**: Seal and open secure messages.
//!
//! ## Design Philosophy
//!
//! 1. No global state. The key store and the RNG are arguments.
//! 2. Private keys live for one call and are zeroized on drop.
//! 3. Unknown wire values are errors, never guesses.

pub mod account;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod fee;
pub mod messaging;
pub mod transaction;

/// Crate version, as reported by tooling built on this library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
