//! # Protocol Configuration & Constants
//!
//! Every wire-level constant of the NEM transaction format lives here. These
//! values are fixed by the network's consensus rules; a transaction that
//! disagrees with them by a single byte is rejected by the node.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Network Identifiers
// ---------------------------------------------------------------------------

/// Mainnet network byte.
pub const NETWORK_ID_MAINNET: u8 = 0x68;

/// Testnet network byte.
pub const NETWORK_ID_TESTNET: u8 = 0x98;

/// Mijin (private chain) network byte.
pub const NETWORK_ID_MIJIN: u8 = 0x60;

/// The network a transaction is addressed to.
///
/// The network byte lands in the high byte of the serialized version word,
/// so a transaction signed for testnet can never be replayed on mainnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
    Mijin,
}

impl Network {
    /// The byte packed into the version word.
    pub fn id(self) -> u8 {
        match self {
            Self::Mainnet => NETWORK_ID_MAINNET,
            Self::Testnet => NETWORK_ID_TESTNET,
            Self::Mijin => NETWORK_ID_MIJIN,
        }
    }

    /// Reverse lookup from a network byte. Unknown bytes yield `None`.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            NETWORK_ID_MAINNET => Some(Self::Mainnet),
            NETWORK_ID_TESTNET => Some(Self::Testnet),
            NETWORK_ID_MIJIN => Some(Self::Mijin),
            _ => None,
        }
    }

    /// Parse a network name. Accepts "mainnet", "testnet" or "mijin"
    /// (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "mainnet" => Some(Self::Mainnet),
            "testnet" => Some(Self::Testnet),
            "mijin" => Some(Self::Mijin),
            _ => None,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => write!(f, "mainnet"),
            Self::Testnet => write!(f, "testnet"),
            Self::Mijin => write!(f, "mijin"),
        }
    }
}

// ---------------------------------------------------------------------------
// Transaction Types & Versions
// ---------------------------------------------------------------------------

/// Type code of a transfer transaction.
pub const TRANSFER_TRANSACTION_TYPE: u32 = 0x0101;

/// Type code of a multisig wrapper transaction.
pub const MULTISIG_TRANSACTION_TYPE: u32 = 0x1004;

/// Transaction version emitted by default (version 1 transfers carry no
/// mosaics).
pub const DEFAULT_TRANSACTION_VERSION: u8 = 1;

/// Message type code for a plain-text message.
pub const MESSAGE_TYPE_PLAIN: u32 = 1;

/// Message type code for an encrypted message.
pub const MESSAGE_TYPE_SECURE: u32 = 2;

// ---------------------------------------------------------------------------
// Field Lengths
// ---------------------------------------------------------------------------

/// Raw public key length. Also the value of the signer length prefix.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Raw private key (seed) length.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Signature length.
pub const SIGNATURE_LENGTH: usize = 64;

/// Length of an address in its canonical (undashed, base32) form. Also the
/// value of the recipient length prefix.
pub const ADDRESS_LENGTH: usize = 40;

/// Width of the type, version, timestamp, deadline and length fields.
pub const WORD_WIDTH: usize = 4;

/// Width of the fee and amount fields.
pub const AMOUNT_WIDTH: usize = 8;

/// Bytes a non-empty message field adds ahead of its payload: the message
/// type and payload length words.
pub const MESSAGE_HEADER_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// Secure Messaging
// ---------------------------------------------------------------------------

/// Random salt mixed into the shared key derivation.
pub const SALT_LENGTH: usize = 32;

/// AES-CBC initialization vector length.
pub const IV_LENGTH: usize = 16;

/// AES-256 key length (the derived shared secret).
pub const AES_KEY_LENGTH: usize = 32;

/// Shortest packed message that can be split into salt and IV.
pub const MIN_ENCRYPTED_MESSAGE_LENGTH: usize = SALT_LENGTH + IV_LENGTH;

// ---------------------------------------------------------------------------
// Fee Parameters
// ---------------------------------------------------------------------------

/// Micro-units per whole XEM.
pub const MICRO_XEM_PER_XEM: u64 = 1_000_000;

/// Amounts below this (whole XEM) pay the minimum fee.
pub const FEE_LOWER_THRESHOLD: f64 = 20_000.0;

/// Amounts at or above this (whole XEM) pay the maximum fee.
pub const FEE_UPPER_THRESHOLD: f64 = 250_000.0;

/// Fee charged below [`FEE_LOWER_THRESHOLD`].
pub const MIN_AMOUNT_FEE: u64 = 1;

/// Fee charged at or above [`FEE_UPPER_THRESHOLD`].
pub const MAX_AMOUNT_FEE: u64 = 25;

/// Between the thresholds, one XEM of fee per this many XEM transferred.
pub const FEE_AMOUNT_STEP: f64 = 10_000.0;

/// One XEM of fee per started chunk of this many message bytes.
pub const MESSAGE_FEE_CHUNK: usize = 32;

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// Network epoch (nemesis block time) as a Unix timestamp:
/// 2015-03-29T00:06:25Z. Transaction timestamps count seconds from here.
pub const NEM_EPOCH_UNIX: i64 = 1_427_587_585;

/// Default validity window granted by the transfer builder.
pub const DEFAULT_DEADLINE_SECONDS: u64 = 60 * 60;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_ids_are_distinct() {
        assert_ne!(NETWORK_ID_MAINNET, NETWORK_ID_TESTNET);
        assert_ne!(NETWORK_ID_MAINNET, NETWORK_ID_MIJIN);
        assert_ne!(NETWORK_ID_TESTNET, NETWORK_ID_MIJIN);
    }

    #[test]
    fn test_network_id_roundtrip() {
        for network in [Network::Mainnet, Network::Testnet, Network::Mijin] {
            assert_eq!(Network::from_id(network.id()), Some(network));
        }
        assert_eq!(Network::from_id(0x00), None);
    }

    #[test]
    fn test_network_from_name() {
        assert_eq!(Network::from_name("TESTNET"), Some(Network::Testnet));
        assert_eq!(Network::from_name("mijin"), Some(Network::Mijin));
        assert_eq!(Network::from_name("devnet"), None);
        assert_eq!(Network::Mainnet.to_string(), "mainnet");
    }

    #[test]
    fn test_network_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Network::Testnet).unwrap();
        assert_eq!(json, "\"testnet\"");
        let back: Network = serde_json::from_str("\"mijin\"").unwrap();
        assert_eq!(back, Network::Mijin);
    }

    #[test]
    fn test_fee_thresholds_sanity() {
        assert!(FEE_LOWER_THRESHOLD < FEE_UPPER_THRESHOLD);
        assert!(MIN_AMOUNT_FEE < MAX_AMOUNT_FEE);
    }

    #[test]
    fn test_crypto_parameter_sizes() {
        assert_eq!(PUBLIC_KEY_LENGTH, 32);
        assert_eq!(SIGNATURE_LENGTH, 64);
        assert_eq!(MIN_ENCRYPTED_MESSAGE_LENGTH, 48);
        assert_eq!(AES_KEY_LENGTH, SALT_LENGTH);
    }
}
