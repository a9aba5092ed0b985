//! Core type definitions for NEM transactions.
//!
//! A [`Transaction`] is a closed sum over the two shapes this crate signs: a
//! plain [`TransferTransaction`] and a [`MultisigTransaction`] that wraps a
//! transfer for a cosignatory to sign. Both share [`CommonFields`].
//!
//! All amounts and fees are `u64` micro-XEM. Timestamps and deadlines are
//! seconds since the network epoch (see [`crate::config::NEM_EPOCH_UNIX`]).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::TransactionError;
use crate::config::{
    Network, MESSAGE_TYPE_PLAIN, MESSAGE_TYPE_SECURE, MULTISIG_TRANSACTION_TYPE,
    TRANSFER_TRANSACTION_TYPE,
};

// ---------------------------------------------------------------------------
// TransactionType
// ---------------------------------------------------------------------------

/// Discriminant written as the first word of every transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Value transfer with an optional message.
    Transfer,
    /// Cosignatory wrapper around a transfer from a multisig account.
    Multisig,
}

impl TransactionType {
    /// The 4-byte wire code.
    pub fn code(self) -> u32 {
        match self {
            Self::Transfer => TRANSFER_TRANSACTION_TYPE,
            Self::Multisig => MULTISIG_TRANSACTION_TYPE,
        }
    }

    /// Maps a wire code back to a type; anything else is
    /// [`TransactionError::UnsupportedTransactionType`].
    pub fn from_code(code: u32) -> Result<Self, TransactionError> {
        match code {
            TRANSFER_TRANSACTION_TYPE => Ok(Self::Transfer),
            MULTISIG_TRANSACTION_TYPE => Ok(Self::Multisig),
            other => Err(TransactionError::UnsupportedTransactionType(other)),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transfer => write!(f, "Transfer"),
            Self::Multisig => write!(f, "Multisig"),
        }
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// How a message payload is to be read by the recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Payload is the UTF-8 text itself.
    Plain,
    /// Payload is `salt || iv || ciphertext` from [`crate::messaging`].
    Secure,
}

impl MessageType {
    pub fn code(self) -> u32 {
        match self {
            Self::Plain => MESSAGE_TYPE_PLAIN,
            Self::Secure => MESSAGE_TYPE_SECURE,
        }
    }

    pub fn from_code(code: u32) -> Result<Self, TransactionError> {
        match code {
            MESSAGE_TYPE_PLAIN => Ok(Self::Plain),
            MESSAGE_TYPE_SECURE => Ok(Self::Secure),
            other => Err(TransactionError::UnsupportedMessageType(other)),
        }
    }
}

/// A message attached to a transfer.
///
/// An empty payload is legal and serializes exactly like no message at all.
/// In JSON the payload travels as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    #[serde(with = "hex_payload")]
    pub payload: Vec<u8>,
}

impl Message {
    /// A plain-text message.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            message_type: MessageType::Plain,
            payload: text.into().into_bytes(),
        }
    }

    /// A secure message from an already sealed payload.
    pub fn secure(sealed: Vec<u8>) -> Self {
        Self {
            message_type: MessageType::Secure,
            payload: sealed,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// The payload as text, for plain messages that hold valid UTF-8.
    pub fn text(&self) -> Option<&str> {
        match self.message_type {
            MessageType::Plain => std::str::from_utf8(&self.payload).ok(),
            MessageType::Secure => None,
        }
    }
}

mod hex_payload {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// Fields every transaction carries, in wire order after the type code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonFields {
    /// Transaction version; the network byte is packed next to it on the wire.
    pub version: u8,
    pub network: Network,
    /// Seconds since the network epoch. Must fit in 4 bytes.
    pub timestamp: u64,
    /// Signer public key, 64 hex characters.
    pub signer: String,
    /// Fee in micro-XEM.
    pub fee: u64,
    /// Seconds since the network epoch. Must fit in 4 bytes.
    pub deadline: u64,
}

/// A value transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferTransaction {
    pub common: CommonFields,
    /// 40-character address, sent as ASCII bytes.
    pub recipient: String,
    /// Amount in micro-XEM.
    pub amount: u64,
    pub message: Option<Message>,
}

/// A transfer from a multisig account, wrapped for a cosignatory.
///
/// The wrapper's `common.signer` is the cosignatory; `inner.common.signer` is
/// the multisig account the funds leave from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultisigTransaction {
    pub common: CommonFields,
    pub inner: TransferTransaction,
}

/// Every transaction this crate can serialize and sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Transaction {
    Transfer(TransferTransaction),
    Multisig(MultisigTransaction),
}

impl Transaction {
    pub fn tx_type(&self) -> TransactionType {
        match self {
            Self::Transfer(_) => TransactionType::Transfer,
            Self::Multisig(_) => TransactionType::Multisig,
        }
    }

    /// The outermost common fields, i.e. the ones the signature covers as
    /// the signer's own.
    pub fn common(&self) -> &CommonFields {
        match self {
            Self::Transfer(tx) => &tx.common,
            Self::Multisig(tx) => &tx.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut CommonFields {
        match self {
            Self::Transfer(tx) => &mut tx.common,
            Self::Multisig(tx) => &mut tx.common,
        }
    }

    /// Sets the outer fee. The only mutation a transaction sees before it is
    /// serialized.
    pub fn set_fee(&mut self, fee: u64) {
        self.common_mut().fee = fee;
    }

    /// The transfer that moves funds: the transaction itself, or the one a
    /// multisig wrapper carries.
    pub fn transfer(&self) -> &TransferTransaction {
        match self {
            Self::Transfer(tx) => tx,
            Self::Multisig(tx) => &tx.inner,
        }
    }
}

impl From<TransferTransaction> for Transaction {
    fn from(tx: TransferTransaction) -> Self {
        Self::Transfer(tx)
    }
}

impl From<MultisigTransaction> for Transaction {
    fn from(tx: MultisigTransaction) -> Self {
        Self::Multisig(tx)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
