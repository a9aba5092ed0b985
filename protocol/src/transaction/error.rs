use thiserror::Error;

use crate::account::AccountError;
use crate::codec::CodecError;
use crate::crypto::keys::KeyError;
use crate::crypto::signatures::SignatureError;

/// Errors raised while serializing, parsing or signing a transaction.
///
/// No variant ever carries key material; signer and recipient problems are
/// reported by shape (length, encoding), not by value.
#[derive(Debug, Error)]
pub enum TransactionError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A type code that is neither a transfer nor a multisig wrapper.
    #[error("unsupported transaction type 0x{0:04x}")]
    UnsupportedTransactionType(u32),

    #[error("unsupported message type {0}")]
    UnsupportedMessageType(u32),

    /// The signer field is not 32 bytes of hex.
    #[error("invalid signer public key: {0}")]
    InvalidSigner(#[source] CodecError),

    /// Recipient addresses are exactly 40 ASCII bytes.
    #[error("recipient address must be 40 bytes, got {0}")]
    InvalidRecipient(usize),

    #[error("unknown network byte 0x{0:02x}")]
    UnknownNetwork(u8),

    /// Wire bytes that violate the layout (bad constants, trailing data,
    /// disagreeing length fields).
    #[error("malformed transaction bytes: {0}")]
    Malformed(&'static str),

    /// The transaction names a different signer than the signing account.
    #[error("transaction signer does not match the signing account")]
    SignerMismatch,

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Signature(#[from] SignatureError),
}
