//! # Transaction Module
//!
//! Construction, serialization, parsing and signing of NEM transactions.
//!
//! ## Architecture
//!
//! ```text
//! types.rs      Transaction sum type, common fields, messages
//! builder.rs    TransferBuilder and the network clock
//! serializer.rs canonical little-endian wire bytes
//! parser.rs     wire bytes back into a Transaction
//! signing.rs    signing through an account's key store
//! announce.rs   the {data, signature} envelope
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build**: [`TransferBuilder`], optionally wrapped for a cosignatory.
//! 2. **Fee**: the caller sums [`crate::fee`] components and calls
//!    [`Transaction::set_fee`].
//! 3. **Sign**: [`sign_transaction`] serializes and signs in one step.
//! 4. **Announce**: the [`RequestAnnounce`] goes to network submission.
//!
//! Only transfers and multisig-wrapped transfers exist here. Unknown type
//! codes on the wire are [`TransactionError::UnsupportedTransactionType`].

pub mod announce;
pub mod builder;
pub mod error;
pub mod parser;
pub mod serializer;
pub mod signing;
pub mod types;

pub use announce::RequestAnnounce;
pub use builder::{network_time, network_time_now, TransferBuilder};
pub use error::TransactionError;
pub use parser::parse_transaction;
pub use serializer::serialize;
pub use signing::{sign_bytes, sign_transaction, verify_signature};
pub use types::{
    CommonFields, Message, MessageType, MultisigTransaction, Transaction, TransactionType,
    TransferTransaction,
};
