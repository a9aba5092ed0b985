//! Canonical wire serialization.
//!
//! The bytes produced here are exactly what gets signed and what the node
//! deserializes, so the layout is fixed field by field:
//!
//! ```text
//! common   = type(4) | version, 0, 0, network | timestamp(4)
//!          | 32(4) | signer(32) | fee(8) | deadline(4)
//! transfer = 40(4) | recipient(40) | amount(8) | message
//! message  = len+8(4) | type(4) | len(4) | payload      (non-empty)
//!          | 0(4)                                        (empty or absent)
//! multisig = common | inner_len(4) | inner common | inner transfer
//! ```
//!
//! Every integer is little-endian. Nothing is truncated: a timestamp or
//! deadline past `u32::MAX` is a [`CodecError::FieldOverflow`].
//!
//! [`CodecError::FieldOverflow`]: crate::codec::CodecError::FieldOverflow

use tracing::debug;

use super::error::TransactionError;
use super::types::{CommonFields, Transaction, TransactionType, TransferTransaction};
use crate::codec::{hex_to_array, ByteWriter};
use crate::config::{ADDRESS_LENGTH, MESSAGE_HEADER_LENGTH, PUBLIC_KEY_LENGTH, WORD_WIDTH};

/// Serializes a transaction into its signable wire bytes.
///
/// Deterministic: the same transaction always yields the same bytes.
pub fn serialize(tx: &Transaction) -> Result<Vec<u8>, TransactionError> {
    let mut writer = ByteWriter::with_capacity(256);
    match tx {
        Transaction::Transfer(transfer) => {
            write_common(&mut writer, TransactionType::Transfer, &transfer.common)?;
            write_transfer(&mut writer, transfer)?;
        }
        Transaction::Multisig(multisig) => {
            write_common(&mut writer, TransactionType::Multisig, &multisig.common)?;
            let inner = inner_transaction_bytes(&multisig.inner)?;
            writer.put_prefixed(&inner)?;
        }
    }

    debug!(
        tx_type = %tx.tx_type(),
        len = writer.len(),
        "serialized transaction"
    );
    Ok(writer.into_vec())
}

/// The common part alone, for the given type code.
pub fn common_part(
    tx_type: TransactionType,
    common: &CommonFields,
) -> Result<Vec<u8>, TransactionError> {
    let mut writer = ByteWriter::new();
    write_common(&mut writer, tx_type, common)?;
    Ok(writer.into_vec())
}

/// The transfer-specific part alone.
pub fn transfer_part(tx: &TransferTransaction) -> Result<Vec<u8>, TransactionError> {
    let mut writer = ByteWriter::new();
    write_transfer(&mut writer, tx)?;
    Ok(writer.into_vec())
}

/// What a multisig wrapper carries after its length prefix: the inner
/// transfer's common part followed by its transfer part.
pub fn inner_transaction_bytes(inner: &TransferTransaction) -> Result<Vec<u8>, TransactionError> {
    let mut writer = ByteWriter::new();
    write_common(&mut writer, TransactionType::Transfer, &inner.common)?;
    write_transfer(&mut writer, inner)?;
    Ok(writer.into_vec())
}

fn write_common(
    writer: &mut ByteWriter,
    tx_type: TransactionType,
    common: &CommonFields,
) -> Result<(), TransactionError> {
    let signer: [u8; PUBLIC_KEY_LENGTH] =
        hex_to_array(&common.signer).map_err(TransactionError::InvalidSigner)?;

    writer
        .put_u32(tx_type.code())
        .put_bytes(&[common.version, 0, 0, common.network.id()])
        .put_uint(common.timestamp, WORD_WIDTH)?
        .put_prefixed(&signer)?
        .put_u64(common.fee)
        .put_uint(common.deadline, WORD_WIDTH)?;
    Ok(())
}

fn write_transfer(writer: &mut ByteWriter, tx: &TransferTransaction) -> Result<(), TransactionError> {
    let recipient = tx.recipient.as_bytes();
    if recipient.len() != ADDRESS_LENGTH {
        return Err(TransactionError::InvalidRecipient(recipient.len()));
    }

    writer.put_prefixed(recipient)?.put_u64(tx.amount);

    match tx.message.as_ref().filter(|message| !message.is_empty()) {
        Some(message) => {
            let field_len = message
                .payload
                .len()
                .saturating_add(MESSAGE_HEADER_LENGTH);
            writer
                .put_len(field_len)?
                .put_u32(message.message_type.code())
                .put_prefixed(&message.payload)?;
        }
        None => {
            writer.put_u32(0);
        }
    }
    Ok(())
}
