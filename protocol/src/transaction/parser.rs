//! Wire bytes back into a [`Transaction`].
//!
//! The inverse of [`super::serializer`]. Used to check what a signed
//! envelope actually says before trusting it, and to pin the serializer's
//! output in tests. Parsing is strict: length constants must match, a
//! multisig wrapper's inner length must cover the inner transfer exactly, and
//! nothing may follow the transaction.
//!
//! An absent message field (`0,0,0,0`) parses as `message: None`. A present
//! field carrying an empty payload is rejected, since the serializer never
//! emits one.

use super::error::TransactionError;
use super::types::{
    CommonFields, Message, MessageType, MultisigTransaction, Transaction, TransactionType,
    TransferTransaction,
};
use crate::codec::{to_hex, ByteReader};
use crate::config::{ADDRESS_LENGTH, MESSAGE_HEADER_LENGTH, Network, PUBLIC_KEY_LENGTH};

/// Parses one complete transaction.
pub fn parse_transaction(bytes: &[u8]) -> Result<Transaction, TransactionError> {
    let mut reader = ByteReader::new(bytes);
    let (tx_type, common) = read_common(&mut reader)?;

    let tx = match tx_type {
        TransactionType::Transfer => Transaction::Transfer(read_transfer(&mut reader, common)?),
        TransactionType::Multisig => {
            let inner_bytes = reader.get_prefixed()?;
            let inner = read_inner(inner_bytes)?;
            Transaction::Multisig(MultisigTransaction { common, inner })
        }
    };

    if !reader.is_empty() {
        return Err(TransactionError::Malformed("trailing bytes after transaction"));
    }
    Ok(tx)
}

fn read_inner(bytes: &[u8]) -> Result<TransferTransaction, TransactionError> {
    let mut reader = ByteReader::new(bytes);
    let (tx_type, common) = read_common(&mut reader)?;
    if tx_type != TransactionType::Transfer {
        return Err(TransactionError::UnsupportedTransactionType(tx_type.code()));
    }
    let inner = read_transfer(&mut reader, common)?;
    if !reader.is_empty() {
        return Err(TransactionError::Malformed(
            "multisig inner length exceeds the inner transaction",
        ));
    }
    Ok(inner)
}

fn read_common(
    reader: &mut ByteReader<'_>,
) -> Result<(TransactionType, CommonFields), TransactionError> {
    let tx_type = TransactionType::from_code(reader.get_u32()?)?;

    let version_word = reader.take(4)?;
    if version_word[1] != 0 || version_word[2] != 0 {
        return Err(TransactionError::Malformed("version word padding is not zero"));
    }
    let network = Network::from_id(version_word[3])
        .ok_or(TransactionError::UnknownNetwork(version_word[3]))?;

    let timestamp = u64::from(reader.get_u32()?);

    if reader.get_len()? != PUBLIC_KEY_LENGTH {
        return Err(TransactionError::Malformed("signer length is not 32"));
    }
    let signer = to_hex(reader.take(PUBLIC_KEY_LENGTH)?);

    let fee = reader.get_u64()?;
    let deadline = u64::from(reader.get_u32()?);

    let common = CommonFields {
        version: version_word[0],
        network,
        timestamp,
        signer,
        fee,
        deadline,
    };
    Ok((tx_type, common))
}

fn read_transfer(
    reader: &mut ByteReader<'_>,
    common: CommonFields,
) -> Result<TransferTransaction, TransactionError> {
    let recipient_len = reader.get_len()?;
    if recipient_len != ADDRESS_LENGTH {
        return Err(TransactionError::InvalidRecipient(recipient_len));
    }
    let recipient = std::str::from_utf8(reader.take(ADDRESS_LENGTH)?)
        .map_err(|_| TransactionError::Malformed("recipient is not ASCII"))?
        .to_owned();

    let amount = reader.get_u64()?;

    let field_len = reader.get_len()?;
    let message = if field_len == 0 {
        None
    } else {
        let message_type = MessageType::from_code(reader.get_u32()?)?;
        let payload = reader.get_prefixed()?;
        if payload.is_empty() {
            return Err(TransactionError::Malformed(
                "message field present with an empty payload",
            ));
        }
        if payload.len() + MESSAGE_HEADER_LENGTH != field_len {
            return Err(TransactionError::Malformed(
                "message field length disagrees with payload length",
            ));
        }
        Some(Message {
            message_type,
            payload: payload.to_vec(),
        })
    };

    Ok(TransferTransaction {
        common,
        recipient,
        amount,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecError;
    use crate::transaction::serializer::serialize;

    const SIGNER: &str = "c5f54ba980fcbb657dbaaa42700539b207873e134d2375efeab5f1ab52f87844";
    const COSIGNER: &str = "96eb2a145211b1b7ab5f0d4b14f8abc8d695c7aee31a3cfc2d4881313c68eea3";

    fn transfer(message: Option<Message>) -> TransferTransaction {
        TransferTransaction {
            common: CommonFields {
                version: 1,
                network: Network::Mainnet,
                timestamp: 9_000,
                signer: SIGNER.into(),
                fee: 3_000_000,
                deadline: 12_600,
            },
            recipient: "NALICE2A73DLYTP4365GNFCURAUP3XVBFO7YNYOW".into(),
            amount: 42_000_000,
            message,
        }
    }

    fn multisig() -> Transaction {
        let mut common = transfer(None).common;
        common.signer = COSIGNER.into();
        common.fee = 6_000_000;
        Transaction::Multisig(MultisigTransaction {
            common,
            inner: transfer(Some(Message::plain("from the shared wallet"))),
        })
    }

    #[test]
    fn parses_serialized_transfer() {
        let tx = Transaction::Transfer(transfer(Some(Message::secure(vec![9; 80]))));
        let bytes = serialize(&tx).unwrap();
        assert_eq!(parse_transaction(&bytes).unwrap(), tx);
    }

    #[test]
    fn empty_message_parses_as_none() {
        let tx = Transaction::Transfer(transfer(Some(Message::plain(""))));
        let parsed = parse_transaction(&serialize(&tx).unwrap()).unwrap();
        assert_eq!(parsed.transfer().message, None);
    }

    #[test]
    fn multisig_inner_length_matches_inner_bytes() {
        let tx = multisig();
        let bytes = serialize(&tx).unwrap();
        let parsed = parse_transaction(&bytes).unwrap();
        assert_eq!(parsed, tx);
        assert_eq!(parsed.common().signer, COSIGNER);
        assert_eq!(parsed.transfer().common.signer, SIGNER);
    }

    #[test]
    fn rejects_understated_inner_length() {
        let mut bytes = serialize(&multisig()).unwrap();
        bytes[60] -= 1;
        assert!(parse_transaction(&bytes).is_err());
    }

    #[test]
    fn rejects_overstated_inner_length() {
        let mut bytes = serialize(&multisig()).unwrap();
        bytes[60] += 1;
        bytes.push(0);
        assert!(matches!(
            parse_transaction(&bytes),
            Err(TransactionError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_unknown_type_code() {
        let mut bytes = serialize(&Transaction::Transfer(transfer(None))).unwrap();
        bytes[0] = 0x02;
        assert!(matches!(
            parse_transaction(&bytes),
            Err(TransactionError::UnsupportedTransactionType(0x0102))
        ));
    }

    #[test]
    fn rejects_unknown_network() {
        let mut bytes = serialize(&Transaction::Transfer(transfer(None))).unwrap();
        bytes[7] = 0x11;
        assert!(matches!(
            parse_transaction(&bytes),
            Err(TransactionError::UnknownNetwork(0x11))
        ));
    }

    #[test]
    fn rejects_trailing_bytes() {
        let mut bytes = serialize(&Transaction::Transfer(transfer(None))).unwrap();
        bytes.push(0);
        assert!(matches!(
            parse_transaction(&bytes),
            Err(TransactionError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_truncated_input() {
        let bytes = serialize(&Transaction::Transfer(transfer(None))).unwrap();
        assert!(matches!(
            parse_transaction(&bytes[..bytes.len() - 2]),
            Err(TransactionError::Codec(CodecError::UnexpectedEnd { .. }))
        ));
    }

    #[test]
    fn rejects_inconsistent_message_length() {
        let mut bytes =
            serialize(&Transaction::Transfer(transfer(Some(Message::plain("abc"))))).unwrap();
        // Message field length sits right after the 60-byte common part,
        // the 44-byte recipient field and the 8-byte amount.
        bytes[112] += 1;
        assert!(matches!(
            parse_transaction(&bytes),
            Err(TransactionError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_present_message_field_with_empty_payload() {
        let mut bytes = serialize(&Transaction::Transfer(transfer(None))).unwrap();
        bytes.truncate(bytes.len() - 4);
        bytes.extend_from_slice(&[8, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0]);
        assert!(matches!(
            parse_transaction(&bytes),
            Err(TransactionError::Malformed(_))
        ));
    }
}
