//! The signed envelope handed to network submission.

use serde::{Deserialize, Serialize};

use super::error::TransactionError;
use super::parser::parse_transaction;
use super::signing::verify_signature;
use super::types::Transaction;
use crate::codec::{hex_to_bytes, to_hex};
use crate::crypto::keys::{NemPublicKey, NemSignature};

/// `{ "data": hex, "signature": hex }`, exactly what a node's announce
/// endpoint takes.
///
/// Only ever built from a complete signing run; there is no partially
/// filled envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestAnnounce {
    /// Lowercase hex of the serialized transaction.
    pub data: String,
    /// Lowercase hex of the 64-byte signature.
    pub signature: String,
}

impl RequestAnnounce {
    pub fn new(data: &[u8], signature: &NemSignature) -> Self {
        Self {
            data: to_hex(data),
            signature: signature.to_hex(),
        }
    }

    /// The serialized transaction bytes.
    pub fn data_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        Ok(hex_to_bytes(&self.data)?)
    }

    /// Decodes the transaction the envelope carries, without checking the
    /// signature.
    pub fn transaction(&self) -> Result<Transaction, TransactionError> {
        parse_transaction(&self.data_bytes()?)
    }

    /// Parses the envelope and checks its signature against the outer
    /// signer. Returns the transaction on success.
    pub fn verify(&self) -> Result<Transaction, TransactionError> {
        let data = self.data_bytes()?;
        let tx = parse_transaction(&data)?;
        let signer = NemPublicKey::from_hex(&tx.common().signer)?;
        let signature = NemSignature::from_hex(&self.signature)?;
        verify_signature(&signer, &data, &signature)?;
        Ok(tx)
    }
}
