//! # Transfer Requests
//!
//! The JSON document `nem-cli sign` reads. Amounts and fees are micro-XEM.
//!
//! ```json
//! {
//!   "recipient": "TBPAMG-VKFOAW-OFV6VG-4ZMCDE-YT5DZN-5QG2ZG-W3KJ",
//!   "amount": 25000000,
//!   "message": { "type": "secure", "text": "rent", "recipient_public_key": "96eb..." },
//!   "multisig": { "account": "c5f5...", "fee": 6000000 }
//! }
//! ```
//!
//! With `multisig` set, the key from the environment is the cosignatory and
//! `multisig.account` is the public key the funds leave from. A secure
//! message cannot be combined with `multisig`: the recipient derives the
//! message key from the multisig account, whose private key the cosignatory
//! does not hold.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

/// A transfer as described by the caller.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransferRequest {
    pub recipient: String,
    pub amount: u64,
    #[serde(default)]
    pub message: Option<MessageRequest>,
    #[serde(default)]
    pub multisig: Option<MultisigRequest>,
    /// Network time override; defaults to now.
    #[serde(default)]
    pub timestamp: Option<u64>,
    #[serde(default)]
    pub deadline: Option<u64>,
}

/// The message to attach, before encoding.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageRequest {
    Plain {
        text: String,
    },
    Secure {
        text: String,
        recipient_public_key: String,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MultisigRequest {
    /// Public key (hex) of the multisig account.
    pub account: String,
    /// Fee for the wrapper, micro-XEM.
    pub fee: u64,
}

impl TransferRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        let request: Self = serde_json::from_str(json).context("invalid transfer request")?;
        request.validate()?;
        Ok(request)
    }

    fn validate(&self) -> Result<()> {
        if self.multisig.is_some() && matches!(self.message, Some(MessageRequest::Secure { .. })) {
            bail!("secure messages cannot be sent from a multisig account");
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read request file {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn minimal_request() {
        let request =
            TransferRequest::from_json(r#"{ "recipient": "TBPAMGVKFOAWOFV6VG4ZMCDEYT5DZN5QG2ZGW3KJ", "amount": 5 }"#)
                .unwrap();
        assert_eq!(request.amount, 5);
        assert!(request.message.is_none());
        assert!(request.multisig.is_none());
        assert!(request.timestamp.is_none());
    }

    #[test]
    fn secure_message() {
        let request = TransferRequest::from_json(
            r#"{
                "recipient": "TBPAMGVKFOAWOFV6VG4ZMCDEYT5DZN5QG2ZGW3KJ",
                "amount": 1000000,
                "message": { "type": "secure", "text": "hi", "recipient_public_key": "ab" }
            }"#,
        )
        .unwrap();
        assert_eq!(
            request.message,
            Some(MessageRequest::Secure {
                text: "hi".into(),
                recipient_public_key: "ab".into(),
            })
        );
    }

    #[test]
    fn plain_message_from_multisig() {
        let request = TransferRequest::from_json(
            r#"{
                "recipient": "TBPAMGVKFOAWOFV6VG4ZMCDEYT5DZN5QG2ZGW3KJ",
                "amount": 1000000,
                "message": { "type": "plain", "text": "hi" },
                "multisig": { "account": "cd", "fee": 6000000 }
            }"#,
        )
        .unwrap();
        assert_eq!(request.multisig.unwrap().fee, 6_000_000);
    }

    #[test]
    fn rejects_secure_message_from_multisig() {
        let err = TransferRequest::from_json(
            r#"{
                "recipient": "TBPAMGVKFOAWOFV6VG4ZMCDEYT5DZN5QG2ZGW3KJ",
                "amount": 1000000,
                "message": { "type": "secure", "text": "pay rent", "recipient_public_key": "ab" },
                "multisig": { "account": "cd", "fee": 6000000 }
            }"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("multisig"));
    }

    #[test]
    fn rejects_unknown_fields() {
        let result = TransferRequest::from_json(r#"{ "recipient": "x", "amount": 1, "fee": 2 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "recipient": "TBPAMGVKFOAWOFV6VG4ZMCDEYT5DZN5QG2ZGW3KJ", "amount": 7, "message": {{ "type": "plain", "text": "memo" }} }}"#
        )
        .unwrap();

        let request = TransferRequest::load(file.path()).unwrap();
        assert_eq!(
            request.message,
            Some(MessageRequest::Plain {
                text: "memo".into()
            })
        );
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = TransferRequest::load(Path::new("/nonexistent/request.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/request.json"));
    }
}
