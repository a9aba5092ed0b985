//! Transaction construction via the builder pattern.
//!
//! [`TransferBuilder`] assembles an unsigned transfer, optionally wrapped in
//! a multisig transaction for a cosignatory. It fills in the network clock
//! for the timestamp and a one-hour deadline unless told otherwise.
//!
//! The builder does not compute fees and does not sign. Fees come from
//! [`crate::fee`] and are summed by the caller; signing happens in
//! [`super::signing`].

use chrono::{DateTime, Utc};

use super::types::{CommonFields, Message, MultisigTransaction, Transaction, TransferTransaction};
use crate::config::{Network, DEFAULT_DEADLINE_SECONDS, DEFAULT_TRANSACTION_VERSION, NEM_EPOCH_UNIX};

/// Seconds between the network epoch and `at`. Instants before the epoch
/// clamp to zero.
pub fn network_time(at: DateTime<Utc>) -> u64 {
    u64::try_from(at.timestamp() - NEM_EPOCH_UNIX).unwrap_or(0)
}

/// The network clock right now.
pub fn network_time_now() -> u64 {
    network_time(Utc::now())
}

// ---------------------------------------------------------------------------
// TransferBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for unsigned transfers.
///
/// ```
/// use nem_protocol::config::Network;
/// use nem_protocol::transaction::{Message, TransferBuilder};
///
/// let tx = TransferBuilder::new("c5f54ba980fcbb657dbaaa42700539b207873e134d2375efeab5f1ab52f87844")
///     .network(Network::Testnet)
///     .recipient("TBPAMG-VKFOAW-OFV6VG-4ZMCDE-YT5DZN-5QG2ZG-W3KJ")
///     .amount(25_000_000)
///     .message(Message::plain("lunch"))
///     .timestamp(1_000)
///     .build();
///
/// assert_eq!(tx.recipient, "TBPAMGVKFOAWOFV6VG4ZMCDEYT5DZN5QG2ZGW3KJ");
/// assert_eq!(tx.common.deadline, 1_000 + 3_600);
/// ```
#[derive(Debug, Clone)]
pub struct TransferBuilder {
    version: u8,
    network: Network,
    signer: String,
    recipient: String,
    amount: u64,
    fee: u64,
    timestamp: Option<u64>,
    deadline: Option<u64>,
    message: Option<Message>,
}

impl TransferBuilder {
    /// Starts a transfer signed by `signer` (public key hex).
    ///
    /// Defaults:
    /// - `version`: 1
    /// - `network`: mainnet
    /// - `fee`: 0 (set it before signing)
    /// - `timestamp`: network time at build
    /// - `deadline`: timestamp + 1 hour
    pub fn new(signer: &str) -> Self {
        Self {
            version: DEFAULT_TRANSACTION_VERSION,
            network: Network::default(),
            signer: signer.trim().to_ascii_lowercase(),
            recipient: String::new(),
            amount: 0,
            fee: 0,
            timestamp: None,
            deadline: None,
            message: None,
        }
    }

    pub fn version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    pub fn network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    /// Sets the recipient. Dashes are dropped and letters uppercased, so the
    /// display form of an address is accepted.
    pub fn recipient(mut self, address: &str) -> Self {
        self.recipient = address
            .chars()
            .filter(|c| *c != '-')
            .collect::<String>()
            .trim()
            .to_ascii_uppercase();
        self
    }

    /// Amount in micro-XEM.
    pub fn amount(mut self, amount: u64) -> Self {
        self.amount = amount;
        self
    }

    /// Fee in micro-XEM.
    pub fn fee(mut self, fee: u64) -> Self {
        self.fee = fee;
        self
    }

    /// Network time in seconds. Defaults to now.
    pub fn timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Network time in seconds. Defaults to timestamp + 1 hour.
    pub fn deadline(mut self, deadline: u64) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn message(mut self, message: Message) -> Self {
        self.message = Some(message);
        self
    }

    /// Produces the unsigned transfer.
    pub fn build(self) -> TransferTransaction {
        let timestamp = self.timestamp.unwrap_or_else(network_time_now);
        let deadline = self
            .deadline
            .unwrap_or_else(|| timestamp.saturating_add(DEFAULT_DEADLINE_SECONDS));

        TransferTransaction {
            common: CommonFields {
                version: self.version,
                network: self.network,
                timestamp,
                signer: self.signer,
                fee: self.fee,
                deadline,
            },
            recipient: self.recipient,
            amount: self.amount,
            message: self.message,
        }
    }

    /// Produces the unsigned transfer as a [`Transaction`].
    pub fn build_transaction(self) -> Transaction {
        Transaction::Transfer(self.build())
    }

    /// Wraps the transfer for `cosigner` (public key hex) to sign.
    ///
    /// The signer given to [`TransferBuilder::new`] is the multisig account.
    /// The wrapper shares the inner timing and network and pays `wrapper_fee`
    /// micro-XEM on top of the inner fee.
    pub fn build_multisig(self, cosigner: &str, wrapper_fee: u64) -> Transaction {
        let inner = self.build();
        let common = CommonFields {
            signer: cosigner.trim().to_ascii_lowercase(),
            fee: wrapper_fee,
            ..inner.common.clone()
        };
        Transaction::Multisig(MultisigTransaction { common, inner })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
