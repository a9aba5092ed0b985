// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # NEM Command-Line Signer
//!
//! Entry point for the `nem-cli` binary. Parses CLI arguments, initializes
//! logging, and runs one of:
//!
//! - `sign`: build, price and sign a transfer request
//! - `encrypt`: seal a secure message
//! - `decrypt`: open a secure message
//! - `fee`: show the fee components and their sum
//! - `version`: print build version information
//!
//! The binary is the caller the protocol library expects: it sums the fee
//! components itself and supplies the RNG and the key store.

mod cli;
mod keys;
mod logging;
mod request;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::OsRng;
use serde::Serialize;

use nem_protocol::codec::hex_to_bytes;
use nem_protocol::config::{Network, IV_LENGTH, SALT_LENGTH};
use nem_protocol::fee::{
    fee_by_amount, fee_by_message, fee_by_message_len, micro_to_xem, xem_to_micro,
};
use nem_protocol::messaging::{decrypt_message, encrypt_message, secure_message};
use nem_protocol::transaction::{sign_transaction, Message, TransferBuilder};

use cli::{Commands, NemCli};
use keys::Signer;
use request::{MessageRequest, TransferRequest};

fn main() -> Result<()> {
    let cli = NemCli::parse();
    logging::init_logging("warn", cli.log_format);

    match cli.command {
        Commands::Sign(args) => sign(cli.network, args),
        Commands::Encrypt(args) => encrypt(args),
        Commands::Decrypt(args) => decrypt(args),
        Commands::Fee(args) => fee(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Signs the transfer described by the request file and prints the
/// `{data, signature}` envelope.
fn sign(network: Network, args: cli::SignArgs) -> Result<()> {
    let request = TransferRequest::load(&args.request)?;
    let signer = Signer::from_env_key(&args.key.private_key)?;

    let message = match &request.message {
        None => None,
        Some(MessageRequest::Plain { text }) => Some(Message::plain(text.as_str())),
        Some(MessageRequest::Secure {
            text,
            recipient_public_key,
        }) => Some(
            secure_message(
                text,
                signer.encrypted_private_key(),
                recipient_public_key,
                &signer.keys,
                &mut OsRng,
            )
            .context("failed to encrypt message")?,
        ),
    };

    let payload = message.as_ref().map(|m| m.payload.as_slice()).unwrap_or(&[]);
    let amount_fee = fee_by_amount(micro_to_xem(request.amount));
    let message_fee = fee_by_message(payload);
    let fee = xem_to_micro(amount_fee + message_fee);

    let sender = match &request.multisig {
        Some(multisig) => multisig.account.clone(),
        None => signer.public_key_hex(),
    };
    let mut builder = TransferBuilder::new(&sender)
        .network(network)
        .recipient(&request.recipient)
        .amount(request.amount)
        .fee(fee);
    if let Some(message) = message {
        builder = builder.message(message);
    }
    if let Some(timestamp) = request.timestamp {
        builder = builder.timestamp(timestamp);
    }
    if let Some(deadline) = request.deadline {
        builder = builder.deadline(deadline);
    }

    let tx = match &request.multisig {
        Some(multisig) => builder.build_multisig(&signer.public_key_hex(), multisig.fee),
        None => builder.build_transaction(),
    };

    let announce = sign_transaction(&tx, &signer.account, &signer.keys)
        .context("failed to sign transaction")?;

    tracing::info!(
        tx_type = %tx.tx_type(),
        network = %network,
        fee,
        signer = %signer.account.public_key(),
        "transaction signed"
    );

    print_json(&announce)
}

#[derive(Serialize)]
struct EncryptOutput {
    payload: String,
}

fn encrypt(args: cli::EncryptArgs) -> Result<()> {
    let signer = Signer::from_env_key(&args.key.private_key)?;
    let sealed = encrypt_message(
        args.message.as_bytes(),
        signer.encrypted_private_key(),
        &args.recipient,
        &signer.keys,
        &mut OsRng,
    )
    .context("failed to encrypt message")?;

    print_json(&EncryptOutput {
        payload: hex::encode(sealed),
    })
}

#[derive(Serialize)]
struct DecryptOutput {
    text: Option<String>,
}

fn decrypt(args: cli::DecryptArgs) -> Result<()> {
    let signer = Signer::from_env_key(&args.key.private_key)?;
    let packed = hex_to_bytes(args.payload.trim()).context("payload is not valid hex")?;
    let text = decrypt_message(
        &packed,
        signer.encrypted_private_key(),
        &args.sender,
        &signer.keys,
    )
    .context("failed to decrypt message")?;

    if text.is_none() {
        tracing::warn!("payload did not decrypt to text");
    }
    print_json(&DecryptOutput { text })
}

#[derive(Debug, PartialEq, Serialize)]
struct FeeOutput {
    amount_fee: u64,
    message_fee: u64,
    total_xem: u64,
    total_micro_xem: u64,
}

fn fee(args: cli::FeeArgs) -> Result<()> {
    let message_len = args
        .message
        .as_deref()
        .map(|text| priced_message_len(text, args.secure))
        .unwrap_or(0);
    print_json(&fee_breakdown(args.amount, message_len))
}

fn fee_breakdown(amount_xem: f64, message_len: usize) -> FeeOutput {
    let amount_fee = fee_by_amount(amount_xem);
    let message_fee = fee_by_message_len(message_len);
    let total_xem = amount_fee + message_fee;
    FeeOutput {
        amount_fee,
        message_fee,
        total_xem,
        total_micro_xem: xem_to_micro(total_xem),
    }
}

/// Bytes a message occupies on the wire: the text itself, or for a secure
/// message salt, IV and the PKCS#7-padded ciphertext.
fn priced_message_len(text: &str, secure: bool) -> usize {
    let len = text.len();
    if secure {
        SALT_LENGTH + IV_LENGTH + (len / IV_LENGTH + 1) * IV_LENGTH
    } else {
        len
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to encode output")?;
    println!("{json}");
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("nem-cli       {}", env!("CARGO_PKG_VERSION"));
    println!("nem-protocol  {}", nem_protocol::VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_breakdown_sums_components() {
        let out = fee_breakdown(30_000.0, 33);
        assert_eq!(
            out,
            FeeOutput {
                amount_fee: 3,
                message_fee: 2,
                total_xem: 5,
                total_micro_xem: 5_000_000,
            }
        );
    }

    #[test]
    fn fee_breakdown_without_message() {
        let out = fee_breakdown(10.0, 0);
        assert_eq!(out.message_fee, 0);
        assert_eq!(out.total_micro_xem, 1_000_000);
    }

    #[test]
    fn fee_breakdown_prices_length_without_a_payload() {
        let out = fee_breakdown(1.0, usize::MAX);
        assert_eq!(out.message_fee, (usize::MAX / 32 + 1) as u64);
        assert_eq!(out.total_xem, out.amount_fee + out.message_fee);
    }

    #[test]
    fn secure_message_is_priced_at_sealed_size() {
        assert_eq!(priced_message_len("hello", false), 5);
        assert_eq!(priced_message_len("hello", true), 64);
        assert_eq!(priced_message_len(&"x".repeat(16), true), 80);
        assert_eq!(priced_message_len("", true), 64);
    }
}
