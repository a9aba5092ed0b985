//! # CLI Interface
//!
//! Defines the command-line argument structure for `nem-cli` using `clap`
//! derive. Subcommands: `sign`, `encrypt`, `decrypt`, `fee`, `version`.
//!
//! Private keys are only ever taken from `NEM_PRIVATE_KEY` (or the matching
//! flag) and their values are hidden from `--help`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use nem_protocol::config::Network;

use crate::logging::LogFormat;

/// Offline signer for NEM transfer transactions.
///
/// Builds, prices and signs transfers, and seals or opens secure messages.
/// Every command prints JSON on stdout; logs go to stderr.
#[derive(Parser, Debug)]
#[command(
    name = "nem-cli",
    about = "Offline signer for NEM transfer transactions",
    version,
    propagate_version = true
)]
pub struct NemCli {
    /// Network the transaction is for: mainnet, testnet or mijin.
    #[arg(
        long,
        global = true,
        env = "NEM_NETWORK",
        default_value = "mainnet",
        value_parser = parse_network
    )]
    pub network: Network,

    /// Log output format.
    #[arg(
        long,
        global = true,
        env = "NEM_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build, price and sign a transfer described by a JSON request file.
    Sign(SignArgs),
    /// Seal a message for a recipient; prints the hex payload.
    Encrypt(EncryptArgs),
    /// Open a sealed message from a sender; prints the text or null.
    Decrypt(DecryptArgs),
    /// Print both fee components for an amount and optional message.
    Fee(FeeArgs),
    /// Print version information and exit.
    Version,
}

/// The signing key, shared by every command that needs one.
#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Hex private key (64 characters, or 66 with a leading 00).
    #[arg(long, env = "NEM_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,
}

/// Arguments for the `sign` subcommand.
#[derive(Args, Debug)]
pub struct SignArgs {
    /// Path to the JSON transfer request.
    #[arg(long, short = 'r')]
    pub request: PathBuf,

    #[command(flatten)]
    pub key: KeyArgs,
}

/// Arguments for the `encrypt` subcommand.
#[derive(Args, Debug)]
pub struct EncryptArgs {
    /// Recipient public key (hex).
    #[arg(long)]
    pub recipient: String,

    /// Message text.
    #[arg(long, short = 'm')]
    pub message: String,

    #[command(flatten)]
    pub key: KeyArgs,
}

/// Arguments for the `decrypt` subcommand.
#[derive(Args, Debug)]
pub struct DecryptArgs {
    /// Sender public key (hex).
    #[arg(long)]
    pub sender: String,

    /// Sealed payload (hex): salt, IV, ciphertext.
    #[arg(long)]
    pub payload: String,

    #[command(flatten)]
    pub key: KeyArgs,
}

/// Arguments for the `fee` subcommand.
#[derive(Args, Debug)]
pub struct FeeArgs {
    /// Amount in whole XEM.
    #[arg(long, short = 'a')]
    pub amount: f64,

    /// Message text to price.
    #[arg(long, short = 'm')]
    pub message: Option<String>,

    /// Price the message as a secure message (sealed size).
    #[arg(long, requires = "message")]
    pub secure: bool,
}

fn parse_network(name: &str) -> Result<Network, String> {
    Network::from_name(name)
        .ok_or_else(|| format!("unknown network '{name}', expected mainnet, testnet or mijin"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        NemCli::command().debug_assert();
    }

    #[test]
    fn parses_fee_command() {
        let cli = NemCli::try_parse_from([
            "nem-cli",
            "--network",
            "testnet",
            "fee",
            "--amount",
            "25000",
            "-m",
            "hello",
        ])
        .unwrap();
        assert_eq!(cli.network, Network::Testnet);
        match cli.command {
            Commands::Fee(args) => {
                assert_eq!(args.amount, 25_000.0);
                assert_eq!(args.message.as_deref(), Some("hello"));
                assert!(!args.secure);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_network() {
        let result = NemCli::try_parse_from(["nem-cli", "--network", "devnet", "version"]);
        assert!(result.is_err());
    }

    #[test]
    fn secure_fee_requires_message() {
        let result = NemCli::try_parse_from(["nem-cli", "fee", "--amount", "1", "--secure"]);
        assert!(result.is_err());
    }
}
