//! Transaction signing with an account's key pair.
//!
//! Signing is a separate step from building because the private key is not
//! available at construction time: it is decrypted from account storage for
//! the duration of one call and dropped (and zeroized) before returning.
//!
//! The signature covers the exact bytes from [`super::serializer::serialize`]
//! and nothing else, so the envelope's `data` is what was signed.

use tracing::debug;

use super::announce::RequestAnnounce;
use super::error::TransactionError;
use super::serializer::serialize;
use super::types::Transaction;
use crate::account::{Account, PrivateKeyDecryptor};
use crate::crypto::keys::{NemPublicKey, NemSignature};
use crate::crypto::signatures;

/// Serializes `tx` and signs it with `account`'s key.
///
/// The procedure:
/// 1. Serialize. Invalid fields fail here, before any key is touched.
/// 2. Check that the outer signer is the account's public key.
/// 3. Decrypt the private key through `keys` and check it derives the
///    account's public key.
/// 4. Sign and wrap data and signature into a [`RequestAnnounce`].
///
/// `tx` is not modified. Any failure aborts the call; nothing is retried.
///
/// # Example
///
/// ```
/// use nem_protocol::account::{Account, PlaintextKeys};
/// use nem_protocol::config::Network;
/// use nem_protocol::transaction::{sign_transaction, TransferBuilder};
///
/// let private = "575dbb3062267eff57c970a336ebbc8fbcfe12c5bd3ed7bc11eb0481d7704ced";
/// let public = "c5f54ba980fcbb657dbaaa42700539b207873e134d2375efeab5f1ab52f87844";
/// let account = Account::from_hex(public, private).unwrap();
///
/// let tx = TransferBuilder::new(public)
///     .network(Network::Testnet)
///     .recipient("TBPAMGVKFOAWOFV6VG4ZMCDEYT5DZN5QG2ZGW3KJ")
///     .amount(1_000_000)
///     .fee(1_000_000)
///     .timestamp(1_000)
///     .build_transaction();
///
/// let announce = sign_transaction(&tx, &account, &PlaintextKeys).unwrap();
/// assert_eq!(announce.signature.len(), 128);
/// assert_eq!(announce.verify().unwrap(), tx);
/// ```
pub fn sign_transaction<D>(
    tx: &Transaction,
    account: &Account,
    keys: &D,
) -> Result<RequestAnnounce, TransactionError>
where
    D: PrivateKeyDecryptor + ?Sized,
{
    let data = serialize(tx)?;

    let signer = NemPublicKey::from_hex(&tx.common().signer)?;
    if &signer != account.public_key() {
        return Err(TransactionError::SignerMismatch);
    }

    let signature = sign_bytes(&data, account, keys)?;
    debug!(
        tx_type = %tx.tx_type(),
        signer = %signer,
        len = data.len(),
        "signed transaction"
    );
    Ok(RequestAnnounce::new(&data, &signature))
}

/// Signs arbitrary bytes with `account`'s key.
pub fn sign_bytes<D>(
    data: &[u8],
    account: &Account,
    keys: &D,
) -> Result<NemSignature, TransactionError>
where
    D: PrivateKeyDecryptor + ?Sized,
{
    let keypair = account.unlock(keys)?;
    Ok(signatures::sign(&keypair, data)?)
}

/// Verifies `signature` over `data` for `public_key`.
pub fn verify_signature(
    public_key: &NemPublicKey,
    data: &[u8],
    signature: &NemSignature,
) -> Result<(), TransactionError> {
    let result = signatures::verify(public_key, data, signature);
    debug!(
        signer = %public_key,
        len = data.len(),
        valid = result.is_ok(),
        "verified signature"
    );
    Ok(result?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{AccountError, KeyStoreError, PlaintextKeys};
    use crate::config::Network;
    use crate::crypto::keys::KeyError;
    use crate::crypto::signatures::SignatureError;
    use crate::transaction::builder::TransferBuilder;
    use crate::transaction::types::Message;
    use zeroize::Zeroizing;

    const PRIVATE: &str = "575dbb3062267eff57c970a336ebbc8fbcfe12c5bd3ed7bc11eb0481d7704ced";
    const PUBLIC: &str = "c5f54ba980fcbb657dbaaa42700539b207873e134d2375efeab5f1ab52f87844";
    const OTHER_PRIVATE: &str = "5b0e3fa5d3b49a79022d7c1e121ba1cbbf4db5821f47ab8c708ef88defc29bfe";
    const OTHER_PUBLIC: &str = "96eb2a145211b1b7ab5f0d4b14f8abc8d695c7aee31a3cfc2d4881313c68eea3";
    const RECIPIENT: &str = "TBPAMGVKFOAWOFV6VG4ZMCDEYT5DZN5QG2ZGW3KJ";

    fn account() -> Account {
        Account::from_hex(PUBLIC, PRIVATE).unwrap()
    }

    fn sample_tx(signer: &str) -> Transaction {
        TransferBuilder::new(signer)
            .network(Network::Testnet)
            .recipient(RECIPIENT)
            .amount(10_000_000)
            .fee(2_000_000)
            .timestamp(50_000)
            .message(Message::plain("rent"))
            .build_transaction()
    }

    #[test]
    fn signed_envelope_verifies() {
        let tx = sample_tx(PUBLIC);
        let announce = sign_transaction(&tx, &account(), &PlaintextKeys).unwrap();

        assert_eq!(announce.data, hex::encode(serialize(&tx).unwrap()));
        assert_eq!(announce.signature.len(), 128);
        assert!(announce.signature.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(announce.verify().unwrap(), tx);
    }

    #[test]
    fn signing_is_deterministic() {
        let tx = sample_tx(PUBLIC);
        let a = sign_transaction(&tx, &account(), &PlaintextKeys).unwrap();
        let b = sign_transaction(&tx, &account(), &PlaintextKeys).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn signing_does_not_mutate_the_transaction() {
        let tx = sample_tx(PUBLIC);
        let before = tx.clone();
        sign_transaction(&tx, &account(), &PlaintextKeys).unwrap();
        assert_eq!(tx, before);
    }

    #[test]
    fn rejects_foreign_signer() {
        let tx = sample_tx(OTHER_PUBLIC);
        assert!(matches!(
            sign_transaction(&tx, &account(), &PlaintextKeys),
            Err(TransactionError::SignerMismatch)
        ));
    }

    #[test]
    fn rejects_mismatched_private_key() {
        let tx = sample_tx(PUBLIC);
        let wrong = Account::from_hex(PUBLIC, OTHER_PRIVATE).unwrap();
        assert!(matches!(
            sign_transaction(&tx, &wrong, &PlaintextKeys),
            Err(TransactionError::Account(AccountError::Key(KeyError::KeypairMismatch)))
        ));
    }

    #[test]
    fn key_store_failure_is_fatal() {
        let tx = sample_tx(PUBLIC);
        let locked = |_: &str| -> Result<Zeroizing<String>, KeyStoreError> {
            Err(KeyStoreError::Locked)
        };
        assert!(matches!(
            sign_transaction(&tx, &account(), &locked),
            Err(TransactionError::Account(AccountError::KeyStore(KeyStoreError::Locked)))
        ));
    }

    #[test]
    fn tampered_envelope_fails_verification() {
        let tx = sample_tx(PUBLIC);
        let mut announce = sign_transaction(&tx, &account(), &PlaintextKeys).unwrap();
        // Bump the amount's low byte (60-byte common part + 44-byte recipient).
        let mut data = hex::decode(&announce.data).unwrap();
        data[104] ^= 0x01;
        announce.data = hex::encode(data);

        assert!(matches!(
            announce.verify(),
            Err(TransactionError::Signature(SignatureError::VerificationFailed))
        ));
    }

    #[test]
    fn sign_bytes_matches_verify_signature() {
        let sig = sign_bytes(b"arbitrary", &account(), &PlaintextKeys).unwrap();
        let pk = NemPublicKey::from_hex(PUBLIC).unwrap();
        assert!(verify_signature(&pk, b"arbitrary", &sig).is_ok());
        assert!(verify_signature(&pk, b"arbitrarY", &sig).is_err());
    }
}
