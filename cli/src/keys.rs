//! Signing key handling for the binary.
//!
//! The key arrives as hex in the environment. The binary treats that hex as
//! the "encrypted" key of an [`Account`] whose key store is
//! [`PlaintextKeys`], so it flows through the same decrypt-on-demand path a
//! wallet uses.

use anyhow::{Context, Result};
use zeroize::Zeroizing;

use nem_protocol::account::{Account, PlaintextKeys};
use nem_protocol::crypto::keys::{normalize_private_key, NemKeypair};

/// The caller's account, unlocked through [`PlaintextKeys`].
#[derive(Debug)]
pub struct Signer {
    pub account: Account,
    pub keys: PlaintextKeys,
}

impl Signer {
    /// Validates the key, derives its public key and wraps both as an account.
    pub fn from_env_key(private_key: &str) -> Result<Self> {
        let normalized = Zeroizing::new(normalize_private_key(private_key).to_owned());
        let keypair = NemKeypair::from_private_key_hex(&normalized)
            .context("NEM_PRIVATE_KEY is not a valid private key")?;
        let account = Account::new(*keypair.public_key(), normalized.as_str());
        Ok(Self {
            account,
            keys: PlaintextKeys,
        })
    }

    pub fn public_key_hex(&self) -> String {
        self.account.public_key().to_hex()
    }

    pub fn encrypted_private_key(&self) -> &str {
        self.account.encrypted_private_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIVATE: &str = "575dbb3062267eff57c970a336ebbc8fbcfe12c5bd3ed7bc11eb0481d7704ced";
    const PUBLIC: &str = "c5f54ba980fcbb657dbaaa42700539b207873e134d2375efeab5f1ab52f87844";

    #[test]
    fn derives_account_from_key() {
        let signer = Signer::from_env_key(PRIVATE).unwrap();
        assert_eq!(signer.public_key_hex(), PUBLIC);
        assert!(signer.account.unlock(&signer.keys).is_ok());
    }

    #[test]
    fn accepts_prefixed_key() {
        let signer = Signer::from_env_key(&format!("00{PRIVATE}")).unwrap();
        assert_eq!(signer.public_key_hex(), PUBLIC);
        assert_eq!(signer.encrypted_private_key(), PRIVATE);
    }

    #[test]
    fn rejects_garbage_without_echoing_it() {
        let err = Signer::from_env_key("not-a-key-at-all").unwrap_err();
        assert!(!format!("{err:#}").contains("not-a-key-at-all"));
    }
}
