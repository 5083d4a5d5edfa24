//! Wallet identity and message signing

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use sp_core::sr25519;
use sp_core::Pair as _;
use tracing::debug;

use crate::error::WalletError;

/// A connected wallet: an address, the chain it sits on, and the ability to
/// sign an arbitrary message. Signing is async because a real wallet blocks
/// on user approval.
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Lowercase `0x`-prefixed hex address.
    fn address(&self) -> String;

    fn chain_id(&self) -> u64;

    async fn sign_message(&self, message: &str) -> Result<Vec<u8>, WalletError>;
}

/// Wallet backed by a local sr25519 keypair. Signs without prompting, so it
/// never reports [`WalletError::Rejected`].
pub struct LocalWallet {
    pair: sr25519::Pair,
    address: String,
    chain_id: u64,
}

impl LocalWallet {
    /// Build from a secret seed string (hex seed or derivation phrase).
    pub fn from_seed(seed: &str, chain_id: u64) -> Result<Self, WalletError> {
        let pair = sr25519::Pair::from_string(seed, None)
            .map_err(|e| WalletError::Other(format!("invalid wallet seed: {:?}", e)))?;
        let address = derive_address(&pair.public());
        Ok(Self {
            pair,
            address,
            chain_id,
        })
    }

    pub fn public(&self) -> sr25519::Public {
        self.pair.public()
    }
}

#[async_trait]
impl Wallet for LocalWallet {
    fn address(&self) -> String {
        self.address.clone()
    }

    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    async fn sign_message(&self, message: &str) -> Result<Vec<u8>, WalletError> {
        Ok(AsRef::<[u8]>::as_ref(&self.pair.sign(message.as_bytes())).to_vec())
    }
}

/// Display address: last 20 bytes of the SHA-256 of the public key, as
/// lowercase hex. Ownership checks compare addresses case-insensitively.
fn derive_address(public: &sr25519::Public) -> String {
    let raw: &[u8] = public.as_ref();
    let digest = Sha256::digest(raw);
    format!("0x{}", hex::encode(&digest[12..]))
}

/// Verify an sr25519 signature over a message.
pub fn verify_signature(public: &sr25519::Public, message: &str, signature: &[u8]) -> bool {
    if signature.len() != 64 {
        debug!(
            "invalid signature length: {} (expected 64)",
            signature.len()
        );
        return false;
    }
    let mut raw = [0u8; 64];
    raw.copy_from_slice(signature);
    let signature = sr25519::Signature::from_raw(raw);
    sr25519::Pair::verify(&signature, message.as_bytes(), public)
}
