//! Per-session signature parameters
//!
//! The reveal flow signs a challenge built from a session "public key", the
//! contract address, the chain id and a validity window. The key is a random
//! placeholder regenerated on every application start; nothing verifies the
//! challenge server-side. It exists to force a deliberate wallet prompt
//! before a description is shown.

use chrono::Utc;
use rand::Rng;

/// Hex characters in a session public key (excluding the `0x` prefix).
pub const PUBLIC_KEY_HEX_LEN: usize = 2000;

pub const DEFAULT_DURATION_DAYS: u32 = 30;

/// Generate a session-scoped placeholder public key. Not a cryptographic
/// key; must never be treated as one.
pub fn generate_public_key() -> String {
    const HEX: &[u8] = b"0123456789abcdef";
    let mut rng = rand::thread_rng();
    let body: String = (0..PUBLIC_KEY_HEX_LEN)
        .map(|_| HEX[rng.gen_range(0..HEX.len())] as char)
        .collect();
    format!("0x{}", body)
}

/// Parameters folded into the reveal challenge message.
#[derive(Debug, Clone)]
pub struct SessionParams {
    pub public_key: String,
    pub contract_address: String,
    pub chain_id: u64,
    pub start_timestamp: i64,
    pub duration_days: u32,
}

impl SessionParams {
    pub fn new(contract_address: String, chain_id: u64, duration_days: u32) -> Self {
        Self {
            public_key: generate_public_key(),
            contract_address,
            chain_id,
            start_timestamp: Utc::now().timestamp(),
            duration_days,
        }
    }

    /// Render the challenge string presented to the wallet for signing.
    pub fn challenge_message(&self) -> String {
        format!(
            "publickey:{}\ncontractAddresses:{}\ncontractsChainId:{}\nstartTimestamp:{}\ndurationDays:{}",
            self.public_key,
            self.contract_address,
            self.chain_id,
            self.start_timestamp,
            self.duration_days
        )
    }
}
