//! Bounty record types and storage keys

use std::fmt;

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::codec::decode_reward;

/// Storage key holding the JSON array of bounty ids.
pub const INDEX_KEY: &str = "bounty_keys";

const RECORD_KEY_PREFIX: &str = "bounty_";

/// Storage key for a single bounty record.
pub fn record_key(id: &str) -> String {
    format!("{}{}", RECORD_KEY_PREFIX, id)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BountyStatus {
    #[default]
    Open,
    Completed,
    /// Representable on the wire but never assigned by this client.
    Expired,
}

impl fmt::Display for BountyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BountyStatus::Open => write!(f, "open"),
            BountyStatus::Completed => write!(f, "completed"),
            BountyStatus::Expired => write!(f, "expired"),
        }
    }
}

/// Wire form of a bounty as stored under `bounty_<id>`. The id itself lives
/// in the storage key, not the record. Field names are fixed by the existing
/// on-chain data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BountyRecord {
    pub title: String,
    /// Encoded via [`crate::codec::encode_reward`].
    pub reward: String,
    pub description: String,
    /// Creation time in unix seconds, set by the creating client's clock.
    pub timestamp: i64,
    /// Creator wallet address; ownership checks compare it lowercased.
    pub creator: String,
    #[serde(default)]
    pub status: BountyStatus,
    #[serde(default)]
    pub submissions_count: u32,
}

/// A bounty as held in the in-memory list: the stored record plus the id
/// recovered from the index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bounty {
    pub id: String,
    pub title: String,
    pub reward: String,
    pub encrypted_description: String,
    pub timestamp: i64,
    pub creator: String,
    pub status: BountyStatus,
    pub submissions_count: u32,
}

impl Bounty {
    pub fn from_record(id: String, record: BountyRecord) -> Self {
        Self {
            id,
            title: record.title,
            reward: record.reward,
            encrypted_description: record.description,
            timestamp: record.timestamp,
            creator: record.creator,
            status: record.status,
            submissions_count: record.submissions_count,
        }
    }

    /// Decoded reward amount; NaN when the stored text is malformed.
    pub fn reward_value(&self) -> f64 {
        decode_reward(&self.reward)
    }

    pub fn is_creator(&self, address: &str) -> bool {
        self.creator.eq_ignore_ascii_case(address)
    }
}

/// Generate a bounty id from the current time plus a short random suffix.
/// Not globally unique, but collisions are negligible for this workload.
pub fn generate_bounty_id() -> String {
    const ALPHANUM: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..4)
        .map(|_| ALPHANUM[rng.gen_range(0..ALPHANUM.len())] as char)
        .collect();
    format!("bounty-{}-{}", Utc::now().timestamp_millis(), suffix)
}
