//! Bounty store sync and mutations
//!
//! `BountyBoard` owns the in-memory bounty list. The list is rebuilt from
//! the gateway on every sync and replaced wholesale; readers never observe a
//! partially built list. After any successful mutation the board re-syncs
//! instead of patching locally, so the view always reflects
//! gateway-confirmed state at the cost of an extra round trip.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::{info, warn};

use crate::bounty::{generate_bounty_id, record_key, Bounty, BountyRecord, BountyStatus, INDEX_KEY};
use crate::codec::encode_reward;
use crate::error::{BoardError, GatewayError};
use crate::gateway::SignerGateway;
use crate::wallet::Wallet;

/// Attempts before an index append gives up under contention.
const INDEX_CAS_RETRIES: usize = 8;

pub struct BountyBoard {
    gateway: Arc<dyn SignerGateway>,
    wallet: Option<Arc<dyn Wallet>>,
    bounties: RwLock<Vec<Bounty>>,
}

impl BountyBoard {
    pub fn new(gateway: Arc<dyn SignerGateway>, wallet: Option<Arc<dyn Wallet>>) -> Self {
        Self {
            gateway,
            wallet,
            bounties: RwLock::new(Vec::new()),
        }
    }

    /// Snapshot of the current list, newest first.
    pub fn bounties(&self) -> Vec<Bounty> {
        self.bounties.read().clone()
    }

    pub fn wallet_address(&self) -> Option<String> {
        self.wallet.as_ref().map(|w| w.address())
    }

    fn wallet(&self) -> Result<&Arc<dyn Wallet>, BoardError> {
        self.wallet.as_ref().ok_or(BoardError::Unauthenticated)
    }

    /// Rebuild the list from the gateway. Returns whether the list was
    /// replaced; an unavailable or failing gateway aborts silently and keeps
    /// the previous list, reporting the reason to the operator only.
    pub async fn sync(&self) -> bool {
        match self.gateway.is_available().await {
            Ok(true) => {}
            Ok(false) => {
                warn!("gateway reports unavailable, keeping previous bounty list");
                return false;
            }
            Err(e) => {
                warn!("gateway availability check failed: {}", e);
                return false;
            }
        }

        let ids = self.load_index().await;
        let mut list = Vec::with_capacity(ids.len());
        for id in &ids {
            if let Some(bounty) = self.load_record(id).await {
                list.push(bounty);
            }
        }
        list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        *self.bounties.write() = list;
        true
    }

    /// Fetch and parse the key index. Missing or unparsable data resolves to
    /// an empty set; it never faults the sync.
    async fn load_index(&self) -> Vec<String> {
        let bytes = match self.gateway.get_data(INDEX_KEY).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("failed to fetch bounty index: {}", e);
                return Vec::new();
            }
        };
        parse_index(&bytes).unwrap_or_else(|e| {
            warn!("unparsable bounty index, treating as empty: {}", e);
            Vec::new()
        })
    }

    /// Fetch and parse one record. Missing or unparsable entries are skipped
    /// individually so one bad record cannot abort the whole sync.
    async fn load_record(&self, id: &str) -> Option<Bounty> {
        let bytes = match self.gateway.get_data(&record_key(id)).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("failed to fetch bounty {}: {}", id, e);
                return None;
            }
        };
        if bytes.is_empty() {
            warn!("bounty {} is indexed but has no record, skipping", id);
            return None;
        }
        match serde_json::from_slice::<BountyRecord>(&bytes) {
            Ok(record) => Some(Bounty::from_record(id.to_string(), record)),
            Err(e) => {
                warn!("unparsable record for bounty {}, skipping: {}", id, e);
                None
            }
        }
    }

    /// Create a bounty and append its id to the key index. Returns the new
    /// bounty id. The record is written first; a crash between the two
    /// writes leaves an unreachable record, never a dangling index entry.
    pub async fn create(
        &self,
        title: &str,
        reward: f64,
        description: &str,
    ) -> Result<String, BoardError> {
        let wallet = self.wallet()?;

        let id = generate_bounty_id();
        let record = BountyRecord {
            title: title.to_string(),
            reward: encode_reward(reward),
            description: description.to_string(),
            timestamp: Utc::now().timestamp(),
            creator: wallet.address(),
            status: BountyStatus::Open,
            submissions_count: 0,
        };
        let bytes = serde_json::to_vec(&record)?;

        self.gateway
            .set_data(&record_key(&id), &bytes)
            .await
            .map_err(map_write_err)?;
        self.append_to_index(&id).await?;

        info!("created bounty {} by {}", id, record.creator);
        self.sync().await;
        Ok(id)
    }

    /// Append an id to the key index with compare-and-set, retrying when a
    /// concurrent creator wins the race.
    async fn append_to_index(&self, id: &str) -> Result<(), BoardError> {
        for _ in 0..INDEX_CAS_RETRIES {
            let current = self
                .gateway
                .get_data(INDEX_KEY)
                .await
                .map_err(BoardError::Gateway)?;
            let mut ids = parse_index(&current).unwrap_or_else(|e| {
                warn!("unparsable bounty index during append, rebuilding: {}", e);
                Vec::new()
            });
            ids.push(id.to_string());
            let next = serde_json::to_vec(&ids)?;

            if self
                .gateway
                .compare_and_set(INDEX_KEY, &current, &next)
                .await
                .map_err(map_write_err)?
            {
                return Ok(());
            }
            // lost the race, re-read and try again
        }
        Err(BoardError::IndexContention)
    }

    /// Flip a bounty to completed. Only the creator may do this; every other
    /// stored field is preserved byte-for-byte, including fields this client
    /// does not know about.
    pub async fn complete(&self, id: &str) -> Result<(), BoardError> {
        let wallet = self.wallet()?;

        let key = record_key(id);
        let bytes = self
            .gateway
            .get_data(&key)
            .await
            .map_err(BoardError::Gateway)?;
        if bytes.is_empty() {
            return Err(BoardError::NotFound(id.to_string()));
        }

        let mut value: Value = serde_json::from_slice(&bytes)?;
        let record = value
            .as_object_mut()
            .ok_or_else(|| BoardError::Malformed(format!("bounty {} is not an object", id)))?;

        let creator = record
            .get("creator")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if !creator.eq_ignore_ascii_case(&wallet.address()) {
            return Err(BoardError::NotCreator);
        }

        record.insert("status".to_string(), Value::from("completed"));
        let next = serde_json::to_vec(&value)?;
        self.gateway
            .set_data(&key, &next)
            .await
            .map_err(map_write_err)?;

        info!("bounty {} marked completed", id);
        self.sync().await;
        Ok(())
    }
}

fn parse_index(bytes: &[u8]) -> Result<Vec<String>, serde_json::Error> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    // whitespace-only index bytes count as empty, not malformed
    if std::str::from_utf8(bytes)
        .map(|s| s.trim().is_empty())
        .unwrap_or(false)
    {
        return Ok(Vec::new());
    }
    serde_json::from_slice(bytes)
}

/// A declined transaction gets its own user-facing condition; anything else
/// keeps the gateway's reason text.
fn map_write_err(e: GatewayError) -> BoardError {
    match e {
        GatewayError::Rejected => BoardError::Rejected,
        other => BoardError::Gateway(other),
    }
}
