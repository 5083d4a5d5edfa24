//! Contract gateway abstraction
//!
//! All persistence goes through a generic key/value contract exposing
//! `getData`/`setData`. The read side and the signer-bound write side are
//! separate traits, mirroring the read-only and signer contract handles.
//!
//! Index updates use `compare_and_set` rather than read-then-overwrite so
//! two concurrent creators cannot silently drop each other's entry.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Receipt returned by a confirmed write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxReceipt {
    pub tx_hash: String,
}

/// Read-only contract handle.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn is_available(&self) -> GatewayResult<bool>;

    /// Fetch the raw bytes stored under `key`; an empty vec means the key
    /// has never been written.
    async fn get_data(&self, key: &str) -> GatewayResult<Vec<u8>>;

    async fn address(&self) -> GatewayResult<String>;
}

/// Signer-bound contract handle.
#[async_trait]
pub trait SignerGateway: Gateway {
    async fn set_data(&self, key: &str, value: &[u8]) -> GatewayResult<TxReceipt>;

    /// Replace `key` only if its current value equals `expected` (empty
    /// slice for a never-written key). Returns false when the value changed
    /// underneath the caller.
    async fn compare_and_set(
        &self,
        key: &str,
        expected: &[u8],
        value: &[u8],
    ) -> GatewayResult<bool>;
}

/// In-process gateway over a plain map. Used by tests and local development;
/// the availability and rejection toggles stand in for chain conditions.
pub struct MemoryGateway {
    data: Mutex<HashMap<String, Vec<u8>>>,
    available: AtomicBool,
    reject_writes: AtomicBool,
    nonce: AtomicU64,
    address: String,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self {
            data: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
            reject_writes: AtomicBool::new(false),
            nonce: AtomicU64::new(0),
            address: "0x00000000000000000000000000000000deadbeef".to_string(),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Make every subsequent write fail as if the user declined it.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    /// Write a value directly, bypassing availability and rejection toggles.
    /// Test seeding only.
    pub fn seed(&self, key: &str, value: &[u8]) {
        self.data.lock().insert(key.to_string(), value.to_vec());
    }

    fn check_writable(&self) -> GatewayResult<()> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable);
        }
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(GatewayError::Rejected);
        }
        Ok(())
    }

    fn receipt(&self) -> TxReceipt {
        let nonce = self.nonce.fetch_add(1, Ordering::SeqCst);
        TxReceipt {
            tx_hash: format!("0x{:064x}", nonce),
        }
    }
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn is_available(&self) -> GatewayResult<bool> {
        Ok(self.available.load(Ordering::SeqCst))
    }

    async fn get_data(&self, key: &str) -> GatewayResult<Vec<u8>> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable);
        }
        Ok(self.data.lock().get(key).cloned().unwrap_or_default())
    }

    async fn address(&self) -> GatewayResult<String> {
        Ok(self.address.clone())
    }
}

#[async_trait]
impl SignerGateway for MemoryGateway {
    async fn set_data(&self, key: &str, value: &[u8]) -> GatewayResult<TxReceipt> {
        self.check_writable()?;
        self.data.lock().insert(key.to_string(), value.to_vec());
        Ok(self.receipt())
    }

    async fn compare_and_set(
        &self,
        key: &str,
        expected: &[u8],
        value: &[u8],
    ) -> GatewayResult<bool> {
        self.check_writable()?;
        let mut data = self.data.lock();
        let current = data.get(key).map(Vec::as_slice).unwrap_or_default();
        if current != expected {
            return Ok(false);
        }
        data.insert(key.to_string(), value.to_vec());
        Ok(true)
    }
}
