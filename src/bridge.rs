//! Contract bridge API client
//!
//! Talks to an HTTP bridge sitting in front of the key/value contract. The
//! bridge holds the signer; a write it relays that the user declines comes
//! back as HTTP 403 and surfaces as [`GatewayError::Rejected`].
//!
//! All requests go through /api/v1/contract/...

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;
use crate::gateway::{Gateway, GatewayResult, SignerGateway, TxReceipt};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct AvailableResponse {
    available: bool,
}

#[derive(Debug, Deserialize)]
struct AddressResponse {
    address: String,
}

#[derive(Debug, Deserialize)]
struct DataResponse {
    /// Hex-encoded value; empty string for a never-written key.
    #[serde(default)]
    value: String,
}

#[derive(Debug, Serialize)]
struct SetDataRequest<'a> {
    key: &'a str,
    value: String,
}

#[derive(Debug, Deserialize)]
struct SetDataResponse {
    tx_hash: String,
}

#[derive(Debug, Serialize)]
struct CasRequest<'a> {
    key: &'a str,
    expected: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct CasResponse {
    swapped: bool,
}

/// Gateway implementation over the contract bridge HTTP API.
pub struct BridgeGateway {
    client: Client,
    base_url: String,
}

impl BridgeGateway {
    pub fn new(base_url: &str) -> Self {
        // Build HTTP client with timeout, falling back to default client if builder fails
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn contract_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/api/v1/contract/{}", self.base_url, path)
    }

    async fn fail(resp: reqwest::Response, what: &str) -> GatewayError {
        let status = resp.status();
        let error_text = resp.text().await.unwrap_or_else(|_| "Unknown error".into());
        GatewayError::Request(format!("{} failed ({}): {}", what, status, error_text))
    }
}

#[async_trait]
impl Gateway for BridgeGateway {
    async fn is_available(&self) -> GatewayResult<bool> {
        let url = self.contract_url("available");
        let resp = self.client.get(&url).send().await?;

        if resp.status().is_success() {
            let data: AvailableResponse = resp.json().await?;
            Ok(data.available)
        } else {
            Err(Self::fail(resp, "availability check").await)
        }
    }

    async fn get_data(&self, key: &str) -> GatewayResult<Vec<u8>> {
        let url = self.contract_url(&format!("data/{}", key));
        let resp = self.client.get(&url).send().await?;

        if resp.status().is_success() {
            let data: DataResponse = resp.json().await?;
            hex::decode(data.value.trim_start_matches("0x"))
                .map_err(|e| GatewayError::Request(format!("invalid value hex: {}", e)))
        } else {
            Err(Self::fail(resp, "getData").await)
        }
    }

    async fn address(&self) -> GatewayResult<String> {
        let url = self.contract_url("address");
        let resp = self.client.get(&url).send().await?;

        if resp.status().is_success() {
            let data: AddressResponse = resp.json().await?;
            Ok(data.address)
        } else {
            Err(Self::fail(resp, "address lookup").await)
        }
    }
}

#[async_trait]
impl SignerGateway for BridgeGateway {
    async fn set_data(&self, key: &str, value: &[u8]) -> GatewayResult<TxReceipt> {
        let url = self.contract_url("data");
        let request = SetDataRequest {
            key,
            value: hex::encode(value),
        };
        let resp = self.client.post(&url).json(&request).send().await?;

        match resp.status() {
            status if status.is_success() => {
                let data: SetDataResponse = resp.json().await?;
                Ok(TxReceipt {
                    tx_hash: data.tx_hash,
                })
            }
            StatusCode::FORBIDDEN => Err(GatewayError::Rejected),
            StatusCode::SERVICE_UNAVAILABLE => Err(GatewayError::Unavailable),
            _ => Err(Self::fail(resp, "setData").await),
        }
    }

    async fn compare_and_set(
        &self,
        key: &str,
        expected: &[u8],
        value: &[u8],
    ) -> GatewayResult<bool> {
        let url = self.contract_url("data/cas");
        let request = CasRequest {
            key,
            expected: hex::encode(expected),
            value: hex::encode(value),
        };
        let resp = self.client.post(&url).json(&request).send().await?;

        match resp.status() {
            status if status.is_success() => {
                let data: CasResponse = resp.json().await?;
                Ok(data.swapped)
            }
            StatusCode::FORBIDDEN => Err(GatewayError::Rejected),
            StatusCode::SERVICE_UNAVAILABLE => Err(GatewayError::Unavailable),
            _ => Err(Self::fail(resp, "compareAndSet").await),
        }
    }
}
