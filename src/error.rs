//! Error taxonomy
//!
//! Failures fall into a small set of conditions the caller is expected to
//! present distinctly: unavailable gateway, unauthenticated action, missing
//! record, user-rejected signature/transaction, and everything else carrying
//! the underlying reason text. Nothing is retried automatically.

use thiserror::Error;

/// Faults raised by a contract gateway implementation.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway unavailable")]
    Unavailable,

    /// The signing wallet declined the transaction.
    #[error("transaction rejected by user")]
    Rejected,

    #[error("gateway request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        GatewayError::Request(e.to_string())
    }
}

/// Faults raised by a wallet implementation.
#[derive(Debug, Error)]
pub enum WalletError {
    /// The user declined the signature prompt.
    #[error("signature request rejected by user")]
    Rejected,

    #[error("wallet error: {0}")]
    Other(String),
}

/// Failures surfaced by board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("please connect a wallet first")]
    Unauthenticated,

    #[error("bounty not found: {0}")]
    NotFound(String),

    #[error("only the bounty creator may complete it")]
    NotCreator,

    #[error("transaction rejected by user")]
    Rejected,

    #[error("malformed bounty record: {0}")]
    Malformed(String),

    /// The key index kept changing under us; the caller may simply re-run.
    #[error("bounty index update lost too many races")]
    IndexContention,

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
