//! Bounty Board - browse, create and complete bounties on a key/value contract
//!
//! All persistence is delegated to a generic contract exposing
//! `getData`/`setData`; records are JSON blobs under fixed keys and the list
//! of ids lives under a single index key. Reward amounts are stored through
//! a reversible tagged codec and descriptions sit behind a wallet-signature
//! gate before they are shown.
//!
//! # How it works
//!
//! 1. `sync` reads the `bounty_keys` index, fetches each `bounty_<id>`
//!    record, skips anything malformed and rebuilds the in-memory list
//! 2. `create` writes a new record, then appends its id to the index with
//!    compare-and-set so concurrent creators cannot drop each other
//! 3. `complete` flips a bounty's status; only the creator may do it
//! 4. `reveal` signs a session challenge with the wallet before returning
//!    the description (an authorization prompt, not real decryption)
//!
//! The in-memory list is replaced wholesale on every sync; after any
//! mutation the board re-syncs rather than patching locally.

pub mod board;
pub mod bounty;
pub mod bridge;
pub mod codec;
pub mod config;
pub mod error;
pub mod gateway;
pub mod reveal;
pub mod session;
pub mod state;
pub mod wallet;

pub use board::BountyBoard;
pub use bounty::{generate_bounty_id, record_key, Bounty, BountyRecord, BountyStatus, INDEX_KEY};
pub use bridge::BridgeGateway;
pub use codec::{decode_reward, encode_reward};
pub use config::Config;
pub use error::{BoardError, GatewayError, WalletError};
pub use gateway::{Gateway, MemoryGateway, SignerGateway, TxReceipt};
pub use reveal::reveal;
pub use session::{generate_public_key, SessionParams};
pub use state::{Action, AppState, BoardStats, StatusFilter};
pub use wallet::{verify_signature, LocalWallet, Wallet};
