//! CLI commands

pub mod complete;
pub mod create;
pub mod list;
pub mod reveal;
pub mod stats;

use std::sync::Arc;

use anyhow::Result;

use bounty_board::{
    BountyBoard, BridgeGateway, Config, Gateway, LocalWallet, SessionParams, SignerGateway, Wallet,
};

/// Everything a command needs: the board, the session signature parameters
/// and the optional wallet identity.
pub struct Context {
    pub board: BountyBoard,
    pub session: SessionParams,
    pub wallet: Option<Arc<dyn Wallet>>,
}

pub async fn connect(config: &Config) -> Result<Context> {
    let gateway: Arc<dyn SignerGateway> = Arc::new(BridgeGateway::new(&config.gateway_url()));

    let wallet: Option<Arc<dyn Wallet>> = match config.wallet_seed() {
        Some(seed) => Some(Arc::new(LocalWallet::from_seed(
            &seed,
            config.gateway.chain_id,
        )?)),
        None => None,
    };

    // Session params are regenerated on every invocation, matching a fresh
    // application load.
    let contract_address = gateway.address().await.unwrap_or_default();
    let session = SessionParams::new(
        contract_address,
        config.gateway.chain_id,
        config.session.duration_days,
    );

    let board = BountyBoard::new(gateway, wallet.clone());
    Ok(Context {
        board,
        session,
        wallet,
    })
}
