//! Create command - post a new bounty

use anyhow::Result;
use dialoguer::Input;

use bounty_board::{encode_reward, BoardError, Config};

use crate::style::*;

pub async fn run(
    config: &Config,
    title: Option<String>,
    reward: Option<f64>,
    description: Option<String>,
) -> Result<()> {
    let ctx = super::connect(config).await?;

    if ctx.wallet.is_none() {
        print_warning("No wallet configured. Set WALLET_SEED or [wallet].seed to create bounties.");
        return Ok(());
    }

    let title = match title {
        Some(title) => title,
        None => Input::new().with_prompt("Title").interact_text()?,
    };
    let reward: f64 = match reward {
        Some(reward) => reward,
        None => Input::new().with_prompt("Reward (ETH)").interact_text()?,
    };
    let description = match description {
        Some(description) => description,
        None => Input::new().with_prompt("Description").interact_text()?,
    };

    let encoded = encode_reward(reward);
    let preview: String = encoded.chars().take(50).collect();
    println!("Reward encoding: {} -> {}...", reward, preview);

    let pb = spinner("Submitting bounty...");
    let result = ctx.board.create(&title, reward, &description).await;
    pb.finish_and_clear();

    match result {
        Ok(id) => {
            print_success(&format!("Bounty created: {}", id));
            Ok(())
        }
        Err(BoardError::Rejected) => {
            print_error("Transaction rejected by user");
            Ok(())
        }
        Err(e) => Err(anyhow::Error::new(e).context("Creation failed")),
    }
}
