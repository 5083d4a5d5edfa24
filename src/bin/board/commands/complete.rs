//! Complete command - flip one of your bounties to completed

use anyhow::Result;

use bounty_board::{BoardError, Config};

use crate::style::*;

pub async fn run(config: &Config, id: &str) -> Result<()> {
    let ctx = super::connect(config).await?;

    let pb = spinner("Processing bounty completion...");
    let result = ctx.board.complete(id).await;
    pb.finish_and_clear();

    match result {
        Ok(()) => {
            print_success("Bounty marked as completed!");
            Ok(())
        }
        Err(BoardError::NotFound(id)) => {
            print_error(&format!("Bounty not found: {}", id));
            Ok(())
        }
        Err(BoardError::NotCreator) => {
            print_error("Only the bounty creator may complete it");
            Ok(())
        }
        Err(BoardError::Rejected) => {
            print_error("Transaction rejected by user");
            Ok(())
        }
        Err(e) => Err(anyhow::Error::new(e).context("Completion failed")),
    }
}
