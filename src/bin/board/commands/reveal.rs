//! Reveal command - show a description behind the signature gate

use anyhow::Result;

use bounty_board::{reveal, Config};

use crate::style::*;

pub async fn run(config: &Config, id: &str) -> Result<()> {
    let ctx = super::connect(config).await?;

    let pb = spinner("Refreshing bounties...");
    ctx.board.sync().await;
    pb.finish_and_clear();

    let bounty = match ctx.board.bounties().into_iter().find(|b| b.id == id) {
        Some(bounty) => bounty,
        None => {
            print_error(&format!("Bounty not found: {}", id));
            return Ok(());
        }
    };

    let revealed = reveal(
        ctx.wallet.as_deref(),
        &ctx.session,
        &bounty.encrypted_description,
    )
    .await?;

    match revealed {
        Some(description) => {
            print_header(&bounty.title);
            println!("{}", description);
            Ok(())
        }
        None => {
            print_warning("Signature declined, description stays hidden");
            Ok(())
        }
    }
}
