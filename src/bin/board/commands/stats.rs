//! Stats command - board-wide counters

use anyhow::Result;

use bounty_board::{Action, AppState, Config};

use crate::style::*;

pub async fn run(config: &Config, json: bool) -> Result<()> {
    let ctx = super::connect(config).await?;

    let pb = spinner("Refreshing bounties...");
    let refreshed = ctx.board.sync().await;
    pb.finish_and_clear();

    if !refreshed {
        print_warning("Gateway unavailable");
        return Ok(());
    }

    let mut state = AppState::default();
    state.apply(Action::BountiesLoaded(ctx.board.bounties()));
    let stats = state.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    print_header("Bounty Statistics");
    println!("Total Bounties:  {}", style_bold(&stats.total.to_string()));
    println!("Open:            {}", stats.open);
    println!("Completed:       {}", stats.completed);
    println!("Expired:         {}", stats.expired);

    if let Some(address) = ctx.board.wallet_address() {
        println!();
        println!("Wallet:          {}", truncate_address(&address));
    }

    Ok(())
}
