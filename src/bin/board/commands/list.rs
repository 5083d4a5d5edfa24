//! List command - browse the bounty board

use anyhow::Result;

use bounty_board::{Action, AppState, Config, StatusFilter};

use crate::style::*;

pub async fn run(config: &Config, tab: &str, search: Option<String>, json: bool) -> Result<()> {
    let tab: StatusFilter = tab.parse().map_err(anyhow::Error::msg)?;

    let ctx = super::connect(config).await?;

    let pb = spinner("Refreshing bounties...");
    let refreshed = ctx.board.sync().await;
    pb.finish_and_clear();

    if !refreshed {
        print_warning("Gateway unavailable, showing nothing");
        return Ok(());
    }

    let mut state = AppState::default();
    state.apply(Action::BountiesLoaded(ctx.board.bounties()));
    state.apply(Action::TabChanged(tab));
    if let Some(search) = search {
        state.apply(Action::SearchChanged(search));
    }

    let filtered = state.filtered();
    if json {
        println!("{}", serde_json::to_string_pretty(&filtered)?);
        return Ok(());
    }

    print_header("Bounties");

    if filtered.is_empty() {
        println!("No bounties found");
        return Ok(());
    }

    for bounty in filtered {
        let reward = bounty.reward_value();
        let reward = if reward.is_nan() {
            "?".to_string()
        } else {
            format!("{} ETH", reward)
        };
        println!(
            "{}  [{}]  {}  {}  {}",
            bounty.id,
            status_badge(bounty.status),
            style_bold(&bounty.title),
            reward,
            truncate_address(&bounty.creator),
        );
    }

    Ok(())
}
