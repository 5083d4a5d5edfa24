//! Terminal styling utilities

use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use bounty_board::BountyStatus;

pub fn style_bold(s: &str) -> String {
    s.bold().to_string()
}

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

pub fn print_warning(msg: &str) {
    println!("{} {}", "⚠".yellow(), msg);
}

pub fn print_header(title: &str) {
    println!();
    println!("{}", style_bold(title));
    println!("{}", "─".repeat(title.len()));
}

/// Colored status badge for list rows and detail views.
pub fn status_badge(status: BountyStatus) -> String {
    match status {
        BountyStatus::Open => "open".green().to_string(),
        BountyStatus::Completed => "completed".dimmed().to_string(),
        BountyStatus::Expired => "expired".yellow().to_string(),
    }
}

/// Safely truncate an address for display, showing first 8 and last 4
/// characters. Returns the full string if it's shorter than 12 characters.
/// Counts chars, not bytes; stored creators are attacker-written and need
/// not be ASCII.
pub fn truncate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() >= 12 {
        let head: String = chars[..8].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        address.to_string()
    }
}

/// Spinner shown while a sync or transaction is in flight.
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner());
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
