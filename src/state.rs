//! View state container
//!
//! Explicit store with pure transitions, replacing scattered mutable UI
//! state: the view dispatches [`Action`]s and reads back through selectors.

use serde::Serialize;

use crate::bounty::{Bounty, BountyStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Open,
    Completed,
}

impl StatusFilter {
    fn matches(self, status: BountyStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Open => status == BountyStatus::Open,
            StatusFilter::Completed => status == BountyStatus::Completed,
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "open" => Ok(StatusFilter::Open),
            "completed" => Ok(StatusFilter::Completed),
            other => Err(format!("unknown filter: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxPhase {
    Pending,
    Success,
    Error,
}

/// Transient status banner for an in-flight or just-finished transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxStatus {
    pub phase: TxPhase,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardStats {
    pub total: usize,
    pub open: usize,
    pub completed: usize,
    pub expired: usize,
}

#[derive(Debug, Clone)]
pub enum Action {
    BountiesLoaded(Vec<Bounty>),
    SearchChanged(String),
    TabChanged(StatusFilter),
    Selected(String),
    SelectionCleared,
    Revealed(String),
    TxStarted(String),
    TxSucceeded(String),
    TxFailed(String),
    TxCleared,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub bounties: Vec<Bounty>,
    pub search: String,
    pub tab: StatusFilter,
    pub selected: Option<String>,
    /// Description revealed for the currently selected bounty, if any.
    pub revealed: Option<String>,
    pub tx: Option<TxStatus>,
}

impl AppState {
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::BountiesLoaded(bounties) => self.bounties = bounties,
            Action::SearchChanged(search) => self.search = search,
            Action::TabChanged(tab) => self.tab = tab,
            Action::Selected(id) => {
                self.selected = Some(id);
                self.revealed = None;
            }
            Action::SelectionCleared => {
                self.selected = None;
                self.revealed = None;
            }
            Action::Revealed(text) => self.revealed = Some(text),
            Action::TxStarted(message) => {
                self.tx = Some(TxStatus {
                    phase: TxPhase::Pending,
                    message,
                })
            }
            Action::TxSucceeded(message) => {
                self.tx = Some(TxStatus {
                    phase: TxPhase::Success,
                    message,
                })
            }
            Action::TxFailed(message) => {
                self.tx = Some(TxStatus {
                    phase: TxPhase::Error,
                    message,
                })
            }
            Action::TxCleared => self.tx = None,
        }
    }

    /// Bounties matching the active tab and the case-insensitive search term
    /// (over title and creator), in list order.
    pub fn filtered(&self) -> Vec<&Bounty> {
        let needle = self.search.to_lowercase();
        self.bounties
            .iter()
            .filter(|b| {
                let matches_search = needle.is_empty()
                    || b.title.to_lowercase().contains(&needle)
                    || b.creator.to_lowercase().contains(&needle);
                matches_search && self.tab.matches(b.status)
            })
            .collect()
    }

    pub fn selected_bounty(&self) -> Option<&Bounty> {
        let id = self.selected.as_deref()?;
        self.bounties.iter().find(|b| b.id == id)
    }

    pub fn stats(&self) -> BoardStats {
        let count = |status| self.bounties.iter().filter(|b| b.status == status).count();
        BoardStats {
            total: self.bounties.len(),
            open: count(BountyStatus::Open),
            completed: count(BountyStatus::Completed),
            expired: count(BountyStatus::Expired),
        }
    }
}
