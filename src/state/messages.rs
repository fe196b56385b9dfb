use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use nba_api::{PlayerProfile, PlayerSummary};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    SearchPlayers { query: String, seq: u64 },
    LoadProfile { player: PlayerSummary },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    /// `seq` echoes the request so stale results can be dropped.
    SearchResults { query: String, seq: u64, players: Vec<PlayerSummary> },
    ProfileLoaded { profile: Box<PlayerProfile> },
}

/// One edit of the search box, numbered in the order it was typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEdit {
    pub seq: u64,
    pub query: String,
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
