use crate::app::MenuItem;
use crate::state::messages::SearchEdit;
use nba_api::{PlayerProfile, PlayerSummary};

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SearchState {
    pub query: String,
    /// Number of the latest edit. Only results for this edit are shown.
    pub query_seq: u64,
    pub results: Vec<PlayerSummary>,
    /// The query `results` answer, once any have arrived.
    pub results_for: Option<String>,
    pub selected: usize,
}

impl SearchState {
    pub fn push_char(&mut self, c: char) -> SearchEdit {
        self.query.push(c);
        self.next_edit()
    }

    pub fn pop_char(&mut self) -> Option<SearchEdit> {
        self.query.pop()?;
        Some(self.next_edit())
    }

    pub fn clear(&mut self) -> Option<SearchEdit> {
        if self.query.is_empty() {
            return None;
        }
        self.query.clear();
        Some(self.next_edit())
    }

    fn next_edit(&mut self) -> SearchEdit {
        self.query_seq += 1;
        if self.query.trim().is_empty() {
            self.results.clear();
            self.results_for = None;
            self.selected = 0;
        }
        SearchEdit { seq: self.query_seq, query: self.query.clone() }
    }

    /// Apply results if they answer the latest edit. Returns whether they were applied.
    pub fn apply_results(&mut self, seq: u64, query: String, players: Vec<PlayerSummary>) -> bool {
        if seq != self.query_seq {
            return false;
        }
        self.results = players;
        self.results_for = Some(query);
        self.selected = 0;
        true
    }

    /// A search has been typed but its results have not arrived yet.
    pub fn is_pending(&self) -> bool {
        !self.query.trim().is_empty() && self.results_for.as_deref() != Some(self.query.as_str())
    }

    pub fn select_next(&mut self) {
        let max = self.results.len().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_player(&self) -> Option<&PlayerSummary> {
        self.results.get(self.selected)
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ProfileState {
    pub profile: Option<PlayerProfile>,
    /// Player whose profile was requested last. Older responses are ignored.
    pub requested: Option<PlayerSummary>,
    pub loaded_at: Option<String>,
}

impl ProfileState {
    pub fn request(&mut self, player: PlayerSummary) {
        self.requested = Some(player);
    }

    pub fn is_loading(&self) -> bool {
        match (&self.requested, &self.profile) {
            (Some(requested), Some(profile)) => requested.player_id != profile.summary.player_id,
            (Some(_), None) => true,
            _ => false,
        }
    }

    pub fn apply(&mut self, profile: PlayerProfile, loaded_at: String) -> bool {
        let wanted = self
            .requested
            .as_ref()
            .is_some_and(|p| p.player_id == profile.summary.player_id);
        if !wanted {
            return false;
        }
        self.profile = Some(profile);
        self.loaded_at = Some(loaded_at);
        true
    }
}

// ---------------------------------------------------------------------------
// Compare
// ---------------------------------------------------------------------------

pub const MAX_COMPARED: usize = 2;

#[derive(Debug, Default)]
pub struct CompareState {
    /// Oldest first.
    pub pinned: Vec<PlayerProfile>,
}

impl CompareState {
    /// Pin a profile, replacing an older pin of the same player and evicting
    /// the oldest once full.
    pub fn pin(&mut self, profile: PlayerProfile) {
        self.pinned
            .retain(|p| p.summary.player_id != profile.summary.player_id);
        self.pinned.push(profile);
        if self.pinned.len() > MAX_COMPARED {
            self.pinned.remove(0);
        }
    }

    pub fn is_ready(&self) -> bool {
        self.pinned.len() == MAX_COMPARED
    }
}

// ---------------------------------------------------------------------------
// Root state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub search: SearchState,
    pub profile: ProfileState,
    pub compare: CompareState,
    pub show_logs: bool,
    /// One-line feedback shown under the tab bar.
    pub status: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str) -> PlayerSummary {
        PlayerSummary { player_id: id.into(), first_name: "First".into(), last_name: id.into() }
    }

    fn profile(id: &str) -> PlayerProfile {
        PlayerProfile { summary: player(id), ..Default::default() }
    }

    #[test]
    fn edits_are_numbered_in_order() {
        let mut search = SearchState::default();
        assert_eq!(search.push_char('C').seq, 1);
        assert_eq!(search.push_char('u').seq, 2);
        let edit = search.pop_char().unwrap();
        assert_eq!(edit, SearchEdit { seq: 3, query: "C".into() });
    }

    #[test]
    fn pop_on_empty_query_is_not_an_edit() {
        let mut search = SearchState::default();
        assert!(search.pop_char().is_none());
        assert!(search.clear().is_none());
        assert_eq!(search.query_seq, 0);
    }

    #[test]
    fn stale_results_are_dropped() {
        let mut search = SearchState::default();
        search.push_char('J');
        search.push_char('a');
        assert!(!search.apply_results(1, "J".into(), vec![player("jordami01")]));
        assert!(search.results.is_empty());
        assert!(search.apply_results(2, "Ja".into(), vec![player("jamesle01")]));
        assert_eq!(search.results.len(), 1);
        assert!(!search.is_pending());
    }

    #[test]
    fn clearing_query_clears_results() {
        let mut search = SearchState::default();
        let edit = search.push_char('J');
        search.apply_results(edit.seq, edit.query, vec![player("a"), player("b")]);
        search.select_next();
        assert_eq!(search.selected, 1);

        search.clear();
        assert!(search.results.is_empty());
        assert_eq!(search.selected, 0);
        assert!(!search.is_pending());
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut search = SearchState::default();
        search.select_next();
        assert_eq!(search.selected, 0);
        let edit = search.push_char('x');
        search.apply_results(edit.seq, edit.query, vec![player("a"), player("b")]);
        search.select_next();
        search.select_next();
        assert_eq!(search.selected_player().map(|p| p.player_id.as_str()), Some("b"));
        search.select_prev();
        search.select_prev();
        assert_eq!(search.selected, 0);
    }

    #[test]
    fn profile_keeps_only_latest_request() {
        let mut state = ProfileState::default();
        state.request(player("a"));
        state.request(player("b"));
        assert!(state.is_loading());
        assert!(!state.apply(profile("a"), "10:00".into()));
        assert!(state.profile.is_none());
        assert!(state.apply(profile("b"), "10:01".into()));
        assert!(!state.is_loading());
    }

    #[test]
    fn compare_holds_two_most_recent() {
        let mut compare = CompareState::default();
        compare.pin(profile("a"));
        assert!(!compare.is_ready());
        compare.pin(profile("b"));
        compare.pin(profile("a"));
        let ids: Vec<&str> = compare.pinned.iter().map(|p| p.summary.player_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        compare.pin(profile("c"));
        let ids: Vec<&str> = compare.pinned.iter().map(|p| p.summary.player_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert!(compare.is_ready());
    }
}
