use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::messages::SearchEdit;
use chrono::Local;
use nba_api::{PlayerProfile, PlayerSummary};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Search,
    Profile,
    Compare,
    Help,
}

impl MenuItem {
    pub fn next(self) -> Self {
        match self {
            MenuItem::Search => MenuItem::Profile,
            MenuItem::Profile => MenuItem::Compare,
            MenuItem::Compare | MenuItem::Help => MenuItem::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            MenuItem::Search | MenuItem::Help => MenuItem::Compare,
            MenuItem::Profile => MenuItem::Search,
            MenuItem::Compare => MenuItem::Profile,
        }
    }
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        Self { settings, state: AppState::new() }
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    /// Returns whether the results were current enough to show.
    pub fn on_search_results(&mut self, query: String, seq: u64, players: Vec<PlayerSummary>) -> bool {
        self.state.search.apply_results(seq, query, players)
    }

    pub fn on_profile_loaded(&mut self, profile: PlayerProfile) -> bool {
        let loaded_at = Local::now().format("%H:%M").to_string();
        self.state.profile.apply(profile, loaded_at)
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        self.state.status = None;
    }

    pub fn next_tab(&mut self) {
        self.update_tab(self.state.active_tab.next());
    }

    pub fn prev_tab(&mut self) {
        self.update_tab(self.state.active_tab.prev());
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Search box. The caller hands every edit to the debouncer
    // -----------------------------------------------------------------------

    pub fn search_input(&mut self, c: char) -> SearchEdit {
        self.state.search.push_char(c)
    }

    pub fn search_backspace(&mut self) -> Option<SearchEdit> {
        self.state.search.pop_char()
    }

    pub fn search_clear(&mut self) -> Option<SearchEdit> {
        self.state.search.clear()
    }

    /// Open the highlighted search result. Returns the player to load and
    /// switches to the Profile tab.
    pub fn open_selected_player(&mut self) -> Option<PlayerSummary> {
        let player = self.state.search.selected_player()?.clone();
        self.state.profile.request(player.clone());
        self.update_tab(MenuItem::Profile);
        Some(player)
    }

    /// The player on the Profile tab, for a reload.
    pub fn current_player(&self) -> Option<PlayerSummary> {
        self.state.profile.requested.clone()
    }

    // -----------------------------------------------------------------------
    // Compare
    // -----------------------------------------------------------------------

    pub fn pin_current_profile(&mut self) {
        let Some(profile) = self.state.profile.profile.clone() else {
            self.state.status = Some("Open a profile before pinning it.".to_string());
            return;
        };
        let name = profile.summary.display_name();
        self.state.compare.pin(profile);
        self.state.status = Some(if self.state.compare.is_ready() {
            format!("Pinned {name}. Press 3 to compare.")
        } else {
            format!("Pinned {name}. Pin one more player to compare.")
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str, last: &str) -> PlayerSummary {
        PlayerSummary { player_id: id.into(), first_name: "Test".into(), last_name: last.into() }
    }

    fn app_with_results() -> App {
        let mut app = App::new(AppSettings::default());
        let edit = app.search_input('J');
        assert!(app.on_search_results(
            edit.query,
            edit.seq,
            vec![player("jamesle01", "James"), player("jordami01", "Jordan")],
        ));
        app
    }

    #[test]
    fn tabs_cycle_both_ways() {
        let mut app = App::new(AppSettings::default());
        app.next_tab();
        assert_eq!(app.state.active_tab, MenuItem::Profile);
        app.prev_tab();
        app.prev_tab();
        assert_eq!(app.state.active_tab, MenuItem::Compare);
    }

    #[test]
    fn help_returns_to_previous_tab() {
        let mut app = App::new(AppSettings::default());
        app.update_tab(MenuItem::Compare);
        app.update_tab(MenuItem::Help);
        app.exit_help();
        assert_eq!(app.state.active_tab, MenuItem::Compare);
    }

    #[test]
    fn open_selected_player_switches_to_profile() {
        let mut app = app_with_results();
        app.state.search.select_next();
        let opened = app.open_selected_player().unwrap();
        assert_eq!(opened.player_id, "jordami01");
        assert_eq!(app.state.active_tab, MenuItem::Profile);
        assert_eq!(app.current_player(), Some(opened));
        assert!(app.state.profile.is_loading());
    }

    #[test]
    fn open_without_results_does_nothing() {
        let mut app = App::new(AppSettings::default());
        assert!(app.open_selected_player().is_none());
        assert_eq!(app.state.active_tab, MenuItem::Search);
    }

    #[test]
    fn results_for_old_query_are_ignored() {
        let mut app = App::new(AppSettings::default());
        let first = app.search_input('K');
        app.search_input('o');
        assert!(!app.on_search_results(first.query, first.seq, vec![player("x", "X")]));
        assert!(app.state.search.results.is_empty());
    }

    #[test]
    fn pinning_needs_a_loaded_profile() {
        let mut app = app_with_results();
        app.pin_current_profile();
        assert!(app.state.compare.pinned.is_empty());
        assert!(app.state.status.is_some());

        let player = app.open_selected_player().unwrap();
        assert!(app.on_profile_loaded(PlayerProfile { summary: player, ..Default::default() }));
        app.pin_current_profile();
        assert_eq!(app.state.compare.pinned.len(), 1);
        assert_eq!(app.state.active_tab, MenuItem::Profile);
        assert_eq!(
            app.state.status.as_deref(),
            Some("Pinned Test James. Pin one more player to compare.")
        );
    }
}
