use crate::app::{App, MenuItem};
use crate::state::messages::{NetworkRequest, SearchEdit};
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
    search_edits: &mpsc::Sender<SearchEdit>,
) {
    let mut guard = app.lock().await;
    let mut edit: Option<SearchEdit> = None;
    let mut load: Option<NetworkRequest> = None;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit. Plain 'q' is a letter while typing a search.
        (_, Char('c'), KeyModifiers::CONTROL) => quit(),
        (tab, Char('q'), _) if tab != MenuItem::Search => quit(),

        // Tab switching
        (_, KeyCode::Tab, _) => guard.next_tab(),
        (_, KeyCode::BackTab, _) => guard.prev_tab(),
        (_, KeyCode::F(1), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Search box
        (MenuItem::Search, KeyCode::Up, _) => guard.state.search.select_prev(),
        (MenuItem::Search, KeyCode::Down, _) => guard.state.search.select_next(),
        (MenuItem::Search, KeyCode::Enter, _) => {
            load = guard
                .open_selected_player()
                .map(|player| NetworkRequest::LoadProfile { player });
        }
        (MenuItem::Search, KeyCode::Backspace, _) => edit = guard.search_backspace(),
        (MenuItem::Search, KeyCode::Esc, _) => edit = guard.search_clear(),
        (MenuItem::Search, Char(c), m) if !m.contains(KeyModifiers::CONTROL) => {
            edit = Some(guard.search_input(c));
        }

        // Everywhere else digits and letters are commands
        (_, Char('1'), _) => guard.update_tab(MenuItem::Search),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Profile),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Compare),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),

        // Profile
        (MenuItem::Profile, Char('c'), _) => guard.pin_current_profile(),
        (MenuItem::Profile, Char('r'), _) => {
            load = guard
                .current_player()
                .map(|player| NetworkRequest::LoadProfile { player });
        }
        (MenuItem::Profile | MenuItem::Compare, KeyCode::Esc, _) => {
            guard.update_tab(MenuItem::Search)
        }

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }

    drop(guard);

    if let Some(edit) = edit {
        let _ = search_edits.send(edit).await;
    }
    if let Some(request) = load {
        let _ = network_requests.send(request).await;
    }
}

fn quit() {
    crate::cleanup_terminal();
    std::process::exit(0);
}
