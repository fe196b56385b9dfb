mod app;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::AppSettings;
use crate::state::debouncer::SearchDebouncer;
use crate::state::messages::{NetworkRequest, NetworkResponse, SearchEdit, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::{debug, info};
use nba_api::client::NbaApi;
use std::io::{Stdout, Write};
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

enum CliCommand {
    Run { query: Option<String> },
    Exit,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let initial_query = match handle_cli_args() {
        CliCommand::Run { query } => query,
        CliCommand::Exit => return Ok(()),
    };

    dotenvy::dotenv().ok();
    let settings = AppSettings::load();

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    if let Err(e) = setup_terminal() {
        cleanup_terminal();
        return Err(e.into());
    }

    tui_logger::init_logger(settings.log_level)?;
    tui_logger::set_default_level(settings.log_level);

    let debounce = settings.debounce;
    let app = Arc::new(Mutex::new(App::new(settings)));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);
    let (search_edit_tx, search_edit_rx) = mpsc::channel::<SearchEdit>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_worker = NetworkWorker::new(NbaApi::from_env(), network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Search debounce thread
    let debouncer = SearchDebouncer::new(search_edit_rx, network_req_tx.clone(), debounce);
    let debounce_task = tokio::spawn(debouncer.run());

    if let Some(query) = initial_query {
        let edit = {
            let mut guard = app.lock().await;
            query.chars().map(|c| guard.search_input(c)).last()
        };
        if let Some(edit) = edit {
            let _ = search_edit_tx.send(edit).await;
        }
    }

    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(
        terminal,
        app,
        ui_event_rx,
        network_req_tx,
        network_resp_rx,
        search_edit_tx,
    )
    .await;

    input_handler.abort();
    network_task.abort();
    debounce_task.abort();

    Ok(())
}

fn handle_cli_args() -> CliCommand {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return CliCommand::Run { query: None };
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            CliCommand::Exit
        }
        "-V" | "--version" => {
            println!("nbatui {}", env!("CARGO_PKG_VERSION"));
            CliCommand::Exit
        }
        flag if flag.starts_with('-') => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
        _ => {
            let query = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
            CliCommand::Run { query: Some(query) }
        }
    }
}

fn usage_text() -> &'static str {
    "nbatui - NBA player lookup in the terminal

Usage:
  nbatui [NAME...]
  nbatui --help
  nbatui --version

Environment (a .env file in the working directory is read too):
  BASKETBALL_HEAD_API_KEY       RapidAPI key for the Basketball Head API
  BASKETBALL_HEAD_API_HOST      RapidAPI host (default basketball-head.p.rapidapi.com)
  BASKETBALL_HEAD_API_BASE_URL  Base URL override
  NBATUI_DEBOUNCE_MS            Search debounce in milliseconds (default 500)
  NBATUI_LOG                    Log level: error, warn, info, debug, trace (default error)"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
    search_edits: mpsc::Sender<SearchEdit>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                // Typing must echo even while a search is in flight.
                if handle_ui_event(ui_event, &app, &network_requests, &search_edits).await {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = network_responses.recv() => {
                if handle_network_response(response, &app, &mut loading).await {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
    search_edits: &mpsc::Sender<SearchEdit>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            info!("nbatui {} started", env!("CARGO_PKG_VERSION"));
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests, search_edits).await;
            true
        }
        UiEvent::Resize => true,
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    loading: &mut LoadingState,
) -> bool {
    match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
            true
        }
        NetworkResponse::SearchResults { query, seq, players } => {
            let mut guard = app.lock().await;
            let applied = guard.on_search_results(query, seq, players);
            if !applied {
                debug!("dropped stale search results (#{seq})");
            }
            applied
        }
        NetworkResponse::ProfileLoaded { profile } => {
            let mut guard = app.lock().await;
            let id = profile.summary.player_id.clone();
            let applied = guard.on_profile_loaded(*profile);
            if !applied {
                debug!("dropped profile for {id}, no longer selected");
            }
            applied
        }
    }
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    prepare_screen(&mut io::stdout())?;
    terminal::enable_raw_mode()
}

fn prepare_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, cursor::Hide)?;
    execute!(out, terminal::EnterAlternateScreen)?;
    execute!(out, terminal::Clear(terminal::ClearType::All))
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClosedTerminal;

    impl Write for ClosedTerminal {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn screen_setup_reports_write_failures() {
        let err = prepare_screen(&mut ClosedTerminal).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn screen_setup_writes_escape_sequences() {
        let mut out = Vec::new();
        prepare_screen(&mut out).unwrap();
        assert!(!out.is_empty());
    }
}
