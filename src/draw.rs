use log::error;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::state::network::LoadingState;
use crate::ui::layout::LayoutAreas;
use nba_api::derive::{self, NO_TEAM};
use nba_api::teams::hex_to_rgb;
use nba_api::{DerivedAverages, NOT_AVAILABLE, PlayerProfile};

static TABS: &[&str; 3] = &["Search", "Profile", "Compare"];

const HELP_TEXT: &str = "\
Tab / Shift-Tab  switch tabs, F1 help, Ctrl-C quit
Search           letters go to the search box: ↑/↓ select, Enter open profile, Esc clear
Profile          c pin for comparison, r reload, Esc back to search
Compare          shows the last two pinned players
Other tabs       1/2/3 switch tabs, f full screen, \" logs, ? help, q quit";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Search => draw_search(f, layout.main, app),
            MenuItem::Profile => draw_profile(f, layout.main, app),
            MenuItem::Compare => draw_compare(f, layout.main, app),
            MenuItem::Help => draw_placeholder(f, layout.main, HELP_TEXT),
        }

        if app.state.show_logs {
            draw_logs(f, layout.logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn team_color(profile: &PlayerProfile) -> Color {
    hex_to_rgb(profile.team_color)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::Blue)
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Search => 0,
        MenuItem::Profile => 1,
        MenuItem::Compare => 2,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: F1 ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

fn draw_search(f: &mut Frame, area: Rect, app: &App) {
    let search = &app.state.search;
    let [input_area, status_area, list_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);

    let input = Paragraph::new(Line::from(vec![
        Span::raw(search.query.as_str()),
        Span::styled("█", Style::default().fg(Color::DarkGray)),
    ]))
    .block(default_border(Color::White).title(" Search for players "));
    f.render_widget(input, input_area);

    let status = match (&app.state.status, search.is_pending()) {
        (Some(msg), _) => msg.clone(),
        (None, true) => "Searching...".to_string(),
        (None, false) => "↑/↓ select  Enter open  Esc clear  Tab next tab".to_string(),
    };
    f.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
        status_area,
    );

    let block = default_border(Color::White).title(" Players ");
    if search.results.is_empty() {
        let msg = if search.query.trim().is_empty() {
            "Type a player name to search."
        } else if search.is_pending() {
            ""
        } else {
            "No players found."
        };
        let inner = block.inner(list_area);
        f.render_widget(block, list_area);
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let items: Vec<ListItem> = search
        .results
        .iter()
        .map(|p| ListItem::new(p.display_name()))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(search.selected));
    f.render_stateful_widget(list, list_area, &mut list_state);
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

fn draw_profile(f: &mut Frame, area: Rect, app: &App) {
    let area = draw_status_line(f, area, app);
    let profile_state = &app.state.profile;

    let Some(profile) = profile_state.profile.as_ref().filter(|_| !profile_state.is_loading()) else {
        let msg = match &profile_state.requested {
            Some(player) => format!("Loading {}...", player.display_name()),
            None => "Pick a player on the Search tab and press Enter.".to_string(),
        };
        draw_placeholder(f, area, &msg);
        return;
    };

    let color = team_color(profile);
    let title = match &profile_state.loaded_at {
        Some(at) => format!(" {} · updated {at} ", profile.summary.display_name()),
        None => format!(" {} ", profile.summary.display_name()),
    };
    let block = default_border(color).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [bio_area, stats_area] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(inner);
    let [season_area, chart_area] =
        Layout::vertical([Constraint::Length(6), Constraint::Fill(1)]).areas(stats_area);

    f.render_widget(Paragraph::new(bio_lines(profile, color)), bio_area);
    f.render_widget(Paragraph::new(season_lines(profile)), season_area);
    draw_recent_games(f, chart_area, profile, color);
}

fn bio_lines(profile: &PlayerProfile, color: Color) -> Vec<Line<'static>> {
    let overview = profile.overview.as_ref();
    let field = |value: Option<&String>| value.cloned().unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let team = match profile.team_abbreviation {
        Some(abbr) => format!("{} ({abbr})", profile.current_team),
        None => profile.current_team.clone(),
    };
    let team_style = if profile.current_team == NO_TEAM {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    };
    let positions = overview
        .map(|o| o.positions.join(", "))
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<11}"), Style::default().fg(Color::DarkGray)),
            Span::raw(value),
        ])
    };

    vec![
        Line::from(vec![
            Span::styled(format!("{:<11}", "Team"), Style::default().fg(Color::DarkGray)),
            Span::styled(team, team_style),
        ]),
        row("Jersey", format!("#{}", profile.jersey_number)),
        row("Position", positions),
        row("Height", field(overview.and_then(|o| o.height.as_ref()))),
        row("Weight", field(overview.and_then(|o| o.weight.as_ref()))),
        row("Experience", derive::experience_label(profile.experience_years)),
        row("Draft", field(overview.and_then(|o| o.draft_info.as_ref()))),
        Line::default(),
        row("Headshot", profile.headshot_url.clone()),
    ]
}

fn season_lines(profile: &PlayerProfile) -> Vec<Line<'static>> {
    let Some(line) = profile.latest_season.as_ref() else {
        return vec![Line::styled("No Stats Available", Style::default().fg(Color::DarkGray))];
    };
    let pct = |v: Option<f64>| v.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{v:.1}"));

    let mut lines = vec![
        Line::styled(
            format!("Season {}  {}  {} GP", line.season, line.team, line.games_played),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::from(format!(
            "Totals  PTS {:.0}  AST {:.0}  REB {:.0}",
            line.total_points, line.total_assists, line.total_rebounds
        )),
    ];
    lines.push(match profile.averages {
        Some(avg) => Line::from(format_averages(&avg)),
        None => Line::styled("Averages N/A", Style::default().fg(Color::DarkGray)),
    });
    lines.push(Line::from(format!(
        "FG% {}  3P% {}  FT% {}",
        pct(line.field_goal_pct),
        pct(line.three_point_pct),
        pct(line.free_throw_pct)
    )));
    lines.push(Line::from(format!(
        "TOV/G {}  PER {}",
        pct(derive::turnovers_per_game(Some(line))),
        pct(line.per)
    )));
    lines
}

fn format_averages(avg: &DerivedAverages) -> String {
    format!(
        "PPG {:.1}  APG {:.1}  RPG {:.1}",
        avg.points_per_game, avg.assists_per_game, avg.rebounds_per_game
    )
}

fn draw_recent_games(f: &mut Frame, area: Rect, profile: &PlayerProfile, color: Color) {
    let block = default_border(Color::DarkGray).title(" Last 5 games · points ");
    if profile.recent_games.is_empty() {
        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(
            Paragraph::new("No recent games.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let series = derive::chart_series(&profile.recent_games);
    let [chart_area, detail_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(2)]).areas(area);

    let bars: Vec<Bar> = series
        .labels
        .iter()
        .zip(&series.points)
        .map(|(label, points)| {
            Bar::default()
                .value(points.max(0.0).round() as u64)
                .label(Line::from(label.clone()))
                .text_value(format!("{points:.0}"))
        })
        .collect();
    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(7)
        .bar_gap(2)
        .bar_style(Style::default().fg(color))
        .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
    f.render_widget(chart, chart_area);

    let join = |values: &[f64]| {
        values
            .iter()
            .map(|v| format!("{v:>7.0}"))
            .collect::<Vec<_>>()
            .join("  ")
    };
    f.render_widget(
        Paragraph::new(vec![
            Line::from(format!("AST {}", join(&series.assists))),
            Line::from(format!("REB {}", join(&series.rebounds))),
        ])
        .style(Style::default().fg(Color::Gray)),
        detail_area,
    );
}

// ---------------------------------------------------------------------------
// Compare
// ---------------------------------------------------------------------------

fn draw_compare(f: &mut Frame, area: Rect, app: &App) {
    let compare = &app.state.compare;
    if !compare.is_ready() {
        let msg = match compare.pinned.first() {
            Some(p) => format!(
                "{} is pinned. Open another profile and press c to compare.",
                p.summary.display_name()
            ),
            None => "Open a profile and press c to pin it. Pin two players to compare.".to_string(),
        };
        draw_placeholder(f, area, &msg);
        return;
    }

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);
    let (a, b) = (&compare.pinned[0], &compare.pinned[1]);
    draw_compare_card(f, left, a, b);
    draw_compare_card(f, right, b, a);
}

/// One side of the comparison; stats where `player` leads `other` are highlighted.
fn draw_compare_card(f: &mut Frame, area: Rect, player: &PlayerProfile, other: &PlayerProfile) {
    let block = default_border(team_color(player)).title(format!(" {} ", player.summary.display_name()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = vec![
        Line::from(player.current_team.clone()),
        Line::from(format!("Experience: {}", derive::experience_label(player.experience_years))),
        Line::default(),
    ];

    let season = player.latest_season.as_ref().map_or(NOT_AVAILABLE, |l| l.season.as_str());
    lines.push(Line::styled(format!("Season {season}"), Style::default().add_modifier(Modifier::BOLD)));

    let stat = |label: &str, pick: fn(&DerivedAverages) -> f64| {
        let mine = player.averages.as_ref().map(pick);
        let theirs = other.averages.as_ref().map(pick);
        let leads = matches!((mine, theirs), (Some(m), Some(t)) if m > t);
        let value = mine.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{v:.1}"));
        let style = if leads {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Line::from(vec![Span::raw(format!("{label:<5}")), Span::styled(value, style)])
    };
    lines.push(stat("PPG", |a| a.points_per_game));
    lines.push(stat("APG", |a| a.assists_per_game));
    lines.push(stat("RPG", |a| a.rebounds_per_game));

    f.render_widget(Paragraph::new(lines), inner);
}

// ---------------------------------------------------------------------------
// Shared widgets
// ---------------------------------------------------------------------------

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

/// Reserve the bottom row of `area` for the status message, if any, and
/// return what is left.
fn draw_status_line(f: &mut Frame, area: Rect, app: &App) -> Rect {
    let Some(msg) = app.state.status.as_deref() else {
        return area;
    };
    let [rest, status] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
    f.render_widget(Paragraph::new(msg).style(Style::default().fg(Color::Yellow)), status);
    rest
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let widget = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(widget, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading {
        return;
    }
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(Style::default().fg(Color::White));
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_settings::AppSettings;
    use nba_api::{PlayerSummary, SeasonStatLine, StatType};
    use tui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app_with_profile() -> App {
        let mut app = App::new(AppSettings::default());
        let edit = app.search_input('J');
        let player = PlayerSummary {
            player_id: "jamesle01".into(),
            first_name: "LeBron".into(),
            last_name: "James".into(),
        };
        app.on_search_results(edit.query, edit.seq, vec![player.clone()]);
        app.open_selected_player();
        app.on_profile_loaded(PlayerProfile {
            summary: player,
            latest_season: Some(SeasonStatLine {
                season: "2023-2024".into(),
                stat_type: StatType::Totals,
                games_played: 71,
                total_turnovers: Some(245.0),
                per: Some(23.7),
                ..Default::default()
            }),
            ..Default::default()
        });
        app
    }

    #[test]
    fn profile_shows_pin_confirmation() {
        let mut app = app_with_profile();
        app.pin_current_profile();
        assert_eq!(app.state.active_tab, MenuItem::Profile);

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        draw(&mut terminal, &mut app, LoadingState::default());
        assert!(screen_text(&terminal).contains("Pinned LeBron James"));
    }

    #[test]
    fn profile_shows_pin_refusal_without_profile() {
        let mut app = App::new(AppSettings::default());
        app.update_tab(MenuItem::Profile);
        app.pin_current_profile();

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        draw(&mut terminal, &mut app, LoadingState::default());
        assert!(screen_text(&terminal).contains("Open a profile before pinning it."));
    }

    #[test]
    fn season_line_shows_turnovers_and_per() {
        let mut app = app_with_profile();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        draw(&mut terminal, &mut app, LoadingState::default());
        assert!(screen_text(&terminal).contains("TOV/G 3.5  PER 23.7"));
    }
}
