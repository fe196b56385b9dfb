//! Pure view-model derivations over already-fetched payloads.
//!
//! Nothing here does I/O or fails: every function maps its input to a value,
//! with an explicit fallback when the data is missing.

use crate::teams::{self, DEFAULT_TEAM_COLOR};
use crate::{DerivedAverages, GameLogEntry, NOT_AVAILABLE, RosterEntry, SeasonStatLine, StatType};

pub const NO_TEAM: &str = "No Team Available";
pub const RECENT_GAMES: usize = 5;

const DRAFT_MARKER: &str = " NBA Draft";

// ---------------------------------------------------------------------------
// Season averages
// ---------------------------------------------------------------------------

/// Per-game averages from a totals line, rounded to one decimal.
/// `None` when there is no line or the player has not played a game.
pub fn calculate_averages(line: Option<&SeasonStatLine>) -> Option<DerivedAverages> {
    let line = line?;
    if line.games_played == 0 {
        return None;
    }
    let games = f64::from(line.games_played);
    Some(DerivedAverages {
        points_per_game: round1(line.total_points / games),
        assists_per_game: round1(line.total_assists / games),
        rebounds_per_game: round1(line.total_rebounds / games),
    })
}

/// Turnovers per game, rounded like the other averages. `None` without
/// turnover totals or games.
pub fn turnovers_per_game(line: Option<&SeasonStatLine>) -> Option<f64> {
    let line = line?;
    if line.games_played == 0 {
        return None;
    }
    line.total_turnovers.map(|tov| round1(tov / f64::from(line.games_played)))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// The regular-season totals line for the most recent season.
///
/// Seasons are "YYYY-YYYY" strings, so lexical order is chronological.
pub fn latest_season_line(lines: &[SeasonStatLine]) -> Option<&SeasonStatLine> {
    lines
        .iter()
        .filter(|l| l.stat_type == StatType::Totals && !l.season.is_empty())
        .max_by(|a, b| a.season.cmp(&b.season))
}

// ---------------------------------------------------------------------------
// Team history
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamStint {
    pub name: String,
    pub end_year: u16,
}

/// Parse one "Team Name, 2024" entry. The year is taken after the last comma.
pub fn parse_team_entry(entry: &str) -> Option<TeamStint> {
    let (name, year) = entry.rsplit_once(',')?;
    let name = name.trim();
    let year = year.trim();
    if name.is_empty() || year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(TeamStint { name: name.to_string(), end_year: year.parse().ok()? })
}

/// The stint with the latest end year. Array order is ignored except on
/// ties, where the entry listed later wins. Unparseable entries are skipped.
pub fn current_team_stint(teams: &[String]) -> Option<TeamStint> {
    teams
        .iter()
        .filter_map(|t| parse_team_entry(t))
        .max_by_key(|stint| stint.end_year)
}

pub fn resolve_current_team(teams: &[String]) -> String {
    current_team_stint(teams)
        .map(|stint| stint.name)
        .unwrap_or_else(|| NO_TEAM.to_string())
}

// ---------------------------------------------------------------------------
// Experience
// ---------------------------------------------------------------------------

/// First four digits directly followed by " NBA Draft" in free text.
pub fn draft_year(draft_info: &str) -> Option<i32> {
    draft_info.match_indices(DRAFT_MARKER).find_map(|(idx, _)| {
        let digits = draft_info.get(idx.checked_sub(4)?..idx)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    })
}

/// Seasons since the draft, relative to `current_year`.
pub fn resolve_experience_years(draft_info: &str, current_year: i32) -> Option<i32> {
    draft_year(draft_info).map(|year| current_year - year)
}

pub fn experience_label(years: Option<i32>) -> String {
    match years {
        Some(1) => "1 year".to_string(),
        Some(n) => format!("{n} years"),
        None => NOT_AVAILABLE.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Team lookups
// ---------------------------------------------------------------------------

pub fn team_abbreviation(name: &str) -> Option<&'static str> {
    teams::find_team(name).map(|t| t.abbreviation)
}

pub fn team_color(name: &str) -> &'static str {
    teams::find_team(name).map_or(DEFAULT_TEAM_COLOR, |t| t.color)
}

pub fn resolve_jersey_number(roster: &[RosterEntry], player_id: &str) -> String {
    roster
        .iter()
        .find(|entry| entry.player_id == player_id)
        .map(|entry| entry.jersey_number.clone())
        .filter(|number| !number.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

// ---------------------------------------------------------------------------
// Recent games
// ---------------------------------------------------------------------------

/// Keep individual games only, oldest first, and return the last five.
/// Sorting is stable so same-day rows keep their upstream order; rows with
/// an unparseable date sort before everything else.
pub fn select_recent_games(log: Vec<GameLogEntry>) -> Vec<GameLogEntry> {
    let mut games: Vec<GameLogEntry> = log
        .into_iter()
        .filter(|g| g.stat_type == StatType::Game)
        .collect();
    games.sort_by_key(|g| g.game_date);
    let skip = games.len().saturating_sub(RECENT_GAMES);
    games.split_off(skip)
}

/// Chart-ready numeric sequences, one value per game, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub points: Vec<f64>,
    pub assists: Vec<f64>,
    pub rebounds: Vec<f64>,
}

pub fn chart_series(games: &[GameLogEntry]) -> ChartSeries {
    ChartSeries {
        labels: games
            .iter()
            .map(|g| {
                g.game_date
                    .map(|d| d.format("%m/%d").to_string())
                    .unwrap_or_else(|| g.date.clone())
            })
            .collect(),
        points: games.iter().map(|g| g.points).collect(),
        assists: games.iter().map(|g| g.assists).collect(),
        rebounds: games.iter().map(|g| g.total_rebounds).collect(),
    }
}
