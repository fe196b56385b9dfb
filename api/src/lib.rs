pub mod client;
pub mod derive;
pub mod headshots;
pub mod profile;
pub mod rapid;
pub mod teams;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Placeholder shown wherever a string field has no data.
pub const NOT_AVAILABLE: &str = "N/A";

// ---------------------------------------------------------------------------
// Domain types, independent of the RapidAPI wire format
// ---------------------------------------------------------------------------

/// One search hit. Enough to label a list row and open a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub player_id: String,
    pub first_name: String,
    pub last_name: String,
}

impl PlayerSummary {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerOverview {
    pub first_name: String,
    pub last_name: String,
    pub positions: Vec<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub number: Option<String>,
    /// Free text, e.g. "Cleveland Cavaliers, 1st round (1st pick), 2003 NBA Draft".
    pub draft_info: Option<String>,
    /// "Team Name, 2024" entries. Array order is not chronological.
    pub teams: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatType {
    #[default]
    Totals,
    Game,
    PerGame,
    Other,
}

impl StatType {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "totals" => StatType::Totals,
            "game" => StatType::Game,
            "pergame" | "per game" | "per_game" => StatType::PerGame,
            _ => StatType::Other,
        }
    }
}

/// One aggregated row for a season and stat type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeasonStatLine {
    pub season: String, // "2023-2024"
    pub stat_type: StatType,
    pub team: String,
    pub games_played: u32,
    pub total_points: f64,
    pub total_assists: f64,
    pub total_rebounds: f64,
    pub field_goal_pct: Option<f64>,
    pub three_point_pct: Option<f64>,
    pub free_throw_pct: Option<f64>,
    pub total_turnovers: Option<f64>,
    /// Player efficiency rating, when the service reports one.
    pub per: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameLogEntry {
    /// Raw date text as sent upstream.
    pub date: String,
    /// Parsed form of `date`; `None` when the text is in an unknown format.
    pub game_date: Option<NaiveDate>,
    pub points: f64,
    pub assists: f64,
    pub total_rebounds: f64,
    pub stat_type: StatType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterEntry {
    pub player_id: String,
    pub jersey_number: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DerivedAverages {
    pub points_per_game: f64,
    pub assists_per_game: f64,
    pub rebounds_per_game: f64,
}

/// Everything the profile screen renders, assembled from several fetches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerProfile {
    pub summary: PlayerSummary,
    pub overview: Option<PlayerOverview>,
    /// Team name, or the "No Team Available" sentinel.
    pub current_team: String,
    pub team_abbreviation: Option<&'static str>,
    /// Hex brand color of the current team, or the default color.
    pub team_color: &'static str,
    pub experience_years: Option<i32>,
    /// Jersey number from the current roster, or "N/A".
    pub jersey_number: String,
    pub latest_season: Option<SeasonStatLine>,
    pub averages: Option<DerivedAverages>,
    /// At most five games, oldest first.
    pub recent_games: Vec<GameLogEntry>,
    pub headshot_url: String,
}
