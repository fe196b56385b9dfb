//! Profile assembly: the fetches a profile screen needs, fed through the
//! derivations in [`crate::derive`].

use crate::client::NbaApi;
use crate::derive::{self, TeamStint};
use crate::headshots;
use crate::{
    GameLogEntry, NOT_AVAILABLE, PlayerOverview, PlayerProfile, PlayerSummary, SeasonStatLine,
};
use chrono::{Datelike, Local};
use futures_util::join;
use log::debug;

/// Raw inputs of a profile, as returned by the client.
#[derive(Debug, Clone, Default)]
pub struct ProfileParts {
    pub summary: PlayerSummary,
    pub overview: Option<PlayerOverview>,
    pub season_lines: Vec<SeasonStatLine>,
    pub recent_games: Vec<GameLogEntry>,
    /// Result of the roster lookup; "N/A" when it found nothing.
    pub roster_number: String,
}

impl NbaApi {
    /// Load everything the profile screen shows.
    ///
    /// Overview and season stats are independent and fetched together. The
    /// game log needs the latest season from the stats and the roster lookup
    /// needs the current team from the overview, so those two go second.
    pub async fn fetch_player_profile(&self, summary: &PlayerSummary) -> PlayerProfile {
        let player_id = summary.player_id.as_str();
        debug!("loading profile for {player_id}");

        let (overview, season_lines) = join!(
            self.fetch_player_overview(player_id),
            self.fetch_player_season_stats(player_id)
        );

        let season = derive::latest_season_line(&season_lines).map(|l| l.season.clone());
        let stint = overview
            .as_ref()
            .and_then(|o| derive::current_team_stint(&o.teams));

        let games = async {
            match season.as_deref() {
                Some(season) => self.fetch_player_last_five_games(player_id, season).await,
                None => Vec::new(),
            }
        };
        let jersey = async {
            match roster_key(stint.as_ref()) {
                Some((team_id, season_id)) => {
                    self.fetch_team_roster(team_id, &season_id, player_id).await
                }
                None => NOT_AVAILABLE.to_string(),
            }
        };
        let (recent_games, roster_number) = join!(games, jersey);

        assemble_profile(
            ProfileParts {
                summary: summary.clone(),
                overview,
                season_lines,
                recent_games,
                roster_number,
            },
            Local::now().year(),
        )
    }
}

/// (team id, season id) for the roster endpoint. Teams outside the static
/// table have no id, so their roster cannot be looked up.
fn roster_key(stint: Option<&TeamStint>) -> Option<(&'static str, String)> {
    let stint = stint?;
    let team_id = derive::team_abbreviation(&stint.name)?;
    Some((team_id, stint.end_year.to_string()))
}

/// Pure part of profile loading.
pub fn assemble_profile(parts: ProfileParts, current_year: i32) -> PlayerProfile {
    let ProfileParts { summary, overview, season_lines, recent_games, roster_number } = parts;

    let teams = overview.as_ref().map(|o| o.teams.as_slice()).unwrap_or_default();
    let current_team = derive::resolve_current_team(teams);
    let latest_season = derive::latest_season_line(&season_lines).cloned();
    let averages = derive::calculate_averages(latest_season.as_ref());

    let experience_years = overview
        .as_ref()
        .and_then(|o| o.draft_info.as_deref())
        .and_then(|info| derive::resolve_experience_years(info, current_year));

    // The roster is authoritative; the overview number is a stale fallback.
    let jersey_number = if roster_number != NOT_AVAILABLE {
        roster_number
    } else {
        overview
            .as_ref()
            .and_then(|o| o.number.clone())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    };

    let display_name = overview
        .as_ref()
        .map(|o| format!("{} {}", o.first_name, o.last_name).trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| summary.display_name());

    PlayerProfile {
        team_abbreviation: derive::team_abbreviation(&current_team),
        team_color: derive::team_color(&current_team),
        headshot_url: headshots::headshot_url(&display_name),
        summary,
        overview,
        current_team,
        experience_years,
        jersey_number,
        latest_season,
        averages,
        recent_games,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StatType;
    use crate::derive::NO_TEAM;
    use crate::headshots::PLACEHOLDER_HEADSHOT;
    use crate::teams::DEFAULT_TEAM_COLOR;

    fn lebron() -> PlayerSummary {
        PlayerSummary {
            player_id: "jamesle01".into(),
            first_name: "LeBron".into(),
            last_name: "James".into(),
        }
    }

    fn overview() -> PlayerOverview {
        PlayerOverview {
            first_name: "LeBron".into(),
            last_name: "James".into(),
            number: Some("6".into()),
            draft_info: Some("Cleveland Cavaliers, 1st round (1st pick), 2003 NBA Draft".into()),
            teams: vec!["Los Angeles Lakers, 2025".into(), "Cleveland Cavaliers, 2018".into()],
            ..Default::default()
        }
    }

    #[test]
    fn assembles_full_profile() {
        let parts = ProfileParts {
            summary: lebron(),
            overview: Some(overview()),
            season_lines: vec![SeasonStatLine {
                season: "2023-2024".into(),
                stat_type: StatType::Totals,
                games_played: 71,
                total_points: 1822.0,
                total_assists: 589.0,
                total_rebounds: 518.0,
                ..Default::default()
            }],
            recent_games: Vec::new(),
            roster_number: "23".into(),
        };
        let profile = assemble_profile(parts, 2025);
        assert_eq!(profile.current_team, "Los Angeles Lakers");
        assert_eq!(profile.team_abbreviation, Some("LAL"));
        assert_eq!(profile.team_color, "#552583");
        assert_eq!(profile.experience_years, Some(22));
        assert_eq!(profile.jersey_number, "23");
        assert_eq!(profile.averages.map(|a| a.points_per_game), Some(25.7));
        assert!(profile.headshot_url.ends_with("/2544.png"));
    }

    #[test]
    fn missing_data_yields_sentinels() {
        let profile = assemble_profile(
            ProfileParts {
                summary: PlayerSummary {
                    player_id: "x".into(),
                    first_name: "Nobody".into(),
                    last_name: "Known".into(),
                },
                roster_number: NOT_AVAILABLE.into(),
                ..Default::default()
            },
            2025,
        );
        assert_eq!(profile.current_team, NO_TEAM);
        assert_eq!(profile.team_abbreviation, None);
        assert_eq!(profile.team_color, DEFAULT_TEAM_COLOR);
        assert_eq!(profile.experience_years, None);
        assert_eq!(profile.jersey_number, "N/A");
        assert!(profile.averages.is_none());
        assert_eq!(profile.headshot_url, PLACEHOLDER_HEADSHOT);
    }

    #[test]
    fn jersey_falls_back_to_overview_number() {
        let profile = assemble_profile(
            ProfileParts {
                summary: lebron(),
                overview: Some(overview()),
                roster_number: NOT_AVAILABLE.into(),
                ..Default::default()
            },
            2025,
        );
        assert_eq!(profile.jersey_number, "6");
    }

    #[test]
    fn roster_key_needs_known_team() {
        let lakers = TeamStint { name: "Los Angeles Lakers".into(), end_year: 2025 };
        assert_eq!(roster_key(Some(&lakers)), Some(("LAL", "2025".to_string())));
        let sonics = TeamStint { name: "Seattle SuperSonics".into(), end_year: 2008 };
        assert_eq!(roster_key(Some(&sonics)), None);
        assert_eq!(roster_key(None), None);
    }
}
