//! Bundled player → headshot lookup.
//!
//! `data/players.json` maps a player's display name to their league-wide
//! numeric id; the id is what the headshot CDN is keyed by.
use log::error;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::LazyLock;

const PLAYERS_JSON: &str = include_str!("../data/players.json");
const HEADSHOT_CDN: &str = "https://cdn.nba.com/headshots/nba/latest/1040x760";
pub const PLACEHOLDER_HEADSHOT: &str = "https://cdn.nba.com/headshots/nba/latest/1040x760/fallback.png";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct BundledPlayer {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
}

/// Keyed by lowercased display name.
static PLAYERS: LazyLock<HashMap<String, BundledPlayer>> = LazyLock::new(|| {
    match serde_json::from_str::<HashMap<String, BundledPlayer>>(PLAYERS_JSON) {
        Ok(players) => players
            .into_iter()
            .map(|(name, player)| (name.trim().to_lowercase(), player))
            .collect(),
        Err(e) => {
            error!("invalid bundled player data: {e}");
            HashMap::new()
        }
    }
});

pub fn find_player(display_name: &str) -> Option<&'static BundledPlayer> {
    PLAYERS.get(&display_name.trim().to_lowercase())
}

/// Headshot URL for a player, or the placeholder when the name is not bundled.
pub fn headshot_url(display_name: &str) -> String {
    find_player(display_name)
        .map(|p| format!("{HEADSHOT_CDN}/{}.png", p.id))
        .unwrap_or_else(|| PLACEHOLDER_HEADSHOT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_data_parses() {
        assert!(PLAYERS.len() >= 30);
    }

    #[test]
    fn known_player_gets_cdn_url() {
        assert_eq!(
            headshot_url("LeBron James"),
            "https://cdn.nba.com/headshots/nba/latest/1040x760/2544.png"
        );
        assert_eq!(headshot_url("  lebron james "), headshot_url("LeBron James"));
    }

    #[test]
    fn unknown_player_gets_placeholder() {
        assert_eq!(headshot_url("Nobody Inparticular"), PLACEHOLDER_HEADSHOT);
        assert!(find_player("").is_none());
    }
}
