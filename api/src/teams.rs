//! Static NBA team metadata: full name, abbreviation and primary brand color.
//!
//! The abbreviation is the only team identifier used anywhere in the crate.
//! It doubles as the team id on the roster endpoint, so it follows the
//! upstream service's codes (BRK, CHO, PHO) rather than the league's.

/// Fallback when a team name is not recognised (NBA logo blue).
pub const DEFAULT_TEAM_COLOR: &str = "#1D428A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamInfo {
    pub name: &'static str,
    pub abbreviation: &'static str,
    pub color: &'static str,
}

const fn team(name: &'static str, abbreviation: &'static str, color: &'static str) -> TeamInfo {
    TeamInfo { name, abbreviation, color }
}

pub static NBA_TEAMS: [TeamInfo; 30] = [
    team("Atlanta Hawks", "ATL", "#E03A3E"),
    team("Boston Celtics", "BOS", "#007A33"),
    team("Brooklyn Nets", "BRK", "#000000"),
    team("Charlotte Hornets", "CHO", "#1D1160"),
    team("Chicago Bulls", "CHI", "#CE1141"),
    team("Cleveland Cavaliers", "CLE", "#860038"),
    team("Dallas Mavericks", "DAL", "#00538C"),
    team("Denver Nuggets", "DEN", "#0E2240"),
    team("Detroit Pistons", "DET", "#C8102E"),
    team("Golden State Warriors", "GSW", "#1D428A"),
    team("Houston Rockets", "HOU", "#CE1141"),
    team("Indiana Pacers", "IND", "#002D62"),
    team("Los Angeles Clippers", "LAC", "#C8102E"),
    team("Los Angeles Lakers", "LAL", "#552583"),
    team("Memphis Grizzlies", "MEM", "#5D76A9"),
    team("Miami Heat", "MIA", "#98002E"),
    team("Milwaukee Bucks", "MIL", "#00471B"),
    team("Minnesota Timberwolves", "MIN", "#0C2340"),
    team("New Orleans Pelicans", "NOP", "#0C2340"),
    team("New York Knicks", "NYK", "#006BB6"),
    team("Oklahoma City Thunder", "OKC", "#007AC1"),
    team("Orlando Magic", "ORL", "#0077C0"),
    team("Philadelphia 76ers", "PHI", "#006BB6"),
    team("Phoenix Suns", "PHO", "#1D1160"),
    team("Portland Trail Blazers", "POR", "#E03A3E"),
    team("Sacramento Kings", "SAC", "#5A2D81"),
    team("San Antonio Spurs", "SAS", "#C4CED4"),
    team("Toronto Raptors", "TOR", "#CE1141"),
    team("Utah Jazz", "UTA", "#002B5C"),
    team("Washington Wizards", "WAS", "#002B5C"),
];

/// Exact (case-insensitive, whitespace-trimmed) lookup by full team name.
pub fn find_team(name: &str) -> Option<&'static TeamInfo> {
    let name = name.trim();
    NBA_TEAMS.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

/// Parse "#RRGGBB" into its components.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_has_thirty_unique_teams() {
        let names: HashSet<_> = NBA_TEAMS.iter().map(|t| t.name).collect();
        let abbrevs: HashSet<_> = NBA_TEAMS.iter().map(|t| t.abbreviation).collect();
        assert_eq!(names.len(), 30);
        assert_eq!(abbrevs.len(), 30);
    }

    #[test]
    fn every_color_is_valid_hex() {
        for t in &NBA_TEAMS {
            assert!(hex_to_rgb(t.color).is_some(), "bad color for {}: {}", t.name, t.color);
        }
        assert!(hex_to_rgb(DEFAULT_TEAM_COLOR).is_some());
    }

    #[test]
    fn lookup_ignores_case_and_padding() {
        assert_eq!(find_team("  los angeles lakers ").map(|t| t.abbreviation), Some("LAL"));
        assert!(find_team("Seattle SuperSonics").is_none());
    }

    #[test]
    fn hex_to_rgb_rejects_malformed_input() {
        assert_eq!(hex_to_rgb("#552583"), Some((0x55, 0x25, 0x83)));
        assert_eq!(hex_to_rgb("552583"), None);
        assert_eq!(hex_to_rgb("#55258"), None);
        assert_eq!(hex_to_rgb("#zz2583"), None);
    }
}
