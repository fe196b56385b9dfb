//! basketball-head (RapidAPI) raw wire types: serde shapes for deserializing responses.
//! These map to our clean domain types via the map_* functions in client.rs.
//!
//! The service is loose about field types (ids arrive as strings or numbers,
//! stats as numbers or numeric strings), so most fields go through the lenient
//! deserializers at the bottom of this file and default when absent.
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Every payload is wrapped as `{"body": ...}`.
#[derive(Debug, Deserialize, Clone)]
pub struct Envelope<T> {
    pub body: Option<T>,
}

impl<T> Default for Envelope<T> {
    fn default() -> Self {
        Self { body: None }
    }
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawPlayerSummary {
    #[serde(default, deserialize_with = "opt_string")]
    pub player_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawPlayerOverview {
    #[serde(default, deserialize_with = "opt_string")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub last_name: Option<String>,
    #[serde(default, alias = "position", deserialize_with = "string_list")]
    pub positions: Vec<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub height: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub weight: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub number: Option<String>,
    #[serde(default, alias = "draft", deserialize_with = "opt_string")]
    pub draft_info: Option<String>,
    #[serde(default, deserialize_with = "strings")]
    pub teams: Vec<String>,
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawStatLine {
    #[serde(default, deserialize_with = "opt_string")]
    pub season: Option<String>,
    #[serde(default, alias = "type", deserialize_with = "opt_string")]
    pub stat_type: Option<String>,
    #[serde(default, alias = "teamName", deserialize_with = "opt_string")]
    pub team: Option<String>,
    #[serde(default, alias = "games", deserialize_with = "opt_f64")]
    pub games_played: Option<f64>,
    #[serde(default, alias = "points", deserialize_with = "opt_f64")]
    pub total_points: Option<f64>,
    #[serde(default, alias = "assists", deserialize_with = "opt_f64")]
    pub total_assists: Option<f64>,
    #[serde(default, alias = "rebounds", deserialize_with = "opt_f64")]
    pub total_rebounds: Option<f64>,
    #[serde(default, alias = "fieldGoalPct", deserialize_with = "opt_f64")]
    pub field_goal_percentage: Option<f64>,
    #[serde(default, alias = "threePointPct", deserialize_with = "opt_f64")]
    pub three_point_percentage: Option<f64>,
    #[serde(default, alias = "freeThrowPct", deserialize_with = "opt_f64")]
    pub free_throw_percentage: Option<f64>,
    #[serde(default, alias = "tov", deserialize_with = "opt_f64")]
    pub turnovers: Option<f64>,
    #[serde(default, alias = "playerEfficiencyRating", deserialize_with = "opt_f64")]
    pub per: Option<f64>,
}

/// One row of a season game log. Aggregate rows share this shape and are
/// told apart only by `stat_type`.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawGame {
    #[serde(default, alias = "gameDate", deserialize_with = "opt_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub points: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub assists: Option<f64>,
    #[serde(default, alias = "rebounds", deserialize_with = "opt_f64")]
    pub total_rebounds: Option<f64>,
    #[serde(default, alias = "type", deserialize_with = "opt_string")]
    pub stat_type: Option<String>,
}

/// Request body for the game log endpoint.
#[derive(Debug, serde::Serialize, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct GameLogQuery {
    pub page_size: u32,
}

/// Request body for the search endpoint.
#[derive(Debug, serde::Serialize, Clone)]
pub struct SearchQuery<'a> {
    pub query: &'a str,
}

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawRosterEntry {
    #[serde(default, deserialize_with = "opt_string")]
    pub player_id: Option<String>,
    #[serde(default, alias = "number", deserialize_with = "opt_string")]
    pub jersey_number: Option<String>,
}

// ---------------------------------------------------------------------------
// Lenient field deserializers
// ---------------------------------------------------------------------------

fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn opt_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().trim_end_matches('%').parse::<f64>().ok(),
        _ => None,
    })
}

/// Accepts `["PG", "SG"]` or `"Point Guard, Shooting Guard"`.
fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(ToString::to_string)
            .collect(),
        Some(Value::Array(items)) => collect_strings(items),
        _ => Vec::new(),
    })
}

/// An array of strings; non-string items are dropped.
fn strings<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Array(items)) => collect_strings(items),
        _ => Vec::new(),
    })
}

fn collect_strings(items: Vec<Value>) -> Vec<String> {
    items
        .into_iter()
        .filter_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_player_id_becomes_string() {
        let raw: RawPlayerSummary =
            serde_json::from_str(r#"{"playerId":1,"firstName":"LeBron","lastName":"James"}"#)
                .unwrap();
        assert_eq!(raw.player_id.as_deref(), Some("1"));
        assert_eq!(raw.first_name.as_deref(), Some("LeBron"));
    }

    #[test]
    fn null_body_deserializes_to_none() {
        let env: Envelope<Vec<RawPlayerSummary>> = serde_json::from_str(r#"{"body":null}"#).unwrap();
        assert!(env.body.is_none());
        let env: Envelope<Vec<RawPlayerSummary>> = serde_json::from_str("{}").unwrap();
        assert!(env.body.is_none());
    }

    #[test]
    fn stat_fields_accept_numeric_strings() {
        let raw: RawStatLine = serde_json::from_str(
            r#"{"season":"2023-2024","statType":"Totals","games":"71","points":1822,"fieldGoalPercentage":"54.0%"}"#,
        )
        .unwrap();
        assert_eq!(raw.games_played, Some(71.0));
        assert_eq!(raw.total_points, Some(1822.0));
        assert_eq!(raw.field_goal_percentage, Some(54.0));
        assert_eq!(raw.total_assists, None);
        assert_eq!(raw.turnovers, None);
    }

    #[test]
    fn stat_line_reads_turnovers_and_per() {
        let raw: RawStatLine =
            serde_json::from_str(r#"{"turnovers":"245","playerEfficiencyRating":23.7}"#).unwrap();
        assert_eq!(raw.turnovers, Some(245.0));
        assert_eq!(raw.per, Some(23.7));
    }

    #[test]
    fn positions_accept_string_or_array() {
        let a: RawPlayerOverview =
            serde_json::from_str(r#"{"positions":"Small Forward, Power Forward"}"#).unwrap();
        let b: RawPlayerOverview =
            serde_json::from_str(r#"{"positions":["Small Forward","Power Forward"]}"#).unwrap();
        assert_eq!(a.positions, b.positions);
        assert_eq!(a.positions.len(), 2);
    }

    #[test]
    fn team_history_drops_non_string_items() {
        let raw: RawPlayerOverview = serde_json::from_str(
            r#"{"teams":["Cleveland Cavaliers, 2010", 7, null, "Miami Heat, 2014"]}"#,
        )
        .unwrap();
        assert_eq!(raw.teams, vec!["Cleveland Cavaliers, 2010", "Miami Heat, 2014"]);
    }

    #[test]
    fn game_log_body_serializes_camel_case() {
        let body = serde_json::to_value(GameLogQuery { page_size: 100 }).unwrap();
        assert_eq!(body, serde_json::json!({"pageSize": 100}));
    }
}
