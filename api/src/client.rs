use crate::derive;
use crate::rapid::{
    Envelope, GameLogQuery, RawGame, RawPlayerOverview, RawPlayerSummary, RawRosterEntry,
    RawStatLine, SearchQuery,
};
use crate::{
    GameLogEntry, NOT_AVAILABLE, PlayerOverview, PlayerSummary, RosterEntry, SeasonStatLine,
    StatType,
};
use chrono::NaiveDate;
use log::{debug, warn};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_BASE_URL: &str = "https://basketball-head.p.rapidapi.com";
pub const DEFAULT_API_HOST: &str = "basketball-head.p.rapidapi.com";

pub const ENV_API_KEY: &str = "BASKETBALL_HEAD_API_KEY";
pub const ENV_API_HOST: &str = "BASKETBALL_HEAD_API_HOST";
pub const ENV_BASE_URL: &str = "BASKETBALL_HEAD_API_BASE_URL";

/// A full regular season plus playoffs fits in one page.
const GAME_LOG_PAGE_SIZE: u32 = 100;

/// Connection settings. The key and host are sent on every request as the
/// RapidAPI auth headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_host: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            api_host: DEFAULT_API_HOST.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn new(api_key: impl Into<String>, api_host: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), api_host: api_host.into(), ..Self::default() }
    }

    /// Read the key, host and optional base URL override from the environment.
    /// Missing values fall back to the defaults; a missing key is logged since
    /// every request will then be rejected upstream.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        let config = Self {
            base_url: var(ENV_BASE_URL).unwrap_or(defaults.base_url),
            api_key: var(ENV_API_KEY).unwrap_or_default(),
            api_host: var(ENV_API_HOST).unwrap_or(defaults.api_host),
        };
        if config.api_key.is_empty() {
            warn!("{ENV_API_KEY} is not set; requests will be unauthenticated");
        }
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

/// basketball-head API client.
///
/// Every public operation is infallible from the caller's side: failures are
/// logged and turned into the operation's empty value. The `ApiError`s below
/// never leave this module except through `Display` in the logs.
#[derive(Debug, Clone)]
pub struct NbaApi {
    client: Client,
    config: ApiConfig,
    timeout: Duration,
}

impl Default for NbaApi {
    fn default() -> Self {
        Self::new(ApiConfig::default())
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    /// The envelope had no usable `body`, or the body had the wrong shape.
    ShapeMismatch(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::ShapeMismatch(msg) => write!(f, "Unexpected response shape: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl NbaApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::builder()
                .user_agent("nbatui/0.1 (terminal player lookup)")
                .build()
                .unwrap_or_default(),
            config,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env())
    }

    /// Search players by free text. Blank queries are not sent.
    pub async fn search_players(&self, query: &str) -> Vec<PlayerSummary> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let result = self
            .post::<Vec<RawPlayerSummary>, _>("/players/searchv2", &SearchQuery { query })
            .await
            .map(|raw| raw.into_iter().filter_map(map_player_summary).collect());
        unwrap_or(result, Vec::new(), "player search")
    }

    pub async fn fetch_player_overview(&self, player_id: &str) -> Option<PlayerOverview> {
        let result = self
            .get::<RawPlayerOverview>(&format!("/players/{player_id}"))
            .await
            .map(|raw| Some(map_player_overview(raw)));
        unwrap_or(result, None, "player overview")
    }

    /// Regular-season totals, one line per season.
    pub async fn fetch_player_season_stats(&self, player_id: &str) -> Vec<SeasonStatLine> {
        let result = self
            .get::<Vec<RawStatLine>>(&format!("/players/{player_id}/stats/Totals?seasonType=Regular"))
            .await
            .map(|raw| raw.into_iter().map(map_stat_line).collect());
        unwrap_or(result, Vec::new(), "season stats")
    }

    /// Up to five individual games from `season`, oldest first.
    pub async fn fetch_player_last_five_games(
        &self,
        player_id: &str,
        season: &str,
    ) -> Vec<GameLogEntry> {
        let result = self
            .post::<Vec<RawGame>, _>(
                &format!("/players/{player_id}/games/{season}"),
                &GameLogQuery { page_size: GAME_LOG_PAGE_SIZE },
            )
            .await
            .map(|raw| derive::select_recent_games(raw.into_iter().map(map_game).collect()));
        unwrap_or(result, Vec::new(), "game log")
    }

    /// The player's jersey number on `team_id`'s roster for `season_id`, or "N/A".
    pub async fn fetch_team_roster(
        &self,
        team_id: &str,
        season_id: &str,
        player_id: &str,
    ) -> String {
        let result = self
            .get::<Vec<RawRosterEntry>>(&format!("/teams/{team_id}/roster/{season_id}"))
            .await
            .map(|raw| {
                let roster: Vec<RosterEntry> =
                    raw.into_iter().filter_map(map_roster_entry).collect();
                derive::resolve_jersey_number(&roster, player_id)
            });
        unwrap_or(result, NOT_AVAILABLE.to_string(), "team roster")
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.config.url(path);
        debug!("GET {url}");
        self.send(self.client.get(&url), &url).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let url = self.config.url(path);
        debug!("POST {url}");
        self.send(self.client.post(&url).json(body), &url).await
    }

    /// Send with auth headers, then unwrap the `{"body": ...}` envelope into `T`.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, url: &str) -> ApiResult<T> {
        let response = request
            .header("X-RapidAPI-Key", &self.config.api_key)
            .header("X-RapidAPI-Host", &self.config.api_host)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        let envelope: Envelope<Value> = response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.to_owned()))?
            .json()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))?;

        let body = envelope
            .body
            .ok_or_else(|| ApiError::ShapeMismatch(format!("{url}: missing body")))?;
        serde_json::from_value(body).map_err(|e| ApiError::ShapeMismatch(format!("{url}: {e}")))
    }
}

/// Collapse a failed call into its documented empty value.
fn unwrap_or<T>(result: ApiResult<T>, default: T, what: &str) -> T {
    result.unwrap_or_else(|e| {
        warn!("{what} failed: {e}");
        default
    })
}

// ---------------------------------------------------------------------------
// Mapping: RapidAPI wire types → clean domain types
// ---------------------------------------------------------------------------

/// Results without an id cannot be opened, so they are dropped.
fn map_player_summary(raw: RawPlayerSummary) -> Option<PlayerSummary> {
    Some(PlayerSummary {
        player_id: raw.player_id?,
        first_name: raw.first_name.unwrap_or_default(),
        last_name: raw.last_name.unwrap_or_default(),
    })
}

fn map_player_overview(raw: RawPlayerOverview) -> PlayerOverview {
    PlayerOverview {
        first_name: raw.first_name.unwrap_or_default(),
        last_name: raw.last_name.unwrap_or_default(),
        positions: raw.positions,
        height: raw.height,
        weight: raw.weight,
        number: raw.number,
        draft_info: raw.draft_info,
        teams: raw.teams,
    }
}

fn map_stat_line(raw: RawStatLine) -> SeasonStatLine {
    SeasonStatLine {
        season: raw.season.unwrap_or_default(),
        // The endpoint is already scoped to totals when the row omits its type.
        stat_type: raw.stat_type.as_deref().map(StatType::parse).unwrap_or_default(),
        team: raw.team.unwrap_or_default(),
        games_played: raw.games_played.map(count).unwrap_or_default(),
        total_points: raw.total_points.unwrap_or_default(),
        total_assists: raw.total_assists.unwrap_or_default(),
        total_rebounds: raw.total_rebounds.unwrap_or_default(),
        field_goal_pct: raw.field_goal_percentage,
        three_point_pct: raw.three_point_percentage,
        free_throw_pct: raw.free_throw_percentage,
        total_turnovers: raw.turnovers,
        per: raw.per,
    }
}

fn map_game(raw: RawGame) -> GameLogEntry {
    let date = raw.date.unwrap_or_default();
    GameLogEntry {
        game_date: parse_game_date(&date),
        date,
        points: raw.points.unwrap_or_default(),
        assists: raw.assists.unwrap_or_default(),
        total_rebounds: raw.total_rebounds.unwrap_or_default(),
        // Untyped rows can't be told apart from aggregates, so they are not games.
        stat_type: raw.stat_type.as_deref().map(StatType::parse).unwrap_or(StatType::Other),
    }
}

fn map_roster_entry(raw: RawRosterEntry) -> Option<RosterEntry> {
    Some(RosterEntry {
        player_id: raw.player_id?,
        jersey_number: raw.jersey_number.unwrap_or_default(),
    })
}

fn count(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 { value.round() as u32 } else { 0 }
}

/// Game dates arrive as ISO dates, timestamps, or "Tue, Oct 22, 2024".
fn parse_game_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Some(iso) = s.get(..10)
        && let Ok(date) = NaiveDate::parse_from_str(iso, "%Y-%m-%d")
    {
        return Some(date);
    }
    ["%a, %b %d, %Y", "%b %d, %Y", "%m/%d/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}
