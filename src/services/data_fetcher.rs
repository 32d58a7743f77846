use std::collections::HashMap;
use std::path::{Component, PathBuf};
use std::sync::Arc;

use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::config::Settings;
use crate::errors::DatasetError;
use crate::models::{Dataset, FullTimeResult, League, MatchResult};
use crate::utils::parse_match_date;

// ── football-data.co.uk catalogue ───────────────────────────────────────────

pub const LEAGUES: &[League] = &[
    League { name: "Premier League",     code: "E0" },
    League { name: "Bundesliga",         code: "D1" },
    League { name: "Serie A",            code: "I1" },
    League { name: "La Liga",            code: "SP1" },
    League { name: "Ligue 1",            code: "F1" },
    League { name: "Eredivisie",         code: "N1" },
    League { name: "Belgian Pro League", code: "B1" },
    League { name: "Primeira Liga",      code: "P1" },
    League { name: "Turkish Super Lig",  code: "T1" },
    League { name: "Greek Super League", code: "G1" },
];

/// Look a league up by display name or division code, ignoring case.
pub fn find_league(query: &str) -> Option<&'static League> {
    let query = query.trim();
    LEAGUES
        .iter()
        .find(|l| l.name.eq_ignore_ascii_case(query) || l.code.eq_ignore_ascii_case(query))
}

pub fn league_url(settings: &Settings, league: &League) -> String {
    format!("{}/{}/{}.csv", settings.data_base_url, settings.season, league.code)
}

/// Which identifiers a loader will turn into a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourcePolicy {
    /// League names/codes, URLs and local paths.
    Any,
    /// Only the built-in league catalogue.
    LeaguesOnly,
}

/// Where a dataset identifier points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Remote(String),
    File(PathBuf),
}

impl DataSource {
    pub fn resolve(identifier: &str, settings: &Settings) -> Self {
        let identifier = identifier.trim();
        if identifier.starts_with("http://") || identifier.starts_with("https://") {
            return DataSource::Remote(identifier.to_string());
        }
        match find_league(identifier) {
            Some(league) => DataSource::Remote(league_url(settings, league)),
            None => DataSource::File(PathBuf::from(identifier)),
        }
    }

    /// Resolve against the league catalogue only.
    pub fn resolve_league(identifier: &str, settings: &Settings) -> Result<Self, DatasetError> {
        find_league(identifier)
            .map(|league| DataSource::Remote(league_url(settings, league)))
            .ok_or_else(|| DatasetError::UnsupportedSource {
                identifier: identifier.trim().to_string(),
            })
    }

    /// Cache key shared by every spelling that resolves to this source.
    pub fn cache_key(&self) -> String {
        match self {
            DataSource::Remote(url) => url.clone(),
            DataSource::File(path) => path
                .components()
                .filter(|c| !matches!(c, Component::CurDir))
                .collect::<PathBuf>()
                .display()
                .to_string(),
        }
    }
}

// ── CSV rows ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawResultRow {
    #[serde(rename = "Date")]
    date: Option<String>,
    #[serde(rename = "HomeTeam", alias = "Home")]
    home_team: Option<String>,
    #[serde(rename = "AwayTeam", alias = "Away")]
    away_team: Option<String>,
    #[serde(rename = "FTHG", alias = "HG")]
    home_goals: Option<String>,
    #[serde(rename = "FTAG", alias = "AG")]
    away_goals: Option<String>,
    #[serde(rename = "FTR", alias = "Res")]
    result: Option<String>,
}

impl RawResultRow {
    fn is_blank(&self) -> bool {
        [
            &self.date,
            &self.home_team,
            &self.away_team,
            &self.home_goals,
            &self.away_goals,
            &self.result,
        ]
        .iter()
        .all(|field| field.as_deref().map_or(true, |v| v.trim().is_empty()))
    }

    fn into_match(self) -> Result<MatchResult, String> {
        let date_raw = required(self.date, "Date")?;
        let date = parse_match_date(&date_raw).ok_or_else(|| format!("bad date '{}'", date_raw))?;
        let home_team = required(self.home_team, "HomeTeam")?;
        let away_team = required(self.away_team, "AwayTeam")?;
        let home_goals = goals(required(self.home_goals, "FTHG")?)?;
        let away_goals = goals(required(self.away_goals, "FTAG")?)?;
        let code = required(self.result, "FTR")?;
        let result = FullTimeResult::from_code(&code)
            .ok_or_else(|| format!("unknown result code '{}'", code))?;

        Ok(MatchResult {
            date,
            home_team,
            away_team,
            home_goals,
            away_goals,
            result,
        })
    }
}

fn required(field: Option<String>, column: &str) -> Result<String, String> {
    field
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| format!("missing {}", column))
}

// Some exports write goals as floats ("2.0").
fn goals(raw: String) -> Result<u32, String> {
    if let Ok(n) = raw.parse::<u32>() {
        return Ok(n);
    }
    match raw.parse::<f64>() {
        Ok(f) if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => Ok(f as u32),
        _ => Err(format!("bad goal count '{}'", raw)),
    }
}

/// Parse a football-data style results CSV.
///
/// Blank rows are dropped quietly; malformed rows are logged and skipped.
pub fn parse_results_csv(source_id: &str, bytes: &[u8]) -> Result<Dataset, DatasetError> {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim_start_matches('\u{feff}');

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut matches = Vec::new();
    let mut skipped = 0usize;

    for (index, row) in reader.deserialize::<RawResultRow>().enumerate() {
        // Header is line 1.
        let line = index + 2;
        let row = row.map_err(|source| DatasetError::Csv {
            source_id: source_id.to_string(),
            source,
        })?;
        if row.is_blank() {
            continue;
        }
        match row.into_match() {
            Ok(m) => matches.push(m),
            Err(reason) => {
                skipped += 1;
                tracing::warn!("Skipping {} line {}: {}", source_id, line, reason);
            }
        }
    }

    if matches.is_empty() {
        return Err(DatasetError::EmptyDataset {
            source_id: source_id.to_string(),
        });
    }
    if skipped > 0 {
        tracing::warn!("Skipped {} malformed rows in {}", skipped, source_id);
    }

    Ok(Dataset {
        source: source_id.to_string(),
        matches,
    })
}

// ── DatasetLoader ───────────────────────────────────────────────────────────

/// Loads results datasets and memoizes them by resolved source.
pub struct DatasetLoader {
    client: Client,
    settings: Settings,
    policy: SourcePolicy,
    cache: RwLock<HashMap<String, Arc<Dataset>>>,
}

impl DatasetLoader {
    pub fn new(settings: Settings) -> Result<Self, DatasetError> {
        Self::with_policy(settings, SourcePolicy::Any)
    }

    /// A loader that refuses anything outside the league catalogue.
    pub fn leagues_only(settings: Settings) -> Result<Self, DatasetError> {
        Self::with_policy(settings, SourcePolicy::LeaguesOnly)
    }

    fn with_policy(settings: Settings, policy: SourcePolicy) -> Result<Self, DatasetError> {
        let client = Client::builder()
            .timeout(settings.http_timeout)
            .build()
            .map_err(|source| DatasetError::Fetch {
                url: settings.data_base_url.clone(),
                source,
            })?;

        Ok(Self::from_parts(client, settings, policy))
    }

    fn from_parts(client: Client, settings: Settings, policy: SourcePolicy) -> Self {
        Self {
            client,
            settings,
            policy,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn resolve(&self, identifier: &str) -> Result<DataSource, DatasetError> {
        match self.policy {
            SourcePolicy::Any => Ok(DataSource::resolve(identifier, &self.settings)),
            SourcePolicy::LeaguesOnly => DataSource::resolve_league(identifier, &self.settings),
        }
    }

    pub async fn load(&self, identifier: &str) -> Result<Arc<Dataset>, DatasetError> {
        let source = self.resolve(identifier)?;
        let key = source.cache_key();

        if let Some(dataset) = self.cache.read().await.get(&key) {
            tracing::debug!("Dataset cache hit for {}", key);
            return Ok(Arc::clone(dataset));
        }

        let dataset = match source {
            DataSource::Remote(url) => {
                let bytes = self.fetch_remote(&url).await?;
                parse_results_csv(&url, &bytes)?
            }
            DataSource::File(path) => {
                tracing::info!("Reading results from {}", path.display());
                let bytes = tokio::fs::read(&path).await.map_err(|source| DatasetError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                parse_results_csv(&path.display().to_string(), &bytes)?
            }
        };

        tracing::info!("Loaded {} matches for {}", dataset.matches.len(), key);

        let mut cache = self.cache.write().await;
        // Another request may have filled the slot while this one was fetching.
        let entry = cache.entry(key).or_insert_with(|| Arc::new(dataset));
        Ok(Arc::clone(entry))
    }

    async fn fetch_remote(&self, url: &str) -> Result<Vec<u8>, DatasetError> {
        tracing::info!("Fetching results from {}…", url);

        let response = self.client
            .get(url)
            .send().await
            .map_err(|source| DatasetError::Fetch { url: url.to_string(), source })?;

        if !response.status().is_success() {
            return Err(DatasetError::HttpStatus {
                url: url.to_string(),
                status: response.status(),
            });
        }

        let bytes = response
            .bytes().await
            .map_err(|source| DatasetError::Fetch { url: url.to_string(), source })?;
        Ok(bytes.to_vec())
    }

    #[cfg(test)]
    pub(crate) fn for_local_upstream(settings: Settings, policy: SourcePolicy) -> Self {
        let client = Client::builder()
            .no_proxy()
            .timeout(settings.http_timeout)
            .build()
            .unwrap();
        Self::from_parts(client, settings, policy)
    }

    #[cfg(test)]
    pub(crate) async fn prime(&self, identifier: &str, dataset: Dataset) {
        let key = self.resolve(identifier).unwrap().cache_key();
        self.cache.write().await.insert(key, Arc::new(dataset));
    }

    #[cfg(test)]
    pub(crate) async fn cached_len(&self) -> usize {
        self.cache.read().await.len()
    }
}
