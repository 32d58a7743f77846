use thiserror::Error;

/// Failures raised by the momentum engine itself.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("team '{team}' did not play in {home} vs {away}")]
    InvalidInput {
        team: String,
        home: String,
        away: String,
    },

    #[error("no recent matches found for '{team}'")]
    TeamNotFound { team: String },
}

/// Failures while resolving, fetching or parsing a results dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("dataset request to {url} returned {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {source_id}: {source}")]
    Csv {
        source_id: String,
        #[source]
        source: csv::Error,
    },

    #[error("dataset {source_id} contains no usable match rows")]
    EmptyDataset { source_id: String },

    #[error("'{identifier}' is not a known league name or code")]
    UnsupportedSource { identifier: String },
}

/// Everything that can stop a matchup request at the CLI or API boundary.
#[derive(Debug, Error)]
pub enum MatchupError {
    #[error("please choose two different teams (both were '{0}')")]
    SameTeamSelected(String),

    #[error("invalid team name '{0}'")]
    InvalidTeamName(String),

    #[error("no recent matches found for '{team}'{}", did_you_mean(.suggestions))]
    UnknownTeam {
        team: String,
        suggestions: Vec<String>,
    },

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}
