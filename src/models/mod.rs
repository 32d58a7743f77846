use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Full-time result code as published in the `FTR` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FullTimeResult {
    #[serde(rename = "H")]
    HomeWin,
    #[serde(rename = "A")]
    AwayWin,
    #[serde(rename = "D")]
    Draw,
}

impl FullTimeResult {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "H" => Some(Self::HomeWin),
            "A" => Some(Self::AwayWin),
            "D" => Some(Self::Draw),
            _ => None,
        }
    }
}

/// One historical fixture, exactly as it appears in the source dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u32,
    pub away_goals: u32,
    pub result: FullTimeResult,
}

impl MatchResult {
    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
    #[serde(rename = "D")]
    Draw,
}

impl Outcome {
    pub fn letter(self) -> char {
        match self {
            Outcome::Win => 'W',
            Outcome::Loss => 'L',
            Outcome::Draw => 'D',
        }
    }

    /// Sign applied to a rank weight: wins add, losses subtract, draws are neutral.
    pub fn sign(self) -> i32 {
        match self {
            Outcome::Win => 1,
            Outcome::Loss => -1,
            Outcome::Draw => 0,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Venue {
    Home,
    Away,
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Venue::Home => write!(f, "Home"),
            Venue::Away => write!(f, "Away"),
        }
    }
}

/// A fixture seen from one participant's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMatchRecord {
    pub date: NaiveDate,
    pub opponent: String,
    pub goals_for: u32,
    pub goals_against: u32,
    pub outcome: Outcome,
    pub venue: Venue,
}

impl TeamMatchRecord {
    pub fn scoreline(&self) -> String {
        format!("{}-{}", self.goals_for, self.goals_against)
    }
}

/// A team's latest matches, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentForm {
    pub team: String,
    pub matches: Vec<TeamMatchRecord>,
}

impl RecentForm {
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Outcome letters in recency order, e.g. "WWDLWL".
    pub fn form_string(&self) -> String {
        self.matches.iter().map(|m| m.outcome.letter()).collect()
    }
}

/// Presentation row produced alongside the score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentEntry {
    pub date: NaiveDate,
    pub outcome: Outcome,
    pub scoreline: String,
    pub opponent: String,
    pub venue: Venue,
}

impl From<&TeamMatchRecord> for RecentEntry {
    fn from(record: &TeamMatchRecord) -> Self {
        Self {
            date: record.date,
            outcome: record.outcome,
            scoreline: record.scoreline(),
            opponent: record.opponent.clone(),
            venue: record.venue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MomentumBreakdown {
    pub score: i32,
    pub entries: Vec<RecentEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConfidenceLabel {
    #[serde(rename = "RISKY")]
    Risky,
    #[serde(rename = "TOO CLOSE TO CALL")]
    TooCloseToCall,
    #[serde(rename = "GOOD")]
    Good,
    #[serde(rename = "GREAT")]
    Great,
    #[serde(rename = "SAFE")]
    Safe,
    #[serde(rename = "FREE MONEY")]
    FreeMoney,
}

impl ConfidenceLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceLabel::Risky => "RISKY",
            ConfidenceLabel::TooCloseToCall => "TOO CLOSE TO CALL",
            ConfidenceLabel::Good => "GOOD",
            ConfidenceLabel::Great => "GREAT",
            ConfidenceLabel::Safe => "SAFE",
            ConfidenceLabel::FreeMoney => "FREE MONEY",
        }
    }
}

impl fmt::Display for ConfidenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceVerdict {
    pub difference: u32,
    pub label: ConfidenceLabel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamAnalysis {
    pub team: String,
    pub score: i32,
    pub display: String,
    pub form: String,
    pub recent: Vec<RecentEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchupAnalysis {
    pub team1: TeamAnalysis,
    pub team2: TeamAnalysis,
    pub confidence: ConfidenceVerdict,
}

/// A parsed results file together with the identifier it was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub source: String,
    pub matches: Vec<MatchResult>,
}

/// A league and its football-data.co.uk division code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct League {
    pub name: &'static str,
    pub code: &'static str,
}

// API Response types
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: Utc::now(),
        }
    }
}
