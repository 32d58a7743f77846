use std::collections::BTreeSet;

use crate::errors::{EngineError, MatchupError};
use crate::models::{MatchResult, MatchupAnalysis, TeamAnalysis};
use crate::services::{
    momentum_display, select_recent_matches, ConfidenceClassifier, DatasetLoader, MomentumScorer,
    RECENT_FORM_LEN,
};
use crate::utils::{suggest_teams, validate_team_name};

const MAX_SUGGESTIONS: usize = 3;

pub struct MatchupAnalyzer {
    scorer: MomentumScorer,
    classifier: ConfidenceClassifier,
}

impl MatchupAnalyzer {
    pub fn new() -> Self {
        Self::with_parts(MomentumScorer::new(), ConfidenceClassifier::new())
    }

    pub fn with_parts(scorer: MomentumScorer, classifier: ConfidenceClassifier) -> Self {
        Self { scorer, classifier }
    }

    /// Score one team's recent form.
    pub fn analyze_team(&self, team: &str, matches: &[MatchResult]) -> Result<TeamAnalysis, EngineError> {
        let form = select_recent_matches(matches, team, RECENT_FORM_LEN)?;
        let breakdown = self.scorer.score(&form);

        Ok(TeamAnalysis {
            team: team.to_string(),
            score: breakdown.score,
            display: momentum_display(breakdown.score),
            form: form.form_string(),
            recent: breakdown.entries,
        })
    }

    /// Compare two teams' momentum and grade the gap between them.
    ///
    /// Each side is analysed independently over the same read-only slice.
    pub fn analyze_matchup(
        &self,
        team1: &str,
        team2: &str,
        matches: &[MatchResult],
    ) -> Result<MatchupAnalysis, EngineError> {
        let team1 = self.analyze_team(team1, matches)?;
        let team2 = self.analyze_team(team2, matches)?;
        let confidence = self.classifier.classify(team1.score, team2.score);

        Ok(MatchupAnalysis {
            team1,
            team2,
            confidence,
        })
    }

    /// Validate the request, load the dataset and analyse it.
    ///
    /// Unknown teams come back with close matches from the dataset attached.
    pub async fn analyze_from_source(
        &self,
        loader: &DatasetLoader,
        source: &str,
        team1: &str,
        team2: &str,
    ) -> Result<MatchupAnalysis, MatchupError> {
        for team in [team1, team2] {
            if !validate_team_name(team) {
                return Err(MatchupError::InvalidTeamName(team.to_string()));
            }
        }
        validate_matchup(team1, team2)?;

        let dataset = loader.load(source).await?;
        match self.analyze_matchup(team1, team2, &dataset.matches) {
            Ok(analysis) => Ok(analysis),
            Err(EngineError::TeamNotFound { team }) => {
                let teams = list_teams(&dataset.matches);
                let suggestions = suggest_teams(&team, &teams, MAX_SUGGESTIONS);
                Err(MatchupError::UnknownTeam { team, suggestions })
            }
            Err(other) => Err(other.into()),
        }
    }
}

impl Default for MatchupAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Every team that appears on either side of a fixture, sorted.
pub fn list_teams(matches: &[MatchResult]) -> Vec<String> {
    matches
        .iter()
        .flat_map(|m| [m.home_team.as_str(), m.away_team.as_str()])
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Boundary check run before the engine sees a request.
pub fn validate_matchup(team1: &str, team2: &str) -> Result<(), MatchupError> {
    if team1 == team2 {
        return Err(MatchupError::SameTeamSelected(team1.to_string()));
    }
    Ok(())
}
