use crate::errors::EngineError;
use crate::models::{FullTimeResult, MatchResult, Outcome, RecentForm, TeamMatchRecord, Venue};

/// Number of matches that make up a team's recent form.
pub const RECENT_FORM_LEN: usize = 6;

/// Re-express a fixture from `team`'s side of the pitch.
pub fn normalize_match(result: &MatchResult, team: &str) -> Result<TeamMatchRecord, EngineError> {
    if result.home_team == team {
        let outcome = match result.result {
            FullTimeResult::HomeWin => Outcome::Win,
            FullTimeResult::AwayWin => Outcome::Loss,
            FullTimeResult::Draw => Outcome::Draw,
        };
        Ok(TeamMatchRecord {
            date: result.date,
            opponent: result.away_team.clone(),
            goals_for: result.home_goals,
            goals_against: result.away_goals,
            outcome,
            venue: Venue::Home,
        })
    } else if result.away_team == team {
        let outcome = match result.result {
            FullTimeResult::AwayWin => Outcome::Win,
            FullTimeResult::HomeWin => Outcome::Loss,
            FullTimeResult::Draw => Outcome::Draw,
        };
        Ok(TeamMatchRecord {
            date: result.date,
            opponent: result.home_team.clone(),
            goals_for: result.away_goals,
            goals_against: result.home_goals,
            outcome,
            venue: Venue::Away,
        })
    } else {
        Err(EngineError::InvalidInput {
            team: team.to_string(),
            home: result.home_team.clone(),
            away: result.away_team.clone(),
        })
    }
}

/// Collect up to `limit` of `team`'s matches, most recent first.
///
/// The dataset is never reordered in place; a sorted view of references is
/// built per call. Matches on the same date keep their dataset order.
pub fn select_recent_matches(
    matches: &[MatchResult],
    team: &str,
    limit: usize,
) -> Result<RecentForm, EngineError> {
    let mut by_date: Vec<&MatchResult> = matches.iter().collect();
    by_date.sort_by(|a, b| b.date.cmp(&a.date));

    let mut recent = Vec::with_capacity(limit.min(by_date.len()));
    for result in by_date {
        if recent.len() >= limit {
            break;
        }
        if result.involves(team) {
            recent.push(normalize_match(result, team)?);
        }
    }

    let form = RecentForm {
        team: team.to_string(),
        matches: recent,
    };
    if form.is_empty() {
        return Err(EngineError::TeamNotFound { team: form.team });
    }

    Ok(form)
}
