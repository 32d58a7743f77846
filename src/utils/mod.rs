use chrono::NaiveDate;
use strsim::jaro_winkler;

/// Minimum Jaro-Winkler similarity for a team to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Parse a day-first match date ("dd/mm/yyyy" or "dd/mm/yy"), falling back to ISO "yyyy-mm-dd".
pub fn parse_match_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Some((_, year)) = raw.rsplit_once('/') {
        let format = if year.len() == 2 { "%d/%m/%y" } else { "%d/%m/%Y" };
        return NaiveDate::parse_from_str(raw, format).ok();
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Validate team name format
pub fn validate_team_name(name: &str) -> bool {
    !name.trim().is_empty() && name.len() <= 100
}

/// Known teams that look like `query`, best match first.
pub fn suggest_teams(query: &str, teams: &[String], limit: usize) -> Vec<String> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(f64, &String)> = teams
        .iter()
        .map(|team| {
            let candidate = team.to_lowercase();
            let mut similarity = jaro_winkler(&query, &candidate);
            if candidate.contains(&query) || query.contains(&candidate) {
                similarity = similarity.max(0.9);
            }
            (similarity, team)
        })
        .filter(|(similarity, _)| *similarity >= SUGGESTION_THRESHOLD)
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().take(limit).map(|(_, team)| team.clone()).collect()
}
