use crate::models::{MomentumBreakdown, RecentEntry, RecentForm};

/// Points awarded per recency rank. Rank 0 is the latest match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    weights: Vec<i32>,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            weights: vec![6, 5, 4, 3, 2, 1],
        }
    }
}

impl WeightTable {
    pub fn new(weights: Vec<i32>) -> Self {
        Self { weights }
    }

    pub fn weight_for_rank(&self, rank: usize) -> Option<i32> {
        self.weights.get(rank).copied()
    }
}

pub struct MomentumScorer {
    weights: WeightTable,
}

impl MomentumScorer {
    pub fn new() -> Self {
        Self::with_weights(WeightTable::default())
    }

    pub fn with_weights(weights: WeightTable) -> Self {
        Self { weights }
    }

    /// Weighted win/loss sum over the form, plus the display rows in the same order.
    ///
    /// Ranks beyond the weight table contribute nothing.
    pub fn score(&self, form: &RecentForm) -> MomentumBreakdown {
        let mut score = 0;
        let mut entries = Vec::with_capacity(form.len());

        for (rank, record) in form.matches.iter().enumerate() {
            let weight = self.weights.weight_for_rank(rank).unwrap_or(0);
            score += weight * record.outcome.sign();
            entries.push(RecentEntry::from(record));
        }

        MomentumBreakdown { score, entries }
    }
}

impl Default for MomentumScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// "{score} (OKAY)" for non-negative momentum, "{score} (DISGUSTING)" otherwise.
pub fn momentum_display(score: i32) -> String {
    let verdict = if score >= 0 { "OKAY" } else { "DISGUSTING" };
    format!("{} ({})", score, verdict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Outcome, TeamMatchRecord, Venue};
    use chrono::NaiveDate;

    fn form_of(outcomes: &[Outcome]) -> RecentForm {
        let matches = outcomes
            .iter()
            .enumerate()
            .map(|(i, outcome)| TeamMatchRecord {
                date: NaiveDate::from_ymd_opt(2024, 5, 30 - i as u32).unwrap(),
                opponent: format!("Opp{}", i),
                goals_for: 1,
                goals_against: 0,
                outcome: *outcome,
                venue: if i % 2 == 0 { Venue::Home } else { Venue::Away },
            })
            .collect();
        RecentForm {
            team: "X".to_string(),
            matches,
        }
    }

    #[test]
    fn test_full_form_extremes() {
        let scorer = MomentumScorer::new();
        assert_eq!(scorer.score(&form_of(&[Outcome::Win; 6])).score, 21);
        assert_eq!(scorer.score(&form_of(&[Outcome::Loss; 6])).score, -21);
        assert_eq!(scorer.score(&form_of(&[Outcome::Draw; 6])).score, 0);
    }

    #[test]
    fn test_short_form_uses_leading_weights() {
        let scorer = MomentumScorer::new();
        let breakdown = scorer.score(&form_of(&[Outcome::Win, Outcome::Loss]));
        assert_eq!(breakdown.score, 1);
        assert_eq!(breakdown.entries.len(), 2);
    }

    #[test]
    fn test_most_recent_result_dominates() {
        let scorer = MomentumScorer::new();
        let outcomes = [
            Outcome::Loss,
            Outcome::Win,
            Outcome::Win,
            Outcome::Draw,
            Outcome::Loss,
            Outcome::Win,
        ];
        // -6 + 5 + 4 + 0 - 2 + 1
        assert_eq!(scorer.score(&form_of(&outcomes)).score, 2);
    }

    #[test]
    fn test_empty_form_scores_zero() {
        let breakdown = MomentumScorer::new().score(&RecentForm::default());
        assert_eq!(breakdown.score, 0);
        assert!(breakdown.entries.is_empty());
    }

    #[test]
    fn test_entries_follow_form_order() {
        let breakdown = MomentumScorer::new().score(&form_of(&[Outcome::Win, Outcome::Draw]));
        assert_eq!(breakdown.entries[0].opponent, "Opp0");
        assert_eq!(breakdown.entries[0].scoreline, "1-0");
        assert_eq!(breakdown.entries[0].venue, Venue::Home);
        assert_eq!(breakdown.entries[1].outcome, Outcome::Draw);
        assert_eq!(breakdown.entries[1].venue, Venue::Away);
    }

    #[test]
    fn test_empty_weight_table_scores_zero_but_keeps_rows() {
        let scorer = MomentumScorer::with_weights(WeightTable::new(vec![]));
        let breakdown = scorer.score(&form_of(&[Outcome::Win, Outcome::Loss]));
        assert_eq!(breakdown.score, 0);
        assert_eq!(breakdown.entries.len(), 2);
    }

    #[test]
    fn test_custom_weights() {
        let scorer = MomentumScorer::with_weights(WeightTable::new(vec![3, 1]));
        let breakdown = scorer.score(&form_of(&[Outcome::Loss, Outcome::Win, Outcome::Win]));
        assert_eq!(breakdown.score, -2);
        assert_eq!(breakdown.entries.len(), 3);
    }

    #[test]
    fn test_momentum_display() {
        assert_eq!(momentum_display(7), "7 (OKAY)");
        assert_eq!(momentum_display(0), "0 (OKAY)");
        assert_eq!(momentum_display(-3), "-3 (DISGUSTING)");
    }
}
