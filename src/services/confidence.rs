use crate::models::{ConfidenceLabel, ConfidenceVerdict};

/// Minimum momentum gap for each label, checked from the top down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfidenceThresholds {
    tiers: Vec<(u32, ConfidenceLabel)>,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self::new(vec![
            (36, ConfidenceLabel::FreeMoney),
            (29, ConfidenceLabel::Safe),
            (22, ConfidenceLabel::Great),
            (15, ConfidenceLabel::Good),
            (8, ConfidenceLabel::TooCloseToCall),
            (0, ConfidenceLabel::Risky),
        ])
    }
}

impl ConfidenceThresholds {
    /// Tiers may be given in any order; they are kept highest-first.
    pub fn new(mut tiers: Vec<(u32, ConfidenceLabel)>) -> Self {
        tiers.sort_by(|a, b| b.0.cmp(&a.0));
        Self { tiers }
    }

    pub fn label_for(&self, difference: u32) -> ConfidenceLabel {
        self.tiers
            .iter()
            .find(|(min, _)| difference >= *min)
            .map(|(_, label)| *label)
            .unwrap_or(ConfidenceLabel::Risky)
    }
}

pub struct ConfidenceClassifier {
    thresholds: ConfidenceThresholds,
}

impl ConfidenceClassifier {
    pub fn new() -> Self {
        Self::with_thresholds(ConfidenceThresholds::default())
    }

    pub fn with_thresholds(thresholds: ConfidenceThresholds) -> Self {
        Self { thresholds }
    }

    pub fn classify(&self, score1: i32, score2: i32) -> ConfidenceVerdict {
        let difference = score1.abs_diff(score2);
        ConfidenceVerdict {
            difference,
            label: self.thresholds.label_for(difference),
        }
    }
}

impl Default for ConfidenceClassifier {
    fn default() -> Self {
        Self::new()
    }
}
