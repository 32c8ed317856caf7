// Match outcome classification.

use std::cmp::Ordering;

use serde::Serialize;

use crate::dataset::MatchRecord;

/// Result of a single match from the home side's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Draw,
}

impl Outcome {
    /// Name of the winning team, or `None` for a draw.
    pub fn winner(self, record: &MatchRecord) -> Option<&str> {
        match self {
            Outcome::HomeWin => Some(&record.home_team),
            Outcome::AwayWin => Some(&record.away_team),
            Outcome::Draw => None,
        }
    }

    /// Single-letter code: H, A or D.
    pub fn code(&self) -> char {
        match self {
            Outcome::HomeWin => 'H',
            Outcome::AwayWin => 'A',
            Outcome::Draw => 'D',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::HomeWin => "Home win",
            Outcome::AwayWin => "Away win",
            Outcome::Draw => "Draw",
        }
    }
}

/// Classify a match by comparing goals. Equal scores are a draw.
pub fn classify(record: &MatchRecord) -> Outcome {
    match record.home_goals.cmp(&record.away_goals) {
        Ordering::Greater => Outcome::HomeWin,
        Ordering::Less => Outcome::AwayWin,
        Ordering::Equal => Outcome::Draw,
    }
}

/// Classify every record, preserving order.
pub fn classify_all(records: &[MatchRecord]) -> Vec<Outcome> {
    records.iter().map(classify).collect()
}
