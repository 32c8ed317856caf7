// Season and team selection over match records.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::dataset::MatchRecord;

/// The user's current filter. `None` on either field means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub season: Option<u16>,
    pub team: Option<String>,
}

impl Selection {
    pub fn all() -> Self {
        Selection::default()
    }

    pub fn with_season(mut self, season: u16) -> Self {
        self.season = Some(season);
        self
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// True if the record passes both the season and the team filter.
    pub fn matches(&self, record: &MatchRecord) -> bool {
        self.season.map_or(true, |s| record.season == s)
            && self.team.as_deref().map_or(true, |t| record.involves(t))
    }
}

/// Records from one season.
pub fn by_season(records: &[MatchRecord], season: u16) -> Vec<MatchRecord> {
    records
        .iter()
        .filter(|r| r.season == season)
        .cloned()
        .collect()
}

/// Records where `team` played home or away.
pub fn by_team(records: &[MatchRecord], team: &str) -> Vec<MatchRecord> {
    records.iter().filter(|r| r.involves(team)).cloned().collect()
}

/// Records passing the whole selection.
pub fn apply(records: &[MatchRecord], selection: &Selection) -> Vec<MatchRecord> {
    records
        .iter()
        .filter(|r| selection.matches(r))
        .cloned()
        .collect()
}

/// Distinct seasons, ascending.
pub fn seasons(records: &[MatchRecord]) -> Vec<u16> {
    records
        .iter()
        .map(|r| r.season)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct team names from either side, ascending.
pub fn teams(records: &[MatchRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(|r| [r.home_team.as_str(), r.away_team.as_str()])
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
