// Dashboard view: every aggregate for one selection, computed in one pass.
//
// The two "top winners" tables and the win-rate table follow the full
// selection. Home goals follow the season only, and the season trend always
// covers the whole dataset.

use serde::Serialize;
use tracing::debug;

use crate::dataset::MatchRecord;
use crate::filter::{self, Selection};
use crate::stats::{self, OutcomeBreakdown, SeasonWins, TeamAggregate, TeamCount};

/// All dashboard panels for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub selection: Selection,
    pub top_n: usize,
    /// Matches passing the selection, in file order.
    pub matches: Vec<MatchRecord>,
    pub outcomes: OutcomeBreakdown,
    pub top_home_winners: Vec<TeamCount>,
    pub top_away_winners: Vec<TeamCount>,
    pub win_rates: Vec<TeamAggregate>,
    pub top_home_scorers: Vec<TeamCount>,
    pub season_wins: Vec<SeasonWins>,
}

impl DashboardView {
    /// Recompute every panel from `records` (the full dataset).
    pub fn build(records: &[MatchRecord], selection: &Selection, top_n: usize) -> Self {
        let season_scope = match selection.season {
            Some(season) => filter::by_season(records, season),
            None => records.to_vec(),
        };
        let matches = match selection.team.as_deref() {
            Some(team) => filter::by_team(&season_scope, team),
            None => season_scope.clone(),
        };

        debug!(
            "building view for {:?}: {} of {} matches",
            selection,
            matches.len(),
            records.len()
        );

        DashboardView {
            selection: selection.clone(),
            top_n,
            outcomes: stats::outcome_breakdown(&matches),
            top_home_winners: stats::top_home_winners(&matches, top_n),
            top_away_winners: stats::top_away_winners(&matches, top_n),
            win_rates: stats::team_win_rates(&matches),
            top_home_scorers: stats::top_home_goal_scorers(&season_scope, top_n),
            season_wins: stats::wins_by_season_and_team(records),
            matches,
        }
    }

    /// True when no match passes the selection.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Season trend rows for a single team, ascending by season.
    pub fn season_wins_for(&self, team: &str) -> Vec<&SeasonWins> {
        self.season_wins.iter().filter(|s| s.team == team).collect()
    }

    /// Win-rate row for a team, if it played in the selection.
    pub fn win_rate_for(&self, team: &str) -> Option<&TeamAggregate> {
        self.win_rates.iter().find(|t| t.team == team)
    }
}
