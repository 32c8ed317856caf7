// Aggregate views over a slice of match records.
//
// Every function here is pure: it takes an already-filtered slice, builds its
// own grouping, and returns a fresh Vec. Grouping goes through a BTreeMap so
// equal counts come out in team-name order.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dataset::MatchRecord;
use crate::outcome::{classify, Outcome};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// A team paired with a count (wins or goals, depending on the view).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamCount {
    pub team: String,
    pub count: u32,
}

/// Games, wins and win rate ("aproveitamento") for one team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamAggregate {
    pub team: String,
    pub games_played: u32,
    pub wins: u32,
    /// Percentage in [0, 100], rounded to 2 decimals.
    pub win_rate: f64,
}

/// Wins for one team in one season (draws excluded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonWins {
    pub season: u16,
    pub team: String,
    pub wins: u32,
}

/// How a set of matches split between home wins, away wins and draws.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeBreakdown {
    pub home_wins: u32,
    pub away_wins: u32,
    pub draws: u32,
}

impl OutcomeBreakdown {
    pub fn total(&self) -> u32 {
        self.home_wins + self.away_wins + self.draws
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Win rate as a percentage rounded to 2 decimals; 0 when no games.
pub fn win_rate(wins: u32, games_played: u32) -> f64 {
    if games_played == 0 {
        return 0.0;
    }
    let pct = f64::from(wins) / f64::from(games_played) * 100.0;
    (pct * 100.0).round() / 100.0
}

/// Sort descending by count and keep the first `n`. The input map is in name
/// order and the sort is stable, so ties stay alphabetical.
fn ranked(counts: BTreeMap<&str, u32>, n: usize) -> Vec<TeamCount> {
    let mut out: Vec<TeamCount> = counts
        .into_iter()
        .map(|(team, count)| TeamCount {
            team: team.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out.truncate(n);
    out
}

fn top_winners(records: &[MatchRecord], n: usize, side: Outcome) -> Vec<TeamCount> {
    let mut counts = BTreeMap::new();
    for record in records {
        if classify(record) != side {
            continue;
        }
        if let Some(team) = side.winner(record) {
            *counts.entry(team).or_insert(0u32) += 1;
        }
    }
    ranked(counts, n)
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Teams with the most wins at home, best first, at most `n` entries.
pub fn top_home_winners(records: &[MatchRecord], n: usize) -> Vec<TeamCount> {
    top_winners(records, n, Outcome::HomeWin)
}

/// Teams with the most wins away from home, best first, at most `n` entries.
pub fn top_away_winners(records: &[MatchRecord], n: usize) -> Vec<TeamCount> {
    top_winners(records, n, Outcome::AwayWin)
}

/// One entry per team seen on either side, sorted by win rate (best first).
///
/// Ties on win rate are broken by wins (more first) and then by name.
pub fn team_win_rates(records: &[MatchRecord]) -> Vec<TeamAggregate> {
    // team -> (games, wins)
    let mut tally: BTreeMap<&str, (u32, u32)> = BTreeMap::new();
    for record in records {
        let outcome = classify(record);
        // A team listed on both sides played one game, not two.
        let same_team = record.home_team == record.away_team;

        let home = tally.entry(record.home_team.as_str()).or_default();
        home.0 += 1;
        if outcome == Outcome::HomeWin || (same_team && outcome == Outcome::AwayWin) {
            home.1 += 1;
        }
        if same_team {
            continue;
        }

        let away = tally.entry(record.away_team.as_str()).or_default();
        away.0 += 1;
        if outcome == Outcome::AwayWin {
            away.1 += 1;
        }
    }

    let mut out: Vec<TeamAggregate> = tally
        .into_iter()
        .map(|(team, (games_played, wins))| TeamAggregate {
            team: team.to_string(),
            games_played,
            wins,
            win_rate: win_rate(wins, games_played),
        })
        .collect();
    out.sort_by(|a, b| {
        b.win_rate
            .total_cmp(&a.win_rate)
            .then_with(|| b.wins.cmp(&a.wins))
            .then_with(|| a.team.cmp(&b.team))
    });
    out
}

/// Total goals scored at home per team, highest first, at most `n` entries.
pub fn top_home_goal_scorers(records: &[MatchRecord], n: usize) -> Vec<TeamCount> {
    let mut goals = BTreeMap::new();
    for record in records {
        let total = goals.entry(record.home_team.as_str()).or_insert(0u32);
        *total = total.saturating_add(record.home_goals);
    }
    ranked(goals, n)
}

/// Wins per (season, team), ordered by season and then team name.
pub fn wins_by_season_and_team(records: &[MatchRecord]) -> Vec<SeasonWins> {
    let mut counts: BTreeMap<(u16, &str), u32> = BTreeMap::new();
    for record in records {
        if let Some(team) = classify(record).winner(record) {
            *counts.entry((record.season, team)).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .map(|((season, team), wins)| SeasonWins {
            season,
            team: team.to_string(),
            wins,
        })
        .collect()
}

/// Count home wins, away wins and draws.
pub fn outcome_breakdown(records: &[MatchRecord]) -> OutcomeBreakdown {
    let mut breakdown = OutcomeBreakdown::default();
    for record in records {
        match classify(record) {
            Outcome::HomeWin => breakdown.home_wins += 1,
            Outcome::AwayWin => breakdown.away_wins += 1,
            Outcome::Draw => breakdown.draws += 1,
        }
    }
    breakdown
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn m(season: u16, home: &str, away: &str, hg: u32, ag: u32) -> MatchRecord {
        MatchRecord::new(season, home, away, hg, ag)
    }

    fn small_league() -> Vec<MatchRecord> {
        vec![
            m(2019, "A", "B", 2, 1),
            m(2019, "B", "A", 0, 0),
            m(2020, "A", "B", 1, 3),
        ]
    }

    fn busy_season() -> Vec<MatchRecord> {
        vec![
            m(2021, "Flamengo", "Vasco", 3, 0),
            m(2021, "Flamengo", "Santos", 2, 1),
            m(2021, "Palmeiras", "Flamengo", 1, 0),
            m(2021, "Santos", "Palmeiras", 2, 2),
            m(2021, "Vasco", "Santos", 1, 0),
            m(2021, "Palmeiras", "Vasco", 4, 1),
            m(2021, "Santos", "Flamengo", 0, 2),
            m(2021, "Vasco", "Palmeiras", 0, 1),
        ]
    }

    // -- top winners --

    #[test]
    fn top_home_winners_counts_and_orders() {
        let top = top_home_winners(&busy_season(), 10);
        assert_eq!(
            top,
            vec![
                TeamCount { team: "Flamengo".into(), count: 2 },
                TeamCount { team: "Palmeiras".into(), count: 2 },
                TeamCount { team: "Vasco".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn top_away_winners_counts_and_orders() {
        let top = top_away_winners(&busy_season(), 10);
        assert_eq!(
            top,
            vec![
                TeamCount { team: "Flamengo".into(), count: 1 },
                TeamCount { team: "Palmeiras".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn top_winners_respects_limit() {
        let top = top_home_winners(&busy_season(), 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].team, "Flamengo");
        assert!(top_home_winners(&busy_season(), 0).is_empty());
    }

    #[test]
    fn top_winners_non_increasing() {
        let mut records = busy_season();
        for i in 0..15u32 {
            records.push(m(2021, &format!("T{}", i % 12), "X", i % 3 + 1, 0));
        }
        let top = top_home_winners(&records, 10);
        assert!(top.len() <= 10);
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
    }

    // -- win rates --

    #[test]
    fn win_rates_small_league() {
        let rates = team_win_rates(&small_league());
        let a = rates.iter().find(|t| t.team == "A").unwrap();
        assert_eq!(a.games_played, 3);
        assert_eq!(a.wins, 1);
        assert!((a.win_rate - 33.33).abs() < 1e-9);

        let b = rates.iter().find(|t| t.team == "B").unwrap();
        assert_eq!(b.games_played, 3);
        assert_eq!(b.wins, 1);
    }

    #[test]
    fn win_rates_sorted_and_bounded() {
        let rates = team_win_rates(&busy_season());
        assert_eq!(rates.len(), 4);
        assert!(rates
            .windows(2)
            .all(|w| w[0].win_rate >= w[1].win_rate));
        for entry in &rates {
            assert!((0.0..=100.0).contains(&entry.win_rate));
            assert_eq!(entry.win_rate, win_rate(entry.wins, entry.games_played));
        }
        // Flamengo: 4 games, 3 wins
        assert_eq!(rates[0].team, "Flamengo");
        assert!((rates[0].win_rate - 75.0).abs() < 1e-9);
    }

    #[test]
    fn win_rates_count_self_match_once() {
        let records = vec![
            m(2019, "A", "A", 1, 0),
            m(2019, "A", "B", 0, 0),
        ];
        let rates = team_win_rates(&records);
        let a = rates.iter().find(|t| t.team == "A").unwrap();
        assert_eq!((a.games_played, a.wins), (2, 1));
        assert!((a.win_rate - 50.0).abs() < 1e-9);
        let b = rates.iter().find(|t| t.team == "B").unwrap();
        assert_eq!((b.games_played, b.wins), (1, 0));
    }

    #[test]
    fn win_rate_rounding() {
        assert_eq!(win_rate(0, 0), 0.0);
        assert_eq!(win_rate(0, 5), 0.0);
        assert_eq!(win_rate(5, 5), 100.0);
        assert!((win_rate(2, 3) - 66.67).abs() < 1e-9);
        assert!((win_rate(1, 7) - 14.29).abs() < 1e-9);
    }

    // -- goals --

    #[test]
    fn home_goal_scorers_sum_home_goals_only() {
        let top = top_home_goal_scorers(&busy_season(), 10);
        assert_eq!(
            top,
            vec![
                TeamCount { team: "Flamengo".into(), count: 5 },
                TeamCount { team: "Palmeiras".into(), count: 5 },
                TeamCount { team: "Santos".into(), count: 2 },
                TeamCount { team: "Vasco".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn home_goal_scorers_keep_goalless_teams() {
        let records = vec![m(2019, "A", "B", 0, 1)];
        assert_eq!(
            top_home_goal_scorers(&records, 5),
            vec![TeamCount { team: "A".into(), count: 0 }]
        );
    }

    // -- season trend --

    #[test]
    fn wins_by_season_small_league() {
        assert_eq!(
            wins_by_season_and_team(&small_league()),
            vec![
                SeasonWins { season: 2019, team: "A".into(), wins: 1 },
                SeasonWins { season: 2020, team: "B".into(), wins: 1 },
            ]
        );
    }

    #[test]
    fn season_wins_sum_to_decisive_matches() {
        let mut records = busy_season();
        records.extend(small_league());
        let trend = wins_by_season_and_team(&records);
        for season in [2019u16, 2020, 2021] {
            let from_trend: u32 = trend
                .iter()
                .filter(|s| s.season == season)
                .map(|s| s.wins)
                .sum();
            let decisive = records
                .iter()
                .filter(|r| r.season == season && classify(r) != Outcome::Draw)
                .count() as u32;
            assert_eq!(from_trend, decisive, "season {season}");
        }
    }

    // -- breakdown --

    #[test]
    fn outcome_breakdown_totals() {
        let breakdown = outcome_breakdown(&busy_season());
        assert_eq!(breakdown.home_wins, 5);
        assert_eq!(breakdown.away_wins, 2);
        assert_eq!(breakdown.draws, 1);
        assert_eq!(breakdown.total(), 8);
    }

    // -- empty input and idempotence --

    #[test]
    fn empty_input_yields_empty_views() {
        let empty: Vec<MatchRecord> = Vec::new();
        assert!(top_home_winners(&empty, 10).is_empty());
        assert!(top_away_winners(&empty, 10).is_empty());
        assert!(team_win_rates(&empty).is_empty());
        assert!(top_home_goal_scorers(&empty, 10).is_empty());
        assert!(wins_by_season_and_team(&empty).is_empty());
        assert_eq!(outcome_breakdown(&empty).total(), 0);
    }

    #[test]
    fn views_are_idempotent() {
        let records = busy_season();
        assert_eq!(top_home_winners(&records, 3), top_home_winners(&records, 3));
        assert_eq!(top_away_winners(&records, 3), top_away_winners(&records, 3));
        assert_eq!(team_win_rates(&records), team_win_rates(&records));
        assert_eq!(
            top_home_goal_scorers(&records, 3),
            top_home_goal_scorers(&records, 3)
        );
        assert_eq!(
            wins_by_season_and_team(&records),
            wins_by_season_and_team(&records)
        );
        assert_eq!(records, busy_season());
    }
}
