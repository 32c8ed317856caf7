// Non-interactive report: the dashboard view as plain text or JSON.

use std::collections::BTreeSet;
use std::io::{self, Write};

use placar_core::dataset::{LoadWarning, MatchRecord};
use placar_core::filter::Selection;
use placar_core::outcome::classify;
use placar_core::stats::{OutcomeBreakdown, SeasonWins, TeamAggregate, TeamCount};
use placar_core::view::DashboardView;
use serde::Serialize;

use crate::tui::widgets::matches::format_score;
use crate::tui::widgets::status_bar::{season_label, team_label};
use crate::tui::widgets::summary::outcome_text;
use crate::tui::widgets::trend::pivot;

const NO_DATA: &str = "  (no data)";

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// Write every panel of `view` as aligned text tables.
pub fn write_text<W: Write>(out: &mut W, view: &DashboardView, include_matches: bool) -> io::Result<()> {
    writeln!(
        out,
        "{} | {} | {} matches",
        season_label(view.selection.season),
        team_label(view.selection.team.as_deref()),
        view.matches.len()
    )?;
    writeln!(out, "{}", outcome_text(&view.outcomes))?;

    writeln!(out)?;
    writeln!(out, "Top {} home winners", view.top_n)?;
    write_counts(out, &view.top_home_winners, "Wins")?;

    writeln!(out)?;
    writeln!(out, "Top {} away winners", view.top_n)?;
    write_counts(out, &view.top_away_winners, "Wins")?;

    writeln!(out)?;
    writeln!(out, "Win rate")?;
    write_win_rates(out, &view.win_rates)?;

    writeln!(out)?;
    writeln!(
        out,
        "Top {} home scorers ({})",
        view.top_n,
        season_label(view.selection.season)
    )?;
    write_counts(out, &view.top_home_scorers, "Goals")?;

    writeln!(out)?;
    writeln!(out, "Wins per season (all seasons)")?;
    write_trend(out, &view.season_wins)?;

    if include_matches {
        writeln!(out)?;
        writeln!(out, "Matches")?;
        write_matches(out, &view.matches)?;
    }
    Ok(())
}

/// Ranked `(team, count)` rows under a "# Team <column>" header.
fn write_counts<W: Write>(out: &mut W, counts: &[TeamCount], column: &str) -> io::Result<()> {
    if counts.is_empty() {
        return writeln!(out, "{NO_DATA}");
    }
    writeln!(out, "  {:>3} {:<24} {:>5}", "#", "Team", column)?;
    for (i, entry) in counts.iter().enumerate() {
        writeln!(out, "  {:>2}. {:<24} {:>5}", i + 1, entry.team, entry.count)?;
    }
    Ok(())
}

fn write_win_rates<W: Write>(out: &mut W, rates: &[TeamAggregate]) -> io::Result<()> {
    if rates.is_empty() {
        return writeln!(out, "{NO_DATA}");
    }
    writeln!(out, "  {:<24} {:>5} {:>5} {:>9}", "Team", "Games", "Wins", "Win rate")?;
    for agg in rates {
        writeln!(
            out,
            "  {:<24} {:>5} {:>5} {:>8.2}%",
            agg.team, agg.games_played, agg.wins, agg.win_rate
        )?;
    }
    Ok(())
}

fn write_trend<W: Write>(out: &mut W, season_wins: &[SeasonWins]) -> io::Result<()> {
    let seasons: Vec<u16> = season_wins
        .iter()
        .map(|s| s.season)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let rows = pivot(season_wins, &seasons);
    if rows.is_empty() {
        return writeln!(out, "{NO_DATA}");
    }

    write!(out, "  {:<24}", "Team")?;
    for season in &seasons {
        write!(out, " {season:>5}")?;
    }
    writeln!(out, " {:>5}", "Total")?;
    for row in rows {
        write!(out, "  {:<24}", row.team)?;
        for wins in &row.wins {
            write!(out, " {wins:>5}")?;
        }
        writeln!(out, " {:>5}", row.total)?;
    }
    Ok(())
}

fn write_matches<W: Write>(out: &mut W, matches: &[MatchRecord]) -> io::Result<()> {
    if matches.is_empty() {
        return writeln!(out, "{NO_DATA}");
    }
    for record in matches {
        writeln!(
            out,
            "  {} {:<24} {:^7} {:<24} {}",
            record.season,
            record.home_team,
            format_score(record),
            record.away_team,
            classify(record).label()
        )?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct JsonReport<'a> {
    selection: &'a Selection,
    top_n: usize,
    match_count: usize,
    outcomes: &'a OutcomeBreakdown,
    top_home_winners: &'a [TeamCount],
    top_away_winners: &'a [TeamCount],
    win_rates: &'a [TeamAggregate],
    top_home_scorers: &'a [TeamCount],
    season_wins: &'a [SeasonWins],
    warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matches: Option<&'a [MatchRecord]>,
}

/// Pretty-printed JSON document for `view` plus the load warnings.
pub fn render_json(
    view: &DashboardView,
    warnings: &[LoadWarning],
    include_matches: bool,
) -> serde_json::Result<String> {
    let report = JsonReport {
        selection: &view.selection,
        top_n: view.top_n,
        match_count: view.matches.len(),
        outcomes: &view.outcomes,
        top_home_winners: &view.top_home_winners,
        top_away_winners: &view.top_away_winners,
        win_rates: &view.win_rates,
        top_home_scorers: &view.top_home_scorers,
        season_wins: &view.season_wins,
        warnings: warnings.iter().map(ToString::to_string).collect(),
        matches: include_matches.then_some(view.matches.as_slice()),
    };
    serde_json::to_string_pretty(&report)
}
