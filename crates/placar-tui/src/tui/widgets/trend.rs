// Trend widget: wins per team per season across the whole dataset.
//
// Left: a team x season table. Right (when a team is selected): that team's
// wins per season as a bar chart.

use std::collections::BTreeMap;

use placar_core::stats::SeasonWins;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{BarChart, Cell, Row, Table};
use ratatui::Frame;

use super::{clamp_scroll, render_empty, table_rows, titled_block};
use crate::app::App;
use crate::tui::layout::split_halves;

const TITLE: &str = "Wins per season";

/// One team's wins laid out against the season columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendRow {
    pub team: String,
    /// Wins per season, aligned with the `seasons` passed to `pivot`.
    pub wins: Vec<u32>,
    pub total: u32,
}

/// Pivot (season, team, wins) triples into one row per team, most total
/// wins first.
pub fn pivot(season_wins: &[SeasonWins], seasons: &[u16]) -> Vec<TrendRow> {
    let mut by_team: BTreeMap<&str, Vec<u32>> = BTreeMap::new();
    for entry in season_wins {
        let Some(col) = seasons.iter().position(|s| *s == entry.season) else {
            continue;
        };
        let row = by_team
            .entry(entry.team.as_str())
            .or_insert_with(|| vec![0; seasons.len()]);
        row[col] += entry.wins;
    }

    let mut rows: Vec<TrendRow> = by_team
        .into_iter()
        .map(|(team, wins)| TrendRow {
            team: team.to_string(),
            total: wins.iter().sum(),
            wins,
        })
        .collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total));
    rows
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let seasons = app.seasons();
    let rows = pivot(&app.view.season_wins, seasons);
    if rows.is_empty() {
        render_empty(frame, area, TITLE);
        return;
    }

    match app.team() {
        Some(team) => {
            let (left, right) = split_halves(area);
            render_table(frame, left, app, &rows);
            render_team_chart(frame, right, team, seasons, &rows);
        }
        None => render_table(frame, area, app, &rows),
    }
}

fn render_table(frame: &mut Frame, area: Rect, app: &App, rows: &[TrendRow]) {
    let seasons = app.seasons();

    let mut header_cells = vec![Cell::from("Team")];
    header_cells.extend(seasons.iter().map(|s| Cell::from(s.to_string())));
    header_cells.push(Cell::from("Total"));
    let header = Row::new(header_cells).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let visible = table_rows(area);
    let offset = clamp_scroll(app.scroll, rows.len(), visible);
    let selected = app.team();
    let highlighted_season = app.season();

    let body: Vec<Row> = rows
        .iter()
        .skip(offset)
        .take(visible.max(1))
        .map(|row| {
            let mut cells = vec![Cell::from(row.team.clone())];
            cells.extend(row.wins.iter().zip(seasons).map(|(wins, season)| {
                let cell = Cell::from(wins.to_string());
                if Some(*season) == highlighted_season {
                    cell.style(Style::default().fg(Color::Cyan))
                } else {
                    cell
                }
            }));
            cells.push(Cell::from(row.total.to_string()));
            let table_row = Row::new(cells);
            if selected == Some(row.team.as_str()) {
                table_row.style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                table_row
            }
        })
        .collect();

    let mut widths = vec![Constraint::Min(16)];
    widths.extend(seasons.iter().map(|_| Constraint::Length(6)));
    widths.push(Constraint::Length(6));

    let table = Table::new(body, widths)
        .header(header)
        .block(titled_block(TITLE));
    frame.render_widget(table, area);
}

fn render_team_chart(frame: &mut Frame, area: Rect, team: &str, seasons: &[u16], rows: &[TrendRow]) {
    let title = format!("{team} wins by season");
    let Some(row) = rows.iter().find(|r| r.team == team) else {
        render_empty(frame, area, title);
        return;
    };

    let labels: Vec<String> = seasons.iter().map(|s| s.to_string()).collect();
    let data: Vec<(&str, u64)> = labels
        .iter()
        .zip(&row.wins)
        .map(|(label, wins)| (label.as_str(), u64::from(*wins)))
        .collect();

    let chart = BarChart::default()
        .block(titled_block(title))
        .bar_width(6)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Yellow))
        .value_style(Style::default().fg(Color::Black).bg(Color::Yellow))
        .data(data.as_slice());
    frame.render_widget(chart, area);
}
