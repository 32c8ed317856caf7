// Matches widget: the raw filtered match list.

use placar_core::dataset::MatchRecord;
use placar_core::outcome::{classify, Outcome};
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Cell, Row, Table};
use ratatui::Frame;

use super::{clamp_scroll, render_empty, table_rows, titled_block};
use crate::app::App;

const TITLE: &str = "Matches";

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let matches = &app.view.matches;
    if matches.is_empty() {
        render_empty(frame, area, TITLE);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Season"),
        Cell::from("Home"),
        Cell::from("Score"),
        Cell::from("Away"),
        Cell::from("Result"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let visible = table_rows(area);
    let offset = clamp_scroll(app.scroll, matches.len(), visible);
    let team = app.team();

    let rows: Vec<Row> = matches
        .iter()
        .skip(offset)
        .take(visible.max(1))
        .map(|record| {
            let outcome = classify(record);
            Row::new(vec![
                Cell::from(record.season.to_string()),
                Cell::from(record.home_team.clone()),
                Cell::from(format_score(record)),
                Cell::from(record.away_team.clone()),
                Cell::from(outcome.label()),
            ])
            .style(Style::default().fg(result_color(outcome, record, team)))
        })
        .collect();

    let widths = [
        Constraint::Length(7),
        Constraint::Min(16),
        Constraint::Length(7),
        Constraint::Min(16),
        Constraint::Length(9),
    ];

    let title = format!("{TITLE} [{}-{} of {}]", offset + 1, offset + rows.len(), matches.len());
    let table = Table::new(rows, widths).header(header).block(titled_block(title));
    frame.render_widget(table, area);
}

/// "2 x 1"
pub fn format_score(record: &MatchRecord) -> String {
    format!("{} x {}", record.home_goals, record.away_goals)
}

/// Green/red from the selected team's point of view, plain otherwise.
pub fn result_color(outcome: Outcome, record: &MatchRecord, team: Option<&str>) -> Color {
    let Some(team) = team else {
        return Color::White;
    };
    match outcome.winner(record) {
        Some(winner) if winner == team => Color::Green,
        Some(_) => Color::Red,
        None => Color::Gray,
    }
}
