// Win-rate widget: games, wins and "aproveitamento" per team.
//
// Scrollable table; the selected team's row is highlighted.

use placar_core::stats::TeamAggregate;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Cell, Row, Table};
use ratatui::Frame;

use super::{clamp_scroll, render_empty, table_rows, titled_block};
use crate::app::App;

const TITLE: &str = "Win rate (aproveitamento)";

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let rates = &app.view.win_rates;
    if rates.is_empty() {
        render_empty(frame, area, TITLE);
        return;
    }

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Team"),
        Cell::from("Games"),
        Cell::from("Wins"),
        Cell::from("Win rate"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let visible = table_rows(area);
    let offset = clamp_scroll(app.scroll, rates.len(), visible);
    let selected = app.team();

    let rows: Vec<Row> = rates
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible.max(1))
        .map(|(i, agg)| {
            let row = Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(agg.team.clone()),
                Cell::from(format!("{}", agg.games_played)),
                Cell::from(format!("{}", agg.wins)),
                Cell::from(format_rate(agg)),
            ]);
            if selected == Some(agg.team.as_str()) {
                row.style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                row
            }
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Min(16),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(9),
    ];

    let title = format!("{TITLE} [{}-{} of {}]", offset + 1, offset + rows.len(), rates.len());
    let table = Table::new(rows, widths).header(header).block(titled_block(title));
    frame.render_widget(table, area);
}

/// "33.33%"
pub fn format_rate(agg: &TeamAggregate) -> String {
    format!("{:.2}%", agg.win_rate)
}
