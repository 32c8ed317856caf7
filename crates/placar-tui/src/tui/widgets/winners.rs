// Winners widget: top home and away winners as side-by-side bar charts.

use placar_core::stats::TeamCount;
use ratatui::layout::{Direction, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::BarChart;
use ratatui::Frame;

use super::{render_empty, titled_block};
use crate::app::App;
use crate::tui::layout::split_halves;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let (left, right) = split_halves(area);
    let n = app.top_n();
    render_team_counts(
        frame,
        left,
        format!("Top {n} home winners"),
        &app.view.top_home_winners,
        Color::Green,
    );
    render_team_counts(
        frame,
        right,
        format!("Top {n} away winners"),
        &app.view.top_away_winners,
        Color::Blue,
    );
}

/// Horizontal bar chart of `(team, count)` rows, largest first.
pub fn render_team_counts(
    frame: &mut Frame,
    area: Rect,
    title: String,
    counts: &[TeamCount],
    color: Color,
) {
    if counts.is_empty() {
        render_empty(frame, area, title);
        return;
    }

    let data = chart_data(counts);
    let chart = BarChart::default()
        .block(titled_block(title))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .bar_style(Style::default().fg(color))
        .value_style(Style::default().fg(Color::Black).bg(color))
        .data(data.as_slice());
    frame.render_widget(chart, area);
}

/// Borrowed `(label, value)` pairs in the shape `BarChart` takes.
pub fn chart_data(counts: &[TeamCount]) -> Vec<(&str, u64)> {
    counts
        .iter()
        .map(|c| (c.team.as_str(), u64::from(c.count)))
        .collect()
}
