// Summary widget: outcome breakdown for the selection, the selected team's
// record, and any load notice.

use placar_core::stats::{win_rate, OutcomeBreakdown};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::titled_block;
use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![outcome_line(&app.view.outcomes)];

    if let Some(team) = app.team() {
        let text = match app.view.win_rate_for(team) {
            Some(agg) => format!(
                "{}: {} wins in {} games ({:.2}%)",
                team, agg.wins, agg.games_played, agg.win_rate
            ),
            None => format!("{team}: no games in this selection"),
        };
        lines.push(Line::from(Span::styled(
            text,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
    }

    if let Some(ref message) = app.message {
        lines.push(Line::from(Span::styled(
            format!("! {message}"),
            Style::default().fg(Color::LightRed),
        )));
    }

    let paragraph = Paragraph::new(lines).block(titled_block("Summary"));
    frame.render_widget(paragraph, area);
}

/// "Home wins 5 (62.50%) | Away wins 2 (25.00%) | Draws 1 (12.50%) | 8 matches"
pub fn outcome_text(outcomes: &OutcomeBreakdown) -> String {
    let total = outcomes.total();
    if total == 0 {
        return "No matches for this selection.".to_string();
    }
    format!(
        "Home wins {} ({:.2}%) | Away wins {} ({:.2}%) | Draws {} ({:.2}%) | {} matches",
        outcomes.home_wins,
        win_rate(outcomes.home_wins, total),
        outcomes.away_wins,
        win_rate(outcomes.away_wins, total),
        outcomes.draws,
        win_rate(outcomes.draws, total),
        total
    )
}

fn outcome_line(outcomes: &OutcomeBreakdown) -> Line<'static> {
    Line::from(Span::styled(
        outcome_text(outcomes),
        Style::default().fg(Color::White),
    ))
}
