// Status bar widget: active filters, match count, tab indicator.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, TabId};

/// Render the status bar into the given area.
///
/// Layout: [season] [team] [match count] | [tab bar]
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", season_label(app.season())),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} ", team_label(app.team())),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("{} matches", app.view.matches.len()),
            Style::default().fg(Color::White),
        ),
        Span::styled(" | ", Style::default().fg(Color::Gray)),
    ];
    spans.extend(tab_spans(app.active_tab));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

pub fn season_label(season: Option<u16>) -> String {
    match season {
        Some(season) => format!("Season {season}"),
        None => "All seasons".to_string(),
    }
}

pub fn team_label(team: Option<&str>) -> String {
    match team {
        Some(team) => format!("[{team}]"),
        None => "[All teams]".to_string(),
    }
}

/// Tab indicator spans with the active tab highlighted, e.g.
/// "[1:Winners] [2:Win rate] ...".
pub fn tab_spans(active: TabId) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, tab) in TabId::ALL.iter().enumerate() {
        let style = if *tab == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}:{}]", i + 1, tab.label()), style));
        spans.push(Span::raw(" "));
    }
    spans
}
