// TUI widget modules for each dashboard panel.

pub mod goals;
pub mod matches;
pub mod status_bar;
pub mod summary;
pub mod trend;
pub mod win_rates;
pub mod winners;

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Bordered block with a title, shared by every panel.
pub fn titled_block<'a>(title: impl Into<String>) -> Block<'a> {
    Block::default().borders(Borders::ALL).title(title.into())
}

/// Placeholder shown when the selection has no data for a panel.
pub fn render_empty(frame: &mut Frame, area: Rect, title: impl Into<String>) {
    let paragraph = Paragraph::new("  No data for this selection.")
        .style(Style::default().fg(Color::DarkGray))
        .block(titled_block(title));
    frame.render_widget(paragraph, area);
}

/// Rows that fit in a bordered table with a one-line header.
pub fn table_rows(area: Rect) -> usize {
    (area.height as usize).saturating_sub(3)
}

/// Clamp a scroll offset so the last page stays full.
pub fn clamp_scroll(offset: usize, total: usize, visible: usize) -> usize {
    offset.min(total.saturating_sub(visible))
}
