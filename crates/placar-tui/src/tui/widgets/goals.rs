// Goals widget: home goals per team over the selected season.
//
// Ignores the team filter so the selected team can be compared against the
// rest of the league.

use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::Frame;

use super::winners::render_team_counts;
use crate::app::App;
use crate::tui::widgets::status_bar::season_label;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!(
        "Top {} home scorers, {}",
        app.top_n(),
        season_label(app.season())
    );
    render_team_counts(
        frame,
        area,
        title,
        &app.view.top_home_scorers,
        Color::Magenta,
    );
}
