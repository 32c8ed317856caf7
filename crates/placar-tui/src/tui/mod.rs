// TUI module: terminal setup, frame rendering and the event loop.
//
// The loop is synchronous: it blocks on the next crossterm event, applies it
// to `App`, and redraws. Every redraw reads only from `App`.

pub mod input;
pub mod layout;
pub mod widgets;

use std::sync::Arc;

use crossterm::event::{self, Event};
use placar_core::cache::DatasetCache;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tracing::{error, info};

use crate::app::{App, TabId};
use input::Action;
use layout::{build_layout, AppLayout};

const HELP_TEXT: &str =
    " q:Quit | 1-5:Tabs | s/S:Season | t/T:Team | a:All teams | r:Reload | j/k:Scroll";

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Draw the whole dashboard for the current app state.
pub fn render_frame(frame: &mut Frame, app: &App) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, app);
    widgets::summary::render(frame, layout.summary, app);
    render_main_panel(frame, &layout, app);
    render_help_bar(frame, &layout);
}

fn render_main_panel(frame: &mut Frame, layout: &AppLayout, app: &App) {
    let area = layout.main_panel;
    match app.active_tab {
        TabId::Winners => widgets::winners::render(frame, area, app),
        TabId::WinRates => widgets::win_rates::render(frame, area, app),
        TabId::Goals => widgets::goals::render(frame, area, app),
        TabId::Trend => widgets::trend::render(frame, area, app),
        TabId::Matches => widgets::matches::render(frame, area, app),
    }
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        HELP_TEXT,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the dashboard until the user quits.
///
/// Enters raw mode and the alternate screen, installs a panic hook that
/// restores the terminal, and restores it again on clean exit.
pub fn run(app: &mut App, cache: &DatasetCache) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = event_loop(&mut terminal, app, cache);

    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    cache: &DatasetCache,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| {
            let main_panel = build_layout(frame.area()).main_panel;
            app.set_visible_rows(widgets::table_rows(main_panel));
            render_frame(frame, app);
        })?;

        // Resize and other non-key events just trigger a redraw.
        let Event::Key(key_event) = event::read()? else {
            continue;
        };
        match input::handle_key(key_event, app) {
            Some(Action::Quit) => {
                info!("Quit requested");
                return Ok(());
            }
            Some(Action::Reload) => reload(app, cache),
            None => {}
        }
    }
}

/// Re-read the dataset file, keeping the current dataset on failure.
fn reload(app: &mut App, cache: &DatasetCache) {
    cache.invalidate();
    match cache.get() {
        Ok(dataset) => {
            info!("Reloaded {} matches", dataset.len());
            app.replace_dataset(Arc::clone(&dataset));
            if app.message.is_none() {
                app.message = Some(format!("Reloaded {} matches", dataset.len()));
            }
        }
        Err(e) => {
            error!("Reload failed: {}", e);
            app.message = Some(format!("Reload failed: {e}"));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
