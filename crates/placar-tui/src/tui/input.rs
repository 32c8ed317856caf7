// Keyboard input handling.
//
// Selection, tab and scroll keys mutate `App` directly. Keys that need the
// event loop (quit, dataset reload) come back as an `Action`.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, TabId};

/// Rows moved by PageUp / PageDown.
const PAGE_SIZE: usize = 10;

/// Requests the event loop has to carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Drop the cached dataset and read the file again.
    Reload,
}

/// Handle one key event. Returns `Some(Action)` when the loop must act.
pub fn handle_key(key_event: KeyEvent, app: &mut App) -> Option<Action> {
    // Windows reports both press and release; act on press only.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(Action::Quit);
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('r') => Some(Action::Reload),

        // Tabs
        KeyCode::Char(c @ '1'..='5') => {
            let idx = (c as usize) - ('1' as usize);
            app.set_tab(TabId::ALL[idx]);
            None
        }
        KeyCode::Tab => {
            app.set_tab(next_tab(app.active_tab));
            None
        }

        // Filters
        KeyCode::Char('s') | KeyCode::Right => {
            app.next_season();
            None
        }
        KeyCode::Char('S') | KeyCode::Left => {
            app.prev_season();
            None
        }
        KeyCode::Char('t') => {
            app.next_team();
            None
        }
        KeyCode::Char('T') => {
            app.prev_team();
            None
        }
        KeyCode::Char('a') => {
            app.clear_team();
            None
        }

        // Scrolling
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_down(1);
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_up(1);
            None
        }
        KeyCode::PageDown => {
            app.scroll_down(PAGE_SIZE);
            None
        }
        KeyCode::PageUp => {
            app.scroll_up(PAGE_SIZE);
            None
        }
        KeyCode::Home => {
            app.scroll = 0;
            None
        }

        _ => None,
    }
}

fn next_tab(tab: TabId) -> TabId {
    let idx = TabId::ALL.iter().position(|t| *t == tab).unwrap_or(0);
    TabId::ALL[(idx + 1) % TabId::ALL.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{long_app, sample_app};
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn quit_keys() {
        let mut app = sample_app();
        assert_eq!(handle_key(press(KeyCode::Char('q')), &mut app), Some(Action::Quit));
        assert_eq!(handle_key(press(KeyCode::Esc), &mut app), Some(Action::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(ctrl_c, &mut app), Some(Action::Quit));
    }

    #[test]
    fn reload_key() {
        let mut app = sample_app();
        assert_eq!(handle_key(press(KeyCode::Char('r')), &mut app), Some(Action::Reload));
    }

    #[test]
    fn number_keys_switch_tabs() {
        let mut app = sample_app();
        handle_key(press(KeyCode::Char('2')), &mut app);
        assert_eq!(app.active_tab, TabId::WinRates);
        handle_key(press(KeyCode::Char('5')), &mut app);
        assert_eq!(app.active_tab, TabId::Matches);
        handle_key(press(KeyCode::Tab), &mut app);
        assert_eq!(app.active_tab, TabId::Winners);
    }

    #[test]
    fn filter_keys_change_selection() {
        let mut app = sample_app();
        assert_eq!(app.season(), Some(2021));
        assert!(handle_key(press(KeyCode::Char('s')), &mut app).is_none());
        assert_eq!(app.season(), Some(2019));
        handle_key(press(KeyCode::Char('S')), &mut app);
        assert_eq!(app.season(), Some(2021));

        handle_key(press(KeyCode::Char('t')), &mut app);
        assert_eq!(app.team(), Some("Flamengo"));
        handle_key(press(KeyCode::Char('T')), &mut app);
        assert_eq!(app.team(), None);
        handle_key(press(KeyCode::Char('t')), &mut app);
        handle_key(press(KeyCode::Char('a')), &mut app);
        assert_eq!(app.team(), None);
    }

    #[test]
    fn scroll_keys() {
        let mut app = long_app();
        app.set_tab(TabId::Matches);
        handle_key(press(KeyCode::Char('j')), &mut app);
        handle_key(press(KeyCode::PageDown), &mut app);
        assert_eq!(app.scroll, 1 + PAGE_SIZE);
        handle_key(press(KeyCode::Up), &mut app);
        assert_eq!(app.scroll, PAGE_SIZE);
        handle_key(press(KeyCode::Home), &mut app);
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn release_events_ignored() {
        let mut app = sample_app();
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key(release, &mut app), None);
    }
}
