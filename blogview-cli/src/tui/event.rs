//! Event handling for the viewer

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

/// Lines moved by one body page
pub const PAGE_LINES: usize = 10;

/// Poll for events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Result of handling a key event
#[derive(Debug, PartialEq, Eq)]
pub enum HandleResult {
    /// Continue running
    Continue,
    /// Quit the viewer
    Quit,
    /// Re-index the posts directory
    Refresh,
}

/// Handle a key event
pub fn handle_key(app: &mut App, key: KeyEvent) -> HandleResult {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return HandleResult::Quit;
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Filter => handle_filter_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) -> HandleResult {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => HandleResult::Quit,

        KeyCode::Char('d') if ctrl => {
            app.scroll_body_down(PAGE_LINES);
            HandleResult::Continue
        }
        KeyCode::Char('u') if ctrl => {
            app.scroll_body_up(PAGE_LINES);
            HandleResult::Continue
        }
        KeyCode::PageDown => {
            app.scroll_body_down(PAGE_LINES);
            HandleResult::Continue
        }
        KeyCode::PageUp => {
            app.scroll_body_up(PAGE_LINES);
            HandleResult::Continue
        }

        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
            HandleResult::Continue
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_prev();
            HandleResult::Continue
        }
        KeyCode::Home | KeyCode::Char('g') => {
            app.select_first();
            HandleResult::Continue
        }
        KeyCode::End | KeyCode::Char('G') => {
            app.select_last();
            HandleResult::Continue
        }

        KeyCode::Char('/') => {
            app.enter_filter();
            HandleResult::Continue
        }
        KeyCode::Char('m') => {
            app.toggle_front_matter();
            HandleResult::Continue
        }
        KeyCode::Char('r') => HandleResult::Refresh,

        _ => HandleResult::Continue,
    }
}

fn handle_filter_mode(app: &mut App, key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Esc => app.cancel_filter(),
        KeyCode::Enter => app.apply_filter(),
        KeyCode::Backspace => app.filter_backspace(),
        KeyCode::Down => app.select_next(),
        KeyCode::Up => app.select_prev(),
        KeyCode::Char(c) => app.filter_insert(c),
        _ => {}
    }
    HandleResult::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::app::PostEntry;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app_with(keys: &[&str]) -> App {
        let mut app = App::new("blog", false);
        app.entries = keys
            .iter()
            .map(|key| PostEntry {
                key: key.to_string(),
                title: None,
            })
            .collect();
        app
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app_with(&["a"]);
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('q'))), HandleResult::Quit);
        assert_eq!(handle_key(&mut app, key(KeyCode::Esc)), HandleResult::Quit);
        assert_eq!(handle_key(&mut app, ctrl('c')), HandleResult::Quit);
    }

    #[test]
    fn test_navigation() {
        let mut app = app_with(&["a", "b", "c"]);
        handle_key(&mut app, key(KeyCode::Char('j')));
        assert_eq!(app.selected_key(), Some("b"));
        handle_key(&mut app, key(KeyCode::Char('G')));
        assert_eq!(app.selected_key(), Some("c"));
        handle_key(&mut app, key(KeyCode::Char('g')));
        assert_eq!(app.selected_key(), Some("a"));
        handle_key(&mut app, key(KeyCode::Up));
        assert_eq!(app.selected_key(), Some("c"));
    }

    #[test]
    fn test_body_paging() {
        let mut app = app_with(&["a"]);
        app.body_len = 25;
        handle_key(&mut app, ctrl('d'));
        assert_eq!(app.body_scroll, 10);
        handle_key(&mut app, key(KeyCode::PageDown));
        handle_key(&mut app, key(KeyCode::PageDown));
        assert_eq!(app.body_scroll, 24);
        handle_key(&mut app, ctrl('u'));
        assert_eq!(app.body_scroll, 14);
        handle_key(&mut app, key(KeyCode::PageUp));
        assert_eq!(app.body_scroll, 4);
    }

    #[test]
    fn test_refresh_and_toggle() {
        let mut app = app_with(&["a"]);
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('r'))), HandleResult::Refresh);
        handle_key(&mut app, key(KeyCode::Char('m')));
        assert!(app.show_front_matter);
    }

    #[test]
    fn test_filter_mode_captures_typing() {
        let mut app = app_with(&["rust-notes", "python-notes", "quarterly"]);
        handle_key(&mut app, key(KeyCode::Char('/')));
        assert_eq!(app.mode, Mode::Filter);

        // 'q' is text while filtering, not quit
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('q'))), HandleResult::Continue);
        assert_eq!(app.selected_key(), Some("quarterly"));

        handle_key(&mut app, key(KeyCode::Backspace));
        for c in "rust".chars() {
            handle_key(&mut app, key(KeyCode::Char(c)));
        }
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.filter, "rust");
        assert_eq!(app.selected_key(), Some("rust-notes"));

        handle_key(&mut app, key(KeyCode::Char('/')));
        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.filter.is_empty());
    }
}
