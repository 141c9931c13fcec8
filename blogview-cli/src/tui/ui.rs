//! UI rendering using ratatui

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::app::{App, Mode};

/// Primary accent color
const ACCENT: Color = Color::Cyan;
/// Secondary color for less important elements
const SECONDARY: Color = Color::DarkGray;
/// Highlight color for status messages
const HIGHLIGHT: Color = Color::Yellow;
/// Error color
const ERROR: Color = Color::Red;
/// Dim text color
const DIM: Color = Color::Rgb(100, 100, 100);

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App, body: &[String]) {
    let area = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Panes
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(rows[0]);

    render_list(frame, app, panes[0]);
    render_body(frame, app, body, panes[1]);
    render_status_bar(frame, app, rows[1]);

    if app.mode == Mode::Filter {
        render_filter_input(frame, app);
    }
}

/// Render the post key list
fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let displayed = app.displayed_items();

    let title = if app.filter.is_empty() {
        format!(" {} ", app.title)
    } else {
        format!(" {} / '{}' ({}) ", app.title, app.filter, displayed.len())
    };

    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    let visible_height = block.inner(area).height as usize;
    // Keep the selection on screen
    let offset = (app.selected_index + 1).saturating_sub(visible_height);

    let items: Vec<ListItem> = displayed
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_height)
        .map(|(idx, entry)| {
            let style = if idx == app.selected_index {
                Style::default()
                    .fg(Color::Black)
                    .bg(ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let mut spans = vec![Span::styled(entry.key.clone(), style)];
            if let Some(ref title) = entry.title {
                spans.push(Span::styled(format!("  {}", title), Style::default().fg(DIM)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = if items.is_empty() {
        let placeholder = if app.filter.is_empty() {
            "  No posts"
        } else {
            "  No matches"
        };
        List::new(vec![ListItem::new(Line::from(Span::styled(
            placeholder,
            Style::default().fg(DIM),
        )))])
        .block(block)
    } else {
        List::new(items).block(block)
    };

    frame.render_widget(list, area);
}

/// Render the body of the selected post, or the indexing error
fn render_body(frame: &mut Frame, app: &App, body: &[String], area: Rect) {
    if let Some(ref error) = app.load_error {
        let block = Block::default()
            .title(" Indexing failed ")
            .title_style(Style::default().fg(ERROR).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ERROR));
        let text = Text::from(vec![
            Line::from(Span::styled(error.as_str(), Style::default().fg(ERROR))),
            Line::from(""),
            Line::from(Span::styled(
                "Fix the content directory and press 'r' to re-index",
                Style::default().fg(DIM),
            )),
        ]);
        frame.render_widget(
            Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
            area,
        );
        return;
    }

    let title = match app.selected_key() {
        Some(key) => format!(" {} ", key),
        None => " Post ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(SECONDARY))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SECONDARY));

    let text = if body.is_empty() && app.selected_key().is_none() {
        Text::from(Span::styled("Select a post to read", Style::default().fg(DIM)))
    } else {
        // Front matter header lines run up to the second delimiter
        let header_len = if app.show_front_matter {
            body.iter()
                .skip(1)
                .position(|line| line == "---")
                .map_or(0, |pos| pos + 2)
        } else {
            0
        };
        Text::from(
            body.iter()
                .enumerate()
                .map(|(idx, line)| {
                    if idx < header_len {
                        Line::from(Span::styled(line.as_str(), Style::default().fg(DIM)))
                    } else {
                        Line::from(line.as_str())
                    }
                })
                .collect::<Vec<_>>(),
        )
    };

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.body_scroll.min(u16::MAX as usize) as u16, 0))
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode_indicator = match app.mode {
        Mode::Normal => Span::styled(" VIEW ", Style::default().bg(ACCENT).fg(Color::Black)),
        Mode::Filter => Span::styled(" FILTER ", Style::default().bg(Color::Magenta).fg(Color::Black)),
    };

    let counts = format!(" {} posts ", app.entries.len());
    let skipped = if app.skipped_count > 0 {
        Span::styled(
            format!("{} skipped ", app.skipped_count),
            Style::default().fg(ERROR),
        )
    } else {
        Span::raw("")
    };

    let help_text = match app.mode {
        Mode::Normal => "j/k:nav  g/G:first/last  PgUp/PgDn:scroll  /:filter  m:front matter  r:reload  q:quit",
        Mode::Filter => "Type to filter  Enter:apply  Esc:clear",
    };

    let status = app.status_message.as_deref().unwrap_or("");

    let line = Line::from(vec![
        mode_indicator,
        Span::raw(counts),
        skipped,
        Span::styled(help_text, Style::default().fg(DIM)),
        Span::raw(" "),
        Span::styled(status, Style::default().fg(HIGHLIGHT)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render filter input overlay
fn render_filter_input(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let width = 60.min(area.width.saturating_sub(4));
    let popup_area = Rect {
        x: (area.width.saturating_sub(width)) / 2,
        y: 2.min(area.height.saturating_sub(3)),
        width,
        height: 3.min(area.height),
    };

    frame.render_widget(Clear, popup_area);

    let title = format!(" Filter ({} matches) ", app.displayed_items().len());

    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    let paragraph = Paragraph::new(format!("{}|", app.filter)).block(block);

    frame.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::PostEntry;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &App, body: &[String]) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| render(frame, app, body)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_list_and_body() {
        let mut app = App::new("khalido", false);
        app.entries = vec![PostEntry {
            key: "hello".to_string(),
            title: Some("Hello".to_string()),
        }];
        let out = screen(&app, &["# Hello world".to_string()]);

        assert!(out.contains("khalido"));
        assert!(out.contains("hello  Hello"));
        assert!(out.contains("# Hello world"));
        assert!(out.contains("1 posts"));
    }

    #[test]
    fn test_renders_load_error() {
        let mut app = App::new("blog", false);
        app.index_failed("path not found: /nowhere/posts");
        let out = screen(&app, &[]);

        assert!(out.contains("Indexing failed"));
        assert!(out.contains("path not found: /nowhere/posts"));
        assert!(out.contains("No posts"));
    }
}
