//! Terminal management and main run loop

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use blogview_core::{BlogConfig, BlogContext};
use crossterm::{
    event::{Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::warn;

use super::app::{post_lines, App};
use super::event::{handle_key, poll_event, HandleResult};
use super::ui;

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Index the configured posts directory and open the viewer
pub fn run(config: &BlogConfig) -> Result<()> {
    let mut ctx = BlogContext::new(config.posts_root(), config.index_options());
    let mut app = App::new(&config.viewer.title, config.viewer.show_front_matter);
    reload(&mut app, &mut ctx);

    let mut terminal = init_terminal()?;

    let result = run_loop(&mut terminal, &mut app, &mut ctx);

    // Restore terminal (even if loop failed)
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    ctx: &mut BlogContext,
) -> Result<()> {
    loop {
        let lines = app
            .selected_key()
            .and_then(|key| ctx.posts().get(key))
            .map(|post| post_lines(&post, app.show_front_matter))
            .unwrap_or_default();
        app.body_len = lines.len();

        terminal.draw(|frame| ui::render(frame, app, &lines))?;

        if let Some(Event::Key(key)) = poll_event(Duration::from_millis(100))? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match handle_key(app, key) {
                HandleResult::Quit => break,
                HandleResult::Continue => {}
                HandleResult::Refresh => {
                    if reload(app, ctx) && app.skipped_count == 0 {
                        app.set_status(format!("Re-indexed {} posts", ctx.posts().len()));
                    }
                }
            }
        }
    }

    Ok(())
}

/// Run an indexing pass and hand the outcome to the app.
///
/// Returns false when the pass failed.
fn reload(app: &mut App, ctx: &mut BlogContext) -> bool {
    match ctx.refresh() {
        Ok(()) => {
            app.load_posts(ctx.report());
            true
        }
        Err(e) => {
            warn!(root = %ctx.root().display(), error = %e, "indexing failed");
            app.index_failed(e.to_string());
            false
        }
    }
}
