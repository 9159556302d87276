use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

use super::app::{App, ScreenState};
use super::widgets;

const TICK: Duration = Duration::from_millis(100);

/// Dashboard manages the TUI lifecycle
pub struct Dashboard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: App,
}

impl Dashboard {
    /// Take over the terminal for `app`
    pub fn new(app: App) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        Ok(Self { terminal, app })
    }

    /// Run the dashboard event loop. Blocks; loads and saves progress on the
    /// runtime the app was built with and show up on the next tick.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let app = &self.app;
            self.terminal.draw(|f| ui(f, app))?;

            if event::poll(TICK)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == event::KeyEventKind::Press {
                        self.app.handle_key(key.code);
                    }
                }
            }

            if self.app.should_quit {
                break;
            }
        }

        self.app.screen.unmount();
        Ok(())
    }

    /// Cleanup terminal on exit
    pub fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to restore terminal")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;

        Ok(())
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Render the UI
pub fn ui(f: &mut Frame, app: &App) {
    let size = f.area();

    // Tabs, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    widgets::render_tabs(chunks[0], f.buffer_mut(), app.route);

    match app.screen.state(&app.dates) {
        ScreenState::Loading(message) => {
            widgets::render_loading(chunks[1], f.buffer_mut(), &message);
        }
        ScreenState::Failed(message) => {
            widgets::render_error(chunks[1], f.buffer_mut(), &message);
        }
        ScreenState::Ready(table) => {
            widgets::render_table(
                chunks[1],
                f.buffer_mut(),
                &table,
                Some(app.selected_index),
            );
        }
    }

    widgets::render_status_bar(chunks[2], f.buffer_mut(), app.api_base_url(), app.route);

    if let Some(view) = app.screen.users() {
        view.with_edit(|flow| {
            if flow.is_open() {
                let area = centered_rect(60, 50, size);
                widgets::render_edit_modal(area, f.buffer_mut(), flow, app.focus);
            }
        });
    }

    // Render help overlay if active
    if app.show_help {
        let help_area = centered_rect(60, 80, size);
        widgets::render_help_overlay(help_area, f.buffer_mut());
    }
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
