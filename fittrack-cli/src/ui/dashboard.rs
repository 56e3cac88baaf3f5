use anyhow::{Context, Result};
use chrono::Utc;
use crossterm::{
    event::{self, Event, KeyEventKind},
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

use super::app::{Action, App, Panel, Snapshot};
use super::widgets;
use crate::commands::AppContext;

/// Dashboard manages the TUI lifecycle
pub struct Dashboard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: App,
    status: String,
    restored: bool,
}

impl Dashboard {
    /// Load the first snapshot, then take over the terminal
    pub async fn new(ctx: &AppContext, window_days: i64) -> Result<Self> {
        let snapshot = Snapshot::load(ctx, window_days)
            .await
            .context("Failed to load dashboard data")?;
        let app = App::new(window_days, snapshot);

        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        Ok(Self {
            terminal,
            app,
            status: format!("UTC offset {}", ctx.analytics.zone()),
            restored: false,
        })
    }

    /// Run the dashboard event loop
    pub async fn run(&mut self, ctx: &AppContext) -> Result<()> {
        loop {
            let app = &self.app;
            let status = &self.status;
            self.terminal.draw(|f| ui(f, app, status))?;

            if !event::poll(Duration::from_millis(250))? {
                continue;
            }

            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match self.app.handle_key(key.code) {
                Action::None => {}
                Action::Quit => break,
                Action::Reload => self.reload(ctx).await,
                Action::Dismiss(id) => {
                    match ctx
                        .analytics
                        .dismiss_reminder(&ctx.owner_id, &id, Utc::now())
                        .await
                    {
                        Ok(()) => self.reload(ctx).await,
                        Err(e) => self.status = format!("Dismiss failed: {}", e),
                    }
                }
            }
        }

        Ok(())
    }

    /// Store errors are shown in the status bar; the last snapshot stays on screen
    async fn reload(&mut self, ctx: &AppContext) {
        match Snapshot::load(ctx, self.app.window_days).await {
            Ok(snapshot) => {
                self.app.replace_snapshot(snapshot);
                self.status = format!("Updated {}", ctx.format_date(Utc::now()));
            }
            Err(e) => {
                tracing::warn!("Dashboard refresh failed: {:#}", e);
                self.status = format!("Refresh failed: {}", e);
            }
        }
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn cleanup(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
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
fn ui(f: &mut Frame, app: &App, status: &str) {
    let size = f.area();
    let snapshot = &app.snapshot;

    // Summary, charts, goals and reminders, status bar
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Percentage(45),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);

    widgets::render_summary(rows[0], f.buffer_mut(), &snapshot.summary, &snapshot.report);

    widgets::render_calorie_chart(
        charts[0],
        f.buffer_mut(),
        &snapshot.report,
        app.selected_panel == Panel::Calories,
    );

    widgets::render_workout_chart(
        charts[1],
        f.buffer_mut(),
        &snapshot.report,
        app.selected_panel == Panel::Workouts,
    );

    widgets::render_goals(
        bottom[0],
        f.buffer_mut(),
        &snapshot.goals,
        app.selected_panel == Panel::Goals,
    );

    widgets::render_reminders(
        bottom[1],
        f.buffer_mut(),
        &snapshot.reminders,
        app.selected_index,
        app.selected_panel == Panel::Reminders,
    );

    widgets::render_status_bar(rows[3], f.buffer_mut(), status);

    if app.show_help {
        let help_area = centered_rect(60, 70, size);
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
