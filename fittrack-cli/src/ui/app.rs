use anyhow::Result;
use chrono::Utc;
use crossterm::event::KeyCode;

use fittrack::config::STANDARD_WINDOWS;
use fittrack::models::{AnalyticsReport, DashboardSummary, GoalReport, Reminder};

use crate::commands::AppContext;

/// Everything the dashboard draws, fetched in one pass
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub report: AnalyticsReport,
    pub summary: DashboardSummary,
    pub goals: GoalReport,
    pub reminders: Vec<Reminder>,
}

impl Snapshot {
    pub async fn load(ctx: &AppContext, window_days: i64) -> Result<Self> {
        let now = Utc::now();
        let today = ctx.analytics.today(now);

        let report = ctx
            .analytics
            .window_report(&ctx.owner_id, today, window_days)
            .await?;
        let summary = ctx.analytics.dashboard(&ctx.owner_id, now).await?;
        let goals = ctx.analytics.daily_nutrition(&ctx.owner_id, today).await?.report;
        let reminders = ctx.analytics.active_reminders(&ctx.owner_id, now).await?;

        Ok(Self {
            report,
            summary,
            goals,
            reminders,
        })
    }
}

/// What the event loop should do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Reload,
    Dismiss(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Calories,
    Workouts,
    Goals,
    Reminders,
}

/// Application state for the TUI dashboard
pub struct App {
    pub should_quit: bool,
    pub selected_panel: Panel,
    /// Selected row in the reminders panel
    pub selected_index: usize,
    pub show_help: bool,
    pub window_days: i64,
    pub snapshot: Snapshot,
}

impl App {
    pub fn new(window_days: i64, snapshot: Snapshot) -> Self {
        Self {
            should_quit: false,
            selected_panel: Panel::Calories,
            selected_index: 0,
            show_help: false,
            window_days,
            snapshot,
        }
    }

    pub fn replace_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
        let last = self.snapshot.reminders.len().saturating_sub(1);
        self.selected_index = self.selected_index.min(last);
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyCode) -> Action {
        // Help overlay takes precedence
        if self.show_help {
            if matches!(key, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return Action::None;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                Action::Quit
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                Action::None
            }
            KeyCode::Char('r') | KeyCode::Char('R') => Action::Reload,
            KeyCode::Char('w') | KeyCode::Char('W') => {
                self.next_window();
                Action::Reload
            }
            KeyCode::Char('d') | KeyCode::Char('D') => self.dismiss_selected(),
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                self.next_panel();
                Action::None
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.prev_panel();
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_index = self.selected_index.saturating_sub(1);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let last = self.snapshot.reminders.len().saturating_sub(1);
                if self.selected_panel == Panel::Reminders && self.selected_index < last {
                    self.selected_index += 1;
                }
                Action::None
            }
            _ => Action::None,
        }
    }

    /// Step through the standard window sizes, wrapping around
    fn next_window(&mut self) {
        self.window_days = STANDARD_WINDOWS
            .iter()
            .copied()
            .find(|days| *days > self.window_days)
            .unwrap_or(STANDARD_WINDOWS[0]);
    }

    fn dismiss_selected(&self) -> Action {
        if self.selected_panel != Panel::Reminders {
            return Action::None;
        }
        self.snapshot
            .reminders
            .get(self.selected_index)
            .map(|reminder| Action::Dismiss(reminder.id.clone()))
            .unwrap_or(Action::None)
    }

    fn next_panel(&mut self) {
        self.selected_panel = match self.selected_panel {
            Panel::Calories => Panel::Workouts,
            Panel::Workouts => Panel::Goals,
            Panel::Goals => Panel::Reminders,
            Panel::Reminders => Panel::Calories,
        };
        self.selected_index = 0;
    }

    fn prev_panel(&mut self) {
        self.selected_panel = match self.selected_panel {
            Panel::Calories => Panel::Reminders,
            Panel::Workouts => Panel::Calories,
            Panel::Goals => Panel::Workouts,
            Panel::Reminders => Panel::Goals,
        };
        self.selected_index = 0;
    }
}
