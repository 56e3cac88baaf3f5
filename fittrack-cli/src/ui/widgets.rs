use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Widget},
};

use fittrack::models::{AnalyticsReport, DashboardSummary, GoalReport, MacroProgress, Reminder};

fn panel_block(title: &str, is_selected: bool) -> Block<'_> {
    let border_style = if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style)
}

/// Render this-week summary line
pub fn render_summary(area: Rect, buf: &mut Buffer, summary: &DashboardSummary, report: &AnalyticsReport) {
    let block = panel_block(" 📊 This Week ", false);
    let inner = block.inner(area);
    block.render(area, buf);

    let stat = |label: &'static str, value: String, color: Color| {
        vec![
            Span::styled(label, Style::default().fg(Color::Gray)),
            Span::styled(
                value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
        ]
    };

    let mut week = stat("Workouts: ", summary.weekly_workouts.to_string(), Color::Green);
    week.extend(stat(
        "Today: ",
        format!("{} kcal", summary.today_calories),
        Color::Yellow,
    ));
    week.extend(stat(
        "Daily avg: ",
        format!("{:.0} kcal", summary.weekly_average_calories),
        Color::Cyan,
    ));

    let mut window = stat(
        "Window total: ",
        format!("{} kcal", report.total_calories),
        Color::Yellow,
    );
    window.extend(stat(
        "Workouts/week: ",
        report.weekly_workout_frequency.to_string(),
        Color::Green,
    ));

    let lines = vec![
        Line::from(Span::styled(
            format!("{} to {}", summary.week_start, summary.week_end),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(week),
        Line::from(window),
    ];

    Paragraph::new(lines).render(inner, buf);
}

/// Bar width that fits `bars` bars with a one-column gap into `width`
fn bar_width(width: u16, bars: usize) -> u16 {
    if bars == 0 {
        return 1;
    }
    let per_bar = usize::from(width) / bars;
    per_bar.saturating_sub(1).clamp(1, 6) as u16
}

fn render_series(
    area: Rect,
    buf: &mut Buffer,
    title: &str,
    labels: &[String],
    values: &[u64],
    color: Color,
    is_selected: bool,
) {
    let block = panel_block(title, is_selected);
    let inner = block.inner(area);
    block.render(area, buf);

    let width = bar_width(inner.width, values.len());
    // Labels only fit on wide bars
    let data: Vec<(&str, u64)> = labels
        .iter()
        .zip(values.iter())
        .map(|(label, value)| {
            let label = if width >= 5 { label.as_str() } else { "" };
            (label, *value)
        })
        .collect();

    BarChart::default()
        .data(data.as_slice())
        .bar_width(width)
        .bar_gap(1)
        .bar_style(Style::default().fg(color))
        .value_style(Style::default().fg(Color::Black).bg(color))
        .render(inner, buf);
}

/// Render daily calorie bar chart
pub fn render_calorie_chart(area: Rect, buf: &mut Buffer, report: &AnalyticsReport, is_selected: bool) {
    let title = format!(" 🍽  Calories ({} days) ", report.window_days);
    render_series(
        area,
        buf,
        &title,
        &report.aggregation.labels(),
        &report.aggregation.calorie_series(),
        Color::Yellow,
        is_selected,
    );
}

/// Render daily workout bar chart
pub fn render_workout_chart(area: Rect, buf: &mut Buffer, report: &AnalyticsReport, is_selected: bool) {
    let title = format!(" 🏃 Workouts ({} days) ", report.window_days);
    let series: Vec<u64> = report
        .aggregation
        .workout_series()
        .into_iter()
        .map(u64::from)
        .collect();
    render_series(
        area,
        buf,
        &title,
        &report.aggregation.labels(),
        &series,
        Color::Green,
        is_selected,
    );
}

fn macro_gauge<'a>(label: &'a str, unit: &str, progress: &MacroProgress) -> Gauge<'a> {
    let color = if progress.is_met() {
        Color::Green
    } else {
        Color::Cyan
    };

    Gauge::default()
        .block(Block::default().title(label))
        .gauge_style(Style::default().fg(color).bg(Color::DarkGray))
        .ratio(progress.ratio.clamp(0.0, 1.0))
        .label(format!(
            "{:.0}/{:.0} {} ({:.0}%)",
            progress.current, progress.goal, unit, progress.uncapped_percent
        ))
}

/// Render today's nutrition goal gauges
pub fn render_goals(area: Rect, buf: &mut Buffer, goals: &GoalReport, is_selected: bool) {
    let block = panel_block(" 🎯 Today's Goals ", is_selected);
    let inner = block.inner(area);
    block.render(area, buf);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(inner);

    macro_gauge("Calories", "kcal", &goals.calories).render(rows[0], buf);
    macro_gauge("Protein", "g", &goals.protein).render(rows[1], buf);
    macro_gauge("Carbs", "g", &goals.carbs).render(rows[2], buf);
    macro_gauge("Fat", "g", &goals.fat).render(rows[3], buf);
}

/// Render active reminders list
pub fn render_reminders(
    area: Rect,
    buf: &mut Buffer,
    reminders: &[Reminder],
    selected_index: usize,
    is_selected: bool,
) {
    let block = panel_block(" 🔔 Reminders ", is_selected);
    let inner = block.inner(area);
    block.render(area, buf);

    if reminders.is_empty() {
        Paragraph::new("Nothing due right now.")
            .style(Style::default().fg(Color::Gray))
            .render(inner, buf);
        return;
    }

    let items: Vec<ListItem> = reminders
        .iter()
        .enumerate()
        .map(|(idx, reminder)| {
            let title_style = if is_selected && idx == selected_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(Color::Yellow)
            };

            ListItem::new(vec![
                Line::from(Span::styled(reminder.title.clone(), title_style)),
                Line::from(Span::styled(
                    format!("  {}", reminder.message),
                    Style::default().fg(Color::White),
                )),
            ])
        })
        .collect();

    List::new(items).render(inner, buf);
}

/// Render help overlay
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    Clear.render(area, buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" ❓ Help ")
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(area);
    block.render(area, buf);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Navigation:", Style::default().fg(Color::Cyan))),
        Line::from("  Tab/→/l   - Next panel"),
        Line::from("  S-Tab/←/h - Previous panel"),
        Line::from("  ↑/k ↓/j   - Move within reminders"),
        Line::from(""),
        Line::from(Span::styled("Actions:", Style::default().fg(Color::Cyan))),
        Line::from("  w         - Cycle window (7/30/90 days)"),
        Line::from("  d         - Dismiss selected reminder for today"),
        Line::from("  r         - Refresh data"),
        Line::from(""),
        Line::from(Span::styled("Other:", Style::default().fg(Color::Cyan))),
        Line::from("  ?         - Toggle this help"),
        Line::from("  q/Esc     - Quit"),
    ];

    Paragraph::new(help_text).render(inner, buf);
}

/// Render status bar at bottom
pub fn render_status_bar(area: Rect, buf: &mut Buffer, status: &str) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", status),
            Style::default().fg(Color::Green).bg(Color::DarkGray),
        ),
        Span::styled(
            " Press ? for help ",
            Style::default().fg(Color::Gray).bg(Color::DarkGray),
        ),
    ]);

    Paragraph::new(line).render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::app::tests::snapshot;
    use fittrack::models::ReminderCategory;

    fn text(buf: &Buffer) -> String {
        buf.content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_bar_width_fits_area() {
        assert_eq!(bar_width(70, 7), 6);
        assert_eq!(bar_width(60, 30), 1);
        assert_eq!(bar_width(40, 90), 1);
        assert_eq!(bar_width(40, 0), 1);
    }

    #[test]
    fn test_reminders_panel_lists_titles() {
        let area = Rect::new(0, 0, 60, 8);
        let mut buf = Buffer::empty(area);
        let reminders = vec![Reminder {
            id: "lunch-nutrition".to_string(),
            category: ReminderCategory::Nutrition,
            title: "Nutrition Tracking".to_string(),
            message: "Log lunch".to_string(),
        }];

        render_reminders(area, &mut buf, &reminders, 0, true);
        assert!(text(&buf).contains("Nutrition Tracking"));
    }

    #[test]
    fn test_goal_gauges_show_targets() {
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        let snapshot = snapshot(vec![]);

        render_goals(area, &mut buf, &snapshot.goals, false);
        assert!(text(&buf).contains("0/2200 kcal"));
    }
}
