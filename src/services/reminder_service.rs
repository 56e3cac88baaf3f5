use crate::errors::{FitTrackError, Result};
use crate::models::{DismissalRecord, Reminder, ReminderCategory, ReminderClock};

pub const MORNING_WORKOUT: &str = "morning-workout";
pub const EVENING_WORKOUT: &str = "evening-workout";
pub const LUNCH_NUTRITION: &str = "lunch-nutrition";

struct ReminderRule {
    id: &'static str,
    category: ReminderCategory,
    title: &'static str,
    message: &'static str,
    hour: u32,
    weekdays_only: bool,
}

const RULES: [ReminderRule; 3] = [
    ReminderRule {
        id: MORNING_WORKOUT,
        category: ReminderCategory::Workout,
        title: "Morning Workout Reminder",
        message: "Start your day with energy! Time for your morning workout.",
        hour: 8,
        weekdays_only: true,
    },
    ReminderRule {
        id: EVENING_WORKOUT,
        category: ReminderCategory::Workout,
        title: "Evening Workout Reminder",
        message: "Finish strong! Your evening workout is waiting.",
        hour: 18,
        weekdays_only: true,
    },
    ReminderRule {
        id: LUNCH_NUTRITION,
        category: ReminderCategory::Nutrition,
        title: "Nutrition Tracking",
        message: "Don't forget to log your lunch and stay on track with your goals!",
        hour: 12,
        weekdays_only: false,
    },
];

impl ReminderRule {
    fn matches(&self, clock: &ReminderClock) -> bool {
        let weekday = (1..=5).contains(&clock.weekday);
        clock.hour == self.hour && (!self.weekdays_only || weekday)
    }

    fn to_reminder(&self) -> Reminder {
        Reminder {
            id: self.id.to_string(),
            category: self.category,
            title: self.title.to_string(),
            message: self.message.to_string(),
        }
    }
}

pub fn is_known_reminder(id: &str) -> bool {
    RULES.iter().any(|rule| rule.id == id)
}

fn validate_clock(clock: &ReminderClock) -> Result<()> {
    if clock.hour > 23 {
        return Err(FitTrackError::invalid(format!("hour must be 0-23, got {}", clock.hour)));
    }
    if clock.weekday > 6 {
        return Err(FitTrackError::invalid(format!(
            "day of week must be 0-6, got {}",
            clock.weekday
        )));
    }
    Ok(())
}

/// Reminders due at `clock` that have not been dismissed today
pub fn evaluate(clock: &ReminderClock, dismissals: &DismissalRecord) -> Result<Vec<Reminder>> {
    validate_clock(clock)?;
    let today = clock.day_key();

    Ok(RULES
        .iter()
        .filter(|rule| rule.matches(clock))
        .filter(|rule| !dismissals.is_dismissed(&today, rule.id))
        .map(ReminderRule::to_reminder)
        .collect())
}

/// Record a dismissal for the clock's day and return the updated blob.
///
/// The caller persists the returned record; reminder lists already handed out
/// are not touched.
pub fn dismiss(
    dismissals: &DismissalRecord,
    clock: &ReminderClock,
    reminder_id: &str,
) -> Result<DismissalRecord> {
    if !is_known_reminder(reminder_id) {
        return Err(FitTrackError::invalid(format!(
            "unknown reminder: {}",
            reminder_id
        )));
    }

    let mut updated = dismissals.clone();
    updated.insert(&clock.day_key(), reminder_id);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    // 2024-01-01 is a Monday
    fn clock(hour: u32, day: u32) -> ReminderClock {
        let today = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        let weekday = chrono::Datelike::weekday(&today).num_days_from_sunday();
        ReminderClock { hour, weekday, today }
    }

    fn ids(reminders: &[Reminder]) -> Vec<&str> {
        reminders.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_weekday_rules() {
        let none = DismissalRecord::new();
        assert_eq!(ids(&evaluate(&clock(8, 1), &none).unwrap()), vec![MORNING_WORKOUT]);
        assert_eq!(ids(&evaluate(&clock(18, 5), &none).unwrap()), vec![EVENING_WORKOUT]);
        assert_eq!(ids(&evaluate(&clock(12, 3), &none).unwrap()), vec![LUNCH_NUTRITION]);
        assert!(evaluate(&clock(9, 3), &none).unwrap().is_empty());
    }

    #[test]
    fn test_weekend_has_only_lunch() {
        let none = DismissalRecord::new();
        // 2024-01-06 Saturday, 2024-01-07 Sunday
        assert!(evaluate(&clock(8, 6), &none).unwrap().is_empty());
        assert!(evaluate(&clock(18, 7), &none).unwrap().is_empty());
        assert_eq!(ids(&evaluate(&clock(12, 7), &none).unwrap()), vec![LUNCH_NUTRITION]);
    }

    #[test]
    fn test_dismissal_is_scoped_to_one_day() {
        let noon = clock(12, 3);
        let before = evaluate(&noon, &DismissalRecord::new()).unwrap();

        let dismissed = dismiss(&DismissalRecord::new(), &noon, LUNCH_NUTRITION).unwrap();

        assert!(evaluate(&noon, &dismissed).unwrap().is_empty());
        assert_eq!(ids(&evaluate(&clock(12, 4), &dismissed).unwrap()), vec![LUNCH_NUTRITION]);
        // previously computed list is untouched
        assert_eq!(ids(&before), vec![LUNCH_NUTRITION]);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let mut dismissals = DismissalRecord::new();
        dismissals.insert("2024-01-02", MORNING_WORKOUT);

        let first = evaluate(&clock(8, 3), &dismissals).unwrap();
        let second = evaluate(&clock(8, 3), &dismissals).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_clock_and_unknown_ids() {
        let none = DismissalRecord::new();
        let mut bad = clock(12, 3);
        bad.hour = 24;
        assert!(matches!(evaluate(&bad, &none), Err(FitTrackError::InvalidArgument(_))));

        let mut bad = clock(12, 3);
        bad.weekday = 7;
        assert!(matches!(evaluate(&bad, &none), Err(FitTrackError::InvalidArgument(_))));

        assert!(matches!(
            dismiss(&none, &clock(12, 3), "midnight-snack"),
            Err(FitTrackError::InvalidArgument(_))
        ));
    }
}
