use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::analytics::day_key;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReminderCategory {
    Workout,
    Nutrition,
}

/// Active reminder notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub category: ReminderCategory,
    pub title: String,
    pub message: String,
}

/// Wall-clock reading the reminder rules are evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderClock {
    /// 0-23
    pub hour: u32,
    /// 0 = Sunday .. 6 = Saturday
    pub weekday: u32,
    pub today: NaiveDate,
}

impl ReminderClock {
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self {
            hour: now.hour(),
            weekday: now.weekday().num_days_from_sunday(),
            today: now.date_naive(),
        }
    }

    pub fn day_key(&self) -> String {
        day_key(self.today)
    }
}

/// Dismissed reminder ids per calendar day, persisted as one JSON blob
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DismissalRecord(BTreeMap<String, BTreeSet<String>>);

impl DismissalRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dismissed(&self, day_key: &str, reminder_id: &str) -> bool {
        self.0
            .get(day_key)
            .map(|ids| ids.contains(reminder_id))
            .unwrap_or(false)
    }

    /// Returns false when the id was already dismissed that day
    pub fn insert(&mut self, day_key: &str, reminder_id: &str) -> bool {
        self.0
            .entry(day_key.to_string())
            .or_default()
            .insert(reminder_id.to_string())
    }

    /// Drop every day before `cutoff`. Keys that do not parse as dates are dropped too.
    pub fn prune_before(&mut self, cutoff: NaiveDate) -> usize {
        let before = self.0.len();
        self.0.retain(|key, _| {
            NaiveDate::parse_from_str(key, super::analytics::DAY_KEY_FORMAT)
                .map(|day| day >= cutoff)
                .unwrap_or(false)
        });
        before - self.0.len()
    }

    pub fn days(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
