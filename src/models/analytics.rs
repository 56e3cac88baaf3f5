use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::WorkoutRecord;

/// Format of bucket keys and dismissal-day keys
pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";
/// Short chart label, e.g. "Jan 3"
pub const DAY_LABEL_FORMAT: &str = "%b %-d";

/// One calendar-day slot of a query window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub key: String,
    pub label: String,
}

impl DayBucket {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            key: day_key(date),
            label: date.format(DAY_LABEL_FORMAT).to_string(),
        }
    }
}

pub fn day_key(date: NaiveDate) -> String {
    date.format(DAY_KEY_FORMAT).to_string()
}

/// Per-day totals for charting. Days without records stay at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBucket {
    pub key: String,
    pub label: String,
    pub date: NaiveDate,
    pub calories: u64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub workouts: u32,
}

impl DailyBucket {
    pub fn empty(bucket: &DayBucket) -> Self {
        Self {
            key: bucket.key.clone(),
            label: bucket.label.clone(),
            date: bucket.date,
            calories: 0,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
            workouts: 0,
        }
    }
}

/// Mean grams per logged meal over the window
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroAverages {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Result of folding records into a window of day buckets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    pub buckets: Vec<DailyBucket>,
    pub macro_averages: MacroAverages,
    /// Nutrition records that fell inside the window
    pub meals_counted: usize,
    /// Records skipped for lacking a date or completion timestamp
    pub skipped_records: usize,
}

impl Aggregation {
    pub fn total_calories(&self) -> u64 {
        self.buckets.iter().map(|b| b.calories).sum()
    }

    pub fn total_workouts(&self) -> u64 {
        self.buckets.iter().map(|b| u64::from(b.workouts)).sum()
    }

    /// Total calories spread over every day of the window, logged or not
    pub fn average_daily_calories(&self) -> f64 {
        if self.buckets.is_empty() {
            return 0.0;
        }
        self.total_calories() as f64 / self.buckets.len() as f64
    }

    pub fn calorie_series(&self) -> Vec<u64> {
        self.buckets.iter().map(|b| b.calories).collect()
    }

    pub fn workout_series(&self) -> Vec<u32> {
        self.buckets.iter().map(|b| b.workouts).collect()
    }

    pub fn labels(&self) -> Vec<String> {
        self.buckets.iter().map(|b| b.label.clone()).collect()
    }
}

/// Analytics page payload: the aggregated window plus its summary figures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub window_days: i64,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub aggregation: Aggregation,
    pub total_calories: u64,
    pub total_workouts: u64,
    pub average_daily_calories: f64,
    pub weekly_workout_frequency: u32,
}

/// Home screen figures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub weekly_workouts: u32,
    pub today_calories: u64,
    pub weekly_average_calories: f64,
    pub recent_workouts: Vec<WorkoutRecord>,
}
