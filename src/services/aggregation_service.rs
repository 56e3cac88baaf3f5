use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::models::{
    Aggregation, DailyBucket, DashboardSummary, DayBucket, MacroAverages, NutritionRecord,
    NutritionTotals, WorkoutRecord,
};
use crate::services::time_bucketing::week_bounds;

/// Number of completed workouts listed on the dashboard
pub const RECENT_WORKOUT_LIMIT: usize = 5;

/// Fold nutrition and workout records into the given day buckets.
///
/// Calendar-day membership of workout completion timestamps is decided in `tz`.
/// Records outside every bucket are ignored; records without a date (or
/// completed workouts without a completion timestamp) are skipped and counted.
pub fn aggregate<Tz: TimeZone>(
    nutrition: &[NutritionRecord],
    workouts: &[WorkoutRecord],
    buckets: &[DayBucket],
    tz: &Tz,
) -> Aggregation {
    let mut daily: Vec<DailyBucket> = buckets.iter().map(DailyBucket::empty).collect();
    let index: HashMap<NaiveDate, usize> = buckets
        .iter()
        .enumerate()
        .map(|(i, bucket)| (bucket.date, i))
        .collect();

    let mut skipped_records = 0;
    let mut window_totals = NutritionTotals::default();
    let mut meals_counted = 0usize;

    for record in nutrition {
        let date = match record.bucket_date() {
            Ok(date) => date,
            Err(err) => {
                warn!(%err, "Skipping nutrition record");
                skipped_records += 1;
                continue;
            }
        };

        let Some(&slot) = index.get(&date) else {
            continue;
        };

        let mut day_totals = NutritionTotals::default();
        day_totals.add(record);

        let bucket = &mut daily[slot];
        bucket.calories += day_totals.calories;
        bucket.protein += day_totals.protein;
        bucket.carbs += day_totals.carbs;
        bucket.fat += day_totals.fat;

        window_totals.add(record);
        meals_counted += 1;
    }

    for workout in workouts {
        if let Err(err) = workout.check_completion() {
            warn!(%err, "Skipping workout");
            skipped_records += 1;
            continue;
        }

        let Some(day) = workout.completion_day(tz) else {
            continue;
        };

        if let Some(&slot) = index.get(&day) {
            daily[slot].workouts += 1;
        }
    }

    let macro_averages = if meals_counted > 0 {
        let count = meals_counted as f64;
        MacroAverages {
            protein: window_totals.protein / count,
            carbs: window_totals.carbs / count,
            fat: window_totals.fat / count,
        }
    } else {
        MacroAverages::default()
    };

    debug!(
        buckets = daily.len(),
        meals_counted, skipped_records, "Aggregated records into day buckets"
    );

    Aggregation {
        buckets: daily,
        macro_averages,
        meals_counted,
        skipped_records,
    }
}

/// Calorie and macro totals logged on one day
pub fn daily_totals(nutrition: &[NutritionRecord], day: NaiveDate) -> NutritionTotals {
    nutrition
        .iter()
        .filter(|record| record.date == Some(day))
        .fold(NutritionTotals::default(), |mut totals, record| {
            totals.add(record);
            totals
        })
}

/// Meals logged on `day`, in insertion order
pub fn meals_on(nutrition: &[NutritionRecord], day: NaiveDate) -> Vec<NutritionRecord> {
    nutrition
        .iter()
        .filter(|record| record.date == Some(day))
        .cloned()
        .collect()
}

/// Dashboard figures for the calendar week (Sunday start) containing `now`
pub fn dashboard_summary<Tz: TimeZone>(
    nutrition: &[NutritionRecord],
    workouts: &[WorkoutRecord],
    now: &DateTime<Tz>,
) -> DashboardSummary {
    let tz = now.timezone();
    let today = now.date_naive();
    let (week_start, week_end) = week_bounds(today);
    let in_week = |day: NaiveDate| day >= week_start && day <= week_end;

    let weekly_workouts = workouts
        .iter()
        .filter_map(|w| w.completion_day(&tz))
        .filter(|day| in_week(*day))
        .count() as u32;

    let today_calories = daily_totals(nutrition, today).calories;

    let week_calories: u64 = nutrition
        .iter()
        .filter(|record| record.date.map(in_week).unwrap_or(false))
        .map(|record| u64::from(record.calories))
        .sum();

    DashboardSummary {
        week_start,
        week_end,
        weekly_workouts,
        today_calories,
        weekly_average_calories: week_calories as f64 / 7.0,
        recent_workouts: recent_completed(workouts, RECENT_WORKOUT_LIMIT),
    }
}

/// Most recently completed workouts, newest first
pub fn recent_completed(workouts: &[WorkoutRecord], limit: usize) -> Vec<WorkoutRecord> {
    let mut completed: Vec<&WorkoutRecord> = workouts.iter().filter(|w| w.completed).collect();
    completed.sort_by(|a, b| {
        let a_at = a.completed_at.unwrap_or(DateTime::<Utc>::MIN_UTC);
        let b_at = b.completed_at.unwrap_or(DateTime::<Utc>::MIN_UTC);
        b_at.cmp(&a_at)
    });
    completed.into_iter().take(limit).cloned().collect()
}

/// Newest first by scheduled time, falling back to creation time
pub fn newest_first(workouts: &mut [WorkoutRecord]) {
    workouts.sort_by(|a, b| {
        let a_key = a.scheduled_for.or(a.created_at);
        let b_key = b.scheduled_for.or(b.created_at);
        b_key.cmp(&a_key)
    });
}
