use chrono::{Duration, FixedOffset, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use fittrack::models::{
    DismissalRecord, NewNutritionEntry, NewWorkout, NutritionRecord, ReminderClock, WorkoutRecord,
};
use fittrack::services::{aggregate, day_buckets, goal_evaluator, reminder_service};

fn base_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn meal(i: usize, offset: i64, calories: u32) -> NutritionRecord {
    let date = base_day() + Duration::days(offset);
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    let entry = NewNutritionEntry::quick_meal("Meal", calories, 1.0, date, now).unwrap();
    NutritionRecord::from_new(format!("m{}", i), "u1", entry)
}

proptest! {
    #[test]
    fn buckets_are_consecutive_and_end_on_the_requested_day(
        offset in 0i64..3650,
        days in 1i64..400,
    ) {
        let end = base_day() + Duration::days(offset);
        let buckets = day_buckets(end, days).unwrap();

        prop_assert_eq!(buckets.len() as i64, days);
        prop_assert_eq!(buckets.last().unwrap().date, end);
        for pair in buckets.windows(2) {
            prop_assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
        }
    }

    #[test]
    fn non_positive_windows_are_rejected(days in -1000i64..=0) {
        prop_assert!(day_buckets(base_day(), days).is_err());
    }

    #[test]
    fn calories_inside_the_window_are_conserved(
        meals in prop::collection::vec((0i64..30, 1u32..3000), 0..40),
        days in 1i64..30,
    ) {
        let end = base_day() + Duration::days(29);
        let buckets = day_buckets(end, days).unwrap();
        let start = buckets[0].date;

        let records: Vec<NutritionRecord> = meals
            .iter()
            .enumerate()
            .map(|(i, (offset, kcal))| meal(i, *offset, *kcal))
            .collect();
        let expected: u64 = records
            .iter()
            .filter(|r| r.date.map_or(false, |d| d >= start && d <= end))
            .map(|r| u64::from(r.calories))
            .sum();

        let aggregation = aggregate(&records, &[], &buckets, &FixedOffset::east_opt(0).unwrap());
        prop_assert_eq!(aggregation.total_calories(), expected);
        prop_assert_eq!(aggregation.buckets.len() as i64, days);
    }

    #[test]
    fn every_completed_workout_in_range_lands_in_one_bucket(
        hours in prop::collection::vec(0i64..(14 * 24), 0..30),
        offset_minutes in -720i32..=840,
    ) {
        let zone = FixedOffset::east_opt(offset_minutes * 60).unwrap();
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let workouts: Vec<WorkoutRecord> = hours
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let at = start + Duration::hours(*h);
                WorkoutRecord::from_new(
                    format!("w{}", i),
                    "u1",
                    NewWorkout::quick_log("Run", 30, at).unwrap(),
                )
            })
            .collect();

        // Wide enough to hold every completion day in any zone
        let end = NaiveDate::from_ymd_opt(2024, 1, 16).unwrap();
        let buckets = day_buckets(end, 18).unwrap();

        let aggregation = aggregate(&[], &workouts, &buckets, &zone);
        prop_assert_eq!(aggregation.total_workouts(), workouts.len() as u64);
    }

    #[test]
    fn progress_ratio_is_capped_and_monotonic(
        a in 0.0f64..10_000.0,
        b in 0.0f64..10_000.0,
        goal in 1.0f64..5_000.0,
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let low_ratio = goal_evaluator::progress_ratio(low, goal).unwrap();
        let high_ratio = goal_evaluator::progress_ratio(high, goal).unwrap();

        prop_assert!((0.0..=1.0).contains(&low_ratio));
        prop_assert!((0.0..=1.0).contains(&high_ratio));
        prop_assert!(low_ratio <= high_ratio);
    }

    #[test]
    fn dismissing_twice_matches_dismissing_once(hour in 0u32..24, weekday in 0u32..7) {
        let clock = ReminderClock {
            hour,
            weekday,
            today: base_day(),
        };
        let empty = DismissalRecord::new();

        let once = reminder_service::dismiss(&empty, &clock, "lunch-nutrition").unwrap();
        let twice = reminder_service::dismiss(&once, &clock, "lunch-nutrition").unwrap();
        prop_assert_eq!(&once, &twice);

        let active = reminder_service::evaluate(&clock, &once).unwrap();
        prop_assert!(active.iter().all(|r| r.id != "lunch-nutrition"));
    }
}
