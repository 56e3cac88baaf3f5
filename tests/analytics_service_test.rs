use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;

use fittrack::errors::FitTrackError;
use fittrack::models::{
    FitnessGoal, NewNutritionEntry, NewWorkout, UpdateProfileRequest, UserProfile,
};
use fittrack::services::AnalyticsService;
use fittrack::store::{dismissal_key, DismissalStore, InMemoryStore, RecordStore};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn service_in(store: &Arc<InMemoryStore>, offset_hours: i32) -> AnalyticsService {
    AnalyticsService::new(
        store.clone(),
        store.clone(),
        FixedOffset::east_opt(offset_hours * 3600).unwrap(),
    )
}

#[tokio::test]
async fn test_muscle_gain_profile_progress() {
    let store = Arc::new(InMemoryStore::new());
    let now = Utc.with_ymd_and_hms(2024, 1, 3, 19, 0, 0).unwrap();

    let mut profile = UserProfile::new("u1");
    profile
        .apply(
            UpdateProfileRequest {
                weight_kg: Some(80.0),
                fitness_goal: Some(FitnessGoal::MuscleGain),
                ..Default::default()
            },
            now,
        )
        .unwrap();
    store.put_profile(profile).await.unwrap();

    // 2000 kcal and 100 g protein: 69 g from the quick-meal split plus the shake
    store
        .create_nutrition(
            "u1",
            NewNutritionEntry::quick_meal("Dinner", 1840, 1.0, date(2024, 1, 3), now).unwrap(),
        )
        .await
        .unwrap();
    let shake = fittrack::models::FoodItem {
        name: "Protein shake".to_string(),
        serving: "1 scoop".to_string(),
        calories: 160.0,
        protein: 31.0,
        carbs: 3.0,
        fat: 2.0,
    };
    store
        .create_nutrition(
            "u1",
            NewNutritionEntry::from_food(&shake, 1.0, date(2024, 1, 3), now).unwrap(),
        )
        .await
        .unwrap();

    let service = service_in(&store, 0);
    let daily = service.daily_nutrition("u1", date(2024, 1, 3)).await.unwrap();

    assert_eq!(daily.meals.len(), 2);
    assert_eq!(daily.report.goals.calories, 2500);
    assert_eq!(daily.report.goals.protein, 128);
    assert_eq!(daily.report.totals.calories, 2000);
    assert!((daily.report.calories.percent - 80.0).abs() < 1e-9);
    assert!((daily.report.protein.percent - 100.0 / 128.0 * 100.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_window_report_uses_service_zone() {
    let store = Arc::new(InMemoryStore::new());
    // 23:30 UTC on Jan 6 is already Jan 7 two hours east
    let late = Utc.with_ymd_and_hms(2024, 1, 6, 23, 30, 0).unwrap();
    store
        .create_workout("u1", NewWorkout::quick_log("Late run", 25, late).unwrap())
        .await
        .unwrap();

    let utc = service_in(&store, 0)
        .window_report("u1", date(2024, 1, 7), 7)
        .await
        .unwrap();
    let east = service_in(&store, 2)
        .window_report("u1", date(2024, 1, 7), 7)
        .await
        .unwrap();

    assert_eq!(utc.aggregation.workout_series(), vec![0, 0, 0, 0, 0, 1, 0]);
    assert_eq!(east.aggregation.workout_series(), vec![0, 0, 0, 0, 0, 0, 1]);
    assert_eq!(east.total_workouts, 1);
}

#[tokio::test]
async fn test_window_report_rejects_empty_window() {
    let store = Arc::new(InMemoryStore::new());
    let result = service_in(&store, 0)
        .window_report("u1", date(2024, 1, 7), -3)
        .await;

    assert_matches!(result, Err(FitTrackError::InvalidArgument(_)));
}

#[tokio::test]
async fn test_dashboard_counts_current_week() {
    let store = Arc::new(InMemoryStore::new());
    let now = Utc.with_ymd_and_hms(2024, 1, 3, 15, 0, 0).unwrap();

    for (name, day) in [("Mon", 1), ("Tue", 2), ("Last week", 30)] {
        let month = if day == 30 { 12 } else { 1 };
        let year = if day == 30 { 2023 } else { 2024 };
        let at = Utc.with_ymd_and_hms(year, month, day, 7, 0, 0).unwrap();
        store
            .create_workout("u1", NewWorkout::quick_log(name, 30, at).unwrap())
            .await
            .unwrap();
    }
    store
        .create_nutrition(
            "u1",
            NewNutritionEntry::quick_meal("Lunch", 700, 1.0, date(2024, 1, 3), now).unwrap(),
        )
        .await
        .unwrap();

    let summary = service_in(&store, 0).dashboard("u1", now).await.unwrap();

    assert_eq!(summary.week_start, date(2023, 12, 31));
    assert_eq!(summary.weekly_workouts, 2);
    assert_eq!(summary.today_calories, 700);
    assert!((summary.weekly_average_calories - 100.0).abs() < 1e-9);
    assert_eq!(summary.recent_workouts.len(), 3);
}

#[tokio::test]
async fn test_dismissals_are_per_day() {
    let store = Arc::new(InMemoryStore::new());
    let service = service_in(&store, 0);
    let monday_morning = Utc.with_ymd_and_hms(2024, 1, 1, 8, 15, 0).unwrap();
    let tuesday_morning = Utc.with_ymd_and_hms(2024, 1, 2, 8, 15, 0).unwrap();

    service
        .dismiss_reminder("u1", "morning-workout", monday_morning)
        .await
        .unwrap();
    assert!(service
        .active_reminders("u1", monday_morning)
        .await
        .unwrap()
        .is_empty());

    let tuesday = service.active_reminders("u1", tuesday_morning).await.unwrap();
    assert_eq!(tuesday.len(), 1);
    assert_eq!(tuesday[0].id, "morning-workout");

    service
        .dismiss_reminder("u1", "morning-workout", tuesday_morning)
        .await
        .unwrap();
    let stored = DismissalStore::get(store.as_ref(), &dismissal_key("u1"))
        .await
        .unwrap();
    assert_eq!(stored.days(), 1);
    assert!(stored.is_dismissed("2024-01-02", "morning-workout"));
}

#[tokio::test]
async fn test_other_owners_records_are_invisible() {
    let store = Arc::new(InMemoryStore::new());
    let now = Utc.with_ymd_and_hms(2024, 1, 7, 12, 0, 0).unwrap();
    store
        .create_nutrition(
            "someone-else",
            NewNutritionEntry::quick_meal("Pizza", 900, 1.0, date(2024, 1, 7), now).unwrap(),
        )
        .await
        .unwrap();

    let report = service_in(&store, 0)
        .window_report("u1", date(2024, 1, 7), 7)
        .await
        .unwrap();
    assert_eq!(report.total_calories, 0);
}

#[tokio::test]
async fn test_stored_implausible_weight_falls_back_to_default_protein() {
    let store = Arc::new(InMemoryStore::new());
    let now = Utc.with_ymd_and_hms(2024, 1, 3, 9, 0, 0).unwrap();

    let mut profile = UserProfile::new("u1");
    let update = UpdateProfileRequest {
        weight_kg: Some(0.3),
        ..Default::default()
    };
    assert_matches!(profile.apply(update, now), Err(FitTrackError::InvalidArgument(_)));

    // Records written before the weight range existed
    profile.weight_kg = Some(0.3);
    store.put_profile(profile).await.unwrap();

    let service = service_in(&store, 0);
    let daily = service.daily_nutrition("u1", date(2024, 1, 3)).await.unwrap();
    assert_eq!(daily.report.goals.protein, 112);
}
