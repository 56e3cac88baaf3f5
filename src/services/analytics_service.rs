use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, info};

use crate::errors::Result;
use crate::models::{
    AnalyticsReport, DashboardSummary, GoalReport, NutritionRecord, Reminder, ReminderClock,
};
use crate::services::{aggregation_service, goal_evaluator, reminder_service, time_bucketing};
use crate::store::{dismissal_key, DismissalStore, RecordStore};

/// Fetches a snapshot from the record store and runs the pure analytics over it.
///
/// All calendar-day decisions use `zone`.
#[derive(Clone)]
pub struct AnalyticsService {
    records: Arc<dyn RecordStore>,
    dismissals: Arc<dyn DismissalStore>,
    zone: FixedOffset,
}

/// One day's meals with goal progress
#[derive(Debug, Clone, serde::Serialize)]
pub struct DailyNutrition {
    pub date: NaiveDate,
    pub meals: Vec<NutritionRecord>,
    pub report: GoalReport,
}

impl AnalyticsService {
    pub fn new(
        records: Arc<dyn RecordStore>,
        dismissals: Arc<dyn DismissalStore>,
        zone: FixedOffset,
    ) -> Self {
        Self {
            records,
            dismissals,
            zone,
        }
    }

    pub fn zone(&self) -> FixedOffset {
        self.zone
    }

    /// Today's date in the service zone
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.zone).date_naive()
    }

    /// Aggregated window of `days` days ending at `end`
    pub async fn window_report(
        &self,
        owner_id: &str,
        end: NaiveDate,
        days: i64,
    ) -> Result<AnalyticsReport> {
        let buckets = time_bucketing::day_buckets(end, days)?;

        let nutrition = self.records.list_nutrition(owner_id).await?;
        let workouts = self.records.list_workouts(owner_id).await?;
        debug!(
            owner_id,
            nutrition = nutrition.len(),
            workouts = workouts.len(),
            "Fetched records for analytics window"
        );

        let aggregation = aggregation_service::aggregate(&nutrition, &workouts, &buckets, &self.zone);
        let total_workouts = aggregation.total_workouts();

        Ok(AnalyticsReport {
            window_days: days,
            start: buckets[0].date,
            end,
            total_calories: aggregation.total_calories(),
            total_workouts,
            average_daily_calories: aggregation.average_daily_calories(),
            weekly_workout_frequency: goal_evaluator::weekly_workout_frequency(total_workouts, days)?,
            aggregation,
        })
    }

    pub async fn dashboard(&self, owner_id: &str, now: DateTime<Utc>) -> Result<DashboardSummary> {
        let nutrition = self.records.list_nutrition(owner_id).await?;
        let workouts = self.records.list_workouts(owner_id).await?;

        Ok(aggregation_service::dashboard_summary(
            &nutrition,
            &workouts,
            &now.with_timezone(&self.zone),
        ))
    }

    /// Meals and goal progress for a single day
    pub async fn daily_nutrition(&self, owner_id: &str, date: NaiveDate) -> Result<DailyNutrition> {
        let profile = self.records.get_profile(owner_id).await?;
        let nutrition = self.records.list_nutrition(owner_id).await?;

        let totals = aggregation_service::daily_totals(&nutrition, date);
        let report = goal_evaluator::evaluate(profile.as_ref(), &totals)?;

        Ok(DailyNutrition {
            date,
            meals: aggregation_service::meals_on(&nutrition, date),
            report,
        })
    }

    pub async fn active_reminders(
        &self,
        owner_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<Reminder>> {
        let clock = ReminderClock::at(&now.with_timezone(&self.zone));
        let dismissals = self.dismissals.get(&dismissal_key(owner_id)).await?;

        reminder_service::evaluate(&clock, &dismissals)
    }

    /// Dismiss a reminder for the rest of today. Stale days are pruned on write.
    pub async fn dismiss_reminder(
        &self,
        owner_id: &str,
        reminder_id: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let clock = ReminderClock::at(&now.with_timezone(&self.zone));
        let key = dismissal_key(owner_id);

        let current = self.dismissals.get(&key).await?;
        let mut updated = reminder_service::dismiss(&current, &clock, reminder_id)?;
        updated.prune_before(clock.today);

        self.dismissals.set(&key, updated).await?;
        info!(owner_id, reminder_id, "Reminder dismissed for {}", clock.day_key());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FitTrackError;
    use crate::models::DismissalRecord;
    use crate::store::{MockDismissalStore, MockRecordStore};
    use chrono::TimeZone;

    fn service(records: MockRecordStore, dismissals: MockDismissalStore) -> AnalyticsService {
        AnalyticsService::new(
            Arc::new(records),
            Arc::new(dismissals),
            FixedOffset::east_opt(0).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_store_outage_is_propagated_unchanged() {
        let mut records = MockRecordStore::new();
        records
            .expect_list_nutrition()
            .times(1)
            .returning(|_| Err(FitTrackError::StoreUnavailable("connection reset".to_string())));
        records.expect_list_workouts().never();

        let service = service(records, MockDismissalStore::new());
        let end = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();

        let result = service.window_report("u1", end, 7).await;
        assert_eq!(
            result.unwrap_err(),
            FitTrackError::StoreUnavailable("connection reset".to_string())
        );
    }

    #[tokio::test]
    async fn test_invalid_window_does_not_touch_store() {
        let mut records = MockRecordStore::new();
        records.expect_list_nutrition().never();
        records.expect_list_workouts().never();

        let service = service(records, MockDismissalStore::new());
        let end = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();

        let result = service.window_report("u1", end, 0).await;
        assert!(matches!(result, Err(FitTrackError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_dismiss_prunes_old_days() {
        let mut dismissals = MockDismissalStore::new();
        dismissals.expect_get().returning(|_| {
            let mut old = DismissalRecord::new();
            old.insert("2024-01-01", "lunch-nutrition");
            Ok(old)
        });
        dismissals
            .expect_set()
            .withf(|key, record| {
                key.to_string() == "dismissed_reminders/u1"
                    && record.days() == 1
                    && record.is_dismissed("2024-01-03", "lunch-nutrition")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = service(MockRecordStore::new(), dismissals);
        let noon = Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap();

        service
            .dismiss_reminder("u1", "lunch-nutrition", noon)
            .await
            .unwrap();
    }
}
