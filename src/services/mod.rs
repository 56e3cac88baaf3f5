// Analytics pipeline: bucketing, aggregation, goals and reminders

pub mod aggregation_service;
pub mod analytics_service;
pub mod goal_evaluator;
pub mod reminder_service;
pub mod time_bucketing;

pub use aggregation_service::{aggregate, daily_totals, dashboard_summary};
pub use analytics_service::{AnalyticsService, DailyNutrition};
pub use time_bucketing::day_buckets;
