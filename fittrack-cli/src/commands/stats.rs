use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use colored::Colorize;

use super::{progress_bar, AppContext};

#[derive(Args)]
pub struct StatsCommand {
    /// Window size in days (defaults to analytics.default_window_days)
    #[arg(short, long)]
    days: Option<i64>,

    /// Last day of the window (YYYY-MM-DD), defaults to today
    #[arg(long)]
    end: Option<NaiveDate>,
}

impl StatsCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let days = self
            .days
            .unwrap_or(ctx.config.analytics.default_window_days);
        let end = self.end.unwrap_or_else(|| ctx.today());

        let report = ctx.analytics.window_report(&ctx.owner_id, end, days).await?;
        let aggregation = &report.aggregation;

        println!(
            "{}",
            format!("Last {} days ({} to {})", days, report.start, report.end).bold()
        );
        println!();

        let peak = aggregation
            .buckets
            .iter()
            .map(|b| b.calories)
            .max()
            .unwrap_or(0)
            .max(1);

        for bucket in &aggregation.buckets {
            let workouts = if bucket.workouts > 0 {
                format!("{} workout(s)", bucket.workouts).green().to_string()
            } else {
                String::new()
            };
            println!(
                "{:>6}  {} {:>5} kcal  {}",
                bucket.label,
                progress_bar(bucket.calories as f64 / peak as f64, 20),
                bucket.calories,
                workouts
            );
        }

        println!();
        println!("Total calories:        {}", report.total_calories.to_string().bold());
        println!("Average per day:       {:.0} kcal", report.average_daily_calories);
        println!("Workouts completed:    {}", report.total_workouts.to_string().bold());
        println!("Workouts per week:     {}", report.weekly_workout_frequency);
        println!(
            "Average per meal:      P {:.1}g  C {:.1}g  F {:.1}g ({} meals)",
            aggregation.macro_averages.protein,
            aggregation.macro_averages.carbs,
            aggregation.macro_averages.fat,
            aggregation.meals_counted
        );

        if aggregation.skipped_records > 0 {
            println!(
                "{}",
                format!(
                    "{} record(s) skipped: missing date or completion time",
                    aggregation.skipped_records
                )
                .yellow()
            );
        }

        Ok(())
    }
}
