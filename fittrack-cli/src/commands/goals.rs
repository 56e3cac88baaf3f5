use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use colored::Colorize;

use fittrack::models::MacroProgress;

use super::{progress_bar, AppContext};

#[derive(Args)]
pub struct GoalsCommand {
    /// Day to evaluate (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,
}

fn print_progress(label: &str, unit: &str, progress: &MacroProgress) {
    let bar = progress_bar(progress.ratio, 24);
    let bar = if progress.is_met() {
        bar.green()
    } else {
        bar.cyan()
    };

    println!(
        "{:<9} {} {:>6.0}/{:<5.0}{:<4} {:>3.0}%",
        label, bar, progress.current, progress.goal, unit, progress.uncapped_percent
    );
}

impl GoalsCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let date = self.date.unwrap_or_else(|| ctx.today());
        let daily = ctx.analytics.daily_nutrition(&ctx.owner_id, date).await?;
        let report = &daily.report;

        println!(
            "{}",
            format!("Nutrition goals for {}", ctx.config.format_day(date)).bold()
        );
        println!();
        print_progress("Calories", "kcal", &report.calories);
        print_progress("Protein", "g", &report.protein);
        print_progress("Carbs", "g", &report.carbs);
        print_progress("Fat", "g", &report.fat);

        Ok(())
    }
}
