use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::Args;
use colored::Colorize;

use fittrack::models::{FoodItem, NewNutritionEntry, RecordKind};
use fittrack::store::RecordStore;

use super::{confirm, AppContext};

#[derive(Args)]
pub struct LogMealArgs {
    /// Food name
    name: String,

    /// Calories per serving
    #[arg(short, long)]
    calories: u32,

    /// Number of servings
    #[arg(short, long, default_value_t = 1.0)]
    quantity: f64,

    /// Protein grams per serving
    #[arg(long)]
    protein: Option<f64>,

    /// Carbohydrate grams per serving
    #[arg(long)]
    carbs: Option<f64>,

    /// Fat grams per serving
    #[arg(long)]
    fat: Option<f64>,

    /// Serving description, e.g. "100 g"
    #[arg(long)]
    serving: Option<String>,

    /// Day the meal was eaten (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl LogMealArgs {
    /// Meals with any macro figure are logged as a food item; the rest get
    /// estimated macros
    fn into_entry(self, today: NaiveDate) -> Result<NewNutritionEntry> {
        let date = self.date.unwrap_or(today);
        let now = Utc::now();

        if self.protein.is_none() && self.carbs.is_none() && self.fat.is_none() {
            return Ok(NewNutritionEntry::quick_meal(
                &self.name,
                self.calories,
                self.quantity,
                date,
                now,
            )?);
        }

        let food = FoodItem {
            name: self.name,
            serving: self.serving.unwrap_or_else(|| "1 serving".to_string()),
            calories: f64::from(self.calories),
            protein: self.protein.unwrap_or(0.0),
            carbs: self.carbs.unwrap_or(0.0),
            fat: self.fat.unwrap_or(0.0),
        };
        Ok(NewNutritionEntry::from_food(&food, self.quantity, date, now)?)
    }
}

pub async fn log_meal(ctx: &AppContext, args: LogMealArgs) -> Result<()> {
    let entry = args.into_entry(ctx.today())?;
    let summary = format!(
        "{} kcal, {:.1}g protein, {:.1}g carbs, {:.1}g fat",
        entry.calories, entry.protein, entry.carbs, entry.fat
    );
    let name = entry.food_name.clone();

    let id = ctx.records.create_nutrition(&ctx.owner_id, entry).await?;

    println!("{} Logged {} ({})", "✓".green(), name.bold(), summary);
    println!("  id: {}", id);
    Ok(())
}

pub async fn list_meals(ctx: &AppContext, date: Option<NaiveDate>) -> Result<()> {
    let date = date.unwrap_or_else(|| ctx.today());
    let daily = ctx.analytics.daily_nutrition(&ctx.owner_id, date).await?;

    println!(
        "{}",
        format!("Meals on {}", ctx.config.format_day(date)).bold()
    );
    println!();

    if daily.meals.is_empty() {
        println!("Nothing logged.");
        return Ok(());
    }

    for meal in &daily.meals {
        println!(
            "{}  {:<24} {:>5} kcal  x{:<4} P {:>5.1}  C {:>5.1}  F {:>5.1}",
            meal.id.dimmed(),
            meal.food_name,
            meal.calories,
            meal.quantity,
            meal.protein,
            meal.carbs,
            meal.fat
        );
    }

    let totals = daily.report.totals;
    println!();
    println!(
        "Total: {} kcal  P {:.1}g  C {:.1}g  F {:.1}g",
        totals.calories.to_string().bold(),
        totals.protein,
        totals.carbs,
        totals.fat
    );
    Ok(())
}

pub async fn delete_meal(ctx: &AppContext, id: &str, force: bool) -> Result<()> {
    if !confirm(&format!("Delete meal entry {}?", id), force)? {
        println!("Cancelled");
        return Ok(());
    }

    ctx.records
        .delete(&ctx.owner_id, RecordKind::Nutrition, id)
        .await?;

    println!("{} Meal entry {} deleted", "✓".green(), id);
    Ok(())
}
