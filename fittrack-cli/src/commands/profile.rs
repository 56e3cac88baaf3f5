use anyhow::{bail, Result};
use chrono::Utc;
use clap::Args;
use colored::Colorize;

use fittrack::models::{FitnessGoal, UpdateProfileRequest, UserProfile};
use fittrack::services::goal_evaluator;
use fittrack::store::RecordStore;

use super::AppContext;

#[derive(Args)]
pub struct SetProfileArgs {
    /// Display name
    #[arg(long)]
    name: Option<String>,

    /// Age in years
    #[arg(long)]
    age: Option<u32>,

    /// Body weight in kg
    #[arg(long, allow_negative_numbers = true)]
    weight: Option<f64>,

    /// Height in cm
    #[arg(long, allow_negative_numbers = true)]
    height: Option<f64>,

    /// weight_loss, muscle_gain, maintenance or endurance
    #[arg(long)]
    goal: Option<FitnessGoal>,
}

impl From<SetProfileArgs> for UpdateProfileRequest {
    fn from(args: SetProfileArgs) -> Self {
        UpdateProfileRequest {
            display_name: args.name,
            age: args.age,
            weight_kg: args.weight,
            height_cm: args.height,
            fitness_goal: args.goal,
        }
    }
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn print_profile(profile: &UserProfile) {
    let goals = goal_evaluator::nutrition_goals(Some(profile));

    println!("{}", "Profile".bold());
    println!();
    println!("  Name:    {}", or_dash(profile.display_name.as_ref()));
    println!("  Age:     {}", or_dash(profile.age));
    println!("  Weight:  {} kg", or_dash(profile.weight_kg));
    println!("  Height:  {} cm", or_dash(profile.height_cm));
    println!("  Goal:    {}", or_dash(profile.fitness_goal));

    match (profile.bmi(), profile.bmi_category()) {
        (Some(bmi), Some(category)) => println!("  BMI:     {:.1} ({:?})", bmi, category),
        _ => println!("  BMI:     -"),
    }

    println!();
    println!("{}", "Daily targets".bold());
    println!("  Calories: {} kcal", goals.calories);
    println!("  Protein:  {} g", goals.protein);
    println!("  Carbs:    {} g", goals.carbs);
    println!("  Fat:      {} g", goals.fat);
}

pub async fn show_profile(ctx: &AppContext) -> Result<()> {
    let profile = ctx
        .records
        .get_profile(&ctx.owner_id)
        .await?
        .unwrap_or_else(|| UserProfile::new(&ctx.owner_id));

    print_profile(&profile);
    Ok(())
}

pub async fn set_profile(ctx: &AppContext, args: SetProfileArgs) -> Result<()> {
    let update = UpdateProfileRequest::from(args);
    if update.display_name.is_none()
        && update.age.is_none()
        && update.weight_kg.is_none()
        && update.height_cm.is_none()
        && update.fitness_goal.is_none()
    {
        bail!("nothing to update; pass at least one of --name, --age, --weight, --height, --goal");
    }

    let mut profile = ctx
        .records
        .get_profile(&ctx.owner_id)
        .await?
        .unwrap_or_else(|| UserProfile::new(&ctx.owner_id));

    profile.apply(update, Utc::now())?;
    ctx.records.put_profile(profile.clone()).await?;

    println!("{} Profile updated", "✓".green());
    println!();
    print_profile(&profile);
    Ok(())
}
