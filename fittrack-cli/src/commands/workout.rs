use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime, Utc};
use colored::Colorize;

use fittrack::models::{NewWorkout, RecordKind, WorkoutCompletion, WorkoutRecord};
use fittrack::services::aggregation_service;
use fittrack::store::RecordStore;

use super::{confirm, parse_exercise, AppContext};

pub async fn create_workout(
    ctx: &AppContext,
    name: &str,
    exercise_specs: &[String],
    duration: u32,
    date: Option<NaiveDate>,
) -> Result<()> {
    let exercises = exercise_specs
        .iter()
        .map(|spec| parse_exercise(spec))
        .collect::<Result<Vec<_>>>()?;

    let scheduled_for = match date {
        Some(day) => Some(
            day.and_time(NaiveTime::MIN)
                .and_local_timezone(ctx.analytics.zone())
                .single()
                .context("Scheduled date has no single local midnight")?
                .with_timezone(&Utc),
        ),
        None => None,
    };

    let workout = NewWorkout::planned(name, exercises, scheduled_for, duration, Utc::now())?;
    let count = workout.exercises.len();
    let id = ctx.records.create_workout(&ctx.owner_id, workout).await?;

    println!("{} Planned {} ({} exercises)", "✓".green(), name.bold(), count);
    println!("  id: {}", id);
    Ok(())
}

pub async fn quick_log(ctx: &AppContext, name: &str, duration: u32) -> Result<()> {
    let workout = NewWorkout::quick_log(name, duration, Utc::now())?;
    let id = ctx.records.create_workout(&ctx.owner_id, workout).await?;

    println!("{} Logged {} ({} min)", "✓".green(), name.bold(), duration);
    println!("  id: {}", id);
    Ok(())
}

fn describe(ctx: &AppContext, workout: &WorkoutRecord) -> String {
    let when = workout
        .completed_at
        .or(workout.scheduled_for)
        .or(workout.created_at)
        .map(|at| ctx.format_date(at))
        .unwrap_or_else(|| "-".to_string());

    let status = if workout.completed {
        format!("{:<7}", "done").green()
    } else {
        format!("{:<7}", "planned").yellow()
    };

    format!(
        "{}  {:<10}  {:<24}  {}  {:>4} min  {} exercises",
        workout.id.dimmed(),
        when,
        workout.name,
        status,
        workout.duration_minutes,
        workout.exercises.len()
    )
}

pub async fn list_workouts(ctx: &AppContext, pending_only: bool, limit: usize) -> Result<()> {
    let mut workouts = ctx.records.list_workouts(&ctx.owner_id).await?;
    aggregation_service::newest_first(&mut workouts);

    let shown: Vec<&WorkoutRecord> = workouts
        .iter()
        .filter(|w| !pending_only || !w.completed)
        .take(limit)
        .collect();

    println!("{}", "Workouts".bold());
    println!();

    if shown.is_empty() {
        println!("No workouts yet. Try: fittrack workout quick \"Morning run\"");
        return Ok(());
    }

    for workout in shown {
        println!("{}", describe(ctx, workout));
    }

    Ok(())
}

pub async fn complete_workout(ctx: &AppContext, id: &str) -> Result<()> {
    ctx.records
        .update_workout(&ctx.owner_id, id, WorkoutCompletion::completed_at(Utc::now()))
        .await?;

    println!("{} Workout {} completed", "✓".green(), id);
    Ok(())
}

pub async fn delete_workout(ctx: &AppContext, id: &str, force: bool) -> Result<()> {
    if !confirm(&format!("Delete workout {}?", id), force)? {
        println!("Cancelled");
        return Ok(());
    }

    ctx.records
        .delete(&ctx.owner_id, RecordKind::Workout, id)
        .await?;

    println!("{} Workout {} deleted", "✓".green(), id);
    Ok(())
}
