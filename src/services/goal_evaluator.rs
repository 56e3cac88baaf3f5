use crate::errors::{FitTrackError, Result};
use crate::models::{
    FitnessGoal, GoalReport, MacroProgress, NutritionGoals, NutritionTotals, UserProfile,
    WEIGHT_RANGE_KG,
};

pub const DEFAULT_WEIGHT_KG: f64 = 70.0;
pub const PROTEIN_GRAMS_PER_KG: f64 = 1.6;
pub const CARBS_GOAL_GRAMS: u32 = 250;
pub const FAT_GOAL_GRAMS: u32 = 70;

/// Daily calorie target for a fitness goal. Unset goals use the maintenance figure.
pub fn calorie_goal(goal: Option<FitnessGoal>) -> u32 {
    match goal {
        Some(FitnessGoal::WeightLoss) => 1800,
        Some(FitnessGoal::MuscleGain) => 2500,
        Some(FitnessGoal::Maintenance) | Some(FitnessGoal::Endurance) | None => 2200,
    }
}

/// Daily protein target in grams: 1.6 g per kg of body weight.
/// Stored weights outside the accepted range count as unknown.
pub fn protein_goal(weight_kg: Option<f64>) -> u32 {
    let weight = weight_kg
        .filter(|w| WEIGHT_RANGE_KG.contains(w))
        .unwrap_or(DEFAULT_WEIGHT_KG);
    (weight * PROTEIN_GRAMS_PER_KG).round() as u32
}

pub fn nutrition_goals(profile: Option<&UserProfile>) -> NutritionGoals {
    NutritionGoals {
        calories: calorie_goal(profile.and_then(|p| p.fitness_goal)),
        protein: protein_goal(profile.and_then(|p| p.weight_kg)),
        carbs: CARBS_GOAL_GRAMS,
        fat: FAT_GOAL_GRAMS,
    }
}

/// `min(current / goal, 1.0)`. A goal of zero or less has no meaningful ratio.
pub fn progress_ratio(current: f64, goal: f64) -> Result<f64> {
    if !goal.is_finite() || goal <= 0.0 {
        return Err(FitTrackError::invalid(format!(
            "goal must be positive, got {}",
            goal
        )));
    }
    if !current.is_finite() {
        return Err(FitTrackError::invalid(format!(
            "current value must be finite, got {}",
            current
        )));
    }

    Ok((current.max(0.0) / goal).min(1.0))
}

pub fn progress(current: f64, goal: f64) -> Result<MacroProgress> {
    let ratio = progress_ratio(current, goal)?;

    Ok(MacroProgress {
        current,
        goal,
        ratio,
        percent: ratio * 100.0,
        uncapped_percent: current.max(0.0) / goal * 100.0,
    })
}

/// Estimated workouts per week: `round(completed / window_days * 7)`
pub fn weekly_workout_frequency(completed_workouts: u64, window_days: i64) -> Result<u32> {
    if window_days <= 0 {
        return Err(FitTrackError::invalid(format!(
            "window size must be positive, got {}",
            window_days
        )));
    }

    Ok((completed_workouts as f64 / window_days as f64 * 7.0).round() as u32)
}

/// Compare a day's totals against the profile's targets
pub fn evaluate(profile: Option<&UserProfile>, totals: &NutritionTotals) -> Result<GoalReport> {
    let goals = nutrition_goals(profile);

    Ok(GoalReport {
        goals,
        totals: *totals,
        calories: progress(totals.calories as f64, f64::from(goals.calories))?,
        protein: progress(totals.protein, f64::from(goals.protein))?,
        carbs: progress(totals.carbs, f64::from(goals.carbs))?,
        fat: progress(totals.fat, f64::from(goals.fat))?,
    })
}
