use serde::{Deserialize, Serialize};

use super::NutritionTotals;

/// Daily nutrition targets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionGoals {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

/// Progress of one metric against its goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroProgress {
    pub current: f64,
    pub goal: f64,
    /// current / goal, capped at 1.0
    pub ratio: f64,
    /// ratio as a percentage, capped at 100
    pub percent: f64,
    /// current / goal as a percentage without the cap
    pub uncapped_percent: f64,
}

impl MacroProgress {
    pub fn is_met(&self) -> bool {
        self.ratio >= 1.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalReport {
    pub goals: NutritionGoals,
    pub totals: NutritionTotals,
    pub calories: MacroProgress,
    pub protein: MacroProgress,
    pub carbs: MacroProgress,
    pub fat: MacroProgress,
}
