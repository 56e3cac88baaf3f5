use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::errors::{FitTrackError, Result};

/// Body weights a profile may record
pub const WEIGHT_RANGE_KG: RangeInclusive<f64> = 20.0..=400.0;
/// Heights a profile may record
pub const HEIGHT_RANGE_CM: RangeInclusive<f64> = 50.0..=275.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    WeightLoss,
    MuscleGain,
    Maintenance,
    Endurance,
}

impl std::fmt::Display for FitnessGoal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitnessGoal::WeightLoss => write!(f, "weight_loss"),
            FitnessGoal::MuscleGain => write!(f, "muscle_gain"),
            FitnessGoal::Maintenance => write!(f, "maintenance"),
            FitnessGoal::Endurance => write!(f, "endurance"),
        }
    }
}

impl std::str::FromStr for FitnessGoal {
    type Err = FitTrackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "weight_loss" => Ok(FitnessGoal::WeightLoss),
            "muscle_gain" => Ok(FitnessGoal::MuscleGain),
            "maintenance" => Ok(FitnessGoal::Maintenance),
            "endurance" => Ok(FitnessGoal::Endurance),
            _ => Err(FitTrackError::invalid(format!("Invalid fitness goal: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}

/// Per-user profile driving nutrition targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub owner_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default, alias = "weight")]
    pub weight_kg: Option<f64>,
    #[serde(default, alias = "height")]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub fitness_goal: Option<FitnessGoal>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial profile edit; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub age: Option<u32>,
    #[serde(alias = "weight")]
    pub weight_kg: Option<f64>,
    #[serde(alias = "height")]
    pub height_cm: Option<f64>,
    pub fitness_goal: Option<FitnessGoal>,
}

impl UserProfile {
    pub fn new(owner_id: &str) -> Self {
        Self {
            owner_id: owner_id.to_string(),
            display_name: None,
            age: None,
            weight_kg: None,
            height_cm: None,
            fitness_goal: None,
            updated_at: None,
        }
    }

    /// Apply a profile edit
    pub fn apply(&mut self, update: UpdateProfileRequest, now: DateTime<Utc>) -> Result<()> {
        let checks = [
            ("weight", "kg", update.weight_kg, WEIGHT_RANGE_KG),
            ("height", "cm", update.height_cm, HEIGHT_RANGE_CM),
        ];
        for (field, unit, value, range) in checks {
            if let Some(v) = value {
                if !range.contains(&v) {
                    return Err(FitTrackError::invalid(format!(
                        "{} must be between {} and {} {}, got {}",
                        field,
                        range.start(),
                        range.end(),
                        unit,
                        v
                    )));
                }
            }
        }

        if let Some(name) = update.display_name {
            self.display_name = Some(name);
        }
        if let Some(age) = update.age {
            self.age = Some(age);
        }
        if let Some(weight) = update.weight_kg {
            self.weight_kg = Some(weight);
        }
        if let Some(height) = update.height_cm {
            self.height_cm = Some(height);
        }
        if let Some(goal) = update.fitness_goal {
            self.fitness_goal = Some(goal);
        }
        self.updated_at = Some(now);

        Ok(())
    }

    /// Body mass index, when both weight and height are known
    pub fn bmi(&self) -> Option<f64> {
        match (self.weight_kg, self.height_cm) {
            (Some(weight), Some(height)) if weight > 0.0 && height > 0.0 => {
                let meters = height / 100.0;
                Some(weight / (meters * meters))
            }
            _ => None,
        }
    }

    pub fn bmi_category(&self) -> Option<BmiCategory> {
        self.bmi().map(BmiCategory::from_bmi)
    }
}
