use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{FitTrackError, Result};

/// Target repetitions for a set, either a count (`12`) or a timed hold (`"30s"`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepTarget {
    Count(u32),
    Duration(String),
}

impl Default for RepTarget {
    fn default() -> Self {
        RepTarget::Count(0)
    }
}

impl std::fmt::Display for RepTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepTarget::Count(n) => write!(f, "{}", n),
            RepTarget::Duration(d) => write!(f, "{}", d),
        }
    }
}

/// Single exercise entry inside a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sets: u32,
    #[serde(default)]
    pub reps: RepTarget,
}

impl Exercise {
    pub fn new(name: &str, category: &str, sets: u32, reps: RepTarget) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            sets,
            reps,
        }
    }
}

/// Workout document as held by the record store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: String,
    pub owner_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub scheduled_for: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Validated fields for a workout that has not been stored yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkout {
    pub name: String,
    pub exercises: Vec<Exercise>,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub duration_minutes: u32,
    pub created_at: DateTime<Utc>,
}

/// Completion update, the only mutation a stored workout accepts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkoutCompletion {
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl WorkoutCompletion {
    pub fn completed_at(at: DateTime<Utc>) -> Self {
        Self {
            completed: true,
            completed_at: Some(at),
        }
    }
}

/// Default length of a quick-logged session
pub const QUICK_LOG_MINUTES: u32 = 30;

/// Exercises attached to every quick-logged workout
pub fn quick_log_exercises() -> Vec<Exercise> {
    vec![
        Exercise::new("Push-ups", "Chest", 3, RepTarget::Count(12)),
        Exercise::new("Squats", "Legs", 3, RepTarget::Count(15)),
        Exercise::new("Plank", "Core", 3, RepTarget::Duration("30s".to_string())),
    ]
}

impl NewWorkout {
    /// Plan a workout for later. Requires a name and at least one exercise.
    pub fn planned(
        name: &str,
        exercises: Vec<Exercise>,
        scheduled_for: Option<DateTime<Utc>>,
        duration_minutes: u32,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let name = validate_name(name)?;
        if exercises.is_empty() {
            return Err(FitTrackError::invalid("workout needs at least one exercise"));
        }

        Ok(Self {
            name,
            exercises,
            scheduled_for: Some(scheduled_for.unwrap_or(now)),
            completed: false,
            completed_at: None,
            duration_minutes,
            created_at: now,
        })
    }

    /// Log a workout that was just finished
    pub fn quick_log(name: &str, duration_minutes: u32, now: DateTime<Utc>) -> Result<Self> {
        let name = validate_name(name)?;

        Ok(Self {
            name,
            exercises: quick_log_exercises(),
            scheduled_for: None,
            completed: true,
            completed_at: Some(now),
            duration_minutes,
            created_at: now,
        })
    }
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(FitTrackError::invalid("workout name must not be empty"));
    }
    Ok(trimmed.to_string())
}

impl WorkoutRecord {
    pub fn from_new(id: String, owner_id: &str, new: NewWorkout) -> Self {
        Self {
            id,
            owner_id: owner_id.to_string(),
            name: new.name,
            exercises: new.exercises,
            scheduled_for: new.scheduled_for,
            completed: new.completed,
            completed_at: new.completed_at,
            duration_minutes: new.duration_minutes,
            created_at: Some(new.created_at),
        }
    }

    pub fn apply_completion(&mut self, completion: WorkoutCompletion) {
        self.completed = completion.completed;
        self.completed_at = completion.completed_at;
    }

    /// Calendar day the workout was completed on, read in `tz`.
    ///
    /// `None` for workouts that are not completed or lack a completion timestamp.
    pub fn completion_day<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        if !self.completed {
            return None;
        }
        self.completed_at
            .map(|at| at.with_timezone(tz).date_naive())
    }

    /// A completed workout without a completion timestamp cannot be bucketed
    pub fn check_completion(&self) -> Result<()> {
        if self.completed && self.completed_at.is_none() {
            return Err(FitTrackError::malformed(
                &self.id,
                "completed workout has no completion time",
            ));
        }
        Ok(())
    }
}
