//! Seams to the external record store and the dismissal blob store.
//!
//! Every call may fail with `FitTrackError::StoreUnavailable`. Nothing in this
//! crate retries; callers that want retries wrap the store themselves.

mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{
    DismissalRecord, NewNutritionEntry, NewWorkout, NutritionRecord, RecordKind, UserProfile,
    WorkoutCompletion, WorkoutRecord,
};

/// Owner-scoped document store for workouts, meals and profiles
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_workouts(&self, owner_id: &str) -> Result<Vec<WorkoutRecord>>;

    async fn list_nutrition(&self, owner_id: &str) -> Result<Vec<NutritionRecord>>;

    /// Store a new workout and return its identifier
    async fn create_workout(&self, owner_id: &str, workout: NewWorkout) -> Result<String>;

    /// Store a new meal entry and return its identifier
    async fn create_nutrition(&self, owner_id: &str, entry: NewNutritionEntry) -> Result<String>;

    async fn update_workout(
        &self,
        owner_id: &str,
        id: &str,
        completion: WorkoutCompletion,
    ) -> Result<()>;

    async fn delete(&self, owner_id: &str, kind: RecordKind, id: &str) -> Result<()>;

    async fn get_profile(&self, owner_id: &str) -> Result<Option<UserProfile>>;

    async fn put_profile(&self, profile: UserProfile) -> Result<()>;
}

/// Key-value store holding one dismissal blob per key
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DismissalStore: Send + Sync {
    /// Missing keys read as an empty record
    async fn get(&self, key: &str) -> Result<DismissalRecord>;

    async fn set(&self, key: &str, record: DismissalRecord) -> Result<()>;
}

/// Blob key under which an owner's dismissals are kept
pub fn dismissal_key(owner_id: &str) -> String {
    format!("dismissed_reminders/{}", owner_id)
}
