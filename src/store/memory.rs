use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DismissalStore, RecordStore};
use crate::errors::{FitTrackError, Result};
use crate::models::{
    DismissalRecord, NewNutritionEntry, NewWorkout, NutritionRecord, RecordKind, UserProfile,
    WorkoutCompletion, WorkoutRecord,
};

#[derive(Default)]
struct State {
    workouts: Vec<WorkoutRecord>,
    nutrition: Vec<NutritionRecord>,
    profiles: HashMap<String, UserProfile>,
    dismissals: HashMap<String, DismissalRecord>,
}

/// Process-local store used by the server binary and tests
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert records as-is, e.g. legacy documents with missing fields
    pub async fn seed(&self, workouts: Vec<WorkoutRecord>, nutrition: Vec<NutritionRecord>) {
        let mut state = self.state.write().await;
        state.workouts.extend(workouts);
        state.nutrition.extend(nutrition);
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn list_workouts(&self, owner_id: &str) -> Result<Vec<WorkoutRecord>> {
        let state = self.state.read().await;
        Ok(state
            .workouts
            .iter()
            .filter(|w| w.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn list_nutrition(&self, owner_id: &str) -> Result<Vec<NutritionRecord>> {
        let state = self.state.read().await;
        Ok(state
            .nutrition
            .iter()
            .filter(|n| n.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn create_workout(&self, owner_id: &str, workout: NewWorkout) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let record = WorkoutRecord::from_new(id.clone(), owner_id, workout);
        self.state.write().await.workouts.push(record);

        tracing::debug!("Created workout {} for {}", id, owner_id);
        Ok(id)
    }

    async fn create_nutrition(&self, owner_id: &str, entry: NewNutritionEntry) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let record = NutritionRecord::from_new(id.clone(), owner_id, entry);
        self.state.write().await.nutrition.push(record);

        tracing::debug!("Created nutrition entry {} for {}", id, owner_id);
        Ok(id)
    }

    async fn update_workout(
        &self,
        owner_id: &str,
        id: &str,
        completion: WorkoutCompletion,
    ) -> Result<()> {
        let mut state = self.state.write().await;
        let workout = state
            .workouts
            .iter_mut()
            .find(|w| w.id == id && w.owner_id == owner_id)
            .ok_or_else(|| FitTrackError::NotFound(format!("workout {}", id)))?;

        workout.apply_completion(completion);
        Ok(())
    }

    async fn delete(&self, owner_id: &str, kind: RecordKind, id: &str) -> Result<()> {
        let mut state = self.state.write().await;
        let removed = match kind {
            RecordKind::Workout => {
                let before = state.workouts.len();
                state.workouts.retain(|w| !(w.id == id && w.owner_id == owner_id));
                before != state.workouts.len()
            }
            RecordKind::Nutrition => {
                let before = state.nutrition.len();
                state.nutrition.retain(|n| !(n.id == id && n.owner_id == owner_id));
                before != state.nutrition.len()
            }
        };

        if !removed {
            return Err(FitTrackError::NotFound(format!("{} {}", kind, id)));
        }

        tracing::debug!("Deleted {} {}", kind, id);
        Ok(())
    }

    async fn get_profile(&self, owner_id: &str) -> Result<Option<UserProfile>> {
        Ok(self.state.read().await.profiles.get(owner_id).cloned())
    }

    async fn put_profile(&self, profile: UserProfile) -> Result<()> {
        self.state
            .write()
            .await
            .profiles
            .insert(profile.owner_id.clone(), profile);
        Ok(())
    }
}

#[async_trait]
impl DismissalStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<DismissalRecord> {
        Ok(self
            .state
            .read()
            .await
            .dismissals
            .get(key)
            .cloned()
            .unwrap_or_default())
    }

    async fn set(&self, key: &str, record: DismissalRecord) -> Result<()> {
        self.state
            .write()
            .await
            .dismissals
            .insert(key.to_string(), record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn test_records_are_owner_scoped() {
        let store = InMemoryStore::new();
        let now = Utc.with_ymd_and_hms(2024, 1, 3, 9, 0, 0).unwrap();

        let id = store
            .create_workout("alice", NewWorkout::quick_log("Run", 30, now).unwrap())
            .await
            .unwrap();
        store
            .create_workout("bob", NewWorkout::quick_log("Swim", 45, now).unwrap())
            .await
            .unwrap();

        let alice = store.list_workouts("alice").await.unwrap();
        assert_eq!(alice.len(), 1);
        assert_eq!(alice[0].id, id);

        let result = store.delete("bob", RecordKind::Workout, &id).await;
        assert!(matches!(result, Err(FitTrackError::NotFound(_))));

        store.delete("alice", RecordKind::Workout, &id).await.unwrap();
        assert!(store.list_workouts("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_workout_sets_completion() {
        let store = InMemoryStore::new();
        let now = Utc.with_ymd_and_hms(2024, 1, 3, 9, 0, 0).unwrap();
        let planned = NewWorkout::planned(
            "Push day",
            crate::models::quick_log_exercises(),
            None,
            40,
            now,
        )
        .unwrap();

        let id = store.create_workout("alice", planned).await.unwrap();
        store
            .update_workout("alice", &id, WorkoutCompletion::completed_at(now))
            .await
            .unwrap();

        let workouts = store.list_workouts("alice").await.unwrap();
        assert!(workouts[0].completed);
        assert_eq!(workouts[0].completed_at, Some(now));
    }

    #[tokio::test]
    async fn test_missing_dismissal_key_reads_empty() {
        let store = InMemoryStore::new();
        let record = DismissalStore::get(&store, "nobody").await.unwrap();
        assert!(record.is_empty());
    }
}
