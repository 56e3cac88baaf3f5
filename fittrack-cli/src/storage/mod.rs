// Local storage: one JSON document per collection under the data directory

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use uuid::Uuid;

use fittrack::errors::{FitTrackError, Result};
use fittrack::models::{
    DismissalRecord, NewNutritionEntry, NewWorkout, NutritionRecord, RecordKind, UserProfile,
    WorkoutCompletion, WorkoutRecord,
};
use fittrack::store::{DismissalStore, RecordStore};

const WORKOUTS_FILE: &str = "workouts.json";
const NUTRITION_FILE: &str = "nutrition.json";
const PROFILES_FILE: &str = "profiles.json";
const DISMISSALS_FILE: &str = "dismissals.json";

/// File-backed record and dismissal store
pub struct JsonFileStore {
    dir: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

fn unavailable(path: &Path, err: impl std::fmt::Display) -> FitTrackError {
    FitTrackError::StoreUnavailable(format!("{}: {}", path.display(), err))
}

impl JsonFileStore {
    /// Open (and create if needed) the store directory
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| unavailable(&dir, e))?;

        tracing::debug!("Opened record store at {:?}", dir);
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    async fn read<T>(&self, file: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let path = self.dir.join(file);
        match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| unavailable(&path, e)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
            Err(e) => Err(unavailable(&path, e)),
        }
    }

    /// Write through a temporary file so readers never see a partial document
    async fn write<T: Serialize>(&self, file: &str, value: &T) -> Result<()> {
        let path = self.dir.join(file);
        let tmp = self.dir.join(format!("{}.tmp", file));

        let bytes = serde_json::to_vec_pretty(value).map_err(|e| unavailable(&path, e))?;
        fs::write(&tmp, bytes).await.map_err(|e| unavailable(&tmp, e))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| unavailable(&path, e))?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn list_workouts(&self, owner_id: &str) -> Result<Vec<WorkoutRecord>> {
        let workouts: Vec<WorkoutRecord> = self.read(WORKOUTS_FILE).await?;
        Ok(workouts
            .into_iter()
            .filter(|w| w.owner_id == owner_id)
            .collect())
    }

    async fn list_nutrition(&self, owner_id: &str) -> Result<Vec<NutritionRecord>> {
        let nutrition: Vec<NutritionRecord> = self.read(NUTRITION_FILE).await?;
        Ok(nutrition
            .into_iter()
            .filter(|n| n.owner_id == owner_id)
            .collect())
    }

    async fn create_workout(&self, owner_id: &str, workout: NewWorkout) -> Result<String> {
        let _guard = self.write_lock.lock().await;
        let mut workouts: Vec<WorkoutRecord> = self.read(WORKOUTS_FILE).await?;

        let id = Uuid::new_v4().to_string();
        workouts.push(WorkoutRecord::from_new(id.clone(), owner_id, workout));
        self.write(WORKOUTS_FILE, &workouts).await?;

        tracing::debug!("Saved workout {}", id);
        Ok(id)
    }

    async fn create_nutrition(&self, owner_id: &str, entry: NewNutritionEntry) -> Result<String> {
        let _guard = self.write_lock.lock().await;
        let mut nutrition: Vec<NutritionRecord> = self.read(NUTRITION_FILE).await?;

        let id = Uuid::new_v4().to_string();
        nutrition.push(NutritionRecord::from_new(id.clone(), owner_id, entry));
        self.write(NUTRITION_FILE, &nutrition).await?;

        tracing::debug!("Saved nutrition entry {}", id);
        Ok(id)
    }

    async fn update_workout(
        &self,
        owner_id: &str,
        id: &str,
        completion: WorkoutCompletion,
    ) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut workouts: Vec<WorkoutRecord> = self.read(WORKOUTS_FILE).await?;

        workouts
            .iter_mut()
            .find(|w| w.id == id && w.owner_id == owner_id)
            .ok_or_else(|| FitTrackError::NotFound(format!("workout {}", id)))?
            .apply_completion(completion);

        self.write(WORKOUTS_FILE, &workouts).await
    }

    async fn delete(&self, owner_id: &str, kind: RecordKind, id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let removed = match kind {
            RecordKind::Workout => {
                let mut workouts: Vec<WorkoutRecord> = self.read(WORKOUTS_FILE).await?;
                let before = workouts.len();
                workouts.retain(|w| !(w.id == id && w.owner_id == owner_id));
                let removed = workouts.len() != before;
                if removed {
                    self.write(WORKOUTS_FILE, &workouts).await?;
                }
                removed
            }
            RecordKind::Nutrition => {
                let mut nutrition: Vec<NutritionRecord> = self.read(NUTRITION_FILE).await?;
                let before = nutrition.len();
                nutrition.retain(|n| !(n.id == id && n.owner_id == owner_id));
                let removed = nutrition.len() != before;
                if removed {
                    self.write(NUTRITION_FILE, &nutrition).await?;
                }
                removed
            }
        };

        if !removed {
            return Err(FitTrackError::NotFound(format!("{} {}", kind, id)));
        }

        tracing::debug!("Deleted {} {}", kind, id);
        Ok(())
    }

    async fn get_profile(&self, owner_id: &str) -> Result<Option<UserProfile>> {
        let mut profiles: HashMap<String, UserProfile> = self.read(PROFILES_FILE).await?;
        Ok(profiles.remove(owner_id))
    }

    async fn put_profile(&self, profile: UserProfile) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut profiles: HashMap<String, UserProfile> = self.read(PROFILES_FILE).await?;

        profiles.insert(profile.owner_id.clone(), profile);
        self.write(PROFILES_FILE, &profiles).await
    }
}

#[async_trait]
impl DismissalStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<DismissalRecord> {
        let mut blobs: HashMap<String, DismissalRecord> = self.read(DISMISSALS_FILE).await?;
        Ok(blobs.remove(key).unwrap_or_default())
    }

    async fn set(&self, key: &str, record: DismissalRecord) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut blobs: HashMap<String, DismissalRecord> = self.read(DISMISSALS_FILE).await?;

        blobs.insert(key.to_string(), record);
        self.write(DISMISSALS_FILE, &blobs).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 3, 9, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let id = {
            let store = JsonFileStore::open(dir.path()).await.unwrap();
            store
                .create_workout("me", NewWorkout::quick_log("Row", 20, now()).unwrap())
                .await
                .unwrap()
        };

        let store = JsonFileStore::open(dir.path()).await.unwrap();
        let workouts = store.list_workouts("me").await.unwrap();
        assert_eq!(workouts.len(), 1);
        assert_eq!(workouts[0].id, id);
        assert!(store.list_workouts("someone").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_meal_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();

        store
            .create_nutrition(
                "me",
                NewNutritionEntry::quick_meal("Oats", 350, 1.0, date, now()).unwrap(),
            )
            .await
            .unwrap();

        let result = store.delete("me", RecordKind::Nutrition, "nope").await;
        assert!(matches!(result, Err(FitTrackError::NotFound(_))));
        assert_eq!(store.list_nutrition("me").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_file_reports_store_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(WORKOUTS_FILE), "{ not json").unwrap();

        let store = JsonFileStore::open(dir.path()).await.unwrap();
        let result = store.list_workouts("me").await;
        assert!(matches!(result, Err(FitTrackError::StoreUnavailable(_))));
    }

    #[tokio::test]
    async fn test_legacy_records_without_dates_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(NUTRITION_FILE),
            r#"[{"id": "old", "owner_id": "me", "food_name": "Soup", "serving": "1 bowl", "calories": 200}]"#,
        )
        .unwrap();

        let store = JsonFileStore::open(dir.path()).await.unwrap();
        let meals = store.list_nutrition("me").await.unwrap();
        assert_eq!(meals[0].date, None);
        assert_eq!(meals[0].quantity, 1.0);
    }

    #[tokio::test]
    async fn test_records_missing_optional_fields_do_not_hide_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(NUTRITION_FILE),
            r#"[{"id": "n1", "owner_id": "me", "date": "2024-01-03", "calories": 150},
                {"id": "n2", "owner_id": "me", "date": "2024-01-03", "food_name": "Toast", "calories": 90}]"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join(WORKOUTS_FILE),
            r#"[{"id": "w1", "owner_id": "me", "name": "Rows", "exercises": [{"name": "Row", "sets": 3}]}]"#,
        )
        .unwrap();

        let store = JsonFileStore::open(dir.path()).await.unwrap();
        let meals = store.list_nutrition("me").await.unwrap();
        assert_eq!(meals.len(), 2);
        assert_eq!(meals[0].food_name, "");
        assert_eq!(meals[1].food_name, "Toast");

        let workouts = store.list_workouts("me").await.unwrap();
        assert_eq!(workouts[0].exercises[0].sets, 3);
    }

    #[tokio::test]
    async fn test_dismissals_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();

        let mut record = DismissalRecord::new();
        record.insert("2024-01-03", "lunch-nutrition");
        DismissalStore::set(&store, "dismissed_reminders/me", record.clone())
            .await
            .unwrap();

        let loaded = DismissalStore::get(&store, "dismissed_reminders/me")
            .await
            .unwrap();
        assert_eq!(loaded, record);
    }
}
