use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{FitTrackError, Result};

/// Meal log entry as held by the record store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionRecord {
    pub id: String,
    pub owner_id: String,
    /// Older documents may lack a date; those are skipped by aggregation
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub food_name: String,
    #[serde(default)]
    pub serving: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default)]
    pub calories: u32,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

pub(crate) fn default_quantity() -> f64 {
    1.0
}

/// Reference food item, supplied by the caller's food library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub serving: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Validated fields for a meal that has not been stored yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNutritionEntry {
    pub date: NaiveDate,
    pub food_name: String,
    pub serving: String,
    pub quantity: f64,
    pub calories: u32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub created_at: DateTime<Utc>,
}

/// Summed calories and macros
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub calories: u64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl NutritionTotals {
    pub fn add(&mut self, record: &NutritionRecord) {
        self.calories += u64::from(record.calories);
        self.protein += non_negative(record.protein);
        self.carbs += non_negative(record.carbs);
        self.fat += non_negative(record.fat);
    }
}

/// Negative or NaN gram values count as zero
pub(crate) fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn validate_quantity(quantity: f64) -> Result<()> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(FitTrackError::invalid(format!(
            "quantity must be positive, got {}",
            quantity
        )));
    }
    Ok(())
}

fn validate_food_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(FitTrackError::invalid("food name must not be empty"));
    }
    Ok(trimmed.to_string())
}

impl NewNutritionEntry {
    /// Scale a library food by `quantity`: calories rounded to whole kcal, macros to 0.1 g
    pub fn from_food(
        food: &FoodItem,
        quantity: f64,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        validate_quantity(quantity)?;
        let food_name = validate_food_name(&food.name)?;

        Ok(Self {
            date,
            food_name,
            serving: food.serving.clone(),
            quantity,
            calories: (non_negative(food.calories) * quantity).round() as u32,
            protein: round_tenth(non_negative(food.protein) * quantity),
            carbs: round_tenth(non_negative(food.carbs) * quantity),
            fat: round_tenth(non_negative(food.fat) * quantity),
            created_at: now,
        })
    }

    /// Quick meal with only a calorie figure. Macros are estimated from a
    /// 15/50/35 protein/carbs/fat energy split.
    pub fn quick_meal(
        food_name: &str,
        calories: u32,
        quantity: f64,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        validate_quantity(quantity)?;
        let food_name = validate_food_name(food_name)?;
        if calories == 0 {
            return Err(FitTrackError::invalid("quick meal needs a calorie value"));
        }

        let total = f64::from(calories) * quantity;

        Ok(Self {
            date,
            food_name,
            serving: "1 serving".to_string(),
            quantity,
            calories: total.round() as u32,
            protein: (total * 0.15 / 4.0).round(),
            carbs: (total * 0.5 / 4.0).round(),
            fat: (total * 0.35 / 9.0).round(),
            created_at: now,
        })
    }
}

impl NutritionRecord {
    /// Day the meal is bucketed under
    pub fn bucket_date(&self) -> Result<NaiveDate> {
        self.date
            .ok_or_else(|| FitTrackError::malformed(&self.id, "nutrition record has no date"))
    }

    pub fn from_new(id: String, owner_id: &str, new: NewNutritionEntry) -> Self {
        Self {
            id,
            owner_id: owner_id.to_string(),
            date: Some(new.date),
            food_name: new.food_name,
            serving: new.serving,
            quantity: new.quantity,
            calories: new.calories,
            protein: new.protein,
            carbs: new.carbs,
            fat: new.fat,
            created_at: Some(new.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
    }

    #[test]
    fn test_from_food_scales_and_rounds() {
        let chicken = FoodItem {
            name: "Chicken Breast".to_string(),
            serving: "100g".to_string(),
            calories: 165.0,
            protein: 31.0,
            carbs: 0.0,
            fat: 3.6,
        };

        let entry = NewNutritionEntry::from_food(&chicken, 1.5, day(), now()).unwrap();
        assert_eq!(entry.calories, 248);
        assert_eq!(entry.protein, 46.5);
        assert_eq!(entry.fat, 5.4);
        assert_eq!(entry.serving, "100g");
    }

    #[test]
    fn test_undated_record_is_malformed() {
        let entry = NewNutritionEntry::quick_meal("Soup", 300, 1.0, day(), now()).unwrap();
        let mut record = NutritionRecord::from_new("n1".to_string(), "owner", entry);
        assert_eq!(record.bucket_date(), Ok(day()));

        record.date = None;
        assert_eq!(
            record.bucket_date(),
            Err(FitTrackError::MalformedRecord {
                id: "n1".to_string(),
                reason: "nutrition record has no date".to_string(),
            })
        );
    }

    #[test]
    fn test_quick_meal_estimates_macros() {
        let entry = NewNutritionEntry::quick_meal("Sandwich", 400, 2.0, day(), now()).unwrap();

        assert_eq!(entry.calories, 800);
        assert_eq!(entry.protein, 30.0);
        assert_eq!(entry.carbs, 100.0);
        assert_eq!(entry.fat, 31.0);
    }

    #[test]
    fn test_quantity_must_be_positive() {
        let result = NewNutritionEntry::quick_meal("Sandwich", 400, 0.0, day(), now());
        assert!(matches!(result, Err(FitTrackError::InvalidArgument(_))));

        let result = NewNutritionEntry::quick_meal("Sandwich", 400, f64::NAN, day(), now());
        assert!(matches!(result, Err(FitTrackError::InvalidArgument(_))));
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let record: NutritionRecord = serde_json::from_str(
            r#"{"id":"n1","owner_id":"u1","food_name":"Apple","calories":95}"#,
        )
        .unwrap();

        assert_eq!(record.date, None);
        assert_eq!(record.protein, 0.0);
        assert_eq!(record.quantity, 1.0);

        let mut totals = NutritionTotals::default();
        totals.add(&record);
        assert_eq!(totals.calories, 95);
        assert_eq!(totals.fat, 0.0);
    }
}
