// Record types, derived analytics types and reminder state

pub mod analytics;
pub mod goals;
pub mod nutrition;
pub mod reminder;
pub mod user_profile;
pub mod workout;

pub use analytics::*;
pub use goals::*;
pub use nutrition::*;
pub use reminder::*;
pub use user_profile::*;
pub use workout::*;

use serde::{Deserialize, Serialize};

/// The two record kinds held by the record store
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Workout,
    Nutrition,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Workout => write!(f, "workout"),
            RecordKind::Nutrition => write!(f, "nutrition"),
        }
    }
}
