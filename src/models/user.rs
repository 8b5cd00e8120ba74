//! User profile model for storage and API.

use serde::{Deserialize, Serialize};

use crate::models::{MealType, TransportMode};

/// User profile document.
///
/// Stored at: `users/{user_id}/user_profile` (single document, overwritten)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name
    pub name: String,
    pub age: u32,
    /// Usual diet
    pub diet: MealType,
    /// Usual commute mode
    pub commute: TransportMode,
    /// Last update timestamp (ISO 8601)
    pub updated_at: String,
}
