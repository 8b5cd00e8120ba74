// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily activity log and emission record models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the user travelled.
///
/// Wire values are the picker labels used by the app. Anything else is kept
/// verbatim in `Other` so the calculator can fall back and log it instead of
/// rejecting the whole entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransportMode {
    Walk,
    Bike,
    Car,
    Metro,
    Other(String),
}

impl TransportMode {
    pub fn as_str(&self) -> &str {
        match self {
            TransportMode::Walk => "Walk",
            TransportMode::Bike => "Bike",
            TransportMode::Car => "Car",
            TransportMode::Metro => "Metro",
            TransportMode::Other(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, TransportMode::Other(_))
    }
}

impl From<String> for TransportMode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Walk" => TransportMode::Walk,
            "Bike" => TransportMode::Bike,
            "Car" => TransportMode::Car,
            "Metro" => TransportMode::Metro,
            _ => TransportMode::Other(value),
        }
    }
}

impl From<&str> for TransportMode {
    fn from(value: &str) -> Self {
        TransportMode::from(value.to_string())
    }
}

impl From<TransportMode> for String {
    fn from(mode: TransportMode) -> Self {
        match mode {
            TransportMode::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dominant diet for the day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MealType {
    Vegetarian,
    NonVegetarian,
    Vegan,
    Other(String),
}

impl MealType {
    pub fn as_str(&self) -> &str {
        match self {
            MealType::Vegetarian => "Vegetarian",
            MealType::NonVegetarian => "Non-Vegetarian",
            MealType::Vegan => "Vegan",
            MealType::Other(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, MealType::Other(_))
    }
}

impl From<String> for MealType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Vegetarian" => MealType::Vegetarian,
            "Non-Vegetarian" => MealType::NonVegetarian,
            "Vegan" => MealType::Vegan,
            _ => MealType::Other(value),
        }
    }
}

impl From<&str> for MealType {
    fn from(value: &str) -> Self {
        MealType::from(value.to_string())
    }
}

impl From<MealType> for String {
    fn from(meal: MealType) -> Self {
        match meal {
            MealType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One day's logged activity, as entered by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLog {
    /// When the entry was recorded (set by the server)
    pub timestamp: DateTime<Utc>,
    pub transport_mode: TransportMode,
    /// Distance travelled (km)
    pub distance_km: f64,
    pub meal_type: MealType,
    /// Electricity used (kWh)
    pub electricity_usage_kwh: f64,
    /// Plastic thrown away (kg)
    pub plastic_used_kg: f64,
}

/// Per-term contributions of an estimate, in kg CO₂e.
///
/// Terms are rounded for display. `total_kg` is rounded from the unrounded
/// sum, so it can differ from the sum of the displayed terms by a cent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(ts_rs::TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EmissionBreakdown {
    pub transport_kg: f64,
    pub diet_kg: f64,
    pub electricity_kg: f64,
    pub waste_kg: f64,
    pub total_kg: f64,
}

/// Stored activity entry: the log plus its computed emission.
///
/// Stored at: `users/{user_id}/daily_activities` (append-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionRecord {
    #[serde(flatten)]
    pub activity: ActivityLog,
    /// Total emission rounded to 2 decimals
    pub emission_kg_co2: f64,
    pub breakdown: EmissionBreakdown,
}
