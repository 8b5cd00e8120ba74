// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Material (waste) log model and the history filter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::services::emission::{check_quantity, InvalidInput};

/// Waste material category.
///
/// The six named variants are the categories the emission predictor knows.
/// Any other name is kept verbatim; matching on it is exact and
/// case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Material {
    Plastic,
    Glass,
    Metal,
    Textile,
    Steel,
    Chemical,
    Other(String),
}

impl Material {
    pub fn as_str(&self) -> &str {
        match self {
            Material::Plastic => "Plastic",
            Material::Glass => "Glass",
            Material::Metal => "Metal",
            Material::Textile => "Textile",
            Material::Steel => "Steel",
            Material::Chemical => "Chemical",
            Material::Other(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Material::Other(_))
    }
}

impl From<String> for Material {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Plastic" => Material::Plastic,
            "Glass" => Material::Glass,
            "Metal" => Material::Metal,
            "Textile" => Material::Textile,
            "Steel" => Material::Steel,
            "Chemical" => Material::Chemical,
            _ => Material::Other(value),
        }
    }
}

impl From<&str> for Material {
    fn from(value: &str) -> Self {
        Material::from(value.to_string())
    }
}

impl From<Material> for String {
    fn from(material: Material) -> Self {
        match material {
            Material::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a material log's emission value came from.
///
/// Provenance only: aggregation treats both the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmissionSource {
    /// Entered by the user
    Manual,
    /// Returned by the remote predictor
    Predicted,
}

/// Stored material log entry.
///
/// Stored at: `users/{user_id}/logs` (append-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLog {
    pub id: String,
    pub material: Material,
    pub amount_kg: f64,
    pub emission_kg_co2: f64,
    pub source: EmissionSource,
    pub recorded_at: DateTime<Utc>,
}

impl MaterialLog {
    /// Build a new entry, rejecting negative or non-finite quantities.
    pub fn new(
        material: Material,
        amount_kg: f64,
        emission_kg_co2: f64,
        source: EmissionSource,
        recorded_at: DateTime<Utc>,
    ) -> Result<Self, InvalidInput> {
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            material,
            amount_kg: check_quantity("amount_kg", amount_kg)?,
            emission_kg_co2: check_quantity("emission_kg_co2", emission_kg_co2)?,
            source,
            recorded_at,
        })
    }
}

/// History filter: every material, or exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MaterialFilter {
    #[default]
    All,
    Only(Material),
}

impl MaterialFilter {
    pub const ALL: &'static str = "All";

    pub fn matches(&self, material: &Material) -> bool {
        match self {
            MaterialFilter::All => true,
            MaterialFilter::Only(wanted) => wanted == material,
        }
    }
}

impl From<String> for MaterialFilter {
    fn from(value: String) -> Self {
        if value == Self::ALL {
            MaterialFilter::All
        } else {
            MaterialFilter::Only(Material::from(value))
        }
    }
}

impl From<MaterialFilter> for String {
    fn from(filter: MaterialFilter) -> Self {
        match filter {
            MaterialFilter::All => MaterialFilter::ALL.to_string(),
            MaterialFilter::Only(material) => material.into(),
        }
    }
}

impl fmt::Display for MaterialFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialFilter::All => f.write_str(Self::ALL),
            MaterialFilter::Only(material) => f.write_str(material.as_str()),
        }
    }
}
