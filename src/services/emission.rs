// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity emission calculator.
//!
//! A linear, additive model: each logged quantity is multiplied by a fixed
//! emission factor and the four terms are summed. Transport and diet factors
//! live in lookup tables, so supporting a new mode or meal is a table edit.

use chrono::{DateTime, Utc};

use crate::models::{ActivityLog, EmissionBreakdown, EmissionRecord, MealType, TransportMode};
use crate::numeric::round_kg;

/// kg CO₂e per km, per transport mode.
const TRANSPORT_KG_PER_KM: [(TransportMode, f64); 4] = [
    (TransportMode::Walk, WALK_KG_PER_KM),
    (TransportMode::Bike, 0.02),
    (TransportMode::Metro, 0.05),
    (TransportMode::Car, 0.21),
];

/// Unrecognized transport modes are costed like walking.
const WALK_KG_PER_KM: f64 = 0.0;

/// kg CO₂e per day, per meal type. Unrecognized meal types contribute 0.
const MEAL_KG_PER_DAY: [(MealType, f64); 3] = [
    (MealType::Vegan, 0.8),
    (MealType::Vegetarian, 1.0),
    (MealType::NonVegetarian, 2.5),
];

/// kg CO₂e per kWh of electricity.
pub const ELECTRICITY_KG_PER_KWH: f64 = 0.9;

/// kg CO₂e per kg of plastic waste.
pub const PLASTIC_KG_PER_KG: f64 = 6.0;

/// Largest accepted quantity (km, kWh or kg).
///
/// Keeps every term, and any realistic sum of stored values, far from f64
/// overflow.
pub const MAX_QUANTITY: f64 = 1e9;

/// Rejected numeric input. Never clamped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidInput {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must not exceed {max} (got {value})", max = MAX_QUANTITY)]
    TooLarge { field: &'static str, value: f64 },
}

impl InvalidInput {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            InvalidInput::NonFinite { field }
            | InvalidInput::Negative { field, .. }
            | InvalidInput::TooLarge { field, .. } => field,
        }
    }
}

/// Check that a quantity is finite, not negative and at most [`MAX_QUANTITY`].
pub fn check_quantity(field: &'static str, value: f64) -> Result<f64, InvalidInput> {
    if !value.is_finite() {
        return Err(InvalidInput::NonFinite { field });
    }
    if value < 0.0 {
        return Err(InvalidInput::Negative { field, value });
    }
    if value > MAX_QUANTITY {
        return Err(InvalidInput::TooLarge { field, value });
    }
    Ok(value)
}

/// Validate every numeric field of an activity log.
pub fn validate_activity(log: &ActivityLog) -> Result<(), InvalidInput> {
    check_quantity("distance_km", log.distance_km)?;
    check_quantity("electricity_usage_kwh", log.electricity_usage_kwh)?;
    check_quantity("plastic_used_kg", log.plastic_used_kg)?;
    Ok(())
}

/// Emission factor for a transport mode (kg CO₂e per km).
pub fn transport_factor(mode: &TransportMode) -> f64 {
    TRANSPORT_KG_PER_KM
        .iter()
        .find(|(known, _)| known == mode)
        .map(|&(_, factor)| factor)
        .unwrap_or_else(|| {
            tracing::warn!(
                transport_mode = %mode,
                "Unrecognized transport mode, using walking factor"
            );
            WALK_KG_PER_KM
        })
}

/// Flat daily diet contribution for a meal type (kg CO₂e).
pub fn meal_emission(meal: &MealType) -> f64 {
    MEAL_KG_PER_DAY
        .iter()
        .find(|(known, _)| known == meal)
        .map(|&(_, kg)| kg)
        .unwrap_or_else(|| {
            tracing::warn!(meal_type = %meal, "Unrecognized meal type, contributing 0");
            0.0
        })
}

/// Estimate the emission of one activity log, term by term.
pub fn estimate(log: &ActivityLog) -> Result<EmissionBreakdown, InvalidInput> {
    validate_activity(log)?;

    let transport = log.distance_km * transport_factor(&log.transport_mode);
    let diet = meal_emission(&log.meal_type);
    let electricity = log.electricity_usage_kwh * ELECTRICITY_KG_PER_KWH;
    let waste = log.plastic_used_kg * PLASTIC_KG_PER_KG;
    let total = transport + diet + electricity + waste;

    // Never store a value that doesn't survive a JSON round trip
    if !total.is_finite() {
        return Err(InvalidInput::NonFinite {
            field: "emission_kg_co2",
        });
    }

    Ok(EmissionBreakdown {
        transport_kg: round_kg(transport),
        diet_kg: round_kg(diet),
        electricity_kg: round_kg(electricity),
        waste_kg: round_kg(waste),
        total_kg: round_kg(total),
    })
}

/// Estimate the total emission of one activity log (kg CO₂e, 2 decimals).
pub fn estimate_kg(log: &ActivityLog) -> Result<f64, InvalidInput> {
    estimate(log).map(|breakdown| breakdown.total_kg)
}

/// Turn a validated log into the record that gets stored.
pub fn evaluate(log: ActivityLog) -> Result<EmissionRecord, InvalidInput> {
    let breakdown = estimate(&log)?;
    Ok(EmissionRecord {
        activity: log,
        emission_kg_co2: breakdown.total_kg,
        breakdown,
    })
}

/// Build an activity log stamped with `timestamp`.
pub fn activity_at(
    timestamp: DateTime<Utc>,
    transport_mode: TransportMode,
    distance_km: f64,
    meal_type: MealType,
    electricity_usage_kwh: f64,
    plastic_used_kg: f64,
) -> ActivityLog {
    ActivityLog {
        timestamp,
        transport_mode,
        distance_km,
        meal_type,
        electricity_usage_kwh,
        plastic_used_kg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(mode: &str, distance: f64, meal: &str, kwh: f64, plastic: f64) -> ActivityLog {
        activity_at(
            "2025-03-01T08:00:00Z".parse().unwrap(),
            TransportMode::from(mode),
            distance,
            MealType::from(meal),
            kwh,
            plastic,
        )
    }

    #[test]
    fn test_car_commute_example() {
        let breakdown = estimate(&log("Car", 10.0, "Vegetarian", 2.5, 1.0)).unwrap();

        assert_eq!(breakdown.transport_kg, 2.1);
        assert_eq!(breakdown.diet_kg, 1.0);
        assert_eq!(breakdown.electricity_kg, 2.25);
        assert_eq!(breakdown.waste_kg, 6.0);
        assert_eq!(breakdown.total_kg, 11.35);
    }

    #[test]
    fn test_vegan_walk_is_diet_only() {
        assert_eq!(estimate_kg(&log("Walk", 0.0, "Vegan", 0.0, 0.0)).unwrap(), 0.8);
    }

    #[test]
    fn test_walk_emission_equals_diet_constant() {
        for (meal, expected) in [("Vegan", 0.8), ("Vegetarian", 1.0), ("Non-Vegetarian", 2.5)] {
            let total = estimate_kg(&log("Walk", 42.0, meal, 0.0, 0.0)).unwrap();
            assert_eq!(total, expected, "meal {meal}");
        }
    }

    #[test]
    fn test_transport_factor_table() {
        assert_eq!(transport_factor(&TransportMode::Walk), 0.0);
        assert_eq!(transport_factor(&TransportMode::Bike), 0.02);
        assert_eq!(transport_factor(&TransportMode::Metro), 0.05);
        assert_eq!(transport_factor(&TransportMode::Car), 0.21);
    }

    #[test]
    fn test_unrecognized_transport_costs_like_walking() {
        let scooter = estimate(&log("Scooter", 12.0, "Vegetarian", 1.0, 0.5)).unwrap();
        let walk = estimate(&log("Walk", 12.0, "Vegetarian", 1.0, 0.5)).unwrap();
        assert_eq!(scooter, walk);
    }

    #[test]
    fn test_unrecognized_meal_contributes_nothing() {
        let total = estimate_kg(&log("Bike", 10.0, "Pescatarian", 0.0, 0.0)).unwrap();
        assert_eq!(total, 0.2);
    }

    #[test]
    fn test_total_rounds_half_away_from_zero() {
        // 0.05 kg/km * 0.1 km = 0.005 kg, exactly half a cent.
        let total = estimate_kg(&log("Metro", 0.1, "Other", 0.0, 0.0)).unwrap();
        assert_eq!(total, 0.01);
    }

    #[test]
    fn test_total_is_rounded_from_unrounded_terms() {
        // Terms 0.004 and 0.0048 both display as 0.00 but add up to a cent.
        let breakdown = estimate(&log("Bike", 0.2, "Other", 0.0, 0.0008)).unwrap();
        assert_eq!(breakdown.transport_kg, 0.0);
        assert_eq!(breakdown.waste_kg, 0.0);
        assert_eq!(breakdown.total_kg, 0.01);
    }

    #[test]
    fn test_rejects_negative_distance() {
        let err = estimate(&log("Car", -1.0, "Vegan", 0.0, 0.0)).unwrap_err();
        assert_eq!(
            err,
            InvalidInput::Negative {
                field: "distance_km",
                value: -1.0
            }
        );
        assert_eq!(err.field(), "distance_km");
    }

    #[test]
    fn test_rejects_non_finite_quantities() {
        let err = estimate(&log("Car", 1.0, "Vegan", f64::INFINITY, 0.0)).unwrap_err();
        assert_eq!(
            err,
            InvalidInput::NonFinite {
                field: "electricity_usage_kwh"
            }
        );

        let err = estimate(&log("Car", 1.0, "Vegan", 0.0, f64::NAN)).unwrap_err();
        assert_eq!(err.field(), "plastic_used_kg");
    }

    #[test]
    fn test_huge_distance_rejected_before_overflow() {
        let err = evaluate(log("Car", 1e305, "Vegan", 0.0, 0.0)).unwrap_err();
        assert_eq!(
            err,
            InvalidInput::TooLarge {
                field: "distance_km",
                value: 1e305
            }
        );
        assert!(err.to_string().contains("distance_km"));
    }

    #[test]
    fn test_largest_quantities_stay_finite() {
        let record = evaluate(log(
            "Car",
            MAX_QUANTITY,
            "Non-Vegetarian",
            MAX_QUANTITY,
            MAX_QUANTITY,
        ))
        .unwrap();
        assert!(record.emission_kg_co2.is_finite());
        assert_eq!(record.emission_kg_co2, 7_110_000_002.5);
        assert!(serde_json::to_value(&record).unwrap()["emission_kg_co2"].is_f64());
    }

    #[test]
    fn test_check_quantity_upper_bound() {
        assert_eq!(check_quantity("amount_kg", MAX_QUANTITY), Ok(MAX_QUANTITY));
        assert!(matches!(
            check_quantity("amount_kg", 1e308),
            Err(InvalidInput::TooLarge { field: "amount_kg", .. })
        ));
    }

    #[test]
    fn test_negative_zero_is_accepted() {
        assert_eq!(estimate_kg(&log("Walk", -0.0, "Vegan", 0.0, 0.0)).unwrap(), 0.8);
    }

    #[test]
    fn test_evaluate_keeps_log_and_total() {
        let input = log("Car", 10.0, "Vegetarian", 2.5, 1.0);
        let record = evaluate(input.clone()).unwrap();
        assert_eq!(record.activity, input);
        assert_eq!(record.emission_kg_co2, 11.35);
        assert_eq!(record.breakdown.total_kg, record.emission_kg_co2);
    }
}
