// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod activity;
pub mod material;
pub mod stats;
pub mod user;

pub use activity::{ActivityLog, EmissionBreakdown, EmissionRecord, MealType, TransportMode};
pub use material::{EmissionSource, Material, MaterialFilter, MaterialLog};
pub use stats::{DailyTotal, EmissionStats};
pub use user::UserProfile;
