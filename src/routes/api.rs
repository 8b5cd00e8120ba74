// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for daily activities, emission summaries and the profile.

use crate::db::collections;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{
    DailyTotal, EmissionBreakdown, EmissionRecord, EmissionStats, MealType, TransportMode,
    UserProfile,
};
use crate::services::aggregate::{self, Period};
use crate::services::emission;
use crate::time_utils::{format_utc_rfc3339, offset_from_minutes};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/estimate", post(estimate_activity))
        .route("/api/activities", get(list_activities).post(create_activity))
        .route("/api/emissions/total", get(get_total))
        .route("/api/emissions/daily", get(get_daily))
        .route("/api/emissions/stats", get(get_stats))
        .route("/api/profile", get(get_profile).put(put_profile))
}

/// Map validator errors onto a 400.
pub(crate) fn check<T: Validate>(input: &T) -> Result<()> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

// ─── Activity Logging ────────────────────────────────────────

/// Activity fields as entered in the daily log form.
#[derive(Debug, Deserialize)]
pub struct NewActivity {
    pub transport_mode: TransportMode,
    pub distance_km: f64,
    pub meal_type: MealType,
    pub electricity_usage_kwh: f64,
    pub plastic_used_kg: f64,
}

impl NewActivity {
    fn stamped_now(self) -> crate::models::ActivityLog {
        emission::activity_at(
            chrono::Utc::now(),
            self.transport_mode,
            self.distance_km,
            self.meal_type,
            self.electricity_usage_kwh,
            self.plastic_used_kg,
        )
    }
}

/// Estimate an activity without storing it.
async fn estimate_activity(Json(body): Json<NewActivity>) -> Result<Json<EmissionBreakdown>> {
    let breakdown = emission::estimate(&body.stamped_now())?;
    Ok(Json(breakdown))
}

/// Compute and store a daily activity record.
async fn create_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<NewActivity>,
) -> Result<(StatusCode, Json<EmissionRecord>)> {
    let record = emission::evaluate(body.stamped_now())?;

    let count = state
        .store
        .append(&user.user_id, collections::DAILY_ACTIVITIES, &record)
        .await?;

    tracing::info!(
        user_id = %user.user_id,
        emission_kg_co2 = record.emission_kg_co2,
        records = count,
        "Activity logged"
    );

    Ok((StatusCode::CREATED, Json(record)))
}

// ─── Period Queries ──────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct PeriodQuery {
    #[serde(default)]
    period: Period,
    /// Client's UTC offset in minutes east of UTC
    #[serde(default)]
    #[validate(range(min = -840, max = 840))]
    tz_offset_minutes: i32,
}

pub(crate) fn client_offset(minutes: i32) -> Result<FixedOffset> {
    offset_from_minutes(minutes).ok_or_else(|| {
        AppError::BadRequest("'tz_offset_minutes' must be within ±840".to_string())
    })
}

#[derive(Serialize)]
pub struct ActivitiesResponse {
    pub period: Period,
    pub records: Vec<EmissionRecord>,
    pub total_kg_co2: f64,
}

/// List activity records within a period (stored order).
async fn list_activities(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<ActivitiesResponse>> {
    check(&params)?;
    let offset = client_offset(params.tz_offset_minutes)?;
    let now = chrono::Utc::now();

    let mut records: Vec<EmissionRecord> = state
        .store
        .read_all(&user.user_id, collections::DAILY_ACTIVITIES)
        .await?;
    records.retain(|r| params.period.contains(r.activity.timestamp, now, offset));

    tracing::debug!(
        user_id = %user.user_id,
        period = %params.period,
        count = records.len(),
        "Fetched activities"
    );

    Ok(Json(ActivitiesResponse {
        period: params.period,
        total_kg_co2: aggregate::total(&records),
        records,
    }))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TotalResponse {
    pub period: String,
    pub total_kg_co2: f64,
    pub record_count: u32,
}

/// Total activity emission for a period (e.g. "today" on the home screen).
async fn get_total(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<TotalResponse>> {
    check(&params)?;
    let offset = client_offset(params.tz_offset_minutes)?;
    let now = chrono::Utc::now();

    let records: Vec<EmissionRecord> = state
        .store
        .read_all(&user.user_id, collections::DAILY_ACTIVITIES)
        .await?;

    let in_period = params.period.predicate(now, offset);
    let record_count = records
        .iter()
        .filter(|r| in_period(r.activity.timestamp))
        .count() as u32;
    let total_kg_co2 = aggregate::total_for_period(&records, in_period);

    Ok(Json(TotalResponse {
        period: params.period.to_string(),
        total_kg_co2,
        record_count,
    }))
}

#[derive(Debug, Deserialize, Validate)]
struct DailyQuery {
    #[serde(default = "default_days")]
    #[validate(range(min = 1, max = 90))]
    days: u32,
    #[serde(default)]
    #[validate(range(min = -840, max = 840))]
    tz_offset_minutes: i32,
}

fn default_days() -> u32 {
    7
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailyResponse {
    pub days: Vec<DailyTotal>,
}

/// Daily totals for the history chart, oldest first.
async fn get_daily(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<DailyQuery>,
) -> Result<Json<DailyResponse>> {
    check(&params)?;
    let offset = client_offset(params.tz_offset_minutes)?;

    let records: Vec<EmissionRecord> = state
        .store
        .read_all(&user.user_id, collections::DAILY_ACTIVITIES)
        .await?;

    Ok(Json(DailyResponse {
        days: aggregate::daily_totals(&records, params.days, chrono::Utc::now(), offset),
    }))
}

#[derive(Debug, Deserialize, Validate)]
struct StatsQuery {
    #[serde(default)]
    #[validate(range(min = -840, max = 840))]
    tz_offset_minutes: i32,
}

/// All-time emission statistics, with months in the client's calendar.
async fn get_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<StatsQuery>,
) -> Result<Json<EmissionStats>> {
    check(&params)?;
    let offset = client_offset(params.tz_offset_minutes)?;

    let records: Vec<EmissionRecord> = state
        .store
        .read_all(&user.user_id, collections::DAILY_ACTIVITIES)
        .await?;

    Ok(Json(EmissionStats::from_records(&records, offset)))
}

// ─── User Profile ────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct ProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 1, max = 150))]
    pub age: u32,
    pub diet: MealType,
    pub commute: TransportMode,
}

/// Get the current user's profile.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserProfile>> {
    let profile = state
        .store
        .read_doc(&user.user_id, collections::USER_PROFILE)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile for {} not found", user.user_id)))?;

    Ok(Json(profile))
}

/// Create or replace the current user's profile.
async fn put_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<ProfileRequest>,
) -> Result<Json<UserProfile>> {
    check(&body)?;
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("'name' must not be blank".to_string()));
    }

    let profile = UserProfile {
        name: name.to_string(),
        age: body.age,
        diet: body.diet,
        commute: body.commute,
        updated_at: format_utc_rfc3339(chrono::Utc::now()),
    };

    state
        .store
        .write_doc(&user.user_id, collections::USER_PROFILE, &profile)
        .await?;

    tracing::info!(user_id = %user.user_id, "Profile saved");
    Ok(Json(profile))
}
