// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for the material emission log.

use super::api::check;
use crate::db::collections;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{EmissionSource, Material, MaterialFilter, MaterialLog};
use crate::services::aggregate;
use crate::services::emission::check_quantity;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/materials", get(list_materials).post(create_material))
        .route("/api/materials/breakdown", get(get_breakdown))
        .route("/api/materials/predict", post(predict_material))
}

#[derive(Debug, Deserialize)]
pub struct NewMaterialLog {
    pub material: Material,
    pub amount_kg: f64,
    /// Omit to have the predictor supply it
    #[serde(default)]
    pub emission_kg_co2: Option<f64>,
}

/// Record a material log, predicting the emission when none is given.
async fn create_material(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<NewMaterialLog>,
) -> Result<(StatusCode, Json<MaterialLog>)> {
    let (emission, source) = match body.emission_kg_co2 {
        Some(emission) => (emission, EmissionSource::Manual),
        None => {
            check_quantity("amount_kg", body.amount_kg)?;
            let predictor = state
                .predictor
                .as_ref()
                .ok_or(AppError::PredictorUnavailable)?;
            let emission = predictor.predict(&body.material, body.amount_kg).await?;
            (emission, EmissionSource::Predicted)
        }
    };

    let log = MaterialLog::new(
        body.material,
        body.amount_kg,
        emission,
        source,
        chrono::Utc::now(),
    )?;

    let count = state
        .store
        .append(&user.user_id, collections::MATERIAL_LOGS, &log)
        .await?;

    tracing::info!(
        user_id = %user.user_id,
        material = %log.material,
        emission_kg_co2 = log.emission_kg_co2,
        source = ?log.source,
        logs = count,
        "Material logged"
    );

    Ok((StatusCode::CREATED, Json(log)))
}

#[derive(Debug, Deserialize, Validate)]
struct MaterialQuery {
    #[serde(default = "default_filter")]
    #[validate(length(min = 1, max = 64))]
    material: String,
}

fn default_filter() -> String {
    MaterialFilter::ALL.to_string()
}

#[derive(Serialize)]
pub struct MaterialHistoryResponse {
    pub filter: MaterialFilter,
    pub logs: Vec<MaterialLog>,
    pub total_kg_co2: f64,
}

/// Material history, optionally restricted to one material.
async fn list_materials(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<MaterialQuery>,
) -> Result<Json<MaterialHistoryResponse>> {
    check(&params)?;
    let filter = MaterialFilter::from(params.material);

    let logs: Vec<MaterialLog> = state
        .store
        .read_all(&user.user_id, collections::MATERIAL_LOGS)
        .await?;

    let logs: Vec<MaterialLog> = aggregate::filter_by_material(&logs, &filter)
        .into_iter()
        .cloned()
        .collect();

    tracing::debug!(
        user_id = %user.user_id,
        filter = %filter,
        count = logs.len(),
        "Fetched material logs"
    );

    Ok(Json(MaterialHistoryResponse {
        filter,
        total_kg_co2: aggregate::total(&logs),
        logs,
    }))
}

#[derive(Serialize)]
pub struct BreakdownResponse {
    pub by_material: BTreeMap<String, f64>,
    pub total_kg_co2: f64,
}

/// Emission totals per material.
async fn get_breakdown(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<BreakdownResponse>> {
    let logs: Vec<MaterialLog> = state
        .store
        .read_all(&user.user_id, collections::MATERIAL_LOGS)
        .await?;

    let by_material = aggregate::totals_by_material(&logs)
        .into_iter()
        .map(|(material, kg)| (String::from(material), kg))
        .collect();

    Ok(Json(BreakdownResponse {
        by_material,
        total_kg_co2: aggregate::total(&logs),
    }))
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub material: Material,
    pub amount_kg: f64,
}

#[derive(Serialize)]
pub struct PredictResponse {
    pub material: Material,
    pub amount_kg: f64,
    pub predicted_emission_kg_co2: f64,
}

/// Ask the predictor without storing anything.
async fn predict_material(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PredictRequest>,
) -> Result<Json<PredictResponse>> {
    let amount_kg = check_quantity("amount_kg", body.amount_kg)?;
    let predictor = state
        .predictor
        .as_ref()
        .ok_or(AppError::PredictorUnavailable)?;

    let predicted = predictor.predict(&body.material, amount_kg).await?;

    Ok(Json(PredictResponse {
        material: body.material,
        amount_kg,
        predicted_emission_kg_co2: predicted,
    }))
}
