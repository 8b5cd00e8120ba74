// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client for the remote emission predictor.
//!
//! The predictor is a small model server that estimates kg CO₂e for a waste
//! material and weight:
//! - `POST {base}/predict` with `{"category": "Plastic", "weight": 2.0}`
//! - success: `{"predicted_emission": 5.1, "category": "Plastic"}`
//! - failure: `{"error": "...", "message": "..."}` with a 4xx/5xx status

use crate::error::AppError;
use crate::models::Material;
use crate::services::emission::check_quantity;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Emission predictor API client.
#[derive(Clone)]
pub struct PredictorClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    category: &'a str,
    weight: f64,
}

#[derive(Deserialize)]
struct PredictResponse {
    predicted_emission: f64,
}

#[derive(Deserialize)]
struct PredictErrorBody {
    error: String,
    #[serde(default)]
    message: Option<String>,
}

impl PredictorClient {
    /// Create a client for the predictor at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Predictor client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Predict the emission (kg CO₂e) of `amount_kg` of `material`.
    ///
    /// Only the categories the model was trained on are sent; anything else
    /// is rejected locally.
    pub async fn predict(&self, material: &Material, amount_kg: f64) -> Result<f64, AppError> {
        check_quantity("amount_kg", amount_kg)?;
        if !material.is_recognized() {
            return Err(AppError::BadRequest(format!(
                "Unsupported material for prediction: {}",
                material
            )));
        }

        let url = format!("{}/predict", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&PredictRequest {
                category: material.as_str(),
                weight: amount_kg,
            })
            .send()
            .await
            .map_err(|e| AppError::Predictor(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = match serde_json::from_str::<PredictErrorBody>(&body) {
                Ok(PredictErrorBody {
                    error,
                    message: Some(message),
                }) => format!("{}: {}", error, message),
                Ok(PredictErrorBody { error, .. }) => error,
                Err(_) => body,
            };
            return Err(AppError::Predictor(format!("HTTP {}: {}", status, detail)));
        }

        let prediction: PredictResponse = response
            .json()
            .await
            .map_err(|e| AppError::Predictor(format!("Malformed response: {}", e)))?;

        let emission = prediction.predicted_emission;
        if !emission.is_finite() || emission < 0.0 {
            return Err(AppError::Predictor(format!(
                "Invalid predicted emission: {}",
                emission
            )));
        }

        tracing::debug!(
            material = %material,
            amount_kg,
            emission_kg_co2 = emission,
            "Predicted emission"
        );
        Ok(emission)
    }

    /// Probe the predictor's health endpoint.
    pub async fn health(&self) -> Result<(), AppError> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Predictor(format!("Health check failed: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AppError::Predictor(format!(
                "Health check returned HTTP {}",
                response.status()
            )))
        }
    }
}
