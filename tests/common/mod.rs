// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
};
use ecotrack::config::Config;
use ecotrack::db::LogStore;
use ecotrack::middleware::auth::create_jwt;
use ecotrack::routes::create_router;
use ecotrack::services::PredictorClient;
use ecotrack::AppState;
use std::sync::Arc;
use std::time::Duration;

/// Create a test app with no predictor configured.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    build_app(Config::test_default(), None)
}

/// Create a test app whose predictor points at `predictor_url`.
#[allow(dead_code)]
pub fn create_test_app_with_predictor(predictor_url: &str) -> (axum::Router, Arc<AppState>) {
    let mut config = Config::test_default();
    config.predictor_url = Some(predictor_url.to_string());
    let predictor = PredictorClient::new(predictor_url, Duration::from_secs(2))
        .expect("Failed to build predictor client");
    build_app(config, Some(predictor))
}

fn build_app(config: Config, predictor: Option<PredictorClient>) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config,
        store: LogStore::new(),
        predictor,
    });

    (create_router(state.clone()), state)
}

/// Create a session token for `user_id` signed with the state's key.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, state: &AppState) -> String {
    create_jwt(user_id, &state.config.jwt_signing_key).expect("Failed to create JWT")
}

/// Build an authenticated request with an optional JSON body.
#[allow(dead_code)]
pub fn authed_request(
    method: &str,
    uri: &str,
    token: &str,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
