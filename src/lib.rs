// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! EcoTrack: personal carbon footprint tracking
//!
//! This crate provides the emission estimation engine and the backend API
//! for logging daily activities and material waste and summarizing the
//! resulting CO₂e emissions.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod numeric;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::LogStore;
use services::PredictorClient;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: LogStore,
    /// Remote emission predictor, if configured
    pub predictor: Option<PredictorClient>,
}
