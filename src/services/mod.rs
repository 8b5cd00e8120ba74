// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - emission core and outbound clients.

pub mod aggregate;
pub mod emission;
pub mod predictor;

pub use aggregate::{EmissionEntry, Period};
pub use emission::InvalidInput;
pub use predictor::PredictorClient;
