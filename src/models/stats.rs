//! Emission statistics for dashboard queries.
//!
//! Computed on read from the user's activity records. Category totals are
//! accumulated unrounded and rounded once when the summary is built.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::EmissionRecord;
use crate::numeric::{round_kg, CompensatedSum};
use crate::time_utils::{format_utc_rfc3339, local_date};

/// Summary of a user's activity emissions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmissionStats {
    // ─── Totals ──────────────────────────────────────────────────
    /// Number of activity records
    pub total_records: u32,
    /// Sum of all record emissions (kg CO₂e)
    pub total_kg_co2: f64,

    // ─── By Category ─────────────────────────────────────────────
    /// Emission per transport mode (kg CO₂e)
    pub by_transport_mode: BTreeMap<String, f64>,
    /// Emission per meal type (kg CO₂e)
    pub by_meal_type: BTreeMap<String, f64>,

    // ─── Time Series ─────────────────────────────────────────────
    /// Emission per month ("YYYY-MM", in the requested UTC offset)
    pub by_month: BTreeMap<String, f64>,

    // ─── Range ───────────────────────────────────────────────────
    /// Earliest record timestamp (ISO 8601)
    pub first_record_at: Option<String>,
    /// Latest record timestamp (ISO 8601)
    pub last_record_at: Option<String>,
}

/// Running accumulator behind [`EmissionStats`].
#[derive(Debug, Default)]
struct StatsAccumulator {
    total_records: u32,
    total: CompensatedSum,
    by_transport_mode: BTreeMap<String, CompensatedSum>,
    by_meal_type: BTreeMap<String, CompensatedSum>,
    by_month: BTreeMap<String, CompensatedSum>,
    first: Option<chrono::DateTime<chrono::Utc>>,
    last: Option<chrono::DateTime<chrono::Utc>>,
}

impl StatsAccumulator {
    fn add(&mut self, record: &EmissionRecord, offset: FixedOffset) {
        let emission = record.emission_kg_co2;
        let timestamp = record.activity.timestamp;

        self.total_records += 1;
        self.total.add(emission);

        self.by_transport_mode
            .entry(record.activity.transport_mode.to_string())
            .or_default()
            .add(emission);
        self.by_meal_type
            .entry(record.activity.meal_type.to_string())
            .or_default()
            .add(emission);
        self.by_month
            .entry(local_date(timestamp, offset).format("%Y-%m").to_string())
            .or_default()
            .add(emission);

        // Records are appended in order, but don't rely on it
        if self.first.map_or(true, |first| timestamp < first) {
            self.first = Some(timestamp);
        }
        if self.last.map_or(true, |last| timestamp > last) {
            self.last = Some(timestamp);
        }
    }

    fn finish(self) -> EmissionStats {
        fn rounded(sums: BTreeMap<String, CompensatedSum>) -> BTreeMap<String, f64> {
            sums.into_iter()
                .map(|(key, sum)| (key, round_kg(sum.value())))
                .collect()
        }

        EmissionStats {
            total_records: self.total_records,
            total_kg_co2: round_kg(self.total.value()),
            by_transport_mode: rounded(self.by_transport_mode),
            by_meal_type: rounded(self.by_meal_type),
            by_month: rounded(self.by_month),
            first_record_at: self.first.map(format_utc_rfc3339),
            last_record_at: self.last.map(format_utc_rfc3339),
        }
    }
}

impl EmissionStats {
    /// Summarise a set of activity records, bucketing months in `offset`.
    pub fn from_records(records: &[EmissionRecord], offset: FixedOffset) -> Self {
        let mut acc = StatsAccumulator::default();
        for record in records {
            acc.add(record, offset);
        }
        acc.finish()
    }
}

/// Total emission for one local calendar day (chart point).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(ts_rs::TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailyTotal {
    /// Local date ("YYYY-MM-DD")
    pub date: String,
    pub total_kg_co2: f64,
}
