// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Emission aggregation over already-loaded logs.
//!
//! Everything here works on in-memory slices and never recomputes an
//! emission: stored `emission_kg_co2` values are summed unrounded with
//! compensated summation and rounded once on the way out.

use chrono::{DateTime, Datelike, Days, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::models::{DailyTotal, EmissionRecord, Material, MaterialFilter, MaterialLog};
use crate::numeric::{round_kg, CompensatedSum};
use crate::time_utils::local_date;

/// Longest daily series served to charts.
pub const MAX_SERIES_DAYS: u32 = 90;

/// A timestamped entry carrying an emission value in kg CO₂e.
///
/// Activity records and material logs both implement this, so totals don't
/// depend on whether a value was computed locally or predicted remotely.
pub trait EmissionEntry {
    fn emission_kg_co2(&self) -> f64;
    fn recorded_at(&self) -> DateTime<Utc>;
}

impl EmissionEntry for EmissionRecord {
    fn emission_kg_co2(&self) -> f64 {
        self.emission_kg_co2
    }

    fn recorded_at(&self) -> DateTime<Utc> {
        self.activity.timestamp
    }
}

impl EmissionEntry for MaterialLog {
    fn emission_kg_co2(&self) -> f64 {
        self.emission_kg_co2
    }

    fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

/// Sum the emissions of entries whose timestamp satisfies `predicate`.
///
/// Returns 0 when nothing matches.
pub fn total_for_period<E, P>(entries: &[E], predicate: P) -> f64
where
    E: EmissionEntry,
    P: Fn(DateTime<Utc>) -> bool,
{
    let sum: CompensatedSum = entries
        .iter()
        .filter(|entry| predicate(entry.recorded_at()))
        .map(|entry| entry.emission_kg_co2())
        .collect();
    round_kg(sum.value())
}

/// Sum every entry.
pub fn total<E: EmissionEntry>(entries: &[E]) -> f64 {
    total_for_period(entries, |_| true)
}

/// Apply the history filter. `All` returns every log in input order;
/// otherwise exactly the logs of that material, order preserved.
pub fn filter_by_material<'a>(
    logs: &'a [MaterialLog],
    filter: &MaterialFilter,
) -> Vec<&'a MaterialLog> {
    logs.iter().filter(|log| filter.matches(&log.material)).collect()
}

/// Total emission per material.
pub fn totals_by_material(logs: &[MaterialLog]) -> BTreeMap<Material, f64> {
    let mut sums: BTreeMap<Material, CompensatedSum> = BTreeMap::new();
    for log in logs {
        sums.entry(log.material.clone())
            .or_default()
            .add(log.emission_kg_co2);
    }
    sums.into_iter()
        .map(|(material, sum)| (material, round_kg(sum.value())))
        .collect()
}

/// Per-day totals for the `days` local calendar days ending today,
/// oldest first, with empty days reported as 0.
pub fn daily_totals<E: EmissionEntry>(
    entries: &[E],
    days: u32,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> Vec<DailyTotal> {
    let today = local_date(now, offset);

    let mut buckets: BTreeMap<_, CompensatedSum> = (0..days.min(MAX_SERIES_DAYS))
        .filter_map(|back| today.checked_sub_days(Days::new(u64::from(back))))
        .map(|date| (date, CompensatedSum::new()))
        .collect();

    for entry in entries {
        if let Some(sum) = buckets.get_mut(&local_date(entry.recorded_at(), offset)) {
            sum.add(entry.emission_kg_co2());
        }
    }

    buckets
        .into_iter()
        .map(|(date, sum)| DailyTotal {
            date: date.format("%Y-%m-%d").to_string(),
            total_kg_co2: round_kg(sum.value()),
        })
        .collect()
}

/// Reporting period, evaluated in the caller's local calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// Same local calendar day as now
    #[default]
    Today,
    /// Same ISO week (Monday start) as now
    Week,
    /// Same calendar month as now
    Month,
    /// Everything
    All,
}

impl Period {
    pub fn as_str(self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Week => "week",
            Period::Month => "month",
            Period::All => "all",
        }
    }

    /// Whether `timestamp` falls in this period relative to `now`.
    pub fn contains(self, timestamp: DateTime<Utc>, now: DateTime<Utc>, offset: FixedOffset) -> bool {
        let date = local_date(timestamp, offset);
        let today = local_date(now, offset);
        match self {
            Period::Today => date == today,
            Period::Week => date.iso_week() == today.iso_week(),
            Period::Month => date.year() == today.year() && date.month() == today.month(),
            Period::All => true,
        }
    }

    /// Predicate form of [`Period::contains`], for [`total_for_period`].
    pub fn predicate(
        self,
        now: DateTime<Utc>,
        offset: FixedOffset,
    ) -> impl Fn(DateTime<Utc>) -> bool {
        move |timestamp| self.contains(timestamp, now, offset)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
