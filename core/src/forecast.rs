//! Adapters from backend forecast records to engine inputs.

use crate::types::{ForecastRecord, YearlyProjectionPoint};
use std::collections::BTreeMap;

/// Index records by year. The first record for a year wins.
fn by_year(records: &[ForecastRecord], label: &str) -> BTreeMap<i32, f64> {
    let mut out = BTreeMap::new();
    for r in records {
        if out.contains_key(&r.year) {
            log::warn!("{label} forecast: duplicate year {} ignored", r.year);
            continue;
        }
        out.insert(r.year, r.avg_condition_index);
    }
    out
}

/// Align the funded and do-nothing forecasts by calendar year.
///
/// Only years present in both series are kept. The result is ordered
/// and `year_index` is rebased so the earliest shared year is 0.
pub fn pair_scenarios(
    funded: &[ForecastRecord],
    do_nothing: &[ForecastRecord],
) -> Vec<YearlyProjectionPoint> {
    let funded = by_year(funded, "funded");
    let do_nothing = by_year(do_nothing, "do_nothing");

    let shared: Vec<(i32, f64, f64)> = funded
        .iter()
        .filter_map(|(year, f)| do_nothing.get(year).map(|d| (*year, *f, *d)))
        .collect();

    let Some(&(base_year, _, _)) = shared.first() else {
        return Vec::new();
    };

    shared
        .into_iter()
        .map(|(year, funded_value, do_nothing_value)| YearlyProjectionPoint {
            year_index: year.abs_diff(base_year),
            funded_value,
            do_nothing_value,
        })
        .collect()
}

/// Largest x and y across both scenarios, for use as interpolator bounds.
/// Returns (0, 0) for an empty series.
pub fn axis_bounds(points: &[YearlyProjectionPoint]) -> (f64, f64) {
    points.iter().fold((0.0f64, 0.0f64), |(mx, my), p| {
        (
            mx.max(f64::from(p.year_index)),
            my.max(p.funded_value).max(p.do_nothing_value),
        )
    })
}

/// Ratios of each value to the series maximum, for bar heights.
///
/// An empty, all-zero, or non-positive series yields zeros.
pub fn normalize_bars(values: &[f64]) -> Vec<f64> {
    let max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0f64, f64::max);
    if max <= 0.0 {
        return vec![0.0; values.len()];
    }
    values
        .iter()
        .map(|v| if v.is_finite() { (v / max).max(0.0) } else { 0.0 })
        .collect()
}

/// Maintenance costs of a forecast, in record order.
pub fn maintenance_costs(records: &[ForecastRecord]) -> Vec<f64> {
    records.iter().map(|r| r.total_maintenance_cost).collect()
}
