//! Condition projector: roughness forward in time.
//!
//! Roughness is the unit of record. The visual condition index is a
//! display convenience derived from it.
//!
//! The projector never clamps its own output. Any call site that feeds
//! a projection into the scorer must run it through `clamp_roughness`.

use crate::{
    config::DegradationConfig,
    types::{ElapsedYears, Surface},
};

/// Project roughness using the default degradation rates.
///
/// Precondition: `elapsed_years` was already clamped to >= 0
/// (see `clamp_elapsed_years`).
pub fn project(baseline_roughness: f64, surface: Surface, elapsed_years: ElapsedYears) -> f64 {
    project_with(&DegradationConfig::default(), baseline_roughness, surface, elapsed_years)
}

pub fn project_with(
    config: &DegradationConfig,
    baseline_roughness: f64,
    surface: Surface,
    elapsed_years: ElapsedYears,
) -> f64 {
    baseline_roughness + f64::from(elapsed_years) * config.rate(surface)
}

/// Projected roughness for every year in `0..=horizon`.
pub fn degradation_series(
    config: &DegradationConfig,
    baseline_roughness: f64,
    surface: Surface,
    horizon: ElapsedYears,
) -> Vec<f64> {
    (0..=horizon)
        .map(|year| project_with(config, baseline_roughness, surface, year))
        .collect()
}

/// Map roughness onto the 0–100 dashboard scale (higher = better).
pub fn visual_condition_index(roughness: f64) -> f64 {
    if roughness.is_nan() {
        return 0.0;
    }
    (100.0 - roughness * 10.0).clamp(0.0, 100.0)
}

/// Clamp roughness into the policy band before it reaches the scorer.
pub fn clamp_roughness(config: &DegradationConfig, roughness: f64) -> f64 {
    if roughness.is_nan() {
        return config.roughness_floor;
    }
    roughness.clamp(config.roughness_floor, config.roughness_ceiling)
}

/// Signed caller input (slider offsets, year differences) to elapsed years.
pub fn clamp_elapsed_years(years: i64) -> ElapsedYears {
    years.clamp(0, i64::from(ElapsedYears::MAX)) as ElapsedYears
}
