//! The scenario engine: explicit "inputs changed" entry point.
//!
//! EXECUTION ORDER (fixed, never reordered):
//!   1. Clamp elapsed time (at deserialization) and drive conditions.
//!   2. Condition projector.
//!   3. Clamp projected roughness to the policy band.
//!   4. Physical damage stage (deterministic, or stochastic when seeded).
//!   5. Monetary stage.
//!   6. Narrative composer (reads the clamped roughness).
//!
//! RULES:
//!   - The presentation layer calls `evaluate` every time an input changes.
//!   - The only state held is the last (inputs, report) pair. A hit requires
//!     the full input tuple to match, so a memoised report is never stale.
//!   - Randomness only enters through `TripInputs::seed`.

use crate::{
    config::EngineConfig,
    curve::{interpolate_scenarios, CurveMode, ScenarioCurves},
    error::SimResult,
    forecast::{axis_bounds, pair_scenarios},
    impact::StochasticImpactModel,
    narrative::explain,
    projector::{clamp_elapsed_years, clamp_roughness, project_with, visual_condition_index},
    scoring::{price, DamageInputs, DamageModel, DeterministicDamageModel},
    types::{DriveConditions, ElapsedYears, ForecastRecord, RoadSegmentState, SimulationResult},
};
use serde::{Deserialize, Deserializer, Serialize};

/// Complete input tuple for one trip evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripInputs {
    pub segment:       RoadSegmentState,
    /// Signed on the wire; negative offsets evaluate as year 0.
    #[serde(deserialize_with = "signed_elapsed_years")]
    pub elapsed_years: ElapsedYears,
    pub conditions:    DriveConditions,
    /// When set, the stochastic impact stage runs with this master seed.
    #[serde(default)]
    pub seed:          Option<u64>,
}

fn signed_elapsed_years<'de, D>(deserializer: D) -> Result<ElapsedYears, D::Error>
where
    D: Deserializer<'de>,
{
    i64::deserialize(deserializer).map(clamp_elapsed_years)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripReport {
    /// Projector output before clamping.
    pub projected_roughness:    f64,
    /// Roughness actually fed to the scorer.
    pub scored_roughness:       f64,
    pub visual_condition_index: f64,
    pub result:                 SimulationResult,
    pub narrative:              String,
    pub impact_events:          Option<u32>,
}

/// Canvas and mode for a forecast chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub mode:          CurveMode,
    pub canvas_width:  f64,
    pub canvas_height: f64,
}

pub struct ScenarioEngine {
    config:      EngineConfig,
    last:        Option<(TripInputs, TripReport)>,
    evaluations: u64,
    memo_hits:   u64,
}

impl ScenarioEngine {
    /// Validates the config before accepting it.
    pub fn new(config: EngineConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    /// The default constants always pass `EngineConfig::validate`.
    pub fn with_defaults() -> Self {
        Self::from_validated(EngineConfig::default())
    }

    fn from_validated(config: EngineConfig) -> Self {
        Self {
            config,
            last: None,
            evaluations: 0,
            memo_hits: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Total `evaluate` calls, and how many were served from the memo.
    pub fn stats(&self) -> (u64, u64) {
        (self.evaluations, self.memo_hits)
    }

    /// Inputs changed: produce the report for the current input tuple.
    pub fn evaluate(&mut self, inputs: &TripInputs) -> TripReport {
        self.evaluations += 1;
        if let Some((cached_inputs, report)) = &self.last {
            if cached_inputs == inputs {
                self.memo_hits += 1;
                return report.clone();
            }
        }

        let report = self.compute(inputs);
        self.last = Some((inputs.clone(), report.clone()));
        report
    }

    /// Stateless evaluation. `evaluate` is a memoised wrapper around this.
    pub fn compute(&self, inputs: &TripInputs) -> TripReport {
        let segment = &inputs.segment;
        let projected_roughness = project_with(
            &self.config.degradation,
            segment.baseline_roughness,
            segment.surface,
            inputs.elapsed_years,
        );
        let scored_roughness = clamp_roughness(&self.config.degradation, projected_roughness);
        if scored_roughness != projected_roughness {
            log::warn!(
                "segment '{}': roughness {projected_roughness:.2} clamped to {scored_roughness:.2}",
                segment.name
            );
        }

        let c = &inputs.conditions;
        let damage_inputs = DamageInputs::clamped(
            scored_roughness,
            c.cargo_type,
            c.cargo_weight_tons,
            c.weather,
            c.speed_limit_kmh,
        );

        let scoring = &self.config.scoring;
        let physical = match inputs.seed {
            Some(seed) => {
                StochasticImpactModel::seeded(self.config.impact.clone(), seed)
                    .assess(scoring, &damage_inputs)
            }
            None => DeterministicDamageModel.assess(scoring, &damage_inputs),
        };
        let result = price(scoring, &damage_inputs, &physical);
        let narrative = explain(&result, scored_roughness);

        log::debug!(
            "segment '{}' year+{}: roughness={scored_roughness:.2} integrity_lost={:.1} loss={:.0}",
            segment.name,
            inputs.elapsed_years,
            result.integrity_lost,
            result.financial_loss
        );

        TripReport {
            projected_roughness,
            scored_roughness,
            visual_condition_index: visual_condition_index(scored_roughness),
            result,
            narrative,
            impact_events: physical.impact_events,
        }
    }

    /// Forecast records for both scenarios to chart paths on a shared frame.
    pub fn forecast_curves(
        &self,
        funded: &[ForecastRecord],
        do_nothing: &[ForecastRecord],
        chart: &ChartRequest,
    ) -> ScenarioCurves {
        let points = pair_scenarios(funded, do_nothing);
        let (max_x, max_y) = axis_bounds(&points);
        interpolate_scenarios(
            &points,
            chart.mode,
            chart.canvas_width,
            chart.canvas_height,
            max_x,
            max_y,
        )
    }
}
