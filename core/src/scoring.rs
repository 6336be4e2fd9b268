//! Risk & loss scorer.
//!
//! Scoring runs as two composable stages:
//!   1. Physical stage: a `DamageModel` turns road, weather, speed and
//!      cargo inputs into integrity lost and a loss priced against the
//!      reference cargo value.
//!   2. Monetary stage: `rescale_loss` adapts that reference loss to the
//!      caller's actual cargo value.
//!
//! ORDER (fixed): base terms → interaction amplification → fragility
//! multiplier on the SUM → clamp. Amplification never sees fragility.

use crate::{
    config::ScoringConfig,
    types::{CargoType, RiskFlags, SimulationResult, Weather},
};

/// Scorer inputs after boundary clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageInputs {
    pub roughness:         f64,
    pub cargo_type:        CargoType,
    pub cargo_weight_tons: f64,
    pub weather:           Weather,
    pub speed_limit_kmh:   f64,
}

impl DamageInputs {
    /// Negative or NaN magnitudes become zero so they cannot cancel real risk.
    pub fn clamped(
        roughness: f64,
        cargo_type: CargoType,
        cargo_weight_tons: f64,
        weather: Weather,
        speed_limit_kmh: f64,
    ) -> Self {
        Self {
            roughness:         non_negative(roughness),
            cargo_type,
            cargo_weight_tons: non_negative(cargo_weight_tons),
            weather,
            speed_limit_kmh:   non_negative(speed_limit_kmh),
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
}

/// Individual damage terms after amplification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageFactors {
    pub road_damage:      f64,
    pub weather_damage:   f64,
    pub speed_damage:     f64,
    pub weight_damage:    f64,
    pub fragility_factor: f64,
    /// Sum of terms times fragility, before clamping.
    pub raw_risk:         f64,
    pub flags:            RiskFlags,
}

pub fn damage_factors(config: &ScoringConfig, inputs: &DamageInputs) -> DamageFactors {
    let flags = RiskFlags {
        bad_road: inputs.roughness > config.bad_road_threshold,
        wet:      inputs.weather == Weather::Rain,
        speeding: inputs.speed_limit_kmh > config.speeding_threshold_kmh,
        heavy:    inputs.cargo_weight_tons > config.heavy_threshold_tons,
        fragile:  inputs.cargo_type.is_fragile(),
    };

    let road_damage = (inputs.roughness / 10.0) * config.road_weight;
    let mut weather_damage = if flags.wet { config.wet_penalty } else { 0.0 };
    let mut speed_damage =
        (inputs.speed_limit_kmh / config.speed_reference_kmh) * config.speed_weight;
    let weight_damage =
        (inputs.cargo_weight_tons / config.weight_reference_tons) * config.weight_weight;

    // Interactions are independent; both may fire.
    if flags.bad_road && flags.speeding {
        speed_damage *= config.interaction_multiplier;
    }
    if flags.wet && flags.speeding {
        weather_damage *= config.interaction_multiplier;
    }

    let fragility_factor = if flags.fragile {
        config.fragile_factor
    } else {
        config.robust_factor
    };
    let raw_risk =
        (road_damage + weather_damage + speed_damage + weight_damage) * fragility_factor;

    DamageFactors {
        road_damage,
        weather_damage,
        speed_damage,
        weight_damage,
        fragility_factor,
        raw_risk,
        flags,
    }
}

/// Result of the physical stage.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalDamage {
    pub factors:        DamageFactors,
    /// Always within [0, 100].
    pub integrity_lost: f64,
    /// Impact events sampled by a stochastic model; `None` when deterministic.
    pub impact_events:  Option<u32>,
    /// Loss priced against `ScoringConfig::reference_cargo_value`.
    pub reference_loss: f64,
}

impl PhysicalDamage {
    pub fn new(
        config: &ScoringConfig,
        factors: DamageFactors,
        integrity_lost: f64,
        impact_events: Option<u32>,
    ) -> Self {
        let integrity_lost = clamp_integrity(integrity_lost);
        Self {
            factors,
            integrity_lost,
            impact_events,
            reference_loss: config.reference_cargo_value * (integrity_lost / 100.0),
        }
    }
}

pub fn clamp_integrity(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// The contract every physical damage stage must fulfill.
pub trait DamageModel {
    /// Stable name for logging.
    fn name(&self) -> &'static str;

    fn assess(&mut self, config: &ScoringConfig, inputs: &DamageInputs) -> PhysicalDamage;
}

/// Closed-form model: integrity lost is the clamped raw risk.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicDamageModel;

impl DamageModel for DeterministicDamageModel {
    fn name(&self) -> &'static str {
        "deterministic"
    }

    fn assess(&mut self, config: &ScoringConfig, inputs: &DamageInputs) -> PhysicalDamage {
        let factors = damage_factors(config, inputs);
        PhysicalDamage::new(config, factors, factors.raw_risk, None)
    }
}

/// Scale a loss computed against `reference_value` to `actual_value`.
///
/// A non-positive reference value yields zero rather than Inf/NaN.
pub fn rescale_loss(reference_loss: f64, actual_value: f64, reference_value: f64) -> f64 {
    if reference_value <= 0.0 || !reference_value.is_finite() {
        return 0.0;
    }
    reference_loss * actual_value / reference_value
}

/// Monetary stage: attach cargo value and the rescaled loss.
pub fn price(
    config: &ScoringConfig,
    inputs: &DamageInputs,
    physical: &PhysicalDamage,
) -> SimulationResult {
    let f = &physical.factors;
    let total_cargo_value =
        config.cargo_values.value_per_ton(inputs.cargo_type) * inputs.cargo_weight_tons;
    let financial_loss = rescale_loss(
        physical.reference_loss,
        total_cargo_value,
        config.reference_cargo_value,
    );

    SimulationResult {
        road_damage:       f.road_damage,
        weather_damage:    f.weather_damage,
        speed_damage:      f.speed_damage,
        weight_damage:     f.weight_damage,
        fragility_factor:  f.fragility_factor,
        integrity_lost:    physical.integrity_lost,
        cargo_health:      100.0 - physical.integrity_lost,
        total_cargo_value,
        financial_loss,
        flags:             f.flags,
    }
}

/// Run any physical model followed by the monetary stage.
pub fn score_with_model(
    model: &mut dyn DamageModel,
    config: &ScoringConfig,
    inputs: &DamageInputs,
) -> SimulationResult {
    let physical = model.assess(config, inputs);
    log::debug!(
        "{} model: raw_risk={:.2} integrity_lost={:.2} events={:?}",
        model.name(),
        physical.factors.raw_risk,
        physical.integrity_lost,
        physical.impact_events
    );
    price(config, inputs, &physical)
}

/// Deterministic score with explicit configuration.
pub fn score_with(
    config: &ScoringConfig,
    roughness: f64,
    cargo_type: CargoType,
    cargo_weight_tons: f64,
    weather: Weather,
    speed_limit_kmh: f64,
) -> SimulationResult {
    let inputs =
        DamageInputs::clamped(roughness, cargo_type, cargo_weight_tons, weather, speed_limit_kmh);
    score_with_model(&mut DeterministicDamageModel, config, &inputs)
}

/// Deterministic score with the default constants.
pub fn score(
    roughness: f64,
    cargo_type: CargoType,
    cargo_weight_tons: f64,
    weather: Weather,
    speed_limit_kmh: f64,
) -> SimulationResult {
    score_with(
        &ScoringConfig::default(),
        roughness,
        cargo_type,
        cargo_weight_tons,
        weather,
        speed_limit_kmh,
    )
}
