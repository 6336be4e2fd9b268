use crate::{
    error::{SimError, SimResult},
    types::{CargoType, Surface},
};
use serde::{Deserialize, Serialize};

// ── Condition projector ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DegradationConfig {
    /// Roughness units gained per year on paved surfaces.
    pub paved_rate_per_year: f64,
    /// Roughness units gained per year on gravel surfaces.
    pub gravel_rate_per_year: f64,
    /// Policy band applied between the projector and the scorer.
    pub roughness_floor: f64,
    pub roughness_ceiling: f64,
}

impl Default for DegradationConfig {
    fn default() -> Self {
        Self {
            paved_rate_per_year:  0.4,
            gravel_rate_per_year: 1.2,
            roughness_floor:      1.0,
            roughness_ceiling:    10.0,
        }
    }
}

impl DegradationConfig {
    pub fn rate(&self, surface: Surface) -> f64 {
        match surface {
            Surface::Paved  => self.paved_rate_per_year,
            Surface::Gravel => self.gravel_rate_per_year,
        }
    }
}

// ── Risk & loss scorer ─────────────────────────────────────────────

/// Monetary value per ton of each cargo type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CargoValueTable {
    pub electronics: f64,
    pub produce: f64,
    pub bricks: f64,
}

impl Default for CargoValueTable {
    fn default() -> Self {
        Self {
            electronics: 50_000.0,
            produce:     15_000.0,
            bricks:      5_000.0,
        }
    }
}

impl CargoValueTable {
    pub fn value_per_ton(&self, cargo: CargoType) -> f64 {
        match cargo {
            CargoType::Electronics => self.electronics,
            CargoType::Produce     => self.produce,
            CargoType::Bricks      => self.bricks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Roughness strictly above this is a bad road.
    pub bad_road_threshold: f64,
    /// Speed strictly above this is speeding.
    pub speeding_threshold_kmh: f64,
    /// Weight strictly above this is a heavy load.
    pub heavy_threshold_tons: f64,
    /// Road term: (roughness / 10) * road_weight.
    pub road_weight: f64,
    /// Flat weather term when raining.
    pub wet_penalty: f64,
    /// Speed term: (speed / speed_reference_kmh) * speed_weight.
    pub speed_reference_kmh: f64,
    pub speed_weight: f64,
    /// Weight term: (tons / weight_reference_tons) * weight_weight.
    pub weight_reference_tons: f64,
    pub weight_weight: f64,
    /// Applied to a term when its interaction condition fires.
    pub interaction_multiplier: f64,
    pub fragile_factor: f64,
    pub robust_factor: f64,
    pub cargo_values: CargoValueTable,
    /// Cargo value the physical stage prices its loss against.
    pub reference_cargo_value: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            bad_road_threshold:     4.5,
            speeding_threshold_kmh: 80.0,
            heavy_threshold_tons:   30.0,
            road_weight:            40.0,
            wet_penalty:            15.0,
            speed_reference_kmh:    120.0,
            speed_weight:           20.0,
            weight_reference_tons:  50.0,
            weight_weight:          25.0,
            interaction_multiplier: 1.5,
            fragile_factor:         1.5,
            robust_factor:          0.8,
            cargo_values:           CargoValueTable::default(),
            reference_cargo_value:  1_250_000.0,
        }
    }
}

// ── Stochastic impact stage ────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactConfig {
    /// Number of one-kilometre trials per simulated trip.
    pub trip_km: u32,
    /// Expected impact events per km when raw risk is 100.
    pub events_per_km_at_full_risk: f64,
    /// Severity of each event is drawn from [1 - jitter, 1 + jitter].
    pub severity_jitter: f64,
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            trip_km: 50,
            events_per_km_at_full_risk: 0.4,
            severity_jitter: 0.5,
        }
    }
}

// ── Top level ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub degradation: DegradationConfig,
    pub scoring: ScoringConfig,
    pub impact: ImpactConfig,
}

impl EngineConfig {
    /// Load a JSON config file. Missing fields keep their defaults.
    pub fn load(path: &str) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> SimResult<Self> {
        let config: EngineConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject tables that would make the engine produce nonsense.
    pub fn validate(&self) -> SimResult<()> {
        let d = &self.degradation;
        non_negative("degradation.paved_rate_per_year", d.paved_rate_per_year)?;
        non_negative("degradation.gravel_rate_per_year", d.gravel_rate_per_year)?;
        finite("degradation.roughness_floor", d.roughness_floor)?;
        finite("degradation.roughness_ceiling", d.roughness_ceiling)?;
        if d.roughness_floor > d.roughness_ceiling {
            return Err(SimError::InvalidConfig {
                field: "degradation.roughness_floor",
                reason: format!(
                    "floor {} is above ceiling {}",
                    d.roughness_floor, d.roughness_ceiling
                ),
            });
        }

        let s = &self.scoring;
        positive("scoring.speed_reference_kmh", s.speed_reference_kmh)?;
        positive("scoring.weight_reference_tons", s.weight_reference_tons)?;
        positive("scoring.reference_cargo_value", s.reference_cargo_value)?;
        for (field, value) in [
            ("scoring.bad_road_threshold", s.bad_road_threshold),
            ("scoring.speeding_threshold_kmh", s.speeding_threshold_kmh),
            ("scoring.heavy_threshold_tons", s.heavy_threshold_tons),
            ("scoring.road_weight", s.road_weight),
            ("scoring.wet_penalty", s.wet_penalty),
            ("scoring.speed_weight", s.speed_weight),
            ("scoring.weight_weight", s.weight_weight),
            ("scoring.interaction_multiplier", s.interaction_multiplier),
            ("scoring.fragile_factor", s.fragile_factor),
            ("scoring.robust_factor", s.robust_factor),
            ("scoring.cargo_values.electronics", s.cargo_values.electronics),
            ("scoring.cargo_values.produce", s.cargo_values.produce),
            ("scoring.cargo_values.bricks", s.cargo_values.bricks),
        ] {
            non_negative(field, value)?;
        }

        let i = &self.impact;
        if i.trip_km == 0 {
            return Err(SimError::InvalidConfig {
                field: "impact.trip_km",
                reason: "must be at least 1".into(),
            });
        }
        positive("impact.events_per_km_at_full_risk", i.events_per_km_at_full_risk)?;
        if !(0.0..=1.0).contains(&i.severity_jitter) {
            return Err(SimError::InvalidConfig {
                field: "impact.severity_jitter",
                reason: format!("{} is outside [0, 1]", i.severity_jitter),
            });
        }
        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> SimResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidConfig { field, reason: format!("{value} is not finite") })
    }
}

fn non_negative(field: &'static str, value: f64) -> SimResult<()> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(SimError::InvalidConfig { field, reason: format!("{value} is negative") });
    }
    Ok(())
}

fn positive(field: &'static str, value: f64) -> SimResult<()> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(SimError::InvalidConfig { field, reason: format!("{value} must be > 0") });
    }
    Ok(())
}
