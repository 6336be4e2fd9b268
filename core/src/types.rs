//! Shared value types used across the engine.
//!
//! Every type here is an immutable snapshot built from the caller's
//! current inputs. Nothing has identity; equality is by value.

use serde::{Deserialize, Serialize};

/// Whole years since the reference year.
pub type ElapsedYears = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Paved,
    Gravel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CargoType {
    Electronics,
    Produce,
    Bricks,
}

impl CargoType {
    /// Damage-sensitive cargo gets the heavier fragility multiplier.
    pub fn is_fragile(&self) -> bool {
        matches!(self, Self::Electronics | Self::Produce)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Electronics => "electronics",
            Self::Produce     => "produce",
            Self::Bricks      => "bricks",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    Sunny,
    Rain,
}

/// The road segment under evaluation, as supplied by the calling screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadSegmentState {
    pub baseline_roughness: f64,
    pub surface:            Surface,
    pub width_meters:       f64,
    pub name:               String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveConditions {
    pub cargo_type:        CargoType,
    pub cargo_weight_tons: f64,
    pub weather:           Weather,
    pub speed_limit_kmh:   f64,
}

/// Booleans derived from the scorer inputs. The narrative reads these
/// instead of re-deriving thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFlags {
    pub bad_road: bool,
    pub wet:      bool,
    pub speeding: bool,
    pub heavy:    bool,
    pub fragile:  bool,
}

/// Output of the risk & loss scorer.
///
/// `cargo_health` is always exactly `100 - integrity_lost`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub road_damage:       f64,
    pub weather_damage:    f64,
    pub speed_damage:      f64,
    pub weight_damage:     f64,
    pub fragility_factor:  f64,
    pub integrity_lost:    f64,
    pub cargo_health:      f64,
    pub total_cargo_value: f64,
    pub financial_loss:    f64,
    pub flags:             RiskFlags,
}

/// One forecast year carrying both scenario values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyProjectionPoint {
    pub year_index:       u32,
    pub funded_value:     f64,
    pub do_nothing_value: f64,
}

/// Which scenario column of a projection series to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Funded,
    DoNothing,
}

impl YearlyProjectionPoint {
    pub fn value(&self, scenario: Scenario) -> f64 {
        match scenario {
            Scenario::Funded    => self.funded_value,
            Scenario::DoNothing => self.do_nothing_value,
        }
    }
}

/// A record as returned by the backend forecast API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub year:                   i32,
    pub avg_condition_index:    f64,
    #[serde(default)]
    pub total_maintenance_cost: f64,
}
