//! Narrative composer: turns scorer factors into a sentence.

use crate::types::SimulationResult;

/// Health strictly above this reads as a successful trip.
pub const SUCCESS_HEALTH_THRESHOLD: f64 = 90.0;
/// Road term strictly above this is called out.
pub const ROUGH_SURFACE_DAMAGE: f64 = 20.0;
/// Integrity loss strictly above this blames fragile cargo.
pub const FRAGILITY_LOSS: f64 = 20.0;

pub const SUCCESS_MESSAGE: &str =
    "Successful transport. Cargo arrived within acceptable condition.";

/// Used when a trip failed but no single factor crossed its trigger.
pub const MINOR_FACTORS_FALLBACK: &str = "combined minor stressors (no single dominant factor)";

/// Triggered factor descriptions, in fixed order.
pub fn failure_factors(result: &SimulationResult, roughness: f64) -> Vec<String> {
    let flags = &result.flags;
    let mut factors = Vec::new();

    if result.road_damage > ROUGH_SURFACE_DAMAGE {
        factors.push(format!("rough surface (roughness {roughness:.1})"));
    }
    if flags.wet && flags.speeding {
        factors.push("traction loss (rain + speed)".to_string());
    }
    if flags.heavy && flags.bad_road {
        factors.push("excessive load on poor pavement".to_string());
    }
    if flags.fragile && result.integrity_lost > FRAGILITY_LOSS {
        factors.push("cargo fragility".to_string());
    }
    factors
}

pub fn explain(result: &SimulationResult, roughness: f64) -> String {
    if result.cargo_health > SUCCESS_HEALTH_THRESHOLD {
        return SUCCESS_MESSAGE.to_string();
    }

    let factors = failure_factors(result, roughness);
    let vectors = if factors.is_empty() {
        MINOR_FACTORS_FALLBACK.to_string()
    } else {
        factors.join(" + ")
    };

    format!(
        "Logistics failure detected. Primary failure vectors: {vectors}. \
         Recommendation: improve pavement quality or reduce transport speed."
    )
}
