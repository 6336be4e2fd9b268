//! Stochastic impact stage.
//!
//! Simulates a trip as `trip_km` one-kilometre trials. Each trial may
//! produce an impact event with probability proportional to the
//! deterministic raw risk; every event removes a jittered slice of cargo
//! integrity. Expected integrity lost matches the deterministic model
//! below the clamp.
//!
//! The same seed always replays the same trip.

use crate::{
    config::{ImpactConfig, ScoringConfig},
    scoring::{damage_factors, DamageInputs, DamageModel, PhysicalDamage},
};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

pub struct StochasticImpactModel {
    config: ImpactConfig,
    rng:    Pcg64Mcg,
}

impl StochasticImpactModel {
    pub fn new(config: ImpactConfig, rng: Pcg64Mcg) -> Self {
        Self { config, rng }
    }

    pub fn seeded(config: ImpactConfig, seed: u64) -> Self {
        Self::new(config, Pcg64Mcg::seed_from_u64(seed))
    }

    fn trials(&self) -> u32 {
        self.config.trip_km.max(1)
    }

    fn event_probability(&self, raw_risk: f64) -> f64 {
        let p = raw_risk / 100.0 * self.config.events_per_km_at_full_risk;
        if p.is_nan() {
            0.0
        } else {
            p.clamp(0.0, 1.0)
        }
    }

    /// Integrity removed by an event of severity 1.0.
    fn damage_per_event(&self) -> f64 {
        let expected_at_full_risk =
            f64::from(self.trials()) * self.config.events_per_km_at_full_risk;
        if expected_at_full_risk <= 0.0 {
            return 0.0;
        }
        100.0 / expected_at_full_risk
    }
}

impl DamageModel for StochasticImpactModel {
    fn name(&self) -> &'static str {
        "stochastic_impact"
    }

    fn assess(&mut self, config: &ScoringConfig, inputs: &DamageInputs) -> PhysicalDamage {
        let factors = damage_factors(config, inputs);
        let p = self.event_probability(factors.raw_risk);
        let per_event = self.damage_per_event();
        let jitter = self.config.severity_jitter;

        let mut events = 0u32;
        let mut integrity_lost = 0.0;
        for _ in 0..self.trials() {
            if self.rng.gen_bool(p) {
                events += 1;
                integrity_lost += per_event * self.rng.gen_range(1.0 - jitter..=1.0 + jitter);
            }
        }

        log::debug!(
            "{}: p={p:.4} events={events} integrity_lost={integrity_lost:.2}",
            self.name()
        );
        PhysicalDamage::new(config, factors, integrity_lost, Some(events))
    }
}
