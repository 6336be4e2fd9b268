//! `roadsim-core`: scenario simulation and chart geometry for road
//! investment planning.
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`projector`] | Roughness projection, visual condition index, clamps  |
//! | [`scoring`]   | Risk & loss scorer (physical + monetary stages)       |
//! | [`impact`]    | Seeded stochastic impact stage                        |
//! | [`narrative`] | Rule-based explanation of a scored trip               |
//! | [`curve`]     | Linear / Catmull-Rom path geometry                    |
//! | [`forecast`]  | Backend forecast records to projection points         |
//! | [`engine`]    | Memoised "inputs changed" entry point                 |
//! | [`config`]    | Named, overridable constants                          |

pub mod config;
pub mod curve;
pub mod engine;
pub mod error;
pub mod forecast;
pub mod impact;
pub mod narrative;
pub mod projector;
pub mod scoring;
pub mod types;

pub use config::EngineConfig;
pub use engine::{ScenarioEngine, TripInputs, TripReport};
pub use error::{SimError, SimResult};
