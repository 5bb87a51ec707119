//! Signalized intersection simulation
//!
//! This module contains the per-second intersection engine and the Monte
//! Carlo harness that scores signal plans with it. Nothing in here does I/O;
//! the command line front end and any live display sit on top of it.

mod cycle;
mod engine;
mod error;
mod evaluator;
mod sweep;
mod types;

pub use cycle::SignalCycle;
pub use engine::{Engine, Snapshot};
pub use error::{SimError, SimResult};
pub use evaluator::{evaluate, run_single, DelayMetrics, Evaluator};
pub use sweep::{min_pedestrian_delay, min_vehicle_delay, sweep, PlanGrid, SweepResult};
pub use types::{
    ArrivalRates, Movement, Phase, SignalPlan, DEFAULT_EW_GREEN, DEFAULT_HORIZON, DEFAULT_LOST,
    DEFAULT_NS_GREEN, DEFAULT_PED, DEFAULT_P_EW, DEFAULT_P_NS, DEFAULT_P_PED, DEFAULT_RUNS,
};
