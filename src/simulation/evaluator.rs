//! Monte Carlo evaluation of signal plans
//!
//! Each run drives a fresh engine for a fixed horizon with its own seeded
//! random stream; seeds are the run indices `0..runs`, so every plan is
//! compared against the same arrival sequences.

use log::{debug, info};

use super::engine::Engine;
use super::error::{SimError, SimResult};
use super::types::{ArrivalRates, SignalPlan, DEFAULT_HORIZON, DEFAULT_RUNS};

/// Time-averaged delays of one run, or their mean over many runs
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DelayMetrics {
    /// Average number of queued vehicles per second
    pub vehicle: f64,
    /// Average number of waiting pedestrians per second
    pub pedestrian: f64,
}

impl DelayMetrics {
    /// Arithmetic mean of each metric, summed in slice order
    pub fn mean(samples: &[DelayMetrics]) -> DelayMetrics {
        if samples.is_empty() {
            return DelayMetrics::default();
        }
        let n = samples.len() as f64;
        let (vehicle, pedestrian) = samples
            .iter()
            .fold((0.0, 0.0), |(v, p), m| (v + m.vehicle, p + m.pedestrian));
        DelayMetrics {
            vehicle: vehicle / n,
            pedestrian: pedestrian / n,
        }
    }
}

/// Fixed experiment parameters used to score plans as a black box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluator {
    pub rates: ArrivalRates,
    /// Simulated seconds per run
    pub horizon: u32,
    /// Number of seeded runs averaged per plan
    pub runs: u32,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self {
            rates: ArrivalRates::default(),
            horizon: DEFAULT_HORIZON,
            runs: DEFAULT_RUNS,
        }
    }
}

impl Evaluator {
    pub fn new(rates: ArrivalRates, horizon: u32, runs: u32) -> SimResult<Self> {
        let evaluator = Self {
            rates,
            horizon,
            runs,
        };
        evaluator.validate()?;
        Ok(evaluator)
    }

    pub fn validate(&self) -> SimResult<()> {
        self.rates.validate()?;
        if self.horizon == 0 {
            return Err(SimError::ZeroHorizon);
        }
        if self.runs == 0 {
            return Err(SimError::ZeroRuns);
        }
        Ok(())
    }

    /// Drive one engine seeded with `seed` for the full horizon
    pub fn run_single(&self, plan: &SignalPlan, seed: u64) -> SimResult<DelayMetrics> {
        if self.horizon == 0 {
            return Err(SimError::ZeroHorizon);
        }

        let mut engine = Engine::with_seed(*plan, self.rates, seed)?;
        for _ in 0..self.horizon {
            engine.step();
        }

        let snap = engine.snapshot();
        let horizon = f64::from(self.horizon);
        let metrics = DelayMetrics {
            vehicle: snap.vehicle_delay as f64 / horizon,
            pedestrian: snap.ped_delay as f64 / horizon,
        };
        debug!(
            "{} seed={} vehicle={:.3} ped={:.3}",
            plan, seed, metrics.vehicle, metrics.pedestrian
        );
        Ok(metrics)
    }

    /// Mean delays over seeds `0..runs`, one run after another
    pub fn evaluate(&self, plan: &SignalPlan) -> SimResult<DelayMetrics> {
        self.validate()?;
        plan.validate()?;

        let samples = (0..u64::from(self.runs))
            .map(|seed| self.run_single(plan, seed))
            .collect::<SimResult<Vec<_>>>()?;

        Ok(self.summarize(plan, &samples))
    }

    /// Same result as [`Evaluator::evaluate`], with runs spread over the
    /// rayon thread pool
    #[cfg(feature = "parallel")]
    pub fn evaluate_parallel(&self, plan: &SignalPlan) -> SimResult<DelayMetrics> {
        use rayon::prelude::*;

        self.validate()?;
        plan.validate()?;

        // Collected in seed order so the mean is summed exactly as in `evaluate`
        let samples = (0..u64::from(self.runs))
            .into_par_iter()
            .map(|seed| self.run_single(plan, seed))
            .collect::<SimResult<Vec<_>>>()?;

        Ok(self.summarize(plan, &samples))
    }

    fn summarize(&self, plan: &SignalPlan, samples: &[DelayMetrics]) -> DelayMetrics {
        let mean = DelayMetrics::mean(samples);
        info!(
            "{} | {} runs x {}s | vehicle={:.2} ped={:.2}",
            plan, self.runs, self.horizon, mean.vehicle, mean.pedestrian
        );
        mean
    }
}

/// Time-averaged delays of a single seeded run
pub fn run_single(
    plan: &SignalPlan,
    rates: &ArrivalRates,
    horizon: u32,
    seed: u64,
) -> SimResult<DelayMetrics> {
    let evaluator = Evaluator {
        rates: *rates,
        horizon,
        runs: 1,
    };
    evaluator.run_single(plan, seed)
}

/// Mean time-averaged delays over `runs` runs seeded `0..runs`
pub fn evaluate(
    plan: &SignalPlan,
    rates: &ArrivalRates,
    horizon: u32,
    runs: u32,
) -> SimResult<DelayMetrics> {
    Evaluator::new(*rates, horizon, runs)?.evaluate(plan)
}
