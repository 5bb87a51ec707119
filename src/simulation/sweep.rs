//! Grid sweep over signal plans
//!
//! Scores every plan of a grid with the same evaluator and picks out the
//! plans at the two ends of the vehicle/pedestrian trade-off.

use log::{info, warn};
use ordered_float::OrderedFloat;

use super::error::SimResult;
use super::evaluator::{DelayMetrics, Evaluator};
use super::types::{SignalPlan, DEFAULT_LOST};

/// Candidate durations for each phase; the clearance time is held fixed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanGrid {
    pub ns_green: Vec<u32>,
    pub ew_green: Vec<u32>,
    pub ped: Vec<u32>,
    pub lost: u32,
}

impl Default for PlanGrid {
    fn default() -> Self {
        Self {
            ns_green: (10..=30).step_by(5).collect(),
            ew_green: (10..=30).step_by(5).collect(),
            ped: (5..30).step_by(3).collect(),
            lost: DEFAULT_LOST,
        }
    }
}

impl PlanGrid {
    pub fn len(&self) -> usize {
        self.ped.len() * self.ns_green.len() * self.ew_green.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every plan of the grid: pedestrian time outermost, then NS, then EW
    pub fn plans(&self) -> impl Iterator<Item = SignalPlan> + '_ {
        self.ped.iter().flat_map(move |&ped| {
            self.ns_green.iter().flat_map(move |&ns_green| {
                self.ew_green.iter().map(move |&ew_green| SignalPlan {
                    ns_green,
                    ew_green,
                    lost: self.lost,
                    ped,
                })
            })
        })
    }
}

/// One evaluated plan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepResult {
    pub plan: SignalPlan,
    pub metrics: DelayMetrics,
}

/// Evaluate every plan in `grid`, in grid order
pub fn sweep(evaluator: &Evaluator, grid: &PlanGrid) -> SimResult<Vec<SweepResult>> {
    evaluator.validate()?;
    if grid.is_empty() {
        warn!("Plan grid is empty; nothing to sweep");
        return Ok(Vec::new());
    }

    let mut results = Vec::with_capacity(grid.len());
    for plan in grid.plans() {
        plan.validate()?;
        #[cfg(feature = "parallel")]
        let metrics = evaluator.evaluate_parallel(&plan)?;
        #[cfg(not(feature = "parallel"))]
        let metrics = evaluator.evaluate(&plan)?;
        results.push(SweepResult { plan, metrics });
    }

    info!(
        "Swept {} plans ({} runs x {}s each)",
        results.len(),
        evaluator.runs,
        evaluator.horizon
    );
    Ok(results)
}

/// Plan with the lowest mean vehicle delay; the first one wins ties
pub fn min_vehicle_delay(results: &[SweepResult]) -> Option<&SweepResult> {
    min_by_metric(results, |m| m.vehicle)
}

/// Plan with the lowest mean pedestrian delay; the first one wins ties
pub fn min_pedestrian_delay(results: &[SweepResult]) -> Option<&SweepResult> {
    min_by_metric(results, |m| m.pedestrian)
}

fn min_by_metric(
    results: &[SweepResult],
    metric: impl Fn(&DelayMetrics) -> f64,
) -> Option<&SweepResult> {
    results
        .iter()
        .min_by_key(|r| OrderedFloat(metric(&r.metrics)))
}
