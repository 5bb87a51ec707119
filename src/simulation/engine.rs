//! Discrete-time engine for a single signalized intersection
//!
//! One call to [`Engine::step`] advances the intersection by exactly one
//! second. Everything outside the engine (live display, evaluation, sweeps)
//! observes it only through the [`Snapshot`] value it returns.

use std::fmt;

use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::cycle::SignalCycle;
use super::error::SimResult;
use super::types::{ArrivalRates, Phase, SignalPlan};

/// Read-only copy of the observable engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    /// Seconds elapsed
    pub clock: u64,
    pub phase: Phase,
    pub phase_time_left: u32,
    pub queue_ns: u64,
    pub queue_ew: u64,
    /// Running sum of both vehicle queues, one term per second
    pub vehicle_delay: u64,
    pub ped_queue: u64,
    /// Running sum of the pedestrian queue, one term per second
    pub ped_delay: u64,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>5}s {:<8} ({:>2}s left) | NS queue={:>3} EW queue={:>3} veh delay={:>7} | ped queue={:>3} ped delay={:>7}",
            self.clock,
            self.phase.name(),
            self.phase_time_left,
            self.queue_ns,
            self.queue_ew,
            self.vehicle_delay,
            self.ped_queue,
            self.ped_delay
        )
    }
}

/// State of one intersection over one simulation run.
///
/// The engine owns its random source, so independent runs never share
/// generator state.
#[derive(Debug, Clone)]
pub struct Engine<R = StdRng> {
    rates: ArrivalRates,
    cycle: SignalCycle,
    rng: R,

    clock: u64,
    queue_ns: u64,
    queue_ew: u64,
    ped_queue: u64,
    vehicle_delay: u64,
    ped_delay: u64,

    cycle_idx: usize,
    phase: Phase,
    phase_time_left: u32,
}

impl Engine<StdRng> {
    /// Create an engine whose arrivals come from a `StdRng` seeded with `seed`
    pub fn with_seed(plan: SignalPlan, rates: ArrivalRates, seed: u64) -> SimResult<Self> {
        Self::new(plan, rates, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Engine<R> {
    /// Create an engine at time zero with empty queues, at the start of the
    /// first phase of the cycle
    pub fn new(plan: SignalPlan, rates: ArrivalRates, rng: R) -> SimResult<Self> {
        plan.validate()?;
        rates.validate()?;

        let cycle = SignalCycle::from_plan(&plan);
        let (phase, phase_time_left) = cycle.entry(0);

        Ok(Self {
            rates,
            cycle,
            rng,
            clock: 0,
            queue_ns: 0,
            queue_ew: 0,
            ped_queue: 0,
            vehicle_delay: 0,
            ped_delay: 0,
            cycle_idx: 0,
            phase,
            phase_time_left,
        })
    }

    /// Advance the intersection by one second.
    ///
    /// Order: clock, arrivals, delay accumulation, service under the phase
    /// that was active at the start of the second, then phase transition.
    pub fn step(&mut self) -> Snapshot {
        self.clock += 1;
        // Never underflows: a phase always has at least one second left here
        self.phase_time_left -= 1;

        // Three independent draws every second, always in this order
        if self.arrives(self.rates.p_ns) {
            self.queue_ns += 1;
        }
        if self.arrives(self.rates.p_ew) {
            self.queue_ew += 1;
        }
        if self.arrives(self.rates.p_ped) {
            self.ped_queue += 1;
        }

        self.vehicle_delay += self.queue_ns + self.queue_ew;
        self.ped_delay += self.ped_queue;

        match self.phase {
            // Saturation flow of one vehicle per green second
            Phase::NsGreen => self.queue_ns = self.queue_ns.saturating_sub(1),
            Phase::EwGreen => self.queue_ew = self.queue_ew.saturating_sub(1),
            // Everyone waiting crosses, every second of the phase
            Phase::Ped => self.ped_queue = 0,
            Phase::Lost1 | Phase::Lost2 => {}
        }

        if self.phase_time_left == 0 {
            self.advance_phase();
        }

        self.snapshot()
    }

    /// Current observable state; does not mutate the engine
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            clock: self.clock,
            phase: self.phase,
            phase_time_left: self.phase_time_left,
            queue_ns: self.queue_ns,
            queue_ew: self.queue_ew,
            vehicle_delay: self.vehicle_delay,
            ped_queue: self.ped_queue,
            ped_delay: self.ped_delay,
        }
    }

    fn arrives(&mut self, probability: f64) -> bool {
        self.rng.random::<f64>() < probability
    }

    fn advance_phase(&mut self) {
        let previous = self.phase;
        self.cycle_idx = self.cycle.next_index(self.cycle_idx);
        let (phase, duration) = self.cycle.entry(self.cycle_idx);
        self.phase = phase;
        self.phase_time_left = duration;
        trace!(
            "t={}s phase {} -> {} for {}s",
            self.clock,
            previous,
            phase,
            duration
        );
    }
}
