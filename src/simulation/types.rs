//! Core types for the signal simulation
//!
//! Plain value types shared by the engine, the evaluator and the sweep.

use std::fmt;

use super::error::{SimError, SimResult};

/// Reference plan: NS green seconds
pub const DEFAULT_NS_GREEN: u32 = 20;
/// Reference plan: EW green seconds
pub const DEFAULT_EW_GREEN: u32 = 20;
/// Reference plan: clearance seconds, applied twice per cycle
pub const DEFAULT_LOST: u32 = 3;
/// Reference plan: pedestrian phase seconds
pub const DEFAULT_PED: u32 = 10;

pub const DEFAULT_P_NS: f64 = 0.3;
pub const DEFAULT_P_EW: f64 = 0.3;
pub const DEFAULT_P_PED: f64 = 0.2;

/// Seconds simulated per Monte Carlo run
pub const DEFAULT_HORIZON: u32 = 1800;
/// Monte Carlo runs per evaluated plan
pub const DEFAULT_RUNS: u32 = 20;

/// A fixed signal-timing plan, all durations in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignalPlan {
    pub ns_green: u32,
    pub ew_green: u32,
    /// Duration of each of the two clearance phases
    pub lost: u32,
    pub ped: u32,
}

impl Default for SignalPlan {
    fn default() -> Self {
        Self {
            ns_green: DEFAULT_NS_GREEN,
            ew_green: DEFAULT_EW_GREEN,
            lost: DEFAULT_LOST,
            ped: DEFAULT_PED,
        }
    }
}

impl SignalPlan {
    /// Build a plan, rejecting any zero duration
    pub fn new(ns_green: u32, ew_green: u32, lost: u32, ped: u32) -> SimResult<Self> {
        let plan = Self {
            ns_green,
            ew_green,
            lost,
            ped,
        };
        plan.validate()?;
        Ok(plan)
    }

    pub fn validate(&self) -> SimResult<()> {
        let fields = [
            ("ns_green", self.ns_green),
            ("ew_green", self.ew_green),
            ("lost", self.lost),
            ("ped", self.ped),
        ];
        for (field, seconds) in fields {
            if seconds == 0 {
                return Err(SimError::ZeroDuration { field });
            }
        }
        Ok(())
    }

    /// Length of one full cycle; the clearance time counts twice
    pub fn cycle_length(&self) -> u64 {
        u64::from(self.ns_green)
            + u64::from(self.ew_green)
            + 2 * u64::from(self.lost)
            + u64::from(self.ped)
    }
}

impl fmt::Display for SignalPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NS={:2} EW={:2} LOST={:2} PED={:2}",
            self.ns_green, self.ew_green, self.lost, self.ped
        )
    }
}

/// Per-second Bernoulli arrival probabilities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrivalRates {
    pub p_ns: f64,
    pub p_ew: f64,
    pub p_ped: f64,
}

impl Default for ArrivalRates {
    fn default() -> Self {
        Self {
            p_ns: DEFAULT_P_NS,
            p_ew: DEFAULT_P_EW,
            p_ped: DEFAULT_P_PED,
        }
    }
}

impl ArrivalRates {
    pub fn new(p_ns: f64, p_ew: f64, p_ped: f64) -> SimResult<Self> {
        let rates = Self { p_ns, p_ew, p_ped };
        rates.validate()?;
        Ok(rates)
    }

    /// Every probability must be a finite value in `[0, 1]`
    pub fn validate(&self) -> SimResult<()> {
        let fields = [("p_ns", self.p_ns), ("p_ew", self.p_ew), ("p_ped", self.p_ped)];
        for (field, value) in fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimError::ProbabilityOutOfRange { field, value });
            }
        }
        Ok(())
    }
}

/// A movement that can hold the right of way
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Movement {
    /// North-south vehicle traffic
    NorthSouth,
    /// East-west vehicle traffic
    EastWest,
    /// Pedestrians crossing
    Pedestrian,
}

/// One interval of the signal cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    NsGreen,
    /// All-red clearance after NS green
    Lost1,
    EwGreen,
    /// All-red clearance after EW green
    Lost2,
    Ped,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::NsGreen => "NS_GREEN",
            Phase::Lost1 => "LOST_1",
            Phase::EwGreen => "EW_GREEN",
            Phase::Lost2 => "LOST_2",
            Phase::Ped => "PED",
        }
    }

    /// The movement allowed to proceed, or `None` during clearance
    pub fn right_of_way(self) -> Option<Movement> {
        match self {
            Phase::NsGreen => Some(Movement::NorthSouth),
            Phase::EwGreen => Some(Movement::EastWest),
            Phase::Ped => Some(Movement::Pedestrian),
            Phase::Lost1 | Phase::Lost2 => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
