//! The fixed phase cycle derived from a signal plan

use super::types::{Phase, SignalPlan};

/// Number of phases in every cycle
pub const CYCLE_PHASES: usize = 5;

/// Ordered `(phase, duration)` pairs, built once per plan.
///
/// Advancing the signal is index arithmetic on this sequence; the order is
/// never re-derived from the phase itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalCycle {
    entries: [(Phase, u32); CYCLE_PHASES],
}

impl SignalCycle {
    pub fn from_plan(plan: &SignalPlan) -> Self {
        Self {
            entries: [
                (Phase::NsGreen, plan.ns_green),
                (Phase::Lost1, plan.lost),
                (Phase::EwGreen, plan.ew_green),
                (Phase::Lost2, plan.lost),
                (Phase::Ped, plan.ped),
            ],
        }
    }

    /// Phase and duration at `index`, wrapping around the cycle
    pub fn entry(&self, index: usize) -> (Phase, u32) {
        self.entries[index % CYCLE_PHASES]
    }

    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % CYCLE_PHASES
    }

    /// Total seconds in one cycle
    pub fn length(&self) -> u64 {
        self.entries.iter().map(|&(_, seconds)| u64::from(seconds)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Phase, u32)> + '_ {
        self.entries.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_order_and_wrap() {
        let plan = SignalPlan::new(20, 15, 3, 10).unwrap();
        let cycle = SignalCycle::from_plan(&plan);

        let phases: Vec<Phase> = cycle.iter().map(|(phase, _)| phase).collect();
        assert_eq!(
            phases,
            vec![
                Phase::NsGreen,
                Phase::Lost1,
                Phase::EwGreen,
                Phase::Lost2,
                Phase::Ped
            ]
        );
        assert_eq!(cycle.entry(1), (Phase::Lost1, 3));
        assert_eq!(cycle.entry(3), (Phase::Lost2, 3));
        assert_eq!(cycle.next_index(4), 0);
        assert_eq!(cycle.entry(5), (Phase::NsGreen, 20));
    }

    #[test]
    fn test_cycle_length_matches_plan() {
        let plan = SignalPlan::new(7, 11, 2, 5).unwrap();
        let cycle = SignalCycle::from_plan(&plan);
        assert_eq!(cycle.length(), plan.cycle_length());
        assert_eq!(cycle.length(), 27);

        let plan = SignalPlan::new(u32::MAX, 1, 1, 1).unwrap();
        let cycle = SignalCycle::from_plan(&plan);
        assert_eq!(cycle.length(), plan.cycle_length());
        assert_eq!(cycle.length(), 4_294_967_299);
    }
}
