use thiserror::Error;

/// Invalid arguments rejected when an engine or an experiment is set up.
///
/// Stepping a constructed engine never fails, so every variant here is a
/// caller mistake caught before the first simulated second.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("phase duration `{field}` must be at least one second")]
    ZeroDuration { field: &'static str },

    #[error("arrival probability `{field}` = {value} is outside [0, 1]")]
    ProbabilityOutOfRange { field: &'static str, value: f64 },

    #[error("simulation horizon must be at least one second")]
    ZeroHorizon,

    #[error("number of runs must be at least one")]
    ZeroRuns,
}

pub type SimResult<T> = Result<T, SimError>;
