use crate::density::Phase;
use crate::parameter::ParameterError;
use thiserror::Error;

/// Error type for improperly defined states and convergence problems.
#[derive(Error, Debug)]
pub enum DensityError {
    #[error("`{0}` did not converge within the maximum number of iterations.")]
    NotConverged(String),
    #[error("`{0}` encountered illegal values during the iteration.")]
    IterationFailed(String),
    #[error("No {0} density exists at the specified temperature and pressure.")]
    InfeasiblePhase(Phase),
    #[error("No mechanically stable upper density bound found within {0} attempts.")]
    UpperBracketNotFound(usize),
    #[error("The interval [{lower}, {upper}] does not bracket a root.")]
    NoSignChange { lower: f64, upper: f64 },
    #[error("Equation of state is initialized for {0} components while the input specifies {1} components.")]
    IncompatibleComponents(usize, usize),
    #[error("Mole fractions have to be in [0, 1] and sum up to 1, got a sum of {0}.")]
    InvalidMolefracs(f64),
    #[error("Invalid state in {0}: {1} = {2}.")]
    InvalidState(String, String, f64),
    #[error("Undetermined state: {0}.")]
    UndeterminedState(String),
    #[error("System is supercritical.")]
    SuperCritical,
    #[error(transparent)]
    ParameterError(#[from] ParameterError),
}

/// Convenience type for `Result<T, DensityError>`.
pub type DensityResult<T> = Result<T, DensityError>;
