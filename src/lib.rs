//! Density solvers for Helmholtz energy equations of state.
//!
//! For a given temperature, pressure and composition, the solvers in this
//! crate find the density that satisfies the equation of state. If the
//! pressure-density isotherm shows a van der Waals loop, the root on the
//! requested [Phase] is returned, or an [DensityError::InfeasiblePhase] if
//! that branch does not exist at the specified conditions.
//!
//! Two solvers are provided:
//! - [density_bracketing] classifies the shape of the isotherm, brackets the
//!   root and converges it with Brent's method. Use it if no initial guess
//!   is available.
//! - [density_newton] refines a good initial guess with a Newton iteration.
//!
//! Any model that implements [HelmholtzModel] can be used. The [cubic] and
//! [pcsaft] modules contain reference implementations.
#![warn(clippy::all)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::many_single_char_names)]

/// Print messages with level `Verbosity::Iter` or higher.
#[macro_export]
macro_rules! log_iter {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::Verbosity::Iter {
            println!($($arg)*);
        }
    }
}

/// Print messages with level `Verbosity::Result` or higher.
#[macro_export]
macro_rules! log_result {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::Verbosity::Result {
            println!($($arg)*);
        }
    }
}

pub mod constants;
pub mod cubic;
mod density;
mod errors;
pub mod evaluate;
mod model;
pub mod numerics;
pub mod parameter;
pub mod pcsaft;

pub use density::{
    density, density_bracketing, density_newton, density_stable, spinodal, CurveShape,
    DensityInitialization, Phase, Refinement, Spinodal, Status,
};
pub use errors::{DensityError, DensityResult};
pub use model::HelmholtzModel;

/// Level of detail in the iteration output.
#[derive(Copy, Clone, PartialOrd, PartialEq, Eq, Debug, Default)]
pub enum Verbosity {
    /// Do not print output.
    #[default]
    None,
    /// Print information about the success or failure of the iteration.
    Result,
    /// Print a detailed output for every iteration.
    Iter,
}

/// Options for the density solvers.
///
/// If the values are [None], solver specific default
/// values are used.
#[derive(Copy, Clone, Default, Debug)]
pub struct SolverOptions {
    /// Maximum number of iterations.
    pub max_iter: Option<usize>,
    /// Tolerance.
    pub tol: Option<f64>,
    /// Iteration output indicated by the [Verbosity] enum.
    pub verbosity: Verbosity,
}

impl From<(Option<usize>, Option<f64>, Option<Verbosity>)> for SolverOptions {
    fn from(options: (Option<usize>, Option<f64>, Option<Verbosity>)) -> Self {
        Self {
            max_iter: options.0,
            tol: options.1,
            verbosity: options.2.unwrap_or(Verbosity::None),
        }
    }
}

impl SolverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = Some(max_iter);
        self
    }

    pub fn tol(mut self, tol: f64) -> Self {
        self.tol = Some(tol);
        self
    }

    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn unwrap_or(self, max_iter: usize, tol: f64) -> (usize, f64, Verbosity) {
        (
            self.max_iter.unwrap_or(max_iter),
            self.tol.unwrap_or(tol),
            self.verbosity,
        )
    }
}
