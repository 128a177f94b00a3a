//! Scalar root finding and minimization on bounded intervals.
//!
//! Both methods go back to
//! [Brent (1973)](https://maths-people.anu.edu.au/~brent/pub/pub011.html):
//! - [brent_root] combines bisection, secant steps and inverse quadratic
//!   interpolation and never leaves the initial bracket.
//! - [bounded_minimum] combines golden section search with successive
//!   parabolic interpolation.
mod minimize;
mod root;

pub use minimize::{bounded_minimum, Minimum};
pub use root::brent_root;

/// Indicates whether an iteration converged or hit the iteration limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Converged according to the configured tolerance.
    Converged,
    /// Reached the iteration limit without converging.
    MaxIterations,
}

impl Status {
    pub fn is_converged(&self) -> bool {
        matches!(self, Self::Converged)
    }
}
