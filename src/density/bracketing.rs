//! Bracketing density solver.
//!
//! The solver never leaves an interval that is known to contain the
//! requested root:
//! 1. The lower bound is a density close to the ideal gas limit. The upper
//!    bound is a mechanically stable density with a pressure above the target,
//!    searched for in steps of 10% of the close-packing density.
//! 2. The shape of the isotherm is classified from the curvature at low
//!    density. If it bends down, the minimum of $\frac{\partial p}{\partial\rho}$
//!    is located. A negative minimum indicates a van der Waals loop.
//! 3. On a loop, the bracket is restricted to the side of the requested phase
//!    and the spinodal, i.e., the local extremum of the pressure, is located.
//!    If the target pressure lies beyond the spinodal pressure, the requested
//!    phase does not exist.
//! 4. The root is converged with Brent's method.
use super::{validate_state, Phase};
use crate::constants::RGAS;
use crate::errors::{DensityError, DensityResult};
use crate::evaluate::{pressure_objective, pressure_slope};
use crate::model::HelmholtzModel;
use crate::numerics::{bounded_minimum, brent_root};
use crate::{SolverOptions, Verbosity};
use ndarray::Array1;
use std::fmt;

/// Molar density in mol/m³ that represents the ideal gas limit.
const DENSITY_IDEAL_GAS_LIMIT: f64 = 1e-5;
const UPPER_BOUND_START: f64 = 0.4;
const UPPER_BOUND_STEP: f64 = 0.1;
const MAX_UPPER_BOUND_ATTEMPTS: usize = 5;
const CURVATURE_PROBE: f64 = 1e-4;

/// Classification of a pressure-density isotherm during a density iteration.
///
/// Transitions:
/// - `Unclassified` → `Monotonic` | `SearchInflection`
/// - `SearchInflection` → `Monotonic` | `Inflection`
/// - `Inflection` → `Feasible` | `Infeasible`
///
/// `Monotonic` and `Feasible` are followed by the final root search,
/// `Infeasible` terminates the iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CurveShape {
    Unclassified,
    /// The isotherm has a single root in the bracket.
    Monotonic,
    /// The isotherm bends down at low density.
    SearchInflection,
    /// The isotherm has a van der Waals loop with the inflection point at the
    /// given density.
    Inflection(f64),
    /// The requested phase exists; the bracket is bounded by the spinodal at
    /// the given density.
    Feasible(f64),
    /// The spinodal at the given density lies on the wrong side of the
    /// target pressure.
    Infeasible(f64),
}

impl fmt::Display for CurveShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unclassified => write!(f, "unclassified"),
            Self::Monotonic => write!(f, "monotonic"),
            Self::SearchInflection => write!(f, "search inflection"),
            Self::Inflection(rho) => write!(f, "inflection at {rho:.6e}"),
            Self::Feasible(rho) => write!(f, "feasible, spinodal at {rho:.6e}"),
            Self::Infeasible(rho) => write!(f, "infeasible, spinodal at {rho:.6e}"),
        }
    }
}

/// Density interval that only ever shrinks.
#[derive(Clone, Copy, Debug)]
struct Bracket {
    lower: f64,
    upper: f64,
}

impl Bracket {
    fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Discard all densities on the other side of `density` than `phase`.
    fn restrict(&mut self, phase: Phase, density: f64) {
        match phase {
            Phase::Liquid => self.lower = self.lower.max(density),
            Phase::Vapor => self.upper = self.upper.min(density),
        }
    }

    fn bounds(&self) -> [f64; 2] {
        [self.lower, self.upper]
    }
}

/// Density and pressure at the limit of mechanical stability.
#[derive(Clone, Copy, Debug)]
pub struct Spinodal {
    /// Molar density in mol/m³.
    pub density: f64,
    /// Pressure in Pa.
    pub pressure: f64,
}

/// Calculate the molar density in mol/m³ on the branch `phase` of the
/// isotherm at the given temperature (K), pressure (Pa) and composition.
///
/// Returns [DensityError::InfeasiblePhase] if the isotherm has a van der
/// Waals loop and the requested branch does not reach `pressure`. If the
/// isotherm is monotonic, both phases give the same density.
///
/// The search starts at a molar density of 1e-5 mol/m³. Target pressures
/// below the pressure at that density (about $10^{-5}RT$, i.e. 0.025 Pa at
/// 300 K) are not bracketed and result in [DensityError::NoSignChange].
///
/// `options` control the final root search (defaults: 100 iterations,
/// absolute tolerance of 2e-12 mol/m³).
pub fn density_bracketing<M: HelmholtzModel>(
    model: &M,
    phase: Phase,
    temperature: f64,
    pressure: f64,
    molefracs: &Array1<f64>,
    options: SolverOptions,
) -> DensityResult<f64> {
    validate_state(
        model,
        "density_bracketing",
        temperature,
        Some(pressure),
        molefracs,
    )?;
    let verbosity = options.verbosity;
    let max_density = model.close_packing_density(molefracs);
    let upper = upper_bound(model, temperature, pressure, molefracs, max_density, verbosity)?;
    let mut bracket = Bracket::new(DENSITY_IDEAL_GAS_LIMIT, upper);

    log_iter!(
        verbosity,
        " {:<40} |  lower density   |  upper density  ",
        "curve shape"
    );
    log_iter!(verbosity, "{:-<79}", "");

    let mut shape = CurveShape::Unclassified;
    loop {
        log_iter!(
            verbosity,
            " {:<40} | {:16.8e} | {:16.8e}",
            shape,
            bracket.lower,
            bracket.upper
        );
        shape = match shape {
            CurveShape::Unclassified => classify(model, temperature, molefracs, max_density),
            CurveShape::SearchInflection => inflection(model, temperature, molefracs, &bracket),
            CurveShape::Inflection(rho_inf) => {
                bracket.restrict(phase, rho_inf);
                let spinodal = extremum(model, temperature, molefracs, &bracket)?;
                let feasible = match phase {
                    Phase::Vapor => spinodal.pressure > pressure,
                    Phase::Liquid => spinodal.pressure < pressure,
                };
                if feasible {
                    bracket.restrict(phase, spinodal.density);
                    CurveShape::Feasible(spinodal.density)
                } else {
                    CurveShape::Infeasible(spinodal.density)
                }
            }
            CurveShape::Monotonic | CurveShape::Feasible(_) => break,
            CurveShape::Infeasible(_) => {
                log_result!(
                    verbosity,
                    "density_bracketing: no {} root at T = {} K, p = {} Pa\n",
                    phase,
                    temperature,
                    pressure
                );
                return Err(DensityError::InfeasiblePhase(phase));
            }
        }
    }

    let density = brent_root(
        |rho| pressure_objective(model, temperature, rho, molefracs, pressure),
        bracket.bounds(),
        options,
    )?;
    log_result!(
        verbosity,
        "density_bracketing: {} density {} mol/m³\n",
        phase,
        density
    );
    Ok(density)
}

/// Calculate the spinodal of the isotherm on the side of `phase`.
///
/// Returns [DensityError::SuperCritical] if the isotherm has no van der
/// Waals loop.
pub fn spinodal<M: HelmholtzModel>(
    model: &M,
    phase: Phase,
    temperature: f64,
    molefracs: &Array1<f64>,
    options: SolverOptions,
) -> DensityResult<Spinodal> {
    validate_state(model, "spinodal", temperature, None, molefracs)?;
    let max_density = model.close_packing_density(molefracs);
    let upper = upper_bound(
        model,
        temperature,
        f64::NEG_INFINITY,
        molefracs,
        max_density,
        options.verbosity,
    )?;
    let mut bracket = Bracket::new(DENSITY_IDEAL_GAS_LIMIT, upper);
    match inflection(model, temperature, molefracs, &bracket) {
        CurveShape::Inflection(rho_inf) => {
            bracket.restrict(phase, rho_inf);
            let spinodal = extremum(model, temperature, molefracs, &bracket)?;
            log_result!(
                options.verbosity,
                "spinodal: {} spinodal at {} mol/m³, {} Pa\n",
                phase,
                spinodal.density,
                spinodal.pressure
            );
            Ok(spinodal)
        }
        _ => Err(DensityError::SuperCritical),
    }
}

/// Search a mechanically stable density with a pressure above `pressure`.
fn upper_bound<M: HelmholtzModel>(
    model: &M,
    temperature: f64,
    pressure: f64,
    molefracs: &Array1<f64>,
    max_density: f64,
    verbosity: Verbosity,
) -> DensityResult<f64> {
    let mut rho = UPPER_BOUND_START * max_density;
    for _ in 0..MAX_UPPER_BOUND_ATTEMPTS {
        let (p, dp_drho) = model.pressure_and_slope(temperature, rho, molefracs);
        log_iter!(
            verbosity,
            " upper bound candidate {:14.8e}: p = {:14.8e}, dp/drho = {:14.8e}",
            rho,
            p,
            dp_drho
        );
        if p > pressure && dp_drho > 0.0 {
            return Ok(rho);
        }
        rho += UPPER_BOUND_STEP * max_density;
    }
    Err(DensityError::UpperBracketNotFound(MAX_UPPER_BOUND_ATTEMPTS))
}

/// Estimate the curvature of the isotherm close to the ideal gas limit.
fn classify<M: HelmholtzModel>(
    model: &M,
    temperature: f64,
    molefracs: &Array1<f64>,
    max_density: f64,
) -> CurveShape {
    let dp_drho_ideal = RGAS * temperature;
    let rho = CURVATURE_PROBE * max_density;
    let (_, dp_drho) = model.pressure_and_slope(temperature, rho, molefracs);
    let d2p_drho2 = (dp_drho - dp_drho_ideal) / rho;
    if d2p_drho2 > 0.0 {
        CurveShape::Monotonic
    } else {
        CurveShape::SearchInflection
    }
}

/// Locate the minimum of the slope of the isotherm within the bracket.
fn inflection<M: HelmholtzModel>(
    model: &M,
    temperature: f64,
    molefracs: &Array1<f64>,
    bracket: &Bracket,
) -> CurveShape {
    let minimum = bounded_minimum(
        |rho| pressure_slope(model, temperature, rho, molefracs),
        bracket.bounds(),
        Default::default(),
    );
    if minimum.fun > 0.0 {
        CurveShape::Monotonic
    } else {
        CurveShape::Inflection(minimum.x)
    }
}

/// Locate the local pressure extremum (spinodal) within the bracket.
fn extremum<M: HelmholtzModel>(
    model: &M,
    temperature: f64,
    molefracs: &Array1<f64>,
    bracket: &Bracket,
) -> DensityResult<Spinodal> {
    let density = brent_root(
        |rho| pressure_slope(model, temperature, rho, molefracs),
        bracket.bounds(),
        Default::default(),
    )?;
    let (pressure, _) = model.pressure_and_slope(temperature, density, molefracs);
    Ok(Spinodal { density, pressure })
}
