use crate::constants::NAV;
use crate::errors::{DensityError, DensityResult};
use crate::model::HelmholtzModel;
use crate::SolverOptions;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;

mod bracketing;
mod newton;

pub use crate::numerics::Status;
pub use bracketing::{density_bracketing, spinodal, CurveShape, Spinodal};
pub use newton::{density_newton, Refinement};

/// Relative Newton step below which the pressure of dense states cannot be
/// resolved any further.
const DENSITY_RESOLUTION: f64 = 1e-12;

/// Branch of a (possibly non-monotonic) pressure-density isotherm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Liquid,
    Vapor,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Liquid => write!(f, "liquid"),
            Self::Vapor => write!(f, "vapor"),
        }
    }
}

/// Initial values in a density iteration.
#[derive(Clone, Copy, Debug)]
pub enum DensityInitialization {
    /// Find the density on the vapor branch.
    Vapor,
    /// Find the density on the liquid branch.
    Liquid,
    /// Refine a known density in mol/m³.
    InitialDensity(f64),
}

impl From<Phase> for DensityInitialization {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Liquid => Self::Liquid,
            Phase::Vapor => Self::Vapor,
        }
    }
}

/// Calculate the molar density in mol/m³ at given temperature, pressure and
/// composition.
///
/// - `Some(Vapor)` and `Some(Liquid)` use [density_bracketing].
/// - `Some(InitialDensity(rho))` refines `rho` with [density_newton]. The
///   result is accepted if the pressure tolerance is met or if the last
///   Newton step is below the floating point resolution of the density,
///   otherwise [DensityError::NotConverged] is returned.
/// - `None` determines the stable phase using [density_stable].
pub fn density<M: HelmholtzModel>(
    model: &M,
    temperature: f64,
    pressure: f64,
    molefracs: &Array1<f64>,
    initial_density: Option<DensityInitialization>,
    options: SolverOptions,
) -> DensityResult<f64> {
    match initial_density {
        Some(DensityInitialization::Vapor) => density_bracketing(
            model,
            Phase::Vapor,
            temperature,
            pressure,
            molefracs,
            options,
        ),
        Some(DensityInitialization::Liquid) => density_bracketing(
            model,
            Phase::Liquid,
            temperature,
            pressure,
            molefracs,
            options,
        ),
        Some(DensityInitialization::InitialDensity(rho)) => {
            let refinement = density_newton(model, rho, temperature, pressure, molefracs, options)?;
            if refinement.status.is_converged()
                || refinement.step.abs() <= DENSITY_RESOLUTION * refinement.density
            {
                Ok(refinement.density)
            } else {
                Err(DensityError::NotConverged(String::from("density_newton")))
            }
        }
        None => density_stable(model, temperature, pressure, molefracs, options),
    }
}

/// Calculate the density of the thermodynamically stable phase.
///
/// Both branches are solved. If both exist, the one with the lower molar
/// Gibbs energy is returned. A branch that does not exist
/// ([DensityError::InfeasiblePhase]) is skipped, every other error is
/// returned as is.
pub fn density_stable<M: HelmholtzModel>(
    model: &M,
    temperature: f64,
    pressure: f64,
    molefracs: &Array1<f64>,
    options: SolverOptions,
) -> DensityResult<f64> {
    validate_state(model, "density_stable", temperature, Some(pressure), molefracs)?;
    let branch = |phase| match density_bracketing(
        model,
        phase,
        temperature,
        pressure,
        molefracs,
        options,
    ) {
        Ok(density) => Ok(Some(density)),
        Err(DensityError::InfeasiblePhase(_)) => Ok(None),
        Err(e) => Err(e),
    };
    let liquid = branch(Phase::Liquid)?;
    let vapor = branch(Phase::Vapor)?;
    match (liquid, vapor) {
        (Some(l), None) => Ok(l),
        (None, Some(v)) => Ok(v),
        (Some(l), Some(v)) => {
            let g_l = molar_gibbs_energy(model, temperature, pressure, l, molefracs);
            let g_v = molar_gibbs_energy(model, temperature, pressure, v, molefracs);
            Ok(if g_l > g_v { v } else { l })
        }
        (None, None) => Err(DensityError::UndeterminedState(String::from(
            "neither a liquid nor a vapor density exists",
        ))),
    }
}

fn molar_gibbs_energy<M: HelmholtzModel>(
    model: &M,
    temperature: f64,
    pressure: f64,
    density: f64,
    molefracs: &Array1<f64>,
) -> f64 {
    model.molar_helmholtz_energy(temperature, NAV * density, molefracs) + pressure / density
}

fn validate_state<M: HelmholtzModel>(
    model: &M,
    solver: &str,
    temperature: f64,
    pressure: Option<f64>,
    molefracs: &Array1<f64>,
) -> DensityResult<()> {
    model.validate_molefracs(molefracs)?;
    if !(temperature.is_finite() && temperature > 0.0) {
        return Err(DensityError::InvalidState(
            solver.to_owned(),
            String::from("temperature"),
            temperature,
        ));
    }
    if let Some(p) = pressure {
        if !(p.is_finite() && p > 0.0) {
            return Err(DensityError::InvalidState(
                solver.to_owned(),
                String::from("pressure"),
                p,
            ));
        }
    }
    Ok(())
}
