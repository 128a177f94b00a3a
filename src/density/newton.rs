use super::{validate_state, Status};
use crate::errors::{DensityError, DensityResult};
use crate::model::HelmholtzModel;
use crate::SolverOptions;
use ndarray::Array1;

const MAX_ITER_NEWTON: usize = 30;
const TOL_NEWTON: f64 = 1e-10;

/// Result of a [density_newton] iteration.
#[derive(Clone, Copy, Debug)]
pub struct Refinement {
    /// Last iterate of the molar density in mol/m³.
    pub density: f64,
    /// Difference between the pressure at `density` and the target in Pa.
    pub residual: f64,
    /// Last Newton step in mol/m³.
    pub step: f64,
    /// Number of Newton steps taken.
    pub iterations: usize,
    pub status: Status,
}

/// Refine an initial molar density with a Newton iteration on the pressure.
///
/// The iteration is not safeguarded: starting points far from the root, in
/// the unstable region or on the wrong branch can lead to the wrong root or
/// to divergence. Use it to polish results of
/// [density_bracketing](super::density_bracketing) or when stepping through
/// neighboring states.
///
/// At least one step is taken. The iteration stops once the pressure
/// residual is below `tol` (default 1e-10 Pa) or after `max_iter`
/// (default 30) steps; the latter is reported as [Status::MaxIterations].
/// Non-finite iterates result in [DensityError::IterationFailed].
pub fn density_newton<M: HelmholtzModel>(
    model: &M,
    initial_density: f64,
    temperature: f64,
    pressure: f64,
    molefracs: &Array1<f64>,
    options: SolverOptions,
) -> DensityResult<Refinement> {
    validate_state(model, "density_newton", temperature, Some(pressure), molefracs)?;
    if !(initial_density.is_finite() && initial_density > 0.0) {
        return Err(DensityError::InvalidState(
            String::from("density_newton"),
            String::from("density"),
            initial_density,
        ));
    }
    let (max_iter, tol, verbosity) = options.unwrap_or(MAX_ITER_NEWTON, TOL_NEWTON);

    let mut rho = initial_density;
    let (p, mut dp_drho) = model.pressure_and_slope(temperature, rho, molefracs);
    let mut residual = p - pressure;
    let mut step = 0.0;

    log_iter!(verbosity, " iter |    residual    |     density      ");
    log_iter!(verbosity, "{:-<40}", "");
    log_iter!(verbosity, " {:4} | {:14.8e} | {:16.8e}", 0, residual, rho);

    for k in 1..=max_iter {
        if !dp_drho.is_finite() || dp_drho == 0.0 {
            return Err(DensityError::IterationFailed(String::from(
                "density_newton",
            )));
        }
        step = -residual / dp_drho;
        rho += step;
        let (p, dp) = model.pressure_and_slope(temperature, rho, molefracs);
        residual = p - pressure;
        dp_drho = dp;
        if !(rho.is_finite() && residual.is_finite()) {
            return Err(DensityError::IterationFailed(String::from(
                "density_newton",
            )));
        }
        log_iter!(verbosity, " {:4} | {:14.8e} | {:16.8e}", k, residual, rho);

        if residual.abs() < tol {
            log_result!(
                verbosity,
                "density_newton: calculation converged in {} step(s)\n",
                k
            );
            return Ok(Refinement {
                density: rho,
                residual,
                step,
                iterations: k,
                status: Status::Converged,
            });
        }
    }
    log_result!(
        verbosity,
        "density_newton: no convergence within {} step(s), residual {} Pa\n",
        max_iter,
        residual
    );
    Ok(Refinement {
        density: rho,
        residual,
        step,
        iterations: max_iter,
        status: Status::MaxIterations,
    })
}
