//! Pressure and pressure derivatives as functions of the molar density.
//!
//! The model is evaluated at the molecular number density $\rho_N=N_A\rho$.
//! With the molar Helmholtz energy $a(\rho_N)$ the pressure and its
//! derivative with respect to the molar density read
//! $$p=\frac{\rho_N^2}{N_A}\frac{\partial a}{\partial\rho_N},~~~~~~~~\frac{\partial p}{\partial\rho}=2\rho_N\frac{\partial a}{\partial\rho_N}+\rho_N^2\frac{\partial^2 a}{\partial\rho_N^2}.$$
use crate::constants::NAV;
use crate::model::HelmholtzModel;
use ndarray::Array1;

/// Pressure in Pa at the molar density `density` in mol/m³.
pub fn pressure<M: HelmholtzModel>(
    model: &M,
    temperature: f64,
    density: f64,
    molefracs: &Array1<f64>,
) -> f64 {
    let rho = NAV * density;
    let (_, da) = model.helmholtz_derivatives(temperature, rho, molefracs);
    rho * rho * da / NAV
}

/// Difference between the pressure at `density` and the target `pressure`.
pub fn pressure_objective<M: HelmholtzModel>(
    model: &M,
    temperature: f64,
    density: f64,
    molefracs: &Array1<f64>,
    pressure: f64,
) -> f64 {
    self::pressure(model, temperature, density, molefracs) - pressure
}

/// Derivative of the pressure with respect to the molar density in Pa m³/mol.
pub fn pressure_slope<M: HelmholtzModel>(
    model: &M,
    temperature: f64,
    density: f64,
    molefracs: &Array1<f64>,
) -> f64 {
    let rho = NAV * density;
    let (_, da, d2a) = model.helmholtz_second_derivatives(temperature, rho, molefracs);
    2.0 * rho * da + rho * rho * d2a
}
