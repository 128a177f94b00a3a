use crate::constants::{ETA_CLOSE_PACKING, NAV};
use crate::errors::{DensityError, DensityResult};
use ndarray::Array1;
use num_dual::{first_derivative, second_derivative, DualNum};
use std::f64::consts::FRAC_PI_6;

/// An equation of state formulated in terms of the molar Helmholtz energy.
///
/// Implementors provide the Helmholtz energy as a function of the molecular
/// number density for arbitrary (hyper-) dual numbers. All density
/// derivatives that the solvers need are obtained from this single function
/// via automatic differentiation.
///
/// The segment numbers and segment diameters are only used to estimate the
/// close-packing density, which serves as the outer wall of every density
/// search.
pub trait HelmholtzModel {
    /// Return the number of components of the model.
    fn components(&self) -> usize;

    /// Number of segments $m_i$ of every component.
    fn segments(&self) -> Array1<f64>;

    /// Segment diameters $\sigma_i$ of every component in m.
    fn segment_diameters(&self) -> Array1<f64>;

    /// Molar Helmholtz energy (ideal gas + residual) in J/mol.
    ///
    /// `density` is the molecular number density in 1/m³. Contributions that
    /// only depend on temperature can be omitted, as they do not influence
    /// the pressure.
    fn molar_helmholtz_energy<D: DualNum<f64> + Copy>(
        &self,
        temperature: f64,
        density: D,
        molefracs: &Array1<f64>,
    ) -> D;

    /// Molar Helmholtz energy and its first derivative with respect to the
    /// molecular number density.
    fn helmholtz_derivatives(
        &self,
        temperature: f64,
        density: f64,
        molefracs: &Array1<f64>,
    ) -> (f64, f64) {
        first_derivative(
            |rho| self.molar_helmholtz_energy(temperature, rho, molefracs),
            density,
        )
    }

    /// Molar Helmholtz energy and its first and second derivative with
    /// respect to the molecular number density.
    fn helmholtz_second_derivatives(
        &self,
        temperature: f64,
        density: f64,
        molefracs: &Array1<f64>,
    ) -> (f64, f64, f64) {
        second_derivative(
            |rho| self.molar_helmholtz_energy(temperature, rho, molefracs),
            density,
        )
    }

    /// Pressure in Pa and its derivative with respect to the molar density
    /// in Pa m³/mol, evaluated at the molar density `density` in mol/m³.
    fn pressure_and_slope(
        &self,
        temperature: f64,
        density: f64,
        molefracs: &Array1<f64>,
    ) -> (f64, f64) {
        let rho = NAV * density;
        let (_, da, d2a) = self.helmholtz_second_derivatives(temperature, rho, molefracs);
        (rho * rho * da / NAV, 2.0 * rho * da + rho * rho * d2a)
    }

    /// Molar density in mol/m³ at which the segments reach the close-packing
    /// fraction of hard spheres.
    fn close_packing_density(&self, molefracs: &Array1<f64>) -> f64 {
        let segment_volume = (molefracs
            * &self.segments()
            * &self.segment_diameters().mapv(|s| s.powi(3)))
            .sum();
        ETA_CLOSE_PACKING / (FRAC_PI_6 * segment_volume) / NAV
    }

    /// Check that the composition matches the model and is normalized.
    fn validate_molefracs(&self, molefracs: &Array1<f64>) -> DensityResult<()> {
        if molefracs.len() != self.components() {
            return Err(DensityError::IncompatibleComponents(
                self.components(),
                molefracs.len(),
            ));
        }
        let sum = molefracs.sum();
        if (sum - 1.0).abs() > 1e-10 || molefracs.iter().any(|&x| !(0.0..=1.0).contains(&x)) {
            return Err(DensityError::InvalidMolefracs(sum));
        }
        Ok(())
    }
}
