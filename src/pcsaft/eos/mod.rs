use super::parameters::PcSaftParameters;
use crate::constants::{ANGSTROM3, RGAS};
use crate::model::HelmholtzModel;
use ndarray::Array1;
use num_dual::DualNum;
use std::fmt;
use std::sync::Arc;

mod dispersion;
mod hard_chain;
mod hard_sphere;
use dispersion::Dispersion;
use hard_chain::HardChain;
use hard_sphere::HardSphere;

/// State variables of a residual Helmholtz energy contribution.
///
/// The density is the molecular number density in 1/Å³.
pub(crate) struct StateHD<'a, D> {
    pub temperature: f64,
    pub density: D,
    pub molefracs: &'a Array1<f64>,
}

/// A contribution to the residual Helmholtz energy per molecule in units of $k_BT$.
pub(crate) trait ResidualContribution: fmt::Display {
    fn helmholtz_energy<D: DualNum<f64> + Copy>(&self, state: &StateHD<D>) -> D;
}

/// PC-SAFT equation of state for non-associating, non-polar molecules.
pub struct PcSaft {
    pub parameters: Arc<PcSaftParameters>,
    hard_sphere: HardSphere,
    hard_chain: HardChain,
    dispersion: Dispersion,
}

impl PcSaft {
    pub fn new(parameters: Arc<PcSaftParameters>) -> Self {
        Self {
            hard_sphere: HardSphere {
                parameters: parameters.clone(),
            },
            hard_chain: HardChain {
                parameters: parameters.clone(),
            },
            dispersion: Dispersion {
                parameters: parameters.clone(),
            },
            parameters,
        }
    }

    /// Residual Helmholtz energy per molecule in units of $k_BT$ at the
    /// number density `density` in 1/Å³.
    pub fn residual_helmholtz_energy<D: DualNum<f64> + Copy>(
        &self,
        temperature: f64,
        density: D,
        molefracs: &Array1<f64>,
    ) -> D {
        let state = StateHD {
            temperature,
            density,
            molefracs,
        };
        self.hard_sphere.helmholtz_energy(&state)
            + self.hard_chain.helmholtz_energy(&state)
            + self.dispersion.helmholtz_energy(&state)
    }
}

impl HelmholtzModel for PcSaft {
    fn components(&self) -> usize {
        self.parameters.m.len()
    }

    fn segments(&self) -> Array1<f64> {
        self.parameters.m.clone()
    }

    fn segment_diameters(&self) -> Array1<f64> {
        &self.parameters.sigma * 1e-10
    }

    fn molar_helmholtz_energy<D: DualNum<f64> + Copy>(
        &self,
        temperature: f64,
        density: D,
        molefracs: &Array1<f64>,
    ) -> D {
        let ares = self.residual_helmholtz_energy(temperature, density * ANGSTROM3, molefracs);
        (density.ln() - 1.0 + ares) * (RGAS * temperature)
    }
}

impl fmt::Display for PcSaft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PC-SAFT({}, {}, {})",
            self.hard_sphere, self.hard_chain, self.dispersion
        )
    }
}
