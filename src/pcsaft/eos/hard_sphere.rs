use super::{ResidualContribution, StateHD};
use crate::pcsaft::parameters::PcSaftParameters;
use num_dual::DualNum;
use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

/// BMCSL equation of state for mixtures of hard chains.
///
/// The reduced Helmholtz energy per molecule is
/// $$\frac{\beta A}{N}=\frac{6}{\pi\rho}\left(\frac{3\zeta_1\zeta_2}{1-\zeta_3}+\frac{\zeta_2^3}{\zeta_3\left(1-\zeta_3\right)^2}+\left(\frac{\zeta_2^3}{\zeta_3^2}-\zeta_0\right)\ln\left(1-\zeta_3\right)\right).$$
pub(super) struct HardSphere {
    pub parameters: Arc<PcSaftParameters>,
}

impl ResidualContribution for HardSphere {
    fn helmholtz_energy<D: DualNum<f64> + Copy>(&self, state: &StateHD<D>) -> D {
        let p = &self.parameters;
        let d = p.hs_diameter(state.temperature);
        let zeta = p.zeta(&d, state.density, state.molefracs, [0, 1, 2, 3]);
        let frac_1mz3 = -(zeta[3] - 1.0).recip();
        let zeta_23 = p.zeta_23(&d, state.molefracs);
        (zeta[1] * zeta[2] * frac_1mz3 * 3.0
            + zeta[2].powi(2) * frac_1mz3.powi(2) * zeta_23
            + (zeta[2] * zeta_23.powi(2) - zeta[0]) * (-zeta[3]).ln_1p())
            * 6.0
            / (state.density * PI)
    }
}

impl fmt::Display for HardSphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hard Sphere")
    }
}
