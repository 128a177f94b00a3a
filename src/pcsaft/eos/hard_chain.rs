use super::{ResidualContribution, StateHD};
use crate::pcsaft::parameters::PcSaftParameters;
use num_dual::DualNum;
use std::fmt;
use std::sync::Arc;

pub(super) struct HardChain {
    pub parameters: Arc<PcSaftParameters>,
}

impl ResidualContribution for HardChain {
    fn helmholtz_energy<D: DualNum<f64> + Copy>(&self, state: &StateHD<D>) -> D {
        let p = &self.parameters;
        let d = p.hs_diameter(state.temperature);
        let [zeta2, zeta3] = p.zeta(&d, state.density, state.molefracs, [2, 3]);
        let frac_1mz3 = -(zeta3 - 1.0).recip();
        let c = zeta2 * frac_1mz3 * frac_1mz3;
        d.iter()
            .enumerate()
            .map(|(i, &d)| {
                let g_hs = frac_1mz3 + c * d * 1.5 - c.powi(2) * (zeta3 - 1.0) * d.powi(2) * 0.5;
                g_hs.ln() * (state.molefracs[i] * (1.0 - p.m[i]))
            })
            .fold(D::zero(), |acc, a| acc + a)
    }
}

impl fmt::Display for HardChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hard Chain")
    }
}
