use super::{ResidualContribution, StateHD};
use crate::pcsaft::parameters::PcSaftParameters;
use num_dual::DualNum;
use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

const A0: [f64; 7] = [
    0.91056314451539,
    0.63612814494991,
    2.68613478913903,
    -26.5473624914884,
    97.7592087835073,
    -159.591540865600,
    91.2977740839123,
];
const A1: [f64; 7] = [
    -0.30840169182720,
    0.18605311591713,
    -2.50300472586548,
    21.4197936296668,
    -65.2558853303492,
    83.3186804808856,
    -33.7469229297323,
];
const A2: [f64; 7] = [
    -0.09061483509767,
    0.45278428063920,
    0.59627007280101,
    -1.72418291311787,
    -4.13021125311661,
    13.7766318697211,
    -8.67284703679646,
];
const B0: [f64; 7] = [
    0.72409469413165,
    2.23827918609380,
    -4.00258494846342,
    -21.00357681484648,
    26.8556413626615,
    206.5513384066188,
    -355.60235612207947,
];
const B1: [f64; 7] = [
    -0.57554980753450,
    0.69950955214436,
    3.89256733895307,
    -17.21547164777212,
    192.6722644652495,
    -161.8264616487648,
    -165.2076934555607,
];
const B2: [f64; 7] = [
    0.09768831158356,
    -0.25575749816100,
    -9.15585615297321,
    20.64207597439724,
    -38.80443005206285,
    93.6267740770146,
    -29.66690558514725,
];

pub(super) struct Dispersion {
    pub parameters: Arc<PcSaftParameters>,
}

impl ResidualContribution for Dispersion {
    fn helmholtz_energy<D: DualNum<f64> + Copy>(&self, state: &StateHD<D>) -> D {
        let p = &self.parameters;
        let x = state.molefracs;
        let n = p.m.len();
        let d = p.hs_diameter(state.temperature);
        let [eta] = p.zeta(&d, state.density, x, [3]);

        // mean segment number
        let m = (x * &p.m).sum();

        // crosswise interactions of all segments on all chains
        let mut m2es3 = 0.0;
        let mut m2e2s3 = 0.0;
        for i in 0..n {
            for j in 0..n {
                let eps_ij = p.epsilon_k_ij[(i, j)] / state.temperature;
                let sigma_ij = p.sigma_ij[(i, j)].powi(3);
                let xm = x[i] * x[j] * p.m[i] * p.m[j];
                m2es3 += xm * eps_ij * sigma_ij;
                m2e2s3 += xm * eps_ij * eps_ij * sigma_ij;
            }
        }

        // I1, I2 and C1
        let mut i1 = D::zero();
        let mut i2 = D::zero();
        let mut eta_i = D::one();
        for i in 0..=6 {
            i1 += eta_i * ((m - 1.0) / m * ((m - 2.0) / m * A2[i] + A1[i]) + A0[i]);
            i2 += eta_i * ((m - 1.0) / m * ((m - 2.0) / m * B2[i] + B1[i]) + B0[i]);
            eta_i *= eta;
        }
        let c1 = (((eta * 8.0 - eta.powi(2) * 2.0) / (eta - 1.0).powi(4)) * m
            + (eta * 20.0 - eta.powi(2) * 27.0 + eta.powi(3) * 12.0 - eta.powi(4) * 2.0)
                / ((eta - 1.0) * (eta - 2.0)).powi(2)
                * (1.0 - m)
            + 1.0)
            .recip();

        state.density * PI * (i1 * (-2.0 * m2es3) - c1 * i2 * (m * m2e2s3))
    }
}

impl fmt::Display for Dispersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dispersion")
    }
}
