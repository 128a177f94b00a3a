use crate::parameter::{Parameter, ParameterError, PureRecord};
use ndarray::{Array, Array1, Array2};
use num_dual::DualNum;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_6;
use std::fmt;

/// PC-SAFT pure-component parameters.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default)]
pub struct PcSaftRecord {
    /// Segment number
    pub m: f64,
    /// Segment diameter in units of Angstrom
    pub sigma: f64,
    /// Energetic parameter in units of Kelvin
    pub epsilon_k: f64,
}

impl PcSaftRecord {
    pub fn new(m: f64, sigma: f64, epsilon_k: f64) -> Self {
        Self {
            m,
            sigma,
            epsilon_k,
        }
    }
}

impl fmt::Display for PcSaftRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PcSaftRecord(m={}, sigma={}, epsilon_k={})",
            self.m, self.sigma, self.epsilon_k
        )
    }
}

/// PC-SAFT binary interaction parameters.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default)]
pub struct PcSaftBinaryRecord {
    /// Binary dispersion interaction parameter
    #[serde(skip_serializing_if = "f64::is_zero")]
    #[serde(default)]
    pub k_ij: f64,
}

impl From<f64> for PcSaftBinaryRecord {
    fn from(k_ij: f64) -> Self {
        Self { k_ij }
    }
}

impl From<PcSaftBinaryRecord> for f64 {
    fn from(binary_record: PcSaftBinaryRecord) -> Self {
        binary_record.k_ij
    }
}

impl fmt::Display for PcSaftBinaryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PcSaftBinaryRecord(k_ij={})", self.k_ij)
    }
}

/// Parameter set required for the PC-SAFT equation of state.
#[derive(Debug, Clone)]
pub struct PcSaftParameters {
    pub m: Array1<f64>,
    pub sigma: Array1<f64>,
    pub epsilon_k: Array1<f64>,
    pub k_ij: Array2<f64>,
    pub sigma_ij: Array2<f64>,
    pub epsilon_k_ij: Array2<f64>,
    pub pure_records: Vec<PureRecord<PcSaftRecord>>,
    pub binary_records: Option<Array2<PcSaftBinaryRecord>>,
}

impl Parameter for PcSaftParameters {
    type Pure = PcSaftRecord;
    type Binary = PcSaftBinaryRecord;

    fn from_records(
        pure_records: Vec<PureRecord<Self::Pure>>,
        binary_records: Option<Array2<Self::Binary>>,
    ) -> Result<Self, ParameterError> {
        let n = pure_records.len();
        if n == 0 {
            return Err(ParameterError::IncompatibleParameters(String::from(
                "at least one component is required.",
            )));
        }
        if let Some(record) = pure_records.iter().find(|r| {
            let r = &r.model_record;
            !(r.m >= 1.0 && r.sigma > 0.0 && r.epsilon_k > 0.0)
        }) {
            return Err(ParameterError::IncompatibleParameters(format!(
                "invalid PC-SAFT parameters for {}: {}",
                record.identifier, record.model_record
            )));
        }

        let m = Array1::from_iter(pure_records.iter().map(|r| r.model_record.m));
        let sigma = Array1::from_iter(pure_records.iter().map(|r| r.model_record.sigma));
        let epsilon_k = Array1::from_iter(pure_records.iter().map(|r| r.model_record.epsilon_k));

        let k_ij = match &binary_records {
            Some(br) if br.shape() != [n, n] => {
                return Err(ParameterError::IncompatibleParameters(format!(
                    "binary interaction parameters of shape {:?} for {n} components",
                    br.shape()
                )))
            }
            Some(br) => br.mapv(|br| br.k_ij),
            None => Array2::zeros([n; 2]),
        };
        let sigma_ij = Array::from_shape_fn([n, n], |(i, j)| 0.5 * (sigma[i] + sigma[j]));
        let epsilon_k_ij = Array::from_shape_fn([n, n], |(i, j)| {
            (epsilon_k[i] * epsilon_k[j]).sqrt() * (1.0 - k_ij[(i, j)])
        });

        Ok(Self {
            m,
            sigma,
            epsilon_k,
            k_ij,
            sigma_ij,
            epsilon_k_ij,
            pure_records,
            binary_records,
        })
    }

    fn records(&self) -> (&[PureRecord<PcSaftRecord>], Option<&Array2<PcSaftBinaryRecord>>) {
        (&self.pure_records, self.binary_records.as_ref())
    }
}

impl PcSaftParameters {
    /// Temperature dependent hard-sphere diameters in Å.
    pub fn hs_diameter(&self, temperature: f64) -> Array1<f64> {
        let ti = -3.0 / temperature;
        Array::from_shape_fn(self.sigma.len(), |i| {
            self.sigma[i] * (1.0 - 0.12 * (ti * self.epsilon_k[i]).exp())
        })
    }

    /// The packing fractions $\zeta_k=\frac{\pi}{6}\rho\sum_ix_im_id_i^k$.
    pub fn zeta<D: DualNum<f64> + Copy, const N: usize>(
        &self,
        diameter: &Array1<f64>,
        density: D,
        molefracs: &Array1<f64>,
        k: [i32; N],
    ) -> [D; N] {
        k.map(|k| {
            let sum: f64 = (0..diameter.len())
                .map(|i| molefracs[i] * self.m[i] * diameter[i].powi(k))
                .sum();
            density * (sum * FRAC_PI_6)
        })
    }

    /// The fraction $\frac{\zeta_2}{\zeta_3}$, which is finite at zero density.
    pub fn zeta_23(&self, diameter: &Array1<f64>, molefracs: &Array1<f64>) -> f64 {
        let [z2, z3] = self.zeta(diameter, 1.0, molefracs, [2, 3]);
        z2 / z3
    }
}

impl fmt::Display for PcSaftParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.pure_records
            .iter()
            .try_for_each(|pr| writeln!(f, "{}", pr))?;
        writeln!(f, "\nk_ij:\n{}", self.k_ij)
    }
}
