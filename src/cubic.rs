//! Implementation of the van der Waals equation of state.
//!
//! This module acts as a reference on how a simple equation of state can be
//! used with the density solvers. The molar Helmholtz energy reads
//! $$a=RT\left(\ln\rho-1-\ln(1-b\rho)\right)-a_\mathrm{mix}\rho$$
//! with $a_\mathrm{mix}=\sum_{ij}x_ix_j\sqrt{a_ia_j}(1-k_{ij})$ and
//! $b=\sum_ix_ib_i$.
use crate::constants::{ETA_CLOSE_PACKING, NAV, RGAS};
use crate::model::HelmholtzModel;
use crate::parameter::{Identifier, Parameter, ParameterError, PureRecord};
use ndarray::{Array1, Array2};
use num_dual::DualNum;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_6;
use std::fmt;
use std::sync::Arc;

/// van der Waals parameters for a single substance.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default)]
pub struct VanDerWaalsRecord {
    /// critical temperature in Kelvin
    pub tc: f64,
    /// critical pressure in Pascal
    pub pc: f64,
}

impl VanDerWaalsRecord {
    pub fn new(tc: f64, pc: f64) -> Self {
        Self { tc, pc }
    }
}

impl fmt::Display for VanDerWaalsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VanDerWaalsRecord(tc={} K, pc={} Pa)", self.tc, self.pc)
    }
}

/// van der Waals parameters for one or more substances.
#[derive(Debug, Clone)]
pub struct VanDerWaalsParameters {
    /// Attraction parameter in J m³/mol²
    pub a: Array1<f64>,
    /// Covolume in m³/mol
    pub b: Array1<f64>,
    /// Binary interaction parameter
    pub k_ij: Array2<f64>,
    /// Diameter of a sphere that reaches close packing at the covolume in m
    pub sigma: Array1<f64>,
    pure_records: Vec<PureRecord<VanDerWaalsRecord>>,
    binary_records: Option<Array2<f64>>,
}

impl VanDerWaalsParameters {
    /// Build a parameter set without identifiers and binary interaction parameters.
    pub fn new_simple(tc: &[f64], pc: &[f64]) -> Result<Self, ParameterError> {
        if tc.len() != pc.len() {
            return Err(ParameterError::IncompatibleParameters(String::from(
                "each component has to have parameters.",
            )));
        }
        let records = tc
            .iter()
            .zip(pc)
            .map(|(&tc, &pc)| {
                PureRecord::new(Identifier::default(), None, VanDerWaalsRecord::new(tc, pc))
            })
            .collect();
        Self::from_records(records, None)
    }
}

impl Parameter for VanDerWaalsParameters {
    type Pure = VanDerWaalsRecord;
    type Binary = f64;

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
        if let Some(r) = pure_records
            .iter()
            .map(|r| &r.model_record)
            .find(|r| !(r.tc > 0.0 && r.pc > 0.0))
        {
            return Err(ParameterError::IncompatibleParameters(format!(
                "critical properties have to be positive: {r}"
            )));
        }
        if let Some(k) = &binary_records {
            if k.shape() != [n, n] {
                return Err(ParameterError::IncompatibleParameters(format!(
                    "binary interaction parameters of shape {:?} for {n} components",
                    k.shape()
                )));
            }
        }

        let tc = Array1::from_iter(pure_records.iter().map(|r| r.model_record.tc));
        let pc = Array1::from_iter(pure_records.iter().map(|r| r.model_record.pc));
        let a = 27.0 * RGAS.powi(2) * &tc * &tc / (64.0 * &pc);
        let b = RGAS * &tc / (8.0 * &pc);
        let sigma = (&b * (ETA_CLOSE_PACKING / (FRAC_PI_6 * NAV))).mapv(f64::cbrt);
        let k_ij = binary_records
            .clone()
            .unwrap_or_else(|| Array2::zeros([n; 2]));

        Ok(Self {
            a,
            b,
            k_ij,
            sigma,
            pure_records,
            binary_records,
        })
    }

    fn records(&self) -> (&[PureRecord<VanDerWaalsRecord>], Option<&Array2<f64>>) {
        (&self.pure_records, self.binary_records.as_ref())
    }
}

impl fmt::Display for VanDerWaalsParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.pure_records
            .iter()
            .try_for_each(|pr| writeln!(f, "{}", pr))?;
        writeln!(f, "\nk_ij:\n{}", self.k_ij)
    }
}

/// The van der Waals equation of state.
pub struct VanDerWaals {
    pub parameters: Arc<VanDerWaalsParameters>,
}

impl VanDerWaals {
    pub fn new(parameters: Arc<VanDerWaalsParameters>) -> Self {
        Self { parameters }
    }

    /// Critical molar density $\frac{1}{3b_i}$ of every component in mol/m³.
    pub fn critical_density(&self) -> Array1<f64> {
        self.parameters.b.mapv(|b| 1.0 / (3.0 * b))
    }

    fn mixing_rules(&self, molefracs: &Array1<f64>) -> (f64, f64) {
        let p = &self.parameters;
        let n = p.a.len();
        let mut a = 0.0;
        for i in 0..n {
            for j in 0..n {
                a += molefracs[i]
                    * molefracs[j]
                    * (p.a[i] * p.a[j]).sqrt()
                    * (1.0 - p.k_ij[(i, j)]);
            }
        }
        (a, (molefracs * &p.b).sum())
    }
}

impl HelmholtzModel for VanDerWaals {
    fn components(&self) -> usize {
        self.parameters.b.len()
    }

    fn segments(&self) -> Array1<f64> {
        Array1::ones(self.components())
    }

    fn segment_diameters(&self) -> Array1<f64> {
        self.parameters.sigma.clone()
    }

    fn molar_helmholtz_energy<D: DualNum<f64> + Copy>(
        &self,
        temperature: f64,
        density: D,
        molefracs: &Array1<f64>,
    ) -> D {
        let (a, b) = self.mixing_rules(molefracs);
        let rho = density / NAV;
        let rt = RGAS * temperature;
        (rho.ln() - 1.0 - (-rho * b + 1.0).ln()) * rt - rho * a
    }
}

impl fmt::Display for VanDerWaals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "van der Waals")
    }
}
