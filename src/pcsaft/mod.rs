//! Perturbed-chain SAFT equation of state for non-associating, non-polar
//! molecules.
//!
//! The residual Helmholtz energy consists of a hard-sphere (BMCSL), a
//! hard-chain and a dispersion contribution
//! ([Gross and Sadowski, 2001](https://doi.org/10.1021/ie0003887)).
mod eos;
mod parameters;

pub use eos::PcSaft;
pub use parameters::{PcSaftBinaryRecord, PcSaftParameters, PcSaftRecord};
