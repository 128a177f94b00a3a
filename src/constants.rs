//! Physical constants and fixed geometric limits.

/// Boltzmann constant in J/K.
pub const KB: f64 = 1.380649e-23;

/// Avogadro constant in 1/mol.
pub const NAV: f64 = 6.02214076e23;

/// Ideal gas constant in J/(mol K).
pub const RGAS: f64 = KB * NAV;

/// Packing fraction of the densest (face-centered cubic) packing of hard spheres.
pub const ETA_CLOSE_PACKING: f64 = 0.7405;

/// Conversion factor from 1/m³ to 1/Å³.
pub(crate) const ANGSTROM3: f64 = 1e-30;
