use approx::assert_relative_eq;
use ndarray::arr1;
use saft_density::evaluate::pressure;
use saft_density::parameter::{IdentifierOption, Parameter};
use saft_density::pcsaft::{PcSaft, PcSaftParameters};
use saft_density::*;
use std::error::Error;
use std::sync::Arc;

fn propane_butane(binary: bool) -> Result<PcSaft, Box<dyn Error>> {
    let parameters = PcSaftParameters::from_json(
        vec!["propane", "butane"],
        "tests/pcsaft/test_parameters.json",
        binary.then_some("tests/pcsaft/test_binary_parameters.json"),
        IdentifierOption::Name,
    )?;
    Ok(PcSaft::new(Arc::new(parameters)))
}

#[test]
fn equimolar_mixture() -> Result<(), Box<dyn Error>> {
    let saft = propane_butane(false)?;
    let x = arr1(&[0.5, 0.5]);
    let (t, p) = (300.0, 1e5);
    let vapor = density_bracketing(&saft, Phase::Vapor, t, p, &x, Default::default())?;
    let liquid = density_bracketing(&saft, Phase::Liquid, t, p, &x, Default::default())?;
    assert!(liquid > 10.0 * vapor);
    assert!(liquid < saft.close_packing_density(&x));
    assert_relative_eq!(pressure(&saft, t, vapor, &x), p, max_relative = 1e-8);
    assert_relative_eq!(pressure(&saft, t, liquid, &x), p, max_relative = 1e-8);
    Ok(())
}

#[test]
fn binary_interaction_parameter() -> Result<(), Box<dyn Error>> {
    let x = arr1(&[0.5, 0.5]);
    let (t, p) = (300.0, 1e5);
    let ideal = propane_butane(false)?;
    let kij = propane_butane(true)?;
    assert_relative_eq!(kij.parameters.k_ij[(0, 1)], 0.02);
    assert_relative_eq!(kij.parameters.k_ij[(1, 0)], 0.02);
    let liquid_ideal = density_bracketing(&ideal, Phase::Liquid, t, p, &x, Default::default())?;
    let liquid_kij = density_bracketing(&kij, Phase::Liquid, t, p, &x, Default::default())?;
    // weaker cross attraction expands the liquid
    assert!(liquid_kij < liquid_ideal);
    assert_relative_eq!(pressure(&kij, t, liquid_kij, &x), p, max_relative = 1e-8);
    Ok(())
}

#[test]
fn incompatible_composition() -> Result<(), Box<dyn Error>> {
    let saft = propane_butane(false)?;
    let res = density_bracketing(
        &saft,
        Phase::Liquid,
        300.0,
        1e5,
        &arr1(&[1.0]),
        Default::default(),
    );
    assert!(matches!(res, Err(DensityError::IncompatibleComponents(2, 1))));
    let res = density_bracketing(
        &saft,
        Phase::Liquid,
        300.0,
        1e5,
        &arr1(&[0.5, 0.6]),
        Default::default(),
    );
    assert!(matches!(res, Err(DensityError::InvalidMolefracs(_))));
    Ok(())
}
