use approx::assert_relative_eq;
use ndarray::arr1;
use saft_density::constants::RGAS;
use saft_density::evaluate::pressure;
use saft_density::parameter::{IdentifierOption, Parameter, ParameterError};
use saft_density::pcsaft::{PcSaft, PcSaftParameters};
use saft_density::*;
use std::error::Error;
use std::sync::Arc;

fn propane() -> Result<PcSaft, ParameterError> {
    let parameters = PcSaftParameters::from_json(
        vec!["propane"],
        "tests/pcsaft/test_parameters.json",
        None,
        IdentifierOption::Name,
    )?;
    Ok(PcSaft::new(Arc::new(parameters)))
}

#[test]
fn both_branches_reproduce_pressure() -> Result<(), Box<dyn Error>> {
    let saft = propane()?;
    let x = arr1(&[1.0]);
    let max_density = saft.close_packing_density(&x);
    for (t, p) in [(231.0, 1e5), (300.0, 1e5), (300.0, 5e5), (340.0, 2e5)] {
        for phase in [Phase::Vapor, Phase::Liquid] {
            let rho = density_bracketing(&saft, phase, t, p, &x, Default::default())?;
            assert!(rho > 0.0 && rho < max_density);
            assert_relative_eq!(pressure(&saft, t, rho, &x), p, max_relative = 1e-8);
        }
    }
    Ok(())
}

#[test]
fn liquid_and_vapor_at_one_bar() -> Result<(), Box<dyn Error>> {
    let saft = propane()?;
    let x = arr1(&[1.0]);
    let (t, p) = (300.0, 1e5);
    let vapor = density_bracketing(&saft, Phase::Vapor, t, p, &x, Default::default())?;
    let liquid = density_bracketing(&saft, Phase::Liquid, t, p, &x, Default::default())?;
    assert_relative_eq!(vapor, p / (RGAS * t), max_relative = 2e-2);
    assert!(liquid > 10.0 * vapor);
    Ok(())
}

#[test]
fn ideal_gas_limit() -> Result<(), Box<dyn Error>> {
    let saft = propane()?;
    let x = arr1(&[1.0]);
    let (t, p) = (300.0, 1e3);
    let vapor = density_bracketing(&saft, Phase::Vapor, t, p, &x, Default::default())?;
    assert_relative_eq!(vapor, p / (RGAS * t), max_relative = 1e-3);
    Ok(())
}

#[test]
fn liquid_at_normal_boiling_point() -> Result<(), Box<dyn Error>> {
    let saft = propane()?;
    let liquid = density(
        &saft,
        231.0,
        1e5,
        &arr1(&[1.0]),
        Some(DensityInitialization::Liquid),
        Default::default(),
    )?;
    assert!(liquid > 12000.0 && liquid < 14500.0);
    Ok(())
}

#[test]
fn repeated_solves_are_identical() -> Result<(), Box<dyn Error>> {
    let saft = propane()?;
    let x = arr1(&[1.0]);
    for phase in [Phase::Vapor, Phase::Liquid] {
        let first = density_bracketing(&saft, phase, 300.0, 1e5, &x, Default::default())?;
        let second = density_bracketing(&saft, phase, 300.0, 1e5, &x, Default::default())?;
        assert_eq!(first, second);
    }
    Ok(())
}

#[test]
fn infeasible_branches() -> Result<(), Box<dyn Error>> {
    let saft = propane()?;
    let x = arr1(&[1.0]);
    // the vapor spinodal at 300 K is at about 20 bar
    let vapor = density_bracketing(&saft, Phase::Vapor, 300.0, 30e5, &x, Default::default());
    assert!(matches!(
        vapor,
        Err(DensityError::InfeasiblePhase(Phase::Vapor))
    ));
    // the liquid spinodal at 360 K is at about 28 bar
    let liquid = density_bracketing(&saft, Phase::Liquid, 360.0, 10e5, &x, Default::default());
    assert!(matches!(
        liquid,
        Err(DensityError::InfeasiblePhase(Phase::Liquid))
    ));
    Ok(())
}

#[test]
fn stable_phase() -> Result<(), Box<dyn Error>> {
    // the saturation pressure at 300 K is close to 10 bar
    let saft = propane()?;
    let x = arr1(&[1.0]);
    let t = 300.0;
    let low = density(&saft, t, 2e5, &x, None, Default::default())?;
    let vapor = density_bracketing(&saft, Phase::Vapor, t, 2e5, &x, Default::default())?;
    assert_eq!(low, vapor);
    let high = density(&saft, t, 15e5, &x, None, Default::default())?;
    let liquid = density_bracketing(&saft, Phase::Liquid, t, 15e5, &x, Default::default())?;
    assert_eq!(high, liquid);
    Ok(())
}

#[test]
fn spinodals() -> Result<(), Box<dyn Error>> {
    let saft = propane()?;
    let x = arr1(&[1.0]);
    let vapor = spinodal(&saft, Phase::Vapor, 300.0, &x, Default::default())?;
    let liquid = spinodal(&saft, Phase::Liquid, 300.0, &x, Default::default())?;
    assert_relative_eq!(vapor.density, 1788.6, max_relative = 1e-3);
    assert_relative_eq!(vapor.pressure, 20.035e5, max_relative = 1e-3);
    assert_relative_eq!(liquid.density, 8946.1, max_relative = 1e-3);
    assert_relative_eq!(liquid.pressure, -101.08e5, max_relative = 1e-3);
    assert!(matches!(
        spinodal(&saft, Phase::Vapor, 500.0, &x, Default::default()),
        Err(DensityError::SuperCritical)
    ));
    Ok(())
}
