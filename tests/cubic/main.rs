use approx::assert_relative_eq;
use ndarray::arr1;
use saft_density::constants::RGAS;
use saft_density::cubic::{VanDerWaals, VanDerWaalsParameters};
use saft_density::evaluate::pressure;
use saft_density::parameter::{IdentifierOption, Parameter};
use saft_density::*;
use std::error::Error;
use std::sync::Arc;

fn van_der_waals(substances: Vec<&str>) -> Result<VanDerWaals, Box<dyn Error>> {
    let parameters = VanDerWaalsParameters::from_json(
        substances,
        "tests/cubic/test_parameters.json",
        None,
        IdentifierOption::Name,
    )?;
    Ok(VanDerWaals::new(Arc::new(parameters)))
}

#[test]
fn water_at_one_bar() -> Result<(), Box<dyn Error>> {
    let vdw = van_der_waals(vec!["water"])?;
    let x = arr1(&[1.0]);
    let (t, p) = (0.7 * 647.1, 1e5);
    let vapor = density(&vdw, t, p, &x, Some(DensityInitialization::Vapor), Default::default())?;
    let liquid = density(&vdw, t, p, &x, Some(DensityInitialization::Liquid), Default::default())?;
    assert_relative_eq!(vapor, p / (RGAS * t), max_relative = 1e-2);
    assert!(liquid >= 10.0 * vapor);
    assert_relative_eq!(pressure(&vdw, t, liquid, &x), p, max_relative = 1e-8);
    Ok(())
}

#[test]
fn supercritical_isotherm_has_single_root() -> Result<(), Box<dyn Error>> {
    let vdw = van_der_waals(vec!["propane"])?;
    let x = arr1(&[1.0]);
    let (t, p) = (1.5 * 369.96, 3.0 * 4.25e6);
    let vapor = density_bracketing(&vdw, Phase::Vapor, t, p, &x, Default::default())?;
    let liquid = density_bracketing(&vdw, Phase::Liquid, t, p, &x, Default::default())?;
    assert_relative_eq!(vapor, liquid, max_relative = 1e-10);
    assert!(matches!(
        spinodal(&vdw, Phase::Liquid, t, &x, Default::default()),
        Err(DensityError::SuperCritical)
    ));
    Ok(())
}

#[test]
fn mixture_with_water() -> Result<(), Box<dyn Error>> {
    let vdw = van_der_waals(vec!["propane", "water"])?;
    let x = arr1(&[0.9, 0.1]);
    let (t, p) = (400.0, 1e5);
    let vapor = density(&vdw, t, p, &x, None, Default::default())?;
    assert_relative_eq!(vapor, p / (RGAS * t), max_relative = 1e-2);
    Ok(())
}
