use approx::assert_relative_eq;
use ndarray::arr1;
use saft_density::parameter::{IdentifierOption, Parameter};
use saft_density::pcsaft::{PcSaft, PcSaftParameters};
use saft_density::*;
use std::error::Error;
use std::sync::Arc;

fn propane() -> Result<PcSaft, Box<dyn Error>> {
    let parameters = PcSaftParameters::from_json(
        vec!["74-98-6"],
        "tests/pcsaft/test_parameters.json",
        None,
        IdentifierOption::Cas,
    )?;
    Ok(PcSaft::new(Arc::new(parameters)))
}

fn residual(saft: &PcSaft, t: f64, p: f64, rho: f64) -> f64 {
    saft.pressure_and_slope(t, rho, &arr1(&[1.0])).0 - p
}

#[test]
fn newton_step_reduces_residual() -> Result<(), Box<dyn Error>> {
    let saft = propane()?;
    let x = arr1(&[1.0]);
    let (t, p) = (231.0, 1e5);
    let liquid = density_bracketing(&saft, Phase::Liquid, t, p, &x, Default::default())?;

    // from a perturbed guess
    let guess = 1.002 * liquid;
    let step = density_newton(&saft, guess, t, p, &x, SolverOptions::new().max_iter(1))?;
    assert!(step.residual.abs() < residual(&saft, t, p, guess).abs());

    // from the converged solution up to the resolution of the pressure
    let step = density_newton(&saft, liquid, t, p, &x, SolverOptions::new().max_iter(1))?;
    assert!(step.residual.abs() <= residual(&saft, t, p, liquid).abs() + 1e-6 * p);
    assert_relative_eq!(step.density, liquid, max_relative = 1e-10);
    Ok(())
}

#[test]
fn newton_converges_to_bracketing_result() -> Result<(), Box<dyn Error>> {
    let saft = propane()?;
    let x = arr1(&[1.0]);
    let (t, p) = (300.0, 1e5);
    for phase in [Phase::Vapor, Phase::Liquid] {
        let rho = density_bracketing(&saft, phase, t, p, &x, Default::default())?;
        let refined = density_newton(&saft, 1.01 * rho, t, p, &x, SolverOptions::new().tol(1e-6))?;
        assert_eq!(refined.status, Status::Converged);
        assert_relative_eq!(refined.density, rho, max_relative = 1e-8);
    }
    Ok(())
}

#[test]
fn front_door_refinement() -> Result<(), Box<dyn Error>> {
    let saft = propane()?;
    let x = arr1(&[1.0]);
    let (t, p) = (300.0, 1e5);
    let vapor = density(&saft, t, p, &x, Some(Phase::Vapor.into()), Default::default())?;
    let refined = density(
        &saft,
        t,
        p,
        &x,
        Some(DensityInitialization::InitialDensity(0.98 * vapor)),
        SolverOptions::new().tol(1e-6).verbosity(Verbosity::Iter),
    )?;
    assert_relative_eq!(refined, vapor, max_relative = 1e-8);
    Ok(())
}

#[test]
fn front_door_liquid_warm_start() -> Result<(), Box<dyn Error>> {
    let saft = propane()?;
    let x = arr1(&[1.0]);
    for (t, p) in [(231.0, 1e5), (300.0, 15e5)] {
        let liquid = density(&saft, t, p, &x, Some(Phase::Liquid.into()), Default::default())?;
        let refined = density(
            &saft,
            t,
            p,
            &x,
            Some(DensityInitialization::InitialDensity(1.001 * liquid)),
            Default::default(),
        )?;
        assert_relative_eq!(refined, liquid, max_relative = 1e-10);
        assert!(residual(&saft, t, p, refined).abs() < 1e-6 * p);
    }
    Ok(())
}
