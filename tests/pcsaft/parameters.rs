use saft_density::parameter::{IdentifierOption, Parameter, ParameterError};
use saft_density::pcsaft::{PcSaft, PcSaftParameters};
use saft_density::HelmholtzModel;
use std::sync::Arc;

const FILE: &str = "tests/pcsaft/test_parameters.json";

#[test]
fn records_follow_query_order() -> Result<(), ParameterError> {
    let parameters =
        PcSaftParameters::from_json(vec!["butane", "methane"], FILE, None, IdentifierOption::Name)?;
    let (records, binary) = parameters.records();
    assert_eq!(records[0].identifier.name.as_deref(), Some("butane"));
    assert_eq!(records[1].identifier.name.as_deref(), Some("methane"));
    assert_eq!(records[1].model_record.m, 1.0);
    assert!(binary.is_none());
    Ok(())
}

#[test]
fn missing_component() {
    let res = PcSaftParameters::from_json(vec!["ethane"], FILE, None, IdentifierOption::Name);
    assert!(matches!(res, Err(ParameterError::ComponentsNotFound(_))));
}

#[test]
fn duplicate_component() {
    let res = PcSaftParameters::from_multiple_json(
        &[(vec!["propane"], FILE), (vec!["propane"], FILE)],
        None,
        IdentifierOption::Name,
    );
    assert!(matches!(res, Err(ParameterError::IncompatibleParameters(_))));
}

#[test]
fn missing_file() {
    let res = PcSaftParameters::from_json(
        vec!["propane"],
        "tests/pcsaft/does_not_exist.json",
        None,
        IdentifierOption::Name,
    );
    assert!(matches!(res, Err(ParameterError::FileIO(_))));
}

#[test]
fn subset_of_mixture() -> Result<(), ParameterError> {
    let parameters = PcSaftParameters::from_json(
        vec!["methane", "propane", "butane"],
        FILE,
        Some("tests/pcsaft/test_binary_parameters.json"),
        IdentifierOption::Name,
    )?;
    assert_eq!(parameters.k_ij[(1, 2)], 0.02);
    assert_eq!(parameters.k_ij[(0, 2)], 0.0);
    let subset = parameters.subset(&[2, 1])?;
    assert_eq!(subset.k_ij[(0, 1)], 0.02);
    assert_eq!(subset.m[0], parameters.m[2]);
    let eos = PcSaft::new(Arc::new(subset));
    assert_eq!(eos.components(), 2);
    assert!(parameters.subset(&[3]).is_err());
    Ok(())
}
