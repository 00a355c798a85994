use ge_core::parameter::IdentifierOption;
use ge_core::{GeError, GeModel};
use ge_models::models::excess_gibbs::*;
use ndarray::arr2;
use std::error::Error;

const PARAMETERS: &str = "tests/nrtl/test_parameters.json";

#[test]
fn from_json() -> Result<(), Box<dyn Error>> {
    let nrtl = NRTL::from_json(&["water", "ethanol"], PARAMETERS, IdentifierOption::Name)?;
    assert_eq!(nrtl.components(), 2);
    assert_eq!(nrtl.a(), &arr2(&[[0.0, 3.4578], [-0.8009, 0.0]]));
    assert_eq!(nrtl.b(), &arr2(&[[0.0, -586.0809], [246.18, 0.0]]));
    assert_eq!(nrtl.c(), &arr2(&[[0.0, 0.3], [0.3, 0.0]]));
    Ok(())
}

#[test]
fn from_json_reversed_pair() -> Result<(), Box<dyn Error>> {
    let nrtl = NRTL::from_json(&["ethanol", "water"], PARAMETERS, IdentifierOption::Name)?;
    assert_eq!(nrtl.a(), &arr2(&[[0.0, -0.8009], [3.4578, 0.0]]));
    assert_eq!(nrtl.b(), &arr2(&[[0.0, 246.18], [-586.0809, 0.0]]));
    Ok(())
}

#[test]
fn from_json_cas() -> Result<(), Box<dyn Error>> {
    let nrtl = NRTL::from_json(
        &["64-17-5", "67-64-1", "7732-18-5"],
        PARAMETERS,
        IdentifierOption::Cas,
    )?;
    assert_eq!(nrtl.components(), 3);
    // ethanol - acetone uses the default non-randomness
    assert_eq!(nrtl.c()[[0, 1]], 0.3);
    assert_eq!(nrtl.c()[[1, 0]], 0.3);
    // acetone - water
    assert_eq!(nrtl.b()[[1, 2]], 316.66);
    assert_eq!(nrtl.b()[[2, 1]], 586.2);
    assert_eq!(nrtl.c()[[2, 1]], 0.5343);
    Ok(())
}

#[test]
fn missing_pair_is_ideal() -> Result<(), Box<dyn Error>> {
    let nrtl = NRTL::from_json(&["water", "hexane"], PARAMETERS, IdentifierOption::Name)?;
    assert_eq!(nrtl.a(), &arr2(&[[0.0, 0.0], [0.0, 0.0]]));
    assert_eq!(nrtl.b(), &arr2(&[[0.0, 0.0], [0.0, 0.0]]));
    Ok(())
}

#[test]
fn duplicate_substances() {
    let nrtl = NRTL::from_json(&["water", "water"], PARAMETERS, IdentifierOption::Name);
    assert!(matches!(
        nrtl,
        Err(GeError::IncompatibleParameters(t))
        if t == "A substance was defined more than once."
    ));
}

#[test]
fn missing_file() {
    let nrtl = NRTL::from_json(
        &["water", "ethanol"],
        "tests/nrtl/does_not_exist.json",
        IdentifierOption::Name,
    );
    assert!(matches!(nrtl, Err(GeError::FileIO(_))));
}
