use approx::assert_relative_eq;
use ge_core::parameter::IdentifierOption;
use ge_core::{GeResult, State, RGAS};
use ge_models::models::excess_gibbs::NRTL;
use ndarray::{arr1, Array1, Array2};
use std::error::Error;
use std::sync::Arc;

fn ternary() -> Result<Arc<NRTL>, Box<dyn Error>> {
    Ok(Arc::new(NRTL::from_json(
        &["water", "ethanol", "acetone"],
        "tests/nrtl/test_parameters.json",
        IdentifierOption::Name,
    )?))
}

/// Textbook form of the multicomponent NRTL activity coefficients.
fn ln_gamma_explicit(nrtl: &NRTL, temperature: f64, x: &Array1<f64>) -> Array1<f64> {
    let tau = nrtl.tau(temperature);
    let g = nrtl.g(temperature);
    let n = x.len();
    let sum_g = Array1::from_shape_fn(n, |i| (0..n).map(|k| x[k] * g[[k, i]]).sum::<f64>());
    let sum_tau_g = Array1::from_shape_fn(n, |i| {
        (0..n).map(|k| x[k] * tau[[k, i]] * g[[k, i]]).sum::<f64>()
    });
    Array1::from_shape_fn(n, |i| {
        sum_tau_g[i] / sum_g[i]
            + (0..n)
                .map(|j| x[j] * g[[i, j]] / sum_g[j] * (tau[[i, j]] - sum_tau_g[j] / sum_g[j]))
                .sum::<f64>()
    })
}

#[test]
fn ln_gamma_multicomponent() -> Result<(), Box<dyn Error>> {
    let nrtl = ternary()?;
    let t = 340.0;
    let x = arr1(&[0.2, 0.5, 0.3]);
    let s = State::new_x(&nrtl, t, &x)?;
    assert_relative_eq!(
        s.ln_gamma(),
        ln_gamma_explicit(&nrtl, t, &x),
        max_relative = 1e-12
    );
    Ok(())
}

#[test]
fn ln_gamma_is_intensive() -> Result<(), Box<dyn Error>> {
    let nrtl = ternary()?;
    let moles = arr1(&[1.0, 2.5, 1.5]);
    let s = State::new(&nrtl, 310.0, &moles)?;
    let s10 = State::new(&nrtl, 310.0, &(&moles * 10.0))?;
    assert_relative_eq!(s.ln_gamma(), s10.ln_gamma(), max_relative = 1e-12);
    assert_relative_eq!(
        s10.excess_gibbs_energy(),
        10.0 * s.excess_gibbs_energy(),
        max_relative = 1e-12
    );
    Ok(())
}

#[test]
fn euler_and_gibbs_duhem() -> Result<(), Box<dyn Error>> {
    let nrtl = ternary()?;
    let t = 325.0;
    let moles = arr1(&[0.8, 1.4, 0.6]);
    let s = State::new(&nrtl, t, &moles)?;

    assert_relative_eq!(
        s.excess_gibbs_energy(),
        RGAS * t * (&moles * &s.ln_gamma()).sum(),
        max_relative = 1e-12
    );

    let dln_gamma_dn = s.dln_gamma_dn();
    assert_relative_eq!(dln_gamma_dn, dln_gamma_dn.t(), max_relative = 1e-10);
    let gibbs_duhem = dln_gamma_dn.t().dot(&moles);
    assert_relative_eq!(gibbs_duhem, Array1::<f64>::zeros(3), epsilon = 1e-12);
    Ok(())
}

#[test]
fn temperature_derivatives() -> Result<(), Box<dyn Error>> {
    let nrtl = ternary()?;
    let t = 330.0;
    let h = 1e-3;
    let moles = arr1(&[0.3, 0.3, 0.4]);
    let s = State::new(&nrtl, t, &moles)?;
    let sp = s.update_temperature(t + h)?;
    let sm = s.update_temperature(t - h)?;

    let dge_dt = (sp.excess_gibbs_energy() - sm.excess_gibbs_energy()) / (2.0 * h);
    assert_relative_eq!(s.dge_dt(), dge_dt, max_relative = 1e-6);

    let d2ge_dt2 = (sp.dge_dt() - sm.dge_dt()) / (2.0 * h);
    assert_relative_eq!(s.d2ge_dt2(), d2ge_dt2, max_relative = 1e-6);

    let dln_gamma_dt = (sp.ln_gamma() - sm.ln_gamma()) / (2.0 * h);
    assert_relative_eq!(s.dln_gamma_dt(), dln_gamma_dt, max_relative = 1e-6);

    let dhe_dt = (sp.excess_enthalpy() - sm.excess_enthalpy()) / (2.0 * h);
    assert_relative_eq!(s.dhe_dt(), dhe_dt, max_relative = 1e-6);
    assert_relative_eq!(s.excess_heat_capacity(), dhe_dt, max_relative = 1e-6);

    let dse_dt = (sp.excess_entropy() - sm.excess_entropy()) / (2.0 * h);
    assert_relative_eq!(s.dse_dt(), dse_dt, max_relative = 1e-6);
    Ok(())
}

#[test]
fn mole_number_derivatives() -> Result<(), Box<dyn Error>> {
    let nrtl = ternary()?;
    let t = 300.0;
    let h = 1e-6;
    let moles = arr1(&[0.3, 0.3, 0.4]);
    let s = State::new(&nrtl, t, &moles)?;
    let d = s.excess_gibbs_energy_derivatives();

    let mut dln_gamma_dn = Array2::<f64>::zeros((3, 3));
    let mut dhe_dn = Array1::<f64>::zeros(3);
    for j in 0..3 {
        let mut np = moles.clone();
        let mut nm = moles.clone();
        np[j] += h;
        nm[j] -= h;
        let sp = State::new(&nrtl, t, &np)?;
        let sm = State::new(&nrtl, t, &nm)?;
        dln_gamma_dn
            .column_mut(j)
            .assign(&((sp.ln_gamma() - sm.ln_gamma()) / (2.0 * h)));
        dhe_dn[j] = (sp.excess_enthalpy() - sm.excess_enthalpy()) / (2.0 * h);
    }
    assert_relative_eq!(s.dln_gamma_dn(), dln_gamma_dn, max_relative = 1e-6);
    assert_relative_eq!(s.dhe_dn(), dhe_dn, max_relative = 1e-6);
    assert_relative_eq!(d.d2ge_dn2, dln_gamma_dn * (RGAS * t), max_relative = 1e-6);
    assert_relative_eq!(d.dge_dn, s.ln_gamma() * (RGAS * t), max_relative = 1e-12);
    assert_relative_eq!(s.dse_dn(), -&d.d2ge_dtdn, max_relative = 1e-12);
    Ok(())
}

#[test]
fn gibbs_helmholtz() -> Result<(), Box<dyn Error>> {
    let nrtl = ternary()?;
    let t = 315.0;
    let s = State::new_x(&nrtl, t, &arr1(&[0.6, 0.1, 0.3]))?;
    assert_relative_eq!(
        s.excess_gibbs_energy(),
        s.excess_enthalpy() - t * s.excess_entropy(),
        max_relative = 1e-12
    );
    assert_relative_eq!(
        s.molar_excess_gibbs_energy(),
        s.molar_excess_enthalpy() - t * s.molar_excess_entropy(),
        max_relative = 1e-12
    );
    assert_relative_eq!(
        s.dhe_dn(),
        s.dge_dn() + s.dse_dn() * t,
        max_relative = 1e-12
    );
    Ok(())
}

#[test]
fn component_order() -> Result<(), Box<dyn Error>> {
    let forward = ternary()?;
    let backward = Arc::new(NRTL::from_json(
        &["acetone", "ethanol", "water"],
        "tests/nrtl/test_parameters.json",
        IdentifierOption::Name,
    )?);
    let t = 320.0;
    let sf = State::new(&forward, t, &arr1(&[0.2, 0.3, 0.5]))?;
    let sb = State::new(&backward, t, &arr1(&[0.5, 0.3, 0.2]))?;
    let ln_gamma_b = sb.ln_gamma();
    assert_relative_eq!(
        sf.ln_gamma(),
        arr1(&[ln_gamma_b[2], ln_gamma_b[1], ln_gamma_b[0]]),
        max_relative = 1e-12
    );
    assert_relative_eq!(
        sf.excess_enthalpy(),
        sb.excess_enthalpy(),
        max_relative = 1e-12
    );
    Ok(())
}

#[test]
fn water_ethanol_is_nonideal() -> GeResult<()> {
    let nrtl = Arc::new(NRTL::from_json(
        &["water", "ethanol"],
        "tests/nrtl/test_parameters.json",
        IdentifierOption::Name,
    )?);
    let s = State::new_x(&nrtl, 350.0, &arr1(&[0.5, 0.5]))?;
    assert!(s.activity_coefficient().iter().all(|&g| g > 1.0));
    assert!(s.excess_gibbs_energy() > 0.0);
    Ok(())
}
