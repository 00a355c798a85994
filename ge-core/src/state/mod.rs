//! Description of a liquid mixture at given temperature and composition.
//!
//! The natural variables of the excess Gibbs energy are
//! * the temperature
//! * an array of mole numbers
//!
//! (the pressure dependence is neglected). Internally, all properties
//! are computed using such states as input.
use crate::errors::{GeError, GeResult};
use crate::ge_model::GeModel;
use cache::Cache;
pub use cache::CacheStatistics;
use ndarray::prelude::*;
use num_dual::*;
use std::fmt;
use std::sync::{Arc, Mutex};

mod cache;
mod properties;
pub use properties::ExcessGibbsDerivatives;

/// Universal gas constant in J/(mol K).
pub const RGAS: f64 = 8.31446261815324;

/// Tolerance for the sum of mole fractions.
const MOLEFRACS_TOL: f64 = 1e-10;

/// Temperature and composition of the mixture including their derivatives.
///
/// Properties are stored as generalized (hyper) dual numbers which allows
/// for automatic differentiation.
#[derive(Clone, Debug)]
pub struct StateHD<D: DualNum<f64>> {
    /// temperature in Kelvin
    pub temperature: D,
    /// mole numbers in mol
    pub moles: Array1<D>,
    /// total number of moles
    pub total_moles: D,
    /// mole fractions
    pub molefracs: Array1<D>,
}

impl<D: DualNum<f64> + Copy> StateHD<D> {
    /// Create a new `StateHD` for given temperature and moles.
    pub fn new(temperature: D, moles: Array1<D>) -> Self {
        let total_moles = moles.sum();
        let molefracs = moles.mapv(|n| n / total_moles);

        Self {
            temperature,
            moles,
            total_moles,
            molefracs,
        }
    }
}

/// Thermodynamic state of a liquid mixture.
///
/// The state is specified by the variables of the excess Gibbs energy: temperature $T$
/// and mole numbers $n_i$. It contains a reference to the model used to create the state
/// and can therefore be used directly to calculate all excess properties.
///
/// Partial derivatives of $g=\frac{G^\mathrm{E}}{RT}$ are cached in the state. Evaluating
/// a higher derivative stores all lower derivatives that are computed along the way, so
/// it is more efficient to request the highest derivatives first. For example, the excess
/// heat capacity also provides the excess entropy and the excess enthalpy.
///
/// `State` objects are meant to be immutable. If individual fields are changed, the
/// calculations are wrong as the internal fields of the state are not updated.
#[derive(Debug)]
pub struct State<G> {
    /// Excess Gibbs energy model
    pub model: Arc<G>,
    /// Temperature $T$ in K
    pub temperature: f64,
    /// Mole numbers $n_i$ in mol
    pub moles: Array1<f64>,
    /// Total number of moles $n=\sum_in_i$
    pub total_moles: f64,
    /// Mole fractions $x_i=\frac{n_i}{n}$
    pub molefracs: Array1<f64>,
    /// Cache
    cache: Mutex<Cache>,
}

impl<G> Clone for State<G> {
    fn clone(&self) -> Self {
        Self {
            model: self.model.clone(),
            temperature: self.temperature,
            moles: self.moles.clone(),
            total_moles: self.total_moles,
            molefracs: self.molefracs.clone(),
            cache: Mutex::new(self.cache.lock().unwrap().clone()),
        }
    }
}

impl<G: GeModel> fmt::Display for State<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.model.components() == 1 {
            write!(f, "T = {:.5} K", self.temperature)
        } else {
            write!(f, "T = {:.5} K, x = {:.5}", self.temperature, self.molefracs)
        }
    }
}

/// Derivatives of the excess Gibbs energy.
#[derive(Clone, Copy, Eq, Hash, PartialEq, Debug, PartialOrd, Ord)]
pub enum Derivative {
    /// Derivative with respect to temperature.
    DT,
    /// Derivative with respect to component `i`.
    DN(usize),
}

/// Partial derivatives of $g$ that are stored in the cache.
///
/// Second derivatives are keyed in ascending order of their variables,
/// use [PartialDerivative::second] to construct them.
#[derive(Clone, Copy, Eq, Hash, PartialEq, Debug)]
pub(crate) enum PartialDerivative {
    Zeroth,
    First(Derivative),
    Second(Derivative, Derivative),
}

impl PartialDerivative {
    pub(crate) fn second(derivative1: Derivative, derivative2: Derivative) -> Self {
        Self::Second(derivative1.min(derivative2), derivative1.max(derivative2))
    }
}

/// # State constructors
impl<G: GeModel> State<G> {
    /// Return a new `State` given a temperature and an array of mole numbers.
    ///
    /// The temperature has to be positive and finite, the mole numbers
    /// non-negative and finite with a positive sum.
    pub fn new(model: &Arc<G>, temperature: f64, moles: &Array1<f64>) -> GeResult<Self> {
        model.validate_moles(moles)?;
        validate(temperature, moles)?;
        tracing::trace!(temperature, components = moles.len(), "new state");
        Ok(Self::new_unchecked(model, temperature, moles))
    }

    fn new_unchecked(model: &Arc<G>, temperature: f64, moles: &Array1<f64>) -> Self {
        let total_moles = moles.sum();
        let molefracs = moles / total_moles;
        State {
            model: model.clone(),
            temperature,
            moles: moles.to_owned(),
            total_moles,
            molefracs,
            cache: Mutex::new(Cache::with_capacity(model.components())),
        }
    }

    /// Return a new `State` for one mole of mixture given a temperature and mole fractions.
    pub fn new_x(model: &Arc<G>, temperature: f64, molefracs: &Array1<f64>) -> GeResult<Self> {
        let sum = molefracs.sum();
        if (sum - 1.0).abs() > MOLEFRACS_TOL {
            return Err(GeError::InvalidState(
                String::from("State::new_x"),
                String::from("sum of molefracs"),
                sum,
            ));
        }
        Self::new(model, temperature, molefracs)
    }

    /// Return a new `State` for one mole of a pure component.
    pub fn new_pure(model: &Arc<G>, temperature: f64) -> GeResult<Self> {
        Self::new(model, temperature, &arr1(&[1.0]))
    }

    /// Update the state with the given temperature.
    pub fn update_temperature(&self, temperature: f64) -> GeResult<Self> {
        Self::new(&self.model, temperature, &self.moles)
    }
}

impl<G> State<G> {
    /// Hits and misses of the derivative cache of this state.
    pub fn cache_statistics(&self) -> CacheStatistics {
        self.cache.lock().unwrap().statistics()
    }

    /// Creates a [StateHD] cloning temperature and moles.
    pub fn derive0(&self) -> StateHD<f64> {
        StateHD::new(self.temperature, self.moles.clone())
    }

    /// Creates a [StateHD] taking the first derivative.
    pub fn derive1(&self, derivative: Derivative) -> StateHD<Dual64> {
        let mut t = Dual64::from(self.temperature);
        let mut n = self.moles.mapv(Dual64::from);
        match derivative {
            Derivative::DT => t = t.derivative(),
            Derivative::DN(i) => n[i] = n[i].derivative(),
        }
        StateHD::new(t, n)
    }

    /// Creates a [StateHD] taking the first and second (partial) derivatives.
    pub fn derive2(&self, derivative: Derivative) -> StateHD<Dual2_64> {
        let mut t = Dual2_64::from(self.temperature);
        let mut n = self.moles.mapv(Dual2_64::from);
        match derivative {
            Derivative::DT => t = t.derivative(),
            Derivative::DN(i) => n[i] = n[i].derivative(),
        }
        StateHD::new(t, n)
    }

    /// Creates a [StateHD] taking the first and second (partial) derivatives.
    ///
    /// If both derivatives are with respect to the same variable, the
    /// mixed part of the hyper-dual number is the second derivative.
    pub fn derive2_mixed(
        &self,
        derivative1: Derivative,
        derivative2: Derivative,
    ) -> StateHD<HyperDual64> {
        let mut t = HyperDual64::from(self.temperature);
        let mut n = self.moles.mapv(HyperDual64::from);
        match derivative1 {
            Derivative::DT => t = t.derivative1(),
            Derivative::DN(i) => n[i] = n[i].derivative1(),
        }
        match derivative2 {
            Derivative::DT => t = t.derivative2(),
            Derivative::DN(i) => n[i] = n[i].derivative2(),
        }
        StateHD::new(t, n)
    }
}

/// Validate the given temperature and mole numbers.
///
/// Properties are valid if
/// * they are finite
/// * they have a positive sign
/// * the total number of moles is not zero
fn validate(temperature: f64, moles: &Array1<f64>) -> GeResult<()> {
    if !temperature.is_finite() || temperature <= 0.0 {
        return Err(GeError::InvalidState(
            String::from("validate"),
            String::from("temperature"),
            temperature,
        ));
    }
    for &n in moles.iter() {
        if !n.is_finite() || n.is_sign_negative() {
            return Err(GeError::InvalidState(
                String::from("validate"),
                String::from("moles"),
                n,
            ));
        }
    }
    let total_moles = moles.sum();
    if total_moles <= 0.0 {
        return Err(GeError::InvalidState(
            String::from("validate"),
            String::from("total moles"),
            total_moles,
        ));
    }
    Ok(())
}
