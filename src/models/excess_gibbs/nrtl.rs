//! Non-random two-liquid (NRTL) model.
//!
//! [Renon and Prausnitz (1968)](https://doi.org/10.1002/aic.690140124)
//!
//! $$\frac{G^\mathrm{E}}{RT}=\sum_in_i\frac{\sum_jn_j\tau_{ji}G_{ji}}{\sum_kn_kG_{ki}}$$
//! with
//! $$\tau_{ij}=a_{ij}+\frac{b_{ij}}{T}\qquad G_{ij}=\exp\left(-c_{ij}\tau_{ij}\right)$$
use ge_core::parameter::{binary_records_from_json, IdentifierOption};
use ge_core::{GeError, GeModel, GeResult, StateHD, Subset};
use itertools::Itertools;
use ndarray::{Array2, Axis};
use num_dual::DualNum;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

const DEFAULT_NONRANDOMNESS: f64 = 0.3;

fn default_nonrandomness() -> [f64; 2] {
    [DEFAULT_NONRANDOMNESS; 2]
}

/// NRTL parameters of a binary pair as stored in json files.
///
/// The first entry of each array describes the interaction `id1`-`id2`
/// ($\tau_{12}$), the second one the interaction `id2`-`id1` ($\tau_{21}$).
#[derive(Serialize, Deserialize, Debug, Clone)]
struct NrtlBinaryRecord {
    a: [f64; 2],
    b: [f64; 2],
    #[serde(default = "default_nonrandomness")]
    c: [f64; 2],
}

/// Unvalidated parameter matrices, used to deserialize [NRTL].
#[derive(Deserialize)]
struct NrtlMatrices {
    a: Array2<f64>,
    b: Array2<f64>,
    c: Array2<f64>,
}

impl TryFrom<NrtlMatrices> for NRTL {
    type Error = GeError;

    fn try_from(m: NrtlMatrices) -> GeResult<Self> {
        Self::new(m.a, m.b, m.c)
    }
}

/// Non-random two-liquid excess Gibbs energy model.
///
/// # Example
///
/// ```
/// # use ge_core::{GeResult, State};
/// # use ge_models::models::excess_gibbs::NRTL;
/// # use ndarray::arr2;
/// # use ndarray::arr1;
/// # use std::sync::Arc;
/// # fn main() -> GeResult<()> {
/// let a = arr2(&[[0.0, 0.3], [0.3, 0.0]]);
/// let b = arr2(&[[0.0, 0.4], [0.4, 0.0]]);
/// let c = arr2(&[[0.0, 0.5], [0.5, 0.0]]);
/// let nrtl = Arc::new(NRTL::new(a, b, c)?);
/// let state = State::new(&nrtl, 300.0, &arr1(&[5.0, 5.6]))?;
/// let ln_gamma = state.ln_gamma();
/// # assert_eq!(ln_gamma.len(), 2);
/// # Ok(())
/// # }
/// ```
#[allow(clippy::upper_case_acronyms)]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "NrtlMatrices")]
pub struct NRTL {
    a: Array2<f64>,
    b: Array2<f64>,
    c: Array2<f64>,
}

impl NRTL {
    /// Create a new NRTL model from the matrices of the interaction parameters.
    ///
    /// All matrices have to be square and of the same size. The diagonals
    /// of `a` and `b` have to vanish.
    pub fn new(a: Array2<f64>, b: Array2<f64>, c: Array2<f64>) -> GeResult<Self> {
        let n = a.nrows();
        if n == 0 {
            return Err(GeError::IncompatibleParameters(
                "at least one component is required.".to_string(),
            ));
        }
        for (name, m) in [("a", &a), ("b", &b), ("c", &c)] {
            if m.shape() != [n, n] {
                return Err(GeError::IncompatibleParameters(format!(
                    "`{name}` has shape {:?}, expected [{n}, {n}].",
                    m.shape()
                )));
            }
            if m.iter().any(|x| !x.is_finite()) {
                return Err(GeError::IncompatibleParameters(format!(
                    "`{name}` contains non-finite values."
                )));
            }
        }
        for (name, m) in [("a", &a), ("b", &b)] {
            if m.diag().iter().any(|&x| x != 0.0) {
                return Err(GeError::IncompatibleParameters(format!(
                    "the diagonal of `{name}` has to be zero."
                )));
            }
        }
        tracing::debug!(components = n, "created NRTL model");
        Ok(Self { a, b, c })
    }

    /// Read binary interaction parameters of the given substances from a json file.
    ///
    /// Each record has the form
    /// ```json
    /// {
    ///     "id1": {"name": "water"},
    ///     "id2": {"name": "ethanol"},
    ///     "model_record": {"a": [a12, a21], "b": [b12, b21], "c": [c12, c21]}
    /// }
    /// ```
    /// where `c` is optional and defaults to 0.3. Pairs without a record
    /// are treated as ideal ($\tau_{ij}=\tau_{ji}=0$).
    pub fn from_json<P: AsRef<Path>>(
        substances: &[&str],
        file_binary: P,
        identifier_option: IdentifierOption,
    ) -> GeResult<Self> {
        let n = substances.len();
        let records: Vec<([usize; 2], NrtlBinaryRecord)> =
            binary_records_from_json(substances, file_binary, identifier_option)?;

        let mut a = Array2::zeros([n, n]);
        let mut b = Array2::zeros([n, n]);
        let mut c = Array2::zeros([n, n]);
        let mut found = HashSet::new();
        for ([i, j], record) in records {
            a[[i, j]] = record.a[0];
            a[[j, i]] = record.a[1];
            b[[i, j]] = record.b[0];
            b[[j, i]] = record.b[1];
            c[[i, j]] = record.c[0];
            c[[j, i]] = record.c[1];
            found.insert([i.min(j), i.max(j)]);
        }
        for (i, j) in (0..n).tuple_combinations() {
            if !found.contains(&[i, j]) {
                tracing::warn!(
                    "no NRTL parameters for {} and {}, the pair is treated as ideal",
                    substances[i],
                    substances[j]
                );
            }
        }
        Self::new(a, b, c)
    }

    /// Parameter matrix $a_{ij}$.
    pub fn a(&self) -> &Array2<f64> {
        &self.a
    }

    /// Parameter matrix $b_{ij}$ in K.
    pub fn b(&self) -> &Array2<f64> {
        &self.b
    }

    /// Non-randomness parameters $c_{ij}$.
    pub fn c(&self) -> &Array2<f64> {
        &self.c
    }

    /// Interaction parameters $\tau_{ij}$ at the given temperature.
    pub fn tau(&self, temperature: f64) -> Array2<f64> {
        self.tau_dual(temperature)
    }

    /// Boltzmann factors $G_{ij}$ at the given temperature.
    pub fn g(&self, temperature: f64) -> Array2<f64> {
        self.ln_g_dual(&self.tau_dual(temperature)).mapv(f64::exp)
    }

    fn tau_dual<D: DualNum<f64> + Copy>(&self, temperature: D) -> Array2<D> {
        let t_inv = temperature.recip();
        Array2::from_shape_fn(self.a.raw_dim(), |ij| t_inv * self.b[ij] + self.a[ij])
    }

    fn ln_g_dual<D: DualNum<f64> + Copy>(&self, tau: &Array2<D>) -> Array2<D> {
        Array2::from_shape_fn(tau.raw_dim(), |ij| tau[ij] * -self.c[ij])
    }
}

impl GeModel for NRTL {
    fn components(&self) -> usize {
        self.a.nrows()
    }

    fn reduced_excess_gibbs_energy<D: DualNum<f64> + Copy>(&self, state: &StateHD<D>) -> D {
        let n = &state.moles;
        let tau = self.tau_dual(state.temperature);
        let ln_g = self.ln_g_dual(&tau);
        let nc = self.components();

        let mut ge = D::zero();
        for i in 0..nc {
            // G_ji are scaled by the largest factor of a present component,
            // so the denominator cannot underflow
            let shift = (0..nc)
                .filter(|&j| n[j].re() > 0.0)
                .map(|j| ln_g[[j, i]].re())
                .fold(f64::NEG_INFINITY, f64::max);
            if shift == f64::NEG_INFINITY {
                continue;
            }
            let mut numerator = D::zero();
            let mut denominator = D::zero();
            for j in 0..nc {
                let g = (ln_g[[j, i]] - shift).exp();
                // only absent components can overflow, they do not contribute
                if !g.re().is_finite() {
                    continue;
                }
                numerator += n[j] * tau[[j, i]] * g;
                denominator += n[j] * g;
            }
            ge += n[i] * numerator / denominator;
        }
        ge
    }
}

impl Subset for NRTL {
    /// Parameters of the components in `component_list`, in that order.
    ///
    /// # Panics
    ///
    /// Panics if an index in `component_list` is not smaller than the
    /// number of components.
    fn subset(&self, component_list: &[usize]) -> Self {
        let select = |m: &Array2<f64>| {
            m.select(Axis(0), component_list)
                .select(Axis(1), component_list)
        };
        Self {
            a: select(&self.a),
            b: select(&self.b),
            c: select(&self.c),
        }
    }
}

impl fmt::Display for NRTL {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "NRTL(components={})", self.components())?;
        writeln!(f, "a:\n{}", self.a)?;
        writeln!(f, "b:\n{}", self.b)?;
        write!(f, "c:\n{}", self.c)
    }
}
