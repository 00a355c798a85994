use crate::errors::{GeError, GeResult};
use crate::state::StateHD;
use ndarray::Array1;
use num_dual::DualNum;
use std::ops::Deref;
use std::sync::Arc;

/// A model from which models for subsets of its components can be extracted.
pub trait Subset {
    /// Return a model consisting of the components
    /// contained in component_list.
    fn subset(&self, component_list: &[usize]) -> Self;
}

impl<T: Subset> Subset for Arc<T> {
    fn subset(&self, component_list: &[usize]) -> Self {
        Arc::new(T::subset(self, component_list))
    }
}

/// An excess Gibbs energy model for liquid mixtures of arbitrary many components.
///
/// Implementors only provide the reduced excess Gibbs energy
/// $\frac{G^\mathrm{E}}{RT}$ as a function of temperature and mole numbers.
/// All derivatives (activity coefficients, excess enthalpies, ...) are
/// obtained by evaluating the function with (hyper-) dual numbers, see
/// [State](crate::State).
pub trait GeModel {
    /// Return the number of components in the system.
    fn components(&self) -> usize;

    /// Evaluate the reduced excess Gibbs energy $\frac{G^\mathrm{E}}{RT}$.
    ///
    /// The result has to be extensive, i.e., a homogeneous function of
    /// degree one in the mole numbers.
    fn reduced_excess_gibbs_energy<D: DualNum<f64> + Copy>(&self, state: &StateHD<D>) -> D;

    /// Check if the provided mole numbers are consistent with the model.
    fn validate_moles(&self, moles: &Array1<f64>) -> GeResult<()> {
        if self.components() == moles.len() {
            Ok(())
        } else {
            Err(GeError::IncompatibleComponents(
                self.components(),
                moles.len(),
            ))
        }
    }
}

/// Shared models (`Arc<G>`, `Rc<G>`, `&G`, ...) are models themselves.
impl<C: Deref<Target = G>, G: GeModel> GeModel for C {
    fn components(&self) -> usize {
        G::components(self.deref())
    }

    fn reduced_excess_gibbs_energy<D: DualNum<f64> + Copy>(&self, state: &StateHD<D>) -> D {
        G::reduced_excess_gibbs_energy(self.deref(), state)
    }
}
