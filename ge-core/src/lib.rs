#![warn(clippy::all)]
//! Core traits and functionalities for excess Gibbs energy models.
//!
//! A model only has to provide the reduced excess Gibbs energy
//! $\frac{G^\mathrm{E}}{RT}$ by implementing [GeModel]. Activity
//! coefficients, excess enthalpies, entropies and all required
//! derivatives are then available on a [State].

mod errors;
mod ge_model;
pub mod parameter;
mod state;
pub use errors::{GeError, GeResult};
pub use ge_model::{GeModel, Subset};
pub use state::{CacheStatistics, Derivative, ExcessGibbsDerivatives, State, StateHD, RGAS};
