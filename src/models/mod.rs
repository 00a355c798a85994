//! Thermodynamic models.
pub mod excess_gibbs;
