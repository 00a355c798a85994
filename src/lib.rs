#![warn(clippy::all)]
//! Excess Gibbs energy models for liquid mixtures.
//!
//! The models implement [GeModel](ge_core::GeModel) and are used together with
//! a [State](ge_core::State) to calculate activity coefficients and excess
//! properties.

pub mod models;
