//! Excess Gibbs energy models.
//!
//! - [NRTL]: non-random two-liquid model
mod nrtl;

pub use nrtl::NRTL;
