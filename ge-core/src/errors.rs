use std::io;
use thiserror::Error;

/// Error type for improperly defined states and inconsistent parameters.
#[derive(Error, Debug)]
pub enum GeError {
    // generic error with custom message
    #[error("{0}")]
    Error(String),

    // errors related to states
    #[error(
        "Model is initialized for {0} components while the input specifies {1} components."
    )]
    IncompatibleComponents(usize, usize),
    #[error("Invalid state in {0}: {1} = {2}.")]
    InvalidState(String, String, f64),

    // errors related to file handling
    #[error(transparent)]
    FileIO(#[from] io::Error),

    // json errors
    #[error(transparent)]
    Serde(#[from] serde_json::Error),

    // errors related to parameter handling
    #[error("Incompatible parameters: {0}")]
    IncompatibleParameters(String),
}

/// Convenience type for `Result<T, GeError>`.
pub type GeResult<T> = Result<T, GeError>;
