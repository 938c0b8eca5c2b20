use thiserror::Error;

/// Errors produced while loading or validating the reference data document.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read reference data file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to fetch reference data: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to parse reference data document: {0}")]
    Parse(#[from] serde_json::Error),

    /// A club appears in `clubData` but is missing from one of the other
    /// three tables. All four tables share one key set.
    #[error("club '{club}' is missing from the '{table}' table")]
    InconsistentTables { club: String, table: &'static str },
}

/// Errors the estimation engine reports to its caller.
///
/// Expected edge cases (out-of-range interpolation, degenerate carry range,
/// capped loft) are NOT errors; they surface as absent or flagged fields on
/// the result.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("reference data is not loaded yet")]
    NotReady,

    #[error("unknown club '{0}'")]
    UnknownClub(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}
