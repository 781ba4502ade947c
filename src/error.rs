use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, NnErr>;

/// The crate's error type.
#[derive(Debug)]
pub enum NnErr {
    /// Two matrices (or a matrix and a vector) disagree on a dimension.
    DimensionMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// A hyper-parameter or network description is unusable.
    InvalidConfig(String),
    /// A minimizer failed on its own, independently of the objective.
    Minimizer(String),
    Io(io::Error),
    Json(serde_json::Error),
}

impl Display for NnErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NnErr::DimensionMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "dimension mismatch for {what}: got {got}, expected {expected}"
            ),
            NnErr::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            NnErr::Minimizer(msg) => write!(f, "minimizer failed: {msg}"),
            NnErr::Io(e) => write!(f, "io error: {e}"),
            NnErr::Json(e) => write!(f, "invalid JSON: {e}"),
        }
    }
}

impl Error for NnErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            NnErr::Io(e) => Some(e),
            NnErr::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for NnErr {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for NnErr {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Returns a `DimensionMismatch` error unless `got == expected`.
pub(crate) fn ensure_dim(what: &'static str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(NnErr::DimensionMismatch {
            what,
            got,
            expected,
        });
    }

    Ok(())
}
