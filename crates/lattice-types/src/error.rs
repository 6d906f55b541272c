use thiserror::Error;

#[derive(Error, Debug)]
pub enum LatticeError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unsupported quadrature order {order}: supported orders are {supported:?}")]
    UnsupportedOrder { order: usize, supported: Vec<usize> },

    #[error("Degenerate {quantity}: {message}")]
    Degenerate {
        quantity: &'static str,
        message: String,
    },

    #[error("Non-finite angular flux at row={row}, col={col}, angle={angle}")]
    NonFiniteFlux { row: usize, col: usize, angle: usize },

    #[error(
        "Sweep did not converge after {iterations} iterations: \
         residual {residual:.3e} > tolerance {tolerance:.3e}"
    )]
    NotConverged {
        iterations: usize,
        residual: f64,
        tolerance: f64,
    },

    #[error("Cell index out of bounds: row={row}, col={col}")]
    GridOutOfBounds { row: usize, col: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Export error: {0}")]
    Export(String),
}

impl LatticeError {
    /// Shorthand for a [`LatticeError::Degenerate`] on a named quantity.
    pub fn degenerate(quantity: &'static str, message: impl Into<String>) -> Self {
        LatticeError::Degenerate {
            quantity,
            message: message.into(),
        }
    }
}

pub type LatticeResult<T> = Result<T, LatticeError>;
