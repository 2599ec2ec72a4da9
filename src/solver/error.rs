//! Solver error taxonomy
//!
//! Three operational failures can come out of a solve:
//!
//! - [`SolverError::SingularMatrix`]: the Jacobian factorization failed;
//!   surfaced immediately by the Newton solver, never retried there.
//! - [`SolverError::ConvergenceFailure`]: the iteration cap was reached;
//!   carries the last weighted error norm for diagnostics.
//! - [`SolverError::Eos`] / [`SolverError::Network`]: an external
//!   collaborator failed; fatal to the current attempt.
//!
//! All retrying (by timestep subdivision only) happens in
//! [`crate::solver::subdivide`]. Callers must not trust the output state
//! when a solve returns an error.

use thiserror::Error;

use crate::physics::{EosError, NetworkError};

/// Failure conditions of the Newton solver and the subdivision driver.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    /// Jacobian LU factorization found a singular or near-singular matrix.
    #[error("Jacobian factorization failed: singular matrix")]
    SingularMatrix,

    /// The Newton iteration cap was reached without meeting tolerance.
    #[error("Newton iteration did not converge (last weighted error norm {err_norm:.3e})")]
    ConvergenceFailure {
        /// Weighted RMS error norm of the last attempted step.
        err_norm: f64,
    },

    /// Equation-of-state evaluation failed.
    #[error("equation of state failed: {0}")]
    Eos(#[from] EosError),

    /// Reaction-network evaluation failed.
    #[error("reaction network failed: {0}")]
    Network(#[from] NetworkError),

    /// The solver configuration is not usable.
    #[error("invalid solver configuration: {0}")]
    InvalidConfiguration(String),

    /// Input states disagree with the network's dimensions.
    #[error("state dimension mismatch: {0}")]
    DimensionMismatch(String),
}

impl SolverError {
    /// Whether retrying with a smaller timestep can possibly help.
    ///
    /// Configuration and dimension errors are deterministic — the
    /// subdivision driver surfaces them immediately instead of subdividing.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            SolverError::InvalidConfiguration(_) | SolverError::DimensionMismatch(_)
        )
    }
}
