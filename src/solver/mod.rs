//! Numerical solvers for the implicit SDC reaction update
//!
//! # Core Concepts
//!
//! The solve is layered, each layer with a single responsibility:
//!
//! 1. **Residual/Jacobian builder** (`residual`, crate-private) — assembles
//!    `f(U) = U - dt R(U) - f_source` and the chained Jacobian
//!    `J = I - dt (dR/dw)(dw/dU)` from the EOS and network derivatives.
//! 2. **Newton solver** ([`newton_solve`]) — iterates build / LU-solve /
//!    step / weighted-norm test; reports success, a singular matrix, or
//!    non-convergence. Never retries.
//! 3. **Subdivision driver** ([`subdivide_solve`]) — the only layer that
//!    retries, and only by halving the timestep geometrically, restarting
//!    each attempt from the original old-time state.
//! 4. **Batch facade** ([`solve_cells`]) — maps the driver over independent
//!    cells, in parallel under the `parallel` feature.
//!
//! # Control Flow
//!
//! ```text
//! solve_cells ──► subdivide_solve ──► newton_solve ──► build_residual
//!                                                        │
//!                                          ┌─────────────┼─────────────┐
//!                                          ▼             ▼             ▼
//!                                         EOS         network       LU solve
//! ```
//!
//! # Error Handling
//!
//! All failure conditions are variants of [`SolverError`]; callers must not
//! trust the output state when a solve returns an error.

mod batch;
mod config;
mod error;
mod newton;
mod residual;
mod subdivide;

pub use batch::{solve_cells, CellUpdate};
pub use config::SdcConfig;
pub use error::SolverError;
pub use newton::{newton_solve, NewtonReport};
pub use subdivide::{subdivide_solve, SolveReport};
