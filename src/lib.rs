//! sdc-react: per-cell implicit reaction solver for SDC hydrodynamics
//!
//! A library for the stiff per-cell solve at the heart of a
//! Spectral-Deferred-Correction (SDC) reactive-hydrodynamics scheme: given a
//! cell's old-time conserved state, an explicit advective/external
//! contribution, and a timestep, find the new state that simultaneously
//! satisfies the reaction ODEs and the SDC correction equation.
//!
//! # Architecture
//!
//! sdc-react is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - Physical closures (EOS, reaction network) define equations
//!    - The solver provides the Newton/subdivision machinery
//!
//! 2. **Purity and Reentrancy**
//!    - Every solve is a pure function of its inputs
//!    - No shared mutable state crosses cell boundaries, so an outer
//!      data-parallel loop can invoke it once per cell without locking
//!
//! # Quick Start
//!
//! ```rust
//! use sdc_react::models::{GammaLawEos, TwoSpeciesDecay};
//! use sdc_react::physics::{Conserved, EosInput, EosState, EquationOfState};
//! use sdc_react::solver::{subdivide_solve, SdcConfig};
//! use nalgebra::DVector;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // 1. Physical closures: ideal-gas EOS, linear X0 -> X1 chain
//! let eos = GammaLawEos::new(5.0 / 3.0, &[1.0, 1.0]);
//! let network = TwoSpeciesDecay::new(1.0, 0.0);
//!
//! // 2. A thermodynamically consistent old-time state
//! let rho = 1.0;
//! let xn = DVector::from_vec(vec![0.8, 0.2]);
//! let mut eos_state = EosState::new(rho, xn.clone());
//! eos_state.t = 1.0e6;
//! eos.evaluate(EosInput::RhoT, &mut eos_state)?;
//!
//! let mut u_old = Conserved::new(rho, xn * rho);
//! u_old.rho_e = rho * eos_state.e;
//! u_old.rho_etot = u_old.rho_e;
//! u_old.temperature = eos_state.t;
//!
//! // 3. Solve one cell over one timestep (no advection here; the old
//! //    state doubles as the initial guess)
//! let advective = Conserved::new(0.0, DVector::zeros(2));
//! let mut u_new = u_old.clone();
//!
//! let config = SdcConfig::default();
//! let report = subdivide_solve(
//!     1.0e-3, &u_old, &mut u_new, &advective, 1, &eos, &network, &config,
//! )?;
//!
//! // 4. Inspect the result
//! assert_eq!(report.subdivisions, 1);
//! assert!(u_new.species[0] < u_old.species[0]);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: state containers and the EOS/network interfaces
//! - [`solver`]: Newton solver, subdivision driver, batch facade
//! - [`models`]: concrete closures with known analytic behavior

// Core modules
pub mod models;
pub mod physics;
pub mod solver;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //!
    //! use sdc_react::prelude::*;
    //! ```
    pub use crate::physics::{
        Conserved, EnergyMode, EosError, EosInput, EosState, EquationOfState, NetworkError,
        ReactionNetwork, ReactionRates,
    };
    pub use crate::solver::{
        newton_solve, solve_cells, subdivide_solve, CellUpdate, NewtonReport, SdcConfig,
        SolveReport, SolverError,
    };
}
