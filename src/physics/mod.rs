//! Physical state, EOS, and reaction-network interfaces
//!
//! This module defines the "WHAT" of the per-cell solve:
//!
//! - [`Conserved`]: the full conserved state of one grid cell, plus the
//!   explicit mapping to the reduced reacting subset ([`state::reduced`])
//! - [`EquationOfState`]: the thermodynamic closure, consumed as a pure
//!   function with documented failure modes
//! - [`ReactionNetwork`]: reaction source terms and their Jacobian over the
//!   primitive basis
//!
//! The numerical methods that solve the coupled system live in
//! [`crate::solver`]; concrete EOS/network implementations live in
//! [`crate::models`].

pub mod eos;
pub mod network;
pub mod state;

pub use eos::{CompositionDerivatives, EosError, EosInput, EosState, EquationOfState};
pub use network::{numerical_drdw, NetworkError, ReactionNetwork, ReactionRates};
pub use state::{reduced, Conserved, EnergyMode};
