//! Equation-of-state interface
//!
//! The solver treats the EOS as a pure function: given density plus either
//! temperature or specific internal energy and the composition, it fills in
//! pressure, energy, temperature, and the composition derivatives of the
//! specific energy that the Jacobian chain rule needs.
//!
//! Failure modes (non-convergence of an internal temperature solve,
//! thermodynamic state outside a table or model domain) surface as
//! [`EosError`] and are fatal to the current Newton attempt — recovery by
//! timestep subdivision happens in the driver, never here.

use nalgebra::DVector;
use thiserror::Error;

// =================================================================================================
// Inputs and working state
// =================================================================================================

/// Which thermodynamic pair is held fixed during the EOS evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EosInput {
    /// Density and temperature given; energy and pressure computed.
    RhoT,

    /// Density and specific internal energy given; temperature is solved
    /// internally (the caller's `t` field is the initial guess).
    RhoE,
}

/// Thermodynamic working state passed to and filled by the EOS.
///
/// All energies here are *specific* (per unit mass), unlike the conserved
/// densities in [`crate::physics::Conserved`].
#[derive(Debug, Clone, PartialEq)]
pub struct EosState {
    /// Mass density
    pub rho: f64,

    /// Temperature (input for `RhoT`, initial guess then output for `RhoE`)
    pub t: f64,

    /// Specific internal energy
    pub e: f64,

    /// Pressure (output)
    pub p: f64,

    /// Species mass fractions `X_k`
    pub xn: DVector<f64>,

    /// Auxiliary specific variables (composition-derived)
    pub aux: DVector<f64>,
}

impl EosState {
    /// Create a state with the given density and composition; remaining
    /// fields start at zero and are filled by the caller or the EOS.
    pub fn new(rho: f64, xn: DVector<f64>) -> Self {
        Self {
            rho,
            t: 0.0,
            e: 0.0,
            p: 0.0,
            xn,
            aux: DVector::zeros(0),
        }
    }
}

/// First partial derivatives of the specific energy with respect to
/// composition, at fixed density and temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionDerivatives {
    /// `de/dX_k`
    pub dedx: DVector<f64>,
}

// =================================================================================================
// Errors
// =================================================================================================

/// Equation-of-state failure modes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EosError {
    /// The internal temperature iteration did not converge.
    #[error("EOS temperature solve did not converge after {iterations} iterations")]
    NonConvergence { iterations: usize },

    /// The requested state lies outside the valid table/model domain.
    #[error("thermodynamic state outside the valid EOS domain: {0}")]
    OutOfDomain(String),
}

// =================================================================================================
// EOS trait
// =================================================================================================

/// Trait for equations of state.
///
/// # Responsibility
///
/// Provides the thermodynamic closure only; it never integrates or solves
/// the reacting system (that is the solver's job). Implementations must be
/// pure functions of the input state so the per-cell solve stays reentrant.
pub trait EquationOfState: Send + Sync {
    /// Evaluate the EOS with the pair selected by `input` held fixed,
    /// filling the remaining fields of `state` in place.
    fn evaluate(&self, input: EosInput, state: &mut EosState) -> Result<(), EosError>;

    /// Composition derivatives `de/dX_k` at fixed density and temperature,
    /// for a state that has already been evaluated.
    fn composition_derivatives(&self, state: &EosState)
        -> Result<CompositionDerivatives, EosError>;

    /// Name of the EOS (used for display and logging).
    fn name(&self) -> &str;
}
