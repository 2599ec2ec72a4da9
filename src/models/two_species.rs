//! Reference reaction networks with known analytic behavior
//!
//! - [`NullNetwork`]: zero rates, zero Jacobian, any species count. With it
//!   the implicit update degenerates to the explicit one, which pins down
//!   the solver's bookkeeping in tests.
//! - [`TwoSpeciesDecay`]: a linear one-reaction chain `X0 -> X1` with rate
//!   `d(rho X0)/dt = -k rho X0` and optional specific energy release. Its
//!   solution is closed-form, so solver output can be checked against the
//!   analytic stiff solution.

use nalgebra::{DMatrix, DVector};

use crate::physics::state::reduced;
use crate::physics::{Conserved, EosState, NetworkError, ReactionNetwork, ReactionRates};

// =================================================================================================
// Null network
// =================================================================================================

/// Network with no reactions at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullNetwork {
    num_spec: usize,
}

impl NullNetwork {
    /// Create a null network carrying `num_spec` inert species.
    pub fn new(num_spec: usize) -> Self {
        Self { num_spec }
    }
}

impl ReactionNetwork for NullNetwork {
    fn num_spec(&self) -> usize {
        self.num_spec
    }

    fn react_source(&self, _state: &Conserved) -> Result<ReactionRates, NetworkError> {
        Ok(ReactionRates::zeros(self.num_spec))
    }

    fn jacobian(
        &self,
        _state: &Conserved,
        _eos_state: &EosState,
        _dt: f64,
    ) -> Result<DMatrix<f64>, NetworkError> {
        let n = reduced::len(self.num_spec);
        Ok(DMatrix::zeros(n, n))
    }

    fn name(&self) -> &str {
        "null"
    }
}

// =================================================================================================
// Two-species decay chain
// =================================================================================================

/// Linear decay chain `X0 -> X1`:
///
/// ```text
/// d(rho X0)/dt = -k rho X0
/// d(rho X1)/dt = +k rho X0
/// d(rho e)/dt  = q k rho X0
/// ```
///
/// Density does not react; the analytic solution at constant density is
/// `rho X0(t) = rho X0(0) exp(-k t)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoSpeciesDecay {
    /// Decay rate `k` \[1/s\]
    rate: f64,

    /// Specific energy release `q` per unit mass burned \[erg/g\]
    q_burn: f64,
}

impl TwoSpeciesDecay {
    /// Create the chain with decay rate `k` and energy release `q`.
    pub fn new(rate: f64, q_burn: f64) -> Self {
        Self { rate, q_burn }
    }

    /// Analytic `rho X0` after time `t` from the initial value.
    pub fn analytic_rho_x0(&self, rho_x0_init: f64, t: f64) -> f64 {
        rho_x0_init * (-self.rate * t).exp()
    }

    /// Analytic released energy density after time `t`.
    pub fn analytic_energy_release(&self, rho_x0_init: f64, t: f64) -> f64 {
        self.q_burn * (rho_x0_init - self.analytic_rho_x0(rho_x0_init, t))
    }
}

impl ReactionNetwork for TwoSpeciesDecay {
    fn num_spec(&self) -> usize {
        2
    }

    fn react_source(&self, state: &Conserved) -> Result<ReactionRates, NetworkError> {
        let burn = self.rate * state.species[0];

        let mut rates = ReactionRates::zeros(2);
        rates.species[0] = -burn;
        rates.species[1] = burn;
        rates.rho_e = self.q_burn * burn;
        rates.rho_etot = self.q_burn * burn;
        Ok(rates)
    }

    fn jacobian(
        &self,
        _state: &Conserved,
        eos_state: &EosState,
        _dt: f64,
    ) -> Result<DMatrix<f64>, NetworkError> {
        // primitive basis w = (rho, X0, X1, e); burn = k rho X0
        let rho = eos_state.rho;
        let x0 = eos_state.xn[0];

        let mut drdw = DMatrix::zeros(4, 4);
        drdw[(1, 0)] = -self.rate * x0;
        drdw[(1, 1)] = -self.rate * rho;
        drdw[(2, 0)] = self.rate * x0;
        drdw[(2, 1)] = self.rate * rho;
        drdw[(3, 0)] = self.q_burn * self.rate * x0;
        drdw[(3, 1)] = self.q_burn * self.rate * rho;
        Ok(drdw)
    }

    fn name(&self) -> &str {
        "two-species decay"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
