//! Mock EOS and reaction networks for solver testing
//!
//! These closures have controlled, analytically understood behavior,
//! making them ideal for exercising specific solver failure paths that
//! well-behaved physics never reaches.

use std::sync::Mutex;

use nalgebra::{DMatrix, DVector};

use sdc_react::physics::{
    numerical_drdw, CompositionDerivatives, Conserved, EnergyMode, EosError, EosInput, EosState,
    EquationOfState, NetworkError, ReactionNetwork, ReactionRates,
};

// =================================================================================================
// Mock EOS: T == e, no domain restrictions
// =================================================================================================

/// EOS that never fails: temperature and specific energy are identified,
/// pressure is ideal-gas-like, and composition derivatives vanish.
///
/// Useful for divergence tests where the iterate swings through states a
/// physical EOS would reject.
pub struct MockEos;

impl EquationOfState for MockEos {
    fn evaluate(&self, input: EosInput, state: &mut EosState) -> Result<(), EosError> {
        match input {
            EosInput::RhoT => state.e = state.t,
            EosInput::RhoE => state.t = state.e,
        }
        state.p = state.rho * state.e;
        Ok(())
    }

    fn composition_derivatives(
        &self,
        state: &EosState,
    ) -> Result<CompositionDerivatives, EosError> {
        Ok(CompositionDerivatives {
            dedx: DVector::zeros(state.xn.len()),
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

// =================================================================================================
// EOS that records the auxiliary variables it is handed
// =================================================================================================

/// Same closure as [`MockEos`], but remembers the specific auxiliary
/// variables of the last evaluation so tests can assert they made it from
/// the conserved state into the EOS call.
pub struct AuxRecordingEos {
    seen_aux: Mutex<Option<DVector<f64>>>,
}

impl AuxRecordingEos {
    pub fn new() -> Self {
        Self {
            seen_aux: Mutex::new(None),
        }
    }

    /// The `aux` vector of the most recent evaluation, if any happened.
    pub fn last_seen_aux(&self) -> Option<DVector<f64>> {
        self.seen_aux.lock().unwrap().clone()
    }
}

impl EquationOfState for AuxRecordingEos {
    fn evaluate(&self, input: EosInput, state: &mut EosState) -> Result<(), EosError> {
        *self.seen_aux.lock().unwrap() = Some(state.aux.clone());
        match input {
            EosInput::RhoT => state.e = state.t,
            EosInput::RhoE => state.t = state.e,
        }
        state.p = state.rho * state.e;
        Ok(())
    }

    fn composition_derivatives(
        &self,
        state: &EosState,
    ) -> Result<CompositionDerivatives, EosError> {
        Ok(CompositionDerivatives {
            dedx: DVector::zeros(state.xn.len()),
        })
    }

    fn name(&self) -> &str {
        "aux-recording mock"
    }
}

// =================================================================================================
// Network whose rate depends on an auxiliary variable
// =================================================================================================

/// Two-species decay catalyzed by one auxiliary variable:
/// `d(rho X0)/dt = -k a0 rho X0` with `a0 = rho_a0 / rho`.
///
/// The Jacobian is produced by the centered-difference fallback, so a solve
/// against this network exercises the auxiliary plumbing end to end.
pub struct AuxCatalyzedDecay {
    pub rate: f64,
}

impl ReactionNetwork for AuxCatalyzedDecay {
    fn num_spec(&self) -> usize {
        2
    }

    fn num_aux(&self) -> usize {
        1
    }

    fn react_source(&self, state: &Conserved) -> Result<ReactionRates, NetworkError> {
        let burn = self.rate * (state.aux[0] / state.rho) * state.species[0];

        let mut rates = ReactionRates::zeros(2);
        rates.species[0] = -burn;
        rates.species[1] = burn;
        Ok(rates)
    }

    fn jacobian(
        &self,
        state: &Conserved,
        _eos_state: &EosState,
        _dt: f64,
    ) -> Result<DMatrix<f64>, NetworkError> {
        numerical_drdw(self, state, EnergyMode::Internal, 1.0e-6)
    }

    fn name(&self) -> &str {
        "aux-catalyzed decay"
    }
}

// =================================================================================================
// Stiff energy relaxation with a deliberately useless Jacobian
// =================================================================================================

/// Two-species network with a linear energy sink `d(rho e)/dt = -lambda
/// rho e` whose `jacobian` lies and returns zeros.
///
/// With a zero `dR/dw` the Newton update degenerates to fixed-point
/// iteration `u <- f_source - (dt lambda) u`, which diverges whenever
/// `dt * lambda > 1` and contracts otherwise. That makes non-convergence
/// at a full timestep — and recovery at a subdivided one — fully
/// predictable.
///
/// The network records each distinct `dt` its Jacobian is asked for, in
/// order, so tests can observe the subdivision driver's attempt sequence.
pub struct StiffEnergyRelaxation {
    pub lambda: f64,
    seen_dts: Mutex<Vec<f64>>,
}

impl StiffEnergyRelaxation {
    pub fn new(lambda: f64) -> Self {
        Self {
            lambda,
            seen_dts: Mutex::new(Vec::new()),
        }
    }

    /// The distinct timesteps attempted so far, in order of first use.
    pub fn attempted_dts(&self) -> Vec<f64> {
        self.seen_dts.lock().unwrap().clone()
    }
}

impl ReactionNetwork for StiffEnergyRelaxation {
    fn num_spec(&self) -> usize {
        2
    }

    fn react_source(&self, state: &Conserved) -> Result<ReactionRates, NetworkError> {
        let mut rates = ReactionRates::zeros(2);
        rates.rho_e = -self.lambda * state.rho_e;
        rates.rho_etot = -self.lambda * state.rho_e;
        Ok(rates)
    }

    fn jacobian(
        &self,
        _state: &Conserved,
        _eos_state: &EosState,
        dt: f64,
    ) -> Result<DMatrix<f64>, NetworkError> {
        let mut seen = self.seen_dts.lock().unwrap();
        if seen.last() != Some(&dt) {
            seen.push(dt);
        }
        Ok(DMatrix::zeros(4, 4))
    }

    fn name(&self) -> &str {
        "stiff energy relaxation (zero Jacobian)"
    }
}

// =================================================================================================
// Network that forces a singular composed Jacobian
// =================================================================================================

/// Two-species network whose `dR/dw` makes the composed Newton matrix
/// exactly singular: `dR_rho/drho = 1/dt`, so the density row of
/// `I - dt (dR/dw)(dw/dU)` vanishes identically.
pub struct SingularJacobianNetwork;

impl ReactionNetwork for SingularJacobianNetwork {
    fn num_spec(&self) -> usize {
        2
    }

    fn react_source(&self, _state: &Conserved) -> Result<ReactionRates, NetworkError> {
        Ok(ReactionRates::zeros(2))
    }

    fn jacobian(
        &self,
        _state: &Conserved,
        _eos_state: &EosState,
        dt: f64,
    ) -> Result<DMatrix<f64>, NetworkError> {
        let mut drdw = DMatrix::zeros(4, 4);
        drdw[(0, 0)] = 1.0 / dt;
        Ok(drdw)
    }

    fn name(&self) -> &str {
        "singular Jacobian"
    }
}
