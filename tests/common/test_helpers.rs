//! State-construction helpers shared across integration tests

use nalgebra::{DVector, Vector3};

use sdc_react::physics::{Conserved, EosInput, EosState, EquationOfState};

/// Build a thermodynamically consistent full state from density,
/// composition, temperature, and momentum, using the given EOS.
pub fn consistent_state(
    eos: &dyn EquationOfState,
    rho: f64,
    xn: &[f64],
    t: f64,
    momentum: Vector3<f64>,
) -> Conserved {
    let xn = DVector::from_row_slice(xn);

    let mut eos_state = EosState::new(rho, xn.clone());
    eos_state.t = t;
    eos.evaluate(EosInput::RhoT, &mut eos_state)
        .expect("test state must be inside the EOS domain");

    let mut state = Conserved::new(rho, xn * rho);
    state.momentum = momentum;
    state.rho_e = rho * eos_state.e;
    state.rho_etot = state.rho_e + state.kinetic_energy();
    state.temperature = eos_state.t;
    state
}

/// An all-zero advective contribution for `ns` species.
pub fn zero_advective(ns: usize) -> Conserved {
    Conserved::new(0.0, DVector::zeros(ns))
}
