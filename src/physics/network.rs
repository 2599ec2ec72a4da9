//! Reaction-network interface
//!
//! A reaction network is the second external collaborator of the solver:
//! given a full conserved state it returns the reaction source terms
//! (full-layout rates), and a Jacobian `dR/dw` of the reduced rates with
//! respect to the primitive basis `w = (rho, X_1..X_ns, e)`.
//!
//! Networks that have no analytic Jacobian can fall back to
//! [`numerical_drdw`], a centered-difference approximation over the same
//! primitive basis.

use nalgebra::{DMatrix, DVector};
use thiserror::Error;

use crate::physics::state::{reduced, Conserved, EnergyMode};
use crate::physics::EosState;

// =================================================================================================
// Reaction rates
// =================================================================================================

/// Reaction source terms in the full conserved-state layout.
///
/// Momentum never reacts, so it carries no rate. Both energy rates are
/// present; the solver extracts the one matching its [`EnergyMode`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionRates {
    /// `d(rho)/dt`
    pub rho: f64,

    /// `d(rho X_k)/dt`
    pub species: DVector<f64>,

    /// `d(rho e)/dt`
    pub rho_e: f64,

    /// `d(rho E)/dt`
    pub rho_etot: f64,
}

impl ReactionRates {
    /// All-zero rates for a network with `num_spec` species.
    pub fn zeros(num_spec: usize) -> Self {
        Self {
            rho: 0.0,
            species: DVector::zeros(num_spec),
            rho_e: 0.0,
            rho_etot: 0.0,
        }
    }

    /// Extract the reduced-rate subset (density, species, one energy).
    pub fn reduced(&self, mode: EnergyMode) -> DVector<f64> {
        let ns = self.species.len();
        let mut r = DVector::zeros(reduced::len(ns));
        r[reduced::RHO] = self.rho;
        for k in 0..ns {
            r[reduced::species(k)] = self.species[k];
        }
        r[reduced::energy(ns)] = match mode {
            EnergyMode::Internal => self.rho_e,
            EnergyMode::Total => self.rho_etot,
        };
        r
    }
}

// =================================================================================================
// Errors
// =================================================================================================

/// Reaction-network failure modes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    /// Rate evaluation failed (e.g. rates outside the network's validity).
    #[error("reaction rate evaluation failed: {0}")]
    RateEvaluation(String),

    /// The network Jacobian could not be produced.
    #[error("network Jacobian unavailable: {0}")]
    Jacobian(String),
}

// =================================================================================================
// Network trait
// =================================================================================================

/// Trait for reaction networks.
///
/// Implementations must be pure functions of the input state: no caching of
/// cross-call state, no I/O. The solver may call them from many cells in
/// parallel.
pub trait ReactionNetwork: Send + Sync {
    /// Number of species the network evolves.
    fn num_spec(&self) -> usize;

    /// Number of auxiliary composition variables (default: none).
    fn num_aux(&self) -> usize {
        0
    }

    /// Mass-fraction floor applied before renormalization.
    fn small_x(&self) -> f64 {
        1.0e-30
    }

    /// Reaction source terms for the given full conserved state.
    fn react_source(&self, state: &Conserved) -> Result<ReactionRates, NetworkError>;

    /// Jacobian `dR/dw` of the reduced rates with respect to the primitive
    /// basis `(rho, X_1..X_ns, e)`, as a `(NumSpec+2) x (NumSpec+2)` matrix.
    ///
    /// `eos_state` is the already-evaluated thermodynamic state of the cell
    /// and `dt` the timestep of the enclosing implicit solve, for networks
    /// whose Jacobian approximation depends on either.
    fn jacobian(
        &self,
        state: &Conserved,
        eos_state: &EosState,
        dt: f64,
    ) -> Result<DMatrix<f64>, NetworkError>;

    /// Name of the network (used for display and logging).
    fn name(&self) -> &str;
}

// =================================================================================================
// Numerical Jacobian fallback
// =================================================================================================

/// Centered-difference approximation of `dR/dw` over the primitive basis
/// `(rho, X_1..X_ns, e)`.
///
/// Each column perturbs one primitive variable by `rel_eps * max(|w_j|,
/// rel_eps)`, rebuilds the full conserved state (momentum, temperature, and
/// specific auxiliaries held fixed), and differences the reduced rates.
pub fn numerical_drdw(
    network: &dyn ReactionNetwork,
    state: &Conserved,
    mode: EnergyMode,
    rel_eps: f64,
) -> Result<DMatrix<f64>, NetworkError> {
    let ns = network.num_spec();
    let n = reduced::len(ns);

    // primitive base point
    let mut w = DVector::zeros(n);
    w[0] = state.rho;
    let xn = state.mass_fractions();
    for k in 0..ns {
        w[1 + k] = xn[k];
    }
    w[n - 1] = state.rho_e / state.rho;

    let aux_fractions = &state.aux / state.rho;

    // rebuild a full state from a primitive point
    let rebuild = |w: &DVector<f64>| -> Conserved {
        let rho = w[0];
        let mut full = state.clone();
        full.rho = rho;
        for k in 0..ns {
            full.species[k] = rho * w[1 + k];
        }
        full.rho_e = rho * w[n - 1];
        full.rho_etot = full.rho_e + 0.5 * full.momentum.norm_squared() / rho;
        full.aux = &aux_fractions * rho;
        full
    };

    let mut drdw = DMatrix::zeros(n, n);

    for j in 0..n {
        let h = rel_eps * w[j].abs().max(rel_eps);

        let mut w_plus = w.clone();
        w_plus[j] += h;
        let mut w_minus = w.clone();
        w_minus[j] -= h;

        let r_plus = network.react_source(&rebuild(&w_plus))?.reduced(mode);
        let r_minus = network.react_source(&rebuild(&w_minus))?.reduced(mode);

        for i in 0..n {
            drdw[(i, j)] = (r_plus[i] - r_minus[i]) / (2.0 * h);
        }
    }

    Ok(drdw)
}

// =================================================================================================
// Tests
// =================================================================================================
