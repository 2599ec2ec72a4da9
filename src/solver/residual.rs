//! Residual and Jacobian assembly for the implicit SDC update
//!
//! For the reduced reacting vector `U` the nonlinear system is
//!
//! ```text
//! f(U) = U - dt R(U) - f_source = 0
//! ```
//!
//! with `f_source = U_old + dt C` held fixed through the Newton iteration.
//! The Jacobian chains the network derivatives over the primitive basis
//! `w = (rho, X_1..X_ns, e)` with the analytic derivatives of `w` with
//! respect to the reduced conserved vector:
//!
//! ```text
//! J = I - dt (dR/dw)(dw/dU)
//! ```

use nalgebra::{DMatrix, DVector, Vector3};

use crate::physics::state::{reduced, Conserved, EnergyMode};
use crate::physics::{EosInput, EosState, EquationOfState, ReactionNetwork};
use crate::solver::SolverError;

/// Density floor applied to EOS inputs.
const SMALL_DENS: f64 = 1.0e-30;

/// Specific-internal-energy floor applied to EOS inputs.
const SMALL_ENER: f64 = 1.0e-30;

// =================================================================================================
// Inputs and outputs
// =================================================================================================

/// Quantities held fixed across one Newton iteration while the residual is
/// rebuilt at successive guesses.
pub(crate) struct ResidualInputs<'a> {
    /// Timestep of the implicit solve
    pub dt: f64,

    /// `U_old + dt C` over the reduced components
    pub f_source: &'a DVector<f64>,

    /// Momentum, already explicitly updated (it does not react)
    pub momentum: Vector3<f64>,

    /// Auxiliary partial densities, carried through unchanged
    pub aux: &'a DVector<f64>,

    /// Temperature initial guess for the EOS
    pub t_guess: f64,

    /// The energy variable *not* being solved (companion of the reduced
    /// energy slot), held fixed at the caller's guess
    pub e_companion: f64,

    /// Which energy variable occupies the reduced energy slot
    pub mode: EnergyMode,
}

/// Residual, Jacobian, and the EOS-consistent temperature at the guess.
pub(crate) struct ResidualParts {
    pub f: DVector<f64>,
    pub jac: DMatrix<f64>,
    pub temperature: f64,
}

// =================================================================================================
// Assembly
// =================================================================================================

/// Build `f(U)` and `J` at the reduced guess `u_react`.
///
/// EOS or network failures propagate as errors; no retry happens at this
/// layer.
pub(crate) fn build_residual(
    u_react: &DVector<f64>,
    inputs: &ResidualInputs<'_>,
    eos: &dyn EquationOfState,
    network: &dyn ReactionNetwork,
) -> Result<ResidualParts, SolverError> {
    let ns = network.num_spec();
    let n = reduced::len(ns);
    let ie = reduced::energy(ns);

    // ====== Reconstruct the full state from the reduced guess ======

    // momentum comes from the explicit update; it is not part of the solve
    let mut full = Conserved::new(u_react[reduced::RHO], DVector::zeros(ns));
    full.momentum = inputs.momentum;
    full.aux = inputs.aux.clone();
    full.temperature = inputs.t_guess;
    for k in 0..ns {
        full.species[k] = u_react[reduced::species(k)];
    }
    match inputs.mode {
        EnergyMode::Internal => {
            full.rho_e = u_react[ie];
            full.rho_etot = inputs.e_companion;
        }
        EnergyMode::Total => {
            full.rho_etot = u_react[ie];
            full.rho_e = inputs.e_companion;
        }
    }

    full.renormalize_species(network.small_x());

    // ====== Evaluate the EOS at fixed (rho, e) ======

    let rho = full.rho.max(SMALL_DENS);

    let mut eos_state = EosState::new(rho, full.mass_fractions());
    eos_state.t = inputs.t_guess;
    eos_state.e = (full.rho_e / rho).max(SMALL_ENER);
    if !full.aux.is_empty() {
        eos_state.aux = &full.aux / rho;
    }

    eos.evaluate(EosInput::RhoE, &mut eos_state)?;
    full.temperature = eos_state.t;

    // ====== Reaction rates and residual ======

    let rates = network.react_source(&full)?;
    let r_react = rates.reduced(inputs.mode);

    let f = u_react - &r_react * inputs.dt - inputs.f_source;

    // ====== Chain-rule Jacobian ======

    let drdw = network.jacobian(&full, &eos_state, inputs.dt)?;
    if drdw.nrows() != n || drdw.ncols() != n {
        return Err(SolverError::DimensionMismatch(format!(
            "network '{}' returned a {}x{} dR/dw, expected {}x{}",
            network.name(),
            drdw.nrows(),
            drdw.ncols(),
            n,
            n
        )));
    }

    let mut dwdu = DMatrix::zeros(n, n);

    // density row: w_rho = U_rho
    dwdu[(reduced::RHO, reduced::RHO)] = 1.0;

    // mass-fraction rows: X_k = (rho X_k) / rho
    for m in 1..=ns {
        dwdu[(m, 0)] = -u_react[m] / (u_react[0] * u_react[0]);
        dwdu[(m, m)] = 1.0 / u_react[0];
    }

    // specific-energy row, from the EOS composition derivatives; the
    // density entry differs by which energy variable is evolved
    let xderivs = eos.composition_derivatives(&eos_state)?;
    let denom = 1.0 / eos_state.rho;

    let mut xn_sum = 0.0;
    for k in 0..ns {
        xn_sum += eos_state.xn[k] * xderivs.dedx[k];
    }

    dwdu[(ie, 0)] = match inputs.mode {
        EnergyMode::Internal => denom * (xn_sum - eos_state.e),
        EnergyMode::Total => {
            let u2_sum = inputs.momentum.norm_squared();
            denom * (xn_sum - eos_state.e - 0.5 * u2_sum / (eos_state.rho * eos_state.rho))
        }
    };
    for k in 0..ns {
        dwdu[(ie, 1 + k)] = -denom * xderivs.dedx[k];
    }
    dwdu[(ie, ie)] = denom;

    let drdu = &drdw * &dwdu;
    let jac = DMatrix::identity(n, n) - drdu * inputs.dt;

    Ok(ResidualParts {
        f,
        jac,
        temperature: eos_state.t,
    })
}

// =================================================================================================
// Tests
// =================================================================================================
