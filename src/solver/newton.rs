//! Newton-Raphson solver for the per-cell implicit SDC update
//!
//! Solves `U - dt R(U) = U_old + dt C` over the reduced reacting vector
//! using undamped Newton iteration with a dense LU solve per step and a
//! weighted RMS convergence norm.
//!
//! # Algorithm
//!
//! 1. Update the momentum explicitly (it has no reactive source).
//! 2. Form `f_source = U_old + dt C` over the reduced components.
//! 3. Iterate up to the configured cap:
//!    - assemble residual and Jacobian ([`crate::solver::residual`]),
//!    - LU-factor `J`; a singular matrix aborts immediately,
//!    - solve `J dU = -f` and take the full step,
//!    - converge when the weighted RMS norm of `dU` drops below 1.
//! 4. On success reconstruct the full state: the energy variable that was
//!    not solved is recomputed from the solved one and the updated momentum.
//!
//! The solver never retries; recovery by timestep subdivision belongs to
//! [`crate::solver::subdivide`]. On any failure the output state is left
//! untouched.

use nalgebra::DVector;

use crate::physics::state::{reduced, Conserved, EnergyMode};
use crate::physics::{EquationOfState, ReactionNetwork};
use crate::solver::residual::{build_residual, ResidualInputs};
use crate::solver::{SdcConfig, SolverError};

// =================================================================================================
// Report
// =================================================================================================

/// Diagnostics of a successful Newton solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonReport {
    /// Weighted RMS error norm of the final accepted step.
    pub err_norm: f64,

    /// Number of Newton iterations taken.
    pub iterations: usize,
}

// =================================================================================================
// Newton solve
// =================================================================================================

/// Solve the implicit update for one cell over one timestep.
///
/// `u_new` comes in as the initial guess and, on success only, leaves with
/// the solution (including reconstructed companion energy, updated
/// momentum, and EOS-consistent temperature). `advective` is the explicit
/// advective/external contribution `C` in the full layout.
///
/// `sdc_iteration` selects the tolerance relaxation: early SDC iterations
/// are solved loosely, the final correction to full accuracy.
#[allow(clippy::too_many_arguments)]
pub fn newton_solve(
    dt: f64,
    u_old: &Conserved,
    u_new: &mut Conserved,
    advective: &Conserved,
    sdc_iteration: usize,
    eos: &dyn EquationOfState,
    network: &dyn ReactionNetwork,
    config: &SdcConfig,
) -> Result<NewtonReport, SolverError> {
    config.validate()?;
    check_dimensions(u_old, u_new, advective, network)?;

    let mode = config.energy_mode;
    let ns = network.num_spec();
    let n = reduced::len(ns);
    let ie = reduced::energy(ns);

    let tols = config.relaxed_tolerances(sdc_iteration);

    // ====== Explicit momentum update ======

    let momentum = u_old.momentum + advective.momentum * dt;

    // ====== Fixed source and initial guess ======

    let f_source = u_old.gather_reduced(mode) + advective.gather_reduced(mode) * dt;

    // the companion energy is held at the caller's guess through the solve
    let e_companion = match mode {
        EnergyMode::Internal => u_new.rho_etot,
        EnergyMode::Total => u_new.rho_e,
    };

    let inputs = ResidualInputs {
        dt,
        f_source: &f_source,
        momentum,
        aux: &u_new.aux,
        t_guess: u_old.temperature,
        e_companion,
        mode,
    };

    let mut u_react = u_new.gather_reduced(mode);

    // ====== Iteration loop ======

    let mut err = f64::MAX;
    let mut converged = false;
    let mut iterations = 0;
    let mut temperature = u_old.temperature;

    for iter in 0..config.max_newton_iter {
        let parts = build_residual(&u_react, &inputs, eos, network)?;
        temperature = parts.temperature;

        // solve J dU = -f; a failed factorization is the singular-matrix
        // condition and is never retried at this layer
        let rhs = -&parts.f;
        let du = parts
            .jac
            .lu()
            .solve(&rhs)
            .ok_or(SolverError::SingularMatrix)?;

        // full, undamped step
        u_react += &du;

        // per-component tolerance blend; the species absolute tolerance is
        // a mass-fraction bound, so it is scaled by the density
        let mut eps = DVector::zeros(n);
        eps[reduced::RHO] = tols.dens * u_react[reduced::RHO].abs() + tols.atol;
        for k in 0..ns {
            eps[reduced::species(k)] = tols.spec * u_react[reduced::species(k)].abs()
                + tols.atol * u_react[reduced::RHO].abs();
        }
        eps[ie] = tols.ener * u_react[ie].abs() + tols.atol;

        // weighted RMS norm of the step
        let mut err_sum = 0.0;
        for i in 0..n {
            err_sum += (du[i] / eps[i]) * (du[i] / eps[i]);
        }
        err = (err_sum / n as f64).sqrt();

        iterations = iter + 1;
        if err < 1.0 {
            converged = true;
            break;
        }
    }

    if !converged {
        return Err(SolverError::ConvergenceFailure { err_norm: err });
    }

    // ====== Reconstruct the full output state ======

    u_new.scatter_reduced(&u_react, mode);
    u_new.momentum = momentum;

    let v2 = momentum.norm_squared();
    match mode {
        EnergyMode::Internal => {
            u_new.rho_etot = u_new.rho_e + 0.5 * v2 / u_new.rho;
        }
        EnergyMode::Total => {
            u_new.rho_e = u_new.rho_etot - 0.5 * v2 / u_new.rho;
        }
    }
    u_new.temperature = temperature;

    Ok(NewtonReport {
        err_norm: err,
        iterations,
    })
}

fn check_dimensions(
    u_old: &Conserved,
    u_new: &Conserved,
    advective: &Conserved,
    network: &dyn ReactionNetwork,
) -> Result<(), SolverError> {
    let ns = network.num_spec();
    for (label, state) in [("U_old", u_old), ("U_new", u_new), ("C", advective)] {
        if state.num_spec() != ns {
            return Err(SolverError::DimensionMismatch(format!(
                "{} carries {} species, network '{}' expects {}",
                label,
                state.num_spec(),
                network.name(),
                ns
            )));
        }
        if state.aux.len() != network.num_aux() {
            return Err(SolverError::DimensionMismatch(format!(
                "{} carries {} auxiliaries, network '{}' expects {}",
                label,
                state.aux.len(),
                network.name(),
                network.num_aux()
            )));
        }
    }
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
