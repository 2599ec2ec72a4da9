//! Timestep-subdivision driver
//!
//! Wraps [`newton_solve`] with geometric subcycling: the requested timestep
//! is attempted whole first; on any failure the attempt is abandoned, the
//! number of equal sub-intervals doubles, and the solve restarts from the
//! *original* old-time state. Restarting (rather than resuming from the
//! furthest converged sub-interval) avoids compounding an inconsistent
//! partial solve.
//!
//! The driver is the only layer permitted to retry, and only by shrinking
//! the timestep — never by loosening tolerances or altering the physics.

use crate::physics::{Conserved, EquationOfState, ReactionNetwork};
use crate::solver::newton::{newton_solve, NewtonReport};
use crate::solver::{SdcConfig, SolverError};

// =================================================================================================
// Report
// =================================================================================================

/// Diagnostics of a successful subdivided solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveReport {
    /// Weighted RMS error norm of the final sub-interval's accepted step.
    pub err_norm: f64,

    /// Newton iterations taken by the final sub-interval.
    pub iterations: usize,

    /// Number of equal sub-intervals of the successful attempt.
    pub subdivisions: u32,
}

// =================================================================================================
// Driver
// =================================================================================================

/// Solve the implicit update for one cell, subdividing the timestep on
/// failure.
///
/// Attempts `n_sub = 1, 2, 4, ...` up to the configured cap (inclusive).
/// Within an attempt the converged sub-state is carried forward as both the
/// old state and the initial guess of the next sub-interval, with species
/// renormalized before every sub-step. Exhausting the cap surfaces the last
/// failure; non-retryable errors (configuration, dimensions) surface
/// immediately.
#[allow(clippy::too_many_arguments)]
pub fn subdivide_solve(
    dt: f64,
    u_old: &Conserved,
    u_new: &mut Conserved,
    advective: &Conserved,
    sdc_iteration: usize,
    eos: &dyn EquationOfState,
    network: &dyn ReactionNetwork,
    config: &SdcConfig,
) -> Result<SolveReport, SolverError> {
    config.validate()?;

    let mut nsub: u32 = 1;
    let mut last_err = SolverError::ConvergenceFailure {
        err_norm: f64::INFINITY,
    };

    while nsub <= config.max_subdivisions {
        // every attempt restarts from the true old-time state; the incoming
        // guess in u_new only makes sense for the single-substep attempt
        let mut u_begin = u_old.clone();
        if nsub > 1 {
            *u_new = u_old.clone();
        }

        let dt_sub = dt / f64::from(nsub);
        let mut attempt_failed = false;
        let mut report = NewtonReport {
            err_norm: 0.0,
            iterations: 0,
        };

        for _isub in 0..nsub {
            u_begin.renormalize_species(network.small_x());

            match newton_solve(
                dt_sub,
                &u_begin,
                u_new,
                advective,
                sdc_iteration,
                eos,
                network,
                config,
            ) {
                Ok(rep) => {
                    report = rep;
                    u_begin = u_new.clone();
                }
                Err(err) if err.is_retryable() => {
                    log::debug!(
                        "newton solve failed at nsub = {} (dt_sub = {:.3e}): {}",
                        nsub,
                        dt_sub,
                        err
                    );
                    last_err = err;
                    attempt_failed = true;
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        if !attempt_failed {
            return Ok(SolveReport {
                err_norm: report.err_norm,
                iterations: report.iterations,
                subdivisions: nsub,
            });
        }

        nsub *= 2;
    }

    log::warn!(
        "subdivision exhausted at cap {}: {}",
        config.max_subdivisions,
        last_err
    );
    Err(last_err)
}
