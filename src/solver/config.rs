//! Solver configuration
//!
//! All run-scoped tuning (tolerances, iteration caps, energy mode,
//! relaxation exponent) lives in an explicit, immutable [`SdcConfig`]
//! passed into the solver and the driver — never read from ambient global
//! state — so unit tests can inject exact configurations.

use crate::physics::EnergyMode;
use crate::solver::SolverError;

// =================================================================================================
// Configuration
// =================================================================================================

/// Run-scoped configuration of the implicit SDC solve.
///
/// # Tolerance relaxation
///
/// The convergence tolerance depends on the SDC iteration: early
/// sub-iterations are solved loosely, the final correction to full
/// accuracy. Each relative tolerance is multiplied by
/// `relax_factor^(sdc_order - sdc_iteration - 1)`, which is 1 on the final
/// iteration.
///
/// # Example
///
/// ```rust
/// use sdc_react::solver::SdcConfig;
///
/// let config = SdcConfig::default();
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_newton_iter, 100);
/// assert_eq!(config.max_subdivisions, 64);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SdcConfig {
    /// Which energy variable the implicit solve evolves (fixed for the run).
    pub energy_mode: EnergyMode,

    /// Total number of SDC iterations of the enclosing integration scheme.
    pub sdc_order: usize,

    /// Relative tolerance on density.
    pub tol_dens: f64,

    /// Relative tolerance on species partial densities.
    pub tol_spec: f64,

    /// Relative tolerance on the solved energy variable.
    pub tol_ener: f64,

    /// Absolute tolerance. For species this is a mass-fraction bound and is
    /// scaled by the density when the error weights are formed.
    pub atol: f64,

    /// Tolerance relaxation factor across SDC iterations.
    pub relax_factor: f64,

    /// Newton iteration cap.
    pub max_newton_iter: usize,

    /// Timestep subdivision cap (inclusive; attempts run 1, 2, 4, ... cap).
    /// Must be below 2^31.
    pub max_subdivisions: u32,
}

impl Default for SdcConfig {
    fn default() -> Self {
        Self {
            energy_mode: EnergyMode::Internal,
            sdc_order: 2,
            tol_dens: 1.0e-6,
            tol_spec: 1.0e-6,
            tol_ener: 1.0e-6,
            atol: 1.0e-10,
            relax_factor: 1000.0,
            max_newton_iter: 100,
            max_subdivisions: 64,
        }
    }
}

/// Per-component tolerances after SDC-iteration relaxation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Tolerances {
    pub dens: f64,
    pub spec: f64,
    pub ener: f64,
    pub atol: f64,
}

impl SdcConfig {
    /// Validate that the parameters are usable.
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.sdc_order == 0 {
            return Err(SolverError::InvalidConfiguration(
                "sdc_order must be at least 1".to_string(),
            ));
        }
        if self.tol_dens <= 0.0 || self.tol_spec <= 0.0 || self.tol_ener <= 0.0 {
            return Err(SolverError::InvalidConfiguration(
                "relative tolerances must be positive".to_string(),
            ));
        }
        if self.atol <= 0.0 {
            return Err(SolverError::InvalidConfiguration(
                "absolute tolerance must be positive".to_string(),
            ));
        }
        if self.relax_factor < 1.0 {
            return Err(SolverError::InvalidConfiguration(
                "relaxation factor must be at least 1".to_string(),
            ));
        }
        if self.max_newton_iter == 0 {
            return Err(SolverError::InvalidConfiguration(
                "Newton iteration cap must be at least 1".to_string(),
            ));
        }
        if self.max_subdivisions == 0 {
            return Err(SolverError::InvalidConfiguration(
                "subdivision cap must be at least 1".to_string(),
            ));
        }
        // the driver doubles the attempt count once past the cap, so the
        // cap must leave that doubling in u32 range
        if self.max_subdivisions >= 1u32 << 31 {
            return Err(SolverError::InvalidConfiguration(
                "subdivision cap must be below 2^31".to_string(),
            ));
        }
        Ok(())
    }

    /// Tolerances for the given SDC iteration, loosened by the relaxation
    /// factor on all but the final correction.
    pub(crate) fn relaxed_tolerances(&self, sdc_iteration: usize) -> Tolerances {
        let exponent = self.sdc_order as i32 - sdc_iteration as i32 - 1;
        let relax = self.relax_factor.powi(exponent);
        Tolerances {
            dens: self.tol_dens * relax,
            spec: self.tol_spec * relax,
            ener: self.tol_ener * relax,
            atol: self.atol,
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
