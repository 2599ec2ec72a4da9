//! Gamma-law equation of state with composition-dependent molecular weight
//!
//! The simplest closure the solver can run against:
//!
//! ```text
//! p = (gamma - 1) rho e
//! e = k_B T / ((gamma - 1) mu m_u),   1/mu = sum_k X_k / A_k
//! ```
//!
//! Both directions (`RhoT`, `RhoE`) are closed-form, and the composition
//! derivatives are analytic (`de/dX_k = e mu / A_k` at fixed rho, T), which
//! makes this EOS the reference for Jacobian tests.

use nalgebra::DVector;

use crate::physics::{CompositionDerivatives, EosError, EosInput, EosState, EquationOfState};

/// Boltzmann constant \[erg/K\]
const K_B: f64 = 1.380649e-16;

/// Atomic mass unit \[g\]
const M_U: f64 = 1.66053906892e-24;

/// Gamma-law (ideal gas) EOS.
#[derive(Debug, Clone, PartialEq)]
pub struct GammaLawEos {
    /// Adiabatic index
    gamma: f64,

    /// Inverse atomic masses `1/A_k` per species
    inv_mass: DVector<f64>,
}

impl GammaLawEos {
    /// Create a gamma-law EOS for species with the given atomic masses.
    ///
    /// # Panics
    ///
    /// Panics when `gamma <= 1` or any atomic mass is non-positive.
    pub fn new(gamma: f64, atomic_mass: &[f64]) -> Self {
        assert!(gamma > 1.0, "adiabatic index must exceed 1, got {}", gamma);
        assert!(
            atomic_mass.iter().all(|&a| a > 0.0),
            "atomic masses must be positive"
        );

        Self {
            gamma,
            inv_mass: DVector::from_iterator(atomic_mass.len(), atomic_mass.iter().map(|a| 1.0 / a)),
        }
    }

    /// `e / T` for the given composition: `k_B / ((gamma-1) m_u mu)`.
    fn specific_heat_like(&self, xn: &DVector<f64>) -> Result<f64, EosError> {
        if xn.len() != self.inv_mass.len() {
            return Err(EosError::OutOfDomain(format!(
                "composition carries {} species, EOS expects {}",
                xn.len(),
                self.inv_mass.len()
            )));
        }
        let inv_mu = xn.dot(&self.inv_mass);
        Ok(K_B / ((self.gamma - 1.0) * M_U) * inv_mu)
    }
}

impl EquationOfState for GammaLawEos {
    fn evaluate(&self, input: EosInput, state: &mut EosState) -> Result<(), EosError> {
        if state.rho <= 0.0 {
            return Err(EosError::OutOfDomain(format!(
                "non-positive density {:e}",
                state.rho
            )));
        }

        let cv = self.specific_heat_like(&state.xn)?;

        match input {
            EosInput::RhoT => {
                if state.t <= 0.0 {
                    return Err(EosError::OutOfDomain(format!(
                        "non-positive temperature {:e}",
                        state.t
                    )));
                }
                state.e = cv * state.t;
            }
            EosInput::RhoE => {
                if state.e <= 0.0 {
                    return Err(EosError::OutOfDomain(format!(
                        "non-positive specific energy {:e}",
                        state.e
                    )));
                }
                // closed form: no iteration, so no NonConvergence path here
                state.t = state.e / cv;
            }
        }

        state.p = (self.gamma - 1.0) * state.rho * state.e;
        Ok(())
    }

    fn composition_derivatives(
        &self,
        state: &EosState,
    ) -> Result<CompositionDerivatives, EosError> {
        if state.xn.len() != self.inv_mass.len() {
            return Err(EosError::OutOfDomain(format!(
                "composition carries {} species, EOS expects {}",
                state.xn.len(),
                self.inv_mass.len()
            )));
        }

        // de/dX_k at fixed (rho, T)
        let scale = K_B / ((self.gamma - 1.0) * M_U) * state.t;
        Ok(CompositionDerivatives {
            dedx: &self.inv_mass * scale,
        })
    }

    fn name(&self) -> &str {
        "gamma-law"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
