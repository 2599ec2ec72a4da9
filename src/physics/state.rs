//! Conserved state containers and the reduced/full index mapping
//!
//! The solver works on two views of the same cell:
//!
//! - **Full conserved state** ([`Conserved`]): density, momentum, internal
//!   energy, total energy, species partial densities, optional auxiliary
//!   partial densities, and temperature. This is the layout the EOS and the
//!   reaction network consume.
//! - **Reduced reacting state**: the `NumSpec + 2` subset that participates
//!   in the implicit solve — density, species partial densities, and exactly
//!   one energy variable selected by [`EnergyMode`]. Momentum does not react
//!   and is updated explicitly outside the nonlinear solve.
//!
//! The mapping between the two is an explicit injection (see [`reduced`]),
//! not offset arithmetic, so the residual builder can be tested in isolation
//! from the full layout.

use nalgebra::{DVector, Vector3};

// =================================================================================================
// Energy mode
// =================================================================================================

/// Which energy variable the implicit solve evolves.
///
/// Fixed for the run: the derivative formulas in the Jacobian and the
/// energy reconstruction after a successful solve both depend on it, so it
/// is carried in the solver configuration rather than branched per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnergyMode {
    /// Solve for `rho e` (internal energy density); `rho E` is
    /// reconstructed from the solution and the updated momentum.
    #[default]
    Internal,

    /// Solve for `rho E` (total energy density); `rho e` is reconstructed
    /// by subtracting the bulk kinetic energy.
    Total,
}

// =================================================================================================
// Reduced index mapping
// =================================================================================================

/// Index layout of the reduced reacting vector.
///
/// ```text
/// 0            : rho
/// 1 ..= NumSpec: rho X_k
/// NumSpec + 1  : rho e  or  rho E  (per EnergyMode)
/// ```
pub mod reduced {
    /// Density slot.
    pub const RHO: usize = 0;

    /// Slot of the k-th species partial density.
    pub const fn species(k: usize) -> usize {
        1 + k
    }

    /// Slot of the solved energy variable.
    pub const fn energy(num_spec: usize) -> usize {
        num_spec + 1
    }

    /// Length of the reduced vector.
    pub const fn len(num_spec: usize) -> usize {
        num_spec + 2
    }
}

// =================================================================================================
// Full conserved state
// =================================================================================================

/// Full conserved state of one grid cell.
///
/// All quantities are cell-local and owned; the solver never shares state
/// across cells, which keeps every invocation reentrant.
#[derive(Debug, Clone, PartialEq)]
pub struct Conserved {
    /// Mass density `rho`
    pub rho: f64,

    /// Momentum density `rho u`
    pub momentum: Vector3<f64>,

    /// Internal energy density `rho e`
    pub rho_e: f64,

    /// Total energy density `rho E = rho e + |rho u|^2 / (2 rho)`
    pub rho_etot: f64,

    /// Species partial densities `rho X_k` (invariant: sums to `rho`)
    pub species: DVector<f64>,

    /// Auxiliary (composition-derived) partial densities `rho a_k`
    pub aux: DVector<f64>,

    /// Temperature (EOS output; used as the next EOS initial guess)
    pub temperature: f64,
}

impl Conserved {
    /// Create a state with zero momentum and no auxiliaries.
    ///
    /// Energies and temperature start at zero; callers typically fill them
    /// from an EOS evaluation.
    pub fn new(rho: f64, species: DVector<f64>) -> Self {
        Self {
            rho,
            momentum: Vector3::zeros(),
            rho_e: 0.0,
            rho_etot: 0.0,
            species,
            aux: DVector::zeros(0),
            temperature: 0.0,
        }
    }

    /// Number of species carried by this state.
    pub fn num_spec(&self) -> usize {
        self.species.len()
    }

    /// Bulk kinetic energy density `|rho u|^2 / (2 rho)`.
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.momentum.norm_squared() / self.rho
    }

    /// Species mass fractions `X_k = rho X_k / rho`.
    pub fn mass_fractions(&self) -> DVector<f64> {
        &self.species / self.rho
    }

    /// Floor and renormalize the species partial densities.
    ///
    /// Each `rho X_k` is first floored at `small_x`, then all are rescaled
    /// multiplicatively so they sum exactly to `rho`, preserving relative
    /// proportions.
    pub fn renormalize_species(&mut self, small_x: f64) {
        let mut sum = 0.0;
        for x in self.species.iter_mut() {
            *x = x.max(small_x);
            sum += *x;
        }
        let scale = self.rho / sum;
        for x in self.species.iter_mut() {
            *x *= scale;
        }
    }

    /// Gather the reduced reacting vector from this state.
    pub fn gather_reduced(&self, mode: EnergyMode) -> DVector<f64> {
        let ns = self.num_spec();
        let mut u = DVector::zeros(reduced::len(ns));
        u[reduced::RHO] = self.rho;
        for k in 0..ns {
            u[reduced::species(k)] = self.species[k];
        }
        u[reduced::energy(ns)] = match mode {
            EnergyMode::Internal => self.rho_e,
            EnergyMode::Total => self.rho_etot,
        };
        u
    }

    /// Scatter a reduced reacting vector back into this state.
    ///
    /// Only density, species, and the solved energy slot are written; the
    /// companion energy, momentum, auxiliaries, and temperature are left to
    /// the caller's reconstruction step.
    pub fn scatter_reduced(&mut self, u: &DVector<f64>, mode: EnergyMode) {
        let ns = self.num_spec();
        debug_assert_eq!(u.len(), reduced::len(ns));
        self.rho = u[reduced::RHO];
        for k in 0..ns {
            self.species[k] = u[reduced::species(k)];
        }
        match mode {
            EnergyMode::Internal => self.rho_e = u[reduced::energy(ns)],
            EnergyMode::Total => self.rho_etot = u[reduced::energy(ns)],
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
