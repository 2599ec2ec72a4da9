//! Per-cell batch facade
//!
//! The solver itself is a pure, reentrant function of one cell's inputs; an
//! outer data-parallel mechanism invokes it once per grid cell. This module
//! provides that mapping over an in-memory slice of cells — parallel via
//! rayon when the `parallel` feature is enabled, sequential otherwise. No
//! state is shared between cells, so no locking is needed.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::physics::{Conserved, EquationOfState, ReactionNetwork};
use crate::solver::subdivide::{subdivide_solve, SolveReport};
use crate::solver::{SdcConfig, SolverError};

/// One cell's inputs and output slot for a batched solve.
#[derive(Debug, Clone, PartialEq)]
pub struct CellUpdate {
    /// Old-time conserved state
    pub old: Conserved,

    /// In: initial guess; out (on success): the solved new-time state
    pub new: Conserved,

    /// Explicit advective/external contribution `C`
    pub advective: Conserved,
}

/// Run the subdivision driver over every cell, returning one outcome per
/// cell in order. A failed cell leaves its `new` state untrusted; callers
/// must check the outcomes.
pub fn solve_cells(
    dt: f64,
    cells: &mut [CellUpdate],
    sdc_iteration: usize,
    eos: &dyn EquationOfState,
    network: &dyn ReactionNetwork,
    config: &SdcConfig,
) -> Vec<Result<SolveReport, SolverError>> {
    let solve_one = |cell: &mut CellUpdate| {
        subdivide_solve(
            dt,
            &cell.old,
            &mut cell.new,
            &cell.advective,
            sdc_iteration,
            eos,
            network,
            config,
        )
    };

    #[cfg(feature = "parallel")]
    {
        cells.par_iter_mut().map(solve_one).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        cells.iter_mut().map(solve_one).collect()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
