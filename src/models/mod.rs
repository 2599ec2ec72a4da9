//! Concrete EOS and reaction-network implementations
//!
//! These are the closures the solver is exercised against:
//!
//! - [`GammaLawEos`]: ideal-gas EOS with composition-dependent mean
//!   molecular weight, closed-form in both directions
//! - [`NullNetwork`]: no reactions (the implicit update degenerates to the
//!   explicit one)
//! - [`TwoSpeciesDecay`]: linear decay chain with an analytic solution
//!
//! Production networks implement [`crate::physics::ReactionNetwork`] the
//! same way; nothing in the solver is specific to these models.

mod gamma_law;
mod two_species;

pub use gamma_law::GammaLawEos;
pub use two_species::{NullNetwork, TwoSpeciesDecay};
