//! Shared test infrastructure for integration tests

pub mod mock_models;
pub mod test_helpers;
