//! Shared test infrastructure.

/// Program runner.
pub mod harness;
/// Mock devices.
pub mod mocks;
