//! Simulator error taxonomy.
//!
//! This module defines every failure the simulator can report. It provides:
//! 1. **Instruction faults:** Illegal instructions and illegal memory accesses raised by the stages.
//! 2. **Stop conditions:** Fetch failures and the test end marker, which scripted runs treat as a clean stop.
//! 3. **Setup failures:** Malformed program images, configuration files and test vectors.

use thiserror::Error;

/// Reason a memory bus access was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AccessFault {
    /// No region claims the address.
    #[error("address is not mapped")]
    Unmapped,
    /// The owning region does not accept writes.
    #[error("region is read-only")]
    ReadOnly,
    /// A half-word or word access at an address that is not naturally aligned.
    #[error("misaligned {0}-byte access")]
    Misaligned(u8),
    /// An access width other than 1, 2 or 4 bytes.
    #[error("invalid access size {0}")]
    InvalidSize(u8),
}

/// Errors raised while building or running a simulation.
///
/// Every variant terminates the current program run; none of them is retried.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SimError {
    /// Decode or execute met an encoding or operation it does not implement.
    #[error("illegal instruction: {0}")]
    IllegalInstruction(String),

    /// The memory bus rejected an access.
    #[error("illegal access at address {addr:#x}: {kind}")]
    IllegalAccess {
        /// Faulting byte address.
        addr: u32,
        /// Why the access was rejected.
        kind: AccessFault,
    },

    /// Fetch could not retrieve an instruction at the given program counter.
    #[error("instruction fetch failed at address {0:#x}")]
    InstructionFetchFailure(u32),

    /// Fetch read the end-of-test sentinel word at the given program counter.
    #[error("test end marker encountered at address {0:#x}")]
    TestEndMarkerEncountered(u32),

    /// The program image or machine could not be assembled.
    #[error("initialization failed: {0}")]
    Initialization(String),

    /// A configuration file could not be read or parsed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A test vector or register initializer is malformed.
    #[error("invalid test vector: {0}")]
    TestVector(String),
}

impl SimError {
    /// Returns `true` for the conditions a scripted test run accepts as a clean stop.
    pub const fn is_test_stop(&self) -> bool {
        matches!(
            self,
            Self::TestEndMarkerEncountered(_) | Self::InstructionFetchFailure(_)
        )
    }
}

/// Convenience alias used throughout the crate.
pub type SimResult<T> = Result<T, SimError>;
