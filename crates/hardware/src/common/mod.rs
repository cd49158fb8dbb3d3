//! Common utilities and types used throughout the simulator.
//!
//! This module provides the building blocks shared by every component:
//! 1. **Constants:** Register count, instruction width and the test end marker.
//! 2. **Error Handling:** The `SimError` taxonomy and bus access fault kinds.

/// Architectural constants.
pub mod constants;

/// Error types.
pub mod error;

pub use constants::{INSTRUCTION_SIZE, LINK_REGISTER, NUM_REGS, NUM_STAGES, TEST_END_MARKER};
pub use error::{AccessFault, SimError, SimResult};
