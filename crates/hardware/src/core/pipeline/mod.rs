//! Instruction pipeline implementation.
//!
//! This module contains the implementation of the five-stage instruction pipeline.
//! It includes the following components:
//! 1. **Engine:** The pipeline itself and its two timing disciplines.
//! 2. **Hazards:** Detection of data and control hazards.
//! 3. **Latches:** Inter-stage buffers for communication between pipeline stages.
//! 4. **Signals:** Control signals generated during instruction decoding.
//! 5. **Stages:** Implementation of Fetch, Decode, Execute, Memory, and Writeback stages.
//! 6. **Traits:** The two-phase stage contract.

/// Pipeline orchestration and execution modes.
pub mod engine;

/// Pipeline hazard detection logic.
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub mod latches;

/// Control signals generated during instruction decode.
pub mod signals;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;

/// Traits for pipeline stage components.
pub mod traits;

pub use engine::{CycleStatus, ExecutionMode, Pipeline};
