//! Core processor implementation.
//!
//! This module contains the processor model: the architectural state, the five-stage
//! pipeline, the functional units and the orchestrator that runs them.

/// Architectural state (register file, program counter, compare flag).
pub mod arch;

/// Processor construction and the run loop.
pub mod cpu;

/// Instruction pipeline implementation (stages, latches, hazards, signals).
pub mod pipeline;

/// Execution units (ALU, instruction and data memory ports).
pub mod units;

pub use self::cpu::{Processor, Termination};
