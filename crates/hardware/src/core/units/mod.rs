//! Execution units and functional components.
//!
//! This module contains the processor's functional units: the integer ALU used by
//! Execute and the instruction/data memory ports used by Fetch and Memory.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Load/Store Unit: instruction and data memory ports.
pub mod lsu;
