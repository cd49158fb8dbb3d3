//! Cycle-level pipelined processor simulator library.
//!
//! This crate simulates a classic five-stage OpenRISC (ORBIS32) pipeline with the following:
//! 1. **Core:** Fetch, decode, execute, memory and writeback stages with explicit latches,
//!    run either pipelined or one stage per cycle, with hazard stalls and delay slots.
//! 2. **ISA:** Field extraction, decoding and disassembly of the supported instruction subset.
//! 3. **SoC:** The memory bus, program memory segments and memory-mapped devices.
//! 4. **Simulation:** ELF loading, test vectors, configuration and statistics.

/// Common types and constants (errors, architectural constants).
pub mod common;
/// Simulator configuration (defaults and JSON loading).
pub mod config;
/// Processor core (pipeline, arch state, execution units, run loop).
pub mod core;
/// Instruction set (encoding, decoder, disassembler).
pub mod isa;
/// Program loader and test vectors.
pub mod sim;
/// System-on-chip (bus, memory, devices, traits).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or load it from JSON.
pub use crate::config::Config;
/// Main processor type; holds the bus, pipeline and architectural state.
pub use crate::core::Processor;
/// Error type returned by every fallible operation.
pub use crate::common::SimError;
