//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the opcode tables, field extraction, decoder and disassembler for the
//! 32-bit OpenRISC basic instruction set (ORBIS32).

/// Instruction decoder exposing per-format fields.
pub mod decode;

/// Instruction disassembler for tracing and diagnostics.
pub mod disasm;

/// Instruction field extraction utilities.
pub mod instruction;

/// ORBIS32 opcode and function code tables.
pub mod orbis32;

pub use decode::{Format, InstructionDecoder};
