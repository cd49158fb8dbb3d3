//! OpenRISC architectural state.
//!
//! This module contains the state that survives across cycles independently of the
//! pipeline latches:
//! 1. **GPRs:** The general-purpose register file.
//! 2. **PC:** The program counter and its delay-slot redirect logic.
//! 3. **Flag:** The compare flag (`SR[F]`) consumed by conditional branches and `l.cmov`.

/// General-Purpose Register file implementation.
pub mod gpr;

/// Program counter.
pub mod pc;

pub use gpr::Gpr;
pub use pc::ProgramCounter;

/// Architectural state read and written by the pipeline stages.
#[derive(Clone, Debug, Default)]
pub struct ArchState {
    /// General-purpose registers.
    pub regs: Gpr,
    /// Compare flag written by the `l.sf*` family.
    pub flag: bool,
    /// Next fetch address.
    pub pc: ProgramCounter,
}

impl ArchState {
    /// Creates cleared state with the program counter at `entry`.
    pub fn new(entry: u32) -> Self {
        Self {
            regs: Gpr::new(),
            flag: false,
            pc: ProgramCounter::new(entry),
        }
    }
}
