//! Architectural constants shared across the simulator.

/// Number of general-purpose registers.
pub const NUM_REGS: usize = 32;

/// Width of one instruction in bytes.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Sentinel word marking the end of a unit test program.
///
/// This is not a valid OpenRISC encoding; it is stored big-endian like any other word.
pub const TEST_END_MARKER: u32 = 0x40ff_ccff;

/// Register that receives the return address of `l.jal` and `l.jalr`.
pub const LINK_REGISTER: u8 = 9;

/// Number of pipeline stages.
pub const NUM_STAGES: usize = 5;
