//! OpenRISC Basic Instruction Set (ORBIS32) encodings.

/// Function codes for the ALU, shift, extension and set-flag groups.
pub mod funct;

/// Major opcodes.
pub mod opcodes;
