//! ORBIS32 major opcodes (bits 31-26).

/// Unconditional PC-relative jump (`l.j`).
pub const OP_J: u32 = 0x00;

/// PC-relative jump and link (`l.jal`).
pub const OP_JAL: u32 = 0x01;

/// Branch if flag clear (`l.bnf`).
pub const OP_BNF: u32 = 0x03;

/// Branch if flag set (`l.bf`).
pub const OP_BF: u32 = 0x04;

/// No operation (`l.nop`), recognized when bits 25-24 are `01`.
pub const OP_NOP: u32 = 0x05;

/// Move immediate high (`l.movhi`), recognized when bit 16 is clear.
pub const OP_MOVHI: u32 = 0x06;

/// Jump register (`l.jr`).
pub const OP_JR: u32 = 0x11;

/// Jump register and link (`l.jalr`).
pub const OP_JALR: u32 = 0x12;

/// Load word, zero-extended (`l.lwz`).
pub const OP_LWZ: u32 = 0x21;

/// Load word, sign-extended (`l.lws`).
pub const OP_LWS: u32 = 0x22;

/// Load byte, zero-extended (`l.lbz`).
pub const OP_LBZ: u32 = 0x23;

/// Load byte, sign-extended (`l.lbs`).
pub const OP_LBS: u32 = 0x24;

/// Load half-word, zero-extended (`l.lhz`).
pub const OP_LHZ: u32 = 0x25;

/// Load half-word, sign-extended (`l.lhs`).
pub const OP_LHS: u32 = 0x26;

/// Add immediate (`l.addi`).
pub const OP_ADDI: u32 = 0x27;

/// AND with zero-extended immediate (`l.andi`).
pub const OP_ANDI: u32 = 0x29;

/// OR with zero-extended immediate (`l.ori`).
pub const OP_ORI: u32 = 0x2a;

/// XOR with sign-extended immediate (`l.xori`).
pub const OP_XORI: u32 = 0x2b;

/// Multiply immediate (`l.muli`).
pub const OP_MULI: u32 = 0x2c;

/// Shift/rotate by immediate (`l.slli`, `l.srli`, `l.srai`, `l.rori`).
pub const OP_SHIFTI: u32 = 0x2e;

/// Set flag against immediate (`l.sf*i`).
pub const OP_SFI: u32 = 0x2f;

/// Store word (`l.sw`).
pub const OP_SW: u32 = 0x35;

/// Store byte (`l.sb`).
pub const OP_SB: u32 = 0x36;

/// Store half-word (`l.sh`).
pub const OP_SH: u32 = 0x37;

/// Register-register ALU operations.
pub const OP_ALU: u32 = 0x38;

/// Set flag against register (`l.sf*`).
pub const OP_SF: u32 = 0x39;
