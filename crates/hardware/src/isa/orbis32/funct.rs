//! ORBIS32 function codes for the register ALU, shift and set-flag groups.

/// `l.add` (bits 3-0).
pub const ALU_ADD: u32 = 0x0;
/// `l.sub`.
pub const ALU_SUB: u32 = 0x2;
/// `l.and`.
pub const ALU_AND: u32 = 0x3;
/// `l.or`.
pub const ALU_OR: u32 = 0x4;
/// `l.xor`.
pub const ALU_XOR: u32 = 0x5;
/// `l.mul` (secondary code 3).
pub const ALU_MUL: u32 = 0x6;
/// Shift group; bits 7-6 select the shift type.
pub const ALU_SHIFT: u32 = 0x8;
/// `l.div` (secondary code 3).
pub const ALU_DIV: u32 = 0x9;
/// `l.divu` (secondary code 3).
pub const ALU_DIVU: u32 = 0xa;
/// `l.mulu` (secondary code 3).
pub const ALU_MULU: u32 = 0xb;
/// Sign/zero extension group; bits 9-6 select the variant.
pub const ALU_EXT: u32 = 0xc;
/// `l.cmov`.
pub const ALU_CMOV: u32 = 0xe;
/// `l.ff1` (secondary code 0) and `l.fl1` (secondary code 1).
pub const ALU_FF1: u32 = 0xf;

/// Secondary code carried by the multiply and divide group (bits 9-8).
pub const ALU2_MULDIV: u32 = 0x3;
/// Secondary code selecting `l.fl1` within the find-bit group.
pub const ALU2_FL1: u32 = 0x1;

/// `l.exths` (bits 9-6).
pub const EXT_HS: u32 = 0x0;
/// `l.extbs`.
pub const EXT_BS: u32 = 0x1;
/// `l.exthz`.
pub const EXT_HZ: u32 = 0x2;
/// `l.extbz`.
pub const EXT_BZ: u32 = 0x3;

/// Shift left logical (bits 7-6).
pub const SHIFT_SLL: u32 = 0x0;
/// Shift right logical.
pub const SHIFT_SRL: u32 = 0x1;
/// Shift right arithmetic.
pub const SHIFT_SRA: u32 = 0x2;
/// Rotate right.
pub const SHIFT_ROR: u32 = 0x3;

/// Set flag if equal (bits 25-21).
pub const SF_EQ: u32 = 0x00;
/// Set flag if not equal.
pub const SF_NE: u32 = 0x01;
/// Set flag if greater than, unsigned.
pub const SF_GTU: u32 = 0x02;
/// Set flag if greater or equal, unsigned.
pub const SF_GEU: u32 = 0x03;
/// Set flag if less than, unsigned.
pub const SF_LTU: u32 = 0x04;
/// Set flag if less or equal, unsigned.
pub const SF_LEU: u32 = 0x05;
/// Set flag if greater than, signed.
pub const SF_GTS: u32 = 0x0a;
/// Set flag if greater or equal, signed.
pub const SF_GES: u32 = 0x0b;
/// Set flag if less than, signed.
pub const SF_LTS: u32 = 0x0c;
/// Set flag if less or equal, signed.
pub const SF_LES: u32 = 0x0d;
