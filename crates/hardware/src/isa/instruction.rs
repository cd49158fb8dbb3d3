//! Instruction encoding and bit extraction utilities.
//!
//! Provides field extraction for 32-bit OpenRISC instruction words. Every method is a
//! pure function of the word; interpretation of a field depends on the instruction format.

/// Bit position of the major opcode field.
const OPCODE_SHIFT: u32 = 26;
/// Bit mask for the 6-bit major opcode.
pub const OPCODE_MASK: u32 = 0x3F;
/// Bit mask for a 5-bit register field.
pub const REG_MASK: u32 = 0x1F;
/// Bit position of the D (destination) register field.
const RD_SHIFT: u32 = 21;
/// Bit position of the A (first source) register field.
const RA_SHIFT: u32 = 16;
/// Bit position of the B (second source) register field.
const RB_SHIFT: u32 = 11;
/// Bit mask for the 16-bit immediate.
pub const IMM16_MASK: u32 = 0xFFFF;
/// Bit mask for the low 11 bits of the split store immediate.
const STORE_IMM_LOW_MASK: u32 = 0x7FF;
/// Bit mask for the high 5 bits of the split store immediate, already shifted into place.
const STORE_IMM_HIGH_MASK: u32 = 0xF800;
/// Distance the high store-immediate bits move (bits 25-21 down to 15-11).
const STORE_IMM_HIGH_SHIFT: u32 = 10;
/// Left shift that moves jump offset bit 25 into the sign position.
const JUMP_SIGN_SHIFT: u32 = 6;
/// Arithmetic right shift that restores the offset already scaled by 4.
const JUMP_SCALE_SHIFT: u32 = 4;
/// Bit mask for the shift amount of immediate shifts.
const SHAMT_MASK: u32 = 0x3F;

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the major opcode (bits 31-26).
    fn opcode(&self) -> u32;

    /// Extracts the D register field (bits 25-21).
    fn rd(&self) -> u8;

    /// Extracts the A register field (bits 20-16).
    fn ra(&self) -> u8;

    /// Extracts the B register field (bits 15-11).
    fn rb(&self) -> u8;

    /// Extracts the raw 16-bit immediate (bits 15-0).
    fn imm16(&self) -> u32;

    /// Extracts the 16-bit immediate, sign-extended to 32 bits.
    fn simm16(&self) -> i32;

    /// Reassembles the split store immediate (bits 25-21 and 10-0), sign-extended.
    fn store_imm(&self) -> i32;

    /// Extracts the 26-bit jump/branch offset as a signed byte displacement.
    fn jump_offset(&self) -> i32;

    /// Extracts the primary ALU function code (bits 3-0).
    fn alu_funct(&self) -> u32;

    /// Extracts the secondary ALU function code (bits 9-8).
    fn alu_funct2(&self) -> u32;

    /// Extracts the extension selector (bits 9-6).
    fn ext_funct(&self) -> u32;

    /// Extracts the shift type (bits 7-6).
    fn shift_type(&self) -> u32;

    /// Extracts the immediate shift amount (bits 5-0).
    fn shamt(&self) -> u32;

    /// Extracts the set-flag condition (bits 25-21).
    fn sf_cond(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        (self >> OPCODE_SHIFT) & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> u8 {
        ((self >> RD_SHIFT) & REG_MASK) as u8
    }

    #[inline(always)]
    fn ra(&self) -> u8 {
        ((self >> RA_SHIFT) & REG_MASK) as u8
    }

    #[inline(always)]
    fn rb(&self) -> u8 {
        ((self >> RB_SHIFT) & REG_MASK) as u8
    }

    #[inline(always)]
    fn imm16(&self) -> u32 {
        self & IMM16_MASK
    }

    #[inline(always)]
    fn simm16(&self) -> i32 {
        i32::from((self & IMM16_MASK) as u16 as i16)
    }

    #[inline(always)]
    fn store_imm(&self) -> i32 {
        let raw = ((self >> STORE_IMM_HIGH_SHIFT) & STORE_IMM_HIGH_MASK) | (self & STORE_IMM_LOW_MASK);
        i32::from(raw as u16 as i16)
    }

    #[inline(always)]
    fn jump_offset(&self) -> i32 {
        ((self << JUMP_SIGN_SHIFT) as i32) >> JUMP_SCALE_SHIFT
    }

    #[inline(always)]
    fn alu_funct(&self) -> u32 {
        self & 0xF
    }

    #[inline(always)]
    fn alu_funct2(&self) -> u32 {
        (self >> 8) & 0x3
    }

    #[inline(always)]
    fn ext_funct(&self) -> u32 {
        (self >> 6) & 0xF
    }

    #[inline(always)]
    fn shift_type(&self) -> u32 {
        (self >> 6) & 0x3
    }

    #[inline(always)]
    fn shamt(&self) -> u32 {
        self & SHAMT_MASK
    }

    #[inline(always)]
    fn sf_cond(&self) -> u32 {
        (self >> RD_SHIFT) & REG_MASK
    }
}
