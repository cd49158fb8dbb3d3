//! OpenRISC Instruction Decoder.
//!
//! This module wraps a raw instruction word and exposes its fields: opcode, register
//! numbers, function codes and the immediate with the extension its format requires.
//! The decoder classifies but never rejects; stages that act on an encoding report
//! unknown ones as illegal instructions.

use std::fmt;

use crate::isa::disasm;
use crate::isa::instruction::InstructionBits;
use crate::isa::orbis32::opcodes;

/// Bit pattern in bits 25-24 that identifies `l.nop` within opcode 0x05.
const NOP_SELECT: u32 = 0x1;
/// Bit that distinguishes `l.macrc` from `l.movhi`.
const MOVHI_MACRC_BIT: u32 = 1 << 16;
/// Shift applied to the `l.movhi` immediate.
const MOVHI_SHIFT: u32 = 16;

/// Instruction formats, selected by the major opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Register-register ALU operation (`rD = rA op rB`).
    Register,
    /// Register-register compare (`F = rA cond rB`).
    SetFlag,
    /// ALU operation with sign-extended immediate.
    Immediate,
    /// Logical operation with zero-extended immediate (`l.andi`, `l.ori`).
    LogicalImmediate,
    /// Shift or rotate by a 6-bit immediate amount.
    ShiftImmediate,
    /// Compare against a sign-extended immediate.
    SetFlagImmediate,
    /// `l.movhi`: immediate placed in the upper half-word.
    MoveHigh,
    /// Load with sign-extended displacement.
    Load,
    /// Store with split sign-extended displacement.
    Store,
    /// PC-relative jump or conditional branch.
    Jump,
    /// Jump to the address held in rB.
    JumpRegister,
    /// `l.nop`.
    Nop,
    /// Any encoding outside the supported subset.
    Unknown,
}

/// Decoder component used by the decode stage.
///
/// Holds exactly one instruction word; all accessors derive their result from it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InstructionDecoder {
    word: u32,
}

impl InstructionDecoder {
    /// Creates a decoder holding `word`.
    pub const fn new(word: u32) -> Self {
        Self { word }
    }

    /// Replaces the held instruction word.
    pub fn set_instruction_word(&mut self, word: u32) {
        self.word = word;
    }

    /// Returns the held instruction word.
    pub const fn instruction_word(&self) -> u32 {
        self.word
    }

    /// Major opcode (bits 31-26).
    pub fn opcode(&self) -> u32 {
        self.word.opcode()
    }

    /// First source register (A field).
    pub fn a(&self) -> u8 {
        self.word.ra()
    }

    /// Second source register (B field).
    pub fn b(&self) -> u8 {
        self.word.rb()
    }

    /// Destination register (D field).
    pub fn d(&self) -> u8 {
        self.word.rd()
    }

    /// Format of the held instruction.
    pub fn format(&self) -> Format {
        match self.opcode() {
            opcodes::OP_ALU => Format::Register,
            opcodes::OP_SF => Format::SetFlag,
            opcodes::OP_ADDI | opcodes::OP_XORI | opcodes::OP_MULI => Format::Immediate,
            opcodes::OP_ANDI | opcodes::OP_ORI => Format::LogicalImmediate,
            opcodes::OP_SHIFTI => Format::ShiftImmediate,
            opcodes::OP_SFI => Format::SetFlagImmediate,
            opcodes::OP_MOVHI if self.word & MOVHI_MACRC_BIT == 0 => Format::MoveHigh,
            opcodes::OP_LWZ
            | opcodes::OP_LWS
            | opcodes::OP_LBZ
            | opcodes::OP_LBS
            | opcodes::OP_LHZ
            | opcodes::OP_LHS => Format::Load,
            opcodes::OP_SW | opcodes::OP_SB | opcodes::OP_SH => Format::Store,
            opcodes::OP_J | opcodes::OP_JAL | opcodes::OP_BF | opcodes::OP_BNF => Format::Jump,
            opcodes::OP_JR | opcodes::OP_JALR => Format::JumpRegister,
            opcodes::OP_NOP if (self.word >> 24) & 0x3 == NOP_SELECT => Format::Nop,
            _ => Format::Unknown,
        }
    }

    /// Primary function code: ALU function for register operations, condition for
    /// compares, shift type for immediate shifts, zero otherwise.
    pub fn function_code(&self) -> u32 {
        match self.format() {
            Format::Register => self.word.alu_funct(),
            Format::SetFlag | Format::SetFlagImmediate => self.word.sf_cond(),
            Format::ShiftImmediate => self.word.shift_type(),
            _ => 0,
        }
    }

    /// Secondary function code of register ALU operations (bits 9-6), zero otherwise.
    pub fn secondary_code(&self) -> u32 {
        match self.format() {
            Format::Register => self.word.ext_funct(),
            _ => 0,
        }
    }

    /// Immediate operand, extended as the format requires.
    ///
    /// Jumps return the byte displacement, shifts their amount and `l.movhi` its
    /// immediate already moved into the upper half-word.
    pub fn immediate(&self) -> u32 {
        match self.format() {
            Format::Immediate | Format::SetFlagImmediate | Format::Load => {
                self.word.simm16() as u32
            }
            Format::LogicalImmediate => self.word.imm16(),
            Format::ShiftImmediate => self.word.shamt(),
            Format::MoveHigh => self.word.imm16() << MOVHI_SHIFT,
            Format::Store => self.word.store_imm() as u32,
            Format::Jump => self.word.jump_offset() as u32,
            Format::Nop => self.word.imm16(),
            Format::Register | Format::SetFlag | Format::JumpRegister | Format::Unknown => 0,
        }
    }
}

impl fmt::Display for InstructionDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&disasm::disassemble(self.word))
    }
}
