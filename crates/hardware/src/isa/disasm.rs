//! Instruction Disassembler for ORBIS32.
//!
//! Converts a 32-bit instruction encoding into OpenRISC assembly syntax for instruction
//! tracing, the command line disassembler and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use pipesim_core::isa::disasm::disassemble;
//! assert_eq!(disassemble(0x9c20_0005), "l.addi r1,r0,5");
//! ```

use crate::isa::instruction::InstructionBits;
use crate::isa::orbis32::{funct, opcodes};

/// Text produced for encodings outside the supported subset.
pub const ILLEGAL: &str = "illegal instruction";

/// Mnemonic suffix for each set-flag condition.
fn condition_name(cond: u32) -> Option<&'static str> {
    Some(match cond {
        funct::SF_EQ => "eq",
        funct::SF_NE => "ne",
        funct::SF_GTU => "gtu",
        funct::SF_GEU => "geu",
        funct::SF_LTU => "ltu",
        funct::SF_LEU => "leu",
        funct::SF_GTS => "gts",
        funct::SF_GES => "ges",
        funct::SF_LTS => "lts",
        funct::SF_LES => "les",
        _ => return None,
    })
}

fn shift_name(kind: u32) -> &'static str {
    match kind {
        funct::SHIFT_SLL => "sll",
        funct::SHIFT_SRL => "srl",
        funct::SHIFT_SRA => "sra",
        _ => "ror",
    }
}

/// Mnemonic of a register-register ALU instruction, or `None` if unsupported.
fn alu_name(word: u32) -> Option<&'static str> {
    let op2 = word.alu_funct2();
    Some(match word.alu_funct() {
        funct::ALU_ADD => "add",
        funct::ALU_SUB => "sub",
        funct::ALU_AND => "and",
        funct::ALU_OR => "or",
        funct::ALU_XOR => "xor",
        funct::ALU_MUL if op2 == funct::ALU2_MULDIV => "mul",
        funct::ALU_MULU if op2 == funct::ALU2_MULDIV => "mulu",
        funct::ALU_DIV if op2 == funct::ALU2_MULDIV => "div",
        funct::ALU_DIVU if op2 == funct::ALU2_MULDIV => "divu",
        funct::ALU_SHIFT => shift_name(word.shift_type()),
        funct::ALU_EXT => match word.ext_funct() {
            funct::EXT_HS => "exths",
            funct::EXT_BS => "extbs",
            funct::EXT_HZ => "exthz",
            funct::EXT_BZ => "extbz",
            _ => return None,
        },
        funct::ALU_CMOV => "cmov",
        funct::ALU_FF1 if op2 == funct::ALU2_FL1 => "fl1",
        funct::ALU_FF1 => "ff1",
        _ => return None,
    })
}

/// Disassembles a 32-bit instruction with jump targets shown as byte displacements.
pub fn disassemble(word: u32) -> String {
    render(word, None)
}

/// Disassembles a 32-bit instruction located at `pc`, resolving jump targets.
pub fn disassemble_at(word: u32, pc: u32) -> String {
    render(word, Some(pc))
}

fn render(word: u32, pc: Option<u32>) -> String {
    let (d, a, b) = (word.rd(), word.ra(), word.rb());
    match word.opcode() {
        opcodes::OP_ALU => match alu_name(word) {
            Some(name @ ("exths" | "extbs" | "exthz" | "extbz" | "ff1" | "fl1")) => {
                format!("l.{name} r{d},r{a}")
            }
            Some(name) => format!("l.{name} r{d},r{a},r{b}"),
            None => ILLEGAL.to_string(),
        },
        opcodes::OP_SF => match condition_name(word.sf_cond()) {
            Some(cond) => format!("l.sf{cond} r{a},r{b}"),
            None => ILLEGAL.to_string(),
        },
        opcodes::OP_SFI => match condition_name(word.sf_cond()) {
            Some(cond) => format!("l.sf{cond}i r{a},{}", word.simm16()),
            None => ILLEGAL.to_string(),
        },
        opcodes::OP_ADDI => format!("l.addi r{d},r{a},{}", word.simm16()),
        opcodes::OP_XORI => format!("l.xori r{d},r{a},{}", word.simm16()),
        opcodes::OP_MULI => format!("l.muli r{d},r{a},{}", word.simm16()),
        opcodes::OP_ANDI => format!("l.andi r{d},r{a},{:#x}", word.imm16()),
        opcodes::OP_ORI => format!("l.ori r{d},r{a},{:#x}", word.imm16()),
        opcodes::OP_SHIFTI => {
            format!("l.{}i r{d},r{a},{}", shift_name(word.shift_type()), word.shamt())
        }
        opcodes::OP_MOVHI if word & (1 << 16) == 0 => format!("l.movhi r{d},{:#x}", word.imm16()),
        op @ (opcodes::OP_LWZ
        | opcodes::OP_LWS
        | opcodes::OP_LBZ
        | opcodes::OP_LBS
        | opcodes::OP_LHZ
        | opcodes::OP_LHS) => {
            let name = match op {
                opcodes::OP_LWZ => "lwz",
                opcodes::OP_LWS => "lws",
                opcodes::OP_LBZ => "lbz",
                opcodes::OP_LBS => "lbs",
                opcodes::OP_LHZ => "lhz",
                _ => "lhs",
            };
            format!("l.{name} r{d},{}(r{a})", word.simm16())
        }
        op @ (opcodes::OP_SW | opcodes::OP_SB | opcodes::OP_SH) => {
            let name = match op {
                opcodes::OP_SW => "sw",
                opcodes::OP_SB => "sb",
                _ => "sh",
            };
            format!("l.{name} {}(r{a}),r{b}", word.store_imm())
        }
        op @ (opcodes::OP_J | opcodes::OP_JAL | opcodes::OP_BF | opcodes::OP_BNF) => {
            let name = match op {
                opcodes::OP_J => "j",
                opcodes::OP_JAL => "jal",
                opcodes::OP_BF => "bf",
                _ => "bnf",
            };
            let offset = word.jump_offset();
            match pc {
                Some(pc) => format!("l.{name} {:#x}", pc.wrapping_add_signed(offset)),
                None => format!("l.{name} {offset}"),
            }
        }
        opcodes::OP_JR => format!("l.jr r{b}"),
        opcodes::OP_JALR => format!("l.jalr r{b}"),
        opcodes::OP_NOP if (word >> 24) & 0x3 == 0x1 => match word.imm16() {
            0 => "l.nop".to_string(),
            k => format!("l.nop {k:#x}"),
        },
        _ => ILLEGAL.to_string(),
    }
}
