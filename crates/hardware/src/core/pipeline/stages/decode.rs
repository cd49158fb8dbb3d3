//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the pipeline. It performs the following:
//! 1. **Decoding:** Loads the instruction word into the decoder and derives control signals.
//! 2. **Register Read:** Reads source operands and the compare flag.
//! 3. **Hazard Response:** When the hazard unit reports a data hazard, emits a bubble to ID/EX
//!    and holds IF/ID so the instruction is decoded again next cycle.
//! 4. **Accounting:** Counts issued instructions and data stall cycles.

use crate::common::{LINK_REGISTER, SimError};
use crate::core::pipeline::latches::{IdExEntry, Latches};
use crate::core::pipeline::signals::{
    AluOp, Condition, ControlFlow, ControlSignals, MemOp, MemWidth, OperandB,
};
use crate::core::pipeline::traits::{PipelineStage, StageContext, StageStatus};
use crate::isa::decode::{Format, InstructionDecoder};
use crate::isa::disasm;
use crate::isa::instruction::InstructionBits;
use crate::isa::orbis32::{funct, opcodes};

/// Maps a set-flag condition code to its compare condition.
fn condition(code: u32) -> Option<Condition> {
    Some(match code {
        funct::SF_EQ => Condition::Eq,
        funct::SF_NE => Condition::Ne,
        funct::SF_GTU => Condition::Gtu,
        funct::SF_GEU => Condition::Geu,
        funct::SF_LTU => Condition::Ltu,
        funct::SF_LEU => Condition::Leu,
        funct::SF_GTS => Condition::Gts,
        funct::SF_GES => Condition::Ges,
        funct::SF_LTS => Condition::Lts,
        funct::SF_LES => Condition::Les,
        _ => return None,
    })
}

fn shift_op(kind: u32) -> AluOp {
    match kind {
        funct::SHIFT_SLL => AluOp::Sll,
        funct::SHIFT_SRL => AluOp::Srl,
        funct::SHIFT_SRA => AluOp::Sra,
        _ => AluOp::Ror,
    }
}

/// ALU operation and operand usage of a register-register instruction.
fn register_op(decoder: &InstructionDecoder) -> Option<(AluOp, bool)> {
    let word = decoder.instruction_word();
    let muldiv = word.alu_funct2() == funct::ALU2_MULDIV;
    let two_sources = |op| Some((op, true));
    let one_source = |op| Some((op, false));
    match decoder.function_code() {
        funct::ALU_ADD => two_sources(AluOp::Add),
        funct::ALU_SUB => two_sources(AluOp::Sub),
        funct::ALU_AND => two_sources(AluOp::And),
        funct::ALU_OR => two_sources(AluOp::Or),
        funct::ALU_XOR => two_sources(AluOp::Xor),
        funct::ALU_MUL if muldiv => two_sources(AluOp::Mul),
        funct::ALU_MULU if muldiv => two_sources(AluOp::Mulu),
        funct::ALU_DIV if muldiv => two_sources(AluOp::Div),
        funct::ALU_DIVU if muldiv => two_sources(AluOp::Divu),
        funct::ALU_SHIFT => two_sources(shift_op(word.shift_type())),
        funct::ALU_EXT => match decoder.secondary_code() {
            funct::EXT_HS => one_source(AluOp::Exths),
            funct::EXT_BS => one_source(AluOp::Extbs),
            funct::EXT_HZ => one_source(AluOp::Exthz),
            funct::EXT_BZ => one_source(AluOp::Extbz),
            _ => None,
        },
        funct::ALU_CMOV => two_sources(AluOp::PassB),
        funct::ALU_FF1 if word.alu_funct2() == funct::ALU2_FL1 => one_source(AluOp::Fl1),
        funct::ALU_FF1 => one_source(AluOp::Ff1),
        _ => None,
    }
}

fn load_op(opcode: u32) -> MemOp {
    let (width, signed) = match opcode {
        opcodes::OP_LWZ => (MemWidth::Word, false),
        opcodes::OP_LWS => (MemWidth::Word, true),
        opcodes::OP_LBZ => (MemWidth::Byte, false),
        opcodes::OP_LBS => (MemWidth::Byte, true),
        opcodes::OP_LHZ => (MemWidth::Half, false),
        _ => (MemWidth::Half, true),
    };
    MemOp::Load { width, signed }
}

fn store_op(opcode: u32) -> MemOp {
    let width = match opcode {
        opcodes::OP_SW => MemWidth::Word,
        opcodes::OP_SB => MemWidth::Byte,
        _ => MemWidth::Half,
    };
    MemOp::Store { width }
}

/// Derives the control signals of the instruction held by `decoder`.
///
/// # Errors
///
/// [`SimError::IllegalInstruction`] for encodings outside the supported subset.
pub fn control_signals(decoder: &InstructionDecoder) -> Result<ControlSignals, SimError> {
    let illegal = || {
        SimError::IllegalInstruction(format!(
            "{:#010x} ({})",
            decoder.instruction_word(),
            disasm::disassemble(decoder.instruction_word())
        ))
    };
    let alu_imm = |op| ControlSignals {
        alu_op: Some(op),
        b_src: OperandB::Immediate,
        reads_a: true,
        reg_write: true,
        ..Default::default()
    };
    let link = ControlSignals {
        alu_op: Some(AluOp::PassB),
        b_src: OperandB::LinkAddress,
        reg_write: true,
        ..Default::default()
    };

    let ctrl = match decoder.format() {
        Format::Register => {
            let (op, reads_b) = register_op(decoder).ok_or_else(illegal)?;
            ControlSignals {
                alu_op: Some(op),
                reads_a: true,
                reads_b,
                reads_flag: decoder.function_code() == funct::ALU_CMOV,
                reg_write: true,
                ..Default::default()
            }
        }
        Format::SetFlag | Format::SetFlagImmediate => {
            let cond = condition(decoder.function_code()).ok_or_else(illegal)?;
            let immediate = decoder.format() == Format::SetFlagImmediate;
            ControlSignals {
                alu_op: Some(AluOp::Compare(cond)),
                b_src: if immediate {
                    OperandB::Immediate
                } else {
                    OperandB::Register
                },
                reads_a: true,
                reads_b: !immediate,
                flag_write: true,
                ..Default::default()
            }
        }
        Format::Immediate => alu_imm(match decoder.opcode() {
            opcodes::OP_ADDI => AluOp::Add,
            opcodes::OP_XORI => AluOp::Xor,
            _ => AluOp::Mul,
        }),
        Format::LogicalImmediate => alu_imm(if decoder.opcode() == opcodes::OP_ANDI {
            AluOp::And
        } else {
            AluOp::Or
        }),
        Format::ShiftImmediate => alu_imm(shift_op(decoder.function_code())),
        Format::MoveHigh => ControlSignals {
            reads_a: false,
            ..alu_imm(AluOp::PassB)
        },
        Format::Load => ControlSignals {
            mem: load_op(decoder.opcode()),
            ..alu_imm(AluOp::Add)
        },
        Format::Store => ControlSignals {
            reads_b: true,
            reg_write: false,
            mem: store_op(decoder.opcode()),
            ..alu_imm(AluOp::Add)
        },
        Format::Jump => match decoder.opcode() {
            opcodes::OP_J => ControlSignals {
                control: ControlFlow::Jump,
                ..Default::default()
            },
            opcodes::OP_JAL => ControlSignals {
                control: ControlFlow::Jump,
                ..link
            },
            op => ControlSignals {
                reads_flag: true,
                control: ControlFlow::Branch {
                    if_flag: op == opcodes::OP_BF,
                },
                ..Default::default()
            },
        },
        Format::JumpRegister => {
            let base = if decoder.opcode() == opcodes::OP_JALR {
                link
            } else {
                ControlSignals::default()
            };
            ControlSignals {
                reads_b: true,
                control: ControlFlow::JumpRegister,
                ..base
            }
        }
        Format::Nop => ControlSignals::default(),
        Format::Unknown => return Err(illegal()),
    };
    Ok(ctrl)
}

/// Destination register of a decoded instruction.
fn destination(decoder: &InstructionDecoder, ctrl: &ControlSignals) -> u8 {
    if ctrl.b_src == OperandB::LinkAddress {
        LINK_REGISTER
    } else {
        decoder.d()
    }
}

/// The decode stage.
#[derive(Clone, Debug, Default)]
pub struct DecodeStage {
    decoder: InstructionDecoder,
    output: Option<IdExEntry>,
    stalled: bool,
}

impl DecodeStage {
    /// Creates an idle decode stage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PipelineStage for DecodeStage {
    fn name(&self) -> &'static str {
        "ID"
    }

    fn propagate(
        &mut self,
        latches: &Latches,
        ctx: &mut StageContext<'_>,
    ) -> Result<StageStatus, SimError> {
        self.output = None;
        self.stalled = ctx.hazards.data_stall;
        if self.stalled {
            return Ok(StageStatus::Stalled);
        }
        let Some(entry) = latches.if_id else {
            return Ok(StageStatus::Idle);
        };

        self.decoder.set_instruction_word(entry.inst);
        let ctrl = control_signals(&self.decoder)?;

        let regs = &ctx.state.regs;
        let rv_a = regs.read(self.decoder.a());
        let mut rv_b = regs.read(self.decoder.b());
        let flag = ctx.state.flag;
        if ctrl.reads_flag && ctrl.alu_op == Some(AluOp::PassB) {
            // l.cmov: rD = F ? rA : rB
            if flag {
                rv_b = rv_a;
            }
        }

        self.output = Some(IdExEntry {
            pc: entry.pc,
            inst: entry.inst,
            rd: destination(&self.decoder, &ctrl),
            rv_a,
            rv_b,
            imm: self.decoder.immediate(),
            flag,
            ctrl,
        });
        Ok(StageStatus::Ready)
    }

    fn clock_pulse(
        &mut self,
        latches: &mut Latches,
        ctx: &mut StageContext<'_>,
    ) -> Result<(), SimError> {
        if std::mem::take(&mut self.stalled) {
            latches.id_ex = None;
            ctx.stats.stalls_data += 1;
            return Ok(());
        }

        let output = self.output.take();
        if let Some(entry) = &output {
            latches.if_id = None;
            ctx.stats.instructions_issued += 1;
            if ctx.trace {
                eprintln!("{:#x}\t{}", entry.pc, disasm::disassemble_at(entry.inst, entry.pc));
            }
        }
        latches.id_ex = output;
        Ok(())
    }
}
