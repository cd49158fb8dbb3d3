//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the entry types carried between the five pipeline stages:
//! Fetch → Decode → Execute → Memory → Writeback.
//!
//! 1. **Instruction Flow:** One record per latch holding exactly what the downstream stage needs.
//! 2. **Bubbles:** An empty latch (`None`) is a bubble; nothing is counted or committed for it.
//! 3. **Hazard Inputs:** In-flight destinations exposed for the hazard unit.

use crate::core::pipeline::signals::ControlSignals;

/// Entry in the IF/ID pipeline latch (Fetch to Decode stage).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IfIdEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
}

/// Entry in the ID/EX pipeline latch (Decode to Execute stage).
///
/// Contains decoded operands and the control signals for the remaining stages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdExEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Destination register index.
    pub rd: u8,
    /// Value read from register A.
    pub rv_a: u32,
    /// Value read from register B (for `l.cmov`, the selected source).
    pub rv_b: u32,
    /// Extended immediate value.
    pub imm: u32,
    /// Compare flag as read by decode, for conditional branches.
    pub flag: bool,
    /// Control signals for downstream pipeline stages.
    pub ctrl: ControlSignals,
}

/// Entry in the EX/MEM pipeline latch (Execute to Memory stage).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExMemEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Destination register index.
    pub rd: u8,
    /// ALU computation result or address for memory operations.
    pub alu: u32,
    /// Data to be stored (for store instructions).
    pub store_data: u32,
    /// Control signals for downstream pipeline stages.
    pub ctrl: ControlSignals,
}

/// Entry in the MEM/WB pipeline latch (Memory to Writeback stage).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemWbEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Destination register index.
    pub rd: u8,
    /// ALU computation result (for non-load instructions).
    pub alu: u32,
    /// Data loaded from memory (for load instructions).
    pub load_data: u32,
    /// Control signals for the writeback stage.
    pub ctrl: ControlSignals,
}

/// The four inter-stage latches, owned by the pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Latches {
    /// IF/ID latch.
    pub if_id: Option<IfIdEntry>,
    /// ID/EX latch.
    pub id_ex: Option<IdExEntry>,
    /// EX/MEM latch.
    pub ex_mem: Option<ExMemEntry>,
    /// MEM/WB latch.
    pub mem_wb: Option<MemWbEntry>,
}

impl Latches {
    /// Returns `true` if no instruction is in flight.
    pub const fn is_empty(&self) -> bool {
        self.if_id.is_none() && self.id_ex.is_none() && self.ex_mem.is_none() && self.mem_wb.is_none()
    }

    /// Clears every latch.
    pub fn flush(&mut self) {
        *self = Self::default();
    }

    /// Destination register and control signals of every instruction past decode.
    pub fn in_flight(&self) -> impl Iterator<Item = (u8, ControlSignals)> {
        let id_ex = self.id_ex.map(|e| (e.rd, e.ctrl));
        let ex_mem = self.ex_mem.map(|e| (e.rd, e.ctrl));
        let mem_wb = self.mem_wb.map(|e| (e.rd, e.ctrl));
        id_ex.into_iter().chain(ex_mem).chain(mem_wb)
    }
}
