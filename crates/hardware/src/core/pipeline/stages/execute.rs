//! Instruction Execute (EX) Stage.
//!
//! This module implements the third stage of the pipeline. It performs the following:
//! 1. **ALU Execution:** Drives the ALU with the decoded operands and reads its result when a
//!    later stage consumes it.
//! 2. **Control Resolution:** Computes jump and branch targets and the taken/not-taken outcome.
//! 3. **Redirect:** Steers the program counter to a taken target once the delay slot is fetched.

use tracing::debug;

use crate::common::{INSTRUCTION_SIZE, SimError};
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, Latches};
use crate::core::pipeline::signals::{ControlFlow, MemOp, OperandB};
use crate::core::pipeline::traits::{PipelineStage, StageContext, StageStatus};
use crate::core::units::alu::Alu;

/// Distance from a control transfer to its return address (past the delay slot).
const LINK_OFFSET: u32 = 2 * INSTRUCTION_SIZE;

/// Resolves the taken target of a control transfer, if any.
fn resolve_target(entry: &IdExEntry) -> Option<u32> {
    let relative = entry.pc.wrapping_add(entry.imm);
    match entry.ctrl.control {
        ControlFlow::None => None,
        ControlFlow::Jump => Some(relative),
        ControlFlow::Branch { if_flag } => (entry.flag == if_flag).then_some(relative),
        ControlFlow::JumpRegister => Some(entry.rv_b),
    }
}

/// The execute stage.
#[derive(Clone, Debug, Default)]
pub struct ExecuteStage {
    output: Option<ExMemEntry>,
    redirect: Option<(u32, u32)>,
}

impl ExecuteStage {
    /// Creates an idle execute stage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PipelineStage for ExecuteStage {
    fn name(&self) -> &'static str {
        "EX"
    }

    fn propagate(
        &mut self,
        latches: &Latches,
        _ctx: &mut StageContext<'_>,
    ) -> Result<StageStatus, SimError> {
        self.output = None;
        self.redirect = None;
        let Some(entry) = latches.id_ex else {
            return Ok(StageStatus::Idle);
        };
        let ctrl = entry.ctrl;

        let mut alu = Alu::new();
        alu.set_a(entry.rv_a);
        alu.set_b(match ctrl.b_src {
            OperandB::Register => entry.rv_b,
            OperandB::Immediate => entry.imm,
            OperandB::LinkAddress => entry.pc.wrapping_add(LINK_OFFSET),
        });
        if let Some(op) = ctrl.alu_op {
            alu.set_op(op);
        }

        let result_used = ctrl.reg_write || ctrl.flag_write || ctrl.mem != MemOp::None;
        let result = if result_used { alu.result()? } else { 0 };

        self.redirect = resolve_target(&entry)
            .map(|target| (entry.pc.wrapping_add(INSTRUCTION_SIZE), target));
        self.output = Some(ExMemEntry {
            pc: entry.pc,
            inst: entry.inst,
            rd: entry.rd,
            alu: result,
            store_data: entry.rv_b,
            ctrl,
        });
        Ok(StageStatus::Ready)
    }

    fn clock_pulse(
        &mut self,
        latches: &mut Latches,
        ctx: &mut StageContext<'_>,
    ) -> Result<(), SimError> {
        if let Some((delay_slot, target)) = self.redirect.take() {
            debug!(
                delay_slot = %format_args!("{delay_slot:#x}"),
                target = %format_args!("{target:#x}"),
                "control transfer taken"
            );
            ctx.state.pc.redirect(delay_slot, target);
        }
        latches.id_ex = None;
        latches.ex_mem = self.output.take();
        Ok(())
    }
}
