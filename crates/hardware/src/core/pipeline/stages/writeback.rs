//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the pipeline. It commits the ALU result or the
//! loaded value to the register file, updates the compare flag for `l.sf*` instructions and
//! counts completed instructions.

use tracing::warn;

use crate::common::SimError;
use crate::core::pipeline::latches::{Latches, MemWbEntry};
use crate::core::pipeline::signals::MemOp;
use crate::core::pipeline::traits::{PipelineStage, StageContext, StageStatus};

/// The writeback stage.
#[derive(Clone, Debug, Default)]
pub struct WriteBackStage {
    output: Option<(MemWbEntry, u32)>,
}

impl WriteBackStage {
    /// Creates an idle writeback stage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PipelineStage for WriteBackStage {
    fn name(&self) -> &'static str {
        "WB"
    }

    fn propagate(
        &mut self,
        latches: &Latches,
        _ctx: &mut StageContext<'_>,
    ) -> Result<StageStatus, SimError> {
        self.output = latches.mem_wb.map(|entry| {
            let value = match entry.ctrl.mem {
                MemOp::Load { .. } => entry.load_data,
                _ => entry.alu,
            };
            (entry, value)
        });
        Ok(if self.output.is_some() {
            StageStatus::Ready
        } else {
            StageStatus::Idle
        })
    }

    fn clock_pulse(
        &mut self,
        latches: &mut Latches,
        ctx: &mut StageContext<'_>,
    ) -> Result<(), SimError> {
        latches.mem_wb = None;
        let Some((entry, value)) = self.output.take() else {
            return Ok(());
        };

        if entry.ctrl.reg_write {
            if entry.rd == 0 {
                warn!(pc = %format_args!("{:#x}", entry.pc), "write to r0 discarded");
            }
            ctx.state.regs.write(entry.rd, value);
        }
        if entry.ctrl.flag_write {
            ctx.state.flag = value != 0;
        }
        ctx.stats.instructions_completed += 1;
        Ok(())
    }
}
