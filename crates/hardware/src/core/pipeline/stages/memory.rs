//! Memory Access (MEM) Stage.
//!
//! This module implements the fourth stage of the pipeline. Loads read the data memory port
//! while the stage propagates; stores are staged on the port and reach the bus only in the
//! clocked phase, after every stage has propagated without a fault.

use crate::common::SimError;
use crate::core::pipeline::latches::{Latches, MemWbEntry};
use crate::core::pipeline::signals::MemOp;
use crate::core::pipeline::traits::{PipelineStage, StageContext, StageStatus};
use crate::core::units::lsu::DataMemory;

/// The memory stage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStage {
    dmem: DataMemory,
    output: Option<MemWbEntry>,
}

impl MemoryStage {
    /// Creates an idle memory stage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PipelineStage for MemoryStage {
    fn name(&self) -> &'static str {
        "MEM"
    }

    fn propagate(
        &mut self,
        latches: &Latches,
        ctx: &mut StageContext<'_>,
    ) -> Result<StageStatus, SimError> {
        self.output = None;
        self.dmem.set_read_enable(false);
        self.dmem.set_write_enable(false);
        let Some(entry) = latches.ex_mem else {
            return Ok(StageStatus::Idle);
        };

        self.dmem.set_address(entry.alu);
        let load_data = match entry.ctrl.mem {
            MemOp::None => 0,
            MemOp::Load { width, signed } => {
                self.dmem.set_size(width);
                self.dmem.set_read_enable(true);
                self.dmem.data_out(ctx.bus, signed)?
            }
            MemOp::Store { width } => {
                self.dmem.set_size(width);
                self.dmem.set_data_in(entry.store_data);
                self.dmem.set_write_enable(true);
                0
            }
        };

        self.output = Some(MemWbEntry {
            pc: entry.pc,
            inst: entry.inst,
            rd: entry.rd,
            alu: entry.alu,
            load_data,
            ctrl: entry.ctrl,
        });
        Ok(StageStatus::Ready)
    }

    fn clock_pulse(
        &mut self,
        latches: &mut Latches,
        ctx: &mut StageContext<'_>,
    ) -> Result<(), SimError> {
        self.dmem.clock_pulse(ctx.bus)?;
        latches.ex_mem = None;
        latches.mem_wb = self.output.take();
        Ok(())
    }
}
