//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the instruction pipeline. It reads the word at
//! the program counter through the instruction memory port and advances the counter.
//!
//! Fetch stops at the end of the program: when it reads the test end marker or the read
//! fails, it remembers the condition, stops reading memory, emits bubbles, and reports the
//! condition only once every older instruction has left the pipeline.

use tracing::trace;

use crate::common::{SimError, TEST_END_MARKER};
use crate::core::pipeline::latches::{IfIdEntry, Latches};
use crate::core::pipeline::traits::{PipelineStage, StageContext, StageStatus};
use crate::core::units::lsu::InstructionMemory;

/// Result of the fetch combinational phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum FetchOutput {
    /// Leave IF/ID and the PC untouched (Decode is stalled).
    #[default]
    Hold,
    /// Write a bubble to IF/ID without advancing the PC.
    Bubble,
    /// Write the fetched instruction and advance the PC.
    Fetched(IfIdEntry),
}

/// The fetch stage.
#[derive(Clone, Debug, Default)]
pub struct FetchStage {
    imem: InstructionMemory,
    output: FetchOutput,
    /// End-of-program condition, latched on the first fetch that hit it.
    stop: Option<SimError>,
}

impl FetchStage {
    /// Creates a fetch stage with a word-sized instruction port.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PipelineStage for FetchStage {
    fn name(&self) -> &'static str {
        "IF"
    }

    fn propagate(
        &mut self,
        latches: &Latches,
        ctx: &mut StageContext<'_>,
    ) -> Result<StageStatus, SimError> {
        if ctx.hazards.data_stall {
            self.output = FetchOutput::Hold;
            return Ok(StageStatus::Stalled);
        }
        if ctx.hazards.control_stall {
            self.output = FetchOutput::Bubble;
            return Ok(StageStatus::Stalled);
        }

        if self.stop.is_none() {
            let pc = ctx.state.pc.current();
            self.imem.set_address(pc);
            let stop = match self.imem.value(ctx.bus) {
                Ok(TEST_END_MARKER) => SimError::TestEndMarkerEncountered(pc),
                Ok(inst) => {
                    self.output = FetchOutput::Fetched(IfIdEntry { pc, inst });
                    return Ok(StageStatus::Ready);
                }
                Err(err) => {
                    trace!(pc = %format_args!("{pc:#x}"), %err, "fetch failed");
                    SimError::InstructionFetchFailure(pc)
                }
            };
            self.stop = Some(stop);
        }

        self.output = FetchOutput::Bubble;
        match &self.stop {
            Some(stop) if latches.is_empty() => Ok(StageStatus::Stop(stop.clone())),
            _ => Ok(StageStatus::Idle),
        }
    }

    fn clock_pulse(
        &mut self,
        latches: &mut Latches,
        ctx: &mut StageContext<'_>,
    ) -> Result<(), SimError> {
        // A cycle stalled for both reasons counts once, as a data stall.
        if ctx.hazards.control_stall && !ctx.hazards.data_stall {
            ctx.stats.stalls_control += 1;
        }
        match std::mem::take(&mut self.output) {
            FetchOutput::Hold => {}
            FetchOutput::Bubble => latches.if_id = None,
            FetchOutput::Fetched(entry) => {
                latches.if_id = Some(entry);
                ctx.state.pc.advance(entry.pc);
            }
        }
        Ok(())
    }
}
