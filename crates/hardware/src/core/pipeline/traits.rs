//! Pipeline Stage Interface.
//!
//! This module defines the two-phase contract shared by all five stages. It provides:
//! 1. **Stage Context:** The shared state a stage may read or commit to during a cycle.
//! 2. **Stage Status:** The explicit per-cycle outcome a stage reports from `propagate`.
//! 3. **Pipeline Stage Interface:** `propagate` computes, `clock_pulse` commits.

use crate::common::SimError;
use crate::core::arch::ArchState;
use crate::core::pipeline::hazards::HazardSignals;
use crate::core::pipeline::latches::Latches;
use crate::soc::Bus;
use crate::stats::SimStats;

/// Shared state threaded through every stage for one cycle.
#[derive(Debug)]
pub struct StageContext<'a> {
    /// Register file, flag and program counter.
    pub state: &'a mut ArchState,
    /// Memory bus.
    pub bus: &'a mut Bus,
    /// Performance counters.
    pub stats: &'a mut SimStats,
    /// Hazard unit outputs for this cycle (all clear in round-robin mode).
    pub hazards: HazardSignals,
    /// Print each decoded instruction to stderr.
    pub trace: bool,
}

impl<'a> StageContext<'a> {
    /// Creates a context with no stall requests.
    pub fn new(
        state: &'a mut ArchState,
        bus: &'a mut Bus,
        stats: &'a mut SimStats,
        trace: bool,
    ) -> Self {
        Self {
            state,
            bus,
            stats,
            hazards: HazardSignals::default(),
            trace,
        }
    }
}

/// Outcome of a stage's combinational phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StageStatus {
    /// The stage produced an entry for its downstream latch.
    Ready,
    /// The stage had no input and will emit a bubble.
    Idle,
    /// The stage is held by a hazard this cycle.
    Stalled,
    /// Fetch reached the end of the program and the pipeline has drained.
    ///
    /// Carries [`SimError::TestEndMarkerEncountered`] or
    /// [`SimError::InstructionFetchFailure`].
    Stop(SimError),
}

/// Represents a stage in the instruction pipeline.
///
/// Within one cycle every active stage runs `propagate` against the latches committed by the
/// previous cycle, and only then does any stage run `clock_pulse`.
pub trait PipelineStage {
    /// Short stage name used in diagnostics (e.g. `"IF"`).
    fn name(&self) -> &'static str;

    /// Computes this cycle's output from the previous cycle's latches.
    ///
    /// Must not write any latch or architectural state.
    ///
    /// # Errors
    ///
    /// Instruction-level faults: illegal instructions and illegal memory accesses.
    fn propagate(
        &mut self,
        latches: &Latches,
        ctx: &mut StageContext<'_>,
    ) -> Result<StageStatus, SimError>;

    /// Commits the output computed by `propagate`: consumes the input latch, fills the
    /// output latch and updates owned state.
    ///
    /// # Errors
    ///
    /// Faults raised while committing a store to the bus.
    fn clock_pulse(
        &mut self,
        latches: &mut Latches,
        ctx: &mut StageContext<'_>,
    ) -> Result<(), SimError>;
}
