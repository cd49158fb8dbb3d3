//! Pipeline execution engine.
//!
//! This module owns the five stages and the four inter-stage latches and drives one clock
//! cycle at a time. It provides:
//! 1. **`ExecutionMode`:** pipelined (all stages every cycle) or round-robin (one stage per
//!    cycle, one instruction in flight).
//! 2. **`Pipeline`:** the two-phase cycle: every active stage propagates, then every active
//!    stage commits.
//! 3. **`CycleStatus`:** the explicit per-cycle outcome inspected by the run loop.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::common::{NUM_STAGES, SimError};
use crate::core::pipeline::hazards::{self, HazardSignals};
use crate::core::pipeline::latches::Latches;
use crate::core::pipeline::stages::Stage;
use crate::core::pipeline::traits::{PipelineStage, StageContext, StageStatus};

/// Timing discipline of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ExecutionMode {
    /// One stage per cycle; an instruction completes before the next is fetched.
    #[default]
    RoundRobin,
    /// All five stages every cycle, with hazard stalls.
    Pipelined,
}

/// Outcome of one propagate phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CycleStatus {
    /// The cycle may be committed.
    Running,
    /// The program ended; the cycle must not be committed.
    ///
    /// Carries [`SimError::TestEndMarkerEncountered`] or
    /// [`SimError::InstructionFetchFailure`].
    Stopped(SimError),
}

/// The five-stage pipeline.
#[derive(Clone, Debug)]
pub struct Pipeline {
    stages: [Stage; NUM_STAGES],
    latches: Latches,
    mode: ExecutionMode,
    current_stage: usize,
    hazards: HazardSignals,
}

impl Pipeline {
    /// Creates an empty pipeline running in `mode`.
    pub fn new(mode: ExecutionMode) -> Self {
        Self {
            stages: Stage::all(),
            latches: Latches::default(),
            mode,
            current_stage: 0,
            hazards: HazardSignals::default(),
        }
    }

    /// The timing discipline.
    pub const fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Returns `true` in pipelined mode.
    pub fn is_pipelined(&self) -> bool {
        self.mode == ExecutionMode::Pipelined
    }

    /// Current latch contents.
    pub const fn latches(&self) -> &Latches {
        &self.latches
    }

    /// Index of the stage that runs next in round-robin mode.
    pub const fn current_stage(&self) -> usize {
        self.current_stage
    }

    /// Runs the combinational phase of every active stage.
    ///
    /// In pipelined mode the hazard unit is evaluated first, from the latches committed by the
    /// previous cycle, and its outputs are handed to every stage through `ctx`.
    ///
    /// # Errors
    ///
    /// The first instruction-level fault raised by a stage.
    pub fn propagate(&mut self, ctx: &mut StageContext<'_>) -> Result<CycleStatus, SimError> {
        self.hazards = match self.mode {
            ExecutionMode::Pipelined => hazards::detect(&self.latches),
            ExecutionMode::RoundRobin => HazardSignals::default(),
        };
        ctx.hazards = self.hazards;

        let active = match self.mode {
            ExecutionMode::Pipelined => 0..NUM_STAGES,
            ExecutionMode::RoundRobin => self.current_stage..self.current_stage + 1,
        };

        let mut status = CycleStatus::Running;
        for stage in &mut self.stages[active] {
            match stage.propagate(&self.latches, ctx)? {
                StageStatus::Stop(reason) => status = CycleStatus::Stopped(reason),
                StageStatus::Stalled => trace!(stage = stage.name(), "stalled"),
                StageStatus::Ready | StageStatus::Idle => {}
            }
        }
        Ok(status)
    }

    /// Runs the clocked phase of every active stage.
    ///
    /// Stages commit back to front so that each stage consumes its input latch before the
    /// stage upstream refills it.
    ///
    /// # Errors
    ///
    /// Faults raised while committing a store.
    pub fn clock_pulse(&mut self, ctx: &mut StageContext<'_>) -> Result<(), SimError> {
        ctx.hazards = self.hazards;
        match self.mode {
            ExecutionMode::Pipelined => {
                for stage in self.stages.iter_mut().rev() {
                    stage.clock_pulse(&mut self.latches, ctx)?;
                }
            }
            ExecutionMode::RoundRobin => {
                self.stages[self.current_stage].clock_pulse(&mut self.latches, ctx)?;
                self.current_stage = (self.current_stage + 1) % NUM_STAGES;
            }
        }
        Ok(())
    }
}
