//! Pipeline stage implementations.
//!
//! This module contains the individual implementations for the five stages of the
//! instruction pipeline. It includes:
//! 1. **Fetch:** Retrieves instructions from memory based on the PC.
//! 2. **Decode:** Decodes instructions into control signals and reads operands.
//! 3. **Execute:** Performs ALU operations and resolves branch targets.
//! 4. **Memory:** Handles data load and store operations.
//! 5. **Writeback:** Commits results to the register file and the flag.
//!
//! The stages form a closed set and are dispatched through [`Stage`].

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

pub use decode::DecodeStage;
pub use execute::ExecuteStage;
pub use fetch::FetchStage;
pub use memory::MemoryStage;
pub use writeback::WriteBackStage;

use crate::common::{NUM_STAGES, SimError};
use crate::core::pipeline::latches::Latches;
use crate::core::pipeline::traits::{PipelineStage, StageContext, StageStatus};

/// One of the five pipeline stages.
#[derive(Clone, Debug)]
pub enum Stage {
    /// Instruction fetch (IF).
    Fetch(FetchStage),
    /// Instruction decode (ID).
    Decode(DecodeStage),
    /// Execute (EX).
    Execute(ExecuteStage),
    /// Memory access (MEM).
    Memory(MemoryStage),
    /// Writeback (WB).
    WriteBack(WriteBackStage),
}

impl Stage {
    /// The five stages in program order.
    pub fn all() -> [Self; NUM_STAGES] {
        [
            Self::Fetch(FetchStage::new()),
            Self::Decode(DecodeStage::new()),
            Self::Execute(ExecuteStage::new()),
            Self::Memory(MemoryStage::new()),
            Self::WriteBack(WriteBackStage::new()),
        ]
    }

    fn inner(&mut self) -> &mut dyn PipelineStage {
        match self {
            Self::Fetch(s) => s,
            Self::Decode(s) => s,
            Self::Execute(s) => s,
            Self::Memory(s) => s,
            Self::WriteBack(s) => s,
        }
    }
}

impl PipelineStage for Stage {
    fn name(&self) -> &'static str {
        match self {
            Self::Fetch(s) => s.name(),
            Self::Decode(s) => s.name(),
            Self::Execute(s) => s.name(),
            Self::Memory(s) => s.name(),
            Self::WriteBack(s) => s.name(),
        }
    }

    fn propagate(
        &mut self,
        latches: &Latches,
        ctx: &mut StageContext<'_>,
    ) -> Result<StageStatus, SimError> {
        self.inner().propagate(latches, ctx)
    }

    fn clock_pulse(
        &mut self,
        latches: &mut Latches,
        ctx: &mut StageContext<'_>,
    ) -> Result<(), SimError> {
        self.inner().clock_pulse(latches, ctx)
    }
}
