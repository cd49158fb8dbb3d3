//! Main Execution Loop.
//!
//! This module implements the run loop of the processor. Each iteration:
//! 1. **Halt Check:** Stops when the system status device has published a halt.
//! 2. **Bus Clock:** Pulses the bus (and every device) once every `bus_clock_divider` cycles.
//! 3. **Pipeline Cycle:** Propagates every active stage, then commits the cycle.
//!
//! Faults end the run. End-of-program conditions end it cleanly in test mode.

use tracing::{error, info};

use super::{Processor, Termination};
use crate::common::SimError;
use crate::core::pipeline::CycleStatus;
use crate::core::pipeline::traits::StageContext;

impl Processor {
    /// Runs the program until it halts, ends or faults.
    ///
    /// In test mode the test end marker and instruction fetch failures are clean stops, so
    /// test programs need no store-based shutdown sequence.
    ///
    /// # Returns
    ///
    /// `true` if execution completed without an unrecoverable fault. Otherwise the reason is
    /// available from [`Processor::termination`].
    pub fn run(&mut self, test_mode: bool) -> bool {
        info!(mode = ?self.pipeline.mode(), test_mode, pc = %format_args!("{:#x}", self.pc()), "run started");
        self.termination = None;

        let outcome = loop {
            if self.halted() {
                break Ok(());
            }
            match self.step() {
                Ok(CycleStatus::Running) => {}
                Ok(CycleStatus::Stopped(reason)) => break self.finish_stopped(reason, test_mode),
                Err(fault) => break Err(fault),
            }
        };
        self.bus.flush();

        let stats = self.stats();
        match outcome {
            Ok(()) => {
                info!(
                    cycles = stats.cycles,
                    completed = stats.instructions_completed,
                    "run finished"
                );
                true
            }
            Err(reason) => {
                let pc = self.pc();
                error!(pc = %format_args!("{pc:#x}"), %reason, "abnormal program termination");
                self.termination = Some(Termination { pc, reason });
                false
            }
        }
    }

    /// Simulates one clock cycle.
    ///
    /// A cycle that ends the program is not committed and not counted.
    ///
    /// # Errors
    ///
    /// Any instruction-level fault raised by a stage.
    pub fn step(&mut self) -> Result<CycleStatus, SimError> {
        if self.stats.cycles % self.bus_clock_divider == 0 {
            self.bus.clock_pulse();
        }

        let mut ctx = StageContext::new(&mut self.state, &mut self.bus, &mut self.stats, self.trace);
        let status = self.pipeline.propagate(&mut ctx)?;
        if status == CycleStatus::Running {
            self.pipeline.clock_pulse(&mut ctx)?;
            self.stats.cycles += 1;
        }
        Ok(status)
    }

    /// Decides the outcome of a run whose pipeline drained at the end of the program.
    ///
    /// A store to the status device may still be waiting for its bus pulse; one final pulse
    /// publishes it so the run counts as halted.
    fn finish_stopped(&mut self, reason: SimError, test_mode: bool) -> Result<(), SimError> {
        if test_mode && reason.is_test_stop() {
            return Ok(());
        }
        self.bus.clock_pulse();
        if self.halted() { Ok(()) } else { Err(reason) }
    }
}
