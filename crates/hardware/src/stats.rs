//! Simulation statistics collection and reporting.
//!
//! This module tracks the performance counters of a run. It provides:
//! 1. **Cycles and throughput:** Clock cycles, issued and completed instructions, and CPI.
//! 2. **Stalls:** Data hazard and control stall cycles (pipelined mode only).
//! 3. **Bus traffic:** Bytes read and written over the memory bus, fetches included.

use std::fmt;

use serde::Serialize;

/// Simulation statistics structure.
///
/// Counters are accumulated by the pipeline stages and the processor while a program runs
/// and are read-only to callers once `run` returns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Total clock cycles elapsed.
    pub cycles: u64,
    /// Instructions that left decode (stall cycles and bubbles excluded).
    pub instructions_issued: u64,
    /// Instructions that left writeback.
    pub instructions_completed: u64,
    /// Bubbles inserted by decode because of data hazards.
    pub stalls_data: u64,
    /// Bubbles inserted by fetch while a control transfer resolved.
    pub stalls_control: u64,
    /// Bytes transferred by bus reads.
    pub bytes_read: u64,
    /// Bytes transferred by bus writes.
    pub bytes_written: u64,
    /// Whether the run used pipelined timing.
    pub pipelined: bool,
}

impl SimStats {
    /// Total stall cycles inserted.
    pub const fn stalls(&self) -> u64 {
        self.stalls_data + self.stalls_control
    }

    /// Cycles per completed instruction, or 0 before any instruction completes.
    pub fn cpi(&self) -> f64 {
        if self.instructions_completed == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_completed as f64
        }
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} clock cycles, {} instructions issued, {} instructions completed.",
            self.cycles, self.instructions_issued, self.instructions_completed
        )?;
        if self.pipelined {
            writeln!(f, "{} stall cycles inserted.", self.stalls())?;
        }
        writeln!(
            f,
            "{} bytes read, {} bytes written.",
            self.bytes_read, self.bytes_written
        )
    }
}
