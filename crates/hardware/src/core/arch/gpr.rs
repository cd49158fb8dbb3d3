//! OpenRISC General-Purpose Register File.
//!
//! This module implements the general-purpose register file. It performs the following:
//! 1. **Storage:** Maintains 32 word-sized registers (`r0`-`r31`).
//! 2. **Invariant Enforcement:** Ensures that register `r0` is hardwired to zero.
//! 3. **Debugging:** Renders the complete register state in two columns.

use std::fmt::{self, Write as _};

use crate::common::NUM_REGS;

/// General-Purpose Register file.
///
/// Register `r0` reads as zero and silently discards writes, so decode never needs to
/// special-case it when reading operands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u32; NUM_REGS],
}

impl Gpr {
    /// Creates a register file with all registers cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register. Indices wrap to the 5-bit register field.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Returns
    ///
    /// The register contents; `r0` always returns 0.
    #[inline(always)]
    pub fn read(&self, idx: u8) -> u32 {
        let idx = usize::from(idx) % NUM_REGS;
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The value to store; ignored for `r0`.
    #[inline(always)]
    pub fn write(&mut self, idx: u8, val: u32) {
        let idx = usize::from(idx) % NUM_REGS;
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Formats all registers as two columns (`R00`-`R15` beside `R16`-`R31`).
    pub fn dump(&self) -> String {
        let half = NUM_REGS / 2;
        let mut out = String::new();
        for i in 0..half {
            let _ = writeln!(
                out,
                "R{:02} {:#010x}\tR{:02} {:#010x}",
                i,
                self.regs[i],
                i + half,
                self.regs[i + half]
            );
        }
        out
    }
}

impl fmt::Display for Gpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}
