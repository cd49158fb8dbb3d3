//! Load/Store Unit (LSU).
//!
//! This module provides the stage-facing memory ports. It includes:
//! - [`InstructionMemory`]: the word/half-word read port used by Fetch.
//! - [`DataMemory`]: the sized, enable-gated port used by the Memory stage.
//!
//! Both ports are configuration-only: they hold an address, a size and control inputs, and
//! touch the bus only when asked. A data store is staged while the stage propagates and
//! reaches the bus in the clocked phase.

use crate::common::{AccessFault, SimError};
use crate::core::pipeline::signals::MemWidth;
use crate::soc::Bus;

/// Instruction fetch port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstructionMemory {
    addr: u32,
    size: MemWidth,
}

impl Default for InstructionMemory {
    fn default() -> Self {
        Self {
            addr: 0,
            size: MemWidth::Word,
        }
    }
}

impl InstructionMemory {
    /// Creates a word-sized fetch port.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fetch address.
    pub fn set_address(&mut self, addr: u32) {
        self.addr = addr;
    }

    /// Sets the fetch size.
    ///
    /// # Errors
    ///
    /// Instruction fetches are words or half-words; bytes are rejected as
    /// [`AccessFault::InvalidSize`].
    pub fn set_size(&mut self, size: MemWidth) -> Result<(), SimError> {
        if size == MemWidth::Byte {
            return Err(SimError::IllegalAccess {
                addr: self.addr,
                kind: AccessFault::InvalidSize(size.bytes()),
            });
        }
        self.size = size;
        Ok(())
    }

    /// Reads the configured instruction word or half-word.
    ///
    /// # Errors
    ///
    /// Propagates the bus fault for unmapped or misaligned addresses.
    pub fn value(&self, bus: &mut Bus) -> Result<u32, SimError> {
        match self.size {
            MemWidth::Half => bus.read_u16(self.addr).map(u32::from),
            _ => bus.read_u32(self.addr),
        }
    }
}

/// Data memory port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DataMemory {
    addr: u32,
    size: MemWidth,
    data_in: u32,
    read_enable: bool,
    write_enable: bool,
}

impl Default for DataMemory {
    fn default() -> Self {
        Self {
            addr: 0,
            size: MemWidth::Word,
            data_in: 0,
            read_enable: false,
            write_enable: false,
        }
    }
}

impl DataMemory {
    /// Creates an idle data port.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the access address.
    pub fn set_address(&mut self, addr: u32) {
        self.addr = addr;
    }

    /// Sets the access width.
    pub fn set_size(&mut self, size: MemWidth) {
        self.size = size;
    }

    /// Sets the value a store will write; only the low `size` bytes are used.
    pub fn set_data_in(&mut self, value: u32) {
        self.data_in = value;
    }

    /// Enables or disables reads.
    pub fn set_read_enable(&mut self, enable: bool) {
        self.read_enable = enable;
    }

    /// Enables or disables the staged write.
    pub fn set_write_enable(&mut self, enable: bool) {
        self.write_enable = enable;
    }

    /// Returns `true` if a write is staged for the next clock pulse.
    pub const fn write_pending(&self) -> bool {
        self.write_enable
    }

    /// Performs the configured read, extending sub-word values to 32 bits.
    ///
    /// Returns 0 without touching the bus when reads are disabled.
    ///
    /// # Errors
    ///
    /// Propagates the bus fault for unmapped or misaligned addresses.
    pub fn data_out(&self, bus: &mut Bus, sign_extend: bool) -> Result<u32, SimError> {
        if !self.read_enable {
            return Ok(0);
        }
        Ok(match (self.size, sign_extend) {
            (MemWidth::Byte, false) => u32::from(bus.read_u8(self.addr)?),
            (MemWidth::Byte, true) => bus.read_u8(self.addr)? as i8 as i32 as u32,
            (MemWidth::Half, false) => u32::from(bus.read_u16(self.addr)?),
            (MemWidth::Half, true) => bus.read_u16(self.addr)? as i16 as i32 as u32,
            (MemWidth::Word, _) => bus.read_u32(self.addr)?,
        })
    }

    /// Commits a staged write to the bus and clears the write enable.
    ///
    /// # Errors
    ///
    /// Propagates the bus fault for unmapped, misaligned or read-only addresses.
    pub fn clock_pulse(&mut self, bus: &mut Bus) -> Result<(), SimError> {
        if !self.write_enable {
            return Ok(());
        }
        self.write_enable = false;
        match self.size {
            MemWidth::Byte => bus.write_u8(self.addr, self.data_in as u8),
            MemWidth::Half => bus.write_u16(self.addr, self.data_in as u16),
            MemWidth::Word => bus.write_u32(self.addr, self.data_in),
        }
    }
}
