//! System Status Controller.
//!
//! A memory-mapped device through which a program requests the end of simulation.
//!
//! # Registers
//!
//! * `0x00`: Halt Register. Any store requests a halt; reads return 1 once the halt is
//!   visible, 0 before.
//!
//! A halt request is latched by the store and published on the next bus clock pulse, so the
//! run loop only ever observes it between cycles.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::soc::traits::Device;

/// Size of the status register window in bytes.
pub const SYS_STATUS_WINDOW: u32 = 0x10;

/// Halt register offset.
const REG_HALT: u32 = 0;

/// SysStatus device structure.
#[derive(Debug)]
pub struct SysStatus {
    base_addr: u32,
    pending: bool,
    halt: Arc<AtomicBool>,
}

impl SysStatus {
    /// Creates a status device at `base_addr`.
    pub fn new(base_addr: u32) -> Self {
        Self {
            base_addr,
            pending: false,
            halt: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns a shared handle to the halt signal.
    pub fn halt_signal(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.halt)
    }

    /// Returns `true` once a requested halt has been published.
    pub fn should_halt(&self) -> bool {
        self.halt.load(Ordering::Acquire)
    }

    fn request(&mut self, offset: u32) {
        if offset == REG_HALT {
            self.pending = true;
        }
    }
}

impl Device for SysStatus {
    fn name(&self) -> &str {
        "sys_status"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base_addr, SYS_STATUS_WINDOW)
    }

    fn read_u8(&mut self, offset: u32) -> u8 {
        // The halt register reads as a big-endian word.
        u8::from(offset == REG_HALT + 3 && self.should_halt())
    }

    fn write_u8(&mut self, offset: u32, _val: u8) {
        self.request(offset);
    }

    fn write_u16(&mut self, offset: u32, _val: u16) {
        self.request(offset);
    }

    fn write_u32(&mut self, offset: u32, _val: u32) {
        self.request(offset);
    }

    fn tick(&mut self) {
        if self.pending && !self.should_halt() {
            debug!("halt requested");
            self.halt.store(true, Ordering::Release);
        }
    }
}
