//! System interconnect (bus) for memory and MMIO access.
//!
//! This module implements the bus that routes addresses to devices. It provides:
//! 1. **Device registration:** Devices are added by address range, checked for overlap and
//!    sorted for lookup.
//! 2. **Access routing:** Sized reads and writes with alignment and writability checks, using a
//!    last-device hint for throughput.
//! 3. **Traffic accounting:** Byte counters for every completed transfer.
//! 4. **Clock domain:** `clock_pulse` ticks every attached device.

use tracing::debug;

use crate::common::{AccessFault, SimError};
use crate::soc::traits::Device;

/// System bus connecting the pipeline and devices; routes accesses by address.
///
/// Owns every attached device. Regions never overlap, so each address resolves to at most
/// one device.
#[derive(Default)]
pub struct Bus {
    devices: Vec<Box<dyn Device>>,
    last_device_idx: usize,
    bytes_read: u64,
    bytes_written: u64,
}

impl std::fmt::Debug for Bus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bus")
            .field("devices", &self.device_names())
            .field("bytes_read", &self.bytes_read)
            .field("bytes_written", &self.bytes_written)
            .finish_non_exhaustive()
    }
}

impl Bus {
    /// Creates an empty bus with no devices; add devices with `add_device`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a device on the bus; devices are kept sorted by base address.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Initialization`] if the device's range is empty, wraps past the end
    /// of the address space, or overlaps a device already attached.
    pub fn add_device(&mut self, dev: Box<dyn Device>) -> Result<(), SimError> {
        let (base, size) = dev.address_range();
        let end = u64::from(base) + u64::from(size);
        if size == 0 || end > 1 << 32 {
            return Err(SimError::Initialization(format!(
                "device '{}' has invalid range {base:#x}+{size:#x}",
                dev.name()
            )));
        }

        if let Some(other) = self.devices.iter().find(|d| {
            let (b, s) = d.address_range();
            u64::from(base) < u64::from(b) + u64::from(s) && u64::from(b) < end
        }) {
            return Err(SimError::Initialization(format!(
                "device '{}' at {base:#x} overlaps '{}'",
                dev.name(),
                other.name()
            )));
        }

        debug!(device = dev.name(), base = %format_args!("{base:#x}"), size, "attached device");
        self.devices.push(dev);
        self.devices.sort_by_key(|d| d.address_range().0);
        self.last_device_idx = 0;
        Ok(())
    }

    /// Names of the attached devices in address order.
    pub fn device_names(&self) -> Vec<&str> {
        self.devices.iter().map(|d| d.name()).collect()
    }

    /// Returns whether some device's range contains `addr`.
    pub fn is_mapped(&self, addr: u32) -> bool {
        self.devices.iter().any(|d| contains(d.address_range(), addr))
    }

    /// Total bytes transferred by successful reads.
    pub const fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Total bytes transferred by successful writes.
    pub const fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Advances every device by one bus clock pulse.
    pub fn clock_pulse(&mut self) {
        for dev in &mut self.devices {
            dev.tick();
        }
    }

    /// Flushes buffered device side effects.
    pub fn flush(&mut self) {
        for dev in &mut self.devices {
            dev.flush();
        }
    }

    /// Resolves an access of `width` bytes to a device index and device-relative offset.
    fn locate(&mut self, addr: u32, width: u8) -> Result<(usize, u32), SimError> {
        if !matches!(width, 1 | 2 | 4) {
            return Err(access(addr, AccessFault::InvalidSize(width)));
        }
        if addr % u32::from(width) != 0 {
            return Err(access(addr, AccessFault::Misaligned(width)));
        }

        let hint = self
            .devices
            .get(self.last_device_idx)
            .filter(|d| contains(d.address_range(), addr))
            .map(|_| self.last_device_idx);
        let idx = match hint {
            Some(idx) => idx,
            None => self
                .devices
                .iter()
                .position(|d| contains(d.address_range(), addr))
                .ok_or_else(|| access(addr, AccessFault::Unmapped))?,
        };

        let (base, size) = self.devices[idx].address_range();
        let offset = addr - base;
        if u64::from(offset) + u64::from(width) > u64::from(size) {
            return Err(access(addr, AccessFault::Unmapped));
        }
        self.last_device_idx = idx;
        Ok((idx, offset))
    }

    fn locate_write(&mut self, addr: u32, width: u8) -> Result<(usize, u32), SimError> {
        let (idx, offset) = self.locate(addr, width)?;
        if !self.devices[idx].writable() {
            return Err(access(addr, AccessFault::ReadOnly));
        }
        self.bytes_written += u64::from(width);
        Ok((idx, offset))
    }

    fn locate_read(&mut self, addr: u32, width: u8) -> Result<(usize, u32), SimError> {
        let found = self.locate(addr, width)?;
        self.bytes_read += u64::from(width);
        Ok(found)
    }

    /// Reads one byte.
    ///
    /// # Errors
    ///
    /// [`SimError::IllegalAccess`] if no device claims the address.
    pub fn read_u8(&mut self, addr: u32) -> Result<u8, SimError> {
        let (idx, offset) = self.locate_read(addr, 1)?;
        Ok(self.devices[idx].read_u8(offset))
    }

    /// Reads a naturally aligned big-endian half-word.
    ///
    /// # Errors
    ///
    /// [`SimError::IllegalAccess`] if the address is unmapped or misaligned.
    pub fn read_u16(&mut self, addr: u32) -> Result<u16, SimError> {
        let (idx, offset) = self.locate_read(addr, 2)?;
        Ok(self.devices[idx].read_u16(offset))
    }

    /// Reads a naturally aligned big-endian word.
    ///
    /// # Errors
    ///
    /// [`SimError::IllegalAccess`] if the address is unmapped or misaligned.
    pub fn read_u32(&mut self, addr: u32) -> Result<u32, SimError> {
        let (idx, offset) = self.locate_read(addr, 4)?;
        Ok(self.devices[idx].read_u32(offset))
    }

    /// Writes one byte.
    ///
    /// # Errors
    ///
    /// [`SimError::IllegalAccess`] if the address is unmapped or the region is read-only.
    pub fn write_u8(&mut self, addr: u32, val: u8) -> Result<(), SimError> {
        let (idx, offset) = self.locate_write(addr, 1)?;
        self.devices[idx].write_u8(offset, val);
        Ok(())
    }

    /// Writes a naturally aligned big-endian half-word.
    ///
    /// # Errors
    ///
    /// [`SimError::IllegalAccess`] if the address is unmapped, misaligned or read-only.
    pub fn write_u16(&mut self, addr: u32, val: u16) -> Result<(), SimError> {
        let (idx, offset) = self.locate_write(addr, 2)?;
        self.devices[idx].write_u16(offset, val);
        Ok(())
    }

    /// Writes a naturally aligned big-endian word.
    ///
    /// # Errors
    ///
    /// [`SimError::IllegalAccess`] if the address is unmapped, misaligned or read-only.
    pub fn write_u32(&mut self, addr: u32, val: u32) -> Result<(), SimError> {
        let (idx, offset) = self.locate_write(addr, 4)?;
        self.devices[idx].write_u32(offset, val);
        Ok(())
    }
}

fn contains((base, size): (u32, u32), addr: u32) -> bool {
    addr >= base && u64::from(addr) < u64::from(base) + u64::from(size)
}

const fn access(addr: u32, kind: AccessFault) -> SimError {
    SimError::IllegalAccess { addr, kind }
}
