//! Device trait for memory-mapped I/O.
//!
//! This module defines the `Device` trait implemented by all bus-attached components. It provides:
//! 1. **Identification:** `name` and `address_range` for bus routing.
//! 2. **Access:** Byte, half-word and word read/write at device-relative offsets.
//! 3. **Lifecycle:** `tick` on every bus clock pulse and `flush` at the end of a run.
//!
//! The bus checks ranges, alignment and writability before calling into a device, so
//! implementations only ever see in-range, naturally aligned offsets. Multi-byte accesses
//! are big-endian.

/// Trait for memory-mapped I/O devices attached to the system bus.
///
/// Only the byte accessors are required; half-word and word accesses default to
/// big-endian compositions of byte accesses.
pub trait Device: Send + Sync {
    /// Returns a short name for this device (e.g., `"serial"`, `"text"`).
    fn name(&self) -> &str;

    /// Returns `(base_address, size_in_bytes)` for this device's region.
    fn address_range(&self) -> (u32, u32);

    /// Returns `false` for regions that reject stores.
    fn writable(&self) -> bool {
        true
    }

    /// Reads one byte at the given device-relative offset.
    fn read_u8(&mut self, offset: u32) -> u8;

    /// Writes one byte at the given offset.
    fn write_u8(&mut self, offset: u32, val: u8);

    /// Reads two bytes (big-endian) at the given offset.
    fn read_u16(&mut self, offset: u32) -> u16 {
        u16::from_be_bytes([self.read_u8(offset), self.read_u8(offset + 1)])
    }

    /// Reads four bytes (big-endian) at the given offset.
    fn read_u32(&mut self, offset: u32) -> u32 {
        u32::from_be_bytes([
            self.read_u8(offset),
            self.read_u8(offset + 1),
            self.read_u8(offset + 2),
            self.read_u8(offset + 3),
        ])
    }

    /// Writes two bytes (big-endian) at the given offset.
    fn write_u16(&mut self, offset: u32, val: u16) {
        for (i, byte) in val.to_be_bytes().into_iter().enumerate() {
            self.write_u8(offset + i as u32, byte);
        }
    }

    /// Writes four bytes (big-endian) at the given offset.
    fn write_u32(&mut self, offset: u32, val: u32) {
        for (i, byte) in val.to_be_bytes().into_iter().enumerate() {
            self.write_u8(offset + i as u32, byte);
        }
    }

    /// Advances device state by one bus clock pulse.
    fn tick(&mut self) {}

    /// Releases any buffered side effects (e.g., queued console output).
    fn flush(&mut self) {}
}
