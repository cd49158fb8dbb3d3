//! Program Memory Segments.
//!
//! This module implements the RAM regions created from a loaded program image. It provides:
//! 1. **Storage:** A fixed-size byte arena per segment, never resized after creation.
//! 2. **Access:** Big-endian byte, half-word and word access at segment-relative offsets.
//! 3. **Protection:** A writable flag the bus enforces on stores.
//!
//! Accesses outside the arena read as zero and are dropped on write; the bus never issues
//! them because it checks ranges before routing.

use crate::sim::loader::Segment;
use crate::soc::traits::Device;

/// A RAM segment mapped at a fixed base address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    name: String,
    base_addr: u32,
    data: Vec<u8>,
    writable: bool,
}

impl Memory {
    /// Creates a segment holding `data` at `base_addr`.
    ///
    /// # Arguments
    ///
    /// * `name` - Device name reported to the bus (e.g. `"text"`).
    /// * `base_addr` - Starting address.
    /// * `data` - Initial contents; its length is the segment size.
    /// * `writable` - Whether stores are accepted.
    pub fn new(name: impl Into<String>, base_addr: u32, data: Vec<u8>, writable: bool) -> Self {
        Self {
            name: name.into(),
            base_addr,
            data,
            writable,
        }
    }

    /// Raw contents of the segment.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn slice<const N: usize>(&self, offset: u32) -> [u8; N] {
        let start = offset as usize;
        self.data
            .get(start..start + N)
            .and_then(|s| s.try_into().ok())
            .unwrap_or([0; N])
    }

    fn store(&mut self, offset: u32, bytes: &[u8]) {
        let start = offset as usize;
        if let Some(dst) = self.data.get_mut(start..start + bytes.len()) {
            dst.copy_from_slice(bytes);
        }
    }
}

impl From<&Segment> for Memory {
    fn from(seg: &Segment) -> Self {
        Self::new(seg.name.clone(), seg.base, seg.data.clone(), seg.writable)
    }
}

impl Device for Memory {
    fn name(&self) -> &str {
        &self.name
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base_addr, self.data.len() as u32)
    }

    fn writable(&self) -> bool {
        self.writable
    }

    fn read_u8(&mut self, offset: u32) -> u8 {
        self.data.get(offset as usize).copied().unwrap_or(0)
    }

    fn write_u8(&mut self, offset: u32, val: u8) {
        self.store(offset, &[val]);
    }

    /// Reads a half-word (big-endian).
    fn read_u16(&mut self, offset: u32) -> u16 {
        u16::from_be_bytes(self.slice(offset))
    }

    /// Reads a word (big-endian).
    fn read_u32(&mut self, offset: u32) -> u32 {
        u32::from_be_bytes(self.slice(offset))
    }

    fn write_u16(&mut self, offset: u32, val: u16) {
        self.store(offset, &val.to_be_bytes());
    }

    fn write_u32(&mut self, offset: u32, val: u32) {
        self.store(offset, &val.to_be_bytes());
    }
}
