//! Serial console output.
//!
//! A write-only character device. A store of any width to offset 0 enqueues the low byte of
//! the stored value; queued bytes reach the sink on the next bus clock pulse, or when the bus
//! is flushed at the end of a run. Reads return zero.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::soc::traits::Device;

/// Size of the serial register window in bytes.
pub const SERIAL_WINDOW: u32 = 0x10;

/// Transmit data register offset.
const REG_TX: u32 = 0;

/// Destination for bytes written to the serial device.
#[derive(Clone, Debug, Default)]
pub enum SerialSink {
    /// Process standard output.
    #[default]
    Stdout,
    /// Shared in-memory buffer, for tests and embedding.
    Capture(Arc<Mutex<Vec<u8>>>),
}

impl SerialSink {
    /// Creates a capture sink and returns it with a handle to its buffer.
    pub fn capture() -> (Self, Arc<Mutex<Vec<u8>>>) {
        let buf = Arc::new(Mutex::new(Vec::new()));
        (Self::Capture(Arc::clone(&buf)), buf)
    }

    fn emit(&self, bytes: &[u8]) {
        match self {
            Self::Stdout => {
                let mut out = io::stdout().lock();
                let _ = out.write_all(bytes);
                let _ = out.flush();
            }
            Self::Capture(buf) => {
                if let Ok(mut buf) = buf.lock() {
                    buf.extend_from_slice(bytes);
                }
            }
        }
    }
}

/// Serial device structure.
#[derive(Debug)]
pub struct Serial {
    base_addr: u32,
    tx_buffer: Vec<u8>,
    sink: SerialSink,
}

impl Serial {
    /// Creates a serial device at `base_addr` writing to `sink`.
    pub fn new(base_addr: u32, sink: SerialSink) -> Self {
        Self {
            base_addr,
            tx_buffer: Vec::new(),
            sink,
        }
    }

    fn transmit(&mut self, offset: u32, byte: u8) {
        if offset == REG_TX {
            self.tx_buffer.push(byte);
        }
    }
}

impl Device for Serial {
    fn name(&self) -> &str {
        "serial"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base_addr, SERIAL_WINDOW)
    }

    fn read_u8(&mut self, _offset: u32) -> u8 {
        0
    }

    fn write_u8(&mut self, offset: u32, val: u8) {
        self.transmit(offset, val);
    }

    fn write_u16(&mut self, offset: u32, val: u16) {
        self.transmit(offset, val as u8);
    }

    fn write_u32(&mut self, offset: u32, val: u32) {
        self.transmit(offset, val as u8);
    }

    fn tick(&mut self) {
        self.flush();
    }

    fn flush(&mut self) {
        if !self.tx_buffer.is_empty() {
            self.sink.emit(&self.tx_buffer);
            self.tx_buffer.clear();
        }
    }
}
