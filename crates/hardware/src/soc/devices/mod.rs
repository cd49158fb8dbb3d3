//! Memory-Mapped IO Devices.
//!
//! This module contains the peripherals attached next to program memory: the serial
//! console, the system status controller that ends a simulation, and an optional
//! framebuffer.

/// Optional linear framebuffer.
pub mod framebuffer;

/// Serial console output.
pub mod serial;

/// System status controller (halt signalling).
pub mod sys_status;

pub use framebuffer::Framebuffer;
pub use serial::{Serial, SerialSink};
pub use sys_status::SysStatus;

pub use crate::soc::traits::Device;
