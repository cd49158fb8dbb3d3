//! System-on-Chip (SoC) Components.
//!
//! This module organizes the components that make up the simulated system: the memory bus,
//! the program memory segments and the memory-mapped devices.

/// Memory-mapped I/O device implementations.
pub mod devices;

/// System bus interconnect and routing.
pub mod interconnect;

/// Program memory segments.
pub mod memory;

/// Device trait definitions for MMIO access.
pub mod traits;

pub use interconnect::Bus;
pub use memory::Memory;
pub use traits::Device;
