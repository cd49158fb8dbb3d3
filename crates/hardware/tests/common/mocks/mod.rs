//! Mock implementations of bus devices.

/// A mockall-backed device attachable to the bus.
pub mod device;
