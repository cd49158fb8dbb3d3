//! Simulation front-end utilities.
//!
//! Provides the collaborators around the core: the program image loader and the parser for
//! register initializers and test vectors.

/// ELF program loading and image validation.
pub mod loader;

/// Register initializers and `.conf` test vectors.
pub mod testfile;

pub use loader::{LoadedImage, Segment, load_elf, parse_elf};
pub use testfile::{RegisterInit, RegisterMismatch, TestVector};
