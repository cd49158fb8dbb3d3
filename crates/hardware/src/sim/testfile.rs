//! Register Initializers and Test Vectors.
//!
//! This module parses the scripted register state used to seed and verify a run. It provides:
//! 1. **`RegisterInit`:** A single `rX=Y` assignment, as given on the command line.
//! 2. **`TestVector`:** A `.conf` file naming an executable with `pre` and `post` register
//!    assignments.
//! 3. **Checking:** Comparison of post conditions against a finished processor.
//!
//! # File format
//!
//! ```text
//! # comment
//! executable = add.bin
//! pre = r1=5 r2=7
//! post = r3=12
//! ```
//!
//! The executable path is relative to the directory holding the `.conf` file.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::common::{NUM_REGS, SimError};
use crate::core::Processor;

/// Required extension of test vector files.
const TEST_VECTOR_EXTENSION: &str = "conf";

/// A register assignment of the form `rX=Y`.
///
/// # Examples
///
/// ```
/// use pipesim_core::sim::testfile::RegisterInit;
///
/// let init = RegisterInit::parse("r3=0x10").unwrap();
/// assert_eq!((init.reg, init.value), (3, 16));
/// assert_eq!(RegisterInit::parse("r1=-1").unwrap().value, 0xFFFF_FFFF);
/// assert!(RegisterInit::parse("r32=1").is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterInit {
    /// Register number (0-31).
    pub reg: u8,
    /// Value, two's complement for negative decimals.
    pub value: u32,
}

impl RegisterInit {
    /// Parses `rX=Y` where `Y` is decimal, `0x` hexadecimal or a negative decimal.
    ///
    /// # Errors
    ///
    /// [`SimError::TestVector`] for malformed text or a register out of range.
    pub fn parse(text: &str) -> Result<Self, SimError> {
        let malformed = || SimError::TestVector(format!("malformed register assignment '{text}'"));
        let (reg, value) = text.trim().split_once('=').ok_or_else(malformed)?;
        let reg = reg
            .trim()
            .strip_prefix(['r', 'R'])
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|&n| usize::from(n) < NUM_REGS)
            .ok_or_else(malformed)?;
        let value = parse_value(value.trim()).ok_or_else(malformed)?;
        Ok(Self { reg, value })
    }
}

impl FromStr for RegisterInit {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RegisterInit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}={:#x}", self.reg, self.value)
    }
}

fn parse_value(text: &str) -> Option<u32> {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).ok()
    } else if text.starts_with('-') {
        text.parse::<i32>().ok().map(|v| v as u32)
    } else {
        text.parse::<u32>().ok()
    }
}

/// A post condition that did not hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterMismatch {
    /// Register number.
    pub reg: u8,
    /// Expected value.
    pub expected: u32,
    /// Value found after the run.
    pub actual: u32,
}

impl fmt::Display for RegisterMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "register r{}: expected {:#010x}, got {:#010x}",
            self.reg, self.expected, self.actual
        )
    }
}

/// A scripted unit test: program, initial registers and expected registers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestVector {
    /// Program to run.
    pub executable: PathBuf,
    /// Registers set before the run.
    pub pre: Vec<RegisterInit>,
    /// Registers checked after the run.
    pub post: Vec<RegisterInit>,
}

impl TestVector {
    /// Reads a `.conf` test vector.
    ///
    /// # Errors
    ///
    /// [`SimError::TestVector`] if the file has the wrong extension, cannot be read, or is
    /// malformed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        if path.extension().and_then(|e| e.to_str()) != Some(TEST_VECTOR_EXTENSION) {
            return Err(SimError::TestVector(format!(
                "{}: test files must end in .{TEST_VECTOR_EXTENSION}",
                path.display()
            )));
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| SimError::TestVector(format!("{}: {e}", path.display())))?;
        let mut vector = Self::parse(&text)?;
        if let Some(dir) = path.parent() {
            vector.executable = dir.join(&vector.executable);
        }
        Ok(vector)
    }

    /// Parses test vector text. The executable path is returned as written.
    ///
    /// # Errors
    ///
    /// [`SimError::TestVector`] for unknown keys, malformed assignments or a missing
    /// executable.
    pub fn parse(text: &str) -> Result<Self, SimError> {
        let mut executable = None;
        let mut vector = Self::default();

        for (lineno, line) in text.lines().enumerate() {
            let line = line.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }
            let (key, value) = line.split_once('=').ok_or_else(|| {
                SimError::TestVector(format!("line {}: expected 'key = value'", lineno + 1))
            })?;
            let value = value.trim();
            match key.trim() {
                "executable" => executable = Some(PathBuf::from(value)),
                "pre" => vector.pre.extend(parse_assignments(value)?),
                "post" => vector.post.extend(parse_assignments(value)?),
                other => {
                    return Err(SimError::TestVector(format!(
                        "line {}: unknown key '{other}'",
                        lineno + 1
                    )));
                }
            }
        }

        vector.executable = executable
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| SimError::TestVector("missing executable".into()))?;
        Ok(vector)
    }

    /// Applies the `pre` assignments.
    pub fn apply(&self, processor: &mut Processor) {
        for init in &self.pre {
            processor.init_register(init.reg, init.value);
        }
    }

    /// Compares the `post` assignments with the processor's registers.
    pub fn check(&self, processor: &Processor) -> Vec<RegisterMismatch> {
        self.post
            .iter()
            .filter_map(|want| {
                let actual = processor.register(want.reg);
                (actual != want.value).then_some(RegisterMismatch {
                    reg: want.reg,
                    expected: want.value,
                    actual,
                })
            })
            .collect()
    }
}

fn parse_assignments(text: &str) -> Result<Vec<RegisterInit>, SimError> {
    text.split_whitespace().map(RegisterInit::parse).collect()
}
