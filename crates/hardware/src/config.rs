//! Configuration system for the pipeline simulator.
//!
//! This module defines the configuration structures used to parameterize a run. It provides:
//! 1. **Defaults:** Baseline device addresses, bus clock ratio and framebuffer geometry.
//! 2. **Structures:** Hierarchical config for general settings and the system memory map.
//! 3. **Loading:** JSON parsing from a string or a file.
//!
//! Every field is optional in JSON; missing fields take the defaults below. Command line flags
//! override the loaded values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::SimError;
use crate::core::pipeline::ExecutionMode;

/// Default configuration constants for the simulator.
mod defaults {
    /// Base address of the serial console.
    pub const SERIAL_BASE: u32 = 0x200;

    /// Base address of the system status (halt) device.
    pub const SYS_STATUS_BASE: u32 = 0x270;

    /// Processor cycles per bus clock pulse.
    pub const BUS_CLOCK_DIVIDER: u64 = 5;

    /// Base address of the optional framebuffer.
    pub const FRAMEBUFFER_BASE: u32 = 0x0100_0000;

    /// Framebuffer width in pixels.
    pub const FRAMEBUFFER_WIDTH: u32 = 640;

    /// Framebuffer height in pixels.
    pub const FRAMEBUFFER_HEIGHT: u32 = 480;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use pipesim_core::config::Config;
/// use pipesim_core::core::pipeline::ExecutionMode;
///
/// let json = r#"{
///     "general": { "mode": "Pipelined", "trace_instructions": true },
///     "system": { "bus_clock_divider": 3, "framebuffer": { "enabled": true } }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.mode, ExecutionMode::Pipelined);
/// assert_eq!(config.system.bus_clock_divider, 3);
/// assert_eq!(config.system.serial_base, 0x200);
/// assert_eq!(config.system.framebuffer.width, 640);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// System memory map and bus parameters
    #[serde(default)]
    pub system: SystemConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] if the text is not valid configuration JSON.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json).map_err(|e| SimError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SimError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    /// Checks values that deserialize but cannot describe a machine.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] for a zero bus clock divider, or an enabled framebuffer that is empty
    /// or does not fit in the address space.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.system.bus_clock_divider == 0 {
            return Err(SimError::Config("bus_clock_divider must be positive".into()));
        }
        let fb = &self.system.framebuffer;
        if fb.enabled && (fb.width == 0 || fb.height == 0) {
            return Err(SimError::Config("framebuffer dimensions must be positive".into()));
        }
        if fb.enabled
            && fb
                .width
                .checked_mul(fb.height)
                .and_then(|pixels| pixels.checked_mul(4))
                .and_then(|bytes| fb.base.checked_add(bytes))
                .is_none()
        {
            return Err(SimError::Config(format!(
                "framebuffer of {}x{} pixels at {:#x} exceeds the address space",
                fb.width, fb.height, fb.base
            )));
        }
        Ok(())
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Pipeline timing discipline
    #[serde(default)]
    pub mode: ExecutionMode,

    /// Print every decoded instruction to stderr
    #[serde(default)]
    pub trace_instructions: bool,
}

/// System memory map and bus configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Serial console base address
    #[serde(default = "SystemConfig::default_serial_base")]
    pub serial_base: u32,

    /// System status (halt) device base address
    #[serde(default = "SystemConfig::default_sys_status_base")]
    pub sys_status_base: u32,

    /// Processor cycles per bus clock pulse
    #[serde(default = "SystemConfig::default_bus_clock_divider")]
    pub bus_clock_divider: u64,

    /// Optional framebuffer device
    #[serde(default)]
    pub framebuffer: FramebufferConfig,
}

impl SystemConfig {
    fn default_serial_base() -> u32 {
        defaults::SERIAL_BASE
    }

    fn default_sys_status_base() -> u32 {
        defaults::SYS_STATUS_BASE
    }

    fn default_bus_clock_divider() -> u64 {
        defaults::BUS_CLOCK_DIVIDER
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            serial_base: defaults::SERIAL_BASE,
            sys_status_base: defaults::SYS_STATUS_BASE,
            bus_clock_divider: defaults::BUS_CLOCK_DIVIDER,
            framebuffer: FramebufferConfig::default(),
        }
    }
}

/// Framebuffer device configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FramebufferConfig {
    /// Attach the framebuffer to the bus
    #[serde(default)]
    pub enabled: bool,

    /// Base address of the pixel buffer
    #[serde(default = "FramebufferConfig::default_base")]
    pub base: u32,

    /// Width in pixels
    #[serde(default = "FramebufferConfig::default_width")]
    pub width: u32,

    /// Height in pixels
    #[serde(default = "FramebufferConfig::default_height")]
    pub height: u32,
}

impl FramebufferConfig {
    fn default_base() -> u32 {
        defaults::FRAMEBUFFER_BASE
    }

    fn default_width() -> u32 {
        defaults::FRAMEBUFFER_WIDTH
    }

    fn default_height() -> u32 {
        defaults::FRAMEBUFFER_HEIGHT
    }
}

impl Default for FramebufferConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base: defaults::FRAMEBUFFER_BASE,
            width: defaults::FRAMEBUFFER_WIDTH,
            height: defaults::FRAMEBUFFER_HEIGHT,
        }
    }
}
