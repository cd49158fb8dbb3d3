//! Processor Definition and Initialization.
//!
//! This module defines the `Processor`, the top-level container of a simulated machine. It
//! coordinates the following:
//! 1. **State Management:** Owns the register file, compare flag and program counter.
//! 2. **System Integration:** Builds the memory bus from the program image and attaches the
//!    serial console, the system status device and the optional framebuffer.
//! 3. **Pipeline Control:** Owns the pipeline and the run loop (see [`execution`]).
//! 4. **Reporting:** Exposes registers, statistics and the termination record.

/// Run loop and bus clock coordination.
pub mod execution;

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use tracing::debug;

use crate::common::SimError;
use crate::config::Config;
use crate::core::arch::ArchState;
use crate::core::pipeline::{ExecutionMode, Pipeline};
use crate::sim::loader::LoadedImage;
use crate::soc::devices::{Framebuffer, Serial, SerialSink, SysStatus};
use crate::soc::{Bus, Memory};
use crate::stats::SimStats;

/// Final program counter and reason of a run that ended abnormally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Termination {
    /// Program counter when the run stopped.
    pub pc: u32,
    /// What stopped the run.
    pub reason: SimError,
}

/// The simulated processor.
#[derive(Debug)]
pub struct Processor {
    state: ArchState,
    bus: Bus,
    pipeline: Pipeline,
    stats: SimStats,
    halt: Arc<AtomicBool>,
    bus_clock_divider: u64,
    trace: bool,
    termination: Option<Termination>,
}

impl Processor {
    /// Creates a processor for `image`, writing serial output to stdout.
    ///
    /// # Errors
    ///
    /// [`SimError::Initialization`] if the image is invalid or device ranges overlap, and
    /// [`SimError::Config`] for an invalid configuration.
    pub fn new(image: &LoadedImage, config: &Config) -> Result<Self, SimError> {
        Self::with_serial_sink(image, config, SerialSink::Stdout)
    }

    /// Creates a processor for `image` with an explicit serial console sink.
    ///
    /// # Errors
    ///
    /// See [`Processor::new`].
    pub fn with_serial_sink(
        image: &LoadedImage,
        config: &Config,
        sink: SerialSink,
    ) -> Result<Self, SimError> {
        image.validate()?;
        config.validate()?;

        let mut bus = Bus::new();
        for segment in &image.segments {
            bus.add_device(Box::new(Memory::from(segment)))?;
        }

        let system = &config.system;
        bus.add_device(Box::new(Serial::new(system.serial_base, sink)))?;
        let status = SysStatus::new(system.sys_status_base);
        let halt = status.halt_signal();
        bus.add_device(Box::new(status))?;
        if system.framebuffer.enabled {
            let fb = &system.framebuffer;
            bus.add_device(Box::new(Framebuffer::new(fb.base, fb.width, fb.height)))?;
        }
        debug!(devices = ?bus.device_names(), entry = %format_args!("{:#x}", image.entry), "machine assembled");

        let mode = config.general.mode;
        Ok(Self {
            state: ArchState::new(image.entry),
            bus,
            pipeline: Pipeline::new(mode),
            stats: SimStats {
                pipelined: mode == ExecutionMode::Pipelined,
                ..SimStats::default()
            },
            halt,
            bus_clock_divider: system.bus_clock_divider,
            trace: config.general.trace_instructions,
            termination: None,
        })
    }

    /// Seeds a register before the run. Writes to `r0` are discarded.
    pub fn init_register(&mut self, reg: u8, value: u32) {
        self.state.regs.write(reg, value);
    }

    /// Reads a register.
    pub fn register(&self, reg: u8) -> u32 {
        self.state.regs.read(reg)
    }

    /// The compare flag.
    pub const fn flag(&self) -> bool {
        self.state.flag
    }

    /// Address of the next instruction to fetch.
    pub const fn pc(&self) -> u32 {
        self.state.pc.current()
    }

    /// The pipeline.
    pub const fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// The memory bus, for inspecting memory after a run.
    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    /// Returns `true` once the system status device has published a halt.
    pub fn halted(&self) -> bool {
        self.halt.load(std::sync::atomic::Ordering::Acquire)
    }

    /// Counters accumulated so far, with bus traffic included.
    pub fn stats(&self) -> SimStats {
        SimStats {
            bytes_read: self.bus.bytes_read(),
            bytes_written: self.bus.bytes_written(),
            ..self.stats
        }
    }

    /// Why the last run ended abnormally, if it did.
    pub const fn termination(&self) -> Option<&Termination> {
        self.termination.as_ref()
    }

    /// Formats all registers as two columns.
    pub fn register_dump(&self) -> String {
        self.state.regs.dump()
    }
}
