use std::sync::{Arc, Mutex};

use pipesim_core::common::TEST_END_MARKER;
use pipesim_core::config::Config;
use pipesim_core::core::Termination;
use pipesim_core::core::pipeline::ExecutionMode;
use pipesim_core::sim::loader::{LoadedImage, Segment};
use pipesim_core::soc::devices::SerialSink;
use pipesim_core::stats::SimStats;
use pipesim_core::{Processor, SimError};
use tracing_subscriber::EnvFilter;

/// Base address of the writable data segment.
pub const DATA_BASE: u32 = 0x1000;
/// Size of the data segment in bytes.
pub const DATA_SIZE: usize = 0x100;
/// Serial transmit register under the default configuration.
pub const SERIAL_TX: u32 = 0x200;
/// System status register under the default configuration.
pub const SYS_STATUS: u32 = 0x270;

/// Routes simulator logs through the test writer. `RUST_LOG` selects the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// Describes a machine: program text at address 0, a data segment, registers and mode.
///
/// The text is terminated with the test end marker unless [`TestContext::without_end_marker`]
/// is used.
#[derive(Clone, Debug)]
pub struct TestContext {
    text: Vec<u32>,
    data: Vec<u8>,
    regs: Vec<(u8, u32)>,
    end_marker: bool,
    pub config: Config,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        init_tracing();
        Self {
            text: Vec::new(),
            data: vec![0; DATA_SIZE],
            regs: Vec::new(),
            end_marker: true,
            config: Config::default(),
        }
    }

    /// Loads the program text at address 0.
    pub fn program(mut self, instructions: &[u32]) -> Self {
        self.text = instructions.to_vec();
        self
    }

    /// Copies `bytes` to the start of the data segment.
    pub fn with_data(mut self, bytes: &[u8]) -> Self {
        self.data[..bytes.len()].copy_from_slice(bytes);
        self
    }

    pub fn with_reg(mut self, reg: u8, value: u32) -> Self {
        self.regs.push((reg, value));
        self
    }

    pub fn mode(mut self, mode: ExecutionMode) -> Self {
        self.config.general.mode = mode;
        self
    }

    pub fn pipelined(self) -> Self {
        self.mode(ExecutionMode::Pipelined)
    }

    pub fn without_end_marker(mut self) -> Self {
        self.end_marker = false;
        self
    }

    /// The program image handed to the processor.
    pub fn image(&self) -> LoadedImage {
        let mut words = self.text.clone();
        if self.end_marker {
            words.push(TEST_END_MARKER);
        }
        LoadedImage {
            segments: vec![
                Segment {
                    name: "text".into(),
                    base: 0,
                    align: 4,
                    data: words.iter().flat_map(|w| w.to_be_bytes()).collect(),
                    writable: false,
                    executable: true,
                },
                Segment {
                    name: "data".into(),
                    base: DATA_BASE,
                    align: 4,
                    data: self.data.clone(),
                    writable: true,
                    executable: false,
                },
            ],
            entry: 0,
        }
    }

    /// Builds the processor with a captured serial console and seeded registers.
    pub fn build(&self) -> Result<(Processor, Arc<Mutex<Vec<u8>>>), SimError> {
        let (sink, serial) = SerialSink::capture();
        let mut processor = Processor::with_serial_sink(&self.image(), &self.config, sink)?;
        for &(reg, value) in &self.regs {
            processor.init_register(reg, value);
        }
        Ok((processor, serial))
    }

    /// Runs the program in test mode, where the end marker is a clean stop.
    pub fn run(&self) -> RunResult {
        self.run_with(true)
    }

    /// Runs the program the way the command line does for plain programs.
    pub fn run_program(&self) -> RunResult {
        self.run_with(false)
    }

    fn run_with(&self, test_mode: bool) -> RunResult {
        let (mut processor, serial) = self.build().unwrap();
        let completed = processor.run(test_mode);
        RunResult {
            processor,
            serial,
            completed,
        }
    }
}

/// A finished run.
#[derive(Debug)]
pub struct RunResult {
    pub processor: Processor,
    pub serial: Arc<Mutex<Vec<u8>>>,
    pub completed: bool,
}

impl RunResult {
    pub fn reg(&self, reg: u8) -> u32 {
        self.processor.register(reg)
    }

    /// All 32 registers.
    pub fn regs(&self) -> Vec<u32> {
        (0..32).map(|r| self.processor.register(r)).collect()
    }

    pub fn stats(&self) -> SimStats {
        self.processor.stats()
    }

    pub fn termination(&self) -> Option<&Termination> {
        self.processor.termination()
    }

    pub fn serial_output(&self) -> String {
        String::from_utf8_lossy(&self.serial.lock().unwrap()).into_owned()
    }

    /// Reads a data word after the run.
    pub fn data_word(&mut self, addr: u32) -> u32 {
        self.processor.bus_mut().read_u32(addr).unwrap()
    }
}
