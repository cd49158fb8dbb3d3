//! OpenRISC pipeline simulator CLI.
//!
//! This binary provides a single entry point for the simulator and its disassembler. It performs:
//! 1. **Program run:** Execute an ELF program, then dump registers and statistics.
//! 2. **Unit test:** Run a `.conf` test vector in test mode and check its post conditions.
//! 3. **Disassembly:** Decode a single hexadecimal word, an ELF text segment, or a file of
//!    hexadecimal words.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{ArgGroup, Parser};
use tracing_subscriber::EnvFilter;

use pipesim_core::config::Config;
use pipesim_core::core::pipeline::ExecutionMode;
use pipesim_core::isa::disasm::disassemble;
use pipesim_core::sim::loader::{self, LoadedImage};
use pipesim_core::sim::testfile::{RegisterInit, TestVector};
use pipesim_core::{Processor, SimError};

/// Leading bytes of every ELF file.
const ELF_MAGIC: &[u8] = b"\x7fELF";

/// Process exit codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Exit {
    Success = 0,
    AbnormalTermination = 1,
    UnitTestFailed = 2,
    InitializationError = 3,
    InvalidArgument = 4,
}

impl From<Exit> for ExitCode {
    fn from(code: Exit) -> Self {
        Self::from(code as u8)
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "pipesim",
    author,
    version,
    about = "Cycle-level 5-stage pipelined OpenRISC simulator",
    long_about = "Run an OpenRISC ELF program, run a unit test vector, or disassemble instructions.\n\nExamples:\n  pipesim -p -r r1=5 tests/add.bin\n  pipesim -p -t tests/add.conf\n  pipesim -x 9c200005\n  pipesim -X tests/add.bin",
    group(ArgGroup::new("action").required(true).args(["program", "test", "disasm_word", "disasm_file"]))
)]
struct Cli {
    /// Print every decoded instruction and enable debug logging.
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Run the pipelined core. Without it one stage runs per cycle.
    #[arg(short = 'p', long = "pipeline")]
    pipelined: bool,

    /// Register initializer of the form rX=Y (repeatable).
    #[arg(short = 'r', long = "reg", value_name = "REGINIT", conflicts_with = "test")]
    registers: Vec<String>,

    /// Unit test configuration file (.conf).
    #[arg(short = 't', long = "test", value_name = "FILE")]
    test: Option<PathBuf>,

    /// Disassemble a single instruction given in hexadecimal.
    #[arg(short = 'x', value_name = "INSTRUCTION")]
    disasm_word: Option<String>,

    /// Disassemble an ELF text segment or a file with one hexadecimal word per line.
    #[arg(short = 'X', value_name = "FILE")]
    disasm_file: Option<PathBuf>,

    /// JSON configuration file; built-in defaults otherwise.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// ELF program to run.
    program: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Exit::Success,
                _ => Exit::InvalidArgument,
            };
            let _ = e.print();
            return code.into();
        }
    };

    init_logging(cli.debug);

    let code = if let Some(word) = &cli.disasm_word {
        disasm_single(word)
    } else if let Some(path) = &cli.disasm_file {
        disasm_file(path)
    } else {
        launch(&cli)
    };
    code.into()
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the default level.
fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Builds the run configuration from the optional file and the mode flags.
fn build_config(cli: &Cli) -> Result<Config, SimError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if cli.pipelined {
        config.general.mode = ExecutionMode::Pipelined;
    }
    if cli.debug {
        config.general.trace_instructions = true;
    }
    Ok(config)
}

/// Runs a program or a unit test vector.
fn launch(cli: &Cli) -> Exit {
    let test = match cli.test.as_deref().map(TestVector::from_file).transpose() {
        Ok(test) => test,
        Err(e) => {
            eprintln!("Error loading test config: {e}");
            return if cli.test.as_deref().is_some_and(|p| !has_conf_extension(p)) {
                Exit::InvalidArgument
            } else {
                Exit::InitializationError
            };
        }
    };

    let initializers = match &test {
        Some(vector) => vector.pre.clone(),
        None => match cli
            .registers
            .iter()
            .map(|r| RegisterInit::parse(r))
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(inits) => inits,
            Err(e) => {
                eprintln!("Error: {e}");
                return Exit::InvalidArgument;
            }
        },
    };

    let program = match (&test, &cli.program) {
        (Some(vector), _) => vector.executable.clone(),
        (None, Some(path)) => path.clone(),
        (None, None) => {
            eprintln!("Error: no program given");
            return Exit::InvalidArgument;
        }
    };

    let mut processor = match build_config(cli)
        .and_then(|config| Ok((loader::load_elf(&program)?, config)))
        .and_then(|(image, config)| Processor::new(&image, &config))
    {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Couldn't load program: {e}");
            return Exit::InitializationError;
        }
    };

    for init in &initializers {
        processor.init_register(init.reg, init.value);
    }

    tracing::info!(program = %program.display(), test = test.is_some(), "starting run");
    let completed = processor.run(test.is_some());
    if let Some(termination) = processor.termination() {
        eprintln!("ABNORMAL PROGRAM TERMINATION; PC = {:#x}", termination.pc);
        eprintln!("Reason: {}", termination.reason);
    }

    match test {
        None => {
            eprint!("{}", processor.register_dump());
            eprintln!();
            eprintln!("{}", processor.stats());
            if completed { Exit::Success } else { Exit::AbnormalTermination }
        }
        Some(vector) => {
            let mismatches = vector.check(&processor);
            for mismatch in &mismatches {
                eprintln!("{mismatch}");
            }
            if !mismatches.is_empty() {
                Exit::UnitTestFailed
            } else if completed {
                Exit::Success
            } else {
                Exit::AbnormalTermination
            }
        }
    }
}

fn has_conf_extension(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "conf")
}

fn parse_hex_word(text: &str) -> Option<u32> {
    let text = text.trim();
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u32::from_str_radix(digits, 16).ok()
}

/// Prints one disassembled word, prefixed by its address when it has one.
fn print_disassembly(word: u32, addr: Option<u32>) {
    match addr {
        Some(addr) => println!("{addr:#x}:\t0x{word:08x}\t{}", disassemble(word)),
        None => println!("0x{word:08x}\t{}", disassemble(word)),
    }
}

fn disasm_single(arg: &str) -> Exit {
    match parse_hex_word(arg) {
        Some(word) => {
            print_disassembly(word, None);
            Exit::Success
        }
        None => {
            eprintln!("Error: could not parse provided argument as instruction.");
            Exit::InvalidArgument
        }
    }
}

fn disasm_file(path: &Path) -> Exit {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error: '{}': {e}", path.display());
            return Exit::InvalidArgument;
        }
    };

    if data.starts_with(ELF_MAGIC) {
        return match loader::parse_elf(&data) {
            Ok(image) => disasm_image(&image),
            Err(e) => {
                eprintln!("Error: couldn't load ELF file: {e}");
                Exit::InitializationError
            }
        };
    }

    let Ok(text) = String::from_utf8(data) else {
        eprintln!("Error: '{}' is neither an ELF file nor text", path.display());
        return Exit::InvalidArgument;
    };
    for (lineno, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let Some(word) = parse_hex_word(line) else {
            eprintln!("Error: failed to parse instruction at line {}", lineno + 1);
            return Exit::InvalidArgument;
        };
        print_disassembly(word, None);
    }
    Exit::Success
}

fn disasm_image(image: &LoadedImage) -> Exit {
    let Some(text) = image.text_segment() else {
        eprintln!("Error: ELF file has no text segment");
        return Exit::InitializationError;
    };
    for (i, chunk) in text.data.chunks_exact(4).enumerate() {
        let word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        print_disassembly(word, Some(text.base + (i as u32) * 4));
    }
    Exit::Success
}
