//! Program Image Loader.
//!
//! This module turns a compiled program into the image handed to the processor. It performs:
//! 1. **Parsing:** Reads ELF32 big-endian OpenRISC executables with the `object` crate.
//! 2. **Segmentation:** Every allocated section becomes a named, based, sized segment, with
//!    its contents copied or zero-filled and its writable/executable flags preserved.
//! 3. **Validation:** Rejects images without segments or whose entry point is not inside an
//!    executable segment.

use std::path::Path;

use object::elf;
use object::read::elf::{FileHeader, SectionHeader};
use tracing::debug;

use crate::common::{INSTRUCTION_SIZE, SimError};

/// A memory segment of a program image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// Segment name (`text` or `data`).
    pub name: String,
    /// Base address.
    pub base: u32,
    /// Required base alignment in bytes (0 or 1 for none).
    pub align: u32,
    /// Initial contents; the length is the segment size.
    pub data: Vec<u8>,
    /// Stores are allowed.
    pub writable: bool,
    /// Holds instructions.
    pub executable: bool,
}

impl Segment {
    /// Size of the segment in bytes.
    pub fn size(&self) -> u32 {
        self.data.len() as u32
    }

    /// Returns `true` if `addr` lies inside the segment.
    pub fn contains(&self, addr: u32) -> bool {
        addr >= self.base && u64::from(addr) < u64::from(self.base) + self.data.len() as u64
    }
}

/// The set of segments and the entry point handed to the processor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadedImage {
    /// Memory segments.
    pub segments: Vec<Segment>,
    /// Initial program counter.
    pub entry: u32,
}

impl LoadedImage {
    /// Checks the image before any simulation starts.
    ///
    /// # Errors
    ///
    /// [`SimError::Initialization`] if there are no segments, a segment violates its
    /// alignment, or the entry point is misaligned or outside every executable segment.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.segments.is_empty() {
            return Err(SimError::Initialization("image has no segments".into()));
        }
        if let Some(seg) = self.segments.iter().find(|s| s.align > 1 && s.base % s.align != 0) {
            return Err(SimError::Initialization(format!(
                "segment '{}' at {:#x} violates {}-byte alignment",
                seg.name, seg.base, seg.align
            )));
        }
        if self.entry % INSTRUCTION_SIZE != 0 {
            return Err(SimError::Initialization(format!(
                "entry point {:#x} is misaligned",
                self.entry
            )));
        }
        if !self.segments.iter().any(|s| s.executable && s.contains(self.entry)) {
            return Err(SimError::Initialization(format!(
                "entry point {:#x} is outside every executable segment",
                self.entry
            )));
        }
        Ok(())
    }

    /// The first executable segment, for disassembly.
    pub fn text_segment(&self) -> Option<&Segment> {
        self.segments.iter().find(|s| s.executable)
    }
}

/// Reads and parses an ELF executable from disk.
///
/// # Errors
///
/// [`SimError::Initialization`] if the file cannot be read or is not a supported executable.
pub fn load_elf(path: impl AsRef<Path>) -> Result<LoadedImage, SimError> {
    let path = path.as_ref();
    let data = std::fs::read(path)
        .map_err(|e| SimError::Initialization(format!("{}: {e}", path.display())))?;
    parse_elf(&data)
}

fn elf_error(e: object::read::Error) -> SimError {
    SimError::Initialization(format!("malformed ELF file: {e}"))
}

/// Parses an in-memory ELF executable.
///
/// # Errors
///
/// [`SimError::Initialization`] for anything but a big-endian ELF32 OpenRISC executable with
/// a program header table.
pub fn parse_elf(data: &[u8]) -> Result<LoadedImage, SimError> {
    let header = elf::FileHeader32::<object::BigEndian>::parse(data).map_err(elf_error)?;
    let endian = header.endian().map_err(elf_error)?;

    if header.e_machine(endian) != elf::EM_OPENRISC {
        return Err(SimError::Initialization(format!(
            "unsupported machine type {}",
            header.e_machine(endian)
        )));
    }
    if header.e_phoff(endian) == 0 {
        return Err(SimError::Initialization("not an executable: no program headers".into()));
    }

    let sections = header.sections(endian, data).map_err(elf_error)?;
    let mut segments = Vec::new();
    for section in sections.iter() {
        let flags = section.sh_flags(endian);
        if flags & elf::SHF_ALLOC == 0 {
            continue;
        }
        let executable = flags & elf::SHF_EXECINSTR != 0;
        let size = section.sh_size(endian) as usize;
        let contents = if section.sh_type(endian) == elf::SHT_PROGBITS {
            let bytes = section.data(endian, data).map_err(elf_error)?;
            let mut buf = bytes.to_vec();
            buf.resize(size, 0);
            buf
        } else {
            vec![0; size]
        };
        if contents.is_empty() {
            continue;
        }

        let segment = Segment {
            name: if executable { "text" } else { "data" }.to_string(),
            base: section.sh_addr(endian),
            align: section.sh_addralign(endian),
            data: contents,
            writable: flags & elf::SHF_WRITE != 0,
            executable,
        };
        debug!(
            name = %segment.name,
            base = %format_args!("{:#x}", segment.base),
            size = segment.size(),
            "loaded segment"
        );
        segments.push(segment);
    }

    let image = LoadedImage {
        segments,
        entry: header.e_entry(endian),
    };
    image.validate()?;
    Ok(image)
}
