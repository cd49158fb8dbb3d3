//! Minimal big-endian ELF32 writer for loader tests.
//!
//! Layout: file header, one `PT_LOAD` program header, section contents, the section name
//! table, then the section header table.

const EHDR_SIZE: u32 = 52;
const PHDR_SIZE: u32 = 32;
const SHDR_SIZE: u32 = 40;

pub const EM_OPENRISC: u16 = 92;
const ET_EXEC: u16 = 2;
const SHT_PROGBITS: u32 = 1;
const SHT_STRTAB: u32 = 3;
const SHT_NOBITS: u32 = 8;
pub const SHF_WRITE: u32 = 0x1;
pub const SHF_ALLOC: u32 = 0x2;
pub const SHF_EXECINSTR: u32 = 0x4;

#[derive(Clone, Debug)]
struct Section {
    name: String,
    addr: u32,
    flags: u32,
    align: u32,
    /// `None` for `SHT_NOBITS` sections of the given size.
    data: Option<Vec<u8>>,
    size: u32,
}

/// Fluent builder for an executable image.
#[derive(Clone, Debug)]
pub struct ElfBuilder {
    machine: u16,
    entry: u32,
    program_headers: bool,
    sections: Vec<Section>,
}

impl Default for ElfBuilder {
    fn default() -> Self {
        Self {
            machine: EM_OPENRISC,
            entry: 0,
            program_headers: true,
            sections: Vec::new(),
        }
    }
}

fn put16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn put32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_be_bytes());
}

impl ElfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn machine(mut self, machine: u16) -> Self {
        self.machine = machine;
        self
    }

    pub fn entry(mut self, entry: u32) -> Self {
        self.entry = entry;
        self
    }

    /// Drops the program header table, as in a relocatable object.
    pub fn without_program_headers(mut self) -> Self {
        self.program_headers = false;
        self
    }

    /// Adds an executable `.text` section holding `words`.
    pub fn text(mut self, addr: u32, words: &[u32]) -> Self {
        let data: Vec<u8> = words.iter().flat_map(|w| w.to_be_bytes()).collect();
        self.sections.push(Section {
            name: ".text".into(),
            addr,
            flags: SHF_ALLOC | SHF_EXECINSTR,
            align: 4,
            size: data.len() as u32,
            data: Some(data),
        });
        self
    }

    /// Adds a writable `.data` section.
    pub fn data(mut self, addr: u32, bytes: &[u8]) -> Self {
        self.sections.push(Section {
            name: ".data".into(),
            addr,
            flags: SHF_ALLOC | SHF_WRITE,
            align: 4,
            size: bytes.len() as u32,
            data: Some(bytes.to_vec()),
        });
        self
    }

    /// Adds a zero-initialized `.bss` section of `size` bytes.
    pub fn bss(mut self, addr: u32, size: u32) -> Self {
        self.sections.push(Section {
            name: ".bss".into(),
            addr,
            flags: SHF_ALLOC | SHF_WRITE,
            align: 4,
            size,
            data: None,
        });
        self
    }

    /// Adds a non-allocated section the loader must skip.
    pub fn comment(mut self, text: &str) -> Self {
        self.sections.push(Section {
            name: ".comment".into(),
            addr: 0,
            flags: 0,
            align: 1,
            size: text.len() as u32,
            data: Some(text.as_bytes().to_vec()),
        });
        self
    }

    pub fn build(self) -> Vec<u8> {
        let phnum: u16 = if self.program_headers { 1 } else { 0 };
        let contents_start = EHDR_SIZE + u32::from(phnum) * PHDR_SIZE;

        // Section contents, then the name table.
        let mut body = Vec::new();
        let mut offsets = Vec::new();
        for section in &self.sections {
            offsets.push(contents_start + body.len() as u32);
            if let Some(data) = &section.data {
                body.extend_from_slice(data);
                while body.len() % 4 != 0 {
                    body.push(0);
                }
            }
        }
        let mut strtab = vec![0u8];
        let mut name_offsets = Vec::new();
        for section in &self.sections {
            name_offsets.push(strtab.len() as u32);
            strtab.extend_from_slice(section.name.as_bytes());
            strtab.push(0);
        }
        let shstrtab_name = strtab.len() as u32;
        strtab.extend_from_slice(b".shstrtab\0");
        let strtab_offset = contents_start + body.len() as u32;
        body.extend_from_slice(&strtab);
        while body.len() % 4 != 0 {
            body.push(0);
        }
        let shoff = contents_start + body.len() as u32;
        let shnum = self.sections.len() as u16 + 2;

        let mut out = Vec::new();
        out.extend_from_slice(&[0x7f, b'E', b'L', b'F', 1, 2, 1, 0]);
        out.extend_from_slice(&[0; 8]);
        put16(&mut out, ET_EXEC);
        put16(&mut out, self.machine);
        put32(&mut out, 1);
        put32(&mut out, self.entry);
        put32(&mut out, if self.program_headers { EHDR_SIZE } else { 0 });
        put32(&mut out, shoff);
        put32(&mut out, 0);
        put16(&mut out, EHDR_SIZE as u16);
        put16(&mut out, PHDR_SIZE as u16);
        put16(&mut out, phnum);
        put16(&mut out, SHDR_SIZE as u16);
        put16(&mut out, shnum);
        put16(&mut out, shnum - 1);

        if self.program_headers {
            let first = self.sections.first();
            put32(&mut out, 1); // PT_LOAD
            put32(&mut out, contents_start);
            put32(&mut out, first.map_or(0, |s| s.addr));
            put32(&mut out, first.map_or(0, |s| s.addr));
            put32(&mut out, first.map_or(0, |s| s.size));
            put32(&mut out, first.map_or(0, |s| s.size));
            put32(&mut out, 5); // R+X
            put32(&mut out, 4);
        }

        out.extend_from_slice(&body);

        out.extend_from_slice(&[0; SHDR_SIZE as usize]);
        for ((section, offset), name) in self.sections.iter().zip(&offsets).zip(&name_offsets) {
            let kind = if section.data.is_some() {
                SHT_PROGBITS
            } else {
                SHT_NOBITS
            };
            for field in [
                *name,
                kind,
                section.flags,
                section.addr,
                *offset,
                section.size,
                0,
                0,
                section.align,
                0,
            ] {
                put32(&mut out, field);
            }
        }
        for field in [
            shstrtab_name,
            SHT_STRTAB,
            0,
            0,
            strtab_offset,
            strtab.len() as u32,
            0,
            0,
            1,
            0,
        ] {
            put32(&mut out, field);
        }
        out
    }
}
