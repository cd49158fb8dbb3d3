use std::io::Write;

use pipesim_core::SimError;
use pipesim_core::config::Config;
use pipesim_core::sim::loader::{LoadedImage, Segment, load_elf, parse_elf};
use pipesim_core::Processor;
use pretty_assertions::assert_eq;

use crate::common::builder::elf::ElfBuilder;
use crate::common::builder::instruction::*;
use crate::common::harness::init_tracing;

#[test]
fn text_and_data_become_segments() {
    let elf = ElfBuilder::new()
        .entry(0x100)
        .text(0x100, &[addi(1, 0, 1), nop()])
        .data(0x2000, &[1, 2, 3, 4])
        .comment("built by hand")
        .build();
    let image = parse_elf(&elf).unwrap();

    assert_eq!(image.entry, 0x100);
    assert_eq!(image.segments.len(), 2);
    let text = image.text_segment().unwrap();
    assert_eq!(text.base, 0x100);
    assert_eq!(text.data, [0x9C, 0x20, 0x00, 0x01, 0x15, 0x00, 0x00, 0x00]);
    assert!(text.executable && !text.writable);

    let data = &image.segments[1];
    assert_eq!(data.name, "data");
    assert_eq!(data.data, [1, 2, 3, 4]);
    assert!(data.writable && !data.executable);
}

#[test]
fn bss_is_zero_filled() {
    let elf = ElfBuilder::new()
        .text(0, &[nop()])
        .bss(0x3000, 64)
        .build();
    let image = parse_elf(&elf).unwrap();
    let bss = image.segments.iter().find(|s| s.base == 0x3000).unwrap();
    assert_eq!(bss.data, vec![0; 64]);
}

#[test]
fn foreign_machine_is_rejected() {
    let elf = ElfBuilder::new().machine(243).text(0, &[nop()]).build();
    assert!(matches!(parse_elf(&elf), Err(SimError::Initialization(_))));
}

#[test]
fn object_without_program_headers_is_rejected() {
    let elf = ElfBuilder::new()
        .without_program_headers()
        .text(0, &[nop()])
        .build();
    let err = parse_elf(&elf).unwrap_err();
    assert!(err.to_string().contains("program headers"));
}

#[test]
fn garbage_is_rejected() {
    assert!(parse_elf(b"not an elf file at all, just some text").is_err());
    assert!(parse_elf(&[]).is_err());
}

#[test]
fn entry_outside_text_is_rejected() {
    let elf = ElfBuilder::new()
        .entry(0x2000)
        .text(0, &[nop()])
        .data(0x2000, &[0; 4])
        .build();
    assert!(matches!(parse_elf(&elf), Err(SimError::Initialization(_))));
}

#[test]
fn image_validation() {
    let text = Segment {
        name: "text".into(),
        base: 0x10,
        align: 0x20,
        data: vec![0; 4],
        writable: false,
        executable: true,
    };
    let misaligned_base = LoadedImage {
        segments: vec![text.clone()],
        entry: 0x10,
    };
    assert!(misaligned_base.validate().is_err());

    let ok = LoadedImage {
        segments: vec![Segment { align: 4, ..text }],
        entry: 0x10,
    };
    assert!(ok.validate().is_ok());
    assert!(LoadedImage::default().validate().is_err());
}

#[test]
fn loaded_file_runs() {
    init_tracing();
    let elf = ElfBuilder::new()
        .text(0, &[addi(1, 0, 5), addi(2, 0, 7), add(3, 1, 2), 0x40FF_CCFF])
        .build();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&elf).unwrap();

    let image = load_elf(file.path()).unwrap();
    let mut processor = Processor::new(&image, &Config::default()).unwrap();
    assert!(processor.run(true));
    assert_eq!(processor.register(3), 12);
}

#[test]
fn missing_file_is_an_initialization_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_elf(dir.path().join("absent.bin")),
        Err(SimError::Initialization(_))
    ));
}
