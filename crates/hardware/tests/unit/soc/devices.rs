use pipesim_core::soc::devices::{Framebuffer, Serial, SerialSink, SysStatus};
use pipesim_core::soc::{Bus, Device};
use pretty_assertions::assert_eq;

#[test]
fn serial_emits_on_clock_pulse() {
    let (sink, out) = SerialSink::capture();
    let mut serial = Serial::new(0x200, sink);
    serial.write_u8(0, b'o');
    serial.write_u32(0, u32::from(b'k'));
    // Other offsets are ignored.
    serial.write_u8(4, b'x');
    assert!(out.lock().unwrap().is_empty());

    serial.tick();
    assert_eq!(out.lock().unwrap().as_slice(), b"ok");
    assert_eq!(serial.read_u8(0), 0);
}

#[test]
fn serial_flush_drains_pending_bytes() {
    let (sink, out) = SerialSink::capture();
    let mut bus = Bus::new();
    bus.add_device(Box::new(Serial::new(0x200, sink))).unwrap();
    bus.write_u8(0x200, b'!').unwrap();
    bus.flush();
    assert_eq!(out.lock().unwrap().as_slice(), b"!");
}

#[test]
fn halt_is_published_on_the_next_pulse() {
    let mut status = SysStatus::new(0x270);
    let signal = status.halt_signal();
    status.write_u32(0, 1);
    assert!(!status.should_halt());
    assert_eq!(status.read_u32(0), 0);

    status.tick();
    assert!(status.should_halt());
    assert!(signal.load(std::sync::atomic::Ordering::Acquire));
    assert_eq!(status.read_u32(0), 1);
}

#[test]
fn status_ignores_other_registers() {
    let mut status = SysStatus::new(0x270);
    status.write_u8(8, 1);
    status.tick();
    assert!(!status.should_halt());
}

#[test]
fn framebuffer_stores_pixels_row_major() {
    let mut fb = Framebuffer::new(0x0100_0000, 4, 2);
    assert_eq!(fb.address_range(), (0x0100_0000, 32));
    fb.write_u32(4 * 5, 0x00FF_8040);
    fb.write_u8(3, 0x7F);
    assert_eq!(fb.pixels()[5], 0x00FF_8040);
    assert_eq!(fb.pixels()[0], 0x0000_007F);
    assert_eq!(fb.read_u8(4 * 5 + 1), 0xFF);
    assert_eq!(fb.read_u16(4 * 5 + 2), 0x8040);
    assert_eq!(fb.dimensions(), (4, 2));

    fb.tick();
    fb.tick();
    assert_eq!(fb.frames(), 2);
}
